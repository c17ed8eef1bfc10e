use std::fs;
use std::io::Cursor;
use std::path::Path;

use anyhow::{Context, Result, anyhow};
use exif::{In, Reader, Tag, Value};
use log::warn;
use raylib::prelude::*;

// --- Load Image, Apply EXIF Rotation, Create Texture ---
pub fn load_texture_with_exif_rotation(
    rl: &mut RaylibHandle,
    thread: &RaylibThread,
    image_path: &Path,
) -> Result<Texture2D> {
    let file_bytes = fs::read(image_path)
        .with_context(|| format!("failed to read file {}", image_path.display()))?;

    let mut orientation = 1; // Default: no rotation

    // Attempt to read EXIF data (only works reliably for JPEG)
    let extension = image_path
        .extension()
        .and_then(|s| s.to_str())
        .unwrap_or("")
        .to_lowercase();
    if extension == "jpg" || extension == "jpeg" {
        match Reader::new().read_from_container(&mut Cursor::new(&file_bytes)) {
            Ok(exif) => {
                if let Some(field) = exif.get_field(Tag::Orientation, In::PRIMARY) {
                    if let Value::Short(values) = &field.value {
                        if let Some(&value) = values.first() {
                            orientation = value;
                        }
                    }
                }
            }
            Err(e) => {
                // Non-critical: proceed without rotation
                warn!("could not read EXIF data for {}: {e}", image_path.display());
            }
        }
    }

    // Provide extension hint for loading from memory
    let mut image = Image::load_image_from_mem(&format!(".{extension}"), &file_bytes)
        .map_err(|e| anyhow!("failed to decode {}: {e}", image_path.display()))?;

    // 1 = normal, 3 = 180 deg, 6 = 90 deg CW, 8 = 90 deg CCW.
    // Orientations involving flips are ignored.
    match orientation {
        3 => {
            image.rotate_cw();
            image.rotate_cw();
        }
        6 => image.rotate_cw(),
        8 => image.rotate_ccw(),
        _ => {}
    }

    rl.load_texture_from_image(thread, &image)
        .map_err(|e| anyhow!("failed to create texture for {}: {e}", image_path.display()))
}

// --- Create Texture from an In-Memory Download ---
// Raylib wants a filetype hint; sniff PNG by signature, assume JPEG otherwise.
pub fn load_texture_from_memory(
    rl: &mut RaylibHandle,
    thread: &RaylibThread,
    bytes: &[u8],
) -> Result<Texture2D> {
    let hint = if bytes.starts_with(&[0x89, b'P', b'N', b'G']) {
        ".png"
    } else {
        ".jpg"
    };
    let image = Image::load_image_from_mem(hint, bytes)
        .map_err(|e| anyhow!("failed to decode downloaded image: {e}"))?;
    rl.load_texture_from_image(thread, &image)
        .map_err(|e| anyhow!("failed to create texture from downloaded image: {e}"))
}
