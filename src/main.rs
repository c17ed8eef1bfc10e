use std::path::{Path, PathBuf};

use anyhow::Result;
use clap::Parser;
use log::info;
use raylib::prelude::*;

mod avatar;
mod carousel;
mod constants;
mod content;
mod page;
mod reveal;
mod texture_loader;
mod transition;

use crate::constants::*;
use crate::content::SiteContent;
use crate::page::Page;

/// Desktop showcase for a therapy practice: the landing page rendered as a
/// native, interactive presentation.
#[derive(Parser)]
#[command(version, about)]
struct Args {
    /// Path to the site content file
    #[arg(long, default_value = "site.toml")]
    content: PathBuf,

    /// Initial window width
    #[arg(long, default_value_t = DEFAULT_WIDTH)]
    width: i32,

    /// Initial window height
    #[arg(long, default_value_t = DEFAULT_HEIGHT)]
    height: i32,

    /// Skip avatar downloads and draw initials discs instead
    #[arg(long)]
    offline: bool,
}

fn main() -> Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();
    let args = Args::parse();

    let content = SiteContent::load(&args.content)?;
    // Image paths in the content file are relative to the file itself.
    let base = args.content.parent().map(Path::to_path_buf).unwrap_or_default();
    info!(
        "loaded content for '{}' with {} testimonials",
        content.site.name,
        content.testimonials.len()
    );

    let (mut rl, thread) = raylib::init()
        .size(args.width, args.height)
        .title(&content.site.name)
        .vsync()
        .resizable()
        .build();
    rl.set_target_fps(FPS);
    rl.set_trace_log(TraceLogLevel::LOG_ERROR);

    let mut page = Page::new(&mut rl, &thread, content, &base, args.offline)?;

    // --- Main Loop ---
    while !rl.window_should_close() {
        let dt = rl.get_frame_time();
        let sw = rl.get_screen_width() as f32;
        let sh = rl.get_screen_height() as f32;

        page.handle_input(&rl, sw, sh);
        page.update(dt, sw, sh);

        let mut d = rl.begin_drawing(&thread);
        page.draw(&mut d, sw, sh);
    }

    Ok(())
}
