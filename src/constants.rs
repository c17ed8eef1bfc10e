use raylib::prelude::*;

pub const DEFAULT_WIDTH: i32 = 1280;          // Initial window width
pub const DEFAULT_HEIGHT: i32 = 800;          // Initial window height
pub const FPS: u32 = 60;                      // Frames per second

pub const CARD_DURATION: f32 = 0.45;          // Testimonial card enter/exit (seconds)
pub const REVEAL_DURATION: f32 = 0.6;         // Section fade-in-up (seconds)
pub const REVEAL_RISE: f32 = 20.0;            // Vertical travel of a revealing section (px)
pub const REVEAL_AHEAD: f32 = 0.8;            // Fraction of the viewport that triggers a reveal

pub const SCROLL_STEP: f32 = 80.0;            // Pixels per wheel notch / arrow key
pub const SCROLL_SMOOTHING: f32 = 10.0;       // Exponential approach rate toward the scroll target

pub const HEADER_HEIGHT: f32 = 64.0;
pub const NARROW_BREAKPOINT: f32 = 900.0;     // Below this width the nav collapses into the menu

pub const AVATAR_SIZE: u32 = 96;              // Requested avatar pixel size

// Palette lifted from the site design (indigo accents on slate)
pub const INDIGO: Color = Color { r: 79, g: 70, b: 229, a: 255 };
pub const INDIGO_PALE: Color = Color { r: 224, g: 231, b: 255, a: 255 };
pub const INK: Color = Color { r: 15, g: 23, b: 42, a: 255 };
pub const SLATE: Color = Color { r: 71, g: 85, b: 105, a: 255 };
pub const SLATE_SOFT: Color = Color { r: 100, g: 116, b: 139, a: 255 };
pub const SLATE_FAINT: Color = Color { r: 203, g: 213, b: 225, a: 255 };
pub const HAIRLINE: Color = Color { r: 226, g: 232, b: 240, a: 255 };
pub const PAPER: Color = Color { r: 255, g: 255, b: 255, a: 255 };
pub const PAPER_TINT: Color = Color { r: 248, g: 250, b: 252, a: 255 };
