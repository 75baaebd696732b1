//! Fixed colors of the short.

use crate::foundation::core::Rgba8;

/// Wall color behind the windows.
pub const WALL: Rgba8 = Rgba8::rgb(118, 136, 155);
/// Window glass during the day.
pub const WINDOW_DAY: Rgba8 = Rgba8::rgb(158, 207, 218);
/// Window glass at night.
pub const WINDOW_NIGHT: Rgba8 = Rgba8::rgb(22, 31, 63);
/// Trapezoid fill (dark green).
pub const TRAPEZOID: Rgba8 = Rgba8::rgb(0, 100, 0);
/// Rectangle fill before it turns into the night sky (sandy brown).
pub const RECTANGLE: Rgba8 = Rgba8::rgb(244, 164, 96);
/// Rectangle fill once fully blended into the night.
pub const RECTANGLE_NIGHT: Rgba8 = Rgba8::rgb(22, 31, 63);
/// Crescent fill (light goldenrod yellow).
pub const CRESCENT: Rgba8 = Rgba8::rgb(250, 250, 210);
/// Credits screen background.
pub const CREDITS_BACKGROUND: Rgba8 = Rgba8::BLACK;
/// All text.
pub const TEXT: Rgba8 = Rgba8::WHITE;
