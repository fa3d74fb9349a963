use std::fs;
use std::path::{Path, PathBuf};

use image::{Rgb, RgbImage};
use imageproc::drawing::{draw_hollow_rect_mut, draw_text_mut, text_size};
use imageproc::rect::Rect;
use log::{info, warn};
use rusttype::{Font, Scale};

use crate::draw::blend_rect_mut;
use crate::{MapVizError, StatusOr};

/// Fonts tried when the config does not name one.
pub const DEFAULT_FONT_PATHS: &[&str] = &[
    "/usr/share/fonts/truetype/dejavu/DejaVuSans-Bold.ttf",
    "/usr/share/fonts/TTF/DejaVuSans-Bold.ttf",
    "/usr/share/fonts/dejavu/DejaVuSans-Bold.ttf",
    "/Library/Fonts/Arial Bold.ttf",
    "C:\\Windows\\Fonts\\tahomabd.ttf",
];

pub fn load_font(path: &Path) -> StatusOr<Font<'static>> {
    let bytes = fs::read(path)?;
    Font::try_from_vec(bytes).ok_or_else(|| MapVizError::FontError(format!("{} is not a usable font", path.display())))
}

/// Load the configured font, or the first default that exists. Labels are
/// skipped when this returns `None`.
pub fn find_font(configured: Option<&Path>) -> Option<Font<'static>> {
    let candidates: Vec<PathBuf> = match configured {
        // A configured font is never swapped for a default one
        Some(path) => vec![path.to_path_buf()],
        None => DEFAULT_FONT_PATHS.iter().map(PathBuf::from).filter(|p| p.exists()).collect(),
    };

    for path in candidates {
        match load_font(&path) {
            Ok(font) => {
                info!("Using font {}", path.display());
                return Some(font);
            }
            Err(e) => warn!("Failed to load font {}: {}", path.display(), e),
        }
    }

    warn!("No font available, location labels will not be drawn");
    None
}

/// Colors and spacing for location labels.
#[derive(Debug, Clone, Copy)]
pub struct LabelStyle {
    pub text: Rgb<u8>,
    pub background: Rgb<u8>,
    pub background_alpha: f32,
    pub border: Rgb<u8>,
    pub font_size: f32,
    /// Gap between marker and box, and between box edge and text.
    pub pad: f32,
}

/// Pixel rectangle the label box for `text` occupies when placed above a
/// marker at `anchor` whose half-height is `marker_half`.
pub fn label_rect(font: &Font<'_>, style: &LabelStyle, anchor: (f32, f32), marker_half: f32, text: &str) -> (Rect, (i32, i32)) {
    let (text_width, text_height) = text_size(Scale::uniform(style.font_size), font, text);
    let pad = style.pad.round() as i32;

    // Centered on the marker, box bottom one pad above its top edge
    let text_x = (anchor.0 - text_width as f32 / 2.0).round() as i32;
    let bottom_edge = anchor.1 - (marker_half + style.pad);
    let text_y = (bottom_edge - text_height as f32).round() as i32;

    let rect = Rect::at(text_x - pad, text_y - pad).of_size(
        (text_width + 2 * pad).max(1) as u32,
        (text_height + 2 * pad).max(1) as u32,
    );
    (rect, (text_x, text_y))
}

/// Draw `text` centered above the marker at `anchor` on a translucent box.
pub fn draw_label_mut(
    image: &mut RgbImage,
    font: &Font<'_>,
    style: &LabelStyle,
    anchor: (f32, f32),
    marker_half: f32,
    text: &str,
) {
    let (rect, (text_x, text_y)) = label_rect(font, style, anchor, marker_half, text);

    // Box, then border, then text on top
    blend_rect_mut(image, rect, style.background, style.background_alpha);
    draw_hollow_rect_mut(image, rect, style.border);
    draw_text_mut(image, style.text, text_x, text_y, Scale::uniform(style.font_size), font, text);
}
