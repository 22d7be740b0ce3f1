//! Text drawing for titles and colorbar labels.

use std::path::{Path, PathBuf};

use image::RgbaImage;
use imageproc::drawing::{draw_text_mut, text_size};
use rusttype::Scale;

pub use rusttype::Font;

use crate::colormap::Color;
use crate::{RenderError, RenderResult};

/// Serif fonts tried, in order, when no font is configured.
const FONT_CANDIDATES: &[&str] = &[
    "/usr/share/fonts/truetype/dejavu/DejaVuSerif.ttf",
    "/usr/share/fonts/dejavu/DejaVuSerif.ttf",
    "/usr/share/fonts/TTF/DejaVuSerif.ttf",
    "/usr/share/fonts/dejavu-serif-fonts/DejaVuSerif.ttf",
    "/usr/share/fonts/truetype/liberation/LiberationSerif-Regular.ttf",
    "/usr/share/fonts/liberation-serif/LiberationSerif-Regular.ttf",
    "/Library/Fonts/Times New Roman.ttf",
    "/System/Library/Fonts/Supplemental/Times New Roman.ttf",
    "C:\\Windows\\Fonts\\times.ttf",
];

/// Load a font from `path`, or from the first system serif font found.
///
/// An explicit path that cannot be loaded is an error. With no path,
/// `Ok(None)` means no candidate font exists and frames are drawn without
/// text.
pub fn load_font(path: Option<&Path>) -> RenderResult<Option<Font<'static>>> {
    if let Some(path) = path {
        let font = read_font(path)?;
        tracing::debug!(path = %path.display(), "Loaded font");
        return Ok(Some(font));
    }

    for candidate in FONT_CANDIDATES.iter().map(PathBuf::from) {
        if !candidate.is_file() {
            continue;
        }
        match read_font(&candidate) {
            Ok(font) => {
                tracing::debug!(path = %candidate.display(), "Loaded system font");
                return Ok(Some(font));
            }
            Err(e) => tracing::debug!(path = %candidate.display(), error = %e, "Skipping font"),
        }
    }

    tracing::warn!("No usable font found; frames will be rendered without text");
    Ok(None)
}

fn read_font(path: &Path) -> RenderResult<Font<'static>> {
    let bytes = std::fs::read(path)
        .map_err(|e| RenderError::Font(format!("{}: {}", path.display(), e)))?;
    Font::try_from_vec(bytes)
        .ok_or_else(|| RenderError::Font(format!("{}: not a TrueType font", path.display())))
}

/// Horizontal anchor of a text box.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HAlign {
    Left,
    Center,
    Right,
}

/// Vertical anchor of a text box.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum VAlign {
    Top,
    Middle,
    Bottom,
}

/// Text styling for a single label.
#[derive(Debug, Clone, Copy)]
pub struct TextStyle {
    pub size_px: f32,
    pub color: Color,
    pub h_align: HAlign,
    pub v_align: VAlign,
}

/// Width and height in pixels of `text` at `size_px`.
pub fn measure(font: &Font<'_>, text: &str, size_px: f32) -> (f64, f64) {
    let (w, h) = text_size(Scale::uniform(size_px), font, text);
    (w as f64, h as f64)
}

/// Draw `text` anchored at `(x, y)`.
pub fn draw_label(img: &mut RgbaImage, font: &Font<'_>, text: &str, x: f64, y: f64, style: TextStyle) {
    let scale = Scale::uniform(style.size_px);
    let (w, h) = measure(font, text, style.size_px);

    let left = match style.h_align {
        HAlign::Left => x,
        HAlign::Center => x - w / 2.0,
        HAlign::Right => x - w,
    };
    let top = match style.v_align {
        VAlign::Top => y,
        VAlign::Middle => y - h / 2.0,
        VAlign::Bottom => y - h,
    };

    draw_text_mut(
        img,
        style.color.to_rgba(),
        left.round() as i32,
        top.round() as i32,
        scale,
        font,
        text,
    );
}

/// Format a value with a fixed number of decimals, without a negative zero.
pub fn format_tick(value: f64, decimals: usize) -> String {
    let text = format!("{:.*}", decimals, value);
    let is_zero = text
        .trim_start_matches('-')
        .chars()
        .all(|c| c == '0' || c == '.');
    if is_zero {
        text.trim_start_matches('-').to_string()
    } else {
        text
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_tick() {
        assert_eq!(format_tick(0.0, 1), "0.0");
        assert_eq!(format_tick(0.2, 1), "0.2");
        assert_eq!(format_tick(1.0, 1), "1.0");
        assert_eq!(format_tick(-0.0001, 1), "0.0");
        assert_eq!(format_tick(-0.5, 1), "-0.5");
        assert_eq!(format_tick(273.15, 0), "273");
    }

    #[test]
    fn test_missing_explicit_font_is_error() {
        let err = load_font(Some(Path::new("/nonexistent/font.ttf"))).unwrap_err();
        assert!(matches!(err, RenderError::Font(_)));
    }

    #[test]
    fn test_non_font_file_is_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("fake.ttf");
        std::fs::write(&path, b"not a font").unwrap();
        assert!(load_font(Some(&path)).is_err());
    }
}
