//! Frame rendering for annulus temperature fields.
//!
//! A frame is a fixed-size figure made of:
//! - a heatmap of temperature clipped to the annulus
//! - the domain boundary and a dash-dot centre line
//! - a left-mounted colorbar
//! - a title with the dimensionless time
//!
//! Frames are encoded with the crate's own PNG writer.

pub mod colorbar;
pub mod colormap;
pub mod frame;
pub mod gradient;
pub mod layout;
pub mod png;
pub mod shapes;
pub mod style;
pub mod text;

use thiserror::Error;

pub use colorbar::ColorbarSpec;
pub use colormap::{Color, Colormap, BUILTIN_COLORMAPS};
pub use frame::{render_frame, write_frame, FrameData, FrameSpec};
pub use gradient::ColorScale;
pub use layout::{FrameLayout, PixelRect};
pub use png::encode_png;
pub use style::StyleDefinition;
pub use text::{load_font, Font};

/// Result type for rendering operations.
pub type RenderResult<T> = Result<T, RenderError>;

/// Error types for frame rendering.
#[derive(Debug, Error)]
pub enum RenderError {
    #[error("I/O error")]
    Io(#[from] std::io::Error),

    #[error("Style error: {0}")]
    Style(String),

    #[error("Unknown colormap: {0}")]
    UnknownColormap(String),

    #[error("Font error: {0}")]
    Font(String),

    #[error("PNG encoding failed: {0}")]
    Encode(String),

    #[error("Nothing to render: {0}")]
    EmptyField(String),
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::error::Error as _;

    #[test]
    fn test_io_error_message_not_repeated() {
        let err = RenderError::from(std::io::Error::new(std::io::ErrorKind::Other, "File too large"));
        assert_eq!(err.to_string(), "I/O error");
        assert_eq!(err.source().unwrap().to_string(), "File too large");
    }
}
