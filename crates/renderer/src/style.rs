//! Colormap style files.
//!
//! A style is a JSON document describing a colormap, the value range it
//! spans and how the colorbar is labelled:
//!
//! ```json
//! {
//!   "name": "ember",
//!   "stops": [
//!     { "value": 0.0, "color": "#FFFFFF" },
//!     { "value": 1.0, "color": "#400000" }
//!   ],
//!   "range": [0.0, 1.0],
//!   "legend": { "title": "T", "ticks": 6, "decimals": 1 }
//! }
//! ```

use serde::{Deserialize, Serialize};
use std::path::Path;

use crate::{RenderError, RenderResult};

/// A single style definition
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct StyleDefinition {
    pub name: String,
    pub description: Option<String>,
    pub units: Option<String>,
    pub stops: Vec<ColorStop>,
    /// Value range mapped onto the colormap; defaults to `[0, 1]`
    pub range: Option<[f64; 2]>,
    pub legend: Option<Legend>,
}

/// Color stop for gradient
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct ColorStop {
    pub value: f64,
    pub color: String,
}

/// Colorbar configuration
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct Legend {
    pub title: Option<String>,
    pub ticks: Option<u32>,
    pub decimals: Option<u32>,
}

impl StyleDefinition {
    /// Load a style from a JSON string
    pub fn from_json(json_str: &str) -> RenderResult<Self> {
        let style: Self =
            serde_json::from_str(json_str).map_err(|e| RenderError::Style(e.to_string()))?;
        style.validate()?;
        Ok(style)
    }

    /// Load a style from a JSON file
    pub fn from_file(path: &Path) -> RenderResult<Self> {
        let content = std::fs::read_to_string(path)?;
        Self::from_json(&content)
    }

    fn validate(&self) -> RenderResult<()> {
        if self.stops.len() < 2 {
            return Err(RenderError::Style(format!(
                "style '{}' needs at least two color stops",
                self.name
            )));
        }
        if let Some(bad) = self.stops.iter().find(|s| hex_to_rgb(&s.color).is_none()) {
            return Err(RenderError::Style(format!("invalid color '{}'", bad.color)));
        }
        if let Some([lo, hi]) = self.range {
            if !(lo < hi) {
                return Err(RenderError::Style(format!("invalid range [{lo}, {hi}]")));
            }
        }
        Ok(())
    }
}

/// Parse hex color string to RGB
pub fn hex_to_rgb(hex: &str) -> Option<(u8, u8, u8)> {
    let hex = hex.trim_start_matches('#');
    if hex.len() != 6 || !hex.is_ascii() {
        return None;
    }

    let r = u8::from_str_radix(&hex[0..2], 16).ok()?;
    let g = u8::from_str_radix(&hex[2..4], 16).ok()?;
    let b = u8::from_str_radix(&hex[4..6], 16).ok()?;

    Some((r, g, b))
}
