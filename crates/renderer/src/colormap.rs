//! Colormaps: normalized value (0-1) to color.

use image::Rgba;

use crate::style::{hex_to_rgb, StyleDefinition};
use crate::{RenderError, RenderResult};

/// Color value in RGBA format
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Color {
    pub r: u8,
    pub g: u8,
    pub b: u8,
    pub a: u8,
}

impl Color {
    pub const WHITE: Color = Color::rgb(255, 255, 255);
    pub const BLACK: Color = Color::rgb(0, 0, 0);
    pub const GREY: Color = Color::rgb(128, 128, 128);

    pub const fn new(r: u8, g: u8, b: u8, a: u8) -> Self {
        Self { r, g, b, a }
    }

    pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b, a: 255 }
    }

    pub fn from_hex(hex: &str) -> Option<Self> {
        hex_to_rgb(hex).map(|(r, g, b)| Self::rgb(r, g, b))
    }

    pub fn to_rgba(self) -> Rgba<u8> {
        Rgba([self.r, self.g, self.b, self.a])
    }
}

/// Linear color interpolation
pub fn interpolate_color(color1: Color, color2: Color, t: f64) -> Color {
    let t = t.clamp(0.0, 1.0);
    let t_inv = 1.0 - t;
    let mix = |a: u8, b: u8| (a as f64 * t_inv + b as f64 * t).round() as u8;

    Color::new(
        mix(color1.r, color2.r),
        mix(color1.g, color2.g),
        mix(color1.b, color2.b),
        mix(color1.a, color2.a),
    )
}

/// Piecewise-linear colormap over `[0, 1]`.
#[derive(Debug, Clone)]
pub struct Colormap {
    name: String,
    /// Sorted by position, first at 0.0 and last at 1.0
    stops: Vec<(f64, Color)>,
}

/// Names accepted by [`Colormap::by_name`].
pub const BUILTIN_COLORMAPS: &[&str] = &["coolwarm", "custom_hot"];

impl Colormap {
    /// Build from `(value, color)` pairs. Values are rescaled so the first
    /// stop sits at 0 and the last at 1.
    pub fn from_stops(name: &str, stops: &[(f64, Color)]) -> RenderResult<Self> {
        if stops.len() < 2 {
            return Err(RenderError::Style(format!(
                "colormap '{name}' needs at least two stops"
            )));
        }

        let mut sorted = stops.to_vec();
        sorted.sort_by(|a, b| a.0.total_cmp(&b.0));

        let lo = sorted[0].0;
        let hi = sorted[sorted.len() - 1].0;
        let span = hi - lo;
        if !(span > 0.0) {
            return Err(RenderError::Style(format!(
                "colormap '{name}' stops must span a non-empty range"
            )));
        }

        let stops = sorted
            .into_iter()
            .map(|(v, c)| ((v - lo) / span, c))
            .collect();

        Ok(Self {
            name: name.to_string(),
            stops,
        })
    }

    /// Build from a style file definition.
    pub fn from_style(style: &StyleDefinition) -> RenderResult<Self> {
        let stops = style
            .stops
            .iter()
            .map(|s| {
                Color::from_hex(&s.color)
                    .map(|c| (s.value, c))
                    .ok_or_else(|| RenderError::Style(format!("invalid color '{}'", s.color)))
            })
            .collect::<RenderResult<Vec<_>>>()?;
        Self::from_stops(&style.name, &stops)
    }

    /// Look up a built-in colormap.
    pub fn by_name(name: &str) -> RenderResult<Self> {
        match name {
            "coolwarm" => Ok(Self::coolwarm()),
            "custom_hot" => Ok(Self::custom_hot()),
            other => Err(RenderError::UnknownColormap(other.to_string())),
        }
    }

    /// Diverging blue-grey-red map.
    pub fn coolwarm() -> Self {
        Self::fixed(
            "coolwarm",
            &[
                (0.0, Color::rgb(59, 76, 192)),
                (0.125, Color::rgb(88, 118, 226)),
                (0.25, Color::rgb(123, 159, 249)),
                (0.375, Color::rgb(158, 190, 255)),
                (0.5, Color::rgb(221, 221, 221)),
                (0.625, Color::rgb(242, 192, 167)),
                (0.75, Color::rgb(244, 154, 123)),
                (0.875, Color::rgb(222, 96, 77)),
                (1.0, Color::rgb(180, 4, 38)),
            ],
        )
    }

    /// White through sienna to dark brown.
    pub fn custom_hot() -> Self {
        Self::fixed(
            "custom_hot",
            &[
                (0.0, Color::WHITE),
                (1.0 / 3.0, Color::rgb(0xDA, 0x8A, 0x67)),
                (2.0 / 3.0, Color::rgb(0xA0, 0x52, 0x2D)),
                (1.0, Color::rgb(0x40, 0x00, 0x00)),
            ],
        )
    }

    fn fixed(name: &str, stops: &[(f64, Color)]) -> Self {
        Self {
            name: name.to_string(),
            stops: stops.to_vec(),
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// Color at normalized position `t`, clamped to `[0, 1]`.
    pub fn sample(&self, t: f64) -> Color {
        let t = if t.is_nan() { 0.0 } else { t.clamp(0.0, 1.0) };

        let upper = self
            .stops
            .iter()
            .position(|(pos, _)| *pos >= t)
            .unwrap_or(self.stops.len() - 1);
        if upper == 0 {
            return self.stops[0].1;
        }

        let (p0, c0) = self.stops[upper - 1];
        let (p1, c1) = self.stops[upper];
        let span = p1 - p0;
        if span <= 0.0 {
            return c1;
        }
        interpolate_color(c0, c1, (t - p0) / span)
    }

    /// Color for `value` normalized against `[vmin, vmax]`.
    pub fn map(&self, value: f64, vmin: f64, vmax: f64) -> Color {
        let range = vmax - vmin;
        let t = if range.abs() < f64::EPSILON {
            0.5
        } else {
            (value - vmin) / range
        };
        self.sample(t)
    }
}

impl Default for Colormap {
    fn default() -> Self {
        Self::coolwarm()
    }
}
