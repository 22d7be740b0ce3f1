//! Vertical colorbar with ticks and labels on its left side.

use image::RgbaImage;

use crate::colormap::Color;
use crate::gradient::ColorScale;
use crate::layout::{FrameLayout, PixelRect};
use crate::shapes::{draw_hline, fill_rect, stroke_rect};
use crate::text::{draw_label, format_tick, measure, Font, HAlign, TextStyle, VAlign};

/// Colorbar labelling.
#[derive(Debug, Clone)]
pub struct ColorbarSpec {
    pub label: String,
    /// Number of evenly spaced ticks from vmin to vmax, inclusive
    pub ticks: u32,
    pub decimals: usize,
    /// Font size in points
    pub font_size: f64,
}

impl Default for ColorbarSpec {
    fn default() -> Self {
        Self {
            label: "T".to_string(),
            ticks: 6,
            decimals: 1,
            font_size: 20.0,
        }
    }
}

/// Tick values from `vmin` to `vmax`.
pub fn tick_values(vmin: f64, vmax: f64, ticks: u32) -> Vec<f64> {
    match ticks {
        0 => Vec::new(),
        1 => vec![vmin],
        n => (0..n)
            .map(|i| vmin + (vmax - vmin) * i as f64 / (n - 1) as f64)
            .collect(),
    }
}

/// Draw the colorbar into `layout.colorbar`.
pub fn draw_colorbar(
    img: &mut RgbaImage,
    layout: &FrameLayout,
    scale: &ColorScale,
    spec: &ColorbarSpec,
    font: Option<&Font<'_>>,
) {
    let bar = layout.colorbar;
    let (x0, y0, x1, y1) = bar.pixel_bounds(img.width(), img.height());
    let span = (y1 - y0).max(1) as f64;

    // Ramp, vmax at the top
    for py in y0..y1 {
        let t = 1.0 - ((py - y0) as f64 + 0.5) / span;
        let color = scale.colormap.sample(t);
        fill_rect(
            img,
            PixelRect {
                x: x0 as f64,
                y: py as f64,
                width: (x1 - x0) as f64,
                height: 1.0,
            },
            color,
        );
    }

    let edge = layout.points(0.8);
    stroke_rect(img, bar, edge, Color::BLACK);

    let tick_len = layout.points(3.5);
    let pad = layout.points(3.5);
    let text_px = layout.points(spec.font_size) as f32;
    let range = scale.vmax - scale.vmin;
    let mut widest_label = 0.0f64;

    for value in tick_values(scale.vmin, scale.vmax, spec.ticks) {
        let t = if range.abs() > 0.0 {
            (value - scale.vmin) / range
        } else {
            0.5
        };
        let y = bar.bottom() - t * bar.height;
        draw_hline(img, bar.x - tick_len, bar.x, y, edge, Color::BLACK);

        if let Some(font) = font {
            let text = format_tick(value, spec.decimals);
            widest_label = widest_label.max(measure(font, &text, text_px).0);
            draw_label(
                img,
                font,
                &text,
                bar.x - tick_len - pad,
                y,
                TextStyle {
                    size_px: text_px,
                    color: Color::BLACK,
                    h_align: HAlign::Right,
                    v_align: VAlign::Middle,
                },
            );
        }
    }

    if let Some(font) = font {
        if !spec.label.is_empty() {
            let label_pad = layout.points(5.0);
            draw_label(
                img,
                font,
                &spec.label,
                bar.x - tick_len - pad - widest_label - label_pad,
                bar.y + bar.height / 2.0,
                TextStyle {
                    size_px: text_px,
                    color: Color::BLACK,
                    h_align: HAlign::Right,
                    v_align: VAlign::Middle,
                },
            );
        }
    }
}
