//! Heatmap rendering of a scalar field onto the plot area.

use annulus_common::{AnnulusGeometry, DomainBounds, Field2D};
use image::RgbaImage;
use rayon::prelude::*;

use crate::colormap::Colormap;
use crate::layout::FrameLayout;

/// How field values become colors.
#[derive(Debug, Clone)]
pub struct ColorScale {
    pub colormap: Colormap,
    pub vmin: f64,
    pub vmax: f64,
}

impl Default for ColorScale {
    fn default() -> Self {
        Self {
            colormap: Colormap::default(),
            vmin: 0.0,
            vmax: 1.0,
        }
    }
}

/// Fractional `(row, col)` of data point `(x, y)` in a field spanning
/// `extent`, with row 0 at the bottom (`y = extent.z_min`).
///
/// Cell `k` of `n` covers `[k, k + 1] / n` of the extent, so its centre
/// sits at fraction `(k + 0.5) / n`.
pub fn field_position(field: &Field2D, extent: &DomainBounds, x: f64, y: f64) -> (f64, f64) {
    let frac = |v: f64, lo: f64, span: f64, n: usize| {
        if span > 0.0 {
            (v - lo) / span * n as f64 - 0.5
        } else {
            0.0
        }
    };
    (
        frac(y, extent.z_min, extent.height(), field.rows()),
        frac(x, extent.r_min, extent.width(), field.cols()),
    )
}

/// Paint `values` over the plot area.
///
/// Columns run along the horizontal axis across `extent.r_min..r_max`,
/// rows along the vertical axis across `extent.z_min..z_max`, bottom-up.
/// Values are sampled bilinearly. Pixels outside the extent, outside the
/// annulus' outer circle, or with NaN values are left untouched.
pub fn paint_heatmap(
    img: &mut RgbaImage,
    layout: &FrameLayout,
    values: &Field2D,
    extent: &DomainBounds,
    scale: &ColorScale,
    clip: &AnnulusGeometry,
) {
    if values.is_empty() {
        return;
    }

    let width = img.width();
    let (x0, y0, x1, y1) = layout.plot.pixel_bounds(width, img.height());
    let row_bytes = width as usize * 4;
    let buf: &mut [u8] = img;

    buf.par_chunks_mut(row_bytes)
        .enumerate()
        .skip(y0 as usize)
        .take(y1.saturating_sub(y0) as usize)
        .for_each(|(py, row)| {
            for px in x0..x1 {
                let (x, y) = layout.to_data(px, py as u32);
                if !extent.contains_point(x, y) || !clip.within_outer(x, y) {
                    continue;
                }

                let (fr, fc) = field_position(values, extent, x, y);
                let value = values.sample_bilinear(fr, fc);
                if value.is_nan() {
                    continue;
                }

                let color = scale.colormap.map(value, scale.vmin, scale.vmax);
                let offset = px as usize * 4;
                row[offset..offset + 4].copy_from_slice(&[color.r, color.g, color.b, color.a]);
            }
        });
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::colormap::Color;
    use image::Rgba;

    fn white_canvas(layout: &FrameLayout) -> RgbaImage {
        RgbaImage::from_pixel(layout.width, layout.height, Rgba([255, 255, 255, 255]))
    }

    #[test]
    fn test_field_position_centres() {
        let field = Field2D::filled(4, 2, 0.0);
        let extent = DomainBounds::new(0.0, 2.0, 0.0, 4.0);
        // Centre of the bottom-left cell
        assert_eq!(field_position(&field, &extent, 0.5, 0.5), (0.0, 0.0));
        // Centre of the top-right cell
        assert_eq!(field_position(&field, &extent, 1.5, 3.5), (3.0, 1.0));
    }

    #[test]
    fn test_heatmap_respects_outer_clip() {
        let domain = DomainBounds::default();
        let layout = FrameLayout::with_size(domain, 400, 300);
        let mut img = white_canvas(&layout);
        let field = Field2D::filled(8, 8, 1.0);
        let scale = ColorScale::default();

        paint_heatmap(&mut img, &layout, &field, &domain, &scale, &AnnulusGeometry::new(1.0, 2.0));

        let hot = Colormap::coolwarm().sample(1.0).to_rgba();
        let (cx, cy) = layout.to_pixel(0.0, 0.0);
        assert_eq!(img.get_pixel(cx as u32, cy as u32), &hot);

        // Corner of the domain lies outside the outer circle
        let (px, py) = layout.to_pixel(-3.9, 3.9);
        assert_eq!(img.get_pixel(px as u32, py as u32), &Rgba([255, 255, 255, 255]));
    }

    #[test]
    fn test_heatmap_orientation() {
        // Two rows: bottom row cold, top row hot
        let field = Field2D::from_row_major(2, 1, vec![0.0, 1.0]).unwrap();
        let domain = DomainBounds::default();
        let layout = FrameLayout::with_size(domain, 400, 300);
        let mut img = white_canvas(&layout);
        let scale = ColorScale {
            colormap: Colormap::from_stops("bw", &[(0.0, Color::BLACK), (1.0, Color::WHITE)]).unwrap(),
            vmin: 0.0,
            vmax: 1.0,
        };

        paint_heatmap(&mut img, &layout, &field, &domain, &scale, &AnnulusGeometry::new(0.0, 100.0));

        let (bx, by) = layout.to_pixel(0.0, -3.9);
        let (tx, ty) = layout.to_pixel(0.0, 3.9);
        assert_eq!(img.get_pixel(bx as u32, by as u32), &Rgba([0, 0, 0, 255]));
        assert_eq!(img.get_pixel(tx as u32, ty as u32), &Rgba([255, 255, 255, 255]));
    }

    #[test]
    fn test_nan_values_left_unpainted() {
        let field = Field2D::filled(3, 3, f64::NAN);
        let domain = DomainBounds::default();
        let layout = FrameLayout::with_size(domain, 200, 200);
        let mut img = white_canvas(&layout);
        paint_heatmap(&mut img, &layout, &field, &domain, &ColorScale::default(), &AnnulusGeometry::default());
        assert!(img.pixels().all(|p| *p == Rgba([255, 255, 255, 255])));
    }
}
