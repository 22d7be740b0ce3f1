//! Figure geometry: where the plot, colorbar and title sit on the canvas,
//! and how data coordinates map onto pixels.

use annulus_common::DomainBounds;

/// Figure width in pixels (19.2 in at 100 dpi).
pub const FIGURE_WIDTH: u32 = 1920;
/// Figure height in pixels (10.8 in at 100 dpi).
pub const FIGURE_HEIGHT: u32 = 1080;

/// Axes box as fractions of the figure: left, bottom, width, height.
const AXES_BOX: [f64; 4] = [0.125, 0.11, 0.775, 0.77];
/// Colorbar offset to the left of the plot and its width, as figure fractions.
const COLORBAR_GAP: f64 = 0.04;
const COLORBAR_WIDTH: f64 = 0.03;

/// Axis-aligned pixel rectangle; `x`, `y` is the top-left corner.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PixelRect {
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
}

impl PixelRect {
    pub fn right(&self) -> f64 {
        self.x + self.width
    }

    pub fn bottom(&self) -> f64 {
        self.y + self.height
    }

    /// Integer pixel span `[x0, x1) x [y0, y1)` clipped to the canvas.
    pub fn pixel_bounds(&self, canvas_w: u32, canvas_h: u32) -> (u32, u32, u32, u32) {
        let clip = |v: f64, max: u32| v.round().clamp(0.0, max as f64) as u32;
        (
            clip(self.x, canvas_w),
            clip(self.y, canvas_h),
            clip(self.right(), canvas_w),
            clip(self.bottom(), canvas_h),
        )
    }
}

/// Placement of every figure element for one domain.
#[derive(Debug, Clone, Copy)]
pub struct FrameLayout {
    pub width: u32,
    pub height: u32,
    /// Plot area; the domain fills it with equal aspect
    pub plot: PixelRect,
    pub colorbar: PixelRect,
    pub domain: DomainBounds,
    /// Pixels per figure point, for line widths and font sizes
    pub scale: f64,
}

impl FrameLayout {
    /// Standard 1920x1080 figure.
    pub fn new(domain: DomainBounds) -> Self {
        Self::with_size(domain, FIGURE_WIDTH, FIGURE_HEIGHT)
    }

    pub fn with_size(domain: DomainBounds, width: u32, height: u32) -> Self {
        let (w, h) = (width as f64, height as f64);
        let [left, bottom, box_w, box_h] = AXES_BOX;

        let box_px = PixelRect {
            x: left * w,
            y: (1.0 - bottom - box_h) * h,
            width: box_w * w,
            height: box_h * h,
        };

        // Equal aspect: shrink one side of the axes box and centre it
        let data_aspect = domain.height() / domain.width();
        let plot = if box_px.height / box_px.width > data_aspect {
            let plot_h = box_px.width * data_aspect;
            PixelRect {
                x: box_px.x,
                y: box_px.y + (box_px.height - plot_h) / 2.0,
                width: box_px.width,
                height: plot_h,
            }
        } else {
            let plot_w = box_px.height / data_aspect;
            PixelRect {
                x: box_px.x + (box_px.width - plot_w) / 2.0,
                y: box_px.y,
                width: plot_w,
                height: box_px.height,
            }
        };

        let colorbar = PixelRect {
            x: plot.x - COLORBAR_GAP * w,
            y: plot.y,
            width: COLORBAR_WIDTH * w,
            height: plot.height,
        };

        Self {
            width,
            height,
            plot,
            colorbar,
            domain,
            scale: w / (19.2 * 72.0),
        }
    }

    /// Points to pixels, never less than one pixel.
    pub fn points(&self, pt: f64) -> f64 {
        (pt * self.scale).max(1.0)
    }

    /// Data coordinates `(r, z)` to canvas pixel coordinates.
    pub fn to_pixel(&self, r: f64, z: f64) -> (f64, f64) {
        let d = &self.domain;
        let px = self.plot.x + (r - d.r_min) / d.width() * self.plot.width;
        let py = self.plot.y + (d.z_max - z) / d.height() * self.plot.height;
        (px, py)
    }

    /// Data coordinates at the centre of canvas pixel `(px, py)`.
    pub fn to_data(&self, px: u32, py: u32) -> (f64, f64) {
        let d = &self.domain;
        let r = d.r_min + ((px as f64 + 0.5) - self.plot.x) / self.plot.width * d.width();
        let z = d.z_max - ((py as f64 + 0.5) - self.plot.y) / self.plot.height * d.height();
        (r, z)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_square_domain_gives_square_plot() {
        let layout = FrameLayout::new(DomainBounds::default());
        assert!((layout.plot.width - layout.plot.height).abs() < 1e-9);
        // Height-limited on a 16:9 canvas
        assert!((layout.plot.height - 0.77 * 1080.0).abs() < 1e-9);
        // Centred horizontally in the axes box
        let centre = layout.plot.x + layout.plot.width / 2.0;
        assert!((centre - (0.125 + 0.775 / 2.0) * 1920.0).abs() < 1e-9);
    }

    #[test]
    fn test_wide_domain_is_width_limited() {
        let layout = FrameLayout::new(DomainBounds::new(-10.0, 10.0, -1.0, 1.0));
        assert!((layout.plot.width - 0.775 * 1920.0).abs() < 1e-9);
        assert!((layout.plot.width / layout.plot.height - 10.0).abs() < 1e-9);
    }

    #[test]
    fn test_colorbar_left_of_plot() {
        let layout = FrameLayout::new(DomainBounds::default());
        assert!(layout.colorbar.right() < layout.plot.x);
        assert_eq!(layout.colorbar.height, layout.plot.height);
    }

    #[test]
    fn test_pixel_round_trip_corners() {
        let layout = FrameLayout::new(DomainBounds::default());
        let (x0, y0) = layout.to_pixel(-4.0, 4.0);
        assert!((x0 - layout.plot.x).abs() < 1e-9);
        assert!((y0 - layout.plot.y).abs() < 1e-9);
        let (x1, y1) = layout.to_pixel(4.0, -4.0);
        assert!((x1 - layout.plot.right()).abs() < 1e-9);
        assert!((y1 - layout.plot.bottom()).abs() < 1e-9);
    }

    #[test]
    fn test_points_scale() {
        let layout = FrameLayout::new(DomainBounds::default());
        // 100 dpi figure: 72 points per 100 pixels
        assert!((layout.points(72.0) - 100.0).abs() < 1e-9);
        assert_eq!(layout.points(0.1), 1.0);
    }
}
