//! Stroked lines, rectangles and filled disks on an RGBA canvas.

use image::RgbaImage;
use imageproc::drawing::draw_filled_rect_mut;
use imageproc::rect::Rect;

use crate::colormap::Color;
use crate::layout::PixelRect;

/// Dash-dot pattern in pixels: dash, gap, dot, gap.
const DASH_DOT_PATTERN: [f64; 4] = [18.0, 5.0, 3.0, 5.0];

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LineStyle {
    Solid,
    DashDot,
}

/// Fill a rectangle given in fractional pixels.
pub fn fill_rect(img: &mut RgbaImage, rect: PixelRect, color: Color) {
    let (x0, y0, x1, y1) = rect.pixel_bounds(img.width(), img.height());
    if x1 <= x0 || y1 <= y0 {
        return;
    }
    draw_filled_rect_mut(
        img,
        Rect::at(x0 as i32, y0 as i32).of_size(x1 - x0, y1 - y0),
        color.to_rgba(),
    );
}

/// Horizontal line from `x0` to `x1` centred on `y`.
pub fn draw_hline(img: &mut RgbaImage, x0: f64, x1: f64, y: f64, width: f64, color: Color) {
    let (lo, hi) = (x0.min(x1), x0.max(x1));
    fill_rect(
        img,
        PixelRect {
            x: lo - width / 2.0,
            y: y - width / 2.0,
            width: hi - lo + width,
            height: width,
        },
        color,
    );
}

/// Vertical line from `y0` to `y1` centred on `x`.
pub fn draw_vline(
    img: &mut RgbaImage,
    x: f64,
    y0: f64,
    y1: f64,
    width: f64,
    color: Color,
    style: LineStyle,
) {
    let (lo, hi) = (y0.min(y1), y0.max(y1));
    match style {
        LineStyle::Solid => fill_rect(
            img,
            PixelRect {
                x: x - width / 2.0,
                y: lo,
                width,
                height: hi - lo,
            },
            color,
        ),
        LineStyle::DashDot => {
            // Pattern lengths grow with the line width, as for stroked paths
            let scale = (width / 3.0).max(1.0);
            let mut pos = lo;
            let mut step = 0;
            while pos < hi {
                let len = DASH_DOT_PATTERN[step % 4] * scale;
                if step % 2 == 0 {
                    fill_rect(
                        img,
                        PixelRect {
                            x: x - width / 2.0,
                            y: pos,
                            width,
                            height: len.min(hi - pos),
                        },
                        color,
                    );
                }
                pos += len;
                step += 1;
            }
        }
    }
}

/// Outline of a rectangle with strokes centred on its edges.
pub fn stroke_rect(img: &mut RgbaImage, rect: PixelRect, width: f64, color: Color) {
    draw_hline(img, rect.x, rect.right(), rect.y, width, color);
    draw_hline(img, rect.x, rect.right(), rect.bottom(), width, color);
    draw_vline(img, rect.x, rect.y, rect.bottom(), width, color, LineStyle::Solid);
    draw_vline(img, rect.right(), rect.y, rect.bottom(), width, color, LineStyle::Solid);
}

/// Fill every pixel whose centre lies within `radius` of `(cx, cy)`.
pub fn fill_disk(img: &mut RgbaImage, cx: f64, cy: f64, radius: f64, color: Color) {
    if radius <= 0.0 {
        return;
    }
    let bounds = PixelRect {
        x: cx - radius - 1.0,
        y: cy - radius - 1.0,
        width: 2.0 * radius + 2.0,
        height: 2.0 * radius + 2.0,
    };
    let (x0, y0, x1, y1) = bounds.pixel_bounds(img.width(), img.height());
    let r2 = radius * radius;
    let rgba = color.to_rgba();

    for py in y0..y1 {
        let dy = py as f64 + 0.5 - cy;
        for px in x0..x1 {
            let dx = px as f64 + 0.5 - cx;
            if dx * dx + dy * dy <= r2 {
                img.put_pixel(px, py, rgba);
            }
        }
    }
}
