//! Composition of a complete frame and writing it to disk.

use std::fs::File;
use std::io::{self, Write};
use std::path::Path;

use annulus_common::{AnnulusGeometry, DomainBounds, Field2D};
use image::{Rgba, RgbaImage};
use tracing::debug;

use crate::colorbar::{draw_colorbar, ColorbarSpec};
use crate::colormap::{Color, Colormap};
use crate::gradient::{paint_heatmap, ColorScale};
use crate::layout::FrameLayout;
use crate::png::encode_png;
use crate::shapes::{draw_hline, draw_vline, fill_disk, LineStyle};
use crate::style::StyleDefinition;
use crate::text::{draw_label, Font, HAlign, TextStyle, VAlign};
use crate::{RenderError, RenderResult};

/// Gap between the plot top and the title baseline, in points.
const TITLE_PAD_PT: f64 = 6.0;

/// Everything about a frame that stays fixed across timesteps.
#[derive(Debug, Clone)]
pub struct FrameSpec {
    /// Plot limits; also the boundary rectangle
    pub domain: DomainBounds,
    pub annulus: AnnulusGeometry,
    pub color_scale: ColorScale,
    pub colorbar: ColorbarSpec,
    /// Boundary and centre line width in points
    pub line_width_pt: f64,
    /// Title font size in points
    pub title_size_pt: f64,
}

impl FrameSpec {
    pub fn new(domain: DomainBounds, annulus: AnnulusGeometry, colormap: Colormap) -> Self {
        Self {
            domain,
            annulus,
            color_scale: ColorScale {
                colormap,
                ..ColorScale::default()
            },
            colorbar: ColorbarSpec::default(),
            line_width_pt: 2.0,
            title_size_pt: 20.0,
        }
    }

    /// Take the colormap, value range and colorbar labelling from a style.
    pub fn with_style(mut self, style: &StyleDefinition) -> RenderResult<Self> {
        self.color_scale.colormap = Colormap::from_style(style)?;
        if let Some([lo, hi]) = style.range {
            self.color_scale.vmin = lo;
            self.color_scale.vmax = hi;
        }
        if let Some(legend) = &style.legend {
            if let Some(title) = &legend.title {
                self.colorbar.label = title.clone();
            }
            if let Some(ticks) = legend.ticks {
                self.colorbar.ticks = ticks;
            }
            if let Some(decimals) = legend.decimals {
                self.colorbar.decimals = decimals as usize;
            }
        }
        Ok(self)
    }
}

/// Per-timestep input to a frame.
#[derive(Debug, Clone, Copy)]
pub struct FrameData<'a> {
    pub temperature: &'a Field2D,
    /// Data extent covered by `temperature`
    pub extent: DomainBounds,
    pub title: &'a str,
}

/// Render one frame onto a fresh white canvas.
pub fn render_frame(data: &FrameData<'_>, spec: &FrameSpec, font: Option<&Font<'_>>) -> RenderResult<RgbaImage> {
    if data.temperature.is_empty() {
        return Err(RenderError::EmptyField(data.title.to_string()));
    }

    let layout = FrameLayout::new(spec.domain);
    let mut img = RgbaImage::from_pixel(layout.width, layout.height, Rgba([255, 255, 255, 255]));

    paint_heatmap(
        &mut img,
        &layout,
        data.temperature,
        &data.extent,
        &spec.color_scale,
        &spec.annulus,
    );

    let (cx, cy) = layout.to_pixel(0.0, 0.0);
    let px_per_unit = layout.plot.width / spec.domain.width();
    fill_disk(&mut img, cx, cy, spec.annulus.inner_radius * px_per_unit, Color::WHITE);

    draw_boundary(&mut img, &layout, spec);
    draw_colorbar(&mut img, &layout, &spec.color_scale, &spec.colorbar, font);

    if let Some(font) = font {
        draw_label(
            &mut img,
            font,
            data.title,
            layout.plot.x + layout.plot.width / 2.0,
            layout.plot.y - layout.points(TITLE_PAD_PT),
            TextStyle {
                size_px: layout.points(spec.title_size_pt) as f32,
                color: Color::BLACK,
                h_align: HAlign::Center,
                v_align: VAlign::Bottom,
            },
        );
    }

    Ok(img)
}

/// Dash-dot centre line at `r = 0` and the box `[-r_max, r_max] x [z_min, z_max]`.
fn draw_boundary(img: &mut RgbaImage, layout: &FrameLayout, spec: &FrameSpec) {
    let d = &spec.domain;
    let lw = layout.points(spec.line_width_pt);

    let (x_mid, y_top) = layout.to_pixel(0.0, d.z_max);
    let (_, y_bottom) = layout.to_pixel(0.0, d.z_min);
    draw_vline(img, x_mid, y_top, y_bottom, lw, Color::GREY, LineStyle::DashDot);

    let (x_left, _) = layout.to_pixel(-d.r_max, d.z_min);
    let (x_right, _) = layout.to_pixel(d.r_max, d.z_min);
    draw_vline(img, x_left, y_top, y_bottom, lw, Color::BLACK, LineStyle::Solid);
    draw_vline(img, x_right, y_top, y_bottom, lw, Color::BLACK, LineStyle::Solid);
    draw_hline(img, x_left, x_right, y_bottom, lw, Color::BLACK);
    draw_hline(img, x_left, x_right, y_top, lw, Color::BLACK);
}

/// Render, encode and write a frame to `path`.
pub fn write_frame(
    path: &Path,
    data: &FrameData<'_>,
    spec: &FrameSpec,
    font: Option<&Font<'_>>,
) -> RenderResult<()> {
    let img = render_frame(data, spec, font)?;
    let png = encode_png(&img)?;
    write_atomically(path, |file| file.write_all(&png))?;
    debug!(path = %path.display(), bytes = png.len(), "Wrote frame");
    Ok(())
}

/// Write through a temporary file next to `path` and rename it into place.
///
/// `path` only ever names a complete file; a failed write leaves nothing
/// behind under that name.
fn write_atomically<F>(path: &Path, write: F) -> RenderResult<()>
where
    F: FnOnce(&mut File) -> io::Result<()>,
{
    let dir = match path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent,
        _ => Path::new("."),
    };
    let mut tmp = tempfile::Builder::new()
        .prefix(".frame-")
        .suffix(".tmp")
        .tempfile_in(dir)?;
    write(tmp.as_file_mut())?;
    tmp.as_file().sync_all()?;
    tmp.persist(path).map_err(|e| RenderError::Io(e.error))?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn spec() -> FrameSpec {
        FrameSpec::new(DomainBounds::default(), AnnulusGeometry::default(), Colormap::coolwarm())
    }

    #[test]
    fn test_empty_field_is_error() {
        let empty = Field2D::filled(0, 0, 0.0);
        let data = FrameData {
            temperature: &empty,
            extent: DomainBounds::default(),
            title: "t/\u{3c4} = 0.000",
        };
        assert!(matches!(render_frame(&data, &spec(), None), Err(RenderError::EmptyField(_))));
    }

    #[test]
    fn test_with_style_overrides_legend() {
        let style = StyleDefinition::from_json(
            r##"{
                "name": "ember",
                "stops": [
                    { "value": 0.0, "color": "#FFFFFF" },
                    { "value": 1.0, "color": "#400000" }
                ],
                "range": [0.0, 2.0],
                "legend": { "title": "Θ", "ticks": 5 }
            }"##,
        )
        .unwrap();

        let spec = spec().with_style(&style).unwrap();
        assert_eq!(spec.color_scale.colormap.name(), "ember");
        assert_eq!(spec.color_scale.vmax, 2.0);
        assert_eq!(spec.colorbar.label, "Θ");
        assert_eq!(spec.colorbar.ticks, 5);
        assert_eq!(spec.colorbar.decimals, 1);
    }

    fn dir_entries(dir: &Path) -> Vec<String> {
        let mut names: Vec<String> = std::fs::read_dir(dir)
            .unwrap()
            .map(|e| e.unwrap().file_name().to_string_lossy().into_owned())
            .collect();
        names.sort();
        names
    }

    #[test]
    fn test_interrupted_write_leaves_no_frame() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("00000100.png");

        let result = write_atomically(&path, |file| {
            file.write_all(&[0u8; 20480])?;
            Err(io::Error::new(io::ErrorKind::Other, "File too large"))
        });

        assert!(matches!(result, Err(RenderError::Io(_))));
        assert!(!path.exists());
        assert!(dir_entries(dir.path()).is_empty());
    }

    #[test]
    fn test_write_replaces_stale_target() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("00000100.png");
        std::fs::write(&path, b"stale").unwrap();

        write_atomically(&path, |file| file.write_all(b"complete")).unwrap();

        assert_eq!(std::fs::read(&path).unwrap(), b"complete");
        assert_eq!(dir_entries(dir.path()), vec!["00000100.png"]);
    }

    #[test]
    fn test_write_into_missing_directory_fails() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("missing").join("00000100.png");

        let result = write_atomically(&path, |file| file.write_all(b"complete"));
        assert!(matches!(result, Err(RenderError::Io(_))));
        assert!(!path.exists());
    }

    #[test]
    fn test_boundary_drawn_black() {
        let field = Field2D::filled(8, 8, 0.5);
        let data = FrameData {
            temperature: &field,
            extent: DomainBounds::default(),
            title: "",
        };
        let img = render_frame(&data, &spec(), None).unwrap();
        let layout = FrameLayout::new(DomainBounds::default());

        let (x, y) = layout.to_pixel(4.0, 0.0);
        assert_eq!(img.get_pixel(x as u32, y as u32), &Rgba([0, 0, 0, 255]));
        let (x, y) = layout.to_pixel(0.0, -4.0);
        assert_eq!(img.get_pixel(x as u32, y as u32), &Rgba([0, 0, 0, 255]));
    }
}
