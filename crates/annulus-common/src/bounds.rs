//! Domain bounds and annulus geometry.

use serde::{Deserialize, Serialize};

use crate::{FramesError, FramesResult};

/// Rectangular (r, z) domain that the extraction tool samples.
///
/// `r` is drawn along the horizontal image axis and `z` along the vertical.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct DomainBounds {
    pub r_min: f64,
    pub r_max: f64,
    pub z_min: f64,
    pub z_max: f64,
}

impl DomainBounds {
    pub fn new(r_min: f64, r_max: f64, z_min: f64, z_max: f64) -> Self {
        Self {
            r_min,
            r_max,
            z_min,
            z_max,
        }
    }

    /// Extent along r.
    pub fn width(&self) -> f64 {
        self.r_max - self.r_min
    }

    /// Extent along z.
    pub fn height(&self) -> f64 {
        self.z_max - self.z_min
    }

    /// Check if a point is contained within the domain.
    pub fn contains_point(&self, r: f64, z: f64) -> bool {
        r >= self.r_min && r <= self.r_max && z >= self.z_min && z <= self.z_max
    }

    /// Reject empty, inverted or non-finite bounds.
    pub fn validate(&self) -> FramesResult<()> {
        let all_finite = [self.r_min, self.r_max, self.z_min, self.z_max]
            .iter()
            .all(|v| v.is_finite());
        if !all_finite {
            return Err(FramesError::invalid("bounds", "bounds must be finite"));
        }
        if self.r_min >= self.r_max {
            return Err(FramesError::invalid(
                "rmin",
                format!("rmin ({}) must be less than rmax ({})", self.r_min, self.r_max),
            ));
        }
        if self.z_min >= self.z_max {
            return Err(FramesError::invalid(
                "zmin",
                format!("zmin ({}) must be less than zmax ({})", self.z_min, self.z_max),
            ));
        }
        Ok(())
    }
}

impl Default for DomainBounds {
    fn default() -> Self {
        Self::new(-4.0, 4.0, -4.0, 4.0)
    }
}

/// Annular region centred on the origin.
///
/// The temperature field is only shown between the two circles.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct AnnulusGeometry {
    pub inner_radius: f64,
    pub outer_radius: f64,
}

impl AnnulusGeometry {
    pub fn new(inner_radius: f64, outer_radius: f64) -> Self {
        Self {
            inner_radius,
            outer_radius,
        }
    }

    /// Point lies inside (or on) the outer circle.
    pub fn within_outer(&self, x: f64, y: f64) -> bool {
        x * x + y * y <= self.outer_radius * self.outer_radius
    }

    pub fn validate(&self) -> FramesResult<()> {
        if !(self.inner_radius.is_finite() && self.outer_radius.is_finite()) {
            return Err(FramesError::invalid("radius", "radii must be finite"));
        }
        if self.inner_radius < 0.0 {
            return Err(FramesError::invalid(
                "inner-radius",
                format!("must be non-negative, got {}", self.inner_radius),
            ));
        }
        if self.inner_radius >= self.outer_radius {
            return Err(FramesError::invalid(
                "inner-radius",
                format!(
                    "inner radius ({}) must be less than outer radius ({})",
                    self.inner_radius, self.outer_radius
                ),
            ));
        }
        Ok(())
    }
}

impl Default for AnnulusGeometry {
    fn default() -> Self {
        Self::new(1.0, 4.0)
    }
}
