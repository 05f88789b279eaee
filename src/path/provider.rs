use crate::error::{GeometryError, Result};
use crate::math::{Frame, Point3, Vector3, TOLERANCE};

use super::MainPath;

/// A straight main tunnel starting at `origin`.
#[derive(Debug, Clone)]
pub struct StraightPath {
    start: Frame,
}

impl StraightPath {
    /// Creates a straight path heading along `forward`.
    ///
    /// # Errors
    ///
    /// Returns an error if `forward` is zero-length.
    pub fn new(origin: Point3, forward: Vector3) -> Result<Self> {
        Ok(Self {
            start: Frame::from_forward(origin, forward)?,
        })
    }
}

impl MainPath for StraightPath {
    fn frame_at(&self, distance: f64) -> Frame {
        Frame {
            position: self.start.position + self.start.forward * distance,
            ..self.start
        }
    }
}

/// A main tunnel bending around a vertical axis at constant curvature.
///
/// Distance 0 sits at `center + radius * x`; travel is counter-clockwise when
/// seen from above, so `right` always points toward `center`.
#[derive(Debug, Clone)]
pub struct ArcPath {
    center: Point3,
    radius: f64,
}

impl ArcPath {
    /// Creates a circular path of the given radius.
    ///
    /// # Errors
    ///
    /// Returns an error if `radius` is not positive.
    pub fn new(center: Point3, radius: f64) -> Result<Self> {
        if radius < TOLERANCE {
            return Err(GeometryError::Degenerate("arc path radius must be positive".into()).into());
        }
        Ok(Self { center, radius })
    }

    /// Returns the bend radius.
    #[must_use]
    pub fn radius(&self) -> f64 {
        self.radius
    }
}

impl MainPath for ArcPath {
    fn frame_at(&self, distance: f64) -> Frame {
        let theta = distance / self.radius;
        let (sin, cos) = theta.sin_cos();
        let position = self.center + Vector3::new(cos, 0.0, sin) * self.radius;
        let forward = Vector3::new(-sin, 0.0, cos);
        let up = Vector3::y();
        Frame::new(position, forward, forward.cross(&up), up)
    }
}
