use crate::error::{GeometryError, Result};

use super::{lerp_point, Point3, Vector3, TOLERANCE};

/// Reference up direction used to build frames from a bare forward vector.
pub const WORLD_UP: Vector3 = Vector3::new(0.0, 1.0, 0.0);

/// Secondary reference used when forward is nearly parallel to [`WORLD_UP`].
pub const FALLBACK_UP: Vector3 = Vector3::new(0.0, 0.0, 1.0);

/// Above this `|forward · WORLD_UP|` (about 18 degrees off vertical) the cross
/// product with [`WORLD_UP`] is too short to trust.
pub const PARALLEL_LIMIT: f64 = 0.95;

/// A positioned orthonormal frame along a centerline.
///
/// Right-handed: `right = forward × up` and `up = right × forward`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Frame {
    /// Point on the centerline.
    pub position: Point3,
    /// Unit tangent in the direction of travel.
    pub forward: Vector3,
    /// Unit lateral axis.
    pub right: Vector3,
    /// Unit vertical axis.
    pub up: Vector3,
}

impl Frame {
    /// Creates a frame from explicit axes without re-orthonormalizing them.
    #[must_use]
    pub fn new(position: Point3, forward: Vector3, right: Vector3, up: Vector3) -> Self {
        Self {
            position,
            forward,
            right,
            up,
        }
    }

    /// Builds a robust orthonormal frame from a forward direction.
    ///
    /// The lateral axis comes from `forward × WORLD_UP`, switching to
    /// [`FALLBACK_UP`] when forward is within [`PARALLEL_LIMIT`] of vertical so
    /// the cross product never collapses toward zero length.
    ///
    /// # Errors
    ///
    /// Returns [`GeometryError::ZeroVector`] if `forward` has no length.
    pub fn from_forward(position: Point3, forward: Vector3) -> Result<Self> {
        let len = forward.norm();
        if len < TOLERANCE {
            return Err(GeometryError::ZeroVector.into());
        }
        let forward = forward / len;

        let reference = if forward.dot(&WORLD_UP).abs() > PARALLEL_LIMIT {
            FALLBACK_UP
        } else {
            WORLD_UP
        };
        let right = forward.cross(&reference).normalize();
        let up = right.cross(&forward).normalize();

        Ok(Self::new(position, forward, right, up))
    }

    /// Point on the circle of `radius` around this frame's position, in the
    /// `right`/`up` plane. `angle = 0` lies on `+right`, `π/2` on `+up`.
    #[must_use]
    pub fn ring_point(&self, angle: f64, radius: f64) -> Point3 {
        self.position + self.ring_direction(angle) * radius
    }

    /// Unit radial direction at `angle` in the `right`/`up` plane.
    #[must_use]
    pub fn ring_direction(&self, angle: f64) -> Vector3 {
        self.right * angle.cos() + self.up * angle.sin()
    }

    /// Blends this frame toward `other`: position is lerped, forward is slerped,
    /// and `up` is lerped then re-orthogonalized against the new forward.
    ///
    /// Returns `self`'s exact basis at `t = 0` and `other`'s at `t = 1`. If the
    /// lerped `up` collapses onto forward, the basis falls back to
    /// [`Frame::from_forward`].
    ///
    /// # Errors
    ///
    /// Returns an error if the blended forward degenerates.
    pub fn blend(&self, other: &Frame, t: f64) -> Result<Self> {
        let position = lerp_point(&self.position, &other.position, t);
        let forward = slerp_direction(&self.forward, &other.forward, t);
        let up_hint = self.up * (1.0 - t) + other.up * t;

        let right = forward.cross(&up_hint);
        let len = right.norm();
        if len < 1e-6 {
            return Self::from_forward(position, forward);
        }
        let right = right / len;
        let up = right.cross(&forward).normalize();
        Ok(Self::new(position, forward, right, up))
    }
}

impl Default for Frame {
    fn default() -> Self {
        Self::new(
            Point3::origin(),
            -Vector3::z(),
            Vector3::x(),
            Vector3::y(),
        )
    }
}

/// Spherical interpolation between two unit directions.
///
/// Falls back to a normalized lerp when the directions are (anti)parallel and
/// the great-circle arc is undefined or numerically unstable.
#[must_use]
pub fn slerp_direction(a: &Vector3, b: &Vector3, t: f64) -> Vector3 {
    let cos = a.dot(b).clamp(-1.0, 1.0);
    let theta = cos.acos();
    let sin = theta.sin();

    if sin.abs() < 1e-6 {
        let mixed = a * (1.0 - t) + b * t;
        let len = mixed.norm();
        return if len < TOLERANCE { *a } else { mixed / len };
    }

    let wa = ((1.0 - t) * theta).sin() / sin;
    let wb = (t * theta).sin() / sin;
    (a * wa + b * wb).normalize()
}
