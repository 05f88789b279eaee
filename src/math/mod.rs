pub mod angle;
pub mod frame;

pub use frame::Frame;

/// 2D point type (UV coordinates).
pub type Point2 = nalgebra::Point2<f64>;

/// 3D point type.
pub type Point3 = nalgebra::Point3<f64>;

/// 3D vector type.
pub type Vector3 = nalgebra::Vector3<f64>;

/// Global geometric tolerance for floating-point comparisons.
pub const TOLERANCE: f64 = 1e-10;

/// Linear interpolation between two scalars.
#[must_use]
pub fn lerp(a: f64, b: f64, t: f64) -> f64 {
    a + (b - a) * t
}

/// Linear interpolation between two points.
#[must_use]
pub fn lerp_point(a: &Point3, b: &Point3, t: f64) -> Point3 {
    a + (b - a) * t
}

/// Clamps `x` into `[0, 1]`.
#[must_use]
pub fn clamp01(x: f64) -> f64 {
    x.clamp(0.0, 1.0)
}

/// Hermite ease `x²(3 − 2x)` applied to `x` clamped into `[0, 1]`.
///
/// Zero slope at both ends, so anything blended with it starts and stops
/// without a derivative jump.
#[must_use]
pub fn smoothstep(x: f64) -> f64 {
    let x = clamp01(x);
    x * x * (3.0 - 2.0 * x)
}
