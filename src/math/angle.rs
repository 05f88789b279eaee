//! Angle helpers working in degrees, for traveler positions around the tube.

/// Wraps an angle in degrees into `[0, 360)`.
#[must_use]
pub fn normalize_degrees(angle: f64) -> f64 {
    let wrapped = angle.rem_euclid(360.0);
    // rem_euclid can round up to exactly 360 for tiny negative inputs
    if wrapped >= 360.0 {
        0.0
    } else {
        wrapped
    }
}

/// Signed shortest rotation from `from` to `to`, in degrees, within `[-180, 180)`.
#[must_use]
pub fn delta_degrees(from: f64, to: f64) -> f64 {
    normalize_degrees(to - from + 180.0) - 180.0
}
