use crate::math::{clamp01, smoothstep};

/// How committed a point at `distance` is to a branch rather than the main path.
///
/// Zero outside `[start, end]`. Inside, the smaller of an entry ramp and an
/// exit ramp (each reaching 1 after `transition` units) is eased with
/// [`smoothstep`], so frames blended with it never jump in direction.
#[must_use]
pub fn branch_blend(distance: f64, start: f64, end: f64, transition: f64) -> f64 {
    if !distance.is_finite() || distance < start || distance > end {
        return 0.0;
    }
    if transition <= 0.0 {
        return 1.0;
    }
    let entry = clamp01((distance - start) / transition);
    let exit = clamp01((end - distance) / transition);
    smoothstep(entry.min(exit))
}
