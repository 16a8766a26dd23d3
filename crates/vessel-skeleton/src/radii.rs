//! Radius post-processing applied to assembled polylines.

use vessel_core::{Polyline, RadiusPolicy};

/// Rewrites sample radii according to `policy`.
///
/// Positions and color indices are left alone. `AsSpecified` is a no-op.
pub fn apply_radius_policy(polylines: &mut [Polyline], policy: RadiusPolicy) {
    if policy == RadiusPolicy::AsSpecified {
        return;
    }

    let samples = polylines
        .iter_mut()
        .flat_map(|polyline| polyline.samples_mut().iter_mut());
    for sample in samples {
        sample.radius = match policy {
            RadiusPolicy::Fixed(value) => value,
            RadiusPolicy::Scaled(factor) => sample.radius * factor,
            RadiusPolicy::AsSpecified => sample.radius,
        };
    }
    log::debug!("applied radius policy {policy:?} to {} polylines", polylines.len());
}
