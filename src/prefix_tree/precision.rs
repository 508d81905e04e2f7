//! Translating a relative error tolerance into an absolute distance.

use crate::context::SpatialContext;
use crate::error::{Result, SpatialError};
use crate::shape::Shape;

/// The default tolerated error, as a fraction of a shape's size.
pub const DEFAULT_DIST_ERR_PCT: f64 = 0.025;

/// The absolute distance error allowed when indexing `shape` with `dist_err_pct`.
///
/// The size of a shape is the distance from the center of its bounding box to a corner, taken
/// on the side farther from the equator. Points have no size and always get `0`.
pub fn calc_distance_from_err_pct(
    shape: &Shape,
    dist_err_pct: f64,
    ctx: &SpatialContext,
) -> Result<f64> {
    if !(0.0..=0.5).contains(&dist_err_pct) {
        return Err(SpatialError::InvalidArgument(format!(
            "dist_err_pct must be in [0, 0.5], got {}",
            dist_err_pct
        )));
    }
    if dist_err_pct == 0.0 || matches!(shape, Shape::Point(_)) || shape.is_empty() {
        return Ok(0.0);
    }

    let bbox = shape.bounding_box();
    let center = bbox.center();
    let y = if center.y() >= 0.0 {
        bbox.max_y()
    } else {
        bbox.min_y()
    };
    let diagonal = ctx.calc_distance(&center, bbox.max_x(), y);
    Ok(diagonal * dist_err_pct)
}
