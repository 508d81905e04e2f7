use std::fmt::Debug;

use crate::context::SpatialContext;
use crate::shape::{Circle, Point, Rectangle};

/// Measures distances, areas and circle extents for a [`SpatialContext`].
///
/// Distances are expressed in the units of the context: degrees of arc for geodetic
/// calculators, coordinate units for planar ones.
pub trait DistanceCalculator: Debug + Send + Sync {
    /// The distance from `from` to the location `(to_x, to_y)`.
    fn distance_xy(&self, from: &Point, to_x: f64, to_y: f64) -> f64;

    /// The distance between two points.
    fn distance(&self, from: &Point, to: &Point) -> f64 {
        self.distance_xy(from, to.x(), to.y())
    }

    /// Returns `true` if `(to_x, to_y)` lies within `distance` of `from`, boundary included.
    fn within(&self, from: &Point, to_x: f64, to_y: f64, distance: f64) -> bool {
        self.distance_xy(from, to_x, to_y) <= distance
    }

    /// The smallest rectangle covering every location within `distance` of `from`.
    ///
    /// The result must never be smaller than the true extent: spatial pruning relies on it.
    fn calc_box_by_dist_from_pt(
        &self,
        from: &Point,
        distance: f64,
        ctx: &SpatialContext,
    ) -> Rectangle;

    /// The location reached from `from` after `distance` in direction `bearing_deg`, measured
    /// clockwise from north (the positive y axis).
    fn point_on_bearing(
        &self,
        from: &Point,
        distance: f64,
        bearing_deg: f64,
        ctx: &SpatialContext,
    ) -> Point;

    /// The area of a rectangle.
    fn area_rectangle(&self, rect: &Rectangle) -> f64;

    /// The area of a circle.
    fn area_circle(&self, circle: &Circle) -> f64;
}
