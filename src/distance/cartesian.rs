use std::f64::consts::PI;

use crate::context::SpatialContext;
use crate::distance::DistanceCalculator;
use crate::shape::{Circle, Point, Rectangle};

/// Euclidean distance on a flat plane.
#[derive(Debug, Clone, Copy, Default)]
pub struct CartesianDistance;

impl DistanceCalculator for CartesianDistance {
    fn distance_xy(&self, from: &Point, to_x: f64, to_y: f64) -> f64 {
        (to_x - from.x()).hypot(to_y - from.y())
    }

    fn within(&self, from: &Point, to_x: f64, to_y: f64, distance: f64) -> bool {
        let dx = to_x - from.x();
        let dy = to_y - from.y();
        dx * dx + dy * dy <= distance * distance
    }

    fn calc_box_by_dist_from_pt(
        &self,
        from: &Point,
        distance: f64,
        _ctx: &SpatialContext,
    ) -> Rectangle {
        Rectangle::new(
            from.x() - distance,
            from.x() + distance,
            from.y() - distance,
            from.y() + distance,
        )
    }

    fn point_on_bearing(
        &self,
        from: &Point,
        distance: f64,
        bearing_deg: f64,
        ctx: &SpatialContext,
    ) -> Point {
        if distance == 0.0 {
            return *from;
        }
        let (sin_b, cos_b) = bearing_deg.to_radians().sin_cos();
        Point::new(
            ctx.norm_x(from.x() + distance * sin_b),
            from.y() + distance * cos_b,
        )
    }

    fn area_rectangle(&self, rect: &Rectangle) -> f64 {
        rect.width() * rect.height()
    }

    fn area_circle(&self, circle: &Circle) -> f64 {
        PI * circle.radius() * circle.radius()
    }
}
