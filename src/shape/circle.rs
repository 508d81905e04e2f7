use crate::context::normalize::norm_lon_deg;
use crate::context::SpatialContext;
use crate::distance::util::closest_point_on_rect_deg;
use crate::error::{Result, SpatialError};
use crate::relation::SpatialRelation;
use crate::shape::{Point, Rectangle, Shape};

/// A circle: every location within `radius` of `center`, measured by the context's
/// [`DistanceCalculator`][crate::distance::DistanceCalculator].
///
/// In a geodetic context the radius is in degrees of arc and the bounding box is derived from
/// the great-circle geometry, so it may cross the dateline or cover all longitudes.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Circle {
    center: Point,
    radius: f64,
    bounding_box: Rectangle,
}

impl Circle {
    /// Create a new circle.
    ///
    /// Geodetic radii are capped at `180` degrees. A negative or non-finite radius is rejected.
    pub fn new(center: Point, radius: f64, ctx: &SpatialContext) -> Result<Self> {
        if !radius.is_finite() || radius < 0.0 {
            return Err(SpatialError::InvalidShape(format!(
                "circle radius must be finite and non-negative, got {}",
                radius
            )));
        }
        let radius = if ctx.is_geo() {
            radius.min(180.0)
        } else {
            radius
        };
        let bounding_box = if center.is_empty() {
            Rectangle::empty()
        } else {
            ctx.distance_calculator()
                .calc_box_by_dist_from_pt(&center, radius, ctx)
        };
        Ok(Self {
            center,
            radius,
            bounding_box,
        })
    }

    pub fn center(&self) -> Point {
        self.center
    }

    pub fn radius(&self) -> f64 {
        self.radius
    }

    pub fn bounding_box(&self) -> Rectangle {
        self.bounding_box
    }

    pub fn has_area(&self) -> bool {
        self.radius > 0.0
    }

    pub fn is_empty(&self) -> bool {
        self.center.is_empty()
    }

    /// Grow the radius by `distance`.
    pub fn buffered(&self, distance: f64, ctx: &SpatialContext) -> Result<Circle> {
        Circle::new(self.center, self.radius + distance, ctx)
    }

    /// Returns `true` if the location `(x, y)` is within the radius.
    pub fn contains_xy(&self, x: f64, y: f64, ctx: &SpatialContext) -> bool {
        ctx.distance_calculator()
            .within(&self.center, x, y, self.radius)
    }

    /// Relate this circle to any other shape.
    pub fn relate(&self, other: &Shape, ctx: &SpatialContext) -> Result<SpatialRelation> {
        if self.is_empty() || other.is_empty() {
            return Ok(SpatialRelation::Disjoint);
        }
        match other {
            Shape::Point(point) => Ok(self.relate_point(point, ctx)),
            Shape::Rectangle(rect) => Ok(self.relate_rectangle(rect, ctx)),
            Shape::Circle(circle) => Ok(self.relate_circle(circle, ctx)),
            Shape::Collection(_) | Shape::External(_) => {
                Ok(other.relate(&Shape::Circle(*self), ctx)?.transpose())
            }
        }
    }

    pub fn relate_point(&self, point: &Point, ctx: &SpatialContext) -> SpatialRelation {
        if !self.bounding_box.contains_xy(point.x(), point.y(), ctx) {
            return SpatialRelation::Disjoint;
        }
        if self.contains_xy(point.x(), point.y(), ctx) {
            SpatialRelation::Contains
        } else {
            SpatialRelation::Disjoint
        }
    }

    /// Relate this circle to a rectangle.
    ///
    /// The bounding boxes are compared first; only when that is inconclusive are the closest and
    /// farthest points of the rectangle tested against the radius.
    pub fn relate_rectangle(&self, rect: &Rectangle, ctx: &SpatialContext) -> SpatialRelation {
        let bbox_rel = self.bounding_box.relate_rectangle(rect, ctx);
        match bbox_rel {
            SpatialRelation::Disjoint | SpatialRelation::Within => return bbox_rel,
            SpatialRelation::Contains | SpatialRelation::Intersects => {}
        }

        let (closest, farthest) = if ctx.is_geo() {
            self.geo_extreme_points(rect)
        } else {
            self.planar_extreme_points(rect)
        };

        if !self.contains_xy(closest.0, closest.1, ctx) {
            return SpatialRelation::Disjoint;
        }
        if bbox_rel != SpatialRelation::Contains {
            return SpatialRelation::Intersects;
        }
        if self.contains_xy(farthest.0, farthest.1, ctx) {
            SpatialRelation::Contains
        } else {
            SpatialRelation::Intersects
        }
    }

    pub fn relate_circle(&self, other: &Circle, ctx: &SpatialContext) -> SpatialRelation {
        let distance = ctx
            .distance_calculator()
            .distance(&self.center, &other.center);
        if distance + self.radius <= other.radius {
            SpatialRelation::Within
        } else if distance + other.radius <= self.radius {
            SpatialRelation::Contains
        } else if distance > self.radius + other.radius {
            SpatialRelation::Disjoint
        } else {
            SpatialRelation::Intersects
        }
    }

    fn planar_extreme_points(&self, rect: &Rectangle) -> ((f64, f64), (f64, f64)) {
        let (cx, cy) = (self.center.x(), self.center.y());
        let closest = (
            cx.clamp(rect.min_x(), rect.max_x()),
            cy.clamp(rect.min_y(), rect.max_y()),
        );
        let far_x = if rect.max_x() - cx > cx - rect.min_x() {
            rect.max_x()
        } else {
            rect.min_x()
        };
        let far_y = if rect.max_y() - cy > cy - rect.min_y() {
            rect.max_y()
        } else {
            rect.min_y()
        };
        (closest, (far_x, far_y))
    }

    /// On the sphere the point of a rectangle farthest from the center is the one closest to the
    /// center's antipode.
    fn geo_extreme_points(&self, rect: &Rectangle) -> ((f64, f64), (f64, f64)) {
        let (lon, lat) = (self.center.x(), self.center.y());
        let closest = closest_point_on_rect_deg(lon, lat, rect);
        let farthest = closest_point_on_rect_deg(norm_lon_deg(lon + 180.0), -lat, rect);
        (closest, farthest)
    }
}
