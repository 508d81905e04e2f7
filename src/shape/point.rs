use geo_traits::CoordTrait;

use crate::context::SpatialContext;
use crate::error::Result;
use crate::relation::SpatialRelation;
use crate::shape::{Rectangle, Shape};

/// An immutable 2D point.
///
/// In a geodetic context `x` is the longitude and `y` the latitude, both in degrees. Points built
/// through [`SpatialContext::make_point`] are always normalized into range.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Point {
    x: f64,
    y: f64,
}

impl Point {
    /// Create a point without any validation or normalization.
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    /// The empty point. It relates as disjoint to everything.
    pub fn empty() -> Self {
        Self {
            x: f64::NAN,
            y: f64::NAN,
        }
    }

    /// The `x` coordinate (longitude).
    #[inline]
    pub fn x(&self) -> f64 {
        self.x
    }

    /// The `y` coordinate (latitude).
    #[inline]
    pub fn y(&self) -> f64 {
        self.y
    }

    /// Returns `true` if this is the empty point.
    pub fn is_empty(&self) -> bool {
        self.x.is_nan() || self.y.is_nan()
    }

    /// A degenerate rectangle at this point.
    pub fn bounding_box(&self) -> Rectangle {
        Rectangle::new(self.x, self.x, self.y, self.y)
    }

    /// Returns `true` if both points denote the same location.
    ///
    /// On the globe every longitude at a pole is the same place, as are longitudes `-180` and
    /// `180`.
    pub fn coincides(&self, other: &Point, ctx: &SpatialContext) -> bool {
        if self == other {
            return true;
        }
        if !ctx.is_geo() || self.y != other.y {
            return false;
        }
        self.y.abs() == 90.0 || (self.x.abs() == 180.0 && other.x.abs() == 180.0)
    }

    /// Relate this point to another shape.
    ///
    /// Two coincident points are [`SpatialRelation::Within`] each other; for any other shape the
    /// answer is computed from that shape's side and transposed.
    pub fn relate(&self, other: &Shape, ctx: &SpatialContext) -> Result<SpatialRelation> {
        if self.is_empty() || other.is_empty() {
            return Ok(SpatialRelation::Disjoint);
        }
        match other {
            Shape::Point(point) => Ok(if self.coincides(point, ctx) {
                SpatialRelation::Within
            } else {
                SpatialRelation::Disjoint
            }),
            _ => Ok(other.relate(&Shape::Point(*self), ctx)?.transpose()),
        }
    }
}

impl CoordTrait for Point {
    type T = f64;

    fn dim(&self) -> geo_traits::Dimensions {
        geo_traits::Dimensions::Xy
    }

    fn x(&self) -> Self::T {
        self.x
    }

    fn y(&self) -> Self::T {
        self.y
    }

    fn nth_or_panic(&self, n: usize) -> Self::T {
        match n {
            0 => self.x,
            1 => self.y,
            _ => panic!("Invalid index of coord"),
        }
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn equal_points_are_within() {
        let ctx = SpatialContext::geo();
        let a = Point::new(10., 20.);
        let rel = a.relate(&Shape::Point(Point::new(10., 20.)), &ctx).unwrap();
        assert_eq!(rel, SpatialRelation::Within);
        assert!(rel.intersects());

        let rel = a.relate(&Shape::Point(Point::new(10., 21.)), &ctx).unwrap();
        assert_eq!(rel, SpatialRelation::Disjoint);
    }

    #[test]
    fn pole_and_dateline_points_coincide() {
        let ctx = SpatialContext::geo();
        assert!(Point::new(10., 90.).coincides(&Point::new(-120., 90.), &ctx));
        assert!(Point::new(180., 5.).coincides(&Point::new(-180., 5.), &ctx));
        assert!(!Point::new(180., 5.).coincides(&Point::new(-180., 6.), &ctx));
    }

    #[test]
    fn empty_point_is_disjoint() {
        let ctx = SpatialContext::geo();
        let empty = Point::empty();
        assert!(empty.is_empty());
        let rel = empty.relate(&Shape::Point(empty), &ctx).unwrap();
        assert_eq!(rel, SpatialRelation::Disjoint);
    }

    #[test]
    fn point_in_rectangle_is_within() {
        let ctx = SpatialContext::geo();
        let rect = Rectangle::new(0., 10., 0., 10.);
        let rel = Point::new(5., 5.)
            .relate(&Shape::Rectangle(rect), &ctx)
            .unwrap();
        assert_eq!(rel, SpatialRelation::Within);
    }

    #[test]
    fn coord_trait() {
        let p = Point::new(1., 2.);
        assert_eq!(CoordTrait::x(&p), 1.);
        assert_eq!(p.nth_or_panic(1), 2.);
    }
}
