use bytemuck::{Pod, Zeroable};
use float_next_after::NextAfter;
use geo_traits::{
    GeometryTrait, GeometryType, RectTrait, UnimplementedGeometryCollection, UnimplementedLine,
    UnimplementedLineString, UnimplementedMultiLineString, UnimplementedMultiPoint,
    UnimplementedMultiPolygon, UnimplementedPoint, UnimplementedPolygon, UnimplementedTriangle,
};

use crate::context::normalize::norm_lon_deg;
use crate::context::SpatialContext;
use crate::distance::util::calc_box_by_dist_from_pt_delta_lon_deg;
use crate::error::{Result, SpatialError};
use crate::relation::SpatialRelation;
use crate::shape::{Point, Shape};

/// An axis-aligned rectangle.
///
/// In a geodetic context a rectangle with `min_x > max_x` crosses the dateline: its longitude
/// range runs east from `min_x` over `180` to `max_x`. A rectangle spanning `[-180, 180]` covers
/// every longitude.
#[repr(C)]
#[derive(Debug, Clone, Copy, PartialEq, Default, Pod, Zeroable)]
pub struct Rectangle {
    min_x: f64,
    max_x: f64,
    min_y: f64,
    max_y: f64,
}

impl Rectangle {
    /// Create a rectangle without any validation or normalization.
    ///
    /// Use [`SpatialContext::make_rectangle`] to check values against the world bounds.
    pub fn new(min_x: f64, max_x: f64, min_y: f64, max_y: f64) -> Self {
        Self {
            min_x,
            max_x,
            min_y,
            max_y,
        }
    }

    /// The empty rectangle. It relates as disjoint to everything.
    pub fn empty() -> Self {
        Self::new(f64::NAN, f64::NAN, f64::NAN, f64::NAN)
    }

    /// The whole globe.
    pub fn world_geo() -> Self {
        Self::new(-180.0, 180.0, -90.0, 90.0)
    }

    /// Build a geodetic rectangle from in-range longitudes, folding the dateline edge cases:
    /// a range starting at `180` starts at `-180` instead, and one ending at `-180` ends at
    /// `180`.
    pub(crate) fn geo_canonical(min_x: f64, max_x: f64, min_y: f64, max_y: f64) -> Self {
        let (mut min_x, mut max_x) = (min_x, max_x);
        if min_x == 180.0 && max_x != 180.0 {
            min_x = -180.0;
        } else if max_x == -180.0 && min_x != -180.0 {
            max_x = 180.0;
        }
        Self::new(min_x, max_x, min_y, max_y)
    }

    /// Overwrite the bounds of this rectangle in place.
    pub fn reset(&mut self, min_x: f64, max_x: f64, min_y: f64, max_y: f64) {
        self.min_x = min_x;
        self.max_x = max_x;
        self.min_y = min_y;
        self.max_y = max_y;
    }

    #[inline]
    pub fn min_x(&self) -> f64 {
        self.min_x
    }

    #[inline]
    pub fn max_x(&self) -> f64 {
        self.max_x
    }

    #[inline]
    pub fn min_y(&self) -> f64 {
        self.min_y
    }

    #[inline]
    pub fn max_y(&self) -> f64 {
        self.max_y
    }

    /// Returns `true` if this is the empty rectangle.
    pub fn is_empty(&self) -> bool {
        self.min_x.is_nan() || self.max_x.is_nan() || self.min_y.is_nan() || self.max_y.is_nan()
    }

    /// Whether the longitude range wraps over the dateline.
    pub fn crosses_dateline(&self) -> bool {
        self.min_x > self.max_x
    }

    /// The width, accounting for a dateline crossing.
    pub fn width(&self) -> f64 {
        let width = self.max_x - self.min_x;
        if width < 0.0 {
            width + 360.0
        } else {
            width
        }
    }

    pub fn height(&self) -> f64 {
        self.max_y - self.min_y
    }

    /// Returns `true` if both the width and height are positive.
    pub fn has_area(&self) -> bool {
        self.width() > 0.0 && self.height() > 0.0
    }

    /// The center. For a rectangle crossing the dateline the longitude is normalized.
    pub fn center(&self) -> Point {
        if self.is_empty() {
            return Point::empty();
        }
        let y = (self.min_y + self.max_y) / 2.0;
        let x = if self.crosses_dateline() {
            norm_lon_deg(self.min_x + self.width() / 2.0)
        } else {
            (self.min_x + self.max_x) / 2.0
        };
        Point::new(x, y)
    }

    fn spans_all_longitudes(&self, ctx: &SpatialContext) -> bool {
        ctx.is_geo() && self.width() >= 360.0
    }

    /// Whether both rectangles reach the same pole.
    fn shares_pole(&self, other: &Rectangle, ctx: &SpatialContext) -> bool {
        ctx.is_geo()
            && ((self.min_y == -90.0 && other.min_y == -90.0)
                || (self.max_y == 90.0 && other.max_y == 90.0))
    }

    /// Returns `true` if the location `(x, y)` lies inside or on the boundary.
    pub fn contains_xy(&self, x: f64, y: f64, ctx: &SpatialContext) -> bool {
        if self.is_empty() || y < self.min_y || y > self.max_y {
            return false;
        }
        if !ctx.is_geo() {
            return self.min_x <= x && x <= self.max_x;
        }
        // Every longitude on a pole is the same place
        if self.spans_all_longitudes(ctx) || y.abs() == 90.0 {
            return true;
        }
        if lon_in_range(x, self.min_x, self.max_x) {
            return true;
        }
        x.abs() == 180.0 && lon_in_range(-x, self.min_x, self.max_x)
    }

    /// Relate the latitude (y) range of this rectangle to `[ext_min_y, ext_max_y]`.
    pub fn relate_y_range(&self, ext_min_y: f64, ext_max_y: f64) -> SpatialRelation {
        relate_range(self.min_y, self.max_y, ext_min_y, ext_max_y)
    }

    /// Relate the longitude (x) range of this rectangle to `[ext_min_x, ext_max_x]`.
    ///
    /// In a geodetic context both ranges may cross the dateline. Ranges are unwrapped onto a
    /// continuous number line before comparison.
    pub fn relate_x_range(
        &self,
        ext_min_x: f64,
        ext_max_x: f64,
        ctx: &SpatialContext,
    ) -> SpatialRelation {
        if !ctx.is_geo() {
            return relate_range(self.min_x, self.max_x, ext_min_x, ext_max_x);
        }

        let width = self.width();
        let mut ext_width = ext_max_x - ext_min_x;
        if ext_width < 0.0 {
            ext_width += 360.0;
        }

        match (width >= 360.0, ext_width >= 360.0) {
            (true, true) => return SpatialRelation::Within,
            (true, false) => return SpatialRelation::Contains,
            (false, true) => return SpatialRelation::Within,
            (false, false) => {}
        }

        let (mut min_x, mut max_x) = (self.min_x, self.min_x + width);
        let (mut ext_min_x, mut ext_max_x) = (ext_min_x, ext_min_x + ext_width);
        if max_x < ext_min_x {
            min_x += 360.0;
            max_x += 360.0;
        } else if ext_max_x < min_x {
            ext_min_x += 360.0;
            ext_max_x += 360.0;
        }

        relate_range(min_x, max_x, ext_min_x, ext_max_x)
    }

    /// Relate two rectangles by combining the per-axis relations.
    pub fn relate_rectangle(&self, other: &Rectangle, ctx: &SpatialContext) -> SpatialRelation {
        let y_rel = self.relate_y_range(other.min_y, other.max_y);
        if y_rel == SpatialRelation::Disjoint {
            return y_rel;
        }
        let mut x_rel = self.relate_x_range(other.min_x, other.max_x, ctx);
        if x_rel == SpatialRelation::Disjoint {
            if !self.shares_pole(other, ctx) {
                return x_rel;
            }
            // Both reach the same pole, which is a single place whatever the longitude
            x_rel = SpatialRelation::Intersects;
        }
        if x_rel == y_rel {
            return x_rel;
        }

        // An axis that matches exactly defers to the other axis
        if self.min_y == other.min_y && self.max_y == other.max_y {
            return x_rel;
        }
        let same_x = (self.min_x == other.min_x && self.max_x == other.max_x)
            || (self.spans_all_longitudes(ctx) && other.spans_all_longitudes(ctx));
        if same_x {
            return y_rel;
        }

        SpatialRelation::Intersects
    }

    /// Relate this rectangle to a point.
    pub fn relate_point(&self, point: &Point, ctx: &SpatialContext) -> SpatialRelation {
        if self.contains_xy(point.x(), point.y(), ctx) {
            if self.width() == 0.0 && self.height() == 0.0 {
                SpatialRelation::Within
            } else {
                SpatialRelation::Contains
            }
        } else {
            SpatialRelation::Disjoint
        }
    }

    /// Relate this rectangle to any other shape.
    pub fn relate(&self, other: &Shape, ctx: &SpatialContext) -> Result<SpatialRelation> {
        if self.is_empty() || other.is_empty() {
            return Ok(SpatialRelation::Disjoint);
        }
        match other {
            Shape::Point(point) => Ok(self.relate_point(point, ctx)),
            Shape::Rectangle(rect) => Ok(self.relate_rectangle(rect, ctx)),
            Shape::Circle(circle) => Ok(circle.relate_rectangle(self, ctx).transpose()),
            Shape::Collection(_) | Shape::External(_) => {
                Ok(other.relate(&Shape::Rectangle(*self), ctx)?.transpose())
            }
        }
    }

    /// Expand every side outward by `distance`.
    ///
    /// In a geodetic context the longitude expansion is taken at the latitude closest to a pole,
    /// and a rectangle reaching a pole spans all longitudes.
    pub fn buffered(&self, distance: f64, ctx: &SpatialContext) -> Result<Rectangle> {
        if !distance.is_finite() || distance < 0.0 {
            return Err(SpatialError::InvalidArgument(format!(
                "buffer distance must be finite and non-negative, got {}",
                distance
            )));
        }
        if !ctx.is_geo() {
            return Ok(Rectangle::new(
                self.min_x - distance,
                self.max_x + distance,
                self.min_y - distance,
                self.max_y + distance,
            ));
        }

        let min_y = self.min_y - distance;
        let max_y = self.max_y + distance;
        if min_y <= -90.0 || max_y >= 90.0 {
            return Ok(Rectangle::new(
                -180.0,
                180.0,
                min_y.max(-90.0),
                max_y.min(90.0),
            ));
        }

        let closest_to_pole = self.min_y.abs().max(self.max_y.abs());
        let lon_buffer = calc_box_by_dist_from_pt_delta_lon_deg(closest_to_pole, distance)
            .next_after(f64::INFINITY);
        if self.width() + 2.0 * lon_buffer >= 360.0 {
            return Ok(Rectangle::new(-180.0, 180.0, min_y, max_y));
        }
        Ok(Rectangle::geo_canonical(
            norm_lon_deg(self.min_x - lon_buffer),
            norm_lon_deg(self.max_x + lon_buffer),
            min_y,
            max_y,
        ))
    }
}

/// Whether `lon` lies in the longitude range `[min, max]`, which crosses the dateline when
/// `min > max`.
pub(crate) fn lon_in_range(lon: f64, min: f64, max: f64) -> bool {
    if min <= max {
        min <= lon && lon <= max
    } else {
        lon >= min || lon <= max
    }
}

/// Relate interval `[int_min, int_max]` to `[ext_min, ext_max]`. Equal intervals are within
/// each other.
fn relate_range(int_min: f64, int_max: f64, ext_min: f64, ext_max: f64) -> SpatialRelation {
    if ext_min > int_max || ext_max < int_min {
        SpatialRelation::Disjoint
    } else if ext_min <= int_min && ext_max >= int_max {
        SpatialRelation::Within
    } else if ext_min >= int_min && ext_max <= int_max {
        SpatialRelation::Contains
    } else {
        SpatialRelation::Intersects
    }
}

impl GeometryTrait for Rectangle {
    type T = f64;
    type PointType<'a>
        = UnimplementedPoint<f64>
    where
        Self: 'a;
    type LineStringType<'a>
        = UnimplementedLineString<f64>
    where
        Self: 'a;
    type PolygonType<'a>
        = UnimplementedPolygon<f64>
    where
        Self: 'a;
    type MultiPointType<'a>
        = UnimplementedMultiPoint<f64>
    where
        Self: 'a;
    type MultiLineStringType<'a>
        = UnimplementedMultiLineString<f64>
    where
        Self: 'a;
    type MultiPolygonType<'a>
        = UnimplementedMultiPolygon<f64>
    where
        Self: 'a;
    type GeometryCollectionType<'a>
        = UnimplementedGeometryCollection<f64>
    where
        Self: 'a;
    type RectType<'a>
        = Rectangle
    where
        Self: 'a;
    type TriangleType<'a>
        = UnimplementedTriangle<f64>
    where
        Self: 'a;
    type LineType<'a>
        = UnimplementedLine<f64>
    where
        Self: 'a;

    fn dim(&self) -> geo_traits::Dimensions {
        geo_traits::Dimensions::Xy
    }

    fn as_type(
        &self,
    ) -> GeometryType<
        '_,
        UnimplementedPoint<f64>,
        UnimplementedLineString<f64>,
        UnimplementedPolygon<f64>,
        UnimplementedMultiPoint<f64>,
        UnimplementedMultiLineString<f64>,
        UnimplementedMultiPolygon<f64>,
        UnimplementedGeometryCollection<f64>,
        Rectangle,
        UnimplementedTriangle<f64>,
        UnimplementedLine<f64>,
    > {
        GeometryType::Rect(self)
    }
}

impl RectTrait for Rectangle {
    type CoordType<'a>
        = Point
    where
        Self: 'a;

    fn min(&self) -> Self::CoordType<'_> {
        Point::new(self.min_x, self.min_y)
    }

    fn max(&self) -> Self::CoordType<'_> {
        Point::new(self.max_x, self.max_y)
    }
}
