//! The [`SpatialContext`]: world bounds, distance calculator and validating shape factories.

mod builder;
pub mod normalize;

use std::sync::Arc;

use geo_traits::{CoordTrait, RectTrait};
use num_traits::ToPrimitive;

pub use builder::SpatialContextBuilder;

use crate::distance::{DistanceCalculator, GeodesicDistance};
use crate::error::{Result, SpatialError};
use crate::shape::{Circle, Point, Rectangle, Shape, ShapeCollection};
use normalize::{norm_lat_deg, norm_lon_deg, norm_point_deg, wrap_planar};

/// Configuration shared by every shape operation: whether coordinates are geodetic, the world
/// bounds and how distances are measured.
///
/// A context is immutable once built and cheap to clone.
#[derive(Debug, Clone)]
pub struct SpatialContext {
    pub(crate) geo: bool,
    pub(crate) world_bounds: Rectangle,
    pub(crate) distance_calculator: Arc<dyn DistanceCalculator>,
    pub(crate) normalize_wrap_longitude: bool,
    pub(crate) wrap_planar_x: bool,
}

impl Default for SpatialContext {
    fn default() -> Self {
        Self::geo()
    }
}

impl SpatialContext {
    /// The default geodetic context: longitude/latitude in degrees with haversine distances.
    pub fn geo() -> Self {
        Self {
            geo: true,
            world_bounds: Rectangle::world_geo(),
            distance_calculator: Arc::new(GeodesicDistance::default()),
            normalize_wrap_longitude: true,
            wrap_planar_x: false,
        }
    }

    /// A planar context over `world_bounds` with Euclidean distances.
    pub fn planar(world_bounds: Rectangle) -> Result<Self> {
        SpatialContextBuilder::planar(world_bounds).build()
    }

    pub fn is_geo(&self) -> bool {
        self.geo
    }

    pub fn world_bounds(&self) -> &Rectangle {
        &self.world_bounds
    }

    pub fn distance_calculator(&self) -> &dyn DistanceCalculator {
        self.distance_calculator.as_ref()
    }

    pub fn normalize_wrap_longitude(&self) -> bool {
        self.normalize_wrap_longitude
    }

    pub fn wrap_planar_x(&self) -> bool {
        self.wrap_planar_x
    }

    /// Normalize an x value according to this context's wrapping rules. Values are returned
    /// untouched when no wrapping applies.
    pub fn norm_x(&self, x: f64) -> f64 {
        if self.geo {
            if self.normalize_wrap_longitude {
                norm_lon_deg(x)
            } else {
                x
            }
        } else if self.wrap_planar_x {
            wrap_planar(x, self.world_bounds.min_x(), self.world_bounds.width())
        } else {
            x
        }
    }

    /// Normalize a y value. In a geodetic context a latitude past a pole is reflected back;
    /// the longitude change this implies is only applied by [`norm_point`](Self::norm_point).
    pub fn norm_y(&self, y: f64) -> f64 {
        if self.geo && self.normalize_wrap_longitude {
            norm_lat_deg(y).0
        } else {
            y
        }
    }

    /// Normalize a coordinate pair.
    pub fn norm_point(&self, x: f64, y: f64) -> (f64, f64) {
        if self.geo && self.normalize_wrap_longitude {
            norm_point_deg(x, y)
        } else {
            (self.norm_x(x), y)
        }
    }

    /// Check an x value against the world bounds.
    pub fn verify_x(&self, x: f64) -> Result<f64> {
        let bounds = &self.world_bounds;
        if x.is_finite() && bounds.min_x() <= x && x <= bounds.max_x() {
            Ok(x)
        } else {
            Err(SpatialError::InvalidShape(format!(
                "x value {} is not in boundary [{}, {}]",
                x,
                bounds.min_x(),
                bounds.max_x()
            )))
        }
    }

    /// Check a y value against the world bounds.
    pub fn verify_y(&self, y: f64) -> Result<f64> {
        let bounds = &self.world_bounds;
        if y.is_finite() && bounds.min_y() <= y && y <= bounds.max_y() {
            Ok(y)
        } else {
            Err(SpatialError::InvalidShape(format!(
                "y value {} is not in boundary [{}, {}]",
                y,
                bounds.min_y(),
                bounds.max_y()
            )))
        }
    }

    /// Create a point, normalizing and validating it against the world bounds.
    pub fn make_point(&self, x: f64, y: f64) -> Result<Point> {
        check_finite(x, "x")?;
        check_finite(y, "y")?;
        let (x, y) = self.norm_point(x, y);
        Ok(Point::new(self.verify_x(x)?, self.verify_y(y)?))
    }

    /// Create a rectangle.
    ///
    /// In a geodetic context `min_x > max_x` denotes a dateline crossing, longitudes are wrapped
    /// when normalization is enabled and a longitude span of 360 degrees or more becomes
    /// `[-180, 180]`. Latitudes are never wrapped.
    pub fn make_rectangle(
        &self,
        min_x: f64,
        max_x: f64,
        min_y: f64,
        max_y: f64,
    ) -> Result<Rectangle> {
        check_finite(min_x, "min_x")?;
        check_finite(max_x, "max_x")?;
        check_finite(min_y, "min_y")?;
        check_finite(max_y, "max_y")?;
        if min_y > max_y {
            return Err(SpatialError::InvalidShape(format!(
                "min_y {} is greater than max_y {}",
                min_y, max_y
            )));
        }
        let min_y = self.verify_y(min_y)?;
        let max_y = self.verify_y(max_y)?;

        if !self.geo {
            if min_x > max_x {
                return Err(SpatialError::InvalidShape(format!(
                    "min_x {} is greater than max_x {}",
                    min_x, max_x
                )));
            }
            return Ok(Rectangle::new(
                self.verify_x(min_x)?,
                self.verify_x(max_x)?,
                min_y,
                max_y,
            ));
        }

        if self.normalize_wrap_longitude && max_x - min_x >= 360.0 {
            return Ok(Rectangle::new(-180.0, 180.0, min_y, max_y));
        }
        let min_x = self.verify_x(self.norm_x(min_x))?;
        let max_x = self.verify_x(self.norm_x(max_x))?;
        Ok(Rectangle::geo_canonical(min_x, max_x, min_y, max_y))
    }

    /// Create a rectangle from its lower-left and upper-right corners.
    pub fn make_rectangle_from_corners(
        &self,
        lower_left: &Point,
        upper_right: &Point,
    ) -> Result<Rectangle> {
        self.make_rectangle(
            lower_left.x(),
            upper_right.x(),
            lower_left.y(),
            upper_right.y(),
        )
    }

    /// Create a circle around a point. The center is normalized like
    /// [`make_point`](Self::make_point).
    pub fn make_circle(&self, center: &Point, radius: f64) -> Result<Circle> {
        let center = self.make_point(center.x(), center.y())?;
        Circle::new(center, radius, self)
    }

    pub fn make_circle_xy(&self, x: f64, y: f64, radius: f64) -> Result<Circle> {
        Circle::new(self.make_point(x, y)?, radius, self)
    }

    /// Group shapes into a collection.
    pub fn make_collection(&self, shapes: Vec<Shape>) -> ShapeCollection {
        ShapeCollection::new(shapes, self)
    }

    /// The distance from `from` to `(x, y)` using this context's calculator.
    pub fn calc_distance(&self, from: &Point, x: f64, y: f64) -> f64 {
        self.distance_calculator.distance_xy(from, x, y)
    }

    /// Create a point from any [`CoordTrait`] implementation.
    pub fn point_from_coord<C>(&self, coord: &C) -> Result<Point>
    where
        C: CoordTrait,
        C::T: ToPrimitive,
    {
        self.make_point(to_f64(coord.x(), "x")?, to_f64(coord.y(), "y")?)
    }

    /// Create a rectangle from any [`RectTrait`] implementation.
    pub fn rect_from_rect<R>(&self, rect: &R) -> Result<Rectangle>
    where
        R: RectTrait,
        R::T: ToPrimitive,
    {
        let min = rect.min();
        let max = rect.max();
        self.make_rectangle(
            to_f64(min.x(), "min_x")?,
            to_f64(max.x(), "max_x")?,
            to_f64(min.y(), "min_y")?,
            to_f64(max.y(), "max_y")?,
        )
    }
}

fn check_finite(value: f64, name: &str) -> Result<()> {
    if value.is_finite() {
        Ok(())
    } else {
        Err(SpatialError::InvalidShape(format!(
            "{} must be finite, got {}",
            name, value
        )))
    }
}

fn to_f64<T: ToPrimitive>(value: T, name: &str) -> Result<f64> {
    value.to_f64().ok_or_else(|| {
        SpatialError::InvalidShape(format!("{} is not representable as f64", name))
    })
}
