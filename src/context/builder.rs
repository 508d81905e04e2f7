use std::sync::Arc;

use crate::context::SpatialContext;
use crate::distance::{CartesianDistance, DistanceCalculator, GeodesicDistance};
use crate::error::{Result, SpatialError};
use crate::shape::Rectangle;

/// A builder to create a [`SpatialContext`].
///
/// ```
/// use geo_prefix::{Rectangle, SpatialContextBuilder};
///
/// let ctx = SpatialContextBuilder::planar(Rectangle::new(0., 1000., 0., 500.))
///     .wrap_planar_x(true)
///     .build()
///     .unwrap();
/// assert!(!ctx.is_geo());
/// ```
#[derive(Debug, Clone)]
pub struct SpatialContextBuilder {
    geo: bool,
    world_bounds: Rectangle,
    distance_calculator: Option<Arc<dyn DistanceCalculator>>,
    normalize_wrap_longitude: bool,
    wrap_planar_x: bool,
}

impl SpatialContextBuilder {
    /// Start building a geodetic context. The world is `[-180, 180] x [-90, 90]` and distances
    /// default to haversine.
    pub fn geo() -> Self {
        Self {
            geo: true,
            world_bounds: Rectangle::world_geo(),
            distance_calculator: None,
            normalize_wrap_longitude: true,
            wrap_planar_x: false,
        }
    }

    /// Start building a planar context over `world_bounds`. Distances default to Euclidean.
    pub fn planar(world_bounds: Rectangle) -> Self {
        Self {
            geo: false,
            world_bounds,
            distance_calculator: None,
            normalize_wrap_longitude: false,
            wrap_planar_x: false,
        }
    }

    /// Use a custom distance calculator.
    pub fn distance_calculator(self, calculator: impl DistanceCalculator + 'static) -> Self {
        Self {
            distance_calculator: Some(Arc::new(calculator)),
            ..self
        }
    }

    /// Whether geodetic coordinates outside the world are wrapped into range. When disabled
    /// they are rejected instead. Defaults to `true`.
    pub fn normalize_wrap_longitude(self, normalize: bool) -> Self {
        Self {
            normalize_wrap_longitude: normalize,
            ..self
        }
    }

    /// Whether planar x values are wrapped modulo the world width. Defaults to `false`.
    pub fn wrap_planar_x(self, wrap: bool) -> Self {
        Self {
            wrap_planar_x: wrap,
            ..self
        }
    }

    /// Consume this builder, validating the world bounds.
    pub fn build(self) -> Result<SpatialContext> {
        let bounds = self.world_bounds;
        let finite = [bounds.min_x(), bounds.max_x(), bounds.min_y(), bounds.max_y()]
            .iter()
            .all(|v| v.is_finite());
        if !finite || bounds.min_x() > bounds.max_x() || bounds.min_y() > bounds.max_y() {
            return Err(SpatialError::InvalidArgument(format!(
                "world bounds must be finite and ordered, got {:?}",
                bounds
            )));
        }

        let distance_calculator = match self.distance_calculator {
            Some(calculator) => calculator,
            None if self.geo => Arc::new(GeodesicDistance::default()),
            None => Arc::new(CartesianDistance),
        };

        tracing::debug!(
            geo = self.geo,
            ?bounds,
            calculator = ?distance_calculator,
            normalize_wrap_longitude = self.normalize_wrap_longitude,
            wrap_planar_x = self.wrap_planar_x,
            "built spatial context"
        );

        Ok(SpatialContext {
            geo: self.geo,
            world_bounds: bounds,
            distance_calculator,
            normalize_wrap_longitude: self.normalize_wrap_longitude,
            wrap_planar_x: self.wrap_planar_x,
        })
    }
}
