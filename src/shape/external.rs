use std::fmt::Debug;
use std::sync::Arc;

use crate::context::SpatialContext;
use crate::error::Result;
use crate::relation::SpatialRelation;
use crate::shape::{Point, Rectangle, Shape};

/// A pluggable geometry implementation for shapes this crate cannot represent itself, such as
/// polygons or line strings.
///
/// An engine only needs a bounding box and a relate function against the built-in shapes to
/// take part in grid decomposition.
pub trait GeometryEngine: Debug + Send + Sync {
    /// The bounding box of the geometry.
    fn bounding_box(&self) -> Rectangle;

    /// Relate the geometry to another shape.
    fn relate(&self, other: &Shape, ctx: &SpatialContext) -> Result<SpatialRelation>;

    fn has_area(&self) -> bool;

    fn center(&self) -> Point {
        self.bounding_box().center()
    }

    /// The area of the geometry. Defaults to the area of the bounding box.
    fn area(&self, ctx: &SpatialContext) -> f64 {
        ctx.distance_calculator()
            .area_rectangle(&self.bounding_box())
    }

    fn is_empty(&self) -> bool {
        self.bounding_box().is_empty()
    }
}

/// A shape backed by a [`GeometryEngine`].
#[derive(Debug, Clone)]
pub struct ExternalGeometry(Arc<dyn GeometryEngine>);

impl ExternalGeometry {
    pub fn new(engine: impl GeometryEngine + 'static) -> Self {
        Self(Arc::new(engine))
    }

    pub fn engine(&self) -> &dyn GeometryEngine {
        self.0.as_ref()
    }
}
