//! [`GeometryEngine`] backed by the `geo` crate, for polygons and other complex geometries.
//!
//! Relations are computed with the DE-9IM matrix in planar coordinates. Geometries crossing the
//! dateline are not supported.

use geo_0_31::{
    coord, Area, BoundingRect, Coord, Geometry, MapCoords, MultiPolygon, Rect, Relate,
};

use crate::context::SpatialContext;
use crate::error::{Result, SpatialError};
use crate::relation::SpatialRelation;
use crate::shape::{GeometryEngine, Rectangle, Shape};

/// A `geo` geometry that can be decomposed onto a grid like any built-in shape.
#[derive(Debug, Clone)]
pub struct GeoGeometry {
    geometry: Geometry<f64>,
    bounding_box: Rectangle,
}

impl GeoGeometry {
    /// Wrap a geometry, normalizing every coordinate through the context.
    pub fn new(geometry: Geometry<f64>, ctx: &SpatialContext) -> Result<Self> {
        let geometry = geometry.try_map_coords(|c: Coord<f64>| {
            let point = ctx.make_point(c.x, c.y)?;
            Ok::<_, SpatialError>(coord! { x: point.x(), y: point.y() })
        })?;
        let rect = geometry
            .bounding_rect()
            .ok_or_else(|| SpatialError::InvalidShape("geometry has no coordinates".to_string()))?;
        let bounding_box = Rectangle::new(rect.min().x, rect.max().x, rect.min().y, rect.max().y);
        Ok(Self {
            geometry,
            bounding_box,
        })
    }

    pub fn geometry(&self) -> &Geometry<f64> {
        &self.geometry
    }
}

impl GeometryEngine for GeoGeometry {
    fn bounding_box(&self) -> Rectangle {
        self.bounding_box
    }

    fn relate(&self, other: &Shape, _ctx: &SpatialContext) -> Result<SpatialRelation> {
        let other = match other {
            Shape::Point(point) => Geometry::Point(geo_0_31::Point::new(point.x(), point.y())),
            Shape::Rectangle(rect) => rectangle_to_geometry(rect),
            Shape::Circle(_) | Shape::Collection(_) | Shape::External(_) => {
                return Err(SpatialError::UnsupportedOperation(
                    "geo geometries relate only to points and rectangles".to_string(),
                ))
            }
        };
        let matrix = self.geometry.relate(&other);
        Ok(if !matrix.is_intersects() {
            SpatialRelation::Disjoint
        } else if matrix.is_within() {
            SpatialRelation::Within
        } else if matrix.is_contains() {
            SpatialRelation::Contains
        } else {
            SpatialRelation::Intersects
        })
    }

    fn has_area(&self) -> bool {
        self.geometry.unsigned_area() > 0.0
    }

    fn area(&self, _ctx: &SpatialContext) -> f64 {
        self.geometry.unsigned_area()
    }
}

/// Convert a rectangle, splitting it in two when it crosses the dateline.
fn rectangle_to_geometry(rect: &Rectangle) -> Geometry<f64> {
    let part = |min_x: f64, max_x: f64| {
        Rect::new(
            coord! { x: min_x, y: rect.min_y() },
            coord! { x: max_x, y: rect.max_y() },
        )
    };
    if rect.crosses_dateline() {
        Geometry::MultiPolygon(MultiPolygon::new(vec![
            part(rect.min_x(), 180.0).to_polygon(),
            part(-180.0, rect.max_x()).to_polygon(),
        ]))
    } else {
        Geometry::Rect(part(rect.min_x(), rect.max_x()))
    }
}
