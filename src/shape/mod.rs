//! Shapes and the relation algebra between them.
//!
//! Every shape can report its bounding box, center, area and how it relates to any other shape
//! through [`Shape::relate`]. Binary relations are dispatched on the left operand; when it does
//! not know the right one it asks the other side and transposes the answer.

mod arena;
mod circle;
mod collection;
mod external;
#[cfg(feature = "use-geo_0_31")]
mod geo;
mod point;
pub(crate) mod rectangle;

pub use arena::{RectangleArena, SlotId};
pub use circle::Circle;
pub use collection::ShapeCollection;
pub use external::{ExternalGeometry, GeometryEngine};
#[cfg(feature = "use-geo_0_31")]
pub use geo::GeoGeometry;
pub use point::Point;
pub use rectangle::Rectangle;

use crate::context::SpatialContext;
use crate::error::{Result, SpatialError};
use crate::relation::SpatialRelation;

/// Any shape supported by this crate.
#[derive(Debug, Clone)]
pub enum Shape {
    Point(Point),
    Rectangle(Rectangle),
    Circle(Circle),
    Collection(ShapeCollection),
    External(ExternalGeometry),
}

impl Shape {
    /// How `self` relates to `other`.
    pub fn relate(&self, other: &Shape, ctx: &SpatialContext) -> Result<SpatialRelation> {
        match self {
            Shape::Point(point) => point.relate(other, ctx),
            Shape::Rectangle(rect) => rect.relate(other, ctx),
            Shape::Circle(circle) => circle.relate(other, ctx),
            Shape::Collection(collection) => collection.relate(other, ctx),
            Shape::External(external) => {
                if external.engine().is_empty() || other.is_empty() {
                    return Ok(SpatialRelation::Disjoint);
                }
                external.engine().relate(other, ctx)
            }
        }
    }

    pub fn bounding_box(&self) -> Rectangle {
        match self {
            Shape::Point(point) => point.bounding_box(),
            Shape::Rectangle(rect) => *rect,
            Shape::Circle(circle) => circle.bounding_box(),
            Shape::Collection(collection) => collection.bounding_box(),
            Shape::External(external) => external.engine().bounding_box(),
        }
    }

    pub fn has_area(&self) -> bool {
        match self {
            Shape::Point(_) => false,
            Shape::Rectangle(rect) => rect.has_area(),
            Shape::Circle(circle) => circle.has_area(),
            Shape::Collection(collection) => collection.has_area(),
            Shape::External(external) => external.engine().has_area(),
        }
    }

    pub fn center(&self) -> Point {
        match self {
            Shape::Point(point) => *point,
            Shape::Rectangle(rect) => rect.center(),
            Shape::Circle(circle) => circle.center(),
            Shape::Collection(collection) => collection.bounding_box().center(),
            Shape::External(external) => external.engine().center(),
        }
    }

    pub fn is_empty(&self) -> bool {
        match self {
            Shape::Point(point) => point.is_empty(),
            Shape::Rectangle(rect) => rect.is_empty(),
            Shape::Circle(circle) => circle.is_empty(),
            Shape::Collection(collection) => collection.is_empty(),
            Shape::External(external) => external.engine().is_empty(),
        }
    }

    /// The area in the units of the context's distance calculator.
    pub fn area(&self, ctx: &SpatialContext) -> f64 {
        let calculator = ctx.distance_calculator();
        match self {
            Shape::Point(_) => 0.0,
            Shape::Rectangle(rect) => calculator.area_rectangle(rect),
            Shape::Circle(circle) => calculator.area_circle(circle),
            Shape::Collection(collection) => collection.area(ctx),
            Shape::External(external) => external.engine().area(ctx),
        }
    }

    /// The shape grown outward by `distance`. A point becomes a circle.
    pub fn buffered(&self, distance: f64, ctx: &SpatialContext) -> Result<Shape> {
        match self {
            Shape::Point(point) => Ok(Circle::new(*point, distance, ctx)?.into()),
            Shape::Rectangle(rect) => Ok(rect.buffered(distance, ctx)?.into()),
            Shape::Circle(circle) => Ok(circle.buffered(distance, ctx)?.into()),
            Shape::Collection(_) => Err(SpatialError::UnsupportedOperation(
                "buffering a shape collection".to_string(),
            )),
            Shape::External(_) => Err(SpatialError::UnsupportedOperation(
                "buffering an external geometry".to_string(),
            )),
        }
    }
}

impl From<Point> for Shape {
    fn from(value: Point) -> Self {
        Shape::Point(value)
    }
}

impl From<Rectangle> for Shape {
    fn from(value: Rectangle) -> Self {
        Shape::Rectangle(value)
    }
}

impl From<Circle> for Shape {
    fn from(value: Circle) -> Self {
        Shape::Circle(value)
    }
}

impl From<ShapeCollection> for Shape {
    fn from(value: ShapeCollection) -> Self {
        Shape::Collection(value)
    }
}

impl From<ExternalGeometry> for Shape {
    fn from(value: ExternalGeometry) -> Self {
        Shape::External(value)
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn point_buffers_into_circle() {
        let ctx = SpatialContext::geo();
        let shape = Shape::from(Point::new(10., 10.)).buffered(2., &ctx).unwrap();
        match shape {
            Shape::Circle(circle) => {
                assert_eq!(circle.center(), Point::new(10., 10.));
                assert_eq!(circle.radius(), 2.);
            }
            other => panic!("expected a circle, got {:?}", other),
        }
    }

    #[test]
    fn collection_buffering_is_unsupported() {
        let ctx = SpatialContext::geo();
        let shape = Shape::from(ctx.make_collection(vec![Point::new(1., 1.).into()]));
        let err = shape.buffered(1., &ctx).unwrap_err();
        assert!(matches!(err, SpatialError::UnsupportedOperation(_)));
    }

    #[test]
    fn empty_shapes_are_disjoint() {
        let ctx = SpatialContext::geo();
        let empty = Shape::from(Rectangle::empty());
        let rect = Shape::from(Rectangle::new(0., 1., 0., 1.));
        assert!(empty.is_empty());
        assert_eq!(
            empty.relate(&rect, &ctx).unwrap(),
            SpatialRelation::Disjoint
        );
        assert_eq!(
            rect.relate(&empty, &ctx).unwrap(),
            SpatialRelation::Disjoint
        );
    }

    #[test]
    fn areas() {
        let ctx = SpatialContext::geo();
        assert_eq!(Shape::from(Point::new(0., 0.)).area(&ctx), 0.);
        let rect = Shape::from(Rectangle::new(0., 10., -5., 5.));
        assert!(rect.area(&ctx) > 0.);
        assert!(rect.area(&ctx) < 100.);
        assert!(rect.has_area());
        assert!(!Shape::from(Rectangle::new(0., 0., -5., 5.)).has_area());
    }
}
