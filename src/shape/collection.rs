use crate::context::normalize::norm_lon_deg;
use crate::context::SpatialContext;
use crate::error::Result;
use crate::relation::SpatialRelation;
use crate::shape::{Rectangle, Shape};

/// An ordered group of shapes relating as their union.
#[derive(Debug, Clone)]
pub struct ShapeCollection {
    shapes: Vec<Shape>,
    bounding_box: Rectangle,
}

impl ShapeCollection {
    /// Create a new collection. The bounding box is computed eagerly; in a geodetic context it
    /// is the narrowest longitude range covering every member.
    pub fn new(shapes: Vec<Shape>, ctx: &SpatialContext) -> Self {
        let bounding_box = compute_bounding_box(&shapes, ctx);
        Self {
            shapes,
            bounding_box,
        }
    }

    pub fn shapes(&self) -> &[Shape] {
        &self.shapes
    }

    pub fn len(&self) -> usize {
        self.shapes.len()
    }

    /// Returns `true` if there are no members or every member is empty.
    pub fn is_empty(&self) -> bool {
        self.shapes.iter().all(Shape::is_empty)
    }

    pub fn bounding_box(&self) -> Rectangle {
        self.bounding_box
    }

    pub fn has_area(&self) -> bool {
        self.shapes.iter().any(Shape::has_area)
    }

    /// The sum of the member areas. Overlapping members are counted twice.
    pub fn area(&self, ctx: &SpatialContext) -> f64 {
        self.shapes.iter().map(|shape| shape.area(ctx)).sum()
    }

    /// Relate the union of the members to `other`.
    ///
    /// The bounding box is tested first. Members are then folded with
    /// [`SpatialRelation::combine`], stopping as soon as the answer cannot change.
    pub fn relate(&self, other: &Shape, ctx: &SpatialContext) -> Result<SpatialRelation> {
        if self.is_empty() || other.is_empty() {
            return Ok(SpatialRelation::Disjoint);
        }
        let bbox_rel = self.bounding_box.relate(other, ctx)?;
        if matches!(
            bbox_rel,
            SpatialRelation::Disjoint | SpatialRelation::Within
        ) {
            return Ok(bbox_rel);
        }

        let mut accumulated: Option<SpatialRelation> = None;
        for shape in self.shapes.iter().filter(|shape| !shape.is_empty()) {
            let rel = shape.relate(other, ctx)?;
            let combined = match accumulated {
                Some(acc) => acc.combine(rel),
                None => rel,
            };
            // One member containing the other shape is enough
            if matches!(
                combined,
                SpatialRelation::Intersects | SpatialRelation::Contains
            ) {
                return Ok(combined);
            }
            accumulated = Some(combined);
        }
        Ok(accumulated.unwrap_or(SpatialRelation::Disjoint))
    }
}

/// A longitude range as a start and an eastward width.
#[derive(Debug, Clone, Copy)]
struct LonRange {
    min: f64,
    width: f64,
}

impl LonRange {
    const WORLD: LonRange = LonRange {
        min: -180.0,
        width: 360.0,
    };

    fn of(rect: &Rectangle) -> Self {
        Self {
            min: rect.min_x(),
            width: rect.width(),
        }
    }

    /// The narrowest range covering both `self` and `other`.
    fn expand(self, other: LonRange) -> LonRange {
        if self.width >= 360.0 || other.width >= 360.0 {
            return Self::WORLD;
        }
        let east = |from: f64, to: f64| (to - from).rem_euclid(360.0);
        let from_self = self.width.max(east(self.min, other.min) + other.width);
        let from_other = other.width.max(east(other.min, self.min) + self.width);
        let expanded = if from_self <= from_other {
            LonRange {
                min: self.min,
                width: from_self,
            }
        } else {
            LonRange {
                min: other.min,
                width: from_other,
            }
        };
        if expanded.width >= 360.0 {
            Self::WORLD
        } else {
            expanded
        }
    }
}

fn compute_bounding_box(shapes: &[Shape], ctx: &SpatialContext) -> Rectangle {
    let mut boxes = shapes
        .iter()
        .filter(|shape| !shape.is_empty())
        .map(Shape::bounding_box);
    let Some(first) = boxes.next() else {
        return Rectangle::empty();
    };

    let mut min_y = first.min_y();
    let mut max_y = first.max_y();
    if !ctx.is_geo() {
        let mut min_x = first.min_x();
        let mut max_x = first.max_x();
        for rect in boxes {
            min_x = min_x.min(rect.min_x());
            max_x = max_x.max(rect.max_x());
            min_y = min_y.min(rect.min_y());
            max_y = max_y.max(rect.max_y());
        }
        return Rectangle::new(min_x, max_x, min_y, max_y);
    }

    let mut lon = LonRange::of(&first);
    for rect in boxes {
        lon = lon.expand(LonRange::of(&rect));
        min_y = min_y.min(rect.min_y());
        max_y = max_y.max(rect.max_y());
    }
    if lon.width >= 360.0 {
        return Rectangle::new(-180.0, 180.0, min_y, max_y);
    }
    Rectangle::geo_canonical(lon.min, norm_lon_deg(lon.min + lon.width), min_y, max_y)
}
