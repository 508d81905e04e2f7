mod properties;

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use crate::context::normalize::norm_lon_deg;
use crate::context::SpatialContext;
use crate::shape::{Circle, Point, Rectangle, Shape};

/// A seeded generator so that failures reproduce.
pub(crate) fn rng() -> StdRng {
    StdRng::seed_from_u64(0x5eed_1234)
}

/// A random geodetic point on integer degrees.
pub(crate) fn random_point(rng: &mut StdRng) -> Point {
    Point::new(
        rng.gen_range(-180..=180) as f64,
        rng.gen_range(-90..=90) as f64,
    )
}

/// A random geodetic rectangle on integer degrees, crossing the dateline about half of the time.
/// Edges avoid the dateline itself so that equal ranges have a single representation.
pub(crate) fn random_rectangle(rng: &mut StdRng, ctx: &SpatialContext) -> Rectangle {
    if rng.gen_ratio(1, 20) {
        return Rectangle::world_geo();
    }
    let min_x = rng.gen_range(-179..=179) as f64;
    let max_x = rng.gen_range(-179..=179) as f64;
    let a = rng.gen_range(-90..=90) as f64;
    let b = rng.gen_range(-90..=90) as f64;
    ctx.make_rectangle(min_x, max_x, a.min(b), a.max(b))
        .unwrap()
}

/// A random geodetic rectangle whose edges often lie on the dateline or a pole.
pub(crate) fn random_edge_rectangle(rng: &mut StdRng, ctx: &SpatialContext) -> Rectangle {
    fn edge_or_inner(rng: &mut StdRng, edge: f64) -> f64 {
        let inner = edge.abs() as i32 - 1;
        if rng.gen_ratio(1, 3) {
            if rng.gen_bool(0.5) {
                edge
            } else {
                -edge
            }
        } else {
            rng.gen_range(-inner..=inner) as f64
        }
    }
    let min_x = edge_or_inner(rng, 180.);
    let max_x = edge_or_inner(rng, 180.);
    let a = edge_or_inner(rng, 90.);
    let b = edge_or_inner(rng, 90.);
    ctx.make_rectangle(min_x, max_x, a.min(b), a.max(b))
        .unwrap()
}

/// Locations on the corners and edges of `rect`, plus `interior` random ones inside it.
pub(crate) fn sample_rectangle(
    rng: &mut StdRng,
    rect: &Rectangle,
    interior: usize,
) -> Vec<(f64, f64)> {
    let at = |tx: f64, ty: f64| {
        (
            norm_lon_deg(rect.min_x() + rect.width() * tx),
            rect.min_y() + rect.height() * ty,
        )
    };
    let mut locations = Vec::with_capacity(32 + interior);
    for step in 0..=8 {
        let t = step as f64 / 8.0;
        locations.extend([at(t, 0.), at(t, 1.), at(0., t), at(1., t)]);
    }
    for _ in 0..interior {
        locations.push(at(rng.gen_range(0.0..=1.0), rng.gen_range(0.0..=1.0)));
    }
    locations
}

/// A random geodetic circle with an integer center and radius.
pub(crate) fn random_circle(rng: &mut StdRng, ctx: &SpatialContext) -> Circle {
    let center = random_point(rng);
    let radius = rng.gen_range(0..=60) as f64;
    ctx.make_circle(&center, radius).unwrap()
}

pub(crate) fn random_shape(rng: &mut StdRng, ctx: &SpatialContext) -> Shape {
    match rng.gen_range(0..3) {
        0 => random_point(rng).into(),
        1 => random_rectangle(rng, ctx).into(),
        _ => random_circle(rng, ctx).into(),
    }
}

/// Whether two shapes are the same value. Relations between equal shapes are `Within` both
/// ways, so they are excluded from symmetry checks.
pub(crate) fn same_shape(a: &Shape, b: &Shape, ctx: &SpatialContext) -> bool {
    match (a, b) {
        (Shape::Point(a), Shape::Point(b)) => a.coincides(b, ctx),
        (Shape::Rectangle(a), Shape::Rectangle(b)) => a == b,
        (Shape::Circle(a), Shape::Circle(b)) => {
            a.radius() == b.radius() && a.center().coincides(&b.center(), ctx)
        }
        _ => false,
    }
}
