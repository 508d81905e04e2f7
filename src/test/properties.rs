//! Randomized checks of invariants that must hold for any input.

use rand::rngs::StdRng;
use rand::Rng;

use crate::context::normalize::norm_point_deg;
use crate::context::SpatialContext;
use crate::geohash;
use crate::prefix_tree::{GeohashPrefixTree, QuadPrefixTree, SpatialPrefixTree};
use crate::shape::{Point, Rectangle, Shape};
use crate::test::{
    random_circle, random_edge_rectangle, random_point, random_rectangle, random_shape, rng,
    same_shape, sample_rectangle,
};
use crate::SpatialRelation;

fn random_location(rng: &mut StdRng) -> (f64, f64) {
    (rng.gen_range(-180.0..180.0), rng.gen_range(-90.0..90.0))
}

/// Whether `(x, y)` lies inside `query` away from its boundary.
fn strictly_inside(query: &Shape, x: f64, y: f64, ctx: &SpatialContext) -> bool {
    match query {
        Shape::Circle(circle) => ctx.calc_distance(&circle.center(), x, y) < circle.radius() - 1e-9,
        Shape::Rectangle(rect) => rect.contains_xy(x, y, ctx),
        _ => false,
    }
}

/// Whether `(x, y)` lies in `query`, allowing for rounding on a circle's boundary.
fn inside_or_on(query: &Shape, x: f64, y: f64, ctx: &SpatialContext) -> bool {
    match query {
        Shape::Circle(circle) => ctx.calc_distance(&circle.center(), x, y) <= circle.radius() + 1e-9,
        Shape::Rectangle(rect) => rect.contains_xy(x, y, ctx),
        _ => false,
    }
}

/// Whether `(x, y)` lies outside `query`, allowing for rounding on a circle's boundary.
fn outside_or_on(query: &Shape, x: f64, y: f64, ctx: &SpatialContext) -> bool {
    match query {
        Shape::Circle(circle) => ctx.calc_distance(&circle.center(), x, y) >= circle.radius() - 1e-9,
        Shape::Rectangle(rect) => !rect.contains_xy(x, y, ctx),
        _ => false,
    }
}

#[test]
fn relate_is_transposed_when_swapped() {
    let ctx = SpatialContext::geo();
    let mut rng = rng();
    for _ in 0..5000 {
        let a = random_shape(&mut rng, &ctx);
        let b = random_shape(&mut rng, &ctx);
        if same_shape(&a, &b, &ctx) {
            continue;
        }
        let ab = a.relate(&b, &ctx).unwrap();
        let ba = b.relate(&a, &ctx).unwrap();
        assert_eq!(ab, ba.transpose(), "{:?} vs {:?}", a, b);
    }
}

#[test]
fn shapes_relate_within_themselves() {
    let ctx = SpatialContext::geo();
    let mut rng = rng();
    for _ in 0..500 {
        let shape = random_shape(&mut rng, &ctx);
        if shape.is_empty() {
            continue;
        }
        assert_eq!(
            shape.relate(&shape, &ctx).unwrap(),
            SpatialRelation::Within,
            "{:?}",
            shape
        );
    }
}

#[test]
fn shapes_intersect_their_bounding_box() {
    let ctx = SpatialContext::geo();
    let mut rng = rng();
    for _ in 0..1000 {
        let shape = random_shape(&mut rng, &ctx);
        let bbox = Shape::Rectangle(shape.bounding_box());
        assert!(shape.relate(&bbox, &ctx).unwrap().intersects(), "{:?}", shape);
    }
}

#[test]
fn points_in_circle_are_in_its_bounding_box() {
    let ctx = SpatialContext::geo();
    let mut rng = rng();
    for _ in 0..200 {
        let circle = random_circle(&mut rng, &ctx);
        let bbox = circle.bounding_box();
        for _ in 0..100 {
            let (x, y) = random_location(&mut rng);
            let relation = circle.relate_point(&Point::new(x, y), &ctx);
            if circle.contains_xy(x, y, &ctx) {
                assert!(bbox.contains_xy(x, y, &ctx), "{:?} misses ({}, {})", circle, x, y);
                assert_eq!(relation, SpatialRelation::Contains);
            } else {
                assert_eq!(relation, SpatialRelation::Disjoint);
            }
        }
    }
}

#[test]
fn circle_bounding_box_covers_circle() {
    let ctx = SpatialContext::geo();
    let calc = ctx.distance_calculator();
    let mut rng = rng();
    for _ in 0..300 {
        let circle = random_circle(&mut rng, &ctx);
        let bbox = circle.bounding_box();
        for step in 0..24 {
            let bearing = step as f64 * 15.0;
            let edge = calc.point_on_bearing(
                &circle.center(),
                circle.radius() * 0.999,
                bearing,
                &ctx,
            );
            assert!(
                bbox.contains_xy(edge.x(), edge.y(), &ctx),
                "{:?} misses {:?}",
                circle,
                edge
            );
            assert!(circle.contains_xy(edge.x(), edge.y(), &ctx));
        }
    }
}

#[test]
fn planar_circle_bounding_box_covers_circle() {
    let ctx = SpatialContext::planar(Rectangle::new(-100., 100., -100., 100.)).unwrap();
    let calc = ctx.distance_calculator();
    let mut rng = rng();
    for _ in 0..100 {
        let center = Point::new(rng.gen_range(-50.0..50.0), rng.gen_range(-50.0..50.0));
        let circle = ctx.make_circle(&center, rng.gen_range(0.1..40.0)).unwrap();
        let bbox = circle.bounding_box();
        for step in 0..16 {
            let edge = calc.point_on_bearing(
                &center,
                circle.radius() * 0.999,
                step as f64 * 22.5,
                &ctx,
            );
            assert!(bbox.contains_xy(edge.x(), edge.y(), &ctx));
        }
    }
}

#[test]
fn normalized_points_are_in_range_and_stable() {
    let mut rng = rng();
    for _ in 0..1000 {
        let (x, y) = (rng.gen_range(-1000.0..1000.0), rng.gen_range(-1000.0..1000.0));
        let (lon, lat) = norm_point_deg(x, y);
        assert!((-180.0..=180.0).contains(&lon), "{} -> {}", x, lon);
        assert!((-90.0..=90.0).contains(&lat), "{} -> {}", y, lat);
        assert_eq!(norm_point_deg(lon, lat), (lon, lat));
    }
}

#[test]
fn geohash_cell_contains_encoded_point() {
    let mut rng = rng();
    for _ in 0..1000 {
        let (lon, lat) = random_location(&mut rng);
        let precision = rng.gen_range(1..=geohash::MAX_PRECISION);
        let hash = geohash::encode_with_precision(lat, lon, precision);
        assert_eq!(hash.len(), precision);
        let cell = geohash::decode_boundary(&hash).unwrap();
        assert!(
            cell.min_x() <= lon && lon <= cell.max_x() && cell.min_y() <= lat && lat <= cell.max_y(),
            "{} does not contain ({}, {})",
            hash,
            lon,
            lat
        );
    }
}

#[test]
fn geohash_center_encodes_back_to_hash() {
    let mut rng = rng();
    for _ in 0..500 {
        let (lon, lat) = random_location(&mut rng);
        let hash = geohash::encode_with_precision(lat, lon, rng.gen_range(1..=12));
        let (center_lat, center_lon) = geohash::decode(&hash).unwrap();
        assert_eq!(
            geohash::encode_with_precision(center_lat, center_lon, hash.len()),
            hash
        );
    }
}

#[test]
fn point_cells_contain_point() {
    let ctx = SpatialContext::geo();
    let quad = QuadPrefixTree::new(ctx.clone(), 20).unwrap();
    let geohash = GeohashPrefixTree::new(ctx.clone(), 8).unwrap();
    let trees: [&dyn SpatialPrefixTree; 2] = [&quad, &geohash];
    let mut rng = rng();
    for _ in 0..500 {
        let (x, y) = random_location(&mut rng);
        let point = Point::new(x, y);
        for tree in trees {
            let level = rng.gen_range(1..=tree.max_levels());
            let cells = tree
                .cells_for_shape(&Shape::Point(point), level)
                .unwrap();
            assert_eq!(cells.len(), 1);
            assert_eq!(cells[0].level(), level);
            assert!(cells[0].shape().contains_xy(x, y, &ctx));
        }
    }
}

/// The cells of a decomposition form disjoint subtrees that together cover every location of
/// the query, and covered cells lie inside it.
fn check_decomposition(tree: &dyn SpatialPrefixTree, max_level: usize, queries: usize) {
    let ctx = tree.context().clone();
    let mut rng = rng();
    for _ in 0..queries {
        let query: Shape = match rng.gen_range(0..3) {
            0 => random_rectangle(&mut rng, &ctx).into(),
            1 => random_edge_rectangle(&mut rng, &ctx).into(),
            _ => random_circle(&mut rng, &ctx).into(),
        };
        let cells = tree.cells_for_shape(&query, max_level).unwrap();

        let mut tokens: Vec<&str> = cells.iter().map(|cell| cell.token()).collect();
        tokens.sort_unstable();
        for pair in tokens.windows(2) {
            assert!(
                !pair[1].starts_with(pair[0]),
                "{} overlaps {} for {:?}",
                pair[0],
                pair[1],
                query
            );
        }

        for cell in &cells {
            assert!(cell.is_leaf());
            assert!(cell.level() <= max_level);
            if !cell.is_covered() {
                continue;
            }
            for (x, y) in sample_rectangle(&mut rng, cell.shape(), 8) {
                assert!(
                    inside_or_on(&query, x, y, &ctx),
                    "covered cell {} has ({}, {}) outside {:?}",
                    cell.token(),
                    x,
                    y,
                    query
                );
            }
        }

        for _ in 0..300 {
            let (x, y) = random_location(&mut rng);
            if strictly_inside(&query, x, y, &ctx) {
                assert!(
                    cells.iter().any(|cell| cell.shape().contains_xy(x, y, &ctx)),
                    "({}, {}) inside {:?} but not covered",
                    x,
                    y,
                    query
                );
            }
        }
    }
}

#[test]
fn quad_decomposition_covers_query() {
    let tree = QuadPrefixTree::new(SpatialContext::geo(), 8).unwrap();
    check_decomposition(&tree, 5, 60);
}

#[test]
fn geohash_decomposition_covers_query() {
    let tree = GeohashPrefixTree::new(SpatialContext::geo(), 6).unwrap();
    check_decomposition(&tree, 2, 45);
}

/// Check a `Contains` or `Disjoint` answer for `rect` against locations sampled on it.
fn check_rectangle_relation(
    rng: &mut StdRng,
    query: &Shape,
    rect: &Rectangle,
    relation: SpatialRelation,
    ctx: &SpatialContext,
) {
    for (x, y) in sample_rectangle(rng, rect, 16) {
        match relation {
            SpatialRelation::Contains => assert!(
                inside_or_on(query, x, y, ctx),
                "{:?} contains {:?} but not ({}, {})",
                query,
                rect,
                x,
                y
            ),
            SpatialRelation::Disjoint => assert!(
                outside_or_on(query, x, y, ctx),
                "{:?} is disjoint from {:?} but holds ({}, {})",
                query,
                rect,
                x,
                y
            ),
            SpatialRelation::Within | SpatialRelation::Intersects => {}
        }
    }
}

#[test]
fn circle_rectangle_relation_is_sound() {
    let ctx = SpatialContext::geo();
    let mut rng = rng();
    for _ in 0..20_000 {
        let radius = rng.gen_range(0..=150) as f64;
        let circle = ctx.make_circle(&random_point(&mut rng), radius).unwrap();
        let rect = if rng.gen_bool(0.5) {
            random_edge_rectangle(&mut rng, &ctx)
        } else {
            random_rectangle(&mut rng, &ctx)
        };
        let relation = circle.relate_rectangle(&rect, &ctx);
        check_rectangle_relation(&mut rng, &Shape::Circle(circle), &rect, relation, &ctx);
    }
}

#[test]
fn rectangle_relation_is_sound() {
    let ctx = SpatialContext::geo();
    let mut rng = rng();
    for _ in 0..10_000 {
        let a = random_edge_rectangle(&mut rng, &ctx);
        let b = random_edge_rectangle(&mut rng, &ctx);
        let relation = a.relate_rectangle(&b, &ctx);
        check_rectangle_relation(&mut rng, &Shape::Rectangle(a), &b, relation, &ctx);
    }
}
