//! Hierarchical grids that turn shapes into cell tokens for an inverted index.
//!
//! A [`SpatialPrefixTree`] recursively partitions the world. Indexing a shape emits the tokens of
//! the cells covering it; a query shape is decomposed the same way and matched by token prefix.
//!
//! ```
//! use geo_prefix::prefix_tree::{QuadPrefixTree, SpatialPrefixTree};
//! use geo_prefix::{Shape, SpatialContext};
//!
//! let ctx = SpatialContext::geo();
//! let tree = QuadPrefixTree::new(ctx.clone(), 8).unwrap();
//! let circle = ctx.make_circle_xy(-73.98, 40.75, 0.5).unwrap();
//! let cells = tree.cells_for_shape(&Shape::from(circle), 6).unwrap();
//! assert!(!cells.is_empty());
//! ```

mod cell;
mod decompose;
mod factory;
mod geohash;
mod precision;
mod quad;
mod r#trait;

pub use cell::{Cell, LEAF_MARKER};
pub use decompose::CellsOptions;
pub use factory::{
    PrefixTreeConfig, PrefixTreeKind, DEFAULT_GEO_MAX_DETAIL_KM,
    DEFAULT_PLANAR_MAX_DETAIL_FRACTION,
};
pub use geohash::{GeohashPrefixTree, DEFAULT_GEOHASH_MAX_LEVELS, MAX_GEOHASH_LEVELS};
pub use precision::{calc_distance_from_err_pct, DEFAULT_DIST_ERR_PCT};
pub use quad::{QuadPrefixTree, DEFAULT_QUAD_MAX_LEVELS, MAX_QUAD_LEVELS};
pub use r#trait::SpatialPrefixTree;

#[cfg(feature = "rayon")]
use crate::error::Result;
#[cfg(feature = "rayon")]
use crate::shape::Shape;

/// Decompose many shapes in parallel. The output is in the same order as `shapes`.
#[cfg(feature = "rayon")]
pub fn par_cells_for_shapes(
    tree: &dyn SpatialPrefixTree,
    shapes: &[Shape],
    max_level: usize,
) -> Result<Vec<Vec<Cell>>> {
    use rayon::iter::{IntoParallelRefIterator, ParallelIterator};

    shapes
        .par_iter()
        .map(|shape| tree.cells_for_shape(shape, max_level))
        .collect()
}

#[cfg(all(test, feature = "rayon"))]
mod test {
    use super::*;
    use crate::context::SpatialContext;
    use crate::shape::{Point, Rectangle};

    #[test]
    fn parallel_matches_sequential() {
        let ctx = SpatialContext::geo();
        let tree = QuadPrefixTree::new(ctx.clone(), 10).unwrap();
        let shapes: Vec<Shape> = vec![
            Rectangle::new(-10., 10., -10., 10.).into(),
            Point::new(5., 5.).into(),
            ctx.make_circle_xy(100., 45., 3.).unwrap().into(),
        ];
        let parallel = par_cells_for_shapes(&tree, &shapes, 6).unwrap();
        for (shape, cells) in shapes.iter().zip(parallel) {
            assert_eq!(cells, tree.cells_for_shape(shape, 6).unwrap());
        }
    }
}
