use tinyvec::TinyVec;

use crate::context::SpatialContext;
use crate::error::{Result, SpatialError};
use crate::geohash::{
    boundary, encode_with_precision, lookup_degrees_size_for_hash_len, sub_geohashes,
    MAX_PRECISION,
};
use crate::prefix_tree::{Cell, SpatialPrefixTree};
use crate::shape::Point;

/// Default depth of a [`GeohashPrefixTree`].
pub const DEFAULT_GEOHASH_MAX_LEVELS: usize = 12;

/// Deepest supported [`GeohashPrefixTree`].
pub const MAX_GEOHASH_LEVELS: usize = MAX_PRECISION;

/// A grid whose cells are geohashes: every cell has 32 children.
///
/// Only available in a geodetic context.
#[derive(Debug, Clone)]
pub struct GeohashPrefixTree {
    context: SpatialContext,
    max_levels: usize,
    /// Cell `(width, height)` per level; index 0 is the whole world.
    level_sizes: Vec<(f64, f64)>,
}

impl GeohashPrefixTree {
    pub fn new(context: SpatialContext, max_levels: usize) -> Result<Self> {
        if !context.is_geo() {
            return Err(SpatialError::InvalidArgument(
                "a geohash prefix tree requires a geodetic context".to_string(),
            ));
        }
        if !(1..=MAX_GEOHASH_LEVELS).contains(&max_levels) {
            return Err(SpatialError::InvalidArgument(format!(
                "geohash levels must be in [1, {}], got {}",
                MAX_GEOHASH_LEVELS, max_levels
            )));
        }
        let level_sizes = (0..=max_levels)
            .map(lookup_degrees_size_for_hash_len)
            .collect();
        tracing::debug!(max_levels, "created geohash prefix tree");
        Ok(Self {
            context,
            max_levels,
            level_sizes,
        })
    }
}

impl SpatialPrefixTree for GeohashPrefixTree {
    fn context(&self) -> &SpatialContext {
        &self.context
    }

    fn max_levels(&self) -> usize {
        self.max_levels
    }

    fn world_cell(&self) -> Cell {
        Cell::new(String::new(), *self.context.world_bounds())
    }

    fn cell_for_point(&self, point: &Point, level: usize) -> Cell {
        let level = level.min(self.max_levels);
        if level == 0 {
            return self.world_cell();
        }
        let hash = encode_with_precision(point.y(), point.x(), level);
        let shape = boundary(&hash);
        Cell::new(hash, shape)
    }

    fn cell_for_token(&self, token: &str) -> Cell {
        Cell::new(token.to_string(), boundary(token))
    }

    /// All 32 children are returned on the heap; the inline capacity only fits quad cells.
    fn sub_cells(&self, cell: &Cell) -> TinyVec<[Cell; 4]> {
        if cell.level() >= self.max_levels {
            return TinyVec::new();
        }
        sub_geohashes(cell.token())
            .map(|hash| {
                let shape = boundary(&hash);
                Cell::new(hash, shape)
            })
            .collect()
    }

    fn level_size(&self, level: usize) -> Result<(f64, f64)> {
        self.level_sizes.get(level).copied().ok_or_else(|| {
            SpatialError::InvalidArgument(format!(
                "level must be in [0, {}], got {}",
                self.max_levels, level
            ))
        })
    }

    fn level_for_distance(&self, distance: f64) -> usize {
        if distance == 0.0 {
            return self.max_levels;
        }
        (1..self.max_levels)
            .find(|&level| {
                let (width, height) = self.level_sizes[level];
                width < distance && height < distance
            })
            .unwrap_or(self.max_levels)
    }
}
