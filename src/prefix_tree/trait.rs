use std::fmt::Debug;

use tinyvec::TinyVec;

use crate::context::SpatialContext;
use crate::error::{Result, SpatialError};
use crate::prefix_tree::decompose::{decompose, CellsOptions};
use crate::prefix_tree::precision::calc_distance_from_err_pct;
use crate::prefix_tree::Cell;
use crate::shape::{Point, Shape};

/// A hierarchical grid over the world of a [`SpatialContext`].
///
/// Each level splits every cell of the previous level into a fixed number of children. Cells
/// are named by tokens, so the token of a cell is a prefix of the tokens of all its
/// descendants.
pub trait SpatialPrefixTree: Debug + Send + Sync {
    /// The context whose world this grid covers.
    fn context(&self) -> &SpatialContext;

    /// The deepest level of this grid.
    fn max_levels(&self) -> usize;

    /// The level 0 cell covering the whole grid.
    fn world_cell(&self) -> Cell;

    /// The cell at `level` containing `point`.
    fn cell_for_point(&self, point: &Point, level: usize) -> Cell;

    /// The cell named by `token`.
    ///
    /// # Panics
    ///
    /// Panics if the token contains a symbol this grid does not use.
    fn cell_for_token(&self, token: &str) -> Cell;

    /// The children of `cell`, in symbol order. Empty at the deepest level.
    fn sub_cells(&self, cell: &Cell) -> TinyVec<[Cell; 4]>;

    /// The `(width, height)` of cells at `level`. Levels deeper than
    /// [`max_levels`](Self::max_levels) are rejected.
    fn level_size(&self, level: usize) -> Result<(f64, f64)>;

    /// The coarsest level whose cells fit within `distance` on both axes, or
    /// [`max_levels`](Self::max_levels) when none does. A distance of zero asks for full
    /// precision.
    fn level_for_distance(&self, distance: f64) -> usize;

    /// The diagonal of the cell at `level` that contains the center of the world.
    fn distance_for_level(&self, level: usize) -> Result<f64> {
        if level < 1 || level > self.max_levels() {
            return Err(SpatialError::InvalidArgument(format!(
                "level must be in [1, {}], got {}",
                self.max_levels(),
                level
            )));
        }
        let center = self.context().world_bounds().center();
        let cell = self.cell_for_point(&center, level);
        let (width, height) = (cell.shape().width(), cell.shape().height());
        Ok((width * width + height * height).sqrt())
    }

    /// The level to decompose `shape` at so that the error is at most `dist_err_pct` of its
    /// size.
    fn max_level_for_precision(&self, shape: &Shape, dist_err_pct: f64) -> Result<usize> {
        let distance = calc_distance_from_err_pct(shape, dist_err_pct, self.context())?;
        Ok(self.level_for_distance(distance))
    }

    /// Cover `shape` with cells down to `max_level`.
    fn cells_for_shape(&self, shape: &Shape, max_level: usize) -> Result<Vec<Cell>> {
        self.cells_for_shape_with(shape, max_level, CellsOptions::default())
    }

    /// Cover `shape` with cells down to `max_level`.
    ///
    /// A point follows a single path down the grid. Every other shape is decomposed
    /// recursively: disjoint cells are pruned, cells within the shape become covered leaves and
    /// cells still intersecting at `max_level` become uncovered leaves.
    fn cells_for_shape_with(
        &self,
        shape: &Shape,
        max_level: usize,
        options: CellsOptions,
    ) -> Result<Vec<Cell>> {
        if max_level > self.max_levels() {
            return Err(SpatialError::InvalidArgument(format!(
                "max_level {} exceeds the grid depth {}",
                max_level,
                self.max_levels()
            )));
        }
        if shape.is_empty() {
            return Ok(vec![]);
        }
        if let Shape::Point(point) = shape {
            let world = self.world_cell();
            if !world
                .shape()
                .contains_xy(point.x(), point.y(), self.context())
            {
                return Ok(vec![]);
            }
            return Ok(self.cells_for_point(point, max_level, options.include_parents));
        }

        let cells = decompose(self, shape, max_level, options)?;
        tracing::debug!(
            max_level,
            cells = cells.len(),
            include_parents = options.include_parents,
            simplify = options.simplify,
            "decomposed shape into grid cells"
        );
        Ok(cells)
    }

    /// The cells on the path from the root to the cell at `max_level` containing `point`. The
    /// last cell is a leaf. Without `include_parents` only that leaf is returned.
    fn cells_for_point(&self, point: &Point, max_level: usize, include_parents: bool) -> Vec<Cell> {
        let mut leaf = self.cell_for_point(point, max_level);
        leaf.set_leaf(false);
        if !include_parents {
            return vec![leaf];
        }
        let mut cells: Vec<Cell> = (1..max_level)
            .map(|level| self.cell_for_token(&leaf.token()[..level]))
            .collect();
        cells.push(leaf);
        cells
    }
}
