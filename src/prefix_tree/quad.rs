use tinyvec::TinyVec;

use crate::context::SpatialContext;
use crate::error::{Result, SpatialError};
use crate::prefix_tree::{Cell, SpatialPrefixTree};
use crate::shape::{Point, Rectangle};

/// Default depth of a [`QuadPrefixTree`].
pub const DEFAULT_QUAD_MAX_LEVELS: usize = 12;

/// Deepest supported [`QuadPrefixTree`].
pub const MAX_QUAD_LEVELS: usize = 50;

/// Child symbols in order: north-west, north-east, south-west, south-east.
const SYMBOLS: [char; 4] = ['A', 'B', 'C', 'D'];

/// A grid that splits every cell into four quadrants.
///
/// Tokens use `A` (north-west), `B` (north-east), `C` (south-west) and `D` (south-east). A point
/// on a vertical split line belongs to the western cell, one on a horizontal split line to the
/// northern cell.
#[derive(Debug, Clone)]
pub struct QuadPrefixTree {
    context: SpatialContext,
    bounds: Rectangle,
    max_levels: usize,
    /// Cell width per level; index 0 is the whole grid.
    level_width: Vec<f64>,
    level_height: Vec<f64>,
}

impl QuadPrefixTree {
    /// Create a grid over the context's world bounds.
    pub fn new(context: SpatialContext, max_levels: usize) -> Result<Self> {
        let bounds = *context.world_bounds();
        Self::new_with_bounds(context, bounds, max_levels)
    }

    /// Create a grid over custom bounds.
    pub fn new_with_bounds(
        context: SpatialContext,
        bounds: Rectangle,
        max_levels: usize,
    ) -> Result<Self> {
        if !(1..=MAX_QUAD_LEVELS).contains(&max_levels) {
            return Err(SpatialError::InvalidArgument(format!(
                "quad tree levels must be in [1, {}], got {}",
                MAX_QUAD_LEVELS, max_levels
            )));
        }
        if bounds.is_empty() || bounds.crosses_dateline() || !bounds.has_area() {
            return Err(SpatialError::InvalidArgument(format!(
                "quad tree bounds must be a non-empty rectangle, got {:?}",
                bounds
            )));
        }

        let mut level_width = Vec::with_capacity(max_levels + 1);
        let mut level_height = Vec::with_capacity(max_levels + 1);
        let (mut width, mut height) = (bounds.width(), bounds.height());
        for _ in 0..=max_levels {
            level_width.push(width);
            level_height.push(height);
            width /= 2.0;
            height /= 2.0;
        }

        tracing::debug!(max_levels, ?bounds, "created quad prefix tree");
        Ok(Self {
            context,
            bounds,
            max_levels,
            level_width,
            level_height,
        })
    }

    /// The rectangle of the cell named by `token`.
    fn shape_for_token(&self, token: &str) -> Rectangle {
        assert!(
            token.len() <= self.max_levels,
            "token {:?} is deeper than {} levels",
            token,
            self.max_levels
        );
        let mut min_x = self.bounds.min_x();
        let mut min_y = self.bounds.min_y();
        for (i, symbol) in token.chars().enumerate() {
            let width = self.level_width[i + 1];
            let height = self.level_height[i + 1];
            match symbol {
                'A' => min_y += height,
                'B' => {
                    min_x += width;
                    min_y += height;
                }
                'C' => {}
                'D' => min_x += width,
                other => panic!("unexpected quad cell symbol {:?}", other),
            }
        }
        let level = token.len();
        Rectangle::new(
            min_x,
            min_x + self.level_width[level],
            min_y,
            min_y + self.level_height[level],
        )
    }
}

impl SpatialPrefixTree for QuadPrefixTree {
    fn context(&self) -> &SpatialContext {
        &self.context
    }

    fn max_levels(&self) -> usize {
        self.max_levels
    }

    fn world_cell(&self) -> Cell {
        Cell::new(String::new(), self.bounds)
    }

    fn cell_for_point(&self, point: &Point, level: usize) -> Cell {
        let level = level.min(self.max_levels);
        let mut token = String::with_capacity(level);
        let mut mid_x = self.bounds.min_x() + self.level_width[1];
        let mut mid_y = self.bounds.min_y() + self.level_height[1];
        for l in 1..=level {
            let half_width = self.level_width[l] / 2.0;
            let half_height = self.level_height[l] / 2.0;
            let west = point.x() <= mid_x;
            let north = point.y() >= mid_y;
            token.push(match (west, north) {
                (true, true) => 'A',
                (false, true) => 'B',
                (true, false) => 'C',
                (false, false) => 'D',
            });
            mid_x += if west { -half_width } else { half_width };
            mid_y += if north { half_height } else { -half_height };
        }
        let shape = self.shape_for_token(&token);
        Cell::new(token, shape)
    }

    fn cell_for_token(&self, token: &str) -> Cell {
        Cell::new(token.to_string(), self.shape_for_token(token))
    }

    fn sub_cells(&self, cell: &Cell) -> TinyVec<[Cell; 4]> {
        let level = cell.level() + 1;
        if level > self.max_levels {
            return TinyVec::new();
        }
        let width = self.level_width[level];
        let height = self.level_height[level];
        let parent = cell.shape();
        SYMBOLS
            .iter()
            .map(|&symbol| {
                let (min_x, min_y) = match symbol {
                    'A' => (parent.min_x(), parent.min_y() + height),
                    'B' => (parent.min_x() + width, parent.min_y() + height),
                    'C' => (parent.min_x(), parent.min_y()),
                    _ => (parent.min_x() + width, parent.min_y()),
                };
                let mut token = String::with_capacity(level);
                token.push_str(cell.token());
                token.push(symbol);
                Cell::new(
                    token,
                    Rectangle::new(min_x, min_x + width, min_y, min_y + height),
                )
            })
            .collect()
    }

    fn level_size(&self, level: usize) -> Result<(f64, f64)> {
        match (self.level_width.get(level), self.level_height.get(level)) {
            (Some(&width), Some(&height)) => Ok((width, height)),
            _ => Err(SpatialError::InvalidArgument(format!(
                "level must be in [0, {}], got {}",
                self.max_levels, level
            ))),
        }
    }

    fn level_for_distance(&self, distance: f64) -> usize {
        if distance == 0.0 {
            return self.max_levels;
        }
        (1..self.max_levels)
            .find(|&level| distance > self.level_width[level] && distance > self.level_height[level])
            .unwrap_or(self.max_levels)
    }
}

#[cfg(test)]
mod test {
    use super::*;

    fn planar_tree(levels: usize) -> QuadPrefixTree {
        let ctx = SpatialContext::planar(Rectangle::new(0., 16., 0., 16.)).unwrap();
        QuadPrefixTree::new(ctx, levels).unwrap()
    }

    #[test]
    fn rejects_bad_levels() {
        let ctx = SpatialContext::geo();
        assert!(QuadPrefixTree::new(ctx.clone(), 0).is_err());
        assert!(QuadPrefixTree::new(ctx.clone(), 51).is_err());
        assert!(QuadPrefixTree::new(ctx, 50).is_ok());
    }

    #[test]
    fn quadrant_symbols() {
        let tree = planar_tree(4);
        assert_eq!(
            tree.cell_for_token("A").shape(),
            &Rectangle::new(0., 8., 8., 16.)
        );
        assert_eq!(
            tree.cell_for_token("B").shape(),
            &Rectangle::new(8., 16., 8., 16.)
        );
        assert_eq!(
            tree.cell_for_token("C").shape(),
            &Rectangle::new(0., 8., 0., 8.)
        );
        assert_eq!(
            tree.cell_for_token("D").shape(),
            &Rectangle::new(8., 16., 0., 8.)
        );
        assert_eq!(
            tree.cell_for_token("DA").shape(),
            &Rectangle::new(8., 12., 4., 8.)
        );
    }

    #[test]
    fn sub_cells_match_tokens() {
        let tree = planar_tree(4);
        let parent = tree.cell_for_token("BC");
        let children = tree.sub_cells(&parent);
        assert_eq!(children.len(), 4);
        for child in children.iter() {
            assert_eq!(child, &tree.cell_for_token(child.token()));
            assert!(parent.is_prefix_of(child));
        }
        assert!(tree.sub_cells(&tree.cell_for_token("ABCD")).is_empty());
    }

    #[test]
    fn split_lines_go_west_and_north() {
        let tree = planar_tree(4);
        assert_eq!(tree.cell_for_point(&Point::new(8., 8.), 1).token(), "A");
        assert_eq!(tree.cell_for_point(&Point::new(8.1, 7.9), 1).token(), "D");
        assert_eq!(tree.cell_for_point(&Point::new(1., 1.), 3).token(), "CCC");
        assert_eq!(tree.cell_for_point(&Point::new(15., 15.), 2).token(), "BB");
        assert_eq!(tree.cell_for_point(&Point::new(1., 1.), 0).token(), "");
    }

    #[test]
    fn point_cell_contains_point() {
        let tree = planar_tree(6);
        let p = Point::new(5.3, 11.7);
        for level in 1..=6 {
            let cell = tree.cell_for_point(&p, level);
            assert_eq!(cell.level(), level);
            assert!(cell.shape().contains_xy(p.x(), p.y(), tree.context()));
        }
    }

    #[test]
    #[should_panic]
    fn unknown_symbol_panics() {
        let tree = planar_tree(4);
        let _ = tree.cell_for_token("AX");
    }

    #[test]
    fn level_for_distance() {
        let tree = planar_tree(4);
        // Level widths: 8, 4, 2, 1
        assert_eq!(tree.level_for_distance(0.), 4);
        assert_eq!(tree.level_for_distance(9.), 1);
        assert_eq!(tree.level_for_distance(8.), 2);
        assert_eq!(tree.level_for_distance(3.), 3);
        assert_eq!(tree.level_for_distance(0.5), 4);
        assert_eq!(tree.level_size(2).unwrap(), (4., 4.));
    }

    #[test]
    fn level_size_past_the_grid_is_rejected() {
        let tree = planar_tree(4);
        assert_eq!(tree.level_size(0).unwrap(), (16., 16.));
        assert_eq!(tree.level_size(4).unwrap(), (1., 1.));
        assert!(matches!(
            tree.level_size(5),
            Err(SpatialError::InvalidArgument(_))
        ));
    }

    #[test]
    fn distance_for_level() {
        let tree = planar_tree(4);
        let d = tree.distance_for_level(1).unwrap();
        assert!((d - (128f64).sqrt()).abs() < 1e-12);
        assert!(tree.distance_for_level(0).is_err());
        assert!(tree.distance_for_level(5).is_err());
    }

    #[test]
    fn geo_world_quadrants() {
        let tree = QuadPrefixTree::new(SpatialContext::geo(), 12).unwrap();
        assert_eq!(
            tree.cell_for_token("A").shape(),
            &Rectangle::new(-180., 0., 0., 90.)
        );
        assert_eq!(tree.level_size(1).unwrap(), (180., 90.));
        assert_eq!(
            tree.cell_for_point(&Point::new(-180., -90.), 2).token(),
            "CC"
        );
    }
}
