//! Recursive decomposition of a shape into grid cells.

use crate::error::Result;
use crate::prefix_tree::{Cell, SpatialPrefixTree};
use crate::relation::SpatialRelation;
use crate::shape::Shape;

/// Options for [`SpatialPrefixTree::cells_for_shape_with`].
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct CellsOptions {
    /// Also emit the non-leaf cells visited on the way down, each before its descendants.
    pub include_parents: bool,
    /// Replace a parent whose children all ended up as leaves by the parent itself.
    pub simplify: bool,
}

/// What visiting a cell produced.
enum Visit {
    Pruned,
    Leaf { covered: bool },
    Branch,
}

/// Emit cells for `shape` in depth-first order, children in symbol order.
pub(crate) fn decompose<T: SpatialPrefixTree + ?Sized>(
    tree: &T,
    shape: &Shape,
    max_level: usize,
    options: CellsOptions,
) -> Result<Vec<Cell>> {
    let mut cells = Vec::new();
    visit(tree, tree.world_cell(), shape, max_level, options, &mut cells)?;
    Ok(cells)
}

fn visit<T: SpatialPrefixTree + ?Sized>(
    tree: &T,
    mut cell: Cell,
    shape: &Shape,
    max_level: usize,
    options: CellsOptions,
    out: &mut Vec<Cell>,
) -> Result<Visit> {
    let relation = cell.shape().relate(shape, tree.context())?;
    tracing::trace!(token = cell.token(), ?relation, "visit cell");
    match relation {
        SpatialRelation::Disjoint => return Ok(Visit::Pruned),
        SpatialRelation::Within => {
            cell.set_leaf(true);
            out.push(cell);
            return Ok(Visit::Leaf { covered: true });
        }
        SpatialRelation::Contains | SpatialRelation::Intersects if cell.level() >= max_level => {
            cell.set_leaf(false);
            out.push(cell);
            return Ok(Visit::Leaf { covered: false });
        }
        SpatialRelation::Contains | SpatialRelation::Intersects => {}
    }

    let children = tree.sub_cells(&cell);
    let emits_parent = options.include_parents && cell.level() > 0;
    // Where this cell's output starts
    let start = out.len();
    if emits_parent {
        out.push(cell.clone());
    }

    let num_children = children.len();
    let mut leaves = 0;
    let mut all_covered = true;
    for child in children {
        if let Visit::Leaf { covered } = visit(tree, child, shape, max_level, options, out)? {
            leaves += 1;
            all_covered &= covered;
        }
    }

    if options.simplify && cell.level() > 0 && num_children > 0 && leaves == num_children {
        out.truncate(start);
        cell.set_leaf(all_covered);
        out.push(cell);
        return Ok(Visit::Leaf {
            covered: all_covered,
        });
    }
    Ok(Visit::Branch)
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::context::SpatialContext;
    use crate::prefix_tree::QuadPrefixTree;
    use crate::shape::Rectangle;

    fn tree() -> QuadPrefixTree {
        let ctx = SpatialContext::planar(Rectangle::new(0., 16., 0., 16.)).unwrap();
        QuadPrefixTree::new(ctx, 4).unwrap()
    }

    fn tokens(cells: &[Cell]) -> Vec<String> {
        cells.iter().map(Cell::index_term).collect()
    }

    #[test]
    fn world_query_yields_covered_root() {
        let tree = tree();
        let query = Shape::from(Rectangle::new(0., 16., 0., 16.));
        let cells = tree.cells_for_shape(&query, 4).unwrap();
        assert_eq!(tokens(&cells), vec!["+"]);
        assert!(cells[0].is_covered());
    }

    #[test]
    fn quadrant_query_includes_touching_neighbours() {
        let tree = tree();
        let query = Shape::from(Rectangle::new(0., 8., 8., 16.));
        let cells = tree.cells_for_shape(&query, 4).unwrap();
        assert_eq!(cells[0].index_term(), "A+");
        assert!(cells[0].is_covered());

        // Cells sharing the x = 8 or y = 8 edge: a column in "B", a row in "C" and one corner
        // cell in "D"
        assert_eq!(cells.len(), 1 + 8 + 8 + 1);
        for cell in &cells[1..] {
            assert_eq!(cell.level(), 4);
            assert!(cell.is_leaf() && !cell.is_covered());
            let rect = cell.shape();
            assert!(rect.min_x() == 8. || rect.max_y() == 8.);
        }
        assert!(cells[1].token().starts_with('B'));
        assert!(cells[17].token().starts_with('D'));
    }

    #[test]
    fn max_level_zero_returns_root() {
        let tree = tree();
        let query = Shape::from(Rectangle::new(1., 2., 1., 2.));
        let cells = tree.cells_for_shape(&query, 0).unwrap();
        assert_eq!(cells.len(), 1);
        assert_eq!(cells[0].level(), 0);
        assert!(cells[0].is_leaf());
        assert!(!cells[0].is_covered());
    }

    #[test]
    fn include_parents_precede_children() {
        let tree = tree();
        // A small box inside the lower left level 2 cell "CC"
        let query = Shape::from(Rectangle::new(0.5, 1.5, 0.5, 1.5));
        let options = CellsOptions {
            include_parents: true,
            simplify: false,
        };
        let cells = tree.cells_for_shape_with(&query, 2, options).unwrap();
        assert_eq!(tokens(&cells), vec!["C", "CC+"]);
        assert!(!cells[0].is_leaf());
        assert!(!cells[1].is_covered());
    }

    #[test]
    fn simplify_merges_parent_with_all_children_as_leaves() {
        let tree = tree();
        // Centered on "C", intersecting all four of its children
        let query = Shape::from(Rectangle::new(3., 5., 3., 5.));
        let plain = tree.cells_for_shape(&query, 2).unwrap();
        assert_eq!(tokens(&plain), vec!["CA+", "CB+", "CC+", "CD+"]);

        let options = CellsOptions {
            include_parents: true,
            simplify: true,
        };
        let cells = tree.cells_for_shape_with(&query, 2, options).unwrap();
        assert_eq!(tokens(&cells), vec!["C+"]);
        assert!(!cells[0].is_covered());
    }

    #[test]
    fn simplify_keeps_parent_with_pruned_children() {
        let tree = tree();
        let query = Shape::from(Rectangle::new(3., 5., 1., 2.));
        let options = CellsOptions {
            include_parents: false,
            simplify: true,
        };
        let cells = tree.cells_for_shape_with(&query, 2, options).unwrap();
        assert_eq!(tokens(&cells), vec!["CC+", "CD+"]);
    }

    #[test]
    fn simplify_never_merges_the_root() {
        let tree = tree();
        let query = Shape::from(Rectangle::new(7., 9., 7., 9.));
        let options = CellsOptions {
            include_parents: false,
            simplify: true,
        };
        let cells = tree.cells_for_shape_with(&query, 1, options).unwrap();
        assert_eq!(tokens(&cells), vec!["A+", "B+", "C+", "D+"]);
    }

    #[test]
    fn disjoint_query_is_empty() {
        let tree = tree();
        let query = Shape::from(Rectangle::new(20., 30., 20., 30.));
        assert!(tree.cells_for_shape(&query, 4).unwrap().is_empty());
    }
}
