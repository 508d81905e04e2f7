use crate::shape::Rectangle;

/// Appended to the token of a leaf cell to form its index term.
pub const LEAF_MARKER: char = '+';

/// A node of a grid: a token naming its path from the root, and its rectangle.
///
/// The level of a cell is the length of its token. Cells produced by a decomposition also carry
/// whether they are leaves and, for leaves, whether the query shape covers them completely.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Cell {
    token: String,
    shape: Rectangle,
    leaf: bool,
    covered: bool,
}

impl Cell {
    pub fn new(token: String, shape: Rectangle) -> Self {
        Self {
            token,
            shape,
            leaf: false,
            covered: false,
        }
    }

    /// The path from the root, one symbol per level.
    pub fn token(&self) -> &str {
        &self.token
    }

    pub fn into_token(self) -> String {
        self.token
    }

    /// The level of this cell. The root is level 0.
    pub fn level(&self) -> usize {
        self.token.len()
    }

    pub fn shape(&self) -> &Rectangle {
        &self.shape
    }

    /// Whether the decomposition stopped at this cell.
    pub fn is_leaf(&self) -> bool {
        self.leaf
    }

    /// Whether this leaf lies completely inside the query shape.
    pub fn is_covered(&self) -> bool {
        self.covered
    }

    pub(crate) fn set_leaf(&mut self, covered: bool) {
        self.leaf = true;
        self.covered = covered;
    }

    /// The term to index for this cell: the token, followed by [`LEAF_MARKER`] for a leaf.
    pub fn index_term(&self) -> String {
        let mut term = String::with_capacity(self.token.len() + 1);
        term.push_str(&self.token);
        if self.leaf {
            term.push(LEAF_MARKER);
        }
        term
    }

    /// Returns `true` if `other` is this cell or one of its descendants.
    pub fn is_prefix_of(&self, other: &Cell) -> bool {
        other.token.starts_with(&self.token)
    }
}
