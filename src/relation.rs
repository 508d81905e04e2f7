//! The relationship between two shapes.

/// How one shape relates to another, read as `a.relate(b)`.
///
/// Two exactly equal shapes relate as [`SpatialRelation::Within`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SpatialRelation {
    /// `a` fully contains `b`.
    Contains,
    /// `a` is fully inside `b`.
    Within,
    /// `a` and `b` share no point.
    Disjoint,
    /// `a` and `b` overlap but neither contains the other.
    Intersects,
}

impl SpatialRelation {
    /// The relation as seen from the other operand, i.e. `b.relate(a)` given `a.relate(b)`.
    pub fn transpose(self) -> Self {
        match self {
            Self::Contains => Self::Within,
            Self::Within => Self::Contains,
            other => other,
        }
    }

    /// `true` for every relation except [`SpatialRelation::Disjoint`].
    pub fn intersects(self) -> bool {
        self != Self::Disjoint
    }

    /// Fold the relations of two parts of a composite shape against the same other shape.
    ///
    /// The result does not depend on the order of the operands.
    pub fn combine(self, other: Self) -> Self {
        if self == other {
            return self;
        }
        match (self, other) {
            (Self::Disjoint, Self::Contains) | (Self::Contains, Self::Disjoint) => Self::Contains,
            _ => Self::Intersects,
        }
    }
}
