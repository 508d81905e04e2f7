//! Building a [`SpatialPrefixTree`] from configuration.

use std::str::FromStr;

use crate::context::SpatialContext;
use crate::distance::util::KM_TO_DEG;
use crate::error::{Result, SpatialError};
use crate::prefix_tree::geohash::{GeohashPrefixTree, MAX_GEOHASH_LEVELS};
use crate::prefix_tree::quad::{QuadPrefixTree, MAX_QUAD_LEVELS};
use crate::prefix_tree::SpatialPrefixTree;

/// The default finest precision in a geodetic context: one meter.
pub const DEFAULT_GEO_MAX_DETAIL_KM: f64 = 0.001;

/// The default finest precision in a planar context, as a fraction of the world width.
pub const DEFAULT_PLANAR_MAX_DETAIL_FRACTION: f64 = 1e-6;

/// The grid implementation to build.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PrefixTreeKind {
    Quad,
    Geohash,
}

impl FromStr for PrefixTreeKind {
    type Err = SpatialError;

    fn from_str(s: &str) -> Result<Self> {
        match s.to_ascii_lowercase().as_str() {
            "quad" => Ok(Self::Quad),
            "geohash" => Ok(Self::Geohash),
            other => Err(SpatialError::InvalidArgument(format!(
                "unknown prefix tree kind {:?}",
                other
            ))),
        }
    }
}

/// Configuration for a prefix tree.
///
/// The depth is either given directly with `max_levels`, or derived as the shallowest level
/// whose cells are smaller than `max_dist_err`. Without either a default precision is used.
#[derive(Debug, Clone, PartialEq)]
pub struct PrefixTreeConfig {
    pub kind: PrefixTreeKind,
    pub max_levels: Option<usize>,
    pub max_dist_err: Option<f64>,
}

impl PrefixTreeConfig {
    pub fn new(kind: PrefixTreeKind) -> Self {
        Self {
            kind,
            max_levels: None,
            max_dist_err: None,
        }
    }

    pub fn with_max_levels(self, max_levels: usize) -> Self {
        Self {
            max_levels: Some(max_levels),
            ..self
        }
    }

    /// Set the finest precision, in the units of the context's distance calculator.
    pub fn with_max_dist_err(self, max_dist_err: f64) -> Self {
        Self {
            max_dist_err: Some(max_dist_err),
            ..self
        }
    }

    /// Build the configured tree over `ctx`.
    pub fn build(&self, ctx: SpatialContext) -> Result<Box<dyn SpatialPrefixTree>> {
        let max_levels = match self.max_levels {
            Some(levels) => levels,
            None => self.levels_for_precision(&ctx)?,
        };
        tracing::debug!(kind = ?self.kind, max_levels, "building prefix tree");
        Ok(match self.kind {
            PrefixTreeKind::Quad => Box::new(QuadPrefixTree::new(ctx, max_levels)?),
            PrefixTreeKind::Geohash => Box::new(GeohashPrefixTree::new(ctx, max_levels)?),
        })
    }

    fn levels_for_precision(&self, ctx: &SpatialContext) -> Result<usize> {
        let distance = match self.max_dist_err {
            Some(distance) => distance,
            None if ctx.is_geo() => DEFAULT_GEO_MAX_DETAIL_KM * KM_TO_DEG,
            None => ctx.world_bounds().width() * DEFAULT_PLANAR_MAX_DETAIL_FRACTION,
        };
        if !distance.is_finite() || distance < 0.0 {
            return Err(SpatialError::InvalidArgument(format!(
                "max_dist_err must be finite and non-negative, got {}",
                distance
            )));
        }
        // Measure against the deepest grid of this kind
        let levels = match self.kind {
            PrefixTreeKind::Quad => {
                QuadPrefixTree::new(ctx.clone(), MAX_QUAD_LEVELS)?.level_for_distance(distance)
            }
            PrefixTreeKind::Geohash => {
                GeohashPrefixTree::new(ctx.clone(), MAX_GEOHASH_LEVELS)?
                    .level_for_distance(distance)
            }
        };
        Ok(levels)
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::shape::Rectangle;

    #[test]
    fn parse_kind() {
        assert_eq!("quad".parse::<PrefixTreeKind>().unwrap(), PrefixTreeKind::Quad);
        assert_eq!(
            "GeoHash".parse::<PrefixTreeKind>().unwrap(),
            PrefixTreeKind::Geohash
        );
        assert!("rtree".parse::<PrefixTreeKind>().is_err());
    }

    #[test]
    fn explicit_levels() {
        let tree = PrefixTreeConfig::new(PrefixTreeKind::Quad)
            .with_max_levels(7)
            .build(SpatialContext::geo())
            .unwrap();
        assert_eq!(tree.max_levels(), 7);
    }

    #[test]
    fn default_geo_precision_is_one_meter() {
        let geohash = PrefixTreeConfig::new(PrefixTreeKind::Geohash)
            .build(SpatialContext::geo())
            .unwrap();
        assert_eq!(geohash.max_levels(), 11);

        let quad = PrefixTreeConfig::new(PrefixTreeKind::Quad)
            .build(SpatialContext::geo())
            .unwrap();
        assert_eq!(quad.max_levels(), 26);
    }

    #[test]
    fn levels_from_distance() {
        let ctx = SpatialContext::planar(Rectangle::new(0., 16., 0., 16.)).unwrap();
        let tree = PrefixTreeConfig::new(PrefixTreeKind::Quad)
            .with_max_dist_err(3.)
            .build(ctx)
            .unwrap();
        assert_eq!(tree.max_levels(), 3);
    }

    #[test]
    fn geohash_needs_geo() {
        let ctx = SpatialContext::planar(Rectangle::new(0., 16., 0., 16.)).unwrap();
        assert!(PrefixTreeConfig::new(PrefixTreeKind::Geohash)
            .build(ctx)
            .is_err());
    }

    #[test]
    fn rejects_negative_distance() {
        assert!(PrefixTreeConfig::new(PrefixTreeKind::Quad)
            .with_max_dist_err(-1.)
            .build(SpatialContext::geo())
            .is_err());
    }
}
