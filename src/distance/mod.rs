//! Distance calculators.
//!
//! A [`DistanceCalculator`] is chosen per [`SpatialContext`][crate::SpatialContext]:
//! [`GeodesicDistance`] for the globe, [`CartesianDistance`] for a flat plane.

mod cartesian;
mod geodesic;
mod r#trait;
pub mod util;

pub use cartesian::CartesianDistance;
pub use geodesic::{GeodesicDistance, GeodesicFormula};
pub use r#trait::DistanceCalculator;
