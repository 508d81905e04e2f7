#![doc = include_str!("../README.md")]

pub mod context;
pub mod distance;
mod error;
pub mod geohash;
pub mod prefix_tree;
mod relation;
pub mod shape;

pub use context::{SpatialContext, SpatialContextBuilder};
pub use error::{Result, SpatialError};
pub use relation::SpatialRelation;
pub use shape::{Circle, Point, Rectangle, Shape, ShapeCollection};

#[cfg(test)]
pub(crate) mod test;
