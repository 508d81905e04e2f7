use thiserror::Error;

/// Enum with all errors in this crate.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum SpatialError {
    /// A shape could not be constructed from the given values, e.g. a non-finite coordinate, a
    /// negative radius or an empty geohash.
    #[error("Invalid shape: {0}")]
    InvalidShape(String),

    /// The requested operation is not available for this combination of shapes.
    #[error("Unsupported operation: {0}")]
    UnsupportedOperation(String),

    /// An argument or configuration value was out of range.
    #[error("Invalid argument: {0}")]
    InvalidArgument(String),
}

pub type Result<T> = std::result::Result<T, SpatialError>;
