//! Error handling for StitchKit
//!
//! Provides the error types shared by every layer of the stitch pipeline:
//! - Geometry errors (malformed input to the pure generators)
//! - Service errors (round-trips to an out-of-process generator)
//! - Store errors (lookups against the layer store)
//!
//! All error types use `thiserror` for ergonomic error handling.

use thiserror::Error;

/// Geometry error type
///
/// Raised synchronously by the pure generators when their input is
/// malformed. Callers must not continue with partial output.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum GeometryError {
    /// Not enough points to describe the requested geometry
    #[error("Expected at least {required} points, got {actual}")]
    TooFewPoints {
        /// Minimum number of points the operation needs.
        required: usize,
        /// Number of points supplied.
        actual: usize,
    },

    /// A length-like parameter was zero or negative
    #[error("{field} must be > 0, got {value}")]
    NonPositive {
        /// Name of the offending parameter.
        field: &'static str,
        /// The rejected value.
        value: f64,
    },

    /// A parameter was NaN or infinite
    #[error("{field} must be finite")]
    NonFinite {
        /// Name of the offending parameter.
        field: &'static str,
    },

    /// A boundary `[x, y]` pair had the wrong arity
    #[error("Point {index} has {len} coordinates, expected 2")]
    MalformedPoint {
        /// Index of the point within its path.
        index: usize,
        /// Number of coordinates found.
        len: usize,
    },

    /// Playback speed must advance at least one stitch per tick
    #[error("Speed must be at least 1 stitch per tick")]
    InvalidSpeed,
}

impl GeometryError {
    /// Rejects values that are not finite and strictly positive.
    pub fn check_positive(
        field: &'static str,
        value: f64,
    ) -> std::result::Result<f64, GeometryError> {
        if !value.is_finite() {
            return Err(GeometryError::NonFinite { field });
        }
        if value <= 0.0 {
            return Err(GeometryError::NonPositive { field, value });
        }
        Ok(value)
    }

    /// Rejects inputs shorter than `required` points.
    pub fn check_len(required: usize, actual: usize) -> std::result::Result<(), GeometryError> {
        if actual < required {
            return Err(GeometryError::TooFewPoints { required, actual });
        }
        Ok(())
    }
}

/// Service error type
///
/// Represents a failed round-trip to an external stitch generator.
/// The layer store is never modified when one of these is returned.
#[derive(Error, Debug, Clone)]
pub enum ServiceError {
    /// The request could not be delivered or the service reported failure
    #[error("Stitch service request failed: {reason}")]
    Request {
        /// The reason reported by the transport or the service.
        reason: String,
    },

    /// The service answered with something that does not match the contract
    #[error("Malformed stitch service response: {reason}")]
    MalformedResponse {
        /// What was wrong with the response.
        reason: String,
    },

    /// No service is configured or reachable
    #[error("Stitch service unavailable")]
    Unavailable,
}

/// Store error type
///
/// Lookups against the layer store that reference missing data.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum StoreError {
    /// No layer carries the given id
    #[error("Layer not found: {id}")]
    LayerNotFound {
        /// The id that was looked up.
        id: String,
    },

    /// The layer is locked against edits
    #[error("Layer is locked: {id}")]
    LayerLocked {
        /// The locked layer's id.
        id: String,
    },

    /// An index was outside the layer or path sequence
    #[error("Index {index} out of range (len {len})")]
    IndexOutOfRange {
        /// The requested index.
        index: usize,
        /// Length of the sequence.
        len: usize,
    },

    /// No hoop in the catalog carries the given id
    #[error("Hoop not found: {id}")]
    HoopNotFound {
        /// The id that was looked up.
        id: String,
    },
}

/// Main error type for StitchKit
///
/// A unified error type that can represent any error from the core layers.
/// This is the primary error type used in public APIs.
#[derive(Error, Debug)]
pub enum Error {
    /// Invalid geometry or parameters
    #[error(transparent)]
    Geometry(#[from] GeometryError),

    /// External stitch service failure
    #[error(transparent)]
    Service(#[from] ServiceError),

    /// Layer store lookup failure
    #[error(transparent)]
    Store(#[from] StoreError),

    /// Serialization failure at a boundary
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// Generic error
    #[error("{0}")]
    Other(String),
}

impl Error {
    /// Create an error from a string message
    pub fn other(msg: impl Into<String>) -> Self {
        Error::Other(msg.into())
    }

    /// Check if this is an invalid input error
    pub fn is_invalid_input(&self) -> bool {
        matches!(self, Error::Geometry(_))
    }

    /// Check if this is an external service error
    pub fn is_external(&self) -> bool {
        matches!(self, Error::Service(_))
    }

    /// Check if this is a store lookup error
    pub fn is_store_error(&self) -> bool {
        matches!(self, Error::Store(_))
    }
}

/// Result type using Error
pub type Result<T> = std::result::Result<T, Error>;
