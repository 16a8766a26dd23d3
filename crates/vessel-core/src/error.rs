//! Error types for vessel-rs.

use thiserror::Error;

/// The main error type for vessel-rs operations.
#[derive(Error, Debug)]
pub enum VesselError {
    /// The global range of a color-coding metric is empty (`minimum >= maximum`).
    #[error("degenerate color-coding range: minimum {minimum} must be below maximum {maximum}")]
    DegenerateRange { minimum: f32, maximum: f32 },

    /// The radius policy is unknown or its value is out of bounds.
    #[error("invalid radius policy: {0}")]
    InvalidRadiusPolicy(String),

    /// Any other configuration value is out of bounds.
    #[error("invalid options: {0}")]
    InvalidOptions(String),

    /// A sample or the section topology of a morphology is malformed.
    #[error("invalid morphology: {0}")]
    InvalidMorphology(String),

    /// A profile curve needs at least three sides.
    #[error("degenerate profile: {sides} sides, at least 3 required")]
    DegenerateProfile { sides: u32 },

    /// The geometry backend already holds an object with this name.
    #[error("object '{0}' already exists")]
    ObjectExists(String),

    /// No color map is registered under this name.
    #[error("color map '{0}' not found")]
    UnknownColorMap(String),

    /// Progressive components must be built in increasing order, once each.
    #[error("component {actual} requested out of order, expected {expected}")]
    ComponentOutOfOrder { expected: usize, actual: usize },

    /// The component index is past the last component.
    #[error("component {index} out of range, builder has {total} components")]
    ComponentOutOfRange { index: usize, total: usize },

    /// JSON serialization error.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

/// A specialized Result type for vessel-rs operations.
pub type Result<T> = std::result::Result<T, VesselError>;
