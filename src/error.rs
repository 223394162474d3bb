//! Error type for world construction, import and scenario loading.
//!
//! Degenerate geometry and "no collision" are never errors; only invalid
//! configuration and malformed input end up here.

use core::fmt;

use crate::types::BodyId;

/// Unified error type for the simulation core.
#[derive(Clone, Debug, PartialEq)]
pub enum SimError {
    /// A dynamic body's mass is zero, negative or not finite.
    InvalidMass { id: BodyId, mass: f64 },
    /// A vector component or scalar on a body is NaN or infinite.
    NonFinite { id: BodyId, field: &'static str },
    /// A box has a non-positive or non-finite width/height.
    InvalidExtents { id: BodyId, width: f64, height: f64 },
    /// Circles derive their radius from mass, so they cannot be immovable.
    ImmovableCircle { id: BodyId },
    /// Two bodies in one world share an id.
    DuplicateId { id: BodyId },
    /// No id is left above `id` to hand out.
    IdExhausted { id: BodyId },
    /// A world setting is not finite.
    InvalidSetting { name: &'static str, value: f64 },
    /// Structured input could not be parsed.
    Format { message: String },
    /// Reading or writing a scenario file failed.
    Io { message: String },
}

impl fmt::Display for SimError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::InvalidMass { id, mass } => {
                write!(f, "body {} has invalid mass {mass}", id.0)
            }
            Self::NonFinite { id, field } => {
                write!(f, "body {} has a non-finite {field}", id.0)
            }
            Self::InvalidExtents { id, width, height } => {
                write!(f, "body {} has invalid box extents {width}x{height}", id.0)
            }
            Self::ImmovableCircle { id } => {
                write!(f, "body {} is an immovable circle", id.0)
            }
            Self::DuplicateId { id } => write!(f, "duplicate body id {}", id.0),
            Self::IdExhausted { id } => write!(f, "no body id left after {}", id.0),
            Self::InvalidSetting { name, value } => {
                write!(f, "invalid setting {name} = {value}")
            }
            Self::Format { message } => write!(f, "malformed input: {message}"),
            Self::Io { message } => write!(f, "I/O error: {message}"),
        }
    }
}

impl std::error::Error for SimError {}

impl From<serde_json::Error> for SimError {
    fn from(e: serde_json::Error) -> Self {
        Self::Format { message: e.to_string() }
    }
}

impl From<serde_yaml::Error> for SimError {
    fn from(e: serde_yaml::Error) -> Self {
        Self::Format { message: e.to_string() }
    }
}

impl From<std::io::Error> for SimError {
    fn from(e: std::io::Error) -> Self {
        Self::Io { message: e.to_string() }
    }
}

pub type SimResult<T> = Result<T, SimError>;
