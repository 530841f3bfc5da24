//! Error types for polyspin.
//!
//! The physics core never fails at runtime: numerical degeneracies are
//! skipped silently. Errors only come from building a simulation out of an
//! invalid configuration, or from reading a configuration file.

use std::fmt;

/// A configuration that violates the simulation's construction contract.
#[derive(Debug, Clone, PartialEq)]
pub enum ConfigError {
    /// No polygons were configured.
    NoPolygons,
    /// A polygon needs at least three vertices.
    TooFewVertices { polygon: usize, vertex_count: usize },
    /// The missing edge index must lie in `[0, vertex_count)`.
    MissingEdgeOutOfRange {
        polygon: usize,
        missing_edge: usize,
        vertex_count: usize,
    },
    /// A polygon radius must be finite and positive.
    InvalidPolygonRadius { polygon: usize, radius: f32 },
    /// A polygon angular velocity or initial angle is not finite.
    NonFiniteRotation { polygon: usize },
    /// Ball radius must be finite and positive.
    InvalidBallRadius(f32),
    /// Ball mass must be finite and positive.
    InvalidBallMass(f32),
    /// Restitution must lie in `[0, 1]`.
    InvalidRestitution(f32),
    /// At least one sub-step per frame is required.
    ZeroSubsteps,
    /// A scalar setting that must be finite and non-negative is not.
    InvalidParameter { name: &'static str, value: f32 },
    /// Soft bounds with `min` not strictly below `max` on both axes.
    InvalidBounds,
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigError::NoPolygons => write!(f, "At least one polygon must be configured"),
            ConfigError::TooFewVertices {
                polygon,
                vertex_count,
            } => write!(
                f,
                "Polygon {} has {} vertices, at least 3 are required",
                polygon, vertex_count
            ),
            ConfigError::MissingEdgeOutOfRange {
                polygon,
                missing_edge,
                vertex_count,
            } => write!(
                f,
                "Polygon {} missing edge index {} is outside [0, {})",
                polygon, missing_edge, vertex_count
            ),
            ConfigError::InvalidPolygonRadius { polygon, radius } => {
                write!(f, "Polygon {} radius {} must be positive", polygon, radius)
            }
            ConfigError::NonFiniteRotation { polygon } => {
                write!(f, "Polygon {} rotation parameters must be finite", polygon)
            }
            ConfigError::InvalidBallRadius(r) => write!(f, "Ball radius {} must be positive", r),
            ConfigError::InvalidBallMass(m) => write!(f, "Ball mass {} must be positive", m),
            ConfigError::InvalidRestitution(e) => {
                write!(f, "Restitution {} must lie in [0, 1]", e)
            }
            ConfigError::ZeroSubsteps => write!(f, "Sub-steps per frame must be at least 1"),
            ConfigError::InvalidParameter { name, value } => {
                write!(f, "Setting `{}` = {} must be finite and non-negative", name, value)
            }
            ConfigError::InvalidBounds => {
                write!(f, "Soft bounds must have min strictly below max on both axes")
            }
        }
    }
}

impl std::error::Error for ConfigError {}

/// Errors that can occur while loading a configuration file.
#[derive(Debug)]
pub enum LoadError {
    /// Failed to read the file from disk.
    Io(std::io::Error),
    /// The file is not valid configuration JSON.
    Parse(serde_json::Error),
    /// The file parsed but describes an invalid simulation.
    Invalid(ConfigError),
}

impl fmt::Display for LoadError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            LoadError::Io(e) => write!(f, "Failed to read config: {}", e),
            LoadError::Parse(e) => write!(f, "Failed to parse config: {}", e),
            LoadError::Invalid(e) => write!(f, "Invalid config: {}", e),
        }
    }
}

impl std::error::Error for LoadError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            LoadError::Io(e) => Some(e),
            LoadError::Parse(e) => Some(e),
            LoadError::Invalid(e) => Some(e),
        }
    }
}

impl From<std::io::Error> for LoadError {
    fn from(e: std::io::Error) -> Self {
        LoadError::Io(e)
    }
}

impl From<serde_json::Error> for LoadError {
    fn from(e: serde_json::Error) -> Self {
        LoadError::Parse(e)
    }
}

impl From<ConfigError> for LoadError {
    fn from(e: ConfigError) -> Self {
        LoadError::Invalid(e)
    }
}
