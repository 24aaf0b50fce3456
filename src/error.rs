//! Error types for fatigue damage evaluation

use thiserror::Error;

use crate::field::EntityId;
use crate::material::MaterialId;

/// A value fell outside the domain of one of the reliability laws
/// (non-positive root base, zero denominator, non-positive Kelvin temperature, ...)
#[derive(Error, Debug, Clone, PartialEq)]
#[error("{quantity} = {value} is outside the valid domain (requires {requirement})")]
pub struct DomainError {
    /// Name of the offending quantity
    pub quantity: &'static str,
    /// The value that was rejected
    pub value: f64,
    /// Human readable requirement, e.g. "> 0"
    pub requirement: &'static str,
}

impl DomainError {
    pub fn new(quantity: &'static str, value: f64, requirement: &'static str) -> Self {
        Self {
            quantity,
            value,
            requirement,
        }
    }

    /// Attach the time step and entity at which the error occurred
    pub fn at(self, time: usize, entity: EntityId) -> FatigueError {
        FatigueError::Domain {
            time,
            entity,
            source: self,
        }
    }
}

/// Coarse classification of [`FatigueError`] used by callers that decide
/// whether to abort a pipeline or skip a time step
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCategory {
    /// An entity or material id could not be resolved
    Lookup,
    /// A non-positive value reached a root, power or logarithm
    Domain,
    /// Temperature and gradient series disagree in shape
    ShapeMismatch,
    /// Bad configuration or material table input
    Input,
}

/// Main error type for fatigue damage operations
#[derive(Error, Debug)]
pub enum FatigueError {
    #[error("Entity {0} has no material assignment")]
    EntityNotAssigned(EntityId),

    #[error("Material {0} not found in material table")]
    MaterialNotFound(MaterialId),

    #[error("Domain error at time step {time}, entity {entity}: {source}")]
    Domain {
        time: usize,
        entity: EntityId,
        #[source]
        source: DomainError,
    },

    #[error("Invalid material {material}: {source}")]
    InvalidMaterial {
        material: MaterialId,
        #[source]
        source: DomainError,
    },

    #[error("Shape mismatch: {0}")]
    ShapeMismatch(String),

    #[error("Duplicate material id {0}")]
    DuplicateMaterial(MaterialId),

    #[error("Invalid input: {0}")]
    InvalidInput(String),

    #[error("Serialization error: {0}")]
    SerializationError(#[from] serde_json::Error),
}

impl FatigueError {
    pub fn category(&self) -> ErrorCategory {
        match self {
            Self::EntityNotAssigned(_) | Self::MaterialNotFound(_) => ErrorCategory::Lookup,
            Self::Domain { .. } | Self::InvalidMaterial { .. } => ErrorCategory::Domain,
            Self::ShapeMismatch(_) => ErrorCategory::ShapeMismatch,
            Self::DuplicateMaterial(_) | Self::InvalidInput(_) | Self::SerializationError(_) => {
                ErrorCategory::Input
            }
        }
    }
}

/// Result type for fatigue operations
pub type FatigueResult<T> = Result<T, FatigueError>;
