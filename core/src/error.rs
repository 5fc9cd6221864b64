use crate::types::{ClientId, ScenarioId};
use thiserror::Error;

#[derive(Error, Debug)]
pub enum EngineError {
    #[error("Validation failed: {reason}")]
    Validation { reason: String },

    #[error("Scenario {id} not found")]
    ScenarioNotFound { id: ScenarioId },

    #[error("Client {id} not found")]
    ClientNotFound { id: ClientId },

    #[error("Comparison is limited to {capacity} scenarios")]
    CapacityExceeded { capacity: usize },

    #[error("Shock parameter '{field}' is not a finite number")]
    NonFiniteShock { field: &'static str },

    #[error("Shock parameter '{field}' = {value} outside [{min}, {max}]")]
    ShockOutOfRange {
        field: &'static str,
        value: f64,
        min: f64,
        max: f64,
    },

    #[error("Invalid client {id}: {reason}")]
    InvalidClient { id: ClientId, reason: String },

    #[error("Duplicate client id {id}")]
    DuplicateClient { id: ClientId },

    #[error("Duplicate scenario id {id}")]
    DuplicateScenario { id: ScenarioId },

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

impl EngineError {
    pub fn validation(reason: impl Into<String>) -> Self {
        Self::Validation { reason: reason.into() }
    }
}

pub type EngineResult<T> = Result<T, EngineError>;
