//! Shared primitive types used across the engine.

/// Identifier of a client in the directory. Assigned by the
/// client-management collaborator, never by the engine.
pub type ClientId = u64;

/// Identifier of a saved scenario. Assigned by the scenario store.
pub type ScenarioId = u64;

/// A risk score. Valid scores live in [0.0, 1.0].
pub type RiskScore = f64;
