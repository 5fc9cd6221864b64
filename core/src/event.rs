//! User-visible notices emitted by a session.
//!
//! Every operation that the dashboard would confirm or reject with a
//! toast records one of these. The journal is append-only until drained.

use crate::types::ScenarioId;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum SessionEvent {
    ClientsSelected {
        count: usize,
    },
    SimulationCompleted {
        model:   String,
        clients: usize,
    },
    ShockOutsideRange {
        field: String,
        value: f64,
    },
    ScenarioSaved {
        scenario_id: ScenarioId,
        name:        String,
    },
    ScenarioLoaded {
        scenario_id: ScenarioId,
        name:        String,
    },
    ScenarioNotFound {
        scenario_id: ScenarioId,
    },
    SaveRejected {
        reason: String,
    },
    ScenariosReset {
        dropped: usize,
    },
    ScenarioSelected {
        scenario_id: ScenarioId,
    },
    ScenarioDeselected {
        scenario_id: ScenarioId,
    },
    SelectionRejected {
        scenario_id: ScenarioId,
        capacity:    usize,
    },
    SelectionCleared,
}

impl SessionEvent {
    /// Stable name, used in logs.
    pub fn type_name(&self) -> &'static str {
        match self {
            Self::ClientsSelected { .. }     => "clients_selected",
            Self::SimulationCompleted { .. } => "simulation_completed",
            Self::ShockOutsideRange { .. }   => "shock_outside_range",
            Self::ScenarioSaved { .. }       => "scenario_saved",
            Self::ScenarioLoaded { .. }      => "scenario_loaded",
            Self::ScenarioNotFound { .. }    => "scenario_not_found",
            Self::SaveRejected { .. }        => "save_rejected",
            Self::ScenariosReset { .. }      => "scenarios_reset",
            Self::ScenarioSelected { .. }    => "scenario_selected",
            Self::ScenarioDeselected { .. }  => "scenario_deselected",
            Self::SelectionRejected { .. }   => "selection_rejected",
            Self::SelectionCleared           => "selection_cleared",
        }
    }
}
