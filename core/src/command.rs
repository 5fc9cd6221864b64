use crate::{
    comparison::Comparison,
    client::ClientProfile,
    risk_model::{FactorContribution, WaterfallStep},
    runner::RunSummary,
    scenario::{Scenario, ScenarioResult},
    shock::ShockParameters,
    types::{ClientId, ScenarioId},
};
use serde::{Deserialize, Serialize};

/// Every command a session accepts over the IPC loop.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "cmd", rename_all = "snake_case")]
pub enum SessionCommand {
    ListClients,
    SelectClients {
        client_ids: Vec<ClientId>,
    },
    Run {
        shocks: ShockParameters,
    },
    Breakdown {
        client_id: ClientId,
        shocks:    ShockParameters,
    },
    Save {
        name: String,
        #[serde(default)]
        description: String,
    },
    Load {
        scenario_id: ScenarioId,
    },
    ListScenarios,
    ResetScenarios,
    ToggleSelection {
        scenario_id: ScenarioId,
    },
    ClearSelection,
    Compare,
}

impl SessionCommand {
    pub fn name(&self) -> &'static str {
        match self {
            Self::ListClients            => "list_clients",
            Self::SelectClients { .. }   => "select_clients",
            Self::Run { .. }             => "run",
            Self::Breakdown { .. }       => "breakdown",
            Self::Save { .. }            => "save",
            Self::Load { .. }            => "load",
            Self::ListScenarios          => "list_scenarios",
            Self::ResetScenarios         => "reset_scenarios",
            Self::ToggleSelection { .. } => "toggle_selection",
            Self::ClearSelection         => "clear_selection",
            Self::Compare                => "compare",
        }
    }
}

#[derive(Debug, Clone, Serialize)]
#[serde(tag = "reply", rename_all = "snake_case")]
pub enum SessionReply {
    Clients {
        clients: Vec<ClientProfile>,
    },
    ClientsSelected {
        client_ids: Vec<ClientId>,
    },
    Simulation {
        results: Vec<ScenarioResult>,
        summary: RunSummary,
    },
    Breakdown {
        client_id:     ClientId,
        contributions: Vec<FactorContribution>,
        waterfall:     Vec<WaterfallStep>,
    },
    ScenarioSaved {
        scenario: Scenario,
    },
    ScenarioLoaded {
        scenario: Scenario,
    },
    Scenarios {
        scenarios: Vec<Scenario>,
    },
    Selection {
        scenario_ids: Vec<ScenarioId>,
    },
    Comparison {
        comparison: Comparison,
    },
}
