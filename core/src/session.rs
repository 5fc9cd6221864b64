//! The session controller: single owner of all mutable engine state.
//!
//! A session holds the client directory, the runner, the scenario store,
//! the comparison selection and the current run. Every mutation goes
//! through a method here; there are no globals.
//!
//! FLOW:
//!   select_clients -> run_simulation -> save_scenario -> toggle_selection -> compare
//!   load_scenario replaces the current run with a saved one.

use crate::{
    clock::{FixedClock, SessionClock, SystemClock},
    command::{SessionCommand, SessionReply},
    comparison::{Comparison, ComparisonAggregator, SelectionSet},
    config::EngineConfig,
    directory::ClientDirectory,
    error::{EngineError, EngineResult},
    event::SessionEvent,
    fixtures,
    runner::{RunSummary, ScenarioRunner},
    scenario::{Scenario, ScenarioResult},
    shock::ShockParameters,
    store::ScenarioStore,
    types::{ClientId, ScenarioId},
};

/// Clients preselected when a session opens.
pub const DEFAULT_SELECTED_CLIENTS: usize = 3;

/// The run currently shown: either fresh from `run_simulation` or
/// restored by `load_scenario`.
#[derive(Debug, Clone, PartialEq)]
pub struct CurrentRun {
    pub shocks:      ShockParameters,
    pub results:     Vec<ScenarioResult>,
    pub name:        String,
    pub description: String,
    pub loaded_from: Option<ScenarioId>,
}

pub struct Session {
    config:           EngineConfig,
    directory:        ClientDirectory,
    runner:           ScenarioRunner,
    store:            ScenarioStore,
    selection:        SelectionSet,
    selected_clients: Vec<ClientId>,
    current:          Option<CurrentRun>,
    notices:          Vec<SessionEvent>,
}

impl Session {
    pub fn new(config: EngineConfig, directory: ClientDirectory, store: ScenarioStore) -> Self {
        let selected_clients = directory
            .iter()
            .take(DEFAULT_SELECTED_CLIENTS)
            .map(|c| c.id)
            .collect();
        Self {
            runner: ScenarioRunner::from_config(&config),
            selection: SelectionSet::with_capacity(config.comparison_capacity),
            config,
            directory,
            store,
            selected_clients,
            current: None,
            notices: Vec::new(),
        }
    }

    /// Production session: system clock, empty store.
    pub fn build(config: EngineConfig, directory: ClientDirectory) -> Self {
        Self::new(config, directory, ScenarioStore::new(Box::new(SystemClock)))
    }

    /// Test session: reference clients, reference scenarios, strict
    /// config and a clock fixed at 2024-01-15.
    pub fn build_test() -> Self {
        Self::build_test_with_clock(FixedClock::new(fixtures::date(2024, 1, 15)))
    }

    pub fn build_test_with_clock(clock: impl SessionClock + 'static) -> Self {
        Self::new(
            EngineConfig::default_test(),
            ClientDirectory::reference(),
            ScenarioStore::with_reference_scenarios(Box::new(clock)),
        )
    }

    // ── Clients ────────────────────────────────────────────────

    /// Replace the client selection. Every id must exist.
    pub fn select_clients(&mut self, ids: &[ClientId]) -> EngineResult<()> {
        for &id in ids {
            self.directory.require(id)?;
        }
        self.selected_clients = self
            .directory
            .select(ids)
            .into_iter()
            .map(|c| c.id)
            .collect();
        self.notify(SessionEvent::ClientsSelected { count: self.selected_clients.len() });
        Ok(())
    }

    pub fn selected_clients(&self) -> &[ClientId] {
        &self.selected_clients
    }

    // ── Simulation ─────────────────────────────────────────────

    /// Run `shocks` over the selected clients, in directory order.
    /// The result becomes the current run.
    pub fn run_simulation(&mut self, shocks: ShockParameters) -> EngineResult<&[ScenarioResult]> {
        for field in self.runner.check_shocks(&shocks)? {
            self.notify(SessionEvent::ShockOutsideRange {
                field: field.name().to_string(),
                value: shocks.get(field),
            });
        }

        let clients = self.directory.select(&self.selected_clients);
        let results: Vec<ScenarioResult> = clients
            .into_iter()
            .map(|c| self.runner.evaluate(c, &shocks))
            .collect();

        self.notify(SessionEvent::SimulationCompleted {
            model:   self.runner.model().name().to_string(),
            clients: results.len(),
        });

        let (name, description) = self
            .current
            .take()
            .map(|c| (c.name, c.description))
            .unwrap_or_default();
        let current = self.current.insert(CurrentRun {
            shocks,
            results,
            name,
            description,
            loaded_from: None,
        });
        Ok(&current.results)
    }

    pub fn current_run(&self) -> Option<&CurrentRun> {
        self.current.as_ref()
    }

    pub fn summary(&self) -> Option<RunSummary> {
        self.current.as_ref().map(|c| RunSummary::of(&c.results))
    }

    // ── Scenarios ──────────────────────────────────────────────

    /// Save the current run under `name`, then try to add it to the
    /// comparison selection. A full selection is left unchanged.
    pub fn save_scenario(&mut self, name: &str, description: &str) -> EngineResult<Scenario> {
        let (shocks, results) = match &self.current {
            Some(current) => (current.shocks, current.results.clone()),
            None => (ShockParameters::default(), Vec::new()),
        };

        let scenario = match self.store.save(name, description, shocks, results) {
            Ok(saved) => saved.clone(),
            Err(e) => {
                self.notify(SessionEvent::SaveRejected { reason: e.to_string() });
                return Err(e);
            }
        };
        if let Some(current) = self.current.as_mut() {
            current.name = scenario.name.clone();
            current.description = scenario.description.clone();
        }
        self.notify(SessionEvent::ScenarioSaved {
            scenario_id: scenario.id,
            name:        scenario.name.clone(),
        });

        match self.selection.add(scenario.id) {
            Ok(true) => self.notify(SessionEvent::ScenarioSelected { scenario_id: scenario.id }),
            Ok(false) => {}
            Err(EngineError::CapacityExceeded { capacity }) => {
                log::warn!("Scenario {} saved but not selected: selection full", scenario.id);
                self.notify(SessionEvent::SelectionRejected {
                    scenario_id: scenario.id,
                    capacity,
                });
            }
            Err(e) => return Err(e),
        }
        Ok(scenario)
    }

    /// Make a saved scenario the current run.
    /// Unknown ids leave the current run untouched.
    pub fn load_scenario(&mut self, id: ScenarioId) -> EngineResult<&Scenario> {
        self.require_scenario(id)?;
        let scenario = self.store.load(id)?;
        self.current = Some(CurrentRun {
            shocks:      scenario.shocks,
            results:     scenario.results.clone(),
            name:        scenario.name.clone(),
            description: scenario.description.clone(),
            loaded_from: Some(id),
        });
        log::info!("Loaded scenario {id} '{}'", scenario.name);
        self.notices.push(SessionEvent::ScenarioLoaded {
            scenario_id: id,
            name:        scenario.name.clone(),
        });
        Ok(scenario)
    }

    pub fn scenarios(&self) -> &[Scenario] {
        self.store.list()
    }

    /// Drop every saved scenario. The comparison selection is cleared
    /// with it, and the current run no longer points at a saved one.
    pub fn reset_scenarios(&mut self) {
        let dropped = self.store.len();
        self.store.reset();
        self.selection.clear();
        if let Some(current) = self.current.as_mut() {
            current.loaded_from = None;
        }
        self.notify(SessionEvent::ScenariosReset { dropped });
    }

    // ── Comparison ─────────────────────────────────────────────

    /// Select or deselect a scenario for comparison. Returns whether it
    /// is selected afterwards. Unknown ids are `ScenarioNotFound`.
    pub fn toggle_selection(&mut self, id: ScenarioId) -> EngineResult<bool> {
        self.require_scenario(id)?;
        match self.selection.toggle(id) {
            Ok(true) => {
                self.notify(SessionEvent::ScenarioSelected { scenario_id: id });
                Ok(true)
            }
            Ok(false) => {
                self.notify(SessionEvent::ScenarioDeselected { scenario_id: id });
                Ok(false)
            }
            Err(e) => {
                if let EngineError::CapacityExceeded { capacity } = &e {
                    let capacity = *capacity;
                    self.notify(SessionEvent::SelectionRejected { scenario_id: id, capacity });
                }
                Err(e)
            }
        }
    }

    pub fn clear_selection(&mut self) {
        self.selection.clear();
        self.notify(SessionEvent::SelectionCleared);
    }

    pub fn selection(&self) -> &SelectionSet {
        &self.selection
    }

    pub fn compare(&self) -> EngineResult<Comparison> {
        ComparisonAggregator::compare(&self.selection, &self.store, &self.directory)
    }

    // ── Accessors ──────────────────────────────────────────────

    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    pub fn directory(&self) -> &ClientDirectory {
        &self.directory
    }

    pub fn store(&self) -> &ScenarioStore {
        &self.store
    }

    pub fn notices(&self) -> &[SessionEvent] {
        &self.notices
    }

    pub fn drain_notices(&mut self) -> Vec<SessionEvent> {
        std::mem::take(&mut self.notices)
    }

    // ── Command dispatch ───────────────────────────────────────

    pub fn execute(&mut self, command: SessionCommand) -> EngineResult<SessionReply> {
        log::debug!("Executing command '{}'", command.name());
        let reply = match command {
            SessionCommand::ListClients => SessionReply::Clients {
                clients: self.directory.as_slice().to_vec(),
            },
            SessionCommand::SelectClients { client_ids } => {
                self.select_clients(&client_ids)?;
                SessionReply::ClientsSelected { client_ids: self.selected_clients.clone() }
            }
            SessionCommand::Run { shocks } => {
                let results = self.run_simulation(shocks)?.to_vec();
                let summary = RunSummary::of(&results);
                SessionReply::Simulation { results, summary }
            }
            SessionCommand::Breakdown { client_id, shocks } => {
                shocks.ensure_finite()?;
                let client = self.directory.require(client_id)?;
                let model = self.runner.model();
                SessionReply::Breakdown {
                    client_id,
                    contributions: model.contributions(&shocks),
                    waterfall:     model.waterfall(client, &shocks),
                }
            }
            SessionCommand::Save { name, description } => SessionReply::ScenarioSaved {
                scenario: self.save_scenario(&name, &description)?,
            },
            SessionCommand::Load { scenario_id } => SessionReply::ScenarioLoaded {
                scenario: self.load_scenario(scenario_id)?.clone(),
            },
            SessionCommand::ListScenarios => SessionReply::Scenarios {
                scenarios: self.store.list().to_vec(),
            },
            SessionCommand::ResetScenarios => {
                self.reset_scenarios();
                SessionReply::Scenarios { scenarios: Vec::new() }
            }
            SessionCommand::ToggleSelection { scenario_id } => {
                self.toggle_selection(scenario_id)?;
                SessionReply::Selection { scenario_ids: self.selection.ids().to_vec() }
            }
            SessionCommand::ClearSelection => {
                self.clear_selection();
                SessionReply::Selection { scenario_ids: Vec::new() }
            }
            SessionCommand::Compare => SessionReply::Comparison {
                comparison: self.compare()?,
            },
        };
        Ok(reply)
    }

    fn require_scenario(&mut self, id: ScenarioId) -> EngineResult<()> {
        if self.store.contains(id) {
            return Ok(());
        }
        self.notify(SessionEvent::ScenarioNotFound { scenario_id: id });
        Err(EngineError::ScenarioNotFound { id })
    }

    fn notify(&mut self, event: SessionEvent) {
        log::debug!("notice: {}", event.type_name());
        self.notices.push(event);
    }
}
