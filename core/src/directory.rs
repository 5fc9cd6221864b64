//! Client directory: the profile collection a session simulates against.

use crate::{
    client::ClientProfile,
    error::{EngineError, EngineResult},
    fixtures,
    name_generator::NameGenerator,
    risk_model::round_to,
    rng::{RngStream, SeededRng},
    types::ClientId,
};
use chrono::Days;
use std::collections::HashSet;
use std::path::Path;

#[derive(Debug, Clone, Default)]
pub struct ClientDirectory {
    clients: Vec<ClientProfile>,
}

impl ClientDirectory {
    /// Validate every profile and reject duplicate ids. Order is kept.
    pub fn from_profiles(clients: Vec<ClientProfile>) -> EngineResult<Self> {
        let mut seen = HashSet::with_capacity(clients.len());
        for client in &clients {
            client.validate()?;
            if !seen.insert(client.id) {
                return Err(EngineError::DuplicateClient { id: client.id });
            }
        }
        Ok(Self { clients })
    }

    /// Parse a JSON array of client records.
    pub fn from_json(content: &str) -> EngineResult<Self> {
        let clients: Vec<ClientProfile> = serde_json::from_str(content)?;
        Self::from_profiles(clients)
    }

    pub fn load(path: impl AsRef<Path>) -> anyhow::Result<Self> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path)
            .map_err(|e| anyhow::anyhow!("Cannot read {}: {e}", path.display()))?;
        let directory = Self::from_json(&content)?;
        log::info!("Loaded {} clients from {}", directory.len(), path.display());
        Ok(directory)
    }

    /// The six reference institutions.
    pub fn reference() -> Self {
        Self { clients: fixtures::reference_clients() }
    }

    /// `count` deterministic synthetic profiles with ids 1..=count.
    pub fn synthetic(seed: u64, count: usize) -> Self {
        let mut profiles = SeededRng::new(seed, RngStream::Profiles);
        let mut names = SeededRng::new(seed, RngStream::Names);
        let epoch = fixtures::date(2023, 1, 1);

        let clients = (1..=count as ClientId)
            .map(|id| {
                let loans = (profiles.uniform(1.0e6, 10.0e6) / 1.0e5).round() * 1.0e5;
                let deposits = (loans * profiles.uniform(0.6, 1.6) / 1.0e5).round() * 1.0e5;
                let leverage = loans / (loans + deposits);
                let risk = round_to(
                    (0.15 + 0.4 * leverage + profiles.uniform(-0.08, 0.08)).clamp(0.05, 0.95),
                    2,
                );

                let mut client = ClientProfile::new(
                    id,
                    NameGenerator::generate_institution_name(&mut names),
                    loans,
                    deposits,
                    risk,
                )
                .with_type(NameGenerator::generate_institution_type(&mut names));
                client.last_updated = epoch.checked_add_days(Days::new(profiles.next_u64_below(365)));
                client
            })
            .collect();

        log::debug!("Generated {count} synthetic clients from seed {seed}");
        Self { clients }
    }

    pub fn get(&self, id: ClientId) -> Option<&ClientProfile> {
        self.clients.iter().find(|c| c.id == id)
    }

    pub fn require(&self, id: ClientId) -> EngineResult<&ClientProfile> {
        self.get(id).ok_or(EngineError::ClientNotFound { id })
    }

    /// Profiles whose id is in `ids`, in directory order.
    pub fn select(&self, ids: &[ClientId]) -> Vec<&ClientProfile> {
        self.clients.iter().filter(|c| ids.contains(&c.id)).collect()
    }

    pub fn ids(&self) -> Vec<ClientId> {
        self.clients.iter().map(|c| c.id).collect()
    }

    pub fn iter(&self) -> impl Iterator<Item = &ClientProfile> {
        self.clients.iter()
    }

    pub fn as_slice(&self) -> &[ClientProfile] {
        &self.clients
    }

    pub fn len(&self) -> usize {
        self.clients.len()
    }

    pub fn is_empty(&self) -> bool {
        self.clients.is_empty()
    }
}
