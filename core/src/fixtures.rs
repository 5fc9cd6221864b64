//! Reference data shipped with the dashboard: six institutions and
//! two saved scenarios. Used as the default directory, by the
//! `scenario-runner` tool and throughout the test suite.

use crate::{
    client::ClientProfile,
    scenario::{ImpactStatus, Scenario, ScenarioResult},
    shock::ShockParameters,
};
use chrono::NaiveDate;

pub(crate) fn date(year: i32, month: u32, day: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(year, month, day).unwrap_or(NaiveDate::MIN)
}

pub fn reference_clients() -> Vec<ClientProfile> {
    [
        (1, "Banque Nationale", 5_000_000.0, 7_500_000.0, 0.35, (2023, 4, 15)),
        (2, "Crédit Mutuel", 3_500_000.0, 4_200_000.0, 0.42, (2023, 4, 12)),
        (3, "BNP Paribas", 8_200_000.0, 9_100_000.0, 0.28, (2023, 4, 10)),
        (4, "Société Générale", 6_100_000.0, 5_800_000.0, 0.51, (2023, 4, 8)),
        (5, "HSBC France", 4_300_000.0, 6_200_000.0, 0.33, (2023, 4, 5)),
        (6, "Crédit Agricole", 7_200_000.0, 8_500_000.0, 0.31, (2023, 4, 3)),
    ]
    .into_iter()
    .map(|(id, name, loans, deposits, risk, (y, m, d))| {
        ClientProfile::new(id, name, loans, deposits, risk)
            .with_type("Banque")
            .with_last_updated(date(y, m, d))
    })
    .collect()
}

fn saved_result(client_id: u64, client_name: &str, before: f64, after: f64, impact: f64) -> ScenarioResult {
    ScenarioResult {
        client_id,
        client_name: client_name.into(),
        risk_before: before,
        risk_after: after,
        impact,
        non_computable: false,
        status: ImpactStatus::from_change(before, after),
    }
}

pub fn reference_scenarios() -> Vec<Scenario> {
    vec![
        Scenario {
            id: 1,
            name: "Hausse des taux d'intérêt".into(),
            description: "Simulation d'une hausse des taux d'intérêt de 2% avec stabilité des autres facteurs".into(),
            shocks: ShockParameters::new(2.0, 0.0, 0.0, 0.5, 1.2),
            results: vec![
                saved_result(1, "Banque Nationale", 0.35, 0.42, 20.0),
                saved_result(2, "Crédit Mutuel", 0.42, 0.48, 14.3),
                saved_result(3, "BNP Paribas", 0.28, 0.33, 17.9),
            ],
            timestamp: date(2023, 4, 20),
        },
        Scenario {
            id: 2,
            name: "Crise économique".into(),
            description: "Simulation d'une crise économique avec baisse des dépôts et hausse de la volatilité".into(),
            shocks: ShockParameters::new(1.5, 5.0, -15.0, 0.8, -0.5),
            results: vec![
                saved_result(1, "Banque Nationale", 0.35, 0.52, 48.6),
                saved_result(2, "Crédit Mutuel", 0.42, 0.61, 45.2),
                saved_result(3, "BNP Paribas", 0.28, 0.45, 60.7),
            ],
            timestamp: date(2023, 4, 18),
        },
    ]
}
