//! Engine configuration.
//!
//! Every section has a default, so a config file only needs to name
//! what it overrides. `EngineConfig::default()` is the production
//! setup; tests use `EngineConfig::default_test()`.

use crate::{
    comparison::DEFAULT_COMPARISON_CAPACITY,
    risk_model::RiskModel,
    shock::ShockField,
};
use serde::{Deserialize, Serialize};
use std::path::Path;

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Bound {
    pub min: f64,
    pub max: f64,
}

impl Bound {
    pub const fn new(min: f64, max: f64) -> Self {
        Self { min, max }
    }

    pub fn contains(&self, value: f64) -> bool {
        value >= self.min && value <= self.max
    }
}

/// Recognised range of each shock parameter.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ShockBounds {
    pub interest_rate_change:  Bound,
    pub loan_amount_change:    Bound,
    pub deposit_amount_change: Bound,
    pub market_volatility:     Bound,
    pub economic_growth:       Bound,
}

impl Default for ShockBounds {
    fn default() -> Self {
        Self {
            interest_rate_change:  Bound::new(-5.0, 5.0),
            loan_amount_change:    Bound::new(-20.0, 20.0),
            deposit_amount_change: Bound::new(-20.0, 20.0),
            market_volatility:     Bound::new(0.0, 1.0),
            economic_growth:       Bound::new(-3.0, 5.0),
        }
    }
}

impl ShockBounds {
    pub fn for_field(&self, field: ShockField) -> Bound {
        match field {
            ShockField::InterestRateChange  => self.interest_rate_change,
            ShockField::LoanAmountChange    => self.loan_amount_change,
            ShockField::DepositAmountChange => self.deposit_amount_change,
            ShockField::MarketVolatility    => self.market_volatility,
            ShockField::EconomicGrowth      => self.economic_growth,
        }
    }
}

/// What to do with a shock outside its recognised range.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RangePolicy {
    /// Log a warning and run anyway.
    #[default]
    Advisory,
    /// Reject the run with `ShockOutOfRange`.
    Enforce,
}

/// Score cut-offs for the Low / Moderate / High bands.
/// A score strictly above `moderate_above` is at least Moderate.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RiskLevelThresholds {
    pub moderate_above: f64,
    pub high_above:     f64,
}

impl Default for RiskLevelThresholds {
    fn default() -> Self {
        Self {
            moderate_above: 0.4,
            high_above:     0.7,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EngineConfig {
    pub model:               RiskModel,
    pub shock_bounds:        ShockBounds,
    pub range_policy:        RangePolicy,
    pub risk_levels:         RiskLevelThresholds,
    pub comparison_capacity: usize,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            model:               RiskModel::default(),
            shock_bounds:        ShockBounds::default(),
            range_policy:        RangePolicy::Advisory,
            risk_levels:         RiskLevelThresholds::default(),
            comparison_capacity: DEFAULT_COMPARISON_CAPACITY,
        }
    }
}

impl EngineConfig {
    /// Load from a JSON file. Missing sections fall back to defaults.
    pub fn load(path: impl AsRef<Path>) -> anyhow::Result<Self> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path)
            .map_err(|e| anyhow::anyhow!("Cannot read {}: {e}", path.display()))?;
        Self::from_json(&content)
    }

    pub fn from_json(content: &str) -> anyhow::Result<Self> {
        let config: EngineConfig = serde_json::from_str(content)?;
        config.validate()?;
        Ok(config)
    }

    /// Strict variant used by the test suite: out-of-range shocks fail.
    pub fn default_test() -> Self {
        Self {
            range_policy: RangePolicy::Enforce,
            ..Self::default()
        }
    }

    pub fn validate(&self) -> anyhow::Result<()> {
        if self.comparison_capacity == 0 {
            anyhow::bail!("comparison_capacity must be at least 1");
        }
        if self.risk_levels.moderate_above > self.risk_levels.high_above {
            anyhow::bail!(
                "risk_levels.moderate_above ({}) exceeds high_above ({})",
                self.risk_levels.moderate_above,
                self.risk_levels.high_above
            );
        }
        for field in ShockField::ALL {
            let bound = self.shock_bounds.for_field(field);
            if bound.min.is_nan() || bound.max.is_nan() || bound.min > bound.max {
                anyhow::bail!("shock_bounds.{}: min {} > max {}", field.name(), bound.min, bound.max);
            }
        }
        Ok(())
    }
}
