//! Risk model: baseline profile + shocks -> post-shock risk score.
//!
//! Each macro factor contributes an independent, additive delta to the
//! baseline risk. The sum is clamped to [0, 1] and rounded to two
//! decimals. Two variants exist:
//!   - FiveFactor: rate, loan, deposit, volatility, growth
//!   - ThreeFactor: rate, loan, deposit (volatility and growth ignored)
//!
//! Both variants share the clamp and rounding contract.

use crate::{
    client::ClientProfile,
    config::RiskLevelThresholds,
    shock::ShockParameters,
    types::RiskScore,
};
use serde::{Deserialize, Serialize};

/// Decimal places of a simulated risk score.
pub const RISK_DECIMALS: i32 = 2;

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FiveFactorWeights {
    /// Risk per percentage point of rate change.
    pub interest_rate:     f64,
    /// Risk per 100% of loan-amount change.
    pub loan_amount:       f64,
    /// Risk per 100% of deposit-amount change.
    pub deposit_amount:    f64,
    /// Risk per unit of market volatility.
    pub market_volatility: f64,
    /// Risk per percentage point of growth.
    pub economic_growth:   f64,
}

impl Default for FiveFactorWeights {
    fn default() -> Self {
        Self {
            interest_rate:     0.035,
            loan_amount:       0.02,
            deposit_amount:    -0.015,
            market_volatility: 0.05,
            economic_growth:   -0.02,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ThreeFactorWeights {
    pub interest_rate:  f64,
    pub loan_amount:    f64,
    pub deposit_amount: f64,
}

impl Default for ThreeFactorWeights {
    fn default() -> Self {
        Self {
            interest_rate:  0.05,
            loan_amount:    0.02,
            deposit_amount: -0.015,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "variant", rename_all = "snake_case")]
pub enum RiskModel {
    ThreeFactor(ThreeFactorWeights),
    FiveFactor(FiveFactorWeights),
}

impl Default for RiskModel {
    fn default() -> Self {
        Self::FiveFactor(FiveFactorWeights::default())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RiskFactor {
    InterestRate,
    LoanAmount,
    DepositAmount,
    MarketVolatility,
    EconomicGrowth,
}

impl RiskFactor {
    pub fn label(&self) -> &'static str {
        match self {
            Self::InterestRate     => "interest rate",
            Self::LoanAmount       => "loans",
            Self::DepositAmount    => "deposits",
            Self::MarketVolatility => "market volatility",
            Self::EconomicGrowth   => "economic growth",
        }
    }
}

/// Signed delta one factor adds to the baseline.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct FactorContribution {
    pub factor: RiskFactor,
    pub delta:  f64,
}

/// One bar of the cumulative breakdown chart.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(tag = "stage", rename_all = "snake_case")]
pub enum WaterfallStep {
    Current { risk: f64 },
    After { factor: RiskFactor, risk: f64 },
    Final { risk: f64 },
}

impl WaterfallStep {
    pub fn risk(&self) -> f64 {
        match *self {
            Self::Current { risk } | Self::After { risk, .. } | Self::Final { risk } => risk,
        }
    }
}

impl RiskModel {
    pub fn three_factor() -> Self {
        Self::ThreeFactor(ThreeFactorWeights::default())
    }

    pub fn five_factor() -> Self {
        Self::FiveFactor(FiveFactorWeights::default())
    }

    pub fn name(&self) -> &'static str {
        match self {
            Self::ThreeFactor(_) => "three_factor",
            Self::FiveFactor(_)  => "five_factor",
        }
    }

    /// Per-factor deltas, in fixed factor order.
    pub fn contributions(&self, shocks: &ShockParameters) -> Vec<FactorContribution> {
        let rate = |w: f64| FactorContribution {
            factor: RiskFactor::InterestRate,
            delta:  shocks.interest_rate_change * w,
        };
        let loan = |w: f64| FactorContribution {
            factor: RiskFactor::LoanAmount,
            delta:  (shocks.loan_amount_change / 100.0) * w,
        };
        let deposit = |w: f64| FactorContribution {
            factor: RiskFactor::DepositAmount,
            delta:  (shocks.deposit_amount_change / 100.0) * w,
        };

        match self {
            Self::ThreeFactor(w) => vec![
                rate(w.interest_rate),
                loan(w.loan_amount),
                deposit(w.deposit_amount),
            ],
            Self::FiveFactor(w) => vec![
                rate(w.interest_rate),
                loan(w.loan_amount),
                deposit(w.deposit_amount),
                FactorContribution {
                    factor: RiskFactor::MarketVolatility,
                    delta:  shocks.market_volatility * w.market_volatility,
                },
                FactorContribution {
                    factor: RiskFactor::EconomicGrowth,
                    delta:  shocks.economic_growth * w.economic_growth,
                },
            ],
        }
    }

    /// Baseline plus every contribution, before clamping and rounding.
    pub fn raw_risk(&self, baseline: RiskScore, shocks: &ShockParameters) -> f64 {
        self.contributions(shocks)
            .iter()
            .fold(baseline, |acc, c| acc + c.delta)
    }

    /// Post-shock risk for `profile`: clamped to [0, 1], two decimals.
    pub fn simulate(&self, profile: &ClientProfile, shocks: &ShockParameters) -> RiskScore {
        finalize_risk(self.raw_risk(profile.baseline_risk, shocks))
    }

    /// Cumulative breakdown: the baseline, the running total after each
    /// factor (unclamped), then the final clamped score.
    pub fn waterfall(&self, profile: &ClientProfile, shocks: &ShockParameters) -> Vec<WaterfallStep> {
        let contributions = self.contributions(shocks);
        let mut steps = Vec::with_capacity(contributions.len() + 2);
        let mut running = profile.baseline_risk;

        steps.push(WaterfallStep::Current { risk: running });
        for c in &contributions {
            running += c.delta;
            steps.push(WaterfallStep::After { factor: c.factor, risk: running });
        }
        steps.push(WaterfallStep::Final { risk: finalize_risk(running) });
        steps
    }
}

/// Five-factor simulation with the reference coefficients.
pub fn simulate_risk(profile: &ClientProfile, shocks: &ShockParameters) -> RiskScore {
    RiskModel::default().simulate(profile, shocks)
}

fn finalize_risk(raw: f64) -> RiskScore {
    round_to(raw.clamp(0.0, 1.0), RISK_DECIMALS)
}

/// Round half away from zero to `decimals` places.
pub fn round_to(value: f64, decimals: i32) -> f64 {
    let factor = 10f64.powi(decimals);
    (value * factor).round() / factor
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RiskLevel {
    Low,
    Moderate,
    High,
}

impl RiskLevel {
    pub fn classify(score: RiskScore, thresholds: &RiskLevelThresholds) -> Self {
        if score > thresholds.high_above {
            Self::High
        } else if score > thresholds.moderate_above {
            Self::Moderate
        } else {
            Self::Low
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Low      => "low",
            Self::Moderate => "moderate",
            Self::High     => "high",
        }
    }
}
