use riskdesk_core::{
    config::{EngineConfig, RangePolicy},
    risk_model::RiskModel,
    shock::ShockParameters,
};

#[test]
fn defaults_match_dashboard_behaviour() {
    let config = EngineConfig::default();
    assert_eq!(config.model, RiskModel::five_factor());
    assert_eq!(config.range_policy, RangePolicy::Advisory);
    assert_eq!(config.comparison_capacity, 3);
    assert_eq!(config.shock_bounds.interest_rate_change.min, -5.0);
    assert_eq!(config.shock_bounds.economic_growth.max, 5.0);
    assert!(config.validate().is_ok());

    assert_eq!(EngineConfig::default_test().range_policy, RangePolicy::Enforce);
}

#[test]
fn partial_json_keeps_defaults_elsewhere() {
    let config = EngineConfig::from_json(
        r#"{ "range_policy": "enforce", "shock_bounds": { "market_volatility": { "min": 0.0, "max": 2.0 } } }"#,
    )
    .unwrap();

    assert_eq!(config.range_policy, RangePolicy::Enforce);
    assert_eq!(config.shock_bounds.market_volatility.max, 2.0);
    assert_eq!(config.shock_bounds.loan_amount_change.max, 20.0);
    assert_eq!(config.comparison_capacity, 3);

    let shocks = ShockParameters::new(0.0, 0.0, 0.0, 1.5, 0.0);
    assert!(shocks.check(&config.shock_bounds, config.range_policy).is_ok());
}

#[test]
fn zero_capacity_is_rejected() {
    let err = EngineConfig::from_json(r#"{ "comparison_capacity": 0 }"#).unwrap_err();
    assert!(err.to_string().contains("comparison_capacity"), "{err}");
}

#[test]
fn inverted_bounds_are_rejected() {
    let err = EngineConfig::from_json(
        r#"{ "shock_bounds": { "economic_growth": { "min": 4.0, "max": -1.0 } } }"#,
    )
    .unwrap_err();
    assert!(err.to_string().contains("economicGrowth"), "{err}");

    let err = EngineConfig::from_json(
        r#"{ "risk_levels": { "moderate_above": 0.8, "high_above": 0.7 } }"#,
    )
    .unwrap_err();
    assert!(err.to_string().contains("moderate_above"), "{err}");
}

#[test]
fn missing_config_file_is_an_error() {
    let err = EngineConfig::load("/nonexistent/engine.json").unwrap_err();
    assert!(err.to_string().contains("Cannot read"), "{err}");
}
