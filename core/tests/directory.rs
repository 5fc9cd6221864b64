//! Client directory: reference data, REST records and synthetic profiles.

use chrono::NaiveDate;
use riskdesk_core::{
    client::ClientProfile,
    directory::ClientDirectory,
    error::EngineError,
};

#[test]
fn reference_directory_has_six_banks() {
    let directory = ClientDirectory::reference();
    assert_eq!(directory.len(), 6);
    assert_eq!(directory.ids(), vec![1, 2, 3, 4, 5, 6]);

    let sg = directory.get(4).unwrap();
    assert_eq!(sg.name, "Société Générale");
    assert_eq!(sg.baseline_risk, 0.51);
    assert_eq!(sg.institution_type.as_deref(), Some("Banque"));
    assert_eq!(sg.last_updated, NaiveDate::from_ymd_opt(2023, 4, 8));
}

#[test]
fn rest_records_parse_and_ignore_extra_fields() {
    let json = r#"[
        {
            "id": 11,
            "name": "Banque Populaire",
            "type": "Banque",
            "loanAmount": 2500000,
            "depositAmount": 3100000.5,
            "calculatedRisk": 0.38,
            "lastUpdated": "2023-05-02",
            "riskHistory": [0.31, 0.35]
        },
        {
            "id": 12,
            "name": "Caisse d'Épargne",
            "loanAmount": 1200000,
            "depositAmount": 900000,
            "calculatedRisk": 0.47
        }
    ]"#;

    let directory = ClientDirectory::from_json(json).unwrap();
    assert_eq!(directory.len(), 2);

    let bp = directory.get(11).unwrap();
    assert_eq!(bp.loan_amount, 2_500_000.0);
    assert_eq!(bp.last_updated, NaiveDate::from_ymd_opt(2023, 5, 2));

    let ce = directory.get(12).unwrap();
    assert!(ce.institution_type.is_none());
    assert!(ce.last_updated.is_none());
}

#[test]
fn profile_serializes_with_rest_field_names() {
    let value = serde_json::to_value(ClientProfile::new(1, "Banque Nationale", 1.0, 2.0, 0.35)).unwrap();
    assert_eq!(value["calculatedRisk"], 0.35);
    assert_eq!(value["loanAmount"], 1.0);
    assert!(value.get("type").is_none());
    assert!(value.get("baselineRisk").is_none());
}

#[test]
fn invalid_profiles_are_rejected() {
    let cases = [
        ClientProfile::new(1, "", 1.0, 1.0, 0.3),
        ClientProfile::new(2, "Neg", -1.0, 1.0, 0.3),
        ClientProfile::new(3, "Nan", 1.0, f64::NAN, 0.3),
        ClientProfile::new(4, "High", 1.0, 1.0, 1.2),
        ClientProfile::new(5, "Low", 1.0, 1.0, -0.01),
    ];
    for client in cases {
        let id = client.id;
        let err = ClientDirectory::from_profiles(vec![client]).unwrap_err();
        assert!(
            matches!(err, EngineError::InvalidClient { id: bad, .. } if bad == id),
            "Unexpected error for client {id}: {err}"
        );
    }
}

#[test]
fn duplicate_ids_are_rejected() {
    let err = ClientDirectory::from_profiles(vec![
        ClientProfile::new(1, "A", 1.0, 1.0, 0.3),
        ClientProfile::new(1, "B", 1.0, 1.0, 0.4),
    ])
    .unwrap_err();
    assert!(matches!(err, EngineError::DuplicateClient { id: 1 }), "Unexpected error: {err}");
}

#[test]
fn select_returns_directory_order_and_skips_unknown_ids() {
    let directory = ClientDirectory::reference();
    let picked: Vec<u64> = directory.select(&[5, 2, 42]).iter().map(|c| c.id).collect();
    assert_eq!(picked, vec![2, 5]);

    assert!(directory.require(42).is_err());
    assert_eq!(directory.require(2).unwrap().name, "Crédit Mutuel");
}

#[test]
fn synthetic_profiles_are_valid() {
    let directory = ClientDirectory::synthetic(7, 200);
    assert_eq!(directory.len(), 200);
    assert_eq!(directory.ids().first(), Some(&1));
    assert_eq!(directory.ids().last(), Some(&200));

    for client in directory.iter() {
        client.validate().unwrap();
        assert!((0.05..=0.95).contains(&client.baseline_risk), "{}", client.baseline_risk);
        assert!((1.0e6..=10.0e6).contains(&client.loan_amount));
        assert!(client.deposit_amount > 0.0);
        assert!(client.institution_type.is_some());
        assert!(client.last_updated.is_some());
    }

    // Synthetic data must pass the same validation as imported data.
    let rebuilt = ClientDirectory::from_profiles(directory.as_slice().to_vec()).unwrap();
    assert_eq!(rebuilt.len(), 200);
}

#[test]
fn missing_directory_file_is_an_error() {
    let err = ClientDirectory::load("/nonexistent/clients.json").unwrap_err();
    assert!(err.to_string().contains("Cannot read"), "{err}");
}
