use std::io::Write;

use rust_decimal_macros::dec;
use tripsplit::core::trip::{ParticipantId, Trip};
use tripsplit::core::{compute_balances, compute_report, compute_settlement};

fn write_trip(content: &str) -> tempfile::NamedTempFile {
    let mut file = tempfile::NamedTempFile::new().expect("Failed to create temp file");
    file.write_all(content.as_bytes())
        .expect("Failed to write trip file");
    file
}

#[test]
fn full_flow_from_trip_file_to_settlement() {
    let trip_file = write_trip(
        r#"
name: "Nha Trang"
settlement_currency: "VND"
rounding_unit: 1000
participants:
  - id: 1
    name: "An"
    coefficient: 1.0
  - id: 2
    name: "Binh"
    coefficient: 1.0
  - id: 3
    name: "Cu Ti"
    coefficient: 0.5
expenses:
  - id: 1
    description: "Beach house"
    amount: 300000
    currency: "VND"
    payer: 1
    category: accommodation
    date: 2024-05-01
"#,
    );

    let trip = Trip::load_from_path(trip_file.path()).unwrap();
    let balances = compute_balances(&trip).unwrap();

    assert_eq!(balances[0].paid, dec!(300000));
    assert_eq!(balances[0].owed, dec!(120000));
    assert_eq!(balances[0].balance, dec!(180000));
    assert_eq!(balances[1].balance, dec!(-120000));
    assert_eq!(balances[2].balance, dec!(-60000));

    let plan = compute_settlement(&trip).unwrap();
    assert_eq!(plan.len(), 2);
    assert_eq!(
        (plan[0].from, plan[0].to, plan[0].amount),
        (ParticipantId(2), ParticipantId(1), dec!(120000))
    );
    assert_eq!(
        (plan[1].from, plan[1].to, plan[1].amount),
        (ParticipantId(3), ParticipantId(1), dec!(60000))
    );
}

#[test]
fn mixed_currency_trip_reports_in_the_settlement_currency() {
    let trip_file = write_trip(
        r#"
name: "Hoi An"
settlement_currency: "VND"
rounding_unit: 1000
participants:
  - id: 1
    name: "An"
    coefficient: 1.0
  - id: 2
    name: "Binh"
    coefficient: 1.0
expenses:
  - id: 1
    description: "Lanterns"
    amount: 150000
    currency: "VND"
    payer: 1
    category: shopping
    date: 2024-05-02
  - id: 2
    description: "Cooking class"
    amount: 10
    currency: "USD"
    exchange_rate: 25000
    payer: 2
    category: entertainment
    date: 2024-05-03
  - id: 3
    description: "Postcards home"
    amount: 40000
    currency: "VND"
    payer: 2
    category: shopping
    shared: false
    date: 2024-05-03
"#,
    );

    let trip = Trip::load_from_path(trip_file.path()).unwrap();
    let report = compute_report(&trip).unwrap();

    assert_eq!(report.total_shared, dec!(400000));
    assert_eq!(report.total_spend, dec!(440000));
    assert_eq!(report.by_category[0].total, dec!(250000));
    assert_eq!(report.by_category[0].percent, dec!(62.5));
    assert_eq!(report.by_day.len(), 2);
    assert_eq!(report.by_day[1].total, dec!(250000));
    // Cash flow toward shared spend only
    assert_eq!(report.by_participant[1].total, dec!(250000));

    let balances = compute_balances(&trip).unwrap();
    let sum: rust_decimal::Decimal = balances.iter().map(|b| b.balance).sum();
    assert_eq!(sum, dec!(0));
}

#[test]
fn missing_exchange_rate_surfaces_a_corrective_error() {
    let trip_file = write_trip(
        r#"
name: "Broken"
settlement_currency: "VND"
participants:
  - id: 1
    name: "An"
    coefficient: 1.0
expenses:
  - id: 1
    description: "Mystery charge"
    amount: 12
    currency: "EUR"
    payer: 1
    date: 2024-05-01
"#,
    );

    let trip = Trip::load_from_path(trip_file.path()).unwrap();
    let err = compute_balances(&trip).unwrap_err();
    let message = err.to_string();
    assert!(message.contains("Mystery charge"));
    assert!(message.contains("EUR"));
    assert!(message.contains("exchange rate"));
}

#[test]
fn setup_example_is_computable_end_to_end() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("trip.yaml");
    tripsplit::cli::setup::setup_at_path(&path).unwrap();

    let trip = Trip::load_from_path(&path).unwrap();
    let balances = compute_balances(&trip).unwrap();
    let plan = compute_settlement(&trip).unwrap();
    let report = compute_report(&trip).unwrap();

    assert_eq!(balances.len(), trip.participants.len());
    assert!(plan.len() <= trip.participants.len() - 1);
    assert!(report.total_spend >= report.total_shared);
}
