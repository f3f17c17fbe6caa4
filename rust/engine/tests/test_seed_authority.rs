use std::collections::HashSet;

use serde_json::json;

use ridesim_engine::errors::SeedError;
use ridesim_engine::seed::{create_generator, SeedAuthority, MAX_SEED};

use rand::Rng;

#[test]
fn hundred_thousand_session_seeds_are_unique_and_in_range() {
    let mut authority = SeedAuthority::new(42).unwrap();
    let seeds = authority.derive_session_seeds(100_000).unwrap();
    assert_eq!(seeds.len(), 100_000);
    assert_eq!(seeds.keys().copied().collect::<Vec<_>>(), (0..100_000).collect::<Vec<_>>());
    let distinct: HashSet<u32> = seeds.values().copied().collect();
    assert_eq!(distinct.len(), 100_000);
    assert!(seeds.values().all(|&s| s <= MAX_SEED));
    assert_eq!(authority.sessions_derived(), 100_000);
}

#[test]
fn different_base_seeds_derive_different_sequences() {
    let a = SeedAuthority::new(1).unwrap().derive_session_seeds(50).unwrap();
    let b = SeedAuthority::new(2).unwrap().derive_session_seeds(50).unwrap();
    assert_ne!(a, b);
}

#[test]
fn generators_from_the_same_seed_are_independent_instances() {
    let mut a = create_generator(77);
    let mut b = create_generator(77);
    let first: u64 = a.random();
    let _: u64 = a.random();
    assert_eq!(first, b.random::<u64>(), "advancing one generator must not move the other");
}

#[test]
fn export_then_import_continues_the_same_sequence() {
    let mut original = SeedAuthority::new(2024).unwrap();
    original.derive_session_seeds(10).unwrap();
    let state = original.export_state();

    let expected = original.derive_session_seeds(25).unwrap();

    let mut restored = SeedAuthority::from_state(&state).unwrap();
    assert_eq!(restored.base_seed(), 2024);
    assert_eq!(restored.sessions_derived(), 10);
    assert_eq!(restored.derive_session_seeds(25).unwrap(), expected);

    let mut other = SeedAuthority::new(1).unwrap();
    other.import_state(&state).unwrap();
    assert_eq!(other.derive_session_seeds(25).unwrap(), expected);
}

#[test]
fn exported_state_survives_a_json_text_round_trip() {
    let mut authority = SeedAuthority::new(5).unwrap();
    authority.derive_session_seeds(3).unwrap();
    let text = serde_json::to_string(&authority.export_state()).unwrap();
    let parsed: serde_json::Value = serde_json::from_str(&text).unwrap();
    let mut restored = SeedAuthority::from_state(&parsed).unwrap();
    assert_eq!(
        restored.derive_session_seeds(4).unwrap(),
        authority.derive_session_seeds(4).unwrap()
    );
}

fn valid_state() -> serde_json::Value {
    let mut authority = SeedAuthority::new(9).unwrap();
    authority.derive_session_seeds(2).unwrap();
    authority.export_state()
}

#[test]
fn import_rejects_missing_fields() {
    let mut state = valid_state();
    state.as_object_mut().unwrap().remove("sessions_derived");
    assert_eq!(
        SeedAuthority::from_state(&state).unwrap_err(),
        SeedError::MissingField("sessions_derived")
    );

    let mut state = valid_state();
    state["generator"].as_object_mut().unwrap().remove("key");
    assert_eq!(
        SeedAuthority::from_state(&state).unwrap_err(),
        SeedError::MissingField("generator.key")
    );
}

#[test]
fn import_rejects_wrong_types() {
    let mut state = valid_state();
    state["base_seed"] = json!("nine");
    assert!(matches!(
        SeedAuthority::from_state(&state),
        Err(SeedError::InvalidType { field: "base_seed", .. })
    ));

    let mut state = valid_state();
    state["generator"]["word_pos"] = json!(12);
    assert!(matches!(
        SeedAuthority::from_state(&state),
        Err(SeedError::InvalidType { field: "generator.word_pos", .. })
    ));

    assert!(matches!(
        SeedAuthority::from_state(&json!([1, 2, 3])),
        Err(SeedError::InvalidType { .. })
    ));
}

#[test]
fn import_rejects_out_of_range_values() {
    let mut state = valid_state();
    state["base_seed"] = json!(u64::from(MAX_SEED) + 1);
    assert!(matches!(
        SeedAuthority::from_state(&state),
        Err(SeedError::OutOfRange { field: "base_seed", .. })
    ));

    let mut state = valid_state();
    state["version"] = json!(99);
    assert!(matches!(
        SeedAuthority::from_state(&state),
        Err(SeedError::OutOfRange { field: "version", .. })
    ));

    let mut state = valid_state();
    state["generator"]["word_pos"] = json!((1u128 << 68).to_string());
    assert!(matches!(
        SeedAuthority::from_state(&state),
        Err(SeedError::OutOfRange { field: "generator.word_pos", .. })
    ));
}

#[test]
fn import_rejects_key_that_does_not_match_base_seed() {
    let mut state = valid_state();
    state["base_seed"] = json!(10);
    assert_eq!(
        SeedAuthority::from_state(&state).unwrap_err(),
        SeedError::Inconsistent("generator.key")
    );
}

#[test]
fn failed_import_leaves_state_untouched() {
    let mut authority = SeedAuthority::new(3).unwrap();
    authority.derive_session_seeds(4).unwrap();
    let before = authority.export_state();

    let mut broken = valid_state();
    broken["generator"]["key"] = json!("not hex");
    assert!(authority.import_state(&broken).is_err());
    assert_eq!(authority.export_state(), before);
}
