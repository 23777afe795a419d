//! Validation and round-trip tests for plant files.

use bf_model::seed;
use bf_plant::{load_plant, save_plant, validate_plant, ValidationError};
use chrono::Utc;

#[test]
fn seed_plant_is_valid() {
    let state = seed::demo_plant(Utc::now());
    validate_plant(&state).unwrap();
}

#[test]
fn duplicate_controller_id_is_rejected() {
    let mut state = seed::demo_plant(Utc::now());
    let copy = state.pid_controllers[0].clone();
    state.pid_controllers.push(copy);

    let err = validate_plant(&state).unwrap_err();
    assert!(matches!(err, ValidationError::DuplicateId { .. }));
}

#[test]
fn dangling_controller_sensor_is_rejected() {
    let mut state = seed::demo_plant(Utc::now());
    state.pid_controllers[0].sensor_id = "no-such-sensor".into();

    let err = validate_plant(&state).unwrap_err();
    assert!(matches!(err, ValidationError::MissingReference { .. }));
}

#[test]
fn dangling_connection_valve_is_rejected() {
    let mut state = seed::demo_plant(Utc::now());
    state.vessels[0].connections[0].valve_id = "no-such-valve".into();

    let err = validate_plant(&state).unwrap_err();
    assert!(matches!(err, ValidationError::MissingReference { .. }));
}

#[test]
fn overfilled_vessel_is_rejected() {
    let mut state = seed::demo_plant(Utc::now());
    state.vessels[0].current_volume = Some(state.vessels[0].volume + 1.0);

    let err = validate_plant(&state).unwrap_err();
    assert!(matches!(err, ValidationError::InvalidValue { .. }));
}

#[test]
fn out_of_range_output_is_rejected() {
    let mut state = seed::demo_plant(Utc::now());
    state.pid_controllers[0].output = 140.0;

    let err = validate_plant(&state).unwrap_err();
    assert!(matches!(err, ValidationError::InvalidValue { .. }));
}

#[test]
fn misowned_sensor_is_rejected() {
    let mut state = seed::demo_plant(Utc::now());
    state.devices[0].sensors[0].device_id = "esp32-boil".into();

    let err = validate_plant(&state).unwrap_err();
    assert!(matches!(err, ValidationError::InvalidValue { .. }));
}

#[test]
fn plant_file_round_trip() {
    let state = seed::demo_plant(Utc::now());
    let path = std::env::temp_dir().join(format!("bf-plant-test-{}.yaml", std::process::id()));

    save_plant(&path, &state).unwrap();
    let loaded = load_plant(&path).unwrap();
    std::fs::remove_file(&path).ok();

    assert_eq!(loaded, state);
}
