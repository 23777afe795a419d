//! Seed data for the demo plant.
//!
//! A three-vessel train (mash tun, boil kettle, fermenter) with two closed
//! temperature loops, two running processes, one recipe, and one open alarm.
//! All timestamps are derived from the `now` argument so callers (and tests)
//! control the clock.

use crate::alarm::{Alarm, AlarmCategory, AlarmSeverity};
use crate::controller::{PidController, ThermalMode};
use crate::device::{Device, DeviceKind};
use crate::equipment::{ControlMode, Equipment, EquipmentKind, RunStatus};
use crate::process::{BrewingProcess, ProcessKind, ProcessStatus};
use crate::recipe::{BrewingStep, FermentationProfile, FermentationStep, Recipe, StepKind};
use crate::sensor::{Health, Sensor, SensorKind};
use crate::state::{PlantState, SystemStatus};
use crate::vessel::{
    HeatingElement, PipeConnection, Position, TemperatureReading, Vessel, VesselKind,
};
use chrono::{DateTime, Duration, Utc};

/// Build the demo plant as of `now`.
pub fn demo_plant(now: DateTime<Utc>) -> PlantState {
    PlantState {
        devices: devices(now),
        vessels: vessels(),
        processes: processes(now),
        recipes: recipes(now),
        pid_controllers: pid_controllers(),
        fermentation_profiles: fermentation_profiles(),
        alarms: alarms(now),
        mqtt_connected: true,
        system_status: SystemStatus::Normal,
    }
}

fn devices(now: DateTime<Utc>) -> Vec<Device> {
    vec![
        Device {
            id: "esp32-mash".into(),
            name: "Mash Tun Controller".to_string(),
            kind: DeviceKind::Esp32,
            status: Health::Online,
            ip_address: Some("192.168.1.100".to_string()),
            mqtt_topic: "brewery/mash".to_string(),
            last_seen: now,
            firmware_version: Some("2.1.0".to_string()),
            battery_level: None,
            sensors: vec![Sensor {
                id: "temp-mash".into(),
                name: "Mash Temperature".to_string(),
                kind: SensorKind::Temperature,
                value: 65.5,
                unit: "°C".to_string(),
                status: Health::Online,
                last_update: now,
                device_id: "esp32-mash".into(),
                min_value: Some(0.0),
                max_value: Some(100.0),
                calibration_offset: None,
            }],
            equipment: vec![
                Equipment {
                    id: "element-mash".into(),
                    name: "Mash Heating Element".to_string(),
                    kind: EquipmentKind::Heater,
                    status: RunStatus::Auto,
                    power: Some(75.0),
                    control_mode: ControlMode::Pid,
                    device_id: "esp32-mash".into(),
                    flow_rate: None,
                    is_open: None,
                },
                Equipment {
                    id: "pump-mash".into(),
                    name: "Recirculation Pump".to_string(),
                    kind: EquipmentKind::Pump,
                    status: RunStatus::On,
                    power: None,
                    control_mode: ControlMode::Manual,
                    device_id: "esp32-mash".into(),
                    flow_rate: Some(15.0),
                    is_open: None,
                },
                Equipment {
                    id: "valve-mash-boil".into(),
                    name: "Mash Transfer Valve".to_string(),
                    kind: EquipmentKind::Valve,
                    status: RunStatus::Off,
                    power: None,
                    control_mode: ControlMode::Manual,
                    device_id: "esp32-mash".into(),
                    flow_rate: None,
                    is_open: Some(false),
                },
                Equipment {
                    id: "pump-transfer".into(),
                    name: "Transfer Pump".to_string(),
                    kind: EquipmentKind::Pump,
                    status: RunStatus::Off,
                    power: None,
                    control_mode: ControlMode::Manual,
                    device_id: "esp32-mash".into(),
                    flow_rate: Some(20.0),
                    is_open: None,
                },
            ],
        },
        Device {
            id: "esp32-boil".into(),
            name: "Boil Kettle Controller".to_string(),
            kind: DeviceKind::Esp32,
            status: Health::Online,
            ip_address: Some("192.168.1.101".to_string()),
            mqtt_topic: "brewery/boil".to_string(),
            last_seen: now,
            firmware_version: Some("2.1.0".to_string()),
            battery_level: None,
            sensors: vec![Sensor {
                id: "temp-boil".into(),
                name: "Boil Temperature".to_string(),
                kind: SensorKind::Temperature,
                value: 98.2,
                unit: "°C".to_string(),
                status: Health::Online,
                last_update: now,
                device_id: "esp32-boil".into(),
                min_value: None,
                max_value: None,
                calibration_offset: None,
            }],
            equipment: vec![
                Equipment {
                    id: "element-boil".into(),
                    name: "Boil Heating Element".to_string(),
                    kind: EquipmentKind::Heater,
                    status: RunStatus::On,
                    power: Some(100.0),
                    control_mode: ControlMode::Manual,
                    device_id: "esp32-boil".into(),
                    flow_rate: None,
                    is_open: None,
                },
                Equipment {
                    id: "valve-boil-ferment".into(),
                    name: "Kettle Outlet Valve".to_string(),
                    kind: EquipmentKind::Valve,
                    status: RunStatus::Off,
                    power: None,
                    control_mode: ControlMode::Manual,
                    device_id: "esp32-boil".into(),
                    flow_rate: None,
                    is_open: Some(false),
                },
            ],
        },
        Device {
            id: "esp32-ferment".into(),
            name: "Fermentation Controller".to_string(),
            kind: DeviceKind::Esp32,
            status: Health::Online,
            ip_address: Some("192.168.1.102".to_string()),
            mqtt_topic: "brewery/fermenter1".to_string(),
            last_seen: now,
            firmware_version: Some("2.1.0".to_string()),
            battery_level: None,
            sensors: vec![],
            equipment: vec![Equipment {
                id: "cooler-ferment-001".into(),
                name: "Glycol Chiller Valve".to_string(),
                kind: EquipmentKind::Cooler,
                status: RunStatus::Auto,
                power: Some(0.0),
                control_mode: ControlMode::Pid,
                device_id: "esp32-ferment".into(),
                flow_rate: None,
                is_open: None,
            }],
        },
        Device {
            id: "rapt-pill-001".into(),
            name: "RAPT Pill Fermenter 1".to_string(),
            kind: DeviceKind::Hydrometer,
            status: Health::Online,
            ip_address: None,
            mqtt_topic: "brewery/fermenter1/pill".to_string(),
            last_seen: now,
            firmware_version: None,
            battery_level: Some(85.0),
            sensors: vec![
                Sensor {
                    id: "density-001".into(),
                    name: "Specific Gravity".to_string(),
                    kind: SensorKind::Density,
                    value: 1.020,
                    unit: "SG".to_string(),
                    status: Health::Online,
                    last_update: now,
                    device_id: "rapt-pill-001".into(),
                    min_value: None,
                    max_value: None,
                    calibration_offset: None,
                },
                Sensor {
                    id: "temp-ferment-001".into(),
                    name: "Fermentation Temperature".to_string(),
                    kind: SensorKind::Temperature,
                    value: 20.5,
                    unit: "°C".to_string(),
                    status: Health::Online,
                    last_update: now,
                    device_id: "rapt-pill-001".into(),
                    min_value: None,
                    max_value: None,
                    calibration_offset: None,
                },
            ],
            equipment: vec![],
        },
    ]
}

fn vessels() -> Vec<Vessel> {
    vec![
        Vessel {
            id: "mash-tun".into(),
            name: "Mash Tun".to_string(),
            kind: VesselKind::MashTun,
            volume: 50.0,
            current_volume: Some(35.0),
            temperature: TemperatureReading {
                current: 65.5,
                target: 66.0,
                sensor_id: "temp-mash".into(),
            },
            heating_element: Some(HeatingElement {
                equipment_id: "element-mash".into(),
                power: 75.0,
                max_power: 100.0,
            }),
            position: Position { x: 100.0, y: 200.0 },
            connections: vec![PipeConnection {
                vessel_id: "boil-kettle".into(),
                valve_id: "valve-mash-boil".into(),
                pump_id: Some("pump-transfer".into()),
            }],
        },
        Vessel {
            id: "boil-kettle".into(),
            name: "Boil Kettle".to_string(),
            kind: VesselKind::BoilKettle,
            volume: 60.0,
            current_volume: Some(40.0),
            temperature: TemperatureReading {
                current: 98.2,
                target: 100.0,
                sensor_id: "temp-boil".into(),
            },
            heating_element: Some(HeatingElement {
                equipment_id: "element-boil".into(),
                power: 100.0,
                max_power: 100.0,
            }),
            position: Position { x: 400.0, y: 200.0 },
            connections: vec![PipeConnection {
                vessel_id: "fermenter-001".into(),
                valve_id: "valve-boil-ferment".into(),
                pump_id: None,
            }],
        },
        Vessel {
            id: "fermenter-001".into(),
            name: "Fermenter 1".to_string(),
            kind: VesselKind::Fermenter,
            volume: 50.0,
            current_volume: Some(38.0),
            temperature: TemperatureReading {
                current: 20.5,
                target: 20.0,
                sensor_id: "temp-ferment-001".into(),
            },
            heating_element: None,
            position: Position { x: 700.0, y: 200.0 },
            connections: vec![],
        },
    ]
}

fn processes(now: DateTime<Utc>) -> Vec<BrewingProcess> {
    vec![
        BrewingProcess {
            id: "brew-session-001".into(),
            name: "IPA Session".to_string(),
            recipe_id: Some("recipe-ipa-001".into()),
            kind: ProcessKind::Mash,
            status: ProcessStatus::Running,
            start_time: Some(now - Duration::minutes(45)),
            end_time: None,
            current_step: 2,
            total_steps: 5,
            progress: 40.0,
            current_step_start_time: Some(now - Duration::minutes(15)),
            estimated_time_remaining: Some(75.0),
        },
        BrewingProcess {
            id: "ferment-001".into(),
            name: "IPA Fermentation".to_string(),
            recipe_id: None,
            kind: ProcessKind::Fermentation,
            status: ProcessStatus::Running,
            start_time: Some(now - Duration::days(3)),
            end_time: None,
            current_step: 1,
            total_steps: 3,
            progress: 30.0,
            current_step_start_time: None,
            estimated_time_remaining: None,
        },
    ]
}

fn recipes(now: DateTime<Utc>) -> Vec<Recipe> {
    vec![Recipe {
        id: "recipe-ipa-001".into(),
        name: "American IPA".to_string(),
        style: "American IPA".to_string(),
        batch_size: 40.0,
        steps: vec![
            BrewingStep {
                id: "mash-step-1".to_string(),
                name: "Saccharification Rest".to_string(),
                kind: StepKind::Mash,
                temperature: Some(66.0),
                duration: 60.0,
                description: Some("Main mash rest at 66 °C for 60 minutes".to_string()),
                completed: true,
            },
            BrewingStep {
                id: "mash-step-2".to_string(),
                name: "Mash Out".to_string(),
                kind: StepKind::Mash,
                temperature: Some(78.0),
                duration: 10.0,
                description: Some("Raise to 78 °C for 10 minutes".to_string()),
                completed: false,
            },
        ],
        created_at: now,
        last_used: None,
    }]
}

fn pid_controllers() -> Vec<PidController> {
    vec![
        PidController {
            id: "pid-mash-temp".into(),
            name: "Mash Temperature Control".to_string(),
            enabled: true,
            setpoint: 66.0,
            current_value: 65.5,
            output: 75.0,
            kp: 50.0,
            ki: 0.2,
            kd: 0.1,
            sensor_id: "temp-mash".into(),
            equipment_id: "element-mash".into(),
            mode: ThermalMode::Heating,
        },
        PidController {
            id: "pid-ferment-temp".into(),
            name: "Fermenter Temperature Control".to_string(),
            enabled: true,
            setpoint: 20.0,
            current_value: 20.5,
            output: 0.0,
            kp: 30.0,
            ki: 0.1,
            kd: 0.05,
            sensor_id: "temp-ferment-001".into(),
            equipment_id: "cooler-ferment-001".into(),
            mode: ThermalMode::Cooling,
        },
    ]
}

fn fermentation_profiles() -> Vec<FermentationProfile> {
    vec![FermentationProfile {
        id: "profile-ale-standard".into(),
        name: "Standard Ale".to_string(),
        steps: vec![
            FermentationStep {
                temperature: 20.0,
                duration: 168.0,
                ramp_rate: Some(1.0),
            },
            FermentationStep {
                temperature: 22.0,
                duration: 48.0,
                ramp_rate: Some(0.5),
            },
            FermentationStep {
                temperature: 4.0,
                duration: 72.0,
                ramp_rate: Some(-2.0),
            },
        ],
    }]
}

fn alarms(now: DateTime<Utc>) -> Vec<Alarm> {
    vec![Alarm {
        id: "alarm-001".into(),
        severity: AlarmSeverity::Warning,
        message: "Mash tun temperature slightly below target".to_string(),
        timestamp: now - Duration::minutes(5),
        acknowledged: false,
        source: "pid-mash-temp".to_string(),
        category: AlarmCategory::Temperature,
    }]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn demo_plant_counts() {
        let state = demo_plant(Utc::now());
        assert_eq!(state.devices.len(), 4);
        assert_eq!(state.vessels.len(), 3);
        assert_eq!(state.processes.len(), 2);
        assert_eq!(state.pid_controllers.len(), 2);
        assert_eq!(state.alarms.len(), 1);
        assert!(state.mqtt_connected);
    }

    #[test]
    fn controller_links_resolve() {
        let state = demo_plant(Utc::now());
        for controller in &state.pid_controllers {
            assert!(state.sensor(&controller.sensor_id).is_some());
            assert!(state.equipment(&controller.equipment_id).is_some());
        }
    }

    #[test]
    fn vessel_fill_within_capacity() {
        let state = demo_plant(Utc::now());
        for vessel in &state.vessels {
            if let Some(fill) = vessel.current_volume {
                assert!(fill <= vessel.volume);
            }
        }
    }

    #[test]
    fn json_round_trip() {
        let state = demo_plant(Utc::now());
        let json = serde_json::to_string(&state).unwrap();
        let back: PlantState = serde_json::from_str(&json).unwrap();
        assert_eq!(back, state);
    }
}
