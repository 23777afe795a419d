//! Sensors: a single measured quantity on a device.

use bf_core::{DeviceId, SensorId};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// What a sensor measures.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SensorKind {
    Temperature,
    Pressure,
    Flow,
    Density,
    Ph,
    Level,
}

/// Connectivity health of a sensor or device.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Health {
    Online,
    Offline,
    Error,
}

/// A single measured quantity.
///
/// Created at store initialization from seed data; at runtime only the drift
/// simulator (or a real telemetry feed replacing it) touches `value` and
/// `last_update`. Sensors are never deleted.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Sensor {
    pub id: SensorId,
    pub name: String,
    pub kind: SensorKind,
    pub value: f64,
    pub unit: String,
    pub status: Health,
    pub last_update: DateTime<Utc>,
    pub device_id: DeviceId,
    /// Lower bound of the valid measurement range, when declared.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub min_value: Option<f64>,
    /// Upper bound of the valid measurement range, when declared.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub max_value: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub calibration_offset: Option<f64>,
}
