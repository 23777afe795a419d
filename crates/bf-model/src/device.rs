//! Devices: field controllers that own sensors and equipment.

use crate::equipment::Equipment;
use crate::sensor::{Health, Sensor};
use bf_core::DeviceId;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DeviceKind {
    Esp32,
    Plc,
    Hydrometer,
    RaspberryPi,
}

/// A field controller (ESP32 board, PLC, wireless hydrometer, ...) grouping
/// the sensors it reads and the equipment it drives.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Device {
    pub id: DeviceId,
    pub name: String,
    pub kind: DeviceKind,
    pub status: Health,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub ip_address: Option<String>,
    pub mqtt_topic: String,
    pub last_seen: DateTime<Utc>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub firmware_version: Option<String>,
    /// Battery percentage for wireless devices.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub battery_level: Option<f64>,
    #[serde(default)]
    pub sensors: Vec<Sensor>,
    #[serde(default)]
    pub equipment: Vec<Equipment>,
}
