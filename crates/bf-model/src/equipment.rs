//! Equipment: controllable outputs (pumps, valves, heaters, coolers, stirrers).

use bf_core::{DeviceId, EquipmentId};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EquipmentKind {
    Pump,
    Valve,
    Heater,
    Cooler,
    Stirrer,
}

/// Run status of an actuator.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RunStatus {
    On,
    Off,
    Auto,
    Error,
}

/// Who is allowed to drive the actuator.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ControlMode {
    Manual,
    Auto,
    Pid,
}

/// A controllable output device.
///
/// Mutated by direct user toggle (manual mode) or by the control engine
/// writing `power` when the mode is `auto`/`pid`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Equipment {
    pub id: EquipmentId,
    pub name: String,
    pub kind: EquipmentKind,
    pub status: RunStatus,
    /// Drive percentage in `[0, 100]`, when the actuator is modulated.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub power: Option<f64>,
    pub control_mode: ControlMode,
    pub device_id: DeviceId,
    /// Nominal flow rate (pumps).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub flow_rate: Option<f64>,
    /// Open/closed position (valves).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub is_open: Option<bool>,
}

impl Equipment {
    /// Whether the control engine may write this actuator's power.
    pub fn engine_driven(&self) -> bool {
        matches!(self.control_mode, ControlMode::Auto | ControlMode::Pid)
    }
}
