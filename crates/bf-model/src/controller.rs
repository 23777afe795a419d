//! PID control-loop entities.

use bf_core::{ControllerId, EquipmentId, SensorId};
use serde::{Deserialize, Serialize};

/// Direction a control loop is allowed to drive the process.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ThermalMode {
    Heating,
    Cooling,
    Both,
}

/// One closed temperature-control loop: reads a sensor, drives an actuator.
///
/// `output` is a drive percentage and is always clamped to `[0, 100]` by the
/// control engine. While `enabled` is false the controller is never mutated
/// and `output` freezes at its last value.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PidController {
    pub id: ControllerId,
    pub name: String,
    pub enabled: bool,
    /// Target value, in the linked sensor's unit.
    pub setpoint: f64,
    /// Mirror of the linked sensor's last reading.
    pub current_value: f64,
    /// Actuator drive signal in `[0, 100]`.
    pub output: f64,
    pub kp: f64,
    pub ki: f64,
    pub kd: f64,
    pub sensor_id: SensorId,
    pub equipment_id: EquipmentId,
    pub mode: ThermalMode,
}

impl PidController {
    /// Control error: positive when the process is below target.
    pub fn error(&self) -> f64 {
        self.setpoint - self.current_value
    }
}
