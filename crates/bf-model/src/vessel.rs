//! Vessels: the physical containers of the brewing train.

use bf_core::{EquipmentId, SensorId, VesselId};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum VesselKind {
    MashTun,
    BoilKettle,
    Fermenter,
    BriteTank,
}

/// Embedded temperature reading of a vessel: the measured value, the target,
/// and the sensor supplying the measurement.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TemperatureReading {
    pub current: f64,
    pub target: f64,
    pub sensor_id: SensorId,
}

/// Binding of a vessel to the heating element that warms it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HeatingElement {
    pub equipment_id: EquipmentId,
    pub power: f64,
    pub max_power: f64,
}

/// 2-D layout position, presentation-only.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Position {
    pub x: f64,
    pub y: f64,
}

/// Outgoing pipe run to another vessel, through a valve and optionally a pump.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PipeConnection {
    pub vessel_id: VesselId,
    pub valve_id: EquipmentId,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub pump_id: Option<EquipmentId>,
}

/// A physical brewing container.
///
/// `current_volume <= volume` is a plant-file invariant checked by the
/// validator, not defended here.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Vessel {
    pub id: VesselId,
    pub name: String,
    pub kind: VesselKind,
    /// Capacity in liters.
    pub volume: f64,
    /// Current fill in liters.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub current_volume: Option<f64>,
    pub temperature: TemperatureReading,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub heating_element: Option<HeatingElement>,
    pub position: Position,
    #[serde(default)]
    pub connections: Vec<PipeConnection>,
}
