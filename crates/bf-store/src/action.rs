//! The closed set of state transitions.

use bf_core::{AlarmId, ControllerId, DeviceId, EquipmentId, ProcessId, RecipeId};
use bf_model::{Alarm, BrewingProcess, Device, PidController, Vessel};

/// A state transition request.
///
/// Update variants carry the full replacement entity and swap it in by id;
/// the rest are targeted edits. Unknown actions are unrepresentable: the
/// enum is the whole dispatch surface.
#[derive(Debug, Clone, PartialEq)]
pub enum Action {
    UpdateDevice(Device),
    UpdateVessel(Vessel),
    UpdateProcess(BrewingProcess),
    UpdatePidController(PidController),
    ToggleEquipment {
        equipment_id: EquipmentId,
        device_id: DeviceId,
    },
    SetPidSetpoint {
        controller_id: ControllerId,
        setpoint: f64,
    },
    TogglePid(ControllerId),
    StartProcess {
        process_id: ProcessId,
        recipe_id: Option<RecipeId>,
    },
    PauseProcess(ProcessId),
    StopProcess(ProcessId),
    AddAlarm(Alarm),
    AcknowledgeAlarm(AlarmId),
    SetMqttStatus(bool),
    /// Run one drift-simulator pass over every sensor and vessel.
    SimulateData,
}

impl Action {
    /// Short label for logs.
    pub fn kind(&self) -> &'static str {
        match self {
            Action::UpdateDevice(_) => "update_device",
            Action::UpdateVessel(_) => "update_vessel",
            Action::UpdateProcess(_) => "update_process",
            Action::UpdatePidController(_) => "update_pid_controller",
            Action::ToggleEquipment { .. } => "toggle_equipment",
            Action::SetPidSetpoint { .. } => "set_pid_setpoint",
            Action::TogglePid(_) => "toggle_pid",
            Action::StartProcess { .. } => "start_process",
            Action::PauseProcess(_) => "pause_process",
            Action::StopProcess(_) => "stop_process",
            Action::AddAlarm(_) => "add_alarm",
            Action::AcknowledgeAlarm(_) => "acknowledge_alarm",
            Action::SetMqttStatus(_) => "set_mqtt_status",
            Action::SimulateData => "simulate_data",
        }
    }
}
