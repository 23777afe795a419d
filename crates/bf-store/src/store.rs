//! The store and its transition function.

use crate::action::Action;
use crate::error::{EntityKind, StoreError, StoreResult};
use crate::notify::{NoticeLevel, NotificationSink};
use bf_model::{PlantState, RunStatus};
use bf_sim::DriftSimulator;
use chrono::Utc;

/// Owner of the plant state.
///
/// Every mutation goes through `dispatch`, which applies exactly one action:
/// the addressed entity is replaced or edited in full, everything else is
/// left value-unchanged. A missing target mutates nothing and returns
/// `StoreError::NotFound`.
pub struct Store {
    state: PlantState,
    drift: DriftSimulator,
    sink: Box<dyn NotificationSink>,
}

impl Store {
    pub fn new(state: PlantState, sink: Box<dyn NotificationSink>) -> Self {
        Self {
            state,
            drift: DriftSimulator::new(),
            sink,
        }
    }

    /// Store with a deterministic drift simulator, for tests and scripted
    /// runs.
    pub fn with_drift_seed(state: PlantState, sink: Box<dyn NotificationSink>, seed: u64) -> Self {
        Self {
            state,
            drift: DriftSimulator::with_seed(seed),
            sink,
        }
    }

    pub fn state(&self) -> &PlantState {
        &self.state
    }

    pub fn into_state(self) -> PlantState {
        self.state
    }

    /// Apply one action.
    pub fn dispatch(&mut self, action: Action) -> StoreResult<()> {
        tracing::trace!(action = action.kind(), "dispatch");
        match action {
            Action::UpdateDevice(device) => {
                let slot = self
                    .state
                    .devices
                    .iter_mut()
                    .find(|d| d.id == device.id)
                    .ok_or_else(|| {
                        StoreError::not_found(EntityKind::Device, device.id.as_str())
                    })?;
                *slot = device;
                Ok(())
            }

            Action::UpdateVessel(vessel) => {
                let slot = self
                    .state
                    .vessels
                    .iter_mut()
                    .find(|v| v.id == vessel.id)
                    .ok_or_else(|| {
                        StoreError::not_found(EntityKind::Vessel, vessel.id.as_str())
                    })?;
                *slot = vessel;
                Ok(())
            }

            Action::UpdateProcess(process) => {
                let slot = self
                    .state
                    .processes
                    .iter_mut()
                    .find(|p| p.id == process.id)
                    .ok_or_else(|| {
                        StoreError::not_found(EntityKind::Process, process.id.as_str())
                    })?;
                *slot = process;
                Ok(())
            }

            Action::UpdatePidController(controller) => {
                let slot = self
                    .state
                    .pid_controllers
                    .iter_mut()
                    .find(|c| c.id == controller.id)
                    .ok_or_else(|| {
                        StoreError::not_found(EntityKind::Controller, controller.id.as_str())
                    })?;
                *slot = controller;
                Ok(())
            }

            Action::ToggleEquipment {
                equipment_id,
                device_id,
            } => {
                let device = self
                    .state
                    .device_mut(&device_id)
                    .ok_or_else(|| StoreError::not_found(EntityKind::Device, device_id.as_str()))?;
                let equipment = device
                    .equipment
                    .iter_mut()
                    .find(|e| e.id == equipment_id)
                    .ok_or_else(|| {
                        StoreError::not_found(EntityKind::Equipment, equipment_id.as_str())
                    })?;

                equipment.status = match equipment.status {
                    RunStatus::On => RunStatus::Off,
                    _ => RunStatus::On,
                };
                let message = format!(
                    "{} switched {}",
                    equipment.name,
                    if equipment.status == RunStatus::On {
                        "on"
                    } else {
                        "off"
                    }
                );
                self.sink.notify(NoticeLevel::Success, &message);
                Ok(())
            }

            Action::SetPidSetpoint {
                controller_id,
                setpoint,
            } => {
                let controller = self
                    .state
                    .pid_controllers
                    .iter_mut()
                    .find(|c| c.id == controller_id)
                    .ok_or_else(|| {
                        StoreError::not_found(EntityKind::Controller, controller_id.as_str())
                    })?;
                controller.setpoint = setpoint;
                let message = format!("{}: setpoint updated to {setpoint}", controller.name);
                self.sink.notify(NoticeLevel::Success, &message);
                Ok(())
            }

            Action::TogglePid(controller_id) => {
                let controller = self
                    .state
                    .pid_controllers
                    .iter_mut()
                    .find(|c| c.id == controller_id)
                    .ok_or_else(|| {
                        StoreError::not_found(EntityKind::Controller, controller_id.as_str())
                    })?;
                controller.enabled = !controller.enabled;
                let message = format!(
                    "{} {}",
                    controller.name,
                    if controller.enabled {
                        "enabled"
                    } else {
                        "disabled"
                    }
                );
                self.sink.notify(NoticeLevel::Success, &message);
                Ok(())
            }

            Action::StartProcess {
                process_id,
                recipe_id,
            } => {
                let process = self
                    .state
                    .processes
                    .iter_mut()
                    .find(|p| p.id == process_id)
                    .ok_or_else(|| {
                        StoreError::not_found(EntityKind::Process, process_id.as_str())
                    })?;
                let now = Utc::now();
                process.status = bf_model::ProcessStatus::Running;
                process.start_time = Some(now);
                process.current_step_start_time = Some(now);
                if recipe_id.is_some() {
                    process.recipe_id = recipe_id;
                }
                let message = format!("Process {} started", process.name);
                self.sink.notify(NoticeLevel::Success, &message);
                Ok(())
            }

            Action::PauseProcess(process_id) => {
                let process = self
                    .state
                    .processes
                    .iter_mut()
                    .find(|p| p.id == process_id)
                    .ok_or_else(|| {
                        StoreError::not_found(EntityKind::Process, process_id.as_str())
                    })?;
                process.status = bf_model::ProcessStatus::Paused;
                let message = format!("Process {} paused", process.name);
                self.sink.notify(NoticeLevel::Info, &message);
                Ok(())
            }

            Action::StopProcess(process_id) => {
                let process = self
                    .state
                    .processes
                    .iter_mut()
                    .find(|p| p.id == process_id)
                    .ok_or_else(|| {
                        StoreError::not_found(EntityKind::Process, process_id.as_str())
                    })?;
                process.status = bf_model::ProcessStatus::Idle;
                process.end_time = Some(Utc::now());
                let message = format!("Process {} stopped", process.name);
                self.sink.notify(NoticeLevel::Error, &message);
                Ok(())
            }

            Action::AddAlarm(alarm) => {
                self.sink.notify(NoticeLevel::Error, &alarm.message);
                // Newest first.
                self.state.alarms.insert(0, alarm);
                Ok(())
            }

            Action::AcknowledgeAlarm(alarm_id) => {
                let alarm = self
                    .state
                    .alarms
                    .iter_mut()
                    .find(|a| a.id == alarm_id)
                    .ok_or_else(|| StoreError::not_found(EntityKind::Alarm, alarm_id.as_str()))?;
                alarm.acknowledged = true;
                Ok(())
            }

            Action::SetMqttStatus(connected) => {
                if connected != self.state.mqtt_connected {
                    let (level, message) = if connected {
                        (NoticeLevel::Success, "MQTT connected")
                    } else {
                        (NoticeLevel::Error, "MQTT disconnected")
                    };
                    self.sink.notify(level, message);
                }
                self.state.mqtt_connected = connected;
                Ok(())
            }

            Action::SimulateData => {
                self.drift.perturb(&mut self.state, Utc::now());
                Ok(())
            }
        }
    }
}
