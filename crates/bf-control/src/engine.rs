//! The per-tick control pass.

use crate::error::{ControlError, ControlResult};
use crate::law::{self, ControlLaw, PidTerms};
use bf_core::{ensure_finite, ControllerId};
use bf_model::{Device, Health, PidController, PlantState};
use std::collections::HashMap;

/// Result of one control pass: the entities to write back through the store.
///
/// `controllers` carries every enabled loop with its mirrored measurement and
/// new output; `devices` carries the owners of engine-driven equipment whose
/// power was set to the loop output.
#[derive(Debug, Clone, Default)]
pub struct ControlPass {
    pub controllers: Vec<PidController>,
    pub devices: Vec<Device>,
}

/// Recomputes controller outputs from a plant snapshot.
///
/// The engine holds the per-loop terms of the full PID law; the snapshot is
/// read-only and the caller dispatches the returned updates.
pub struct ControlEngine {
    law: ControlLaw,
    dt_s: f64,
    terms: HashMap<ControllerId, PidTerms>,
}

impl ControlEngine {
    /// Create an engine running `law` with a control period of `dt_s`
    /// seconds.
    ///
    /// # Errors
    ///
    /// Returns an error if `dt_s` is not a positive finite number.
    pub fn new(law: ControlLaw, dt_s: f64) -> ControlResult<Self> {
        let dt_s = ensure_finite(dt_s, "control period")?;
        if dt_s <= 0.0 {
            return Err(ControlError::InvalidArg {
                what: "control period must be positive",
            });
        }
        Ok(Self {
            law,
            dt_s,
            terms: HashMap::new(),
        })
    }

    pub fn law(&self) -> ControlLaw {
        self.law
    }

    /// Run one control pass over the snapshot.
    ///
    /// Disabled controllers are skipped entirely: their output freezes at its
    /// last value and their PID terms are dropped so a re-enable starts
    /// clean. Sensor health is not consulted by the law; a loop fed by an
    /// offline or errored sensor keeps computing from the mirrored value.
    pub fn pass(&mut self, state: &PlantState) -> ControlPass {
        let mut result = ControlPass::default();

        for controller in &state.pid_controllers {
            if !controller.enabled {
                self.terms.remove(&controller.id);
                continue;
            }

            let mut next = controller.clone();
            if let Some(sensor) = state.sensor(&next.sensor_id) {
                if sensor.status != Health::Online {
                    tracing::debug!(
                        controller = %next.id,
                        sensor = %sensor.id,
                        status = ?sensor.status,
                        "control input sensor is not online"
                    );
                }
                next.current_value = sensor.value;
            }

            let error = next.error();
            next.output = match self.law {
                ControlLaw::StepProportional => law::step_proportional(next.output, error),
                ControlLaw::FullPid => {
                    let terms = self.terms.entry(next.id.clone()).or_default();
                    let (updated, output) = law::full_pid(
                        terms,
                        next.kp,
                        next.ki,
                        next.kd,
                        error,
                        next.current_value,
                        self.dt_s,
                    );
                    *terms = updated;
                    output
                }
            };

            self.write_back_power(state, &next, &mut result.devices);
            result.controllers.push(next);
        }

        result
    }

    /// Mirror the loop output into the linked equipment's power, when that
    /// equipment is engine-driven (auto/pid mode). Manual equipment is never
    /// touched.
    fn write_back_power(
        &self,
        state: &PlantState,
        controller: &PidController,
        devices: &mut Vec<Device>,
    ) {
        let driven = state
            .equipment(&controller.equipment_id)
            .is_some_and(|e| e.engine_driven());
        if !driven {
            return;
        }
        let Some(owner) = state.equipment_owner(&controller.equipment_id) else {
            return;
        };

        // Several loops may drive equipment on the same device; reuse the
        // clone already staged for this pass.
        let device = match devices.iter().position(|d| d.id == owner.id) {
            Some(index) => &mut devices[index],
            None => {
                devices.push(owner.clone());
                let last = devices.len() - 1;
                &mut devices[last]
            }
        };

        if let Some(equipment) = device
            .equipment
            .iter_mut()
            .find(|e| e.id == controller.equipment_id)
        {
            equipment.power = Some(controller.output);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use bf_model::seed;
    use chrono::Utc;

    fn demo() -> PlantState {
        seed::demo_plant(Utc::now())
    }

    #[test]
    fn engine_rejects_bad_period() {
        assert!(ControlEngine::new(ControlLaw::StepProportional, 0.0).is_err());
        assert!(ControlEngine::new(ControlLaw::StepProportional, -1.0).is_err());
        assert!(ControlEngine::new(ControlLaw::StepProportional, f64::NAN).is_err());
        assert!(ControlEngine::new(ControlLaw::StepProportional, 2.0).is_ok());
    }

    #[test]
    fn pass_drives_the_mash_loop_upward() {
        // Seed: setpoint 66.0, sensor 65.5, output 75 -> error 0.5.
        let state = demo();
        let mut engine = ControlEngine::new(ControlLaw::StepProportional, 2.0).unwrap();

        let pass = engine.pass(&state);
        let mash = pass
            .controllers
            .iter()
            .find(|c| c.id.as_str() == "pid-mash-temp")
            .unwrap();
        assert_eq!(mash.output, 76.0);
        assert_eq!(mash.current_value, 65.5);
    }

    #[test]
    fn disabled_controllers_are_frozen() {
        let mut state = demo();
        state.pid_controllers[0].enabled = false;
        let before_output = state.pid_controllers[0].output;

        let mut engine = ControlEngine::new(ControlLaw::StepProportional, 2.0).unwrap();
        let pass = engine.pass(&state);

        // The disabled loop is absent from the pass output entirely.
        assert!(
            pass.controllers
                .iter()
                .all(|c| c.id != state.pid_controllers[0].id)
        );
        assert_eq!(
            state.pid_controllers[0].output.to_bits(),
            before_output.to_bits()
        );
    }

    #[test]
    fn outputs_stay_in_range_under_huge_error() {
        let mut state = demo();
        state.pid_controllers[0].setpoint = 1e9;
        let mut engine = ControlEngine::new(ControlLaw::StepProportional, 2.0).unwrap();

        for _ in 0..5 {
            let pass = engine.pass(&state);
            for controller in &pass.controllers {
                assert!((0.0..=100.0).contains(&controller.output));
            }
        }
    }

    #[test]
    fn engine_mirrors_sensor_into_current_value() {
        let mut state = demo();
        // Move the mash sensor away from the stale mirror.
        state.devices[0].sensors[0].value = 60.0;

        let mut engine = ControlEngine::new(ControlLaw::StepProportional, 2.0).unwrap();
        let pass = engine.pass(&state);
        let mash = pass
            .controllers
            .iter()
            .find(|c| c.id.as_str() == "pid-mash-temp")
            .unwrap();
        assert_eq!(mash.current_value, 60.0);
    }

    #[test]
    fn engine_writes_power_to_pid_equipment_only() {
        let state = demo();
        let mut engine = ControlEngine::new(ControlLaw::StepProportional, 2.0).unwrap();
        let pass = engine.pass(&state);

        // The mash element (pid mode) gets the mash loop output.
        let mash_device = pass
            .devices
            .iter()
            .find(|d| d.id.as_str() == "esp32-mash")
            .unwrap();
        let element = mash_device
            .equipment
            .iter()
            .find(|e| e.id.as_str() == "element-mash")
            .unwrap();
        assert_eq!(element.power, Some(76.0));

        // The manual boil element's device is not staged at all.
        assert!(pass.devices.iter().all(|d| d.id.as_str() != "esp32-boil"));
    }

    #[test]
    fn full_pid_converges_toward_setpoint_drive() {
        let mut state = demo();
        // Large standing error on the mash loop.
        state.devices[0].sensors[0].value = 50.0;

        let mut engine = ControlEngine::new(ControlLaw::FullPid, 2.0).unwrap();
        let pass = engine.pass(&state);
        let mash = pass
            .controllers
            .iter()
            .find(|c| c.id.as_str() == "pid-mash-temp")
            .unwrap();
        // kp=50 against a 16-degree error saturates high.
        assert_eq!(mash.output, 100.0);
    }

    #[test]
    fn disabling_drops_pid_terms() {
        let mut state = demo();
        state.devices[0].sensors[0].value = 60.0;
        let mut engine = ControlEngine::new(ControlLaw::FullPid, 2.0).unwrap();

        engine.pass(&state);
        assert!(engine.terms.contains_key(&state.pid_controllers[0].id));

        state.pid_controllers[0].enabled = false;
        engine.pass(&state);
        assert!(!engine.terms.contains_key(&state.pid_controllers[0].id));
    }
}
