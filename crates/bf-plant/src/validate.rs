//! Plant validation logic.
//!
//! Referential integrity and value ranges for a loaded `PlantState`. The
//! store trusts its writers at runtime; this is where bad plant files get
//! loud instead.

use bf_model::PlantState;
use std::collections::HashSet;

#[derive(thiserror::Error, Debug)]
pub enum ValidationError {
    #[error("Duplicate ID: {id} in {context}")]
    DuplicateId { id: String, context: String },

    #[error("Missing reference: {id} in {context}")]
    MissingReference { id: String, context: String },

    #[error("Invalid value: {field} = {value} ({reason})")]
    InvalidValue {
        field: String,
        value: String,
        reason: String,
    },
}

pub fn validate_plant(state: &PlantState) -> Result<(), ValidationError> {
    let mut device_ids = HashSet::new();
    let mut sensor_ids = HashSet::new();
    let mut equipment_ids = HashSet::new();

    for device in &state.devices {
        if !device_ids.insert(&device.id) {
            return Err(ValidationError::DuplicateId {
                id: device.id.to_string(),
                context: "devices".to_string(),
            });
        }

        for sensor in &device.sensors {
            if !sensor_ids.insert(&sensor.id) {
                return Err(ValidationError::DuplicateId {
                    id: sensor.id.to_string(),
                    context: format!("device '{}' sensors", device.id),
                });
            }
            if sensor.device_id != device.id {
                return Err(ValidationError::InvalidValue {
                    field: format!("sensor '{}' device_id", sensor.id),
                    value: sensor.device_id.to_string(),
                    reason: format!("sensor is owned by device '{}'", device.id),
                });
            }
            if let (Some(min), Some(max)) = (sensor.min_value, sensor.max_value)
                && min > max
            {
                return Err(ValidationError::InvalidValue {
                    field: format!("sensor '{}' range", sensor.id),
                    value: format!("{min}..{max}"),
                    reason: "min_value must not exceed max_value".to_string(),
                });
            }
        }

        for equipment in &device.equipment {
            if !equipment_ids.insert(&equipment.id) {
                return Err(ValidationError::DuplicateId {
                    id: equipment.id.to_string(),
                    context: format!("device '{}' equipment", device.id),
                });
            }
            if equipment.device_id != device.id {
                return Err(ValidationError::InvalidValue {
                    field: format!("equipment '{}' device_id", equipment.id),
                    value: equipment.device_id.to_string(),
                    reason: format!("equipment is owned by device '{}'", device.id),
                });
            }
            if let Some(power) = equipment.power
                && !(0.0..=100.0).contains(&power)
            {
                return Err(ValidationError::InvalidValue {
                    field: format!("equipment '{}' power", equipment.id),
                    value: power.to_string(),
                    reason: "power must be within [0, 100]".to_string(),
                });
            }
        }
    }

    let mut vessel_ids = HashSet::new();
    for vessel in &state.vessels {
        if !vessel_ids.insert(&vessel.id) {
            return Err(ValidationError::DuplicateId {
                id: vessel.id.to_string(),
                context: "vessels".to_string(),
            });
        }
    }

    for vessel in &state.vessels {
        if vessel.volume <= 0.0 {
            return Err(ValidationError::InvalidValue {
                field: format!("vessel '{}' volume", vessel.id),
                value: vessel.volume.to_string(),
                reason: "capacity must be positive".to_string(),
            });
        }
        if let Some(fill) = vessel.current_volume
            && (fill < 0.0 || fill > vessel.volume)
        {
            return Err(ValidationError::InvalidValue {
                field: format!("vessel '{}' current_volume", vessel.id),
                value: fill.to_string(),
                reason: format!("fill must be within [0, {}]", vessel.volume),
            });
        }
        if !sensor_ids.contains(&vessel.temperature.sensor_id) {
            return Err(ValidationError::MissingReference {
                id: vessel.temperature.sensor_id.to_string(),
                context: format!("vessel '{}' temperature sensor", vessel.id),
            });
        }
        if let Some(element) = &vessel.heating_element
            && !equipment_ids.contains(&element.equipment_id)
        {
            return Err(ValidationError::MissingReference {
                id: element.equipment_id.to_string(),
                context: format!("vessel '{}' heating element", vessel.id),
            });
        }
        for connection in &vessel.connections {
            if !vessel_ids.contains(&connection.vessel_id) {
                return Err(ValidationError::MissingReference {
                    id: connection.vessel_id.to_string(),
                    context: format!("vessel '{}' connection target", vessel.id),
                });
            }
            if !equipment_ids.contains(&connection.valve_id) {
                return Err(ValidationError::MissingReference {
                    id: connection.valve_id.to_string(),
                    context: format!("vessel '{}' connection valve", vessel.id),
                });
            }
            if let Some(pump_id) = &connection.pump_id
                && !equipment_ids.contains(pump_id)
            {
                return Err(ValidationError::MissingReference {
                    id: pump_id.to_string(),
                    context: format!("vessel '{}' connection pump", vessel.id),
                });
            }
        }
    }

    let mut recipe_ids = HashSet::new();
    for recipe in &state.recipes {
        if !recipe_ids.insert(&recipe.id) {
            return Err(ValidationError::DuplicateId {
                id: recipe.id.to_string(),
                context: "recipes".to_string(),
            });
        }
    }

    let mut process_ids = HashSet::new();
    for process in &state.processes {
        if !process_ids.insert(&process.id) {
            return Err(ValidationError::DuplicateId {
                id: process.id.to_string(),
                context: "processes".to_string(),
            });
        }
        if let Some(recipe_id) = &process.recipe_id
            && !recipe_ids.contains(recipe_id)
        {
            return Err(ValidationError::MissingReference {
                id: recipe_id.to_string(),
                context: format!("process '{}' recipe", process.id),
            });
        }
        if !(0.0..=100.0).contains(&process.progress) {
            return Err(ValidationError::InvalidValue {
                field: format!("process '{}' progress", process.id),
                value: process.progress.to_string(),
                reason: "progress must be within [0, 100]".to_string(),
            });
        }
    }

    let mut controller_ids = HashSet::new();
    for controller in &state.pid_controllers {
        if !controller_ids.insert(&controller.id) {
            return Err(ValidationError::DuplicateId {
                id: controller.id.to_string(),
                context: "pid_controllers".to_string(),
            });
        }
        if !sensor_ids.contains(&controller.sensor_id) {
            return Err(ValidationError::MissingReference {
                id: controller.sensor_id.to_string(),
                context: format!("controller '{}' sensor", controller.id),
            });
        }
        if !equipment_ids.contains(&controller.equipment_id) {
            return Err(ValidationError::MissingReference {
                id: controller.equipment_id.to_string(),
                context: format!("controller '{}' equipment", controller.id),
            });
        }
        if !(0.0..=100.0).contains(&controller.output) {
            return Err(ValidationError::InvalidValue {
                field: format!("controller '{}' output", controller.id),
                value: controller.output.to_string(),
                reason: "output must be within [0, 100]".to_string(),
            });
        }
    }

    let mut profile_ids = HashSet::new();
    for profile in &state.fermentation_profiles {
        if !profile_ids.insert(&profile.id) {
            return Err(ValidationError::DuplicateId {
                id: profile.id.to_string(),
                context: "fermentation_profiles".to_string(),
            });
        }
    }

    let mut alarm_ids = HashSet::new();
    for alarm in &state.alarms {
        if !alarm_ids.insert(&alarm.id) {
            return Err(ValidationError::DuplicateId {
                id: alarm.id.to_string(),
                context: "alarms".to_string(),
            });
        }
    }

    Ok(())
}
