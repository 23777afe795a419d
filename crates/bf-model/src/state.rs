//! The whole-plant snapshot and its lookup helpers.

use crate::alarm::Alarm;
use crate::controller::PidController;
use crate::device::Device;
use crate::equipment::Equipment;
use crate::process::BrewingProcess;
use crate::recipe::{FermentationProfile, Recipe};
use crate::sensor::Sensor;
use crate::vessel::Vessel;
use bf_core::{ControllerId, DeviceId, EquipmentId, ProcessId, SensorId, VesselId};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SystemStatus {
    Normal,
    Warning,
    Error,
}

/// The single authoritative snapshot of the plant.
///
/// Mutated only through the store's action dispatch; everything else takes
/// clones. `PartialEq` is derived so tests can assert deep equality of whole
/// snapshots.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PlantState {
    pub devices: Vec<Device>,
    pub vessels: Vec<Vessel>,
    pub processes: Vec<BrewingProcess>,
    #[serde(default)]
    pub recipes: Vec<Recipe>,
    pub pid_controllers: Vec<PidController>,
    #[serde(default)]
    pub fermentation_profiles: Vec<FermentationProfile>,
    #[serde(default)]
    pub alarms: Vec<Alarm>,
    pub mqtt_connected: bool,
    pub system_status: SystemStatus,
}

impl PlantState {
    pub fn device(&self, id: &DeviceId) -> Option<&Device> {
        self.devices.iter().find(|d| &d.id == id)
    }

    pub fn device_mut(&mut self, id: &DeviceId) -> Option<&mut Device> {
        self.devices.iter_mut().find(|d| &d.id == id)
    }

    pub fn vessel(&self, id: &VesselId) -> Option<&Vessel> {
        self.vessels.iter().find(|v| &v.id == id)
    }

    pub fn process(&self, id: &ProcessId) -> Option<&BrewingProcess> {
        self.processes.iter().find(|p| &p.id == id)
    }

    pub fn controller(&self, id: &ControllerId) -> Option<&PidController> {
        self.pid_controllers.iter().find(|c| &c.id == id)
    }

    /// Find a sensor anywhere in the device tree.
    pub fn sensor(&self, id: &SensorId) -> Option<&Sensor> {
        self.devices
            .iter()
            .flat_map(|d| d.sensors.iter())
            .find(|s| &s.id == id)
    }

    /// Find an equipment item anywhere in the device tree.
    pub fn equipment(&self, id: &EquipmentId) -> Option<&Equipment> {
        self.devices
            .iter()
            .flat_map(|d| d.equipment.iter())
            .find(|e| &e.id == id)
    }

    /// Device owning the given equipment item, if any.
    pub fn equipment_owner(&self, id: &EquipmentId) -> Option<&Device> {
        self.devices
            .iter()
            .find(|d| d.equipment.iter().any(|e| &e.id == id))
    }

    /// Iterate every sensor in the plant.
    pub fn sensors(&self) -> impl Iterator<Item = &Sensor> {
        self.devices.iter().flat_map(|d| d.sensors.iter())
    }

    /// Alarms not yet acknowledged by an operator.
    pub fn unacknowledged_alarms(&self) -> impl Iterator<Item = &Alarm> {
        self.alarms.iter().filter(|a| !a.acknowledged)
    }
}

#[cfg(test)]
mod tests {
    use crate::seed;
    use bf_core::{EquipmentId, SensorId};
    use chrono::Utc;

    #[test]
    fn lookups_traverse_device_tree() {
        let state = seed::demo_plant(Utc::now());

        let sensor = state.sensor(&SensorId::new("temp-mash")).unwrap();
        assert_eq!(sensor.device_id.as_str(), "esp32-mash");

        let equipment = state.equipment(&EquipmentId::new("element-mash")).unwrap();
        assert_eq!(equipment.device_id.as_str(), "esp32-mash");

        let owner = state
            .equipment_owner(&EquipmentId::new("element-mash"))
            .unwrap();
        assert_eq!(owner.id.as_str(), "esp32-mash");
    }

    #[test]
    fn missing_ids_return_none() {
        let state = seed::demo_plant(Utc::now());
        assert!(state.sensor(&SensorId::new("no-such-sensor")).is_none());
        assert!(state.equipment(&EquipmentId::new("no-such-item")).is_none());
    }
}
