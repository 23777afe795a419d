//! bf-model: the brewing-plant data model.
//!
//! One process-wide snapshot (`PlantState`) holds every device, vessel,
//! process, controller, and alarm. All entities are created together at store
//! initialization (see `seed`) and mutated in place for the lifetime of the
//! running application; there is no per-entity lifecycle and no persistence.

pub mod alarm;
pub mod controller;
pub mod device;
pub mod equipment;
pub mod process;
pub mod recipe;
pub mod seed;
pub mod sensor;
pub mod state;
pub mod vessel;

pub use alarm::{Alarm, AlarmCategory, AlarmSeverity};
pub use controller::{PidController, ThermalMode};
pub use device::{Device, DeviceKind};
pub use equipment::{ControlMode, Equipment, EquipmentKind, RunStatus};
pub use process::{BrewingProcess, ProcessKind, ProcessStatus};
pub use recipe::{BrewingStep, FermentationProfile, FermentationStep, Recipe, StepKind};
pub use sensor::{Health, Sensor, SensorKind};
pub use state::{PlantState, SystemStatus};
pub use vessel::{HeatingElement, PipeConnection, Position, TemperatureReading, Vessel, VesselKind};
