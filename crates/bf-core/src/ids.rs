use core::fmt;
use serde::{Deserialize, Serialize};

/// Declares a typed identifier wrapping the entity's stable external name.
///
/// Plant entities are seeded from named configuration, so the string name IS
/// the identity; the newtypes keep a sensor id from being handed to a vessel
/// lookup by accident.
macro_rules! entity_id {
    ($(#[$doc:meta])* $name:ident) => {
        $(#[$doc])*
        #[derive(
            Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize,
        )]
        #[serde(transparent)]
        pub struct $name(String);

        impl $name {
            pub fn new(id: impl Into<String>) -> Self {
                Self(id.into())
            }

            pub fn as_str(&self) -> &str {
                &self.0
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str(&self.0)
            }
        }

        impl From<&str> for $name {
            fn from(id: &str) -> Self {
                Self(id.to_string())
            }
        }

        impl From<String> for $name {
            fn from(id: String) -> Self {
                Self(id)
            }
        }
    };
}

entity_id!(
    /// Identifier of a controller device (ESP32, PLC, hydrometer, ...).
    DeviceId
);
entity_id!(
    /// Identifier of a measured quantity on a device.
    SensorId
);
entity_id!(
    /// Identifier of a controllable output (pump, valve, heater, ...).
    EquipmentId
);
entity_id!(
    /// Identifier of a physical vessel in the brewing train.
    VesselId
);
entity_id!(
    /// Identifier of a brewing process run.
    ProcessId
);
entity_id!(
    /// Identifier of a recipe.
    RecipeId
);
entity_id!(
    /// Identifier of a PID control loop.
    ControllerId
);
entity_id!(
    /// Identifier of an alarm record.
    AlarmId
);
entity_id!(
    /// Identifier of a fermentation temperature profile.
    ProfileId
);

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn id_round_trip_str() {
        let id = SensorId::new("temp-mash");
        assert_eq!(id.as_str(), "temp-mash");
        assert_eq!(id.to_string(), "temp-mash");
        assert_eq!(id, SensorId::from("temp-mash"));
    }

    #[test]
    fn id_serializes_as_plain_string() {
        let id = VesselId::new("mash-tun");
        let json = serde_json::to_string(&id).unwrap();
        assert_eq!(json, "\"mash-tun\"");
        let back: VesselId = serde_json::from_str(&json).unwrap();
        assert_eq!(back, id);
    }
}
