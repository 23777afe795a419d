//! Alarms: immutable notification records.

use bf_core::AlarmId;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AlarmSeverity {
    Info,
    Warning,
    Error,
    Critical,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AlarmCategory {
    Temperature,
    Pressure,
    Equipment,
    Process,
    System,
}

/// A notification record. Appended on specific transitions, mutated only by
/// acknowledgement, never deleted.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Alarm {
    pub id: AlarmId,
    pub severity: AlarmSeverity,
    pub message: String,
    pub timestamp: DateTime<Utc>,
    pub acknowledged: bool,
    /// Identifier of the entity that raised the alarm.
    pub source: String,
    pub category: AlarmCategory,
}

impl Alarm {
    /// New unacknowledged alarm with a freshly minted identifier.
    pub fn raise(
        severity: AlarmSeverity,
        message: impl Into<String>,
        source: impl Into<String>,
        category: AlarmCategory,
        now: DateTime<Utc>,
    ) -> Self {
        Self {
            id: uuid::Uuid::new_v4().to_string().into(),
            severity,
            message: message.into(),
            timestamp: now,
            acknowledged: false,
            source: source.into(),
            category,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn raised_alarms_are_open_and_distinct() {
        let now = Utc::now();
        let a = Alarm::raise(
            AlarmSeverity::Warning,
            "pressure rising",
            "pressure-001",
            AlarmCategory::Pressure,
            now,
        );
        let b = Alarm::raise(
            AlarmSeverity::Warning,
            "pressure rising",
            "pressure-001",
            AlarmCategory::Pressure,
            now,
        );
        assert!(!a.acknowledged);
        assert_ne!(a.id, b.id);
    }
}
