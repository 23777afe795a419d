//! Recipes and fermentation profiles.
//!
//! Inert with respect to store actions: processes link to them, the seed
//! ships them, and plant files carry them, but no action mutates them.

use bf_core::{ProfileId, RecipeId};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum StepKind {
    Mash,
    Sparge,
    Boil,
    Whirlpool,
    Chill,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BrewingStep {
    pub id: String,
    pub name: String,
    pub kind: StepKind,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub temperature: Option<f64>,
    /// Duration in minutes.
    pub duration: f64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    pub completed: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Recipe {
    pub id: RecipeId,
    pub name: String,
    pub style: String,
    /// Batch size in liters.
    pub batch_size: f64,
    #[serde(default)]
    pub steps: Vec<BrewingStep>,
    pub created_at: DateTime<Utc>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub last_used: Option<DateTime<Utc>>,
}

/// One hold step of a fermentation temperature schedule.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FermentationStep {
    pub temperature: f64,
    /// Hold duration in hours.
    pub duration: f64,
    /// Ramp toward the hold temperature, in degrees per hour.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub ramp_rate: Option<f64>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FermentationProfile {
    pub id: ProfileId,
    pub name: String,
    pub steps: Vec<FermentationStep>,
}
