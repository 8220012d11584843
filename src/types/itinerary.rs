use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::error::{PlannerError, Result};
use crate::schemas::strip_code_fences;

/// Destination and cost allocation chosen by the budgeting call.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BudgetPlan {
    /// Destination city and country (e.g., "Kyoto, Japan")
    pub destination: String,
    /// Estimated total spend for the trip in USD
    #[serde(default)]
    pub total_cost: f64,
    /// Free-form allocation notes
    #[serde(default)]
    pub note: String,
}

impl BudgetPlan {
    /// Best-effort read of the budgeting call's text. The pipeline forwards
    /// the raw text regardless, so a `None` here is informational only.
    pub fn from_model_output(raw: &str) -> Option<Self> {
        serde_json::from_str(&strip_code_fences(raw)).ok()
    }
}

/// A single planned activity.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Activity {
    pub name: String,
    /// Estimated duration in hours
    pub hours: f64,
}

/// Per-day itinerary entry.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DayPlan {
    /// 1-based day counter within the itinerary
    pub day: u32,
    /// Activities in chronological order
    pub activities: Vec<Activity>,
}

impl DayPlan {
    pub fn total_hours(&self) -> f64 {
        self.activities.iter().map(|activity| activity.hours).sum()
    }
}

pub type Itinerary = Vec<DayPlan>;

/// Deserialize an already-parsed itinerary value, reporting the JSON path of
/// the first mismatch.
pub fn deserialize_itinerary(value: &Value) -> Result<Itinerary> {
    let raw = value.to_string();
    let mut deserializer = serde_json::Deserializer::from_str(&raw);
    serde_path_to_error::deserialize(&mut deserializer).map_err(|err| {
        let path = err.path().to_string();
        let location = if path.is_empty() || path == "." {
            "<root>".to_string()
        } else {
            path
        };
        PlannerError::Validation(format!(
            "failed to deserialize itinerary at {}: {}",
            location,
            err.inner()
        ))
    })
}
