use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::error::{PlannerError, Result};
use crate::schemas::is_truthy;

pub const MAX_TRIP_LENGTH: u32 = 30;

/// Mood of the trip the user is after.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Vibe {
    Beach,
    City,
    Mountain,
    Culture,
    Nightlife,
}

impl Vibe {
    pub const ALL: [Vibe; 5] = [
        Vibe::Beach,
        Vibe::City,
        Vibe::Mountain,
        Vibe::Culture,
        Vibe::Nightlife,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Vibe::Beach => "beach",
            Vibe::City => "city",
            Vibe::Mountain => "mountain",
            Vibe::Culture => "culture",
            Vibe::Nightlife => "nightlife",
        }
    }

    fn choices() -> String {
        Self::ALL
            .iter()
            .map(Vibe::as_str)
            .collect::<Vec<_>>()
            .join(", ")
    }
}

impl fmt::Display for Vibe {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Vibe {
    type Err = PlannerError;

    fn from_str(s: &str) -> Result<Self> {
        let wanted = s.trim().to_ascii_lowercase();
        Self::ALL
            .into_iter()
            .find(|vibe| vibe.as_str() == wanted)
            .ok_or_else(|| {
                PlannerError::InvalidRequest(format!("vibe must be one of: {}", Self::choices()))
            })
    }
}

/// The budget/length/vibe triple that seeds the pipeline.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TripRequest {
    /// Total budget in USD
    pub budget: u64,
    /// Trip length in days
    pub length: u32,
    pub vibe: Vibe,
}

impl TripRequest {
    pub fn new(budget: u64, length: u32, vibe: Vibe) -> Result<Self> {
        if budget == 0 {
            return Err(budget_error());
        }
        if !(1..=MAX_TRIP_LENGTH).contains(&length) {
            return Err(length_error());
        }
        Ok(Self {
            budget,
            length,
            vibe,
        })
    }

    /// Build a request from an untyped JSON body.
    ///
    /// Absent or falsy fields are reported together as missing before any
    /// range checks run.
    pub fn from_json(body: &Value) -> Result<Self> {
        let field = |name: &str| body.get(name).filter(|value| is_truthy(value));

        let (budget, length, vibe) = match (field("budget"), field("length"), field("vibe")) {
            (Some(budget), Some(length), Some(vibe)) => (budget, length, vibe),
            (budget, length, vibe) => {
                let missing: Vec<&str> = [
                    ("budget", budget.is_none()),
                    ("length", length.is_none()),
                    ("vibe", vibe.is_none()),
                ]
                .into_iter()
                .filter_map(|(name, absent)| absent.then_some(name))
                .collect();
                return Err(PlannerError::InvalidRequest(format!(
                    "Missing required fields: {}",
                    missing.join(", ")
                )));
            }
        };

        let budget = whole_number(budget)
            .filter(|&n| n > 0)
            .ok_or_else(budget_error)?;
        let length = whole_number(length)
            .and_then(|n| u32::try_from(n).ok())
            .ok_or_else(length_error)?;
        let vibe = vibe
            .as_str()
            .ok_or_else(|| {
                PlannerError::InvalidRequest(format!("vibe must be one of: {}", Vibe::choices()))
            })?
            .parse::<Vibe>()?;

        Self::new(budget, length, vibe)
    }
}

fn whole_number(value: &Value) -> Option<u64> {
    if let Some(n) = value.as_u64() {
        return Some(n);
    }
    value
        .as_f64()
        .filter(|n| *n >= 0.0 && n.fract() == 0.0 && *n <= u64::MAX as f64)
        .map(|n| n as u64)
}

fn budget_error() -> PlannerError {
    PlannerError::InvalidRequest("budget must be a positive integer".to_string())
}

fn length_error() -> PlannerError {
    PlannerError::InvalidRequest(format!(
        "length must be an integer between 1 and {MAX_TRIP_LENGTH}"
    ))
}
