use std::sync::OnceLock;

use regex::Regex;
use serde_json::Value;

use crate::types::result::ItineraryEval;

pub const REASON_NOT_ARRAY: &str = "Itinerary is not an array.";
pub const REASON_MISSING_DAY_OR_ACTIVITIES: &str = "Missing day or activities field.";
pub const REASON_ACTIVITIES_NOT_ARRAY: &str = "Activities is not an array.";
pub const REASON_ACTIVITY_INCOMPLETE: &str = "Activity missing name or hours field.";
pub const REASON_VALID: &str = "Itinerary is valid.";
pub const REASON_NOT_JSON: &str = "Itinerary output is not valid JSON.";

fn opening_fence() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"^```[A-Za-z0-9_+-]*\s*").expect("valid fence pattern"))
}

fn closing_fence() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"\s*```\s*$").expect("valid fence pattern"))
}

/// Loose truthiness: `null`, `false`, `0` and `""` are falsy, everything else
/// (including empty arrays and objects) is truthy.
pub fn is_truthy(value: &Value) -> bool {
    match value {
        Value::Null => false,
        Value::Bool(flag) => *flag,
        Value::Number(number) => number.as_f64().map_or(true, |n| n != 0.0),
        Value::String(text) => !text.is_empty(),
        Value::Array(_) | Value::Object(_) => true,
    }
}

fn truthy_field(value: &Value, field: &str) -> bool {
    value.get(field).is_some_and(is_truthy)
}

/// Remove a leading Markdown code fence (with optional language tag) and a
/// trailing fence, then trim.
pub fn strip_code_fences(raw: &str) -> String {
    let text = raw.trim_start();
    let text = opening_fence().replace(text, "");
    let text = closing_fence().replace(&text, "");
    text.trim().to_string()
}

/// Check that a parsed value looks like `[{day, activities: [{name, hours}]}]`.
///
/// Rules are applied in order and the first failure wins. Only structure is
/// checked; `day = 0` counts as missing under the truthiness rule.
pub fn evaluate_itinerary(itinerary: &Value) -> ItineraryEval {
    let Some(days) = itinerary.as_array() else {
        return ItineraryEval::fail(REASON_NOT_ARRAY);
    };

    for day in days {
        if !truthy_field(day, "day") || !truthy_field(day, "activities") {
            return ItineraryEval::fail(REASON_MISSING_DAY_OR_ACTIVITIES);
        }

        let Some(activities) = day.get("activities").and_then(Value::as_array) else {
            return ItineraryEval::fail(REASON_ACTIVITIES_NOT_ARRAY);
        };

        for activity in activities {
            let has_hours = activity.get("hours").is_some_and(Value::is_number);
            if !truthy_field(activity, "name") || !has_hours {
                return ItineraryEval::fail(REASON_ACTIVITY_INCOMPLETE);
            }
        }
    }

    ItineraryEval::pass(REASON_VALID)
}

/// Clean, parse and evaluate raw itinerary text from the model.
///
/// Unparseable text is not an error: it yields `None` and a failing verdict.
pub fn parse_itinerary(raw: &str) -> (Option<Value>, ItineraryEval) {
    let cleaned = strip_code_fences(raw);
    match serde_json::from_str::<Value>(&cleaned) {
        Ok(value) => {
            let verdict = evaluate_itinerary(&value);
            (Some(value), verdict)
        }
        Err(_) => (None, ItineraryEval::fail(REASON_NOT_JSON)),
    }
}
