use super::itinerary::{deserialize_itinerary, BudgetPlan, Itinerary};
use crate::{
    core::steps::{PipelineStep, StepKind},
    error::Result,
};
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Structural verdict on the itinerary produced by the model
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ItineraryEval {
    pub pass: bool,
    pub reason: String,
}

impl ItineraryEval {
    pub fn pass(reason: impl Into<String>) -> Self {
        Self {
            pass: true,
            reason: reason.into(),
        }
    }

    pub fn fail(reason: impl Into<String>) -> Self {
        Self {
            pass: false,
            reason: reason.into(),
        }
    }
}

/// Result of one pipeline run, serialised as the HTTP response body
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TripPlan {
    /// Every model call in execution order
    pub steps: Vec<PipelineStep>,
    /// Brochure paragraph from the summary call
    pub summary: String,
    /// Itinerary text exactly as the model returned it
    pub itinerary_markdown: String,
    /// Parsed itinerary, `null` when the text was not JSON
    pub itinerary_json: Option<Value>,
    pub itinerary_eval: ItineraryEval,
}

impl TripPlan {
    pub fn step(&self, kind: StepKind) -> Option<&PipelineStep> {
        self.steps.iter().find(|step| step.name == kind)
    }

    /// Best-effort typed view of the budgeting output
    pub fn budget_plan(&self) -> Option<BudgetPlan> {
        self.step(StepKind::Budgeting)
            .and_then(|step| BudgetPlan::from_model_output(&step.output))
    }

    /// Typed itinerary, only available once the structural check passed
    pub fn typed_itinerary(&self) -> Result<Option<Itinerary>> {
        match (&self.itinerary_json, self.itinerary_eval.pass) {
            (Some(value), true) => deserialize_itinerary(value).map(Some),
            _ => Ok(None),
        }
    }

    pub fn total_elapsed_ms(&self) -> u64 {
        self.steps.iter().map(|step| step.elapsed_ms).sum()
    }

    /// Generate a human-readable replay of the run
    pub fn replay(&self) -> String {
        let mut lines = Vec::new();

        lines.push("=== Trip Planner Trace ===".to_string());
        lines.push(format!(
            "Duration: {:.2}s",
            self.total_elapsed_ms() as f64 / 1000.0
        ));

        if let Some(plan) = self.budget_plan() {
            lines.push(format!(
                "Destination: {} (est. ${:.0})",
                plan.destination, plan.total_cost
            ));
            if !plan.note.is_empty() {
                lines.push(format!("Budget note: {}", plan.note));
            }
        }

        lines.push(String::new());
        lines.push("--- Steps ---".to_string());
        for (idx, step) in self.steps.iter().enumerate() {
            lines.push(format!(
                "{}. {} ({} ms, {} chars)",
                idx + 1,
                step.name.label(),
                step.elapsed_ms,
                step.output.chars().count()
            ));
        }

        lines.push(String::new());
        lines.push("--- Summary ---".to_string());
        lines.push(self.summary.trim().to_string());

        lines.push(String::new());
        lines.push("--- Itinerary ---".to_string());
        match self.typed_itinerary() {
            Ok(Some(days)) => {
                for day in &days {
                    lines.push(format!("Day {} ({:.1}h)", day.day, day.total_hours()));
                    for activity in &day.activities {
                        lines.push(format!("  - {} ({}h)", activity.name, activity.hours));
                    }
                }
            }
            Ok(None) => {
                lines.push(format!("Warning: {}", self.itinerary_eval.reason));
                lines.push(self.itinerary_markdown.trim().to_string());
            }
            Err(err) => {
                lines.push(format!("Warning: {}", err));
                lines.push(self.itinerary_markdown.trim().to_string());
            }
        }

        lines.join("\n")
    }
}
