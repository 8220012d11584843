use serde::{Deserialize, Serialize};
use serde_json::Value;

/// The three model calls of the pipeline, in execution order
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum StepKind {
    /// Picks a destination and allocates the budget
    Budgeting,
    /// Expands the budget plan into a day-by-day activity list
    Itinerary,
    /// Condenses the itinerary into a brochure paragraph
    Summary,
}

impl StepKind {
    pub fn label(&self) -> &'static str {
        match self {
            StepKind::Budgeting => "Budgeting",
            StepKind::Itinerary => "Itinerary",
            StepKind::Summary => "Summary",
        }
    }
}

/// Record of a single model call
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PipelineStep {
    pub name: StepKind,
    /// Template variables the prompt was rendered from
    pub input: Value,
    /// Raw text returned by the model
    pub output: String,
    pub elapsed_ms: u64,
}

impl PipelineStep {
    pub fn new(name: StepKind, input: Value, output: String, elapsed_ms: u64) -> Self {
        Self {
            name,
            input,
            output,
            elapsed_ms,
        }
    }
}
