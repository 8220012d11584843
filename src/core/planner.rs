use crate::{
    config::PlannerConfig,
    core::steps::{PipelineStep, StepKind},
    error::Result,
    schemas::validation::parse_itinerary,
    services::{prompts, ChatModel, OpenAIClient},
    types::{BudgetPlan, TripPlan, TripRequest},
};
use serde_json::{json, Value};
use std::{sync::Arc, time::Instant};
use tracing::{debug, info, warn};

const BUDGETING_TEMPERATURE: f64 = 0.3;
const ITINERARY_TEMPERATURE: f64 = 0.7;
const SUMMARY_TEMPERATURE: f64 = 0.7;

/// Runs the budgeting, itinerary and summary calls in sequence and evaluates
/// the itinerary the model produced.
#[derive(Debug, Clone)]
pub struct TripPlanner {
    model: Arc<dyn ChatModel>,
}

impl TripPlanner {
    pub fn new(model: Arc<dyn ChatModel>) -> Self {
        Self { model }
    }

    pub fn from_config(config: &PlannerConfig) -> Result<Self> {
        let client = OpenAIClient::from_config(config)?;
        Ok(Self::new(Arc::new(client)))
    }

    /// Run the whole pipeline for one request.
    ///
    /// Any failed model call aborts the run. An itinerary that is not JSON or
    /// has the wrong shape is reported through `itinerary_eval` instead.
    pub async fn plan(&self, request: &TripRequest) -> Result<TripPlan> {
        info!(
            budget = request.budget,
            length = request.length,
            vibe = %request.vibe,
            "planning trip"
        );

        let budgeting = self
            .call(
                StepKind::Budgeting,
                json!({
                    "budget": request.budget,
                    "length": request.length,
                    "vibe": request.vibe,
                }),
                prompts::budgeting_prompt(request),
                BUDGETING_TEMPERATURE,
            )
            .await?;

        if let Some(plan) = BudgetPlan::from_model_output(&budgeting.output) {
            info!(
                destination = %plan.destination,
                total_cost = plan.total_cost,
                "budget plan chosen"
            );
        }

        let itinerary = self
            .call(
                StepKind::Itinerary,
                json!({ "budgeting_json": budgeting.output }),
                prompts::itinerary_prompt(&budgeting.output),
                ITINERARY_TEMPERATURE,
            )
            .await?;

        let summary = self
            .call(
                StepKind::Summary,
                json!({ "itinerary_markdown": itinerary.output }),
                prompts::summary_prompt(&itinerary.output),
                SUMMARY_TEMPERATURE,
            )
            .await?;

        let (itinerary_json, itinerary_eval) = parse_itinerary(&itinerary.output);
        if itinerary_eval.pass {
            debug!(target: "vaca_planner::pipeline", reason = %itinerary_eval.reason);
        } else {
            warn!(
                target: "vaca_planner::pipeline",
                reason = %itinerary_eval.reason,
                "itinerary failed evaluation"
            );
        }

        Ok(TripPlan {
            summary: summary.output.clone(),
            itinerary_markdown: itinerary.output.clone(),
            itinerary_json,
            itinerary_eval,
            steps: vec![budgeting, itinerary, summary],
        })
    }

    async fn call(
        &self,
        kind: StepKind,
        input: Value,
        prompt: String,
        temperature: f64,
    ) -> Result<PipelineStep> {
        debug!(target: "vaca_planner::pipeline", step = kind.label(), %prompt);

        let started = Instant::now();
        let output = self.model.complete(&prompt, temperature).await.map_err(|err| {
            warn!(step = kind.label(), error = %err, "model call failed");
            err
        })?;
        let elapsed_ms = started.elapsed().as_millis() as u64;

        info!(step = kind.label(), elapsed_ms, "model call finished");
        debug!(target: "vaca_planner::pipeline", step = kind.label(), %output);

        Ok(PipelineStep::new(kind, input, output, elapsed_ms))
    }
}
