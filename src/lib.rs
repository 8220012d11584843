//! vaca-planner: a small travel-planning service built on chained LLM calls
//!
//! A trip request (budget, length, vibe) is turned into a destination and
//! budget plan, then a day-by-day itinerary, then a brochure summary. The
//! itinerary text is cleaned of Markdown fences, parsed and checked for the
//! expected `[{day, activities: [{name, hours}]}]` shape.
//!
//! # Quick Start
//!
//! ```rust,no_run
//! use vaca_planner::{PlannerConfig, TripPlanner, TripRequest, Vibe};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let config = PlannerConfig::from_env()?;
//!     let planner = TripPlanner::from_config(&config)?;
//!
//!     let request = TripRequest::new(2000, 5, Vibe::Beach)?;
//!     let plan = planner.plan(&request).await?;
//!     println!("{}", plan.replay());
//!     Ok(())
//! }
//! ```

pub mod api;
pub mod config;
pub mod core;
pub mod error;
pub mod schemas;
pub mod services;
pub mod types;

pub use config::PlannerConfig;
pub use crate::core::{PipelineStep, StepKind, TripPlanner};
pub use error::{PlannerError, Result};
pub use schemas::{evaluate_itinerary, parse_itinerary, strip_code_fences};
pub use services::{ChatModel, OpenAIClient};
pub use types::{
    Activity, BudgetPlan, DayPlan, Itinerary, ItineraryEval, TripPlan, TripRequest, Vibe,
};

#[cfg(feature = "cli")]
pub mod cli;
