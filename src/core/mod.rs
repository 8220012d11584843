pub mod planner;
pub mod steps;

pub use crate::types::result::{ItineraryEval, TripPlan};
pub use planner::TripPlanner;
pub use steps::{PipelineStep, StepKind};
