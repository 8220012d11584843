#![allow(dead_code)]

use std::collections::VecDeque;
use std::sync::Mutex;

use async_trait::async_trait;
use vaca_planner::{ChatModel, PlannerError, Result};

pub const BUDGET_JSON: &str =
    r#"{"destination": "Lisbon, Portugal", "totalCost": 1950, "note": "Stay in Alfama"}"#;
pub const ITINERARY_JSON: &str = r#"[
  {"day": 1, "activities": [{"name": "Tram 28", "hours": 2}, {"name": "Belem Tower", "hours": 1.5}]},
  {"day": 2, "activities": [{"name": "Sintra day trip", "hours": 7}]}
]"#;
pub const SUMMARY_TEXT: &str = "Two sunlit days of trams, towers and palaces in Lisbon.";

/// Replies with pre-scripted outputs in order and records every prompt.
#[derive(Debug, Default)]
pub struct ScriptedModel {
    replies: Mutex<VecDeque<Result<String>>>,
    prompts: Mutex<Vec<(String, f64)>>,
}

impl ScriptedModel {
    pub fn new(replies: Vec<Result<String>>) -> Self {
        Self {
            replies: Mutex::new(replies.into()),
            prompts: Mutex::new(Vec::new()),
        }
    }

    pub fn with_itinerary(itinerary: &str) -> Self {
        Self::new(vec![
            Ok(BUDGET_JSON.to_string()),
            Ok(itinerary.to_string()),
            Ok(SUMMARY_TEXT.to_string()),
        ])
    }

    pub fn prompts(&self) -> Vec<(String, f64)> {
        self.prompts.lock().unwrap().clone()
    }
}

#[async_trait]
impl ChatModel for ScriptedModel {
    async fn complete(&self, prompt: &str, temperature: f64) -> Result<String> {
        self.prompts
            .lock()
            .unwrap()
            .push((prompt.to_string(), temperature));
        self.replies
            .lock()
            .unwrap()
            .pop_front()
            .unwrap_or_else(|| Err(PlannerError::Upstream("no scripted reply left".into())))
    }
}
