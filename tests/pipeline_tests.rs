mod common;

use std::sync::Arc;

use common::{ScriptedModel, BUDGET_JSON, ITINERARY_JSON, SUMMARY_TEXT};
use serde_json::json;
use vaca_planner::{PlannerError, StepKind, TripPlanner, TripRequest, Vibe};

fn request() -> TripRequest {
    TripRequest::new(2000, 2, Vibe::City).unwrap()
}

#[tokio::test]
async fn test_full_pipeline_with_valid_itinerary() {
    let model = Arc::new(ScriptedModel::with_itinerary(ITINERARY_JSON));
    let planner = TripPlanner::new(model.clone());

    let plan = planner.plan(&request()).await.unwrap();

    assert_eq!(plan.summary, SUMMARY_TEXT);
    assert_eq!(plan.itinerary_markdown, ITINERARY_JSON);
    assert!(plan.itinerary_eval.pass);
    assert_eq!(plan.itinerary_eval.reason, "Itinerary is valid.");
    assert_eq!(plan.itinerary_json.as_ref().unwrap()[1]["day"], 2);

    let days = plan.typed_itinerary().unwrap().unwrap();
    assert_eq!(days.len(), 2);
    assert_eq!(days[0].activities[1].name, "Belem Tower");

    let names: Vec<StepKind> = plan.steps.iter().map(|step| step.name).collect();
    assert_eq!(
        names,
        vec![StepKind::Budgeting, StepKind::Itinerary, StepKind::Summary]
    );
    assert_eq!(
        plan.steps[0].input,
        json!({"budget": 2000, "length": 2, "vibe": "city"})
    );
}

#[tokio::test]
async fn test_each_call_feeds_the_next() {
    let model = Arc::new(ScriptedModel::with_itinerary(ITINERARY_JSON));
    let planner = TripPlanner::new(model.clone());

    planner.plan(&request()).await.unwrap();

    let prompts = model.prompts();
    assert_eq!(prompts.len(), 3);
    assert!(prompts[0].0.contains("Budget: 2000\nLength: 2\nVibe: city"));
    assert!(prompts[1].0.ends_with(&format!("Budget JSON: {BUDGET_JSON}")));
    assert!(prompts[2].0.ends_with(ITINERARY_JSON));
    assert_eq!(prompts[0].1, 0.3);
    assert_eq!(prompts[1].1, 0.7);
}

#[tokio::test]
async fn test_fenced_itinerary_is_cleaned_but_raw_text_kept() {
    let fenced = format!("```json\n{ITINERARY_JSON}\n```");
    let model = Arc::new(ScriptedModel::with_itinerary(&fenced));
    let plan = TripPlanner::new(model).plan(&request()).await.unwrap();

    assert!(plan.itinerary_eval.pass);
    assert_eq!(plan.itinerary_markdown, fenced);
    assert_eq!(
        plan.itinerary_json.unwrap(),
        serde_json::from_str::<serde_json::Value>(ITINERARY_JSON).unwrap()
    );
}

#[tokio::test]
async fn test_prose_itinerary_degrades_without_error() {
    let prose = "Day one: wander the old town. Day two: relax by the river.";
    let model = Arc::new(ScriptedModel::with_itinerary(prose));
    let plan = TripPlanner::new(model).plan(&request()).await.unwrap();

    assert!(plan.itinerary_json.is_none());
    assert!(!plan.itinerary_eval.pass);
    assert_eq!(
        plan.itinerary_eval.reason,
        "Itinerary output is not valid JSON."
    );
    assert_eq!(plan.summary, SUMMARY_TEXT);
    assert!(plan.typed_itinerary().unwrap().is_none());
}

#[tokio::test]
async fn test_wrong_shape_is_reported() {
    let model = Arc::new(ScriptedModel::with_itinerary(
        r#"[{"day": 1, "activities": [{"name": "Museum", "hours": "three"}]}]"#,
    ));
    let plan = TripPlanner::new(model).plan(&request()).await.unwrap();

    assert!(plan.itinerary_json.is_some());
    assert!(!plan.itinerary_eval.pass);
    assert_eq!(
        plan.itinerary_eval.reason,
        "Activity missing name or hours field."
    );
}

#[tokio::test]
async fn test_failure_in_second_call_aborts_without_summary() {
    let model = Arc::new(ScriptedModel::new(vec![
        Ok(BUDGET_JSON.to_string()),
        Err(PlannerError::Upstream("HTTP 502 Bad Gateway error: upstream".into())),
        Ok(SUMMARY_TEXT.to_string()),
    ]));
    let planner = TripPlanner::new(model.clone());

    let err = planner.plan(&request()).await.unwrap_err();

    assert!(err.to_string().contains("502"));
    assert_eq!(model.prompts().len(), 2);
}
