use mockito::Matcher;
use serde_json::json;
use vaca_planner::{ChatModel, OpenAIClient, PlannerError};

fn completion_body(content: &str) -> String {
    json!({
        "id": "chatcmpl-1",
        "object": "chat.completion",
        "choices": [{
            "index": 0,
            "message": {"role": "assistant", "content": content},
            "finish_reason": "stop"
        }]
    })
    .to_string()
}

#[tokio::test]
async fn test_complete_sends_bearer_prompt_and_temperature() {
    let mut server = mockito::Server::new_async().await;
    let mock = server
        .mock("POST", "/chat/completions")
        .match_header("authorization", "Bearer sk-test")
        .match_body(Matcher::PartialJson(json!({
            "model": "gpt-3.5-turbo",
            "temperature": 0.3,
            "messages": [{"role": "user", "content": "Pick a beach"}]
        })))
        .with_status(200)
        .with_header("content-type", "application/json")
        .with_body(completion_body("{\"destination\": \"Tulum\"}"))
        .create_async()
        .await;

    let client = OpenAIClient::new("sk-test".to_string()).with_base_url(server.url());
    let reply = client.complete("Pick a beach", 0.3).await.unwrap();

    assert_eq!(reply, "{\"destination\": \"Tulum\"}");
    mock.assert_async().await;
}

#[tokio::test]
async fn test_http_error_carries_provider_message() {
    let mut server = mockito::Server::new_async().await;
    let _mock = server
        .mock("POST", "/chat/completions")
        .with_status(401)
        .with_body(json!({"error": {"message": "Incorrect API key provided"}}).to_string())
        .create_async()
        .await;

    let client = OpenAIClient::new("sk-wrong".to_string()).with_base_url(server.url());
    let err = client.complete("hi", 0.7).await.unwrap_err();

    assert!(matches!(err, PlannerError::Upstream(_)));
    assert!(err.to_string().contains("Incorrect API key provided"));
}

#[tokio::test]
async fn test_rate_limit_is_not_retried() {
    let mut server = mockito::Server::new_async().await;
    let mock = server
        .mock("POST", "/chat/completions")
        .with_status(429)
        .with_header("retry-after", "7")
        .with_body("{}")
        .expect(1)
        .create_async()
        .await;

    let client = OpenAIClient::new("sk-test".to_string()).with_base_url(server.url());
    let err = client.complete("hi", 0.7).await.unwrap_err();

    assert!(matches!(err, PlannerError::RateLimit { retry_after: 7 }));
    mock.assert_async().await;
}

#[tokio::test]
async fn test_server_error_is_not_retried() {
    let mut server = mockito::Server::new_async().await;
    let mock = server
        .mock("POST", "/chat/completions")
        .with_status(503)
        .with_body("upstream unavailable")
        .expect(1)
        .create_async()
        .await;

    let client = OpenAIClient::new("sk-test".to_string()).with_base_url(server.url());
    let err = client.complete("hi", 0.7).await.unwrap_err();

    assert!(err.to_string().contains("upstream unavailable"));
    mock.assert_async().await;
}

#[tokio::test]
async fn test_body_level_error_object() {
    let mut server = mockito::Server::new_async().await;
    let _mock = server
        .mock("POST", "/chat/completions")
        .with_status(200)
        .with_body(json!({"error": {"message": "model overloaded"}}).to_string())
        .create_async()
        .await;

    let client = OpenAIClient::new("sk-test".to_string()).with_base_url(server.url());
    let err = client.complete("hi", 0.7).await.unwrap_err();

    assert!(err.to_string().contains("model overloaded"));
}

#[tokio::test]
async fn test_non_json_success_body_is_serialization_error() {
    let mut server = mockito::Server::new_async().await;
    let _mock = server
        .mock("POST", "/chat/completions")
        .with_status(200)
        .with_body("<html>gateway login</html>")
        .create_async()
        .await;

    let client = OpenAIClient::new("sk-test".to_string()).with_base_url(server.url());
    let err = client.complete("hi", 0.7).await.unwrap_err();

    assert!(matches!(err, PlannerError::Serialization(_)));
    assert_eq!(err.error_code(), "SERIALIZATION_ERROR");
    assert_eq!(err.status_code(), 500);
    assert_eq!(err.to_error_payload()["error"], "Trip planning pipeline failed");
}
