//! Assistant proxy: canned fallbacks and the OpenAI-compatible client.

#![allow(clippy::unwrap_used)]
#![allow(clippy::expect_used)]
#![allow(clippy::panic)]

mod support;

use std::net::SocketAddr;
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use axum::http::{HeaderMap, StatusCode};
use axum::routing::post;
use axum::{Json, Router};
use serde_json::{json, Value};

use arctic_core::error::{ArcticError, Result};
use arctic_gateway::assistant::{
    canned_text, Language, LanguageModel, OpenAiCompatClient, PromptMessage, ReplyOutcome,
};
use arctic_gateway::config::AssistantSection;
use support::{call, get, harness, post_json};

/// Replays a fixed answer and records what it was sent.
struct ScriptedModel {
    answer: std::result::Result<String, String>,
    seen: Mutex<Vec<Vec<PromptMessage>>>,
}

impl ScriptedModel {
    fn new(answer: std::result::Result<&str, &str>) -> Arc<Self> {
        Arc::new(Self {
            answer: answer.map(str::to_string).map_err(str::to_string),
            seen: Mutex::new(Vec::new()),
        })
    }
}

#[async_trait]
impl LanguageModel for ScriptedModel {
    async fn complete(&self, messages: &[PromptMessage]) -> Result<String> {
        self.seen.lock().unwrap().push(messages.to_vec());
        self.answer.clone().map_err(ArcticError::ExternalService)
    }
}

#[tokio::test]
async fn missing_key_replies_unavailable_and_logs_both_turns() {
    let h = harness(None);

    let (status, body) = call(
        &h.app,
        post_json("/api/chat/assist", json!({ "message": "How cold is it?", "language": "en" })),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["degraded"], true);
    assert_eq!(body["reply"], canned_text(ReplyOutcome::Unavailable, Language::En));

    let (_, body) = call(&h.app, get("/api/chat/history")).await;
    let msgs = body["messages"].as_array().unwrap();
    assert_eq!(msgs.len(), 2);
    assert_eq!(msgs[0]["role"], "user");
    assert_eq!(msgs[1]["role"], "assistant");
}

#[tokio::test]
async fn upstream_failure_becomes_apology_in_language() {
    let model = ScriptedModel::new(Err("boom"));
    let h = harness(Some(model.clone() as Arc<dyn LanguageModel>));

    let (status, body) = call(
        &h.app,
        post_json("/api/chat/assist", json!({ "message": "Привет" })),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["degraded"], true);
    assert_eq!(body["reply"], canned_text(ReplyOutcome::Failed, Language::Ru));
    assert_eq!(model.seen.lock().unwrap().len(), 1);
}

#[tokio::test]
async fn empty_completion_uses_sensor_fallback() {
    let h = harness(Some(ScriptedModel::new(Ok("   ")) as Arc<dyn LanguageModel>));
    let (_, body) = call(
        &h.app,
        post_json("/api/chat/assist", json!({ "message": "?", "language": "en" })),
    )
    .await;
    assert_eq!(body["reply"], canned_text(ReplyOutcome::Empty, Language::En));
}

#[tokio::test]
async fn successful_reply_sees_history_and_live_data() {
    let model = ScriptedModel::new(Ok("Ice is at 87.2%! ❄️"));
    let h = harness(Some(model.clone() as Arc<dyn LanguageModel>));

    call(
        &h.app,
        post_json("/api/chat/message", json!({ "role": "user", "content": "earlier question" })),
    )
    .await;

    let (status, body) = call(
        &h.app,
        post_json("/api/chat/assist", json!({ "message": "How is the ice?", "sessionId": "default" })),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["degraded"], false);
    assert_eq!(body["reply"], "Ice is at 87.2%! ❄️");
    assert_eq!(body["sessionId"], "default");

    let seen = model.seen.lock().unwrap();
    let sent = &seen[0];
    assert_eq!(sent.first().unwrap().role, "system");
    assert!(sent.iter().any(|m| m.role == "user" && m.content == "earlier question"));
    assert!(sent.iter().any(|m| m.role == "system" && m.content.contains("ice coverage")));
    assert_eq!(sent.last().unwrap().content, "How is the ice?");
    // The new turn is sent once, not duplicated from the log.
    assert_eq!(sent.iter().filter(|m| m.content == "How is the ice?").count(), 1);
}

#[tokio::test]
async fn assist_validates_input() {
    let h = harness(None);

    let (status, _) = call(&h.app, post_json("/api/chat/assist", json!({ "message": "  " }))).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);

    let (status, _) = call(
        &h.app,
        post_json("/api/chat/assist", json!({ "message": "hi", "language": "de" })),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);

    let (status, _) = call(
        &h.app,
        post_json("/api/chat/assist", json!({ "message": "hi", "sessionId": "chat_0_gone" })),
    )
    .await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

// --------------------
// OpenAI-compatible client against a local fake upstream
// --------------------

type Seen = Arc<Mutex<Vec<(Option<String>, Value)>>>;

async fn spawn_upstream(status: StatusCode, reply: Value, seen: Seen) -> SocketAddr {
    let app = Router::new().route(
        "/v1/chat/completions",
        post(move |headers: HeaderMap, Json(body): Json<Value>| {
            let seen = Arc::clone(&seen);
            let reply = reply.clone();
            async move {
                let auth = headers
                    .get("authorization")
                    .and_then(|v| v.to_str().ok())
                    .map(str::to_string);
                seen.lock().unwrap().push((auth, body));
                (status, Json(reply))
            }
        }),
    );

    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });
    addr
}

fn section_for(addr: SocketAddr) -> AssistantSection {
    AssistantSection {
        base_url: format!("http://{addr}/v1/"),
        timeout_ms: Some(5_000),
        ..AssistantSection::default()
    }
}

#[tokio::test]
async fn client_posts_completion_request() {
    let seen = Arc::new(Mutex::new(Vec::new()));
    let addr = spawn_upstream(
        StatusCode::OK,
        json!({ "choices": [{ "message": { "role": "assistant", "content": "Hello from the north!" } }] }),
        Arc::clone(&seen),
    )
    .await;

    let client = OpenAiCompatClient::new(&section_for(addr), "sk-local").unwrap();
    let msgs = vec![PromptMessage { role: "user".into(), content: "hi".into() }];
    let text = client.complete(&msgs).await.unwrap();
    assert_eq!(text, "Hello from the north!");

    let seen = seen.lock().unwrap();
    let (auth, body) = &seen[0];
    assert_eq!(auth.as_deref(), Some("Bearer sk-local"));
    assert_eq!(body["model"], "gpt-4o-mini");
    assert_eq!(body["max_tokens"], 1024);
    assert_eq!(body["messages"][0]["content"], "hi");
}

#[tokio::test]
async fn client_maps_upstream_errors() {
    let seen = Arc::new(Mutex::new(Vec::new()));
    let addr = spawn_upstream(
        StatusCode::TOO_MANY_REQUESTS,
        json!({ "error": { "message": "slow down" } }),
        Arc::clone(&seen),
    )
    .await;

    let client = OpenAiCompatClient::new(&section_for(addr), "sk-local").unwrap();
    let err = client.complete(&[]).await.expect_err("429 must fail");
    assert_eq!(err.client_code().as_str(), "EXTERNAL_SERVICE");
    assert!(err.to_string().contains("429"));
}

#[tokio::test]
async fn client_rejects_shapeless_body() {
    let seen = Arc::new(Mutex::new(Vec::new()));
    let addr = spawn_upstream(StatusCode::OK, json!({ "choices": [] }), seen).await;

    let client = OpenAiCompatClient::new(&section_for(addr), "sk-local").unwrap();
    let err = client.complete(&[]).await.expect_err("no choices");
    assert_eq!(err.client_code().as_str(), "EXTERNAL_SERVICE");
}
