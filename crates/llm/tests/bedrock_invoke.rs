use std::sync::{Arc, Mutex};

use askamy_llm::{
    BedrockClient, InferenceClient, InferenceConfig, InferenceError, InferenceRequest,
};
use axum::Router;
use axum::extract::{Path, State};
use axum::http::{HeaderMap, StatusCode, header};
use axum::routing::post;
use axum::Json;
use serde_json::{Value, json};

#[derive(Debug, Clone)]
struct CapturedCall {
    model_id: String,
    authorization: Option<String>,
    content_type: Option<String>,
    body: Value,
}

#[derive(Clone)]
struct FakeRuntime {
    calls: Arc<Mutex<Vec<CapturedCall>>>,
    status: StatusCode,
    reply: Value,
}

async fn invoke(
    State(runtime): State<FakeRuntime>,
    Path(model_id): Path<String>,
    headers: HeaderMap,
    Json(body): Json<Value>,
) -> (StatusCode, Json<Value>) {
    let header_value = |name: header::HeaderName| {
        headers
            .get(name)
            .and_then(|value| value.to_str().ok())
            .map(str::to_string)
    };
    runtime.calls.lock().unwrap().push(CapturedCall {
        model_id,
        authorization: header_value(header::AUTHORIZATION),
        content_type: header_value(header::CONTENT_TYPE),
        body,
    });
    (runtime.status, Json(runtime.reply.clone()))
}

async fn spawn_runtime(status: StatusCode, reply: Value) -> (String, Arc<Mutex<Vec<CapturedCall>>>) {
    let calls = Arc::new(Mutex::new(Vec::new()));
    let app = Router::new()
        .route("/model/{model_id}/invoke", post(invoke))
        .with_state(FakeRuntime {
            calls: calls.clone(),
            status,
            reply,
        });

    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let address = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });

    (format!("http://{address}"), calls)
}

fn client_for(endpoint: &str) -> BedrockClient {
    let config = InferenceConfig::new("us-east-1", "amazon.titan-text-express-v1", "test-key")
        .with_endpoint(endpoint);
    BedrockClient::new(config).unwrap()
}

#[tokio::test]
async fn posts_input_text_with_bearer_auth() {
    let (endpoint, calls) =
        spawn_runtime(StatusCode::OK, json!({ "outputText": "Hi there" })).await;
    let client = client_for(&endpoint);

    let response = client
        .invoke(InferenceRequest::new(client.model_id(), "Hello"))
        .await
        .unwrap();

    assert_eq!(response.output_text, "Hi there");

    let calls = calls.lock().unwrap();
    assert_eq!(calls.len(), 1);
    let call = &calls[0];
    assert_eq!(call.model_id, "amazon.titan-text-express-v1");
    assert_eq!(call.authorization.as_deref(), Some("Bearer test-key"));
    assert_eq!(call.content_type.as_deref(), Some("application/json"));
    assert_eq!(call.body, json!({ "inputText": "Hello" }));
}

#[tokio::test]
async fn non_success_status_is_an_error() {
    let (endpoint, _calls) = spawn_runtime(
        StatusCode::FORBIDDEN,
        json!({ "message": "budget exceeded" }),
    )
    .await;
    let client = client_for(&endpoint);

    let error = client
        .invoke(InferenceRequest::new(client.model_id(), "Hello"))
        .await
        .unwrap_err();

    match error {
        InferenceError::ResponseStatus { status, body, .. } => {
            assert_eq!(status, 403);
            assert!(body.contains("budget exceeded"));
        }
        other => panic!("unexpected error: {other}"),
    }
}

#[tokio::test]
async fn reply_without_output_text_is_an_error() {
    let (endpoint, _calls) = spawn_runtime(StatusCode::OK, json!({ "message": "ok" })).await;
    let client = client_for(&endpoint);

    let error = client
        .invoke(InferenceRequest::new(client.model_id(), "Hello"))
        .await
        .unwrap_err();

    assert!(matches!(error, InferenceError::MissingOutputText { .. }));
}

#[tokio::test]
async fn unreachable_endpoint_is_a_send_error() {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let address = listener.local_addr().unwrap();
    drop(listener);

    let client = client_for(&format!("http://{address}"));
    let error = client
        .invoke(InferenceRequest::new(client.model_id(), "Hello"))
        .await
        .unwrap_err();

    assert!(matches!(error, InferenceError::SendRequest { .. }));
}
