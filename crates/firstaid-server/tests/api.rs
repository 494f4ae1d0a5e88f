use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use axum::body::{to_bytes, Body};
use axum::http::{header, Method, Request, StatusCode};
use axum::routing::post;
use axum::{Json, Router};
use firstaid_config::ProxyConfig;
use firstaid_core::{Advice, AdviceError, AdviceService};
use firstaid_llm::InferenceProxy;
use firstaid_server::{router, ServerState};
use serde_json::{json, Value};
use tokio::net::TcpListener;
use tower::ServiceExt;

/// Answers every call with a fixed outcome and counts invocations.
struct Scripted {
    outcome: Result<String, AdviceError>,
    calls: AtomicUsize,
}

impl Scripted {
    fn new(outcome: Result<String, AdviceError>) -> Arc<Self> {
        Arc::new(Self { outcome, calls: AtomicUsize::new(0) })
    }

    fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl AdviceService for Scripted {
    async fn generate_advice(&self, message: &str) -> Result<Advice, AdviceError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        self.outcome.clone().map(|assistant_text| Advice {
            original_message: message.to_string(),
            assistant_text,
        })
    }
}

fn app(service: Arc<dyn AdviceService>) -> Router {
    router(Arc::new(ServerState::new(service)))
}

fn analyze_request(body: &str) -> Request<Body> {
    Request::builder()
        .method(Method::POST)
        .uri("/analyze")
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from(body.to_string()))
        .unwrap()
}

async fn send(app: Router, request: Request<Body>) -> (StatusCode, Value) {
    let response = app.oneshot(request).await.unwrap();
    let status = response.status();
    let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    let body = serde_json::from_slice(&bytes).unwrap_or(Value::Null);
    (status, body)
}

/// Serves a canned Ollama reply on an ephemeral port, optionally delayed.
async fn spawn_ollama(reply: Value, delay: Duration) -> String {
    let app = Router::new().route(
        "/api/generate",
        post(move |Json(_body): Json<Value>| {
            let reply = reply.clone();
            async move {
                tokio::time::sleep(delay).await;
                Json(reply)
            }
        }),
    );

    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });
    format!("http://{}/api/generate", addr)
}

fn proxy_app(endpoint: &str, timeout: Duration) -> Router {
    let config = ProxyConfig::default()
        .with_endpoint(endpoint)
        .with_timeout(timeout);
    app(Arc::new(InferenceProxy::new(config).unwrap()))
}

#[tokio::test]
async fn root_reports_running() {
    let service = Scripted::new(Ok(String::new()));
    let request = Request::builder().uri("/").body(Body::empty()).unwrap();

    let (status, body) = send(app(service.clone()), request).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["status"], "running");
    assert_eq!(body["message"], "Emergency Health Assistant API");
    assert_eq!(service.calls(), 0);
}

#[tokio::test]
async fn analyze_returns_input_and_reply() {
    let service = Scripted::new(Ok("Rinse the wound.".into()));

    let (status, body) = send(app(service.clone()), analyze_request(r#"{"message":"I scraped my knee"}"#)).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, json!({ "user_input": "I scraped my knee", "ai_response": "Rinse the wound." }));
    assert_eq!(service.calls(), 1);
}

#[tokio::test]
async fn blank_or_missing_message_is_rejected_without_a_call() {
    let bodies = [
        r#"{"message":""}"#,
        r#"{"message":"   \t"}"#,
        r#"{"message":null}"#,
        r#"{}"#,
        r#"not json"#,
    ];

    for raw in bodies {
        let service = Scripted::new(Ok("unused".into()));
        let (status, body) = send(app(service.clone()), analyze_request(raw)).await;

        assert_eq!(status, StatusCode::BAD_REQUEST, "body {raw:?}");
        assert!(body["error"].is_string(), "body {raw:?}");
        assert_eq!(service.calls(), 0, "body {raw:?}");
    }
}

#[tokio::test]
async fn proxy_failures_become_500() {
    let failures = [
        AdviceError::Connection { endpoint: "http://localhost:11434/api/generate".into(), detail: "refused".into() },
        AdviceError::Timeout { secs: 60 },
        AdviceError::Transport("unexpected status 502".into()),
    ];

    for failure in failures {
        let expected = failure.to_string();
        let service = Scripted::new(Err(failure));
        let (status, body) = send(app(service), analyze_request(r#"{"message":"help"}"#)).await;

        assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(body["error"], expected);
    }
}

#[tokio::test]
async fn cors_allows_any_origin() {
    let service = Scripted::new(Ok(String::new()));
    let request = Request::builder()
        .method(Method::OPTIONS)
        .uri("/analyze")
        .header(header::ORIGIN, "http://localhost:5173")
        .header(header::ACCESS_CONTROL_REQUEST_METHOD, "POST")
        .body(Body::empty())
        .unwrap();

    let response = app(service).oneshot(request).await.unwrap();

    assert_eq!(
        response.headers().get(header::ACCESS_CONTROL_ALLOW_ORIGIN).unwrap(),
        "*"
    );
}

#[tokio::test]
async fn end_to_end_against_stub_ollama() {
    let endpoint = spawn_ollama(
        json!({ "model": "tinyllama", "response": "Cool the burn under running water for 10 minutes.", "done": true }),
        Duration::ZERO,
    )
    .await;

    let (status, body) = send(
        proxy_app(&endpoint, Duration::from_secs(5)),
        analyze_request(r#"{"message":"I burned my hand"}"#),
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(
        body,
        json!({
            "user_input": "I burned my hand",
            "ai_response": "Cool the burn under running water for 10 minutes."
        })
    );
}

#[tokio::test]
async fn unreachable_ollama_reports_connectivity() {
    let endpoint = {
        let listener = std::net::TcpListener::bind("127.0.0.1:0").unwrap();
        format!("http://{}/api/generate", listener.local_addr().unwrap())
    };

    let (status, body) = send(
        proxy_app(&endpoint, Duration::from_secs(5)),
        analyze_request(r#"{"message":"I burned my hand"}"#),
    )
    .await;

    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert!(body["error"].as_str().unwrap().contains("Cannot connect"));
}

#[tokio::test]
async fn slow_ollama_reports_timeout() {
    let endpoint = spawn_ollama(json!({ "response": "late" }), Duration::from_secs(5)).await;

    let (status, body) = send(
        proxy_app(&endpoint, Duration::from_millis(200)),
        analyze_request(r#"{"message":"I burned my hand"}"#),
    )
    .await;

    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    let error = body["error"].as_str().unwrap();
    assert!(error.contains("timed out"));
    assert!(!error.contains("Cannot connect"));
}
