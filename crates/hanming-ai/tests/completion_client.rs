use axum::extract::State;
use axum::http::StatusCode;
use axum::routing::post;
use axum::{Json, Router};
use hanming_ai::{
    defaults, AnalysisNotifier, AnalysisOrchestrator, CompletionProvider, HttpCompletionClient,
    HttpCompletionConfig,
};
use hanming_core::{AnalysisSettings, CompletionResult, FailureKind, NameProfile, ResultSource};
use serde_json::{json, Value};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use std::time::Duration;

const PATH: &str = "/api/ai_completion";

async fn serve(router: Router) -> String {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, router).await.unwrap();
    });
    format!("http://{}{}", addr, PATH)
}

fn client(url: String, timeout: Duration, max_retries: u32) -> HttpCompletionClient {
    HttpCompletionClient::new(HttpCompletionConfig {
        endpoint_url: url,
        timeout,
        max_retries,
        retry_backoff: Duration::from_millis(10),
    })
    .unwrap()
}

fn failure_kind(result: CompletionResult) -> FailureKind {
    match result {
        CompletionResult::Failure { kind, .. } => kind,
        other => panic!("expected failure, got {:?}", other),
    }
}

#[tokio::test]
async fn test_posts_prompt_and_decodes_json() {
    let router = Router::new().route(
        PATH,
        post(|Json(body): Json<Value>| async move { Json(json!({"echo": body["prompt"]})) }),
    );
    let client = client(serve(router).await, Duration::from_secs(5), 0);

    let result = client.complete("分析名字").await;
    assert_eq!(result, CompletionResult::success(json!({"echo": "分析名字"})));
}

#[tokio::test]
async fn test_server_error_is_network_error() {
    let router = Router::new().route(
        PATH,
        post(|| async { (StatusCode::INTERNAL_SERVER_ERROR, "boom") }),
    );
    let client = client(serve(router).await, Duration::from_secs(5), 0);

    assert_eq!(failure_kind(client.complete("x").await), FailureKind::NetworkError);
}

#[tokio::test]
async fn test_invalid_body_is_parse_error() {
    let router = Router::new().route(PATH, post(|| async { "definitely not json" }));
    let client = client(serve(router).await, Duration::from_secs(5), 0);

    assert_eq!(failure_kind(client.complete("x").await), FailureKind::ParseError);
}

#[tokio::test]
async fn test_fenced_body_is_unwrapped() {
    let router = Router::new().route(
        PATH,
        post(|| async { "```json\n{\"alternatives\": [\"志明\"]}\n```" }),
    );
    let client = client(serve(router).await, Duration::from_secs(5), 0);

    assert_eq!(
        client.complete("x").await,
        CompletionResult::success(json!({"alternatives": ["志明"]}))
    );
}

#[tokio::test]
async fn test_timeout_is_network_error() {
    let router = Router::new().route(
        PATH,
        post(|| async {
            tokio::time::sleep(Duration::from_secs(2)).await;
            Json(json!({}))
        }),
    );
    let client = client(serve(router).await, Duration::from_secs(5), 0);

    let result = client
        .complete_with_timeout("x", Some(Duration::from_millis(100)))
        .await;
    assert_eq!(failure_kind(result), FailureKind::NetworkError);
}

#[tokio::test]
async fn test_connection_refused_is_network_error() {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    drop(listener);

    let client = client(format!("http://{}{}", addr, PATH), Duration::from_secs(2), 0);
    assert_eq!(failure_kind(client.complete("x").await), FailureKind::NetworkError);
}

async fn flaky(State(hits): State<Arc<AtomicUsize>>) -> (StatusCode, String) {
    if hits.fetch_add(1, Ordering::SeqCst) == 0 {
        (StatusCode::SERVICE_UNAVAILABLE, "busy".to_string())
    } else {
        (StatusCode::OK, r#"{"ok": true}"#.to_string())
    }
}

#[tokio::test]
async fn test_single_retry_recovers() {
    let hits = Arc::new(AtomicUsize::new(0));
    let router = Router::new()
        .route(PATH, post(flaky))
        .with_state(hits.clone());
    let client = client(serve(router).await, Duration::from_secs(5), 1);

    assert_eq!(client.complete("x").await, CompletionResult::success(json!({"ok": true})));
    assert_eq!(hits.load(Ordering::SeqCst), 2);
}

async fn always_down(State(hits): State<Arc<AtomicUsize>>) -> StatusCode {
    hits.fetch_add(1, Ordering::SeqCst);
    StatusCode::BAD_GATEWAY
}

#[tokio::test]
async fn test_retries_are_clamped_to_one() {
    let hits = Arc::new(AtomicUsize::new(0));
    let router = Router::new()
        .route(PATH, post(always_down))
        .with_state(hits.clone());
    let client = client(serve(router).await, Duration::from_secs(5), 5);

    assert_eq!(failure_kind(client.complete("x").await), FailureKind::NetworkError);
    assert_eq!(hits.load(Ordering::SeqCst), 2);
}

#[tokio::test]
async fn test_parse_errors_are_not_retried() {
    let hits = Arc::new(AtomicUsize::new(0));
    let router = Router::new()
        .route(
            PATH,
            post(|State(hits): State<Arc<AtomicUsize>>| async move {
                hits.fetch_add(1, Ordering::SeqCst);
                "<html></html>"
            }),
        )
        .with_state(hits.clone());
    let client = client(serve(router).await, Duration::from_secs(5), 1);

    assert_eq!(failure_kind(client.complete("x").await), FailureKind::ParseError);
    assert_eq!(hits.load(Ordering::SeqCst), 1);
}

/// Fails the cultural request with HTTP 500 and answers the rest
async fn category_server(Json(body): Json<Value>) -> (StatusCode, String) {
    let prompt = body["prompt"].as_str().unwrap_or_default();
    let payload = if prompt.contains("interface CulturalAnalysis") {
        return (StatusCode::INTERNAL_SERVER_ERROR, "upstream failure".to_string());
    } else if prompt.contains("interface LinguisticAnalysis") {
        json!({"tonePattern": "仄平仄", "phoneticHarmony": 0.5, "strokeBalance": 0.6, "visualHarmony": 0.7})
    } else if prompt.contains("interface SemanticAnalysis") {
        json!({"semanticComplexity": 0.4, "conceptualRelationships": []})
    } else if prompt.contains("interface ModernAnalysis") {
        json!({"globalAppeal": 0.9, "professionalContext": "学术"})
    } else {
        json!({"alternatives": ["文华"], "improvements": [], "usageGuidelines": []})
    };
    (StatusCode::OK, payload.to_string())
}

#[tokio::test]
async fn test_orchestrator_over_http_isolates_failed_category() {
    let router = Router::new().route(PATH, post(category_server));
    let provider = Arc::new(client(serve(router).await, Duration::from_secs(5), 0));
    let orchestrator =
        AnalysisOrchestrator::new(provider, AnalysisNotifier::default(), AnalysisSettings::default());

    let analysis = orchestrator
        .run_comprehensive(&NameProfile::new("文华").unwrap())
        .await;

    assert_eq!(analysis.cultural.value, defaults::cultural());
    assert_eq!(
        analysis.cultural.source,
        ResultSource::Fallback(FailureKind::NetworkError)
    );
    assert_eq!(analysis.linguistic.value["tonePattern"], "仄平仄");
    assert_eq!(analysis.modern_context.source, ResultSource::Live);
    assert_eq!(analysis.recommendation.alternatives, vec!["文华"]);
}
