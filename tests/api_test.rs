use axum::body::Bytes;
use axum::http::{HeaderName, HeaderValue, StatusCode};
use axum_test::TestServer;
use phishscan::api::router;
use phishscan::config::ServerConfig;
use phishscan::model::{Classification, Classifier, StandardScaler, Transform};
use phishscan::{InferenceContext, InferenceService, PipelineError};
use serde_json::{json, Value};
use std::sync::atomic::{AtomicI64, AtomicUsize, Ordering};
use std::sync::Arc;

/// Test double: fixed class, counts calls so tests can tell whether the core was reached.
struct FakeClassifier {
    class: AtomicI64,
    calls: AtomicUsize,
}

impl FakeClassifier {
    fn new(class: i64) -> Arc<Self> {
        Arc::new(Self {
            class: AtomicI64::new(class),
            calls: AtomicUsize::new(0),
        })
    }
}

impl Classifier for FakeClassifier {
    fn n_features(&self) -> Option<usize> {
        Some(10)
    }

    fn classify(&self, x: &[f64]) -> Result<Classification, PipelineError> {
        assert_eq!(x.len(), 10);
        self.calls.fetch_add(1, Ordering::SeqCst);
        Ok(Classification {
            class: self.class.load(Ordering::SeqCst),
            confidence: Some(0.75),
        })
    }
}

fn create_test_server(classifier: Arc<FakeClassifier>) -> TestServer {
    let scaler: Arc<dyn Transform> = Arc::new(StandardScaler::new(vec![0.0; 10], vec![1.0; 10]).unwrap());
    let ctx = InferenceContext::new(scaler, classifier).unwrap();
    let app = router(Arc::new(InferenceService::new(ctx)), &ServerConfig::default());
    TestServer::new(app).unwrap()
}

#[tokio::test]
async fn predict_with_valid_url() {
    let server = create_test_server(FakeClassifier::new(0));

    let response = server
        .post("/api/predict")
        .json(&json!({"url": "https://www.google.com"}))
        .await;

    response.assert_status_ok();
    let body: Value = response.json();
    assert_eq!(body["url"], "https://www.google.com");
    assert_eq!(body["prediction"], "safe");
    assert_eq!(body["confidence"], 0.75);
}

#[tokio::test]
async fn predict_phishing_label() {
    let server = create_test_server(FakeClassifier::new(1));

    let response = server
        .post("/api/predict")
        .json(&json!({"url": "http://192.168.1.1/login-bank-secure@phishing.com"}))
        .await;

    response.assert_status_ok();
    let body: Value = response.json();
    assert_eq!(body["prediction"], "phishing");
}

#[tokio::test]
async fn predict_echoes_each_url() {
    let server = create_test_server(FakeClassifier::new(0));

    for url in ["https://google.com", "https://github.com", "http://example.com", "https://test-domain.com/page"] {
        let response = server.post("/api/predict").json(&json!({ "url": url })).await;
        response.assert_status_ok();
        let body: Value = response.json();
        assert_eq!(body["url"], url);
    }
}

#[tokio::test]
async fn predict_empty_url_reaches_core() {
    let clf = FakeClassifier::new(0);
    let server = create_test_server(clf.clone());
    let before = clf.calls.load(Ordering::SeqCst);

    let response = server.post("/api/predict").json(&json!({"url": ""})).await;

    response.assert_status_ok();
    let body: Value = response.json();
    assert_eq!(body["url"], "");
    assert_eq!(clf.calls.load(Ordering::SeqCst), before + 1);
}

#[tokio::test]
async fn predict_missing_url_is_422_and_never_reaches_core() {
    let clf = FakeClassifier::new(0);
    let server = create_test_server(clf.clone());
    let before = clf.calls.load(Ordering::SeqCst);

    let response = server.post("/api/predict").json(&json!({})).await;

    response.assert_status(StatusCode::UNPROCESSABLE_ENTITY);
    let body: Value = response.json();
    assert!(body["detail"].as_str().unwrap().contains("url"));
    assert_eq!(clf.calls.load(Ordering::SeqCst), before);
}

#[tokio::test]
async fn predict_wrong_type_is_422() {
    let server = create_test_server(FakeClassifier::new(0));

    let response = server.post("/api/predict").json(&json!({"url": 42})).await;

    response.assert_status(StatusCode::UNPROCESSABLE_ENTITY);
}

#[tokio::test]
async fn predict_invalid_json_is_422() {
    let server = create_test_server(FakeClassifier::new(0));

    let response = server
        .post("/api/predict")
        .content_type("application/json")
        .bytes(Bytes::from_static(b"invalid json"))
        .await;
    response.assert_status(StatusCode::UNPROCESSABLE_ENTITY);

    let response = server.post("/api/predict").text("invalid json").await;
    response.assert_status(StatusCode::UNPROCESSABLE_ENTITY);
}

#[tokio::test]
async fn classifier_failure_is_500_not_a_label() {
    let clf = FakeClassifier::new(0);
    let server = create_test_server(clf.clone());
    clf.class.store(5, Ordering::SeqCst);

    let response = server
        .post("/api/predict")
        .json(&json!({"url": "https://example.com"}))
        .await;

    response.assert_status(StatusCode::INTERNAL_SERVER_ERROR);
    let body: Value = response.json();
    assert!(body.get("prediction").is_none());
}

#[tokio::test]
async fn cors_allows_dev_origin() {
    let server = create_test_server(FakeClassifier::new(0));

    let response = server
        .post("/api/predict")
        .add_header(
            HeaderName::from_static("origin"),
            HeaderValue::from_static("http://localhost:5173"),
        )
        .json(&json!({"url": "https://example.com"}))
        .await;

    response.assert_status_ok();
    assert_eq!(
        response.headers().get("access-control-allow-origin").unwrap(),
        "http://localhost:5173"
    );
    assert_eq!(
        response.headers().get("access-control-allow-credentials").unwrap(),
        "true"
    );
}

#[tokio::test]
async fn cors_allows_any_local_port_but_not_foreign_origin() {
    let server = create_test_server(FakeClassifier::new(0));

    let response = server
        .get("/health")
        .add_header(
            HeaderName::from_static("origin"),
            HeaderValue::from_static("http://127.0.0.1:4321"),
        )
        .await;
    assert_eq!(
        response.headers().get("access-control-allow-origin").unwrap(),
        "http://127.0.0.1:4321"
    );

    let response = server
        .get("/health")
        .add_header(
            HeaderName::from_static("origin"),
            HeaderValue::from_static("https://evil.example"),
        )
        .await;
    assert!(response.headers().get("access-control-allow-origin").is_none());
}

#[tokio::test]
async fn health_and_root() {
    let server = create_test_server(FakeClassifier::new(0));

    let response = server.get("/health").await;
    response.assert_status_ok();
    response.assert_json(&json!({"status": "healthy", "message": "Service is running"}));

    let response = server.get("/").await;
    response.assert_status_ok();
    let body: Value = response.json();
    assert_eq!(body["message"], "Phishing Detection API is running");
}

#[tokio::test]
async fn responses_are_json() {
    let server = create_test_server(FakeClassifier::new(0));

    let response = server
        .post("/api/predict")
        .json(&json!({"url": "https://example.com"}))
        .await;

    let content_type = response.headers().get("content-type").unwrap().to_str().unwrap();
    assert!(content_type.contains("application/json"));
}
