//! Search client integration tests against mock servers

use super::*;
use crate::{
    error::AppError,
    executor::{AdmissionGate, Prober},
    types::Latency,
};
use std::sync::Arc;
use wiremock::{
    Mock, MockServer, ResponseTemplate,
    matchers::{method, path, query_param},
};

/// Mock instance answering `/search`
struct MockInstance {
    server: MockServer,
}

impl MockInstance {
    async fn new() -> Self {
        Self { server: MockServer::start().await }
    }

    fn url(&self) -> String {
        self.server.uri()
    }

    async fn respond(&self, status: u16, body: &str, delay: Option<Duration>) {
        let mut template = ResponseTemplate::new(status).set_body_string(body);
        if let Some(delay) = delay {
            template = template.set_delay(delay);
        }

        Mock::given(method("GET"))
            .and(path("/search"))
            .respond_with(template)
            .mount(&self.server)
            .await;
    }
}

fn client() -> SearchClient {
    SearchClient::new(Duration::from_secs(5)).unwrap()
}

#[tokio::test]
async fn test_fetch_reads_full_body() {
    let instance = MockInstance::new().await;
    Mock::given(method("GET"))
        .and(path("/search"))
        .and(query_param("q", "machine learning"))
        .respond_with(ResponseTemplate::new(200).set_body_string("x".repeat(4096)))
        .expect(1)
        .mount(&instance.server)
        .await;

    let url = SearchRequest::build_url(&instance.url(), "machine learning").unwrap();
    let page = client().fetch(&url).await.unwrap();

    assert_eq!(page.status_code, 200);
    assert_eq!(page.body_size, 4096);
    assert!(page.is_success());
}

#[tokio::test]
async fn test_fetch_server_error_fails() {
    let instance = MockInstance::new().await;
    instance.respond(500, "boom", None).await;

    let url = SearchRequest::build_url(&instance.url(), "deep learning").unwrap();
    let error = client().fetch(&url).await.unwrap_err();

    assert!(matches!(error, AppError::HttpRequest(_)));
    assert!(error.to_string().contains("500"));
}

#[tokio::test]
async fn test_fetch_client_error_fails() {
    let instance = MockInstance::new().await;
    instance.respond(429, "slow down", None).await;

    let url = SearchRequest::build_url(&instance.url(), "neural networks").unwrap();
    assert!(client().fetch(&url).await.is_err());
}

#[tokio::test]
async fn test_fetch_timeout() {
    let instance = MockInstance::new().await;
    instance.respond(200, "late", Some(Duration::from_secs(3))).await;

    let client = SearchClient::new(Duration::from_millis(300)).unwrap();
    let url = SearchRequest::build_url(&instance.url(), "quantum engineering").unwrap();
    let error = client.fetch(&url).await.unwrap_err();

    assert!(matches!(error, AppError::Timeout(_)), "unexpected error: {:?}", error);
}

#[tokio::test]
async fn test_fetch_connection_refused() {
    let url = {
        let instance = MockInstance::new().await;
        instance.url()
    };

    let url = SearchRequest::build_url(&url, "artificial intelligence").unwrap();
    let error = client().fetch(&url).await.unwrap_err();

    assert!(error.is_endpoint_failure());
}

#[tokio::test]
async fn test_connect_failure_names_its_cause() {
    let url = SearchRequest::build_url("http://127.0.0.1:1", "machine learning").unwrap();
    let error = client().fetch(&url).await.unwrap_err();

    assert!(matches!(error, AppError::Network(_)), "unexpected error: {:?}", error);
    let message = error.to_string().to_lowercase();
    assert!(message.contains("127.0.0.1:1"), "url missing: {}", message);
    assert!(message.contains("refused"), "cause missing: {}", message);
}

#[tokio::test]
async fn test_measure_records_connect_cause() {
    let gate = Arc::new(AdmissionGate::new(1).unwrap());
    let prober = Prober::new(Arc::new(client()), gate, vec!["a b".to_string()], Duration::ZERO);

    let measurement = prober.measure("http://127.0.0.1:1", "a b").await;

    assert!(!measurement.is_success());
    assert!(measurement.error().unwrap().to_lowercase().contains("refused"));
}

#[tokio::test]
async fn test_fetch_follows_redirect() {
    let instance = MockInstance::new().await;
    Mock::given(method("GET"))
        .and(path("/search"))
        .respond_with(ResponseTemplate::new(302).insert_header("Location", "/results"))
        .mount(&instance.server)
        .await;
    Mock::given(method("GET"))
        .and(path("/results"))
        .respond_with(ResponseTemplate::new(200).set_body_string("results"))
        .mount(&instance.server)
        .await;

    let url = SearchRequest::build_url(&instance.url(), "deep learning").unwrap();
    let page = client().fetch(&url).await.unwrap();

    assert_eq!(page.status_code, 200);
    assert_eq!(page.body_size, "results".len());
}

#[tokio::test]
async fn test_prober_against_mock_instances() {
    let fast = MockInstance::new().await;
    fast.respond(200, "<html>results</html>", Some(Duration::from_millis(20))).await;

    let failing = MockInstance::new().await;
    failing.respond(503, "maintenance", None).await;

    let gate = Arc::new(AdmissionGate::new(5).unwrap());
    let queries = vec!["machine learning".to_string(), "deep learning".to_string()];
    let prober = Prober::new(Arc::new(client()), gate, queries, Duration::ZERO);

    let endpoints = vec![failing.url(), fast.url()];
    let results = prober.run_all(&endpoints).await.unwrap();

    assert_eq!(results.len(), 2);
    assert_eq!(results[0].endpoint, fast.url());
    match results[0].mean {
        Latency::Finite(mean) => assert!(mean >= Duration::from_millis(20)),
        Latency::Unreachable => panic!("fast instance should be reachable"),
    }
    assert_eq!(results[1].endpoint, failing.url());
    assert_eq!(results[1].mean, Latency::Unreachable);
    assert_eq!(results[1].failure_count(), 2);

    let requests = fast.server.received_requests().await.unwrap();
    assert_eq!(requests.len(), 2);
}

#[tokio::test]
async fn test_prober_path_prefixed_instance() {
    let instance = MockInstance::new().await;
    Mock::given(method("GET"))
        .and(path("/searx/search"))
        .respond_with(ResponseTemplate::new(200).set_body_string("ok"))
        .expect(1)
        .mount(&instance.server)
        .await;

    let gate = Arc::new(AdmissionGate::new(1).unwrap());
    let prober = Prober::new(Arc::new(client()), gate, vec!["neural networks".to_string()], Duration::ZERO);

    let measurement = prober.measure(&format!("{}/searx/", instance.url()), "neural networks").await;
    assert!(measurement.is_success());
}
