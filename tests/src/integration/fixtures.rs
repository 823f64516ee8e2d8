//! Test harness around a fully wired gateway router.

use async_trait::async_trait;
use axum::body::{to_bytes, Body};
use axum::http::{Method, Request, StatusCode};
use axum::Router;
use serde_json::Value;
use shared_types::{
    ContentBlock, HEADER_ACCEPT, HEADER_CONTENT_TYPE, HEADER_SERVICES, MESSAGE_ENCODING_JSON,
    PROTOCOL_VERSION,
};
use std::sync::Arc;
use std::time::Duration;
use tower::ServiceExt;
use tx_01_catalog_store::InMemoryCatalogStore;
use tx_02_taxii_gateway::{
    ContentError, ContentProvider, ServerConfig, ServiceRegistry, TaxiiGatewayService,
    WatchListContentProvider,
};

pub const DISCOVERY: &str = "/services/discovery/";
pub const COLLECTION: &str = "/services/collection/";
pub const POLL: &str = "/services/poll/";
pub const ADMIN: &str = "/admin/";

/// A gateway over an in-memory catalog.
pub struct Harness {
    pub store: Arc<InMemoryCatalogStore>,
    pub registry: Arc<ServiceRegistry>,
    router: Router,
}

impl Harness {
    /// Default configuration with the built-in content provider.
    pub fn new() -> Self {
        Self::with_config(ServerConfig::default())
    }

    pub fn with_config(config: ServerConfig) -> Self {
        let content = Arc::new(
            WatchListContentProvider::new(&config.poll, Duration::from_secs(1)).unwrap(),
        );
        Self::with_content(config, content)
    }

    pub fn with_content(config: ServerConfig, content: Arc<dyn ContentProvider>) -> Self {
        let store = Arc::new(InMemoryCatalogStore::new());
        let service = TaxiiGatewayService::with_store(config, store.clone(), content).unwrap();
        Self {
            store,
            registry: service.registry(),
            router: service.router(),
        }
    }

    /// POST a protocol message with the three TAXII headers set.
    pub async fn post(&self, path: &str, body: &str) -> (StatusCode, Value) {
        let request = Request::builder()
            .method(Method::POST)
            .uri(path)
            .header(HEADER_SERVICES, PROTOCOL_VERSION)
            .header(HEADER_ACCEPT, MESSAGE_ENCODING_JSON)
            .header(HEADER_CONTENT_TYPE, MESSAGE_ENCODING_JSON)
            .body(Body::from(body.to_string()))
            .unwrap();
        self.send(request).await
    }

    /// POST without any TAXII headers, or with the given ones only.
    pub async fn post_with_headers(
        &self,
        path: &str,
        headers: &[(&str, &str)],
        body: &str,
    ) -> (StatusCode, Value) {
        let mut builder = Request::builder().method(Method::POST).uri(path);
        for (name, value) in headers {
            builder = builder.header(*name, *value);
        }
        self.send(builder.body(Body::from(body.to_string())).unwrap())
            .await
    }

    /// GET the admin path with a raw query string.
    pub async fn admin(&self, query: &str) -> (StatusCode, Value) {
        let request = Request::builder()
            .method(Method::GET)
            .uri(format!("{ADMIN}?{query}"))
            .body(Body::empty())
            .unwrap();
        self.send(request).await
    }

    pub async fn discovery(&self, id: &str) -> Value {
        let (status, body) = self.post(DISCOVERY, &format!(r#"{{"id":"{id}"}}"#)).await;
        assert_eq!(status, StatusCode::OK);
        body
    }

    /// Send an arbitrary request through the router.
    pub async fn send(&self, request: Request<Body>) -> (StatusCode, Value) {
        let response = self.router.clone().oneshot(request).await.unwrap();
        let status = response.status();
        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        let body = if bytes.is_empty() {
            Value::Null
        } else {
            serde_json::from_slice(&bytes).unwrap()
        };
        (status, body)
    }
}

/// Addresses advertised in a Discovery response, in order.
pub fn addresses(discovery: &Value) -> Vec<String> {
    discovery["services"]
        .as_array()
        .unwrap()
        .iter()
        .map(|service| service["address"].as_str().unwrap().to_string())
        .collect()
}

/// Content provider whose every call fails.
pub struct FailingContent;

#[async_trait]
impl ContentProvider for FailingContent {
    async fn content_for(&self, _collection: &str) -> Result<ContentBlock, ContentError> {
        Err(ContentError::FeedStatus {
            url: "http://feeds.invalid/list.txt".into(),
            status: 503,
        })
    }
}

/// Content provider that never answers within a test's patience.
pub struct StalledContent;

#[async_trait]
impl ContentProvider for StalledContent {
    async fn content_for(&self, _collection: &str) -> Result<ContentBlock, ContentError> {
        tokio::time::sleep(Duration::from_secs(30)).await;
        Ok(ContentBlock::json("{}"))
    }
}
