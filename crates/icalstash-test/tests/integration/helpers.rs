#![expect(clippy::expect_used, reason = "Test helpers panic on setup failure")]
//! Shared fixtures: an in-memory app, a request builder and response assertions.
//!
//! Every test builds its own `TestApp`: a salvo `Service` wired exactly as
//! the binary wires it, backed by a fresh in-memory bucket so tests can run
//! in parallel without sharing state.

use std::collections::HashMap;
use std::sync::Arc;

use salvo::http::{HeaderValue, Method, ReqBody, StatusCode};
use salvo::test::{RequestBuilder, ResponseExt, TestClient};
use salvo::{Router, Service};

use icalstash_test::app::depot::Share;
use icalstash_test::component::calendar::CalendarService;
use icalstash_test::component::config::{
    LoggingConfig, RetryConfig, ServerConfig, Settings, StorageBackend, StorageConfig,
};
use icalstash_test::component::store::memory::MemoryObjectClient;
use icalstash_test::component::store::{
    ObjectStore, ResilientObjectStore, RetryPolicy, TracedStore,
};

pub use serde_json::json;

const BASE_URL: &str = "http://127.0.0.1:5800";

type MemoryStore = ResilientObjectStore<MemoryObjectClient>;

fn test_config() -> Settings {
    Settings {
        storage: StorageConfig {
            backend: StorageBackend::Memory,
            bucket: "calendars".to_string(),
            region: "us-east-1".to_string(),
            endpoint: None,
            access_key: String::new(),
            secret_key: String::new(),
            use_https: false,
            force_path_style: true,
        },
        retry: RetryConfig {
            max_retries: 3,
            base_delay_ms: 10,
        },
        server: ServerConfig {
            host: "127.0.0.1".to_string(),
            port: 5800,
            request_timeout_secs: 30,
        },
        logging: LoggingConfig {
            level: "debug".to_string(),
        },
    }
}

/// A fully wired service over an isolated in-memory bucket.
pub struct TestApp {
    pub service: Service,
    store: Arc<TracedStore<MemoryStore>>,
}

impl TestApp {
    #[must_use]
    pub fn build() -> Self {
        let config = test_config();
        let store = Arc::new(TracedStore::new(ResilientObjectStore::new(
            MemoryObjectClient::new(config.storage.bucket.clone()),
            RetryPolicy::from(&config.retry),
        )));
        let shared: Arc<dyn ObjectStore> = store.clone();

        let router = Router::new()
            .hoop(Share::new(CalendarService::new(shared)))
            .hoop(Share::new(config))
            .push(icalstash_test::app::app::routes());

        Self {
            service: Service::new(router),
            store,
        }
    }

    fn client(&self) -> &MemoryObjectClient {
        self.store.inner().client()
    }

    /// Every stored object, keyed by object key.
    pub async fn objects(&self) -> HashMap<String, String> {
        self.client().snapshot().await
    }

    /// The raw stored document under `key`, exactly as written.
    pub async fn stored(&self, key: &str) -> Option<String> {
        self.objects().await.remove(key)
    }

    pub async fn stored_content_type(&self, key: &str) -> Option<String> {
        self.client().content_type(key).await
    }

    /// Drops every stored object.
    pub async fn reset(&self) {
        self.client().clear().await;
    }

    /// POSTs `body` to `/api/calendars`.
    pub async fn save(&self, body: &serde_json::Value) -> TestResponse {
        TestRequest::post("/api/calendars").json(body).send(&self.service).await
    }

    /// GETs `/api/calendars/{calendar_id}`.
    pub async fn fetch(&self, calendar_id: &str) -> TestResponse {
        TestRequest::get(&calendar_path(calendar_id)).send(&self.service).await
    }
}

#[must_use]
pub fn calendar_path(calendar_id: &str) -> String {
    format!("/api/calendars/{calendar_id}")
}

/// A minimal valid calendar with one UTC event.
#[must_use]
pub fn minimal_calendar(calendar_id: &str) -> serde_json::Value {
    json!({
        "calendar_id": calendar_id,
        "events": [{
            "uid": format!("{calendar_id}-1@example.com"),
            "dtstamp": "20250129T120000Z",
            "dtstart": "20250601T143000Z",
            "summary": "Standup"
        }]
    })
}

/// An HTTP request against the in-process router.
pub struct TestRequest {
    method: Method,
    path: String,
    content_type: Option<&'static str>,
    body: Option<Vec<u8>>,
}

impl TestRequest {
    #[must_use]
    pub fn new(method: Method, path: &str) -> Self {
        Self {
            method,
            path: path.to_string(),
            content_type: None,
            body: None,
        }
    }

    #[must_use]
    pub fn get(path: &str) -> Self {
        Self::new(Method::GET, path)
    }

    #[must_use]
    pub fn head(path: &str) -> Self {
        Self::new(Method::HEAD, path)
    }

    #[must_use]
    pub fn delete(path: &str) -> Self {
        Self::new(Method::DELETE, path)
    }

    #[must_use]
    pub fn post(path: &str) -> Self {
        Self::new(Method::POST, path)
    }

    /// Sets a JSON body.
    #[must_use]
    pub fn json(self, value: &serde_json::Value) -> Self {
        self.raw_json(value.to_string())
    }

    /// Sets a JSON content type with an arbitrary, possibly malformed, body.
    #[must_use]
    pub fn raw_json(mut self, body: impl Into<Vec<u8>>) -> Self {
        self.content_type = Some("application/json");
        self.body = Some(body.into());
        self
    }

    /// Sends the request through `service` and collects the response.
    pub async fn send(self, service: &Service) -> TestResponse {
        let url = format!("{BASE_URL}{}", self.path);

        let mut client = match self.method {
            Method::GET => TestClient::get(&url),
            Method::HEAD => TestClient::head(&url),
            Method::DELETE => TestClient::delete(&url),
            Method::POST => TestClient::post(&url),
            _ => RequestBuilder::new(&url, self.method.clone()),
        };

        if let Some(content_type) = self.content_type {
            client = client.add_header(
                "Content-Type",
                HeaderValue::from_static(content_type),
                true,
            );
        }
        if let Some(body) = self.body {
            client = client.body(ReqBody::Once(body.into()));
        }

        let mut response = client.send(service).await;

        let status = response
            .status_code
            .unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);
        let headers = response
            .headers()
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_str().unwrap_or("").to_string()))
            .collect();
        let body = response.take_bytes(None).await.unwrap_or_default().to_vec();

        TestResponse {
            status,
            headers,
            body,
        }
    }
}

/// Status, headers and body captured from one response.
pub struct TestResponse {
    pub status: StatusCode,
    pub headers: Vec<(String, String)>,
    pub body: Vec<u8>,
}

impl TestResponse {
    /// Panics with the body attached when the status differs.
    #[must_use]
    pub fn assert_status(self, expected: StatusCode) -> Self {
        assert_eq!(
            self.status,
            expected,
            "Expected status {expected} but got {}: {}",
            self.status,
            self.body_string()
        );
        self
    }

    /// Panics unless header `name` is present and contains `expected`.
    #[must_use]
    pub fn assert_header_contains(self, name: &str, expected: &str) -> Self {
        let value = self
            .get_header(name)
            .unwrap_or_else(|| panic!("Header '{name}' not found in response"));
        assert!(
            value.contains(expected),
            "header {name}: wanted {expected:?} inside {value:?}"
        );
        self
    }

    /// Panics unless `expected` occurs in the body.
    #[must_use]
    pub fn assert_body_contains(self, expected: &str) -> Self {
        let body = self.body_string();
        assert!(
            body.contains(expected),
            "body lacks {expected:?}:\n{body}"
        );
        self
    }

    /// Panics if any body octets came back.
    #[must_use]
    pub fn assert_body_empty(self) -> Self {
        assert!(
            self.body.is_empty(),
            "body should be empty, got {} octets",
            self.body.len()
        );
        self
    }

    /// Lossy UTF-8 view of the body.
    #[must_use]
    pub fn body_string(&self) -> String {
        String::from_utf8_lossy(&self.body).into_owned()
    }

    /// Returns the `error` field of a JSON error body.
    #[must_use]
    pub fn error_message(&self) -> String {
        let body: serde_json::Value =
            serde_json::from_slice(&self.body).expect("error body is JSON");
        body["error"].as_str().expect("error field").to_string()
    }

    /// First header named `name`, compared case-insensitively.
    #[must_use]
    pub fn get_header(&self, name: &str) -> Option<&str> {
        self.headers
            .iter()
            .find(|(k, _)| k.eq_ignore_ascii_case(name))
            .map(|(_, v)| v.as_str())
    }
}
