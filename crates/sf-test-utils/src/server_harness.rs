//! Mock identity provider and REST API for tests.
//!
//! One `wiremock` server plays both roles: it answers the token endpoint and
//! reports its own URI as `instance_url`, so a full authenticate-then-fetch
//! run stays on a single mock.

use crate::test_ids::{TEST_ACCESS_TOKEN, TEST_TOKEN_ISSUED_AT};
use serde_json::{json, Value};
use wiremock::matchers::{header, method, path};
use wiremock::{Mock, MockServer, Request, ResponseTemplate};

pub const TOKEN_PATH: &str = "/services/oauth2/token";

/// Test server standing in for login and instance hosts.
///
/// # Example
/// ```rust,ignore
/// let server = MockSalesforce::start().await;
/// server.mount_token_success().await;
/// server.mount_record("Account", "001", json!({"Id": "001", "Name": "Acme"})).await;
/// ```
pub struct MockSalesforce {
    server: MockServer,
}

impl MockSalesforce {
    pub async fn start() -> Self {
        Self {
            server: MockServer::start().await,
        }
    }

    /// Base URI; use it as both `Domain` and `instance_url`.
    pub fn uri(&self) -> String {
        self.server.uri()
    }

    pub fn server(&self) -> &MockServer {
        &self.server
    }

    /// Success body for the token endpoint, pointing back at this server.
    pub fn token_body(&self) -> Value {
        json!({
            "access_token": TEST_ACCESS_TOKEN,
            "instance_url": self.uri(),
            "id": format!("{}/id/00Dtest/005test", self.uri()),
            "token_type": "Bearer",
            "issued_at": TEST_TOKEN_ISSUED_AT,
            "signature": "c2lnbmF0dXJl",
            "scope": "api"
        })
    }

    /// Answer the token endpoint with 200 and [`Self::token_body`].
    pub async fn mount_token_success(&self) {
        self.mount_token_response(ResponseTemplate::new(200).set_body_json(self.token_body()))
            .await;
    }

    /// Answer the token endpoint with an arbitrary response.
    pub async fn mount_token_response(&self, response: ResponseTemplate) {
        Mock::given(method("POST"))
            .and(path(TOKEN_PATH))
            .respond_with(response)
            .mount(&self.server)
            .await;
    }

    /// Answer `GET .../sobjects/{type}/{id}` carrying the test bearer token.
    pub async fn mount_record(&self, resource_type: &str, record_id: &str, body: Value) {
        self.mount_record_response(
            resource_type,
            record_id,
            ResponseTemplate::new(200).set_body_json(body),
        )
        .await;
    }

    pub async fn mount_record_response(
        &self,
        resource_type: &str,
        record_id: &str,
        response: ResponseTemplate,
    ) {
        Mock::given(method("GET"))
            .and(path(format!(
                "/services/data/v58.0/sobjects/{resource_type}/{record_id}"
            )))
            .and(header(
                "Authorization",
                format!("Bearer {TEST_ACCESS_TOKEN}").as_str(),
            ))
            .respond_with(response)
            .mount(&self.server)
            .await;
    }

    /// All requests received so far.
    pub async fn requests(&self) -> Vec<Request> {
        self.server
            .received_requests()
            .await
            .expect("request recording is enabled by default")
    }

    /// Requests received on the token endpoint.
    pub async fn token_requests(&self) -> Vec<Request> {
        self.requests()
            .await
            .into_iter()
            .filter(|r| r.url.path() == TOKEN_PATH)
            .collect()
    }
}
