//! Record fetch tests against a mocked REST API.

// Test code is allowed to use expect/unwrap for assertions
#![allow(clippy::unwrap_used, clippy::expect_used)]

use serde_json::json;
use sf_fetch::client::{fetch_record, FetchError, RecordClient, RecordRequest};
use sf_fetch::secret::SecretString;
use sf_test_utils::{
    MockSalesforce, TEST_ACCESS_TOKEN, TEST_ACCOUNT_FIELDS, TEST_ACCOUNT_ID, TEST_ACCOUNT_NAME,
    TEST_ACCOUNT_NUMBER,
};
use wiremock::matchers::{header, method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn account_body() -> serde_json::Value {
    json!({
        "attributes": {
            "type": "Account",
            "url": format!("/services/data/v58.0/sobjects/Account/{TEST_ACCOUNT_ID}")
        },
        "Id": TEST_ACCOUNT_ID,
        "AccountNumber": TEST_ACCOUNT_NUMBER,
        "Name": TEST_ACCOUNT_NAME
    })
}

fn token() -> SecretString {
    SecretString::from(TEST_ACCESS_TOKEN)
}

#[tokio::test]
async fn test_fetch_record_issues_exact_request() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path(format!(
            "/services/data/v58.0/sobjects/Account/{TEST_ACCOUNT_ID}"
        )))
        .and(query_param("fields", "Name,AccountNumber"))
        .and(header("Authorization", "Bearer abc"))
        .respond_with(ResponseTemplate::new(200).set_body_json(account_body()))
        .expect(1)
        .mount(&mock_server)
        .await;

    let record = fetch_record(
        &mock_server.uri(),
        &SecretString::from("abc"),
        "Account",
        TEST_ACCOUNT_ID,
        "Name,AccountNumber",
    )
    .await
    .expect("fetch should succeed");

    assert_eq!(record.id, TEST_ACCOUNT_ID);

    let requests = mock_server.received_requests().await.unwrap();
    let request = requests.first().unwrap();
    assert_eq!(
        request.url.path(),
        format!("/services/data/v58.0/sobjects/Account/{TEST_ACCOUNT_ID}")
    );
    // Commas in the field list go out unencoded
    assert_eq!(request.url.query(), Some("fields=Name,AccountNumber"));
}

#[tokio::test]
async fn test_fetch_record_extracts_requested_fields() {
    let server = MockSalesforce::start().await;
    server
        .mount_record("Account", TEST_ACCOUNT_ID, account_body())
        .await;

    let client = RecordClient::new(server.uri(), token(), reqwest::Client::new());
    let record = client
        .fetch_record(&RecordRequest::new(
            "Account",
            TEST_ACCOUNT_ID,
            TEST_ACCOUNT_FIELDS,
        ))
        .await
        .unwrap();

    assert_eq!(record.id, TEST_ACCOUNT_ID);
    assert_eq!(record.get("AccountNumber"), Some(&json!(TEST_ACCOUNT_NUMBER)));
    assert_eq!(record.get("Name"), Some(&json!(TEST_ACCOUNT_NAME)));
    assert_eq!(record.raw, account_body());
}

#[tokio::test]
async fn test_fetch_record_missing_field_fails() {
    let server = MockSalesforce::start().await;
    server
        .mount_record(
            "Account",
            TEST_ACCOUNT_ID,
            json!({"Id": TEST_ACCOUNT_ID, "AccountNumber": TEST_ACCOUNT_NUMBER}),
        )
        .await;

    let client = RecordClient::new(server.uri(), token(), reqwest::Client::new());
    let result = client
        .fetch_record(&RecordRequest::new(
            "Account",
            TEST_ACCOUNT_ID,
            TEST_ACCOUNT_FIELDS,
        ))
        .await;

    assert!(matches!(result, Err(FetchError::MissingField(f)) if f == "Name"));
}

#[tokio::test]
async fn test_fetch_record_not_found_surfaces_status() {
    let server = MockSalesforce::start().await;
    server
        .mount_record_response(
            "Account",
            "001000000000000AAA",
            ResponseTemplate::new(404).set_body_json(json!([{
                "errorCode": "NOT_FOUND",
                "message": "The requested resource does not exist"
            }])),
        )
        .await;

    let client = RecordClient::new(server.uri(), token(), reqwest::Client::new());
    let err = client
        .fetch_record(&RecordRequest::new(
            "Account",
            "001000000000000AAA",
            TEST_ACCOUNT_FIELDS,
        ))
        .await
        .unwrap_err();

    match &err {
        FetchError::Status { status, body } => {
            assert_eq!(*status, 404);
            assert!(body.contains("NOT_FOUND"));
        }
        other => panic!("expected Status, got {other:?}"),
    }
    assert!(err.to_string().contains("404"));
}

#[tokio::test]
async fn test_fetch_record_expired_session_is_status_error() {
    let mock_server = MockServer::start().await;
    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(401).set_body_json(json!([{
            "errorCode": "INVALID_SESSION_ID",
            "message": "Session expired or invalid"
        }])))
        .mount(&mock_server)
        .await;

    let result = fetch_record(
        &mock_server.uri(),
        &SecretString::from("stale"),
        "Account",
        TEST_ACCOUNT_ID,
        TEST_ACCOUNT_FIELDS,
    )
    .await;

    assert!(matches!(result, Err(FetchError::Status { status: 401, .. })));
}

#[tokio::test]
async fn test_fetch_record_non_json_body_is_invalid() {
    let server = MockSalesforce::start().await;
    server
        .mount_record_response(
            "Account",
            TEST_ACCOUNT_ID,
            ResponseTemplate::new(200).set_body_string("not json"),
        )
        .await;

    let client = RecordClient::new(server.uri(), token(), reqwest::Client::new());
    let result = client
        .fetch_record(&RecordRequest::new(
            "Account",
            TEST_ACCOUNT_ID,
            TEST_ACCOUNT_FIELDS,
        ))
        .await;

    assert!(matches!(result, Err(FetchError::InvalidBody(_))));
}
