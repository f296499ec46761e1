//! Authenticated read of a single sObject record over the REST API.

use crate::secret::{ExposeSecret, SecretString};
use serde_json::{Map, Value};
use thiserror::Error;
use tracing::{debug, info, instrument, warn};

/// REST API version used when none is given.
pub const DEFAULT_API_VERSION: &str = "v58.0";

/// Key the REST API uses for the record identifier.
pub const ID_FIELD: &str = "Id";

/// Record fetch errors.
#[derive(Debug, Error)]
pub enum FetchError {
    #[error("Record request failed: {0}")]
    Http(#[from] reqwest::Error),

    #[error("Record fetch failed with status {status}: {body}")]
    Status { status: u16, body: String },

    #[error("Record response is not a JSON object: {0}")]
    InvalidBody(String),

    #[error("Record response is missing field: {0}")]
    MissingField(String),
}

/// What to read: one record of one type, restricted to the named fields.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RecordRequest {
    pub resource_type: String,
    pub record_id: String,
    pub fields: Vec<String>,
}

impl RecordRequest {
    /// Create a request from a comma-separated field list (e.g. `Name,AccountNumber`).
    ///
    /// Surrounding whitespace is trimmed and empty entries are dropped.
    pub fn new(
        resource_type: impl Into<String>,
        record_id: impl Into<String>,
        fields_csv: &str,
    ) -> Self {
        Self {
            resource_type: resource_type.into(),
            record_id: record_id.into(),
            fields: fields_csv
                .split(',')
                .map(str::trim)
                .filter(|f| !f.is_empty())
                .map(ToString::to_string)
                .collect(),
        }
    }

    /// The `fields` query value, exactly as sent.
    #[must_use]
    pub fn fields_csv(&self) -> String {
        self.fields.join(",")
    }
}

/// A fetched record: its id plus each requested field, in request order.
#[derive(Debug, Clone, PartialEq)]
pub struct Record {
    pub id: String,
    pub fields: Vec<(String, Value)>,
    /// Full response body.
    pub raw: Value,
}

impl Record {
    /// Value of a requested field, if it was requested.
    #[must_use]
    pub fn get(&self, name: &str) -> Option<&Value> {
        self.fields
            .iter()
            .find(|(field, _)| field == name)
            .map(|(_, value)| value)
    }

    /// Build a record from a response body, requiring `Id` and every requested field.
    ///
    /// # Errors
    ///
    /// - `FetchError::InvalidBody` if the body is not a JSON object
    /// - `FetchError::MissingField` naming the first absent key
    pub fn from_body(body: Value, fields: &[String]) -> Result<Self, FetchError> {
        let object: &Map<String, Value> = body
            .as_object()
            .ok_or_else(|| FetchError::InvalidBody(body.to_string()))?;

        let id = match object.get(ID_FIELD) {
            Some(Value::String(id)) => id.clone(),
            Some(other) => other.to_string(),
            None => return Err(FetchError::MissingField(ID_FIELD.to_string())),
        };

        let fields = fields
            .iter()
            .map(|name| {
                object
                    .get(name)
                    .cloned()
                    .map(|value| (name.clone(), value))
                    .ok_or_else(|| FetchError::MissingField(name.clone()))
            })
            .collect::<Result<Vec<_>, _>>()?;

        Ok(Self {
            id,
            fields,
            raw: body,
        })
    }
}

/// Client for reading records from one instance with one bearer token.
pub struct RecordClient {
    instance_url: String,
    access_token: SecretString,
    api_version: String,
    http_client: reqwest::Client,
}

impl std::fmt::Debug for RecordClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RecordClient")
            .field("instance_url", &self.instance_url)
            .field("access_token", &"[REDACTED]")
            .field("api_version", &self.api_version)
            .finish_non_exhaustive()
    }
}

impl RecordClient {
    /// Create a new record client.
    pub fn new(
        instance_url: impl Into<String>,
        access_token: SecretString,
        http_client: reqwest::Client,
    ) -> Self {
        Self {
            instance_url: instance_url.into().trim_end_matches('/').to_string(),
            access_token,
            api_version: DEFAULT_API_VERSION.to_string(),
            http_client,
        }
    }

    /// Override the REST API version (e.g. `v60.0`).
    #[must_use]
    pub fn with_api_version(mut self, api_version: impl Into<String>) -> Self {
        self.api_version = api_version.into();
        self
    }

    /// Get the instance URL requests are sent to.
    pub fn instance_url(&self) -> &str {
        &self.instance_url
    }

    /// Full URL for a record request.
    ///
    /// The field list is appended verbatim so commas stay unencoded.
    #[must_use]
    pub fn record_url(&self, request: &RecordRequest) -> String {
        let mut url = format!(
            "{}/services/data/{}/sobjects/{}/{}",
            self.instance_url, self.api_version, request.resource_type, request.record_id
        );
        if !request.fields.is_empty() {
            url.push_str("?fields=");
            url.push_str(&request.fields_csv());
        }
        url
    }

    /// Fetch one record and extract `Id` plus the requested fields.
    ///
    /// # Errors
    ///
    /// - `FetchError::Http` - the request could not be sent or read
    /// - `FetchError::Status` - non-success status
    /// - `FetchError::InvalidBody` - body is not a JSON object
    /// - `FetchError::MissingField` - `Id` or a requested field is absent
    #[instrument(skip_all, fields(resource_type = %request.resource_type, record_id = %request.record_id))]
    pub async fn fetch_record(&self, request: &RecordRequest) -> Result<Record, FetchError> {
        let url = self.record_url(request);
        info!(target: "sf_fetch.client", url = %url, "Fetching record");

        let response = self
            .http_client
            .get(&url)
            .bearer_auth(self.access_token.expose_secret())
            .send()
            .await?;

        let status = response.status();
        let body = response.text().await?;

        if !status.is_success() {
            warn!(target: "sf_fetch.client", status = %status, "Record fetch failed");
            return Err(FetchError::Status {
                status: status.as_u16(),
                body,
            });
        }

        debug!(target: "sf_fetch.client", status = %status, bytes = body.len(), "Record received");

        let value: Value =
            serde_json::from_str(&body).map_err(|_| FetchError::InvalidBody(body.clone()))?;

        Record::from_body(value, &request.fields)
    }
}

/// Fetch one record with a one-off client.
///
/// # Errors
///
/// `FetchError::Http` if the HTTP client cannot be built, otherwise see
/// [`RecordClient::fetch_record`].
pub async fn fetch_record(
    base_url: &str,
    token: &SecretString,
    resource_type: &str,
    record_id: &str,
    fields: &str,
) -> Result<Record, FetchError> {
    let http_client = reqwest::Client::builder().build()?;
    let client = RecordClient::new(base_url, token.clone(), http_client);
    client
        .fetch_record(&RecordRequest::new(resource_type, record_id, fields))
        .await
}
