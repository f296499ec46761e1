//! OAuth 2.0 JWT Bearer authentication (RFC 7523).
//!
//! Builds a short-lived claim set, signs it with the configured RSA key
//! (RS256), and exchanges the resulting assertion at the identity provider's
//! token endpoint for an access token and the instance URL that subsequent
//! REST calls must target.
//!
//! One assertion, one exchange per call. Tokens are not cached, refreshed, or
//! persisted, and a failed exchange is not retried.
//!
//! # Example
//!
//! ```rust,ignore
//! use sf_fetch::authenticator::Authenticator;
//! use sf_fetch::config::{build_http_client, Config};
//!
//! let config = Config::from_env()?;
//! let authenticator = Authenticator::new(&config, build_http_client()?)?;
//! let token = authenticator.authenticate().await?;
//!
//! println!("instance: {}", token.instance_url);
//! ```
//!
//! # Security
//!
//! - The private key, the signed assertion and the access token are held as
//!   `SecretString` and are redacted in `Debug` output
//! - The token endpoint response body is never logged; only its status and
//!   the returned instance URL are
//! - Error responses from the token endpoint carry the status and body (the
//!   provider's `error`/`error_description` pair) for diagnostics, with any
//!   `access_token` value blanked out

use crate::config::{build_http_client, Config, ConfigError};
use crate::secret::{ExposeSecret, SecretString};
use jsonwebtoken::{Algorithm, EncodingKey, Header};
use serde::{Deserialize, Serialize};
use std::time::Duration;
use thiserror::Error;
use tracing::{debug, info, instrument, warn};

// =============================================================================
// Constants
// =============================================================================

/// Lifetime of a signed assertion: `exp` is always issue time plus this.
pub const ASSERTION_LIFETIME: Duration = Duration::from_secs(300);

/// OAuth 2.0 grant type for JWT bearer assertions.
pub const JWT_BEARER_GRANT_TYPE: &str = "urn:ietf:params:oauth:grant-type:jwt-bearer";

/// Token endpoint path, relative to the configured domain.
pub const TOKEN_PATH: &str = "/services/oauth2/token";

// =============================================================================
// Error Types
// =============================================================================

/// Errors that can occur while exchanging an assertion for a token.
#[derive(Error, Debug)]
pub enum AuthenticationError {
    /// The claim set could not be signed.
    #[error("Failed to sign assertion: {0}")]
    Signing(String),

    /// Transport-level failure talking to the token endpoint.
    #[error("Token request failed: {0}")]
    Http(#[from] reqwest::Error),

    /// Token endpoint answered with a non-success status.
    #[error("Token request rejected with status {status}: {body}")]
    Rejected { status: u16, body: String },

    /// Token endpoint answered 200 but the body lacked a usable token.
    #[error("Invalid token response (status {status}): {body}")]
    InvalidResponse { status: u16, body: String },
}

// =============================================================================
// Claims
// =============================================================================

/// Claim set carried by the signed assertion.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AssertionClaims {
    /// Issuer: the connected app's client id.
    pub iss: String,
    /// Subject: the user the token is issued for.
    pub sub: String,
    /// Audience: the identity provider domain.
    pub aud: String,
    /// Expiration (Unix epoch seconds).
    pub exp: i64,
}

// =============================================================================
// Token Response
// =============================================================================

/// Access token and instance URL returned by a successful exchange.
#[derive(Clone)]
pub struct TokenResponse {
    pub access_token: SecretString,
    pub instance_url: String,
    pub token_type: Option<String>,
    pub issued_at: Option<String>,
    pub scope: Option<String>,
    pub id: Option<String>,
}

impl std::fmt::Debug for TokenResponse {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TokenResponse")
            .field("access_token", &"[REDACTED]")
            .field("instance_url", &self.instance_url)
            .field("token_type", &self.token_type)
            .field("issued_at", &self.issued_at)
            .field("scope", &self.scope)
            .field("id", &self.id)
            .finish()
    }
}

/// Wire shape of the token endpoint's success body.
///
/// `signature` is also returned by the provider but is not consumed.
#[derive(Deserialize)]
struct OAuthTokenResponse {
    access_token: String,
    instance_url: String,
    #[serde(default)]
    token_type: Option<String>,
    #[serde(default)]
    issued_at: Option<String>,
    #[serde(default)]
    scope: Option<String>,
    #[serde(default)]
    id: Option<String>,
}

impl From<OAuthTokenResponse> for TokenResponse {
    fn from(raw: OAuthTokenResponse) -> Self {
        Self {
            access_token: SecretString::from(raw.access_token),
            instance_url: raw.instance_url,
            token_type: raw.token_type,
            issued_at: raw.issued_at,
            scope: raw.scope,
            id: raw.id,
        }
    }
}

// =============================================================================
// Authenticator
// =============================================================================

/// Signs assertions and exchanges them at the token endpoint.
#[derive(Clone)]
pub struct Authenticator {
    client_id: String,
    user_name: String,
    domain: String,
    encoding_key: EncodingKey,
    http_client: reqwest::Client,
}

impl std::fmt::Debug for Authenticator {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Authenticator")
            .field("client_id", &self.client_id)
            .field("user_name", &self.user_name)
            .field("domain", &self.domain)
            .field("encoding_key", &"[REDACTED]")
            .finish_non_exhaustive()
    }
}

impl Authenticator {
    /// Create an authenticator from loaded configuration.
    ///
    /// `config.private_key_pem` must be an RSA private key in PEM format
    /// (PKCS#1 or PKCS#8).
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::InvalidKey` if the PEM cannot be parsed as an RSA key.
    pub fn new(config: &Config, http_client: reqwest::Client) -> Result<Self, ConfigError> {
        let encoding_key =
            EncodingKey::from_rsa_pem(config.private_key_pem.expose_secret().as_bytes())
                .map_err(|e| {
                    warn!(
                        target: "sf_fetch.authenticator",
                        error = %e,
                        "Failed to parse private key PEM (expected RSA)"
                    );
                    ConfigError::InvalidKey(e.to_string())
                })?;

        Ok(Self {
            client_id: config.client_id.clone(),
            user_name: config.user_name.clone(),
            domain: config.domain.clone(),
            encoding_key,
            http_client,
        })
    }

    /// Token endpoint URL for the configured domain.
    ///
    /// A trailing `/` on the domain is dropped here only; `aud` keeps the
    /// configured value.
    #[must_use]
    pub fn token_endpoint(&self) -> String {
        format!("{}{TOKEN_PATH}", self.domain.trim_end_matches('/'))
    }

    /// Build the claim set as of `now` (Unix epoch seconds).
    #[must_use]
    pub fn claims_at(&self, now: i64) -> AssertionClaims {
        #[allow(clippy::cast_possible_wrap)]
        let lifetime = ASSERTION_LIFETIME.as_secs() as i64;
        AssertionClaims {
            iss: self.client_id.clone(),
            sub: self.user_name.clone(),
            aud: self.domain.clone(),
            exp: now + lifetime,
        }
    }

    /// Build the claim set as of the current time.
    #[must_use]
    pub fn claims(&self) -> AssertionClaims {
        self.claims_at(chrono::Utc::now().timestamp())
    }

    /// Sign a claim set into an RS256 JWS compact serialization.
    ///
    /// # Errors
    ///
    /// Returns `AuthenticationError::Signing` if signing fails.
    pub fn sign_assertion(
        &self,
        claims: &AssertionClaims,
    ) -> Result<SecretString, AuthenticationError> {
        let header = Header::new(Algorithm::RS256);
        jsonwebtoken::encode(&header, claims, &self.encoding_key)
            .map(SecretString::from)
            .map_err(|e| AuthenticationError::Signing(e.to_string()))
    }

    /// Exchange a freshly signed assertion for an access token.
    ///
    /// # Errors
    ///
    /// - `AuthenticationError::Signing` - the assertion could not be signed
    /// - `AuthenticationError::Http` - the request could not be sent
    /// - `AuthenticationError::Rejected` - any non-200 status
    /// - `AuthenticationError::InvalidResponse` - 200 without `access_token`/`instance_url`
    #[instrument(skip_all, fields(client_id = %self.client_id))]
    pub async fn authenticate(&self) -> Result<TokenResponse, AuthenticationError> {
        info!(target: "sf_fetch.authenticator", "Creating claim");
        let claims = self.claims();

        info!(target: "sf_fetch.authenticator", exp = claims.exp, "Generating signed JWT assertion");
        let assertion = self.sign_assertion(&claims)?;

        let url = self.token_endpoint();
        info!(target: "sf_fetch.authenticator", url = %url, "Requesting access token");

        let form_body = [
            ("grant_type", JWT_BEARER_GRANT_TYPE),
            ("assertion", assertion.expose_secret()),
        ];

        let response = self
            .http_client
            .post(&url)
            .form(&form_body)
            .send()
            .await
            .map_err(|e| {
                debug!(target: "sf_fetch.authenticator", error = %e, "HTTP request failed");
                AuthenticationError::Http(e)
            })?;

        let status = response.status();
        info!(target: "sf_fetch.authenticator", status = %status, "Token endpoint responded");

        let body = response.text().await?;

        if status != reqwest::StatusCode::OK {
            warn!(
                target: "sf_fetch.authenticator",
                status = %status,
                "Token request rejected"
            );
            return Err(AuthenticationError::Rejected {
                status: status.as_u16(),
                body: redact_token(&body),
            });
        }

        let raw: OAuthTokenResponse = serde_json::from_str(&body).map_err(|e| {
            warn!(target: "sf_fetch.authenticator", error = %e, "Failed to parse token response");
            AuthenticationError::InvalidResponse {
                status: status.as_u16(),
                body: redact_token(&body),
            }
        })?;

        let token = TokenResponse::from(raw);
        info!(
            target: "sf_fetch.authenticator",
            instance_url = %token.instance_url,
            "Access token acquired"
        );
        Ok(token)
    }
}

/// Blank out an `access_token` value before a body is surfaced in an error.
///
/// A body that failed to parse, or came with an unexpected status, may still
/// hold a live token.
fn redact_token(body: &str) -> String {
    match serde_json::from_str::<serde_json::Value>(body) {
        Ok(serde_json::Value::Object(mut map)) => {
            if map.contains_key("access_token") {
                map.insert(
                    "access_token".to_string(),
                    serde_json::Value::String("[REDACTED]".to_string()),
                );
            }
            serde_json::Value::Object(map).to_string()
        }
        _ => body.to_string(),
    }
}

/// Perform one JWT bearer exchange using `config` and a default HTTP client.
///
/// # Errors
///
/// Returns `ConfigError::InvalidKey` or `ConfigError::HttpClient` (wrapped)
/// when setup fails, otherwise any [`AuthenticationError`].
pub async fn authenticate(config: &Config) -> crate::errors::Result<TokenResponse> {
    let authenticator = Authenticator::new(config, build_http_client()?)?;
    Ok(authenticator.authenticate().await?)
}

// =============================================================================
// Tests
// =============================================================================
