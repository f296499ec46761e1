//! Salesforce REST record fetcher using the OAuth 2.0 JWT bearer flow.
//!
//! A run signs a short-lived assertion with an RSA key, exchanges it for an
//! access token and instance URL, then reads one record and prints the
//! requested fields.
//!
//! # Modules
//!
//! - `config` - Environment / `.env` configuration
//! - `authenticator` - Assertion signing and token exchange
//! - `client` - Authenticated record read
//! - `report` - Output formatting
//! - `cli` - Command line arguments
//! - `observability` - Tracing subscriber setup
//! - `errors` - Error types
//! - `secret` - Redacting secret wrappers

#![warn(clippy::pedantic)]

pub mod authenticator;
pub mod cli;
pub mod client;
pub mod config;
pub mod errors;
pub mod observability;
pub mod report;
pub mod secret;

use authenticator::Authenticator;
use client::{Record, RecordClient, RecordRequest};
use config::Config;

/// Authenticate, then fetch `request` from the returned instance.
///
/// Both calls share `http_client`; the token is passed straight to the
/// record client and dropped when this returns.
///
/// # Errors
///
/// The first configuration, authentication, or fetch error.
pub async fn run(
    config: &Config,
    request: &RecordRequest,
    api_version: &str,
    http_client: reqwest::Client,
) -> errors::Result<Record> {
    let authenticator = Authenticator::new(config, http_client.clone())?;
    let token = authenticator.authenticate().await?;

    let client = RecordClient::new(token.instance_url, token.access_token, http_client)
        .with_api_version(api_version);
    Ok(client.fetch_record(request).await?)
}
