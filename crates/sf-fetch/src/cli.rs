use clap::Parser;

use crate::client::{RecordRequest, DEFAULT_API_VERSION};

/// Authenticate with the OAuth 2.0 JWT bearer flow and print one record.
///
/// Credentials come from the environment (or `.env`): `KeyFile`, `ClientId`,
/// `UserName`, `Domain`.
#[derive(Parser, Debug, Clone)]
#[command(name = "sf-fetch", version, about)]
pub struct Args {
    /// sObject type to read
    #[arg(long, default_value = "Account")]
    pub resource_type: String,

    /// Record id
    #[arg(long, default_value = "001Dn00000Gi7HJIAZ")]
    pub record_id: String,

    /// Comma-separated field names to request and print
    #[arg(long, default_value = "Name,AccountNumber")]
    pub fields: String,

    /// REST API version
    #[arg(long, default_value = DEFAULT_API_VERSION)]
    pub api_version: String,
}

impl Args {
    #[must_use]
    pub fn record_request(&self) -> RecordRequest {
        RecordRequest::new(&self.resource_type, &self.record_id, &self.fields)
    }
}
