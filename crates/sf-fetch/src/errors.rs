//! Error types for a single authenticate-and-fetch run.
//!
//! Each stage has its own error enum, defined next to the code that raises it:
//!
//! - [`ConfigError`] - missing configuration or an unusable key file
//! - [`AuthenticationError`] - the token exchange did not produce a token
//! - [`FetchError`] - the record read failed or lacked a requested field
//!
//! [`SfFetchError`] unifies them for the binary. Nothing is retried or
//! recovered; the first error ends the run.

use thiserror::Error;

pub use crate::authenticator::AuthenticationError;
pub use crate::client::FetchError;
pub use crate::config::ConfigError;

#[derive(Debug, Error)]
pub enum SfFetchError {
    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error(transparent)]
    Authentication(#[from] AuthenticationError),

    #[error(transparent)]
    Fetch(#[from] FetchError),

    #[error("Failed to write output: {0}")]
    Output(#[from] std::io::Error),
}

/// Result type alias using `SfFetchError`
pub type Result<T> = std::result::Result<T, SfFetchError>;
