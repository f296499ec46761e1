//! Secret types for credential material that must never reach a log line.
//!
//! This module re-exports types from the [`secrecy`] crate. Three values in a
//! run are secret: the private key PEM read from `KeyFile`, the signed JWT
//! assertion, and the bearer access token returned by the token endpoint.
//!
//! `SecretString` implements `Debug` with redaction, so deriving `Debug` on a
//! struct that holds one is safe. The inner value is zeroized on drop, which
//! keeps key and token material in memory only for as long as the run needs it.
//!
//! # Example
//!
//! ```rust
//! use sf_fetch::secret::{ExposeSecret, SecretString};
//!
//! let token = SecretString::from("00Dxx0000001gPL!AR8AQJXg");
//! assert!(!format!("{token:?}").contains("00Dxx"));
//!
//! // Reading the value is always explicit.
//! let header = format!("Bearer {}", token.expose_secret());
//! assert!(header.starts_with("Bearer 00Dxx"));
//! ```

pub use secrecy::{ExposeSecret, SecretString};
