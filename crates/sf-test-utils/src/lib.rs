//! # sf-fetch Test Utilities
//!
//! Shared test support for the `sf-fetch` crate.
//!
//! This crate provides:
//! - A fixed RSA keypair (signing and verifying test assertions)
//! - Fixed test identifiers
//! - A mock login/instance server (`MockSalesforce`)
//! - Assertion and form-body helpers
//!
//! ## Usage
//!
//! ```rust,ignore
//! use sf_test_utils::*;
//!
//! #[tokio::test]
//! async fn test_example() {
//!     let server = MockSalesforce::start().await;
//!     server.mount_token_success().await;
//!
//!     let key = test_key_file();
//!     // ... point KeyFile at key.path() and Domain at server.uri()
//! }
//! ```

pub mod assertions;
pub mod crypto_fixtures;
pub mod server_harness;
pub mod test_ids;

// Re-export commonly used items
pub use assertions::*;
pub use crypto_fixtures::*;
pub use server_harness::*;
pub use test_ids::*;
