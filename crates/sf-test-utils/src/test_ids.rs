//! Fixed test identifiers for deterministic tests

// Credentials
pub const TEST_CLIENT_ID: &str = "3MVG9test.consumer.key";
pub const TEST_USER_NAME: &str = "integration.user@example.com";

// Token endpoint results
pub const TEST_ACCESS_TOKEN: &str = "00Dtest!AQ0AQtest-access-token";
pub const TEST_TOKEN_ISSUED_AT: &str = "1687340000000";

// Records
pub const TEST_ACCOUNT_ID: &str = "001Dn00000Gi7HJIAZ";
pub const TEST_ACCOUNT_NAME: &str = "Acme";
pub const TEST_ACCOUNT_NUMBER: &str = "AN-1";
pub const TEST_ACCOUNT_FIELDS: &str = "Name,AccountNumber";
