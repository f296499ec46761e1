//! Helpers for inspecting signed assertions and recorded requests.

use crate::crypto_fixtures::TEST_RSA_PUBLIC_KEY_PEM;
use jsonwebtoken::{Algorithm, DecodingKey, Header, Validation};
use std::collections::HashMap;
use wiremock::Request;

/// Verify an RS256 assertion against the fixture public key and return its
/// header and claims.
///
/// Panics if the signature, audience, or expiry does not validate.
pub fn decode_assertion(assertion: &str, audience: &str) -> (Header, serde_json::Value) {
    let key = DecodingKey::from_rsa_pem(TEST_RSA_PUBLIC_KEY_PEM.as_bytes())
        .expect("fixture public key should parse");

    let mut validation = Validation::new(Algorithm::RS256);
    validation.set_audience(&[audience]);
    validation.set_required_spec_claims(&["exp", "iss", "sub", "aud"]);

    let data = jsonwebtoken::decode::<serde_json::Value>(assertion, &key, &validation)
        .expect("assertion should verify with the fixture public key");
    (data.header, data.claims)
}

/// Decode an `application/x-www-form-urlencoded` request body.
pub fn form_fields(request: &Request) -> HashMap<String, String> {
    url::form_urlencoded::parse(&request.body)
        .into_owned()
        .collect()
}
