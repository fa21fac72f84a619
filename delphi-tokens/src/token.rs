//! Tenant token assembly and signing.
//!
//! A tenant token is a compact three segment credential of the form
//! `header.claims.signature`. Header and claims are JSON serialized and
//! base64 encoded with the standard alphabet, padding stripped. The signature
//! is an HMAC-SHA256 over the first two segments, encoded with the url-safe
//! alphabet. The service recomputes the signature with the key named by
//! `apiKeyUid` to authenticate searches.

use base64::engine::general_purpose::{STANDARD_NO_PAD, URL_SAFE_NO_PAD};
use base64::Engine;
use chrono::{DateTime, Utc};
use hmac::{Hmac, Mac};
use serde::Serialize;
use sha2::Sha256;
use uuid::{Uuid, Variant};

use crate::error::TokenError;
use crate::rules::SearchRules;

type HmacSha256 = Hmac<Sha256>;

/// Signing options for a tenant token.
#[derive(Debug, Clone)]
pub struct TenantTokenOptions {
    /// Key the token is signed with. Must be the value of the API key whose
    /// uid is embedded in the claims.
    pub secret_key: String,
    /// When the service stops accepting the token. `None` for no expiry.
    pub expires_at: Option<DateTime<Utc>>,
}

impl TenantTokenOptions {
    /// Create options signing with `secret_key` and no expiry.
    pub fn new(secret_key: impl Into<String>) -> Self {
        Self {
            secret_key: secret_key.into(),
            expires_at: None,
        }
    }

    /// Expire the token at this instant.
    pub fn with_expires_at(mut self, expires_at: DateTime<Utc>) -> Self {
        self.expires_at = Some(expires_at);
        self
    }
}

#[derive(Serialize)]
struct TokenHeader {
    alg: &'static str,
    typ: &'static str,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct TokenClaims<'a> {
    search_rules: &'a SearchRules,
    api_key_uid: &'a str,
    #[serde(skip_serializing_if = "Option::is_none")]
    exp: Option<i64>,
}

/// Generate a signed tenant token.
///
/// # Arguments
///
/// * `api_key_uid` - Uid of the API key the token derives from, in the
///   canonical hyphenated uuid4 form.
/// * `search_rules` - The search permissions embedded in the token.
/// * `options` - Signing key and optional expiry.
///
/// # Returns
///
/// The compact token string, or a `TokenError` when the inputs fail
/// validation or no usable signing key was provided. Validation runs before
/// any signing work.
pub fn generate_tenant_token(
    api_key_uid: &str,
    search_rules: &SearchRules,
    options: &TenantTokenOptions,
) -> Result<String, TokenError> {
    validate(api_key_uid, options.expires_at.as_ref())?;

    let header = encode_segment(&TokenHeader {
        alg: "HS256",
        typ: "JWT",
    })?;
    let claims = encode_segment(&TokenClaims {
        search_rules,
        api_key_uid,
        exp: options.expires_at.map(|at| at.timestamp()),
    })?;
    let signature = sign(&options.secret_key, &header, &claims)?;

    Ok(format!("{header}.{claims}.{signature}"))
}

fn validate(api_key_uid: &str, expires_at: Option<&DateTime<Utc>>) -> Result<(), TokenError> {
    if let Some(expires_at) = expires_at {
        if *expires_at <= Utc::now() {
            return Err(TokenError::ExpiryInThePast);
        }
    }
    if api_key_uid.is_empty() {
        return Err(TokenError::MissingApiKeyUid);
    }
    if !is_uuid4(api_key_uid) {
        return Err(TokenError::InvalidApiKeyUid);
    }
    Ok(())
}

/// Accept only the canonical hyphenated form, matching the uid format the
/// service hands out. The compact 32 digit form is rejected.
fn is_uuid4(uid: &str) -> bool {
    let shape_ok = uid.len() == 36
        && uid.bytes().enumerate().all(|(i, b)| match i {
            8 | 13 | 18 | 23 => b == b'-',
            _ => b.is_ascii_hexdigit(),
        });
    if !shape_ok {
        return false;
    }
    match Uuid::parse_str(uid) {
        Ok(uuid) => {
            uuid.get_version_num() == 4 && matches!(uuid.get_variant(), Variant::RFC4122)
        }
        Err(_) => false,
    }
}

fn encode_segment<T: Serialize>(value: &T) -> Result<String, TokenError> {
    let json = serde_json::to_vec(value).map_err(|e| TokenError::serialization(e.to_string()))?;
    Ok(STANDARD_NO_PAD.encode(json))
}

fn sign(secret_key: &str, header: &str, claims: &str) -> Result<String, TokenError> {
    if secret_key.is_empty() {
        return Err(TokenError::MissingSignKey);
    }
    let mut mac = HmacSha256::new_from_slice(secret_key.as_bytes())
        .map_err(|_| TokenError::MissingSignKey)?;
    mac.update(header.as_bytes());
    mac.update(b".");
    mac.update(claims.as_bytes());
    Ok(URL_SAFE_NO_PAD.encode(mac.finalize().into_bytes()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Duration;
    use serde_json::{json, Value};

    const API_KEY_UID: &str = "6a26f0cf-77cb-4f43-b5c4-2c3e9a7b1b5d";
    const SECRET_KEY: &str = "masterKey";

    fn movies_rules() -> SearchRules {
        SearchRules::from(vec!["movies".to_string()])
    }

    fn generate(rules: &SearchRules, options: &TenantTokenOptions) -> String {
        generate_tenant_token(API_KEY_UID, rules, options).unwrap()
    }

    #[test]
    fn token_has_three_segments_and_fixed_header() {
        let token = generate(&movies_rules(), &TenantTokenOptions::new(SECRET_KEY));
        let segments: Vec<&str> = token.split('.').collect();
        assert_eq!(segments.len(), 3);
        // Standard base64 of {"alg":"HS256","typ":"JWT"} without padding.
        assert_eq!(segments[0], "eyJhbGciOiJIUzI1NiIsInR5cCI6IkpXVCJ9");
    }

    #[test]
    fn claims_serialize_rules_then_uid() {
        let token = generate(&movies_rules(), &TenantTokenOptions::new(SECRET_KEY));
        let claims = token.split('.').nth(1).unwrap();
        let decoded = STANDARD_NO_PAD.decode(claims).unwrap();
        assert_eq!(
            String::from_utf8(decoded).unwrap(),
            format!(r#"{{"searchRules":["movies"],"apiKeyUid":"{API_KEY_UID}"}}"#)
        );
    }

    #[test]
    fn claims_omit_exp_without_expiry() {
        let token = generate(&movies_rules(), &TenantTokenOptions::new(SECRET_KEY));
        let claims = token.split('.').nth(1).unwrap();
        let decoded: Value =
            serde_json::from_slice(&STANDARD_NO_PAD.decode(claims).unwrap()).unwrap();
        assert!(decoded.get("exp").is_none());
        assert_eq!(decoded["apiKeyUid"], API_KEY_UID);
    }

    #[test]
    fn expiry_is_embedded_as_floor_epoch_seconds() {
        // 2030-01-01T00:00:00.500Z, to exercise sub-second truncation.
        let expires_at = DateTime::from_timestamp_millis(1_893_456_000_500).unwrap();
        let options = TenantTokenOptions::new(SECRET_KEY).with_expires_at(expires_at);

        let token = generate(&movies_rules(), &options);
        let claims = token.split('.').nth(1).unwrap();
        let decoded: Value =
            serde_json::from_slice(&STANDARD_NO_PAD.decode(claims).unwrap()).unwrap();
        assert_eq!(decoded["exp"], json!(1_893_456_000_i64));
    }

    #[test]
    fn signature_verifies_against_the_first_two_segments() {
        let token = generate(&movies_rules(), &TenantTokenOptions::new(SECRET_KEY));
        let segments: Vec<&str> = token.split('.').collect();
        let signature = URL_SAFE_NO_PAD.decode(segments[2]).unwrap();

        let mut mac = HmacSha256::new_from_slice(SECRET_KEY.as_bytes()).unwrap();
        mac.update(format!("{}.{}", segments[0], segments[1]).as_bytes());
        mac.verify_slice(&signature).unwrap();
    }

    #[test]
    fn claims_use_standard_alphabet_and_signature_url_safe() {
        // A run of '~' bytes always produces '+' in standard base64.
        let rules = SearchRules::try_from(json!({
            "movies": { "filter": "tag = ~~~~~~~~~~~~" }
        }))
        .unwrap();

        let token = generate(&rules, &TenantTokenOptions::new(SECRET_KEY));
        let segments: Vec<&str> = token.split('.').collect();

        assert!(segments[1].contains('+'));
        assert!(!segments[1].contains('-') && !segments[1].contains('_'));
        assert!(STANDARD_NO_PAD.decode(segments[1]).is_ok());
        assert!(URL_SAFE_NO_PAD.decode(segments[1]).is_err());

        assert!(!segments[2].contains('+') && !segments[2].contains('/'));
        assert!(URL_SAFE_NO_PAD.decode(segments[2]).is_ok());
    }

    #[test]
    fn same_inputs_produce_the_same_token() {
        let expires_at = DateTime::from_timestamp_millis(1_893_456_000_000).unwrap();
        let options = TenantTokenOptions::new(SECRET_KEY).with_expires_at(expires_at);

        let first = generate(&movies_rules(), &options);
        let second = generate(&movies_rules(), &options);
        assert_eq!(first, second);
    }

    #[test]
    fn rejects_expiry_at_or_before_now() {
        let past =
            TenantTokenOptions::new(SECRET_KEY).with_expires_at(Utc::now() - Duration::hours(1));
        assert!(matches!(
            generate_tenant_token(API_KEY_UID, &movies_rules(), &past),
            Err(TokenError::ExpiryInThePast)
        ));

        // "Now" is already not strictly in the future by validation time.
        let now = TenantTokenOptions::new(SECRET_KEY).with_expires_at(Utc::now());
        assert!(matches!(
            generate_tenant_token(API_KEY_UID, &movies_rules(), &now),
            Err(TokenError::ExpiryInThePast)
        ));
    }

    #[test]
    fn rejects_malformed_api_key_uids() {
        let options = TenantTokenOptions::new(SECRET_KEY);
        let rules = movies_rules();

        assert!(matches!(
            generate_tenant_token("", &rules, &options),
            Err(TokenError::MissingApiKeyUid)
        ));

        let bad_uids = [
            "not-a-uuid",
            // Compact form, no hyphens.
            "6a26f0cf77cb4f43b5c42c3e9a7b1b5d",
            // Version 1 instead of 4.
            "6a26f0cf-77cb-1f43-b5c4-2c3e9a7b1b5d",
            // Variant nibble outside 8..b.
            "6a26f0cf-77cb-4f43-05c4-2c3e9a7b1b5d",
        ];
        for uid in bad_uids {
            assert!(
                matches!(
                    generate_tenant_token(uid, &rules, &options),
                    Err(TokenError::InvalidApiKeyUid)
                ),
                "uid {uid:?} should be rejected"
            );
        }
    }

    #[test]
    fn accepts_generated_v4_uids() {
        let options = TenantTokenOptions::new(SECRET_KEY);
        for _ in 0..5 {
            let uid = Uuid::new_v4().to_string();
            assert!(generate_tenant_token(&uid, &movies_rules(), &options).is_ok());
        }
    }

    #[test]
    fn validation_runs_before_signing() {
        // An invalid uid surfaces even when the signing key is also unusable.
        let empty_key = TenantTokenOptions::new("");
        assert!(matches!(
            generate_tenant_token("not-a-uuid", &movies_rules(), &empty_key),
            Err(TokenError::InvalidApiKeyUid)
        ));

        assert!(matches!(
            generate_tenant_token(API_KEY_UID, &movies_rules(), &empty_key),
            Err(TokenError::MissingSignKey)
        ));
    }
}
