//! Tencent Cloud API v3 request signing (TC3-HMAC-SHA256).
//!
//! Canonical request covers `content-type`, `host` and `x-tc-action`; the
//! signing key is derived as HMAC("TC3" + key, date) → service → "tc3_request".

use chrono::{DateTime, Utc};
use hmac::{Hmac, Mac};
use sha2::{Digest, Sha256};

type HmacSha256 = Hmac<Sha256>;

pub const ALGORITHM: &str = "TC3-HMAC-SHA256";
pub const CONTENT_TYPE: &str = "application/json; charset=utf-8";
const SIGNED_HEADERS: &str = "content-type;host;x-tc-action";

/// Everything that goes into one signature.
#[derive(Debug, Clone)]
pub struct SigningInput<'a> {
    pub secret_id: &'a str,
    pub secret_key: &'a str,
    pub service: &'a str,
    pub host: &'a str,
    pub action: &'a str,
    pub payload: &'a str,
    pub timestamp: i64,
}

/// Returns the value of the `Authorization` header.
pub fn authorization(input: &SigningInput<'_>) -> String {
    let date = signing_date(input.timestamp);
    let credential_scope = format!("{date}/{}/tc3_request", input.service);

    let canonical_request = canonical_request(input);
    let string_to_sign = format!(
        "{ALGORITHM}\n{}\n{credential_scope}\n{}",
        input.timestamp,
        sha256_hex(&canonical_request)
    );

    let secret_date = hmac_sha256(format!("TC3{}", input.secret_key).as_bytes(), &date);
    let secret_service = hmac_sha256(&secret_date, input.service);
    let secret_signing = hmac_sha256(&secret_service, "tc3_request");
    let signature = hex::encode(hmac_sha256(&secret_signing, &string_to_sign));

    format!(
        "{ALGORITHM} Credential={}/{credential_scope}, SignedHeaders={SIGNED_HEADERS}, Signature={signature}",
        input.secret_id
    )
}

fn canonical_request(input: &SigningInput<'_>) -> String {
    let content_type = format!("content-type:{CONTENT_TYPE}");
    let host = format!("host:{}", input.host);
    let action = format!("x-tc-action:{}", input.action.to_lowercase());
    let hashed_payload = sha256_hex(input.payload);

    [
        "POST",
        "/",
        "",
        content_type.as_str(),
        host.as_str(),
        action.as_str(),
        "",
        SIGNED_HEADERS,
        hashed_payload.as_str(),
    ]
    .join("\n")
}

/// UTC date of the request timestamp, `YYYY-MM-DD`.
fn signing_date(timestamp: i64) -> String {
    DateTime::<Utc>::from_timestamp(timestamp, 0)
        .unwrap_or_default()
        .format("%Y-%m-%d")
        .to_string()
}

fn sha256_hex(data: &str) -> String {
    hex::encode(Sha256::digest(data.as_bytes()))
}

fn hmac_sha256(key: &[u8], data: &str) -> Vec<u8> {
    let mut mac = HmacSha256::new_from_slice(key).expect("HMAC accepts keys of any length");
    mac.update(data.as_bytes());
    mac.finalize().into_bytes().to_vec()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn input<'a>(secret_key: &'a str, payload: &'a str) -> SigningInput<'a> {
        SigningInput {
            secret_id: "AKIDEXAMPLE",
            secret_key,
            service: "ocr",
            host: "ocr.tencentcloudapi.com",
            action: "GeneralBasicOCR",
            payload,
            // 2023-11-14T22:13:20Z
            timestamp: 1_700_000_000,
        }
    }

    #[test]
    fn test_authorization_header_shape() {
        let header = authorization(&input("secret", "{}"));
        assert!(header.starts_with(
            "TC3-HMAC-SHA256 Credential=AKIDEXAMPLE/2023-11-14/ocr/tc3_request, \
             SignedHeaders=content-type;host;x-tc-action, Signature="
        ));
        let signature = header.rsplit("Signature=").next().unwrap();
        assert_eq!(signature.len(), 64);
        assert!(signature.chars().all(|c| c.is_ascii_hexdigit()));
    }

    #[test]
    fn test_signature_is_deterministic() {
        assert_eq!(
            authorization(&input("secret", "{\"a\":1}")),
            authorization(&input("secret", "{\"a\":1}"))
        );
    }

    #[test]
    fn test_signature_depends_on_key_and_payload() {
        let base = authorization(&input("secret", "{}"));
        assert_ne!(base, authorization(&input("other", "{}")));
        assert_ne!(base, authorization(&input("secret", "{\"a\":1}")));
    }

    #[test]
    fn test_canonical_request_lowercases_action() {
        let canonical = canonical_request(&input("secret", "{}"));
        assert!(canonical.contains("\nx-tc-action:generalbasicocr\n"));
        assert!(canonical.starts_with("POST\n/\n\ncontent-type:application/json; charset=utf-8\n"));
        assert!(canonical.ends_with(&sha256_hex("{}")));
    }

    #[test]
    fn test_sha256_hex_of_empty_string() {
        assert_eq!(
            sha256_hex(""),
            "e3b0c44298fc1c149afbf4c8996fb92427ae41e4649b934ca495991b7852b855"
        );
    }
}
