//! Tencent Cloud GeneralBasicOCR client.

use async_trait::async_trait;
use reqwest::Client;
use secrecy::{ExposeSecret, SecretString};
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use super::signing::{authorization, SigningInput, CONTENT_TYPE};
use super::{OcrEngine, OcrError};
use crate::config::Config;

const SERVICE: &str = "ocr";
const ACTION: &str = "GeneralBasicOCR";
const VERSION: &str = "2018-11-19";
const SCENE: &str = "doc";
const LANGUAGE: &str = "zh";

#[derive(Debug, Serialize)]
#[serde(rename_all = "PascalCase")]
struct OcrRequest<'a> {
    image_base64: &'a str,
    scene: &'a str,
    language_type: &'a str,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "PascalCase")]
struct OcrEnvelope {
    response: OcrResponse,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "PascalCase")]
struct OcrResponse {
    #[serde(default)]
    text_detections: Vec<TextDetection>,
    error: Option<VendorError>,
    request_id: Option<String>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "PascalCase")]
struct TextDetection {
    detected_text: String,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "PascalCase")]
struct VendorError {
    code: String,
    message: String,
}

#[derive(Clone)]
pub struct TencentOcrClient {
    client: Client,
    secret_id: SecretString,
    secret_key: SecretString,
    region: String,
    endpoint: String,
}

impl TencentOcrClient {
    /// Returns `None` unless both the secret id and the secret key are set.
    pub fn from_config(config: &Config) -> Option<Self> {
        let secret_id = config.tencent_secret_id.clone()?;
        let secret_key = config.tencent_secret_key.clone()?;
        Some(Self {
            client: Client::new(),
            secret_id,
            secret_key,
            region: config.tencent_ocr_region.clone(),
            endpoint: config.tencent_ocr_endpoint.clone(),
        })
    }

    fn host(&self) -> &str {
        self.endpoint
            .split_once("://")
            .map(|(_, rest)| rest)
            .unwrap_or(&self.endpoint)
            .trim_end_matches('/')
    }
}

#[async_trait]
impl OcrEngine for TencentOcrClient {
    async fn recognize(&self, image_base64: &str) -> Result<String, OcrError> {
        let payload = serde_json::to_string(&OcrRequest {
            image_base64,
            scene: SCENE,
            language_type: LANGUAGE,
        })?;
        let timestamp = chrono::Utc::now().timestamp();

        let auth = authorization(&SigningInput {
            secret_id: self.secret_id.expose_secret(),
            secret_key: self.secret_key.expose_secret(),
            service: SERVICE,
            host: self.host(),
            action: ACTION,
            payload: &payload,
            timestamp,
        });

        debug!("Sending {} bytes to OCR endpoint {}", payload.len(), self.host());

        let response = self
            .client
            .post(&self.endpoint)
            .header("Authorization", auth)
            .header("Content-Type", CONTENT_TYPE)
            .header("Host", self.host())
            .header("X-TC-Action", ACTION)
            .header("X-TC-Timestamp", timestamp.to_string())
            .header("X-TC-Version", VERSION)
            .header("X-TC-Region", &self.region)
            .body(payload)
            .send()
            .await?;

        let status = response.status();
        let body = response.text().await?;
        if !status.is_success() {
            warn!("OCR endpoint returned {}: {}", status, body);
            return Err(OcrError::Http {
                status: status.as_u16(),
                body,
            });
        }

        let envelope: OcrEnvelope = serde_json::from_str(&body)?;
        parse_detections(envelope.response)
    }
}

fn parse_detections(response: OcrResponse) -> Result<String, OcrError> {
    if let Some(error) = response.error {
        warn!(
            "OCR vendor error {} (request {}): {}",
            error.code,
            response.request_id.as_deref().unwrap_or("-"),
            error.message
        );
        return Err(OcrError::Vendor {
            code: error.code,
            message: error.message,
        });
    }

    Ok(response
        .text_detections
        .into_iter()
        .map(|d| d.detected_text)
        .collect::<Vec<_>>()
        .join("\n"))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ocr::TINY_PNG_BASE64;
    use axum::{http::HeaderMap, routing::post, Json, Router};
    use serde_json::{json, Value};

    fn parse(body: Value) -> Result<String, OcrError> {
        let envelope: OcrEnvelope = serde_json::from_value(body).unwrap();
        parse_detections(envelope.response)
    }

    fn client(endpoint: &str) -> TencentOcrClient {
        let mut config = Config::for_tests("http://unused");
        config.tencent_secret_id = Some(SecretString::new("AKIDEXAMPLE".to_string()));
        config.tencent_secret_key = Some(SecretString::new("secret".to_string()));
        config.tencent_ocr_endpoint = endpoint.to_string();
        TencentOcrClient::from_config(&config).unwrap()
    }

    #[test]
    fn test_detections_are_joined_by_newline() {
        let text = parse(json!({
            "Response": {
                "TextDetections": [{"DetectedText": "高级后端工程师"}, {"DetectedText": "岗位职责"}],
                "RequestId": "abc"
            }
        }))
        .unwrap();
        assert_eq!(text, "高级后端工程师\n岗位职责");
    }

    #[test]
    fn test_no_detections_is_empty_text() {
        assert_eq!(parse(json!({"Response": {"RequestId": "abc"}})).unwrap(), "");
    }

    #[test]
    fn test_vendor_error_is_reported() {
        let err = parse(json!({
            "Response": {
                "Error": {"Code": "AuthFailure.SecretIdNotFound", "Message": "secret id not found"},
                "RequestId": "abc"
            }
        }))
        .unwrap_err();
        match err {
            OcrError::Vendor { code, .. } => assert_eq!(code, "AuthFailure.SecretIdNotFound"),
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn test_request_body_uses_vendor_field_names() {
        let body = serde_json::to_value(OcrRequest {
            image_base64: "abc",
            scene: SCENE,
            language_type: LANGUAGE,
        })
        .unwrap();
        assert_eq!(
            body,
            json!({"ImageBase64": "abc", "Scene": "doc", "LanguageType": "zh"})
        );
    }

    #[test]
    fn test_missing_secret_key_disables_client() {
        let mut config = Config::for_tests("http://unused");
        config.tencent_secret_id = Some(SecretString::new("AKIDEXAMPLE".to_string()));
        assert!(TencentOcrClient::from_config(&config).is_none());
    }

    #[test]
    fn test_default_endpoint_is_tencent_cloud() {
        let mut config = Config::for_tests("http://unused");
        config.tencent_secret_id = Some(SecretString::new("AKIDEXAMPLE".to_string()));
        config.tencent_secret_key = Some(SecretString::new("secret".to_string()));
        let client = TencentOcrClient::from_config(&config).unwrap();
        assert_eq!(client.host(), "ocr.tencentcloudapi.com");
    }

    #[test]
    fn test_host_is_derived_from_endpoint() {
        assert_eq!(
            client("https://ocr.tencentcloudapi.com/").host(),
            "ocr.tencentcloudapi.com"
        );
    }

    #[tokio::test]
    async fn test_recognize_sends_signed_request() {
        let app = Router::new().route(
            "/",
            post(|headers: HeaderMap, Json(body): Json<Value>| async move {
                let signed = headers
                    .get("authorization")
                    .and_then(|v| v.to_str().ok())
                    .map(|v| v.starts_with("TC3-HMAC-SHA256 Credential=AKIDEXAMPLE/"))
                    .unwrap_or(false);
                let action = headers
                    .get("x-tc-action")
                    .and_then(|v| v.to_str().ok())
                    .unwrap_or_default()
                    .to_string();
                let detected = if signed && action == ACTION && body["Scene"] == "doc" {
                    "signed ok"
                } else {
                    "unsigned"
                };
                Json(json!({
                    "Response": {
                        "TextDetections": [{"DetectedText": detected}],
                        "RequestId": "stub"
                    }
                }))
            }),
        );
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        tokio::spawn(async move {
            axum::serve(listener, app).await.unwrap();
        });

        let text = client(&format!("http://{addr}/"))
            .recognize(TINY_PNG_BASE64)
            .await
            .unwrap();
        assert_eq!(text, "signed ok");
    }
}
