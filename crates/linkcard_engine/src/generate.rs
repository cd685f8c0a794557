use std::time::Duration;

use futures_util::StreamExt;
use linkcard_logging::{card_debug, card_warn};

use crate::decode::{
    content_type_of, decode_text_header, is_image_content_type, is_structured_content_type,
    parse_error_payload, PAGE_DESCRIPTION_HEADER, PAGE_TITLE_HEADER,
};
use crate::{FailureKind, GenerateError, GenerateRequest, GenerationResponse};

pub const GENERATE_PATH: &str = "/api/generate";

#[derive(Debug, Clone)]
pub struct GenerateSettings {
    /// Base URL of the card generation service, e.g. `http://localhost:3000`.
    pub server_url: String,
    pub connect_timeout: Duration,
    pub request_timeout: Duration,
    pub max_bytes: u64,
}

impl Default for GenerateSettings {
    fn default() -> Self {
        Self {
            server_url: "http://localhost:3000".to_string(),
            connect_timeout: Duration::from_secs(10),
            request_timeout: Duration::from_secs(60),
            max_bytes: 10 * 1024 * 1024,
        }
    }
}

impl GenerateSettings {
    pub fn endpoint(&self) -> Result<reqwest::Url, GenerateError> {
        let base = self.server_url.trim_end_matches('/');
        reqwest::Url::parse(&format!("{base}{GENERATE_PATH}"))
            .map_err(|err| GenerateError::new(FailureKind::InvalidEndpoint, err.to_string()))
    }
}

#[async_trait::async_trait]
pub trait ImageGenerator: Send + Sync {
    async fn generate(&self, request: &GenerateRequest)
        -> Result<GenerationResponse, GenerateError>;
}

#[derive(Debug, Clone)]
pub struct ReqwestGenerator {
    settings: GenerateSettings,
    client: reqwest::Client,
}

impl ReqwestGenerator {
    pub fn new(settings: GenerateSettings) -> Result<Self, GenerateError> {
        let client = reqwest::Client::builder()
            .connect_timeout(settings.connect_timeout)
            .timeout(settings.request_timeout)
            .build()
            .map_err(|err| GenerateError::new(FailureKind::Network, err.to_string()))?;
        Ok(Self { settings, client })
    }

    async fn read_body(&self, response: reqwest::Response) -> Result<bytes::Bytes, GenerateError> {
        let max_bytes = self.settings.max_bytes;
        if let Some(content_len) = response.content_length() {
            if content_len > max_bytes {
                return Err(too_large(max_bytes, content_len));
            }
        }

        let mut body = bytes::BytesMut::new();
        let mut stream = response.bytes_stream();
        while let Some(chunk) = stream.next().await {
            let chunk = chunk.map_err(map_reqwest_error)?;
            let next_len = body.len() as u64 + chunk.len() as u64;
            if next_len > max_bytes {
                return Err(too_large(max_bytes, next_len));
            }
            body.extend_from_slice(&chunk);
        }
        Ok(body.freeze())
    }

    async fn failure_from(&self, response: reqwest::Response) -> GenerateError {
        let status = response.status();
        let content_type = content_type_of(response.headers());
        let body = self.read_body(response).await.unwrap_or_default();

        if is_structured_content_type(content_type.as_deref()) {
            let error = parse_error_payload(&body);
            let message = error.clone().unwrap_or_else(|| status.to_string());
            return GenerateError::new(
                FailureKind::Server {
                    status: status.as_u16(),
                    error,
                },
                message,
            );
        }

        card_warn!(
            "Generator returned status {} with non structured body ({} bytes): {}",
            status,
            body.len(),
            String::from_utf8_lossy(&body[..body.len().min(256)])
        );
        GenerateError::new(FailureKind::HttpStatus(status.as_u16()), status.to_string())
    }
}

#[async_trait::async_trait]
impl ImageGenerator for ReqwestGenerator {
    async fn generate(
        &self,
        request: &GenerateRequest,
    ) -> Result<GenerationResponse, GenerateError> {
        let endpoint = self.settings.endpoint()?;
        card_debug!("POST {} style={}", endpoint, request.style);

        let response = self
            .client
            .post(endpoint)
            .json(request)
            .send()
            .await
            .map_err(map_reqwest_error)?;

        if !response.status().is_success() {
            return Err(self.failure_from(response).await);
        }

        let headers = response.headers();
        let content_type = content_type_of(headers);
        if !is_image_content_type(content_type.as_deref()) {
            return Err(GenerateError::new(
                FailureKind::WrongContentType { content_type },
                "server returned the wrong content type",
            ));
        }
        let page_title = decode_text_header(headers.get(PAGE_TITLE_HEADER));
        let page_description = decode_text_header(headers.get(PAGE_DESCRIPTION_HEADER));

        let bytes = self.read_body(response).await?;
        Ok(GenerationResponse {
            bytes,
            content_type: content_type.unwrap_or_default(),
            page_title,
            page_description,
        })
    }
}

fn too_large(max_bytes: u64, actual: u64) -> GenerateError {
    GenerateError::new(
        FailureKind::TooLarge {
            max_bytes,
            actual: Some(actual),
        },
        "response too large",
    )
}

fn map_reqwest_error(err: reqwest::Error) -> GenerateError {
    if err.is_timeout() {
        return GenerateError::new(FailureKind::Timeout, err.to_string());
    }
    GenerateError::new(FailureKind::Network, err.to_string())
}
