use base64::{engine::general_purpose, Engine as _};
use linkcard_logging::card_debug;
use reqwest::header::{HeaderMap, HeaderValue, CONTENT_TYPE};
use serde::Deserialize;

pub const PAGE_TITLE_HEADER: &str = "X-Page-Title";
pub const PAGE_DESCRIPTION_HEADER: &str = "X-Page-Description";

#[derive(Debug, Deserialize)]
struct ErrorPayload {
    error: Option<String>,
}

/// Decode a base64 header carrying UTF-8 text.
///
/// Missing headers, invalid base64 and invalid UTF-8 all yield `None`; the
/// caller treats the field as absent rather than failing the response.
pub fn decode_text_header(value: Option<&HeaderValue>) -> Option<String> {
    let raw = value?.to_str().ok()?.trim();
    let bytes = match general_purpose::STANDARD.decode(raw) {
        Ok(bytes) => bytes,
        Err(err) => {
            card_debug!("Ignoring undecodable metadata header: {}", err);
            return None;
        }
    };
    match String::from_utf8(bytes) {
        Ok(text) => Some(text),
        Err(err) => {
            card_debug!("Ignoring non UTF-8 metadata header: {}", err);
            None
        }
    }
}

pub fn content_type_of(headers: &HeaderMap) -> Option<String> {
    headers
        .get(CONTENT_TYPE)
        .and_then(|value| value.to_str().ok())
        .map(|value| value.to_string())
}

/// Media type without parameters, lowercased.
fn essence(content_type: &str) -> String {
    content_type
        .split(';')
        .next()
        .unwrap_or(content_type)
        .trim()
        .to_ascii_lowercase()
}

pub fn is_image_content_type(content_type: Option<&str>) -> bool {
    content_type.is_some_and(|ct| essence(ct).starts_with("image/"))
}

pub fn is_structured_content_type(content_type: Option<&str>) -> bool {
    content_type.is_some_and(|ct| essence(ct) == "application/json")
}

/// Extract the `error` message of a structured error body.
pub fn parse_error_payload(body: &[u8]) -> Option<String> {
    match serde_json::from_slice::<ErrorPayload>(body) {
        Ok(payload) => payload.error,
        Err(err) => {
            card_debug!("Error body is not a valid error payload: {}", err);
            None
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn header(text: &str) -> HeaderValue {
        HeaderValue::from_str(text).unwrap()
    }

    #[test]
    fn decodes_utf8_text() {
        let encoded = general_purpose::STANDARD.encode("链图 preview");
        assert_eq!(
            decode_text_header(Some(&header(&encoded))),
            Some("链图 preview".to_string())
        );
    }

    #[test]
    fn bad_base64_or_utf8_is_soft_failure() {
        assert_eq!(decode_text_header(Some(&header("%%%not base64"))), None);
        let invalid_utf8 = general_purpose::STANDARD.encode([0xff, 0xfe, 0xfd]);
        assert_eq!(decode_text_header(Some(&header(&invalid_utf8))), None);
        assert_eq!(decode_text_header(None), None);
    }

    #[test]
    fn content_type_checks_ignore_parameters_and_case() {
        assert!(is_image_content_type(Some("image/png")));
        assert!(is_image_content_type(Some("IMAGE/JPEG; q=1")));
        assert!(!is_image_content_type(Some("text/plain")));
        assert!(!is_image_content_type(None));
        assert!(is_structured_content_type(Some(
            "application/json; charset=utf-8"
        )));
        assert!(!is_structured_content_type(Some("text/html")));
    }

    #[test]
    fn error_payload_message_is_extracted() {
        assert_eq!(
            parse_error_payload(br#"{"error":"boom"}"#),
            Some("boom".to_string())
        );
        assert_eq!(parse_error_payload(br#"{"detail":"x"}"#), None);
        assert_eq!(parse_error_payload(b"<html>"), None);
    }
}
