/// Fallback shown when a failure carries no usable message.
pub const GENERIC_FAILURE_MESSAGE: &str = "Image generation failed";
/// Shown when the server failed without a structured error payload.
pub const UNREACHABLE_PAGE_MESSAGE: &str =
    "Image generation failed, please check that the page is reachable";
/// Shown when a nominally successful response is not an image.
pub const WRONG_CONTENT_TYPE_MESSAGE: &str = "Server returned the wrong content type";

/// Why a generation request did not produce an image.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GenerationFailure {
    /// Server answered with a structured error payload.
    Server { message: Option<String> },
    /// Server failed and the body was not structured.
    Unreachable,
    /// 2xx response whose content type is not an image.
    WrongContentType,
    /// Anything else on the way (network, timeout, body read).
    Transport { message: Option<String> },
}

impl GenerationFailure {
    /// The single message surfaced in UI state.
    pub fn user_message(&self) -> String {
        match self {
            GenerationFailure::Server { message } | GenerationFailure::Transport { message } => {
                message
                    .as_deref()
                    .filter(|text| !text.trim().is_empty())
                    .unwrap_or(GENERIC_FAILURE_MESSAGE)
                    .to_string()
            }
            GenerationFailure::Unreachable => UNREACHABLE_PAGE_MESSAGE.to_string(),
            GenerationFailure::WrongContentType => WRONG_CONTENT_TYPE_MESSAGE.to_string(),
        }
    }
}
