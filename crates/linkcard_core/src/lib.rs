//! Linkcard core: address validation and the pure submission state machine.
mod effect;
mod failure;
mod msg;
mod state;
mod style;
mod update;
pub mod validate;
mod view_model;

pub use effect::{Effect, GenerationRequest};
pub use failure::{
    GenerationFailure, GENERIC_FAILURE_MESSAGE, UNREACHABLE_PAGE_MESSAGE,
    WRONG_CONTENT_TYPE_MESSAGE,
};
pub use msg::{GeneratedCard, Msg};
pub use state::{
    truncate_chars, AppState, ClipboardStatus, CopyId, ImageHandle, SubmissionInput,
    SubmissionToken, UiState, DESCRIPTION_MAX_CHARS, TITLE_MAX_CHARS,
};
pub use style::{CardStyle, UnknownStyle};
pub use update::{
    update, COPY_FAILURE_MESSAGE, COPY_STATUS_TTL, COPY_SUCCESS_MESSAGE, DOWNLOAD_FILENAME,
};
pub use validate::{validate, ValidationResult, INVALID_URL_MESSAGE};
pub use view_model::{AppViewModel, DownloadStatus};
