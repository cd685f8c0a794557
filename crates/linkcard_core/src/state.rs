use crate::view_model::{AppViewModel, DownloadStatus};
use crate::{CardStyle, GenerationRequest};

pub type SubmissionToken = u64;
pub type ImageHandle = u64;
pub type CopyId = u64;

pub const TITLE_MAX_CHARS: usize = 40;
pub const DESCRIPTION_MAX_CHARS: usize = 150;

/// Form contents, mutated only by user input messages.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct SubmissionInput {
    pub raw_url: String,
    pub style: CardStyle,
    pub custom_title: String,
    pub custom_description: String,
}

impl SubmissionInput {
    pub fn has_url(&self) -> bool {
        !self.raw_url.trim().is_empty()
    }

    pub(crate) fn to_request(&self, normalized_url: String) -> GenerationRequest {
        GenerationRequest {
            url: normalized_url,
            style: self.style,
            custom_title: self.custom_title.trim().to_string(),
            custom_description: self.custom_description.trim().to_string(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum UiState {
    #[default]
    Idle,
    /// Local validation refused the address; nothing was sent. The card
    /// shown before the attempt, if any, stays owned here.
    Rejected {
        message: String,
        image: Option<ImageHandle>,
    },
    Loading { token: SubmissionToken },
    /// Owns the image handle until the next transition away.
    Success { image: ImageHandle },
    Failure { message: String },
}

impl UiState {
    /// Image handle this state keeps alive.
    pub fn owned_image(&self) -> Option<ImageHandle> {
        match self {
            UiState::Success { image } => Some(*image),
            UiState::Rejected { image, .. } => *image,
            _ => None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum ClipboardStatus {
    #[default]
    Idle,
    Success { message: String },
    Failure { message: String },
}

/// What the active submission sent, kept until its result arrives.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) struct PendingSubmission {
    pub token: SubmissionToken,
    pub title_supplied: bool,
    pub description_supplied: bool,
}

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct AppState {
    input: SubmissionInput,
    ui: UiState,
    clipboard: ClipboardStatus,
    download: Option<DownloadStatus>,
    pending: Option<PendingSubmission>,
    last_token: SubmissionToken,
    last_copy_id: CopyId,
    dirty: bool,
}

impl AppState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn view(&self) -> AppViewModel {
        let (is_loading, error, image) = match &self.ui {
            UiState::Idle => (false, None, None),
            UiState::Rejected { message, image } => (false, Some(message.clone()), *image),
            UiState::Failure { message } => (false, Some(message.clone()), None),
            UiState::Loading { .. } => (true, None, None),
            UiState::Success { image } => (false, None, Some(*image)),
        };
        AppViewModel {
            raw_url: self.input.raw_url.clone(),
            style: self.input.style,
            custom_title: self.input.custom_title.clone(),
            custom_description: self.input.custom_description.clone(),
            can_submit: self.input.has_url(),
            is_loading,
            error,
            image,
            copy_status: self.clipboard.clone(),
            download_status: self.download.clone(),
            dirty: self.dirty,
        }
    }

    pub fn input(&self) -> &SubmissionInput {
        &self.input
    }

    pub fn ui(&self) -> &UiState {
        &self.ui
    }

    pub fn clipboard(&self) -> &ClipboardStatus {
        &self.clipboard
    }

    /// Image handle currently owned by the UI, if any.
    pub fn current_image(&self) -> Option<ImageHandle> {
        self.ui.owned_image()
    }

    /// Returns whether the state changed since the last call and clears the flag.
    pub fn consume_dirty(&mut self) -> bool {
        std::mem::take(&mut self.dirty)
    }

    pub(crate) fn input_mut(&mut self) -> &mut SubmissionInput {
        self.dirty = true;
        &mut self.input
    }

    /// Replaces the UI state, returning the image handle it owned if the
    /// new state no longer holds it.
    pub(crate) fn set_ui(&mut self, next: UiState) -> Option<ImageHandle> {
        let released = self
            .ui
            .owned_image()
            .filter(|old| next.owned_image() != Some(*old));
        self.ui = next;
        self.dirty = true;
        released
    }

    pub(crate) fn issue_token(&mut self) -> SubmissionToken {
        self.last_token += 1;
        self.last_token
    }

    pub(crate) fn pending(&self) -> Option<PendingSubmission> {
        self.pending
    }

    pub(crate) fn set_pending(&mut self, pending: Option<PendingSubmission>) {
        self.pending = pending;
    }

    pub(crate) fn issue_copy_id(&mut self) -> CopyId {
        self.last_copy_id += 1;
        self.last_copy_id
    }

    pub(crate) fn last_copy_id(&self) -> CopyId {
        self.last_copy_id
    }

    pub(crate) fn set_clipboard(&mut self, status: ClipboardStatus) {
        if self.clipboard != status {
            self.clipboard = status;
            self.dirty = true;
        }
    }

    pub(crate) fn set_download(&mut self, status: Option<DownloadStatus>) {
        if self.download != status {
            self.download = status;
            self.dirty = true;
        }
    }
}

/// Cuts `text` to at most `max_chars` characters.
pub fn truncate_chars(text: &str, max_chars: usize) -> String {
    text.chars().take(max_chars).collect()
}
