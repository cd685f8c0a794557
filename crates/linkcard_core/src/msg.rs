use std::path::PathBuf;

use crate::{CardStyle, CopyId, GenerationFailure, ImageHandle, SubmissionToken};

/// Result of a successful generation, as handed back by the platform.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GeneratedCard {
    pub image: ImageHandle,
    /// Decoded page title header; `None` when absent or undecodable.
    pub page_title: Option<String>,
    pub page_description: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Msg {
    /// User edited the address field.
    UrlChanged(String),
    StyleSelected(CardStyle),
    TitleChanged(String),
    DescriptionChanged(String),
    /// User submitted the form.
    SubmitClicked,
    /// Platform finished the generation call issued for `token`.
    GenerationDone {
        token: SubmissionToken,
        result: Result<GeneratedCard, GenerationFailure>,
    },
    CopyClicked,
    CopyDone {
        copy_id: CopyId,
        result: Result<(), String>,
    },
    /// Reset timer for `copy_id` fired.
    CopyStatusExpired { copy_id: CopyId },
    DownloadClicked,
    /// Save of `image` finished; ignored once that card is gone.
    DownloadDone {
        image: ImageHandle,
        result: Result<PathBuf, String>,
    },
    /// The form is going away; release everything it owns.
    Teardown,
}
