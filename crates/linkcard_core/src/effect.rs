use std::time::Duration;

use crate::{CardStyle, CopyId, ImageHandle, SubmissionToken};

/// Body of a single generation call, already validated and trimmed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GenerationRequest {
    pub url: String,
    pub style: CardStyle,
    pub custom_title: String,
    pub custom_description: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Effect {
    Generate {
        token: SubmissionToken,
        request: GenerationRequest,
    },
    /// The handle is no longer referenced by state; free its bytes.
    ReleaseImage { image: ImageHandle },
    CopyImage { copy_id: CopyId, image: ImageHandle },
    /// Deliver `Msg::CopyStatusExpired` after `after`, replacing any pending reset.
    ScheduleCopyReset { copy_id: CopyId, after: Duration },
    SaveImage { image: ImageHandle, filename: String },
}
