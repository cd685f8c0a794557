use std::time::Duration;

use crate::state::PendingSubmission;
use crate::validate::{validate, ValidationResult};
use crate::view_model::DownloadStatus;
use crate::{
    truncate_chars, AppState, ClipboardStatus, Effect, GeneratedCard, Msg, UiState,
    DESCRIPTION_MAX_CHARS, TITLE_MAX_CHARS,
};

/// How long a copy result stays visible before the status resets.
pub const COPY_STATUS_TTL: Duration = Duration::from_millis(2000);
pub const COPY_SUCCESS_MESSAGE: &str = "Copied!";
pub const COPY_FAILURE_MESSAGE: &str = "Copy failed, please download the image manually";
/// Fixed name used when saving the generated card.
pub const DOWNLOAD_FILENAME: &str = "link-to-image.png";

/// Pure update function: applies a message to state and returns any effects.
pub fn update(mut state: AppState, msg: Msg) -> (AppState, Vec<Effect>) {
    let mut effects = Vec::new();

    match msg {
        Msg::UrlChanged(raw) => {
            let input = state.input_mut();
            input.raw_url = raw;
            input.custom_title.clear();
            input.custom_description.clear();
            // Editing clears a displayed error but keeps a card still on screen.
            let cleared = match state.ui() {
                UiState::Rejected { image, .. } => {
                    Some(image.map_or(UiState::Idle, |image| UiState::Success { image }))
                }
                UiState::Failure { .. } => Some(UiState::Idle),
                _ => None,
            };
            if let Some(next) = cleared {
                release_into(state.set_ui(next), &mut effects);
            }
        }
        Msg::StyleSelected(style) => {
            if state.input().style != style {
                state.input_mut().style = style;
            }
        }
        Msg::TitleChanged(text) => {
            state.input_mut().custom_title = truncate_chars(&text, TITLE_MAX_CHARS);
        }
        Msg::DescriptionChanged(text) => {
            state.input_mut().custom_description = truncate_chars(&text, DESCRIPTION_MAX_CHARS);
        }
        Msg::SubmitClicked => submit(&mut state, &mut effects),
        Msg::GenerationDone { token, result } => {
            let pending = match state.pending() {
                Some(pending) if pending.token == token => pending,
                _ => {
                    // Superseded: the result must not touch state, but its
                    // image still has to be freed.
                    if let Ok(card) = result {
                        effects.push(Effect::ReleaseImage { image: card.image });
                    }
                    return (state, effects);
                }
            };
            state.set_pending(None);
            let next = match result {
                Ok(card) => {
                    apply_page_metadata(&mut state, pending, &card);
                    UiState::Success { image: card.image }
                }
                Err(failure) => UiState::Failure {
                    message: failure.user_message(),
                },
            };
            release_into(state.set_ui(next), &mut effects);
        }
        Msg::CopyClicked => {
            if let Some(image) = state.current_image() {
                let copy_id = state.issue_copy_id();
                effects.push(Effect::CopyImage { copy_id, image });
            }
        }
        Msg::CopyDone { copy_id, result } => {
            if copy_id == state.last_copy_id() {
                let status = match result {
                    Ok(()) => ClipboardStatus::Success {
                        message: COPY_SUCCESS_MESSAGE.to_string(),
                    },
                    Err(_) => ClipboardStatus::Failure {
                        message: COPY_FAILURE_MESSAGE.to_string(),
                    },
                };
                state.set_clipboard(status);
                effects.push(Effect::ScheduleCopyReset {
                    copy_id,
                    after: COPY_STATUS_TTL,
                });
            }
        }
        Msg::CopyStatusExpired { copy_id } => {
            if copy_id == state.last_copy_id() {
                state.set_clipboard(ClipboardStatus::Idle);
            }
        }
        Msg::DownloadClicked => {
            if let Some(image) = state.current_image() {
                effects.push(Effect::SaveImage {
                    image,
                    filename: DOWNLOAD_FILENAME.to_string(),
                });
            }
        }
        Msg::DownloadDone { image, result } => {
            if state.current_image() != Some(image) {
                return (state, effects);
            }
            let status = match result {
                Ok(path) => DownloadStatus::Saved(path),
                Err(message) => DownloadStatus::Failed(message),
            };
            state.set_download(Some(status));
        }
        Msg::Teardown => {
            state.set_pending(None);
            release_into(state.set_ui(UiState::Idle), &mut effects);
            state.issue_copy_id();
            state.set_clipboard(ClipboardStatus::Idle);
            state.set_download(None);
        }
    }

    (state, effects)
}

fn submit(state: &mut AppState, effects: &mut Vec<Effect>) {
    if !state.input().has_url() {
        return;
    }

    // Every attempt supersedes whatever is still in flight.
    let token = state.issue_token();
    match validate(&state.input().raw_url) {
        ValidationResult::Invalid(message) => {
            // The card from an earlier submission stays visible next to the error.
            let image = state.current_image();
            state.set_pending(None);
            state.set_ui(UiState::Rejected { message, image });
        }
        ValidationResult::Valid(url) => {
            let request = state.input().to_request(url);
            state.set_pending(Some(PendingSubmission {
                token,
                title_supplied: !request.custom_title.is_empty(),
                description_supplied: !request.custom_description.is_empty(),
            }));
            release_into(state.set_ui(UiState::Loading { token }), effects);
            // Late copy results from the previous card must not resurface.
            state.issue_copy_id();
            state.set_clipboard(ClipboardStatus::Idle);
            state.set_download(None);
            effects.push(Effect::Generate { token, request });
        }
    }
}

fn apply_page_metadata(state: &mut AppState, pending: PendingSubmission, card: &GeneratedCard) {
    if !pending.title_supplied {
        if let Some(title) = card.page_title.as_deref() {
            state.input_mut().custom_title = truncate_chars(title, TITLE_MAX_CHARS);
        }
    }
    if !pending.description_supplied {
        if let Some(description) = card.page_description.as_deref() {
            state.input_mut().custom_description =
                truncate_chars(description, DESCRIPTION_MAX_CHARS);
        }
    }
}

fn release_into(released: Option<crate::ImageHandle>, effects: &mut Vec<Effect>) {
    if let Some(image) = released {
        effects.push(Effect::ReleaseImage { image });
    }
}
