use std::sync::Once;

use linkcard_core::{
    update, AppState, ClipboardStatus, CopyId, Effect, GeneratedCard, Msg, COPY_FAILURE_MESSAGE,
    COPY_STATUS_TTL, COPY_SUCCESS_MESSAGE,
};
use pretty_assertions::assert_eq;

fn init_logging() {
    static INIT: Once = Once::new();
    INIT.call_once(linkcard_logging::initialize_for_tests);
}

fn with_card(image: u64) -> AppState {
    let (state, _) = update(AppState::new(), Msg::UrlChanged("example.com".to_string()));
    let (state, effects) = update(state, Msg::SubmitClicked);
    let token = match effects.last() {
        Some(Effect::Generate { token, .. }) => *token,
        other => panic!("unexpected effects {other:?}"),
    };
    let (state, _) = update(
        state,
        Msg::GenerationDone {
            token,
            result: Ok(GeneratedCard {
                image,
                page_title: None,
                page_description: None,
            }),
        },
    );
    state
}

fn click_copy(state: AppState) -> (AppState, CopyId) {
    let (state, effects) = update(state, Msg::CopyClicked);
    match effects.as_slice() {
        [Effect::CopyImage { copy_id, .. }] => (state, *copy_id),
        other => panic!("unexpected effects {other:?}"),
    }
}

#[test]
fn copy_without_image_does_nothing() {
    init_logging();
    let (state, effects) = update(AppState::new(), Msg::CopyClicked);

    assert!(effects.is_empty());
    assert_eq!(state.clipboard(), &ClipboardStatus::Idle);
}

#[test]
fn copy_targets_current_image() {
    init_logging();
    let (_, effects) = update(with_card(42), Msg::CopyClicked);

    assert!(matches!(
        effects.as_slice(),
        [Effect::CopyImage { image: 42, .. }]
    ));
}

#[test]
fn successful_copy_schedules_reset_after_two_seconds() {
    init_logging();
    let (state, copy_id) = click_copy(with_card(1));

    let (state, effects) = update(
        state,
        Msg::CopyDone {
            copy_id,
            result: Ok(()),
        },
    );

    assert_eq!(COPY_STATUS_TTL.as_millis(), 2000);
    assert_eq!(
        effects,
        vec![Effect::ScheduleCopyReset {
            copy_id,
            after: COPY_STATUS_TTL,
        }]
    );
    assert_eq!(
        state.view().copy_status,
        ClipboardStatus::Success {
            message: COPY_SUCCESS_MESSAGE.to_string()
        }
    );

    let (state, _) = update(state, Msg::CopyStatusExpired { copy_id });
    assert_eq!(state.view().copy_status, ClipboardStatus::Idle);
}

#[test]
fn failed_copy_suggests_manual_download() {
    init_logging();
    let (state, copy_id) = click_copy(with_card(1));

    let (state, effects) = update(
        state,
        Msg::CopyDone {
            copy_id,
            result: Err("clipboard unavailable".to_string()),
        },
    );

    assert_eq!(
        state.clipboard(),
        &ClipboardStatus::Failure {
            message: COPY_FAILURE_MESSAGE.to_string()
        }
    );
    assert_eq!(effects.len(), 1);
    // The generated image stays usable.
    assert_eq!(state.view().image, Some(1));
}

#[test]
fn second_copy_replaces_pending_reset() {
    init_logging();
    let (state, first) = click_copy(with_card(1));
    let (state, _) = update(
        state,
        Msg::CopyDone {
            copy_id: first,
            result: Ok(()),
        },
    );
    let (state, second) = click_copy(state);
    assert_ne!(first, second);
    let (state, effects) = update(
        state,
        Msg::CopyDone {
            copy_id: second,
            result: Ok(()),
        },
    );
    assert_eq!(
        effects,
        vec![Effect::ScheduleCopyReset {
            copy_id: second,
            after: COPY_STATUS_TTL,
        }]
    );

    let (state, _) = update(state, Msg::CopyStatusExpired { copy_id: first });
    assert!(matches!(
        state.clipboard(),
        ClipboardStatus::Success { .. }
    ));

    let (state, _) = update(state, Msg::CopyStatusExpired { copy_id: second });
    assert_eq!(state.clipboard(), &ClipboardStatus::Idle);
}

#[test]
fn copy_result_from_previous_card_is_ignored_after_resubmit() {
    init_logging();
    let (state, copy_id) = click_copy(with_card(1));
    let (state, _) = update(state, Msg::SubmitClicked);

    let (state, effects) = update(
        state,
        Msg::CopyDone {
            copy_id,
            result: Ok(()),
        },
    );

    assert!(effects.is_empty());
    assert_eq!(state.clipboard(), &ClipboardStatus::Idle);
}
