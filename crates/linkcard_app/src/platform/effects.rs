use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{mpsc, Arc};
use std::thread;
use std::time::Duration;

use linkcard_core::{Effect, GeneratedCard, GenerationFailure, GenerationRequest, Msg};
use linkcard_engine::{
    EngineEvent, EngineHandle, EngineStopped, FailureKind, GenerateError, GenerateRequest,
    GeneratedImage,
};
use linkcard_logging::{abbreviate_for_log, card_error, card_info, card_warn};

const EVENT_POLL: Duration = Duration::from_millis(50);
const LOGGED_URL_CHARS: usize = 120;

/// Executes core effects on the engine and feeds engine events back as messages.
pub struct EffectRunner {
    engine: EngineHandle,
    msg_tx: mpsc::Sender<Msg>,
    /// Generate, copy and save calls that have not reported back yet.
    outstanding: Arc<AtomicUsize>,
}

impl EffectRunner {
    pub fn new(engine: EngineHandle, msg_tx: mpsc::Sender<Msg>) -> Self {
        let runner = Self {
            engine,
            msg_tx,
            outstanding: Arc::new(AtomicUsize::new(0)),
        };
        runner.spawn_event_loop();
        runner
    }

    pub fn enqueue(&self, effects: Vec<Effect>) {
        for effect in effects {
            let reports_back = reports_back(&effect);
            if reports_back {
                self.outstanding.fetch_add(1, Ordering::SeqCst);
            }
            if let Err(err) = self.start(effect.clone()) {
                if reports_back {
                    self.outstanding.fetch_sub(1, Ordering::SeqCst);
                }
                if let Some(msg) = unstarted_result(effect, &err) {
                    let _ = self.msg_tx.send(msg);
                }
            }
        }
    }

    fn start(&self, effect: Effect) -> Result<(), EngineStopped> {
        match effect {
            Effect::Generate { token, request } => {
                card_info!(
                    "Generate token={} style={} url={}",
                    token,
                    request.style,
                    abbreviate_for_log(&request.url, LOGGED_URL_CHARS)
                );
                self.engine.generate(token, to_engine_request(request))
            }
            Effect::ReleaseImage { image } => self.engine.release(image),
            Effect::CopyImage { copy_id, image } => self.engine.copy(copy_id, image),
            Effect::ScheduleCopyReset { copy_id, after } => {
                self.engine.schedule_copy_reset(copy_id, after)
            }
            Effect::SaveImage { image, filename } => self.engine.save(image, filename),
        }
    }

    /// True once every generate, copy and save call has reported back.
    pub fn is_settled(&self) -> bool {
        self.outstanding.load(Ordering::SeqCst) == 0
    }

    fn spawn_event_loop(&self) {
        let msg_tx = self.msg_tx.clone();
        let engine = self.engine.clone();
        let outstanding = self.outstanding.clone();
        thread::spawn(move || loop {
            let Some(event) = engine.recv_timeout(EVENT_POLL) else {
                continue;
            };
            let settles = !matches!(event, EngineEvent::CopyResetDue { .. });
            let msg = map_event(event);
            if msg_tx.send(msg).is_err() {
                break;
            }
            // Decrement after the message is queued so a waiter never sees
            // a settled engine with the result still in flight.
            if settles {
                outstanding.fetch_sub(1, Ordering::SeqCst);
            }
        });
    }
}

/// Whether the engine answers this effect with an event.
fn reports_back(effect: &Effect) -> bool {
    matches!(
        effect,
        Effect::Generate { .. } | Effect::CopyImage { .. } | Effect::SaveImage { .. }
    )
}

/// The completion message for an effect the engine never started.
fn unstarted_result(effect: Effect, err: &EngineStopped) -> Option<Msg> {
    card_error!("Engine unavailable, dropping {:?}: {}", effect, err);
    match effect {
        Effect::Generate { token, .. } => Some(Msg::GenerationDone {
            token,
            result: Err(GenerationFailure::Transport {
                message: Some(err.to_string()),
            }),
        }),
        Effect::CopyImage { copy_id, .. } => Some(Msg::CopyDone {
            copy_id,
            result: Err(err.to_string()),
        }),
        Effect::SaveImage { image, .. } => Some(Msg::DownloadDone {
            image,
            result: Err(err.to_string()),
        }),
        Effect::ReleaseImage { .. } | Effect::ScheduleCopyReset { .. } => None,
    }
}

fn to_engine_request(request: GenerationRequest) -> GenerateRequest {
    GenerateRequest {
        url: request.url,
        style: request.style.as_str().to_string(),
        custom_title: request.custom_title,
        custom_description: request.custom_description,
    }
}

fn map_event(event: EngineEvent) -> Msg {
    match event {
        EngineEvent::GenerationCompleted { request_id, result } => Msg::GenerationDone {
            token: request_id,
            result: match result {
                Ok(image) => Ok(map_image(image)),
                Err(err) => {
                    card_warn!("Generation {} failed: {}", request_id, err);
                    Err(map_failure(err))
                }
            },
        },
        EngineEvent::CopyCompleted { copy_id, result } => Msg::CopyDone {
            copy_id,
            result: result.map_err(|err| err.to_string()),
        },
        EngineEvent::CopyResetDue { copy_id } => Msg::CopyStatusExpired { copy_id },
        EngineEvent::SaveCompleted { handle, result } => Msg::DownloadDone {
            image: handle,
            result,
        },
    }
}

fn map_image(image: GeneratedImage) -> GeneratedCard {
    GeneratedCard {
        image: image.handle,
        page_title: image.page_title,
        page_description: image.page_description,
    }
}

fn map_failure(err: GenerateError) -> GenerationFailure {
    match err.kind {
        FailureKind::Server { error, .. } => GenerationFailure::Server { message: error },
        FailureKind::HttpStatus(_) => GenerationFailure::Unreachable,
        FailureKind::WrongContentType { .. } => GenerationFailure::WrongContentType,
        _ => GenerationFailure::Transport {
            message: Some(err.to_string()),
        },
    }
}
