use std::path::PathBuf;
use std::sync::{mpsc, Arc, Mutex};
use std::thread;
use std::time::Duration;

use linkcard_logging::{card_debug, card_error, card_info, card_warn};
use tokio_util::sync::CancellationToken;

use crate::clipboard::{copy_image, ArboardClipboard, ClipboardError, ClipboardWriter};
use crate::generate::{GenerateSettings, ImageGenerator, ReqwestGenerator};
use crate::persist::AtomicFileWriter;
use crate::{
    CopyId, EngineEvent, FailureKind, GenerateError, GenerateRequest, GeneratedImage, ImageHandle,
    ImageStore, RequestId,
};

#[derive(Debug, Clone)]
pub struct EngineConfig {
    pub generate: GenerateSettings,
    /// Directory downloads are written into.
    pub output_dir: PathBuf,
}

/// The worker thread is gone, so the command was never started.
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
#[error("engine worker is not running")]
pub struct EngineStopped;

enum EngineCommand {
    Generate {
        request_id: RequestId,
        request: GenerateRequest,
    },
    Release {
        handle: ImageHandle,
    },
    Copy {
        copy_id: CopyId,
        handle: ImageHandle,
    },
    ScheduleCopyReset {
        copy_id: CopyId,
        after: Duration,
    },
    Save {
        handle: ImageHandle,
        filename: String,
    },
}

struct Workers {
    generator: Arc<dyn ImageGenerator>,
    clipboard: Arc<dyn ClipboardWriter>,
    writer: AtomicFileWriter,
    store: ImageStore,
    event_tx: mpsc::Sender<EngineEvent>,
}

/// Runs IO on a background tokio runtime and reports back through events.
#[derive(Clone)]
pub struct EngineHandle {
    cmd_tx: mpsc::Sender<EngineCommand>,
    event_rx: Arc<Mutex<mpsc::Receiver<EngineEvent>>>,
    store: ImageStore,
}

impl EngineHandle {
    pub fn new(config: EngineConfig) -> Result<Self, GenerateError> {
        let generator = ReqwestGenerator::new(config.generate)?;
        Ok(Self::with_parts(
            Arc::new(generator),
            Arc::new(ArboardClipboard),
            config.output_dir,
        ))
    }

    pub fn with_parts(
        generator: Arc<dyn ImageGenerator>,
        clipboard: Arc<dyn ClipboardWriter>,
        output_dir: PathBuf,
    ) -> Self {
        let (cmd_tx, cmd_rx) = mpsc::channel();
        let (event_tx, event_rx) = mpsc::channel();
        let store = ImageStore::new();
        let workers = Workers {
            generator,
            clipboard,
            writer: AtomicFileWriter::new(output_dir),
            store: store.clone(),
            event_tx,
        };

        thread::spawn(move || run_worker_thread(workers, cmd_rx));

        Self {
            cmd_tx,
            event_rx: Arc::new(Mutex::new(event_rx)),
            store,
        }
    }

    pub fn generate(
        &self,
        request_id: RequestId,
        request: GenerateRequest,
    ) -> Result<(), EngineStopped> {
        self.send(EngineCommand::Generate {
            request_id,
            request,
        })
    }

    pub fn release(&self, handle: ImageHandle) -> Result<(), EngineStopped> {
        self.send(EngineCommand::Release { handle })
    }

    pub fn copy(&self, copy_id: CopyId, handle: ImageHandle) -> Result<(), EngineStopped> {
        self.send(EngineCommand::Copy { copy_id, handle })
    }

    /// Emit `CopyResetDue` after `after`; a later call cancels the pending one.
    pub fn schedule_copy_reset(
        &self,
        copy_id: CopyId,
        after: Duration,
    ) -> Result<(), EngineStopped> {
        self.send(EngineCommand::ScheduleCopyReset { copy_id, after })
    }

    pub fn save(
        &self,
        handle: ImageHandle,
        filename: impl Into<String>,
    ) -> Result<(), EngineStopped> {
        self.send(EngineCommand::Save {
            handle,
            filename: filename.into(),
        })
    }

    pub fn recv_timeout(&self, timeout: Duration) -> Option<EngineEvent> {
        self.event_rx.lock().ok()?.recv_timeout(timeout).ok()
    }

    /// Images currently held for the UI.
    pub fn store(&self) -> &ImageStore {
        &self.store
    }

    fn send(&self, command: EngineCommand) -> Result<(), EngineStopped> {
        self.cmd_tx.send(command).map_err(|_| {
            card_warn!("Engine worker thread is gone; command dropped");
            EngineStopped
        })
    }
}

fn run_worker_thread(workers: Workers, cmd_rx: mpsc::Receiver<EngineCommand>) {
    let runtime = match tokio::runtime::Runtime::new() {
        Ok(runtime) => runtime,
        Err(err) => {
            card_error!("Failed to start engine runtime: {}", err);
            return;
        }
    };
    let workers = Arc::new(workers);
    let mut pending_reset: Option<CancellationToken> = None;

    while let Ok(command) = cmd_rx.recv() {
        match command {
            EngineCommand::Generate {
                request_id,
                request,
            } => {
                let workers = workers.clone();
                runtime.spawn(async move {
                    let generating = workers.clone();
                    // A panicking generator must still complete the request.
                    let result = tokio::spawn(async move {
                        generate_into_store(&generating, &request).await
                    })
                    .await
                    .unwrap_or_else(|err| {
                        card_error!("Generation {} task failed: {}", request_id, err);
                        Err(GenerateError::new(
                            FailureKind::Internal,
                            format!("generation task failed: {err}"),
                        ))
                    });
                    let _ = workers.event_tx.send(EngineEvent::GenerationCompleted {
                        request_id,
                        result,
                    });
                });
            }
            EngineCommand::Release { handle } => {
                if workers.store.release(handle) {
                    card_debug!("Released image {}", handle);
                }
            }
            EngineCommand::Copy { copy_id, handle } => {
                let workers = workers.clone();
                runtime.spawn(async move {
                    let blocking = workers.clone();
                    let result = tokio::task::spawn_blocking(move || {
                        copy_image(&blocking.store, handle, blocking.clipboard.as_ref())
                    })
                    .await
                    .unwrap_or_else(|err| Err(ClipboardError::Write(err.to_string())));
                    if let Err(err) = &result {
                        card_warn!("Copy {} failed: {}", copy_id, err);
                    }
                    let _ = workers
                        .event_tx
                        .send(EngineEvent::CopyCompleted { copy_id, result });
                });
            }
            EngineCommand::ScheduleCopyReset { copy_id, after } => {
                if let Some(previous) = pending_reset.take() {
                    previous.cancel();
                }
                let cancel = CancellationToken::new();
                pending_reset = Some(cancel.clone());
                let event_tx = workers.event_tx.clone();
                runtime.spawn(async move {
                    tokio::select! {
                        _ = cancel.cancelled() => {}
                        _ = tokio::time::sleep(after) => {
                            let _ = event_tx.send(EngineEvent::CopyResetDue { copy_id });
                        }
                    }
                });
            }
            EngineCommand::Save { handle, filename } => {
                let workers = workers.clone();
                runtime.spawn_blocking(move || {
                    let result = match workers.store.get(handle) {
                        Some(image) => workers
                            .writer
                            .write(&filename, &image.bytes)
                            .map_err(|err| err.to_string()),
                        None => Err(format!("image {handle} is no longer available")),
                    };
                    match &result {
                        Ok(path) => card_info!("Saved image {} to {:?}", handle, path),
                        Err(err) => card_warn!("Saving image {} failed: {}", handle, err),
                    }
                    let _ = workers
                        .event_tx
                        .send(EngineEvent::SaveCompleted { handle, result });
                });
            }
        }
    }

    if let Some(pending) = pending_reset {
        pending.cancel();
    }
}

async fn generate_into_store(
    workers: &Workers,
    request: &GenerateRequest,
) -> Result<GeneratedImage, GenerateError> {
    let response = workers.generator.generate(request).await?;
    let byte_len = response.bytes.len() as u64;
    let handle = workers
        .store
        .insert(response.bytes, response.content_type.clone());
    card_info!(
        "Generated image {} ({} bytes, {})",
        handle,
        byte_len,
        response.content_type
    );
    Ok(GeneratedImage {
        handle,
        content_type: response.content_type,
        byte_len,
        page_title: response.page_title,
        page_description: response.page_description,
    })
}
