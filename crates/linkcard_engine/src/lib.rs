//! Linkcard engine: generator HTTP client, image store and effect execution.
mod clipboard;
mod decode;
mod engine;
mod generate;
mod persist;
mod store;
mod types;

pub use clipboard::{copy_image, ArboardClipboard, ClipboardError, ClipboardImage, ClipboardWriter};
pub use decode::{
    decode_text_header, is_image_content_type, is_structured_content_type, PAGE_DESCRIPTION_HEADER,
    PAGE_TITLE_HEADER,
};
pub use engine::{EngineConfig, EngineHandle, EngineStopped};
pub use generate::{GenerateSettings, ImageGenerator, ReqwestGenerator, GENERATE_PATH};
pub use persist::{ensure_output_dir, AtomicFileWriter, PersistError};
pub use store::{ImageStore, StoredImage};
pub use types::{
    CopyId, EngineEvent, FailureKind, GenerateError, GenerateRequest, GeneratedImage,
    GenerationResponse, ImageHandle, RequestId,
};
