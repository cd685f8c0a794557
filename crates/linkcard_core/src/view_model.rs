use std::path::PathBuf;

use crate::{CardStyle, ClipboardStatus, ImageHandle};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DownloadStatus {
    Saved(PathBuf),
    Failed(String),
}

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct AppViewModel {
    pub raw_url: String,
    pub style: CardStyle,
    pub custom_title: String,
    pub custom_description: String,
    /// Submit is offered only once an address has been typed.
    pub can_submit: bool,
    pub is_loading: bool,
    pub error: Option<String>,
    pub image: Option<ImageHandle>,
    pub copy_status: ClipboardStatus,
    pub download_status: Option<DownloadStatus>,
    pub dirty: bool,
}
