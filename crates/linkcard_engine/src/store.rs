use std::collections::HashMap;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, Mutex, MutexGuard};

use bytes::Bytes;

use crate::ImageHandle;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StoredImage {
    pub bytes: Bytes,
    pub content_type: String,
}

/// In-memory images addressed by handle, the local equivalent of object URLs.
///
/// Cloning shares the same storage. Bytes stay alive until `release` is called
/// for the handle or the last clone is dropped.
#[derive(Debug, Clone, Default)]
pub struct ImageStore {
    inner: Arc<StoreInner>,
}

#[derive(Debug, Default)]
struct StoreInner {
    next_handle: AtomicU64,
    images: Mutex<HashMap<ImageHandle, StoredImage>>,
}

impl ImageStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&self, bytes: Bytes, content_type: impl Into<String>) -> ImageHandle {
        let handle = self.inner.next_handle.fetch_add(1, Ordering::Relaxed) + 1;
        self.lock().insert(
            handle,
            StoredImage {
                bytes,
                content_type: content_type.into(),
            },
        );
        handle
    }

    /// Re-reads the image behind `handle`. The bytes are shared, not copied.
    pub fn get(&self, handle: ImageHandle) -> Option<StoredImage> {
        self.lock().get(&handle).cloned()
    }

    /// Frees the image; returns `false` for unknown or already released handles.
    pub fn release(&self, handle: ImageHandle) -> bool {
        self.lock().remove(&handle).is_some()
    }

    pub fn len(&self) -> usize {
        self.lock().len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    fn lock(&self) -> MutexGuard<'_, HashMap<ImageHandle, StoredImage>> {
        // A panic while holding the lock cannot leave the map half-updated.
        self.inner
            .images
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
    }
}
