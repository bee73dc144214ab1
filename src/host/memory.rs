//! In-memory hosts for headless embedding and tests

use parking_lot::Mutex;
use std::collections::{HashMap, VecDeque};

use super::{
    ClipboardHost, ClipboardItem, FileHost, HostError, OpenedImage, SaveTarget, ShareHost,
    SharePayload,
};
use crate::file::{FileTypeFilter, ImageBlob};

/// File host whose picker answers are scripted in advance
#[derive(Debug, Default)]
pub struct MemoryFileHost {
    open_answers: Mutex<VecDeque<Option<OpenedImage>>>,
    save_answers: Mutex<VecDeque<Option<SaveTarget>>>,
    written: Mutex<HashMap<String, ImageBlob>>,
}

impl MemoryFileHost {
    pub fn new() -> Self {
        Self::default()
    }

    /// Queue the result of the next open picker (`None` = dismissed)
    pub fn queue_open(&self, answer: Option<OpenedImage>) {
        self.open_answers.lock().push_back(answer);
    }

    /// Queue the result of the next save picker (`None` = dismissed)
    pub fn queue_save(&self, answer: Option<SaveTarget>) {
        self.save_answers.lock().push_back(answer);
    }

    pub fn written(&self, location: &str) -> Option<ImageBlob> {
        self.written.lock().get(location).cloned()
    }

    pub fn written_count(&self) -> usize {
        self.written.lock().len()
    }
}

impl FileHost for MemoryFileHost {
    fn pick_open_image(
        &self,
        _filters: &[FileTypeFilter],
    ) -> Result<Option<OpenedImage>, HostError> {
        // An unscripted picker behaves like one the user dismissed
        Ok(self.open_answers.lock().pop_front().flatten())
    }

    fn pick_save_target(
        &self,
        _filters: &[FileTypeFilter],
        _suggested_name: &str,
    ) -> Result<Option<SaveTarget>, HostError> {
        Ok(self.save_answers.lock().pop_front().flatten())
    }

    fn write_image(&self, target: &SaveTarget, blob: &ImageBlob) -> Result<(), HostError> {
        self.written
            .lock()
            .insert(target.location.clone(), blob.clone());
        Ok(())
    }
}

/// Process-local clipboard
#[derive(Debug, Default)]
pub struct MemoryClipboard {
    items: Mutex<Vec<ClipboardItem>>,
}

impl MemoryClipboard {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_items(items: Vec<ClipboardItem>) -> Self {
        Self {
            items: Mutex::new(items),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.items.lock().is_empty()
    }
}

impl ClipboardHost for MemoryClipboard {
    fn write_items(&self, items: Vec<ClipboardItem>) -> Result<(), HostError> {
        *self.items.lock() = items;
        Ok(())
    }

    fn read_items(&self) -> Result<Vec<ClipboardItem>, HostError> {
        Ok(self.items.lock().clone())
    }
}

/// Share host that records what it was asked to share
#[derive(Debug)]
pub struct MemoryShareHost {
    enabled: bool,
    shared: Mutex<Vec<SharePayload>>,
}

impl MemoryShareHost {
    pub fn new(enabled: bool) -> Self {
        Self {
            enabled,
            shared: Mutex::new(Vec::new()),
        }
    }

    pub fn shared(&self) -> Vec<SharePayload> {
        self.shared.lock().clone()
    }
}

impl ShareHost for MemoryShareHost {
    fn can_share(&self, payload: &SharePayload) -> bool {
        self.enabled && !payload.files.is_empty()
    }

    fn share(&self, payload: SharePayload) -> Result<(), HostError> {
        if !self.can_share(&payload) {
            return Err(HostError::Rejected("nothing shareable".into()));
        }
        self.shared.lock().push(payload);
        Ok(())
    }
}
