//! Host capabilities - native file pickers, clipboard and share sheet
//!
//! The painting core never talks to OS services directly. Each capability is a
//! narrow trait and the concrete implementation is injected by whoever embeds
//! the core: [`memory`] for headless use and tests, `system` for the desktop
//! shell.

pub mod memory;
#[cfg(feature = "desktop")]
pub mod system;

pub use memory::{MemoryClipboard, MemoryFileHost, MemoryShareHost};

use serde::{Deserialize, Serialize};

use crate::file::{FileTypeFilter, ImageBlob, ImageFileType};

/// Errors reported by a host capability
#[derive(Debug, thiserror::Error)]
pub enum HostError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Capability unavailable: {0}")]
    Unavailable(String),

    #[error("Request rejected: {0}")]
    Rejected(String),
}

impl From<HostError> for String {
    fn from(e: HostError) -> Self {
        e.to_string()
    }
}

/// An image file the user picked for opening
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OpenedImage {
    pub name: String,
    pub blob: ImageBlob,
}

/// Where the user chose to save. `location` is host-defined (a path on desktop).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SaveTarget {
    pub name: String,
    pub location: String,
}

impl SaveTarget {
    /// Type implied by the chosen file name, PNG when the name says nothing
    pub fn file_type(&self) -> ImageFileType {
        ImageFileType::from_path(&self.name).unwrap_or_default()
    }
}

/// Native open/save pickers and the file writes that follow them
pub trait FileHost {
    /// Ask the user for an image to open. `Ok(None)` means the picker was dismissed.
    fn pick_open_image(
        &self,
        filters: &[FileTypeFilter],
    ) -> Result<Option<OpenedImage>, HostError>;

    /// Ask the user where to save. `Ok(None)` means the picker was dismissed.
    fn pick_save_target(
        &self,
        filters: &[FileTypeFilter],
        suggested_name: &str,
    ) -> Result<Option<SaveTarget>, HostError>;

    fn write_image(&self, target: &SaveTarget, blob: &ImageBlob) -> Result<(), HostError>;
}

/// One clipboard entry, possibly offered in several representations
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ClipboardItem {
    blobs: Vec<ImageBlob>,
}

impl ClipboardItem {
    pub fn new(blobs: Vec<ImageBlob>) -> Self {
        Self { blobs }
    }

    pub fn single(blob: ImageBlob) -> Self {
        Self { blobs: vec![blob] }
    }

    /// MIME types on offer, in the order the source listed them
    pub fn types(&self) -> impl Iterator<Item = &str> {
        self.blobs.iter().map(|b| b.mime_type.as_str())
    }

    pub fn get_type(&self, mime_type: &str) -> Option<&ImageBlob> {
        self.blobs.iter().find(|b| b.mime_type == mime_type)
    }

    pub fn blobs(&self) -> &[ImageBlob] {
        &self.blobs
    }
}

pub trait ClipboardHost {
    /// Replace the clipboard contents
    fn write_items(&self, items: Vec<ClipboardItem>) -> Result<(), HostError>;

    fn read_items(&self) -> Result<Vec<ClipboardItem>, HostError>;
}

/// A file handed to the share sheet
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SharedFile {
    pub name: String,
    pub blob: ImageBlob,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SharePayload {
    pub title: String,
    pub files: Vec<SharedFile>,
}

pub trait ShareHost {
    /// Whether the host is able to share this payload at all
    fn can_share(&self, payload: &SharePayload) -> bool;

    fn share(&self, payload: SharePayload) -> Result<(), HostError>;
}
