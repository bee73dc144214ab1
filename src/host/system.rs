//! Desktop hosts: Tauri native dialogs, the OS clipboard via arboard

use image::RgbaImage;
use parking_lot::Mutex;
use std::borrow::Cow;
use std::path::Path;
use tauri::{AppHandle, Runtime};
use tauri_plugin_dialog::{DialogExt, FileDialogBuilder};

use super::{
    ClipboardHost, ClipboardItem, FileHost, HostError, OpenedImage, SaveTarget, ShareHost,
    SharePayload,
};
use crate::file::{decode_image, encode_image, FileTypeFilter, ImageBlob, ImageFileType};

/// Native open/save dialogs backed by `tauri-plugin-dialog`, files via `std::fs`
pub struct DialogFileHost<R: Runtime> {
    app: AppHandle<R>,
}

impl<R: Runtime> DialogFileHost<R> {
    pub fn new(app: AppHandle<R>) -> Self {
        Self { app }
    }

    fn builder(&self, filters: &[FileTypeFilter]) -> FileDialogBuilder<R> {
        filters.iter().fold(self.app.dialog().file(), |builder, filter| {
            builder.add_filter(filter.description.clone(), &filter.bare_extensions())
        })
    }
}

fn display_name(path: &Path) -> String {
    path.file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_else(|| path.to_string_lossy().into_owned())
}

impl<R: Runtime> FileHost for DialogFileHost<R> {
    fn pick_open_image(
        &self,
        filters: &[FileTypeFilter],
    ) -> Result<Option<OpenedImage>, HostError> {
        let Some(picked) = self.builder(filters).blocking_pick_file() else {
            return Ok(None);
        };
        let path = picked
            .as_path()
            .ok_or_else(|| HostError::Unavailable("picked file is not a local path".into()))?;

        tracing::info!("Opening image: {:?}", path);
        let data = std::fs::read(path)?;
        let mime_type = ImageFileType::from_path(&path.to_string_lossy())
            .unwrap_or_default()
            .mime_type();

        Ok(Some(OpenedImage {
            name: display_name(path),
            blob: ImageBlob::new(mime_type, data),
        }))
    }

    fn pick_save_target(
        &self,
        filters: &[FileTypeFilter],
        suggested_name: &str,
    ) -> Result<Option<SaveTarget>, HostError> {
        let Some(picked) = self
            .builder(filters)
            .set_file_name(suggested_name)
            .blocking_save_file()
        else {
            return Ok(None);
        };
        let path = picked
            .as_path()
            .ok_or_else(|| HostError::Unavailable("save location is not a local path".into()))?;

        Ok(Some(SaveTarget {
            name: display_name(path),
            location: path.to_string_lossy().into_owned(),
        }))
    }

    fn write_image(&self, target: &SaveTarget, blob: &ImageBlob) -> Result<(), HostError> {
        tracing::info!("Writing {} bytes to {}", blob.len(), target.location);
        std::fs::write(&target.location, &blob.data)?;
        Ok(())
    }
}

/// OS clipboard. Images travel through it as raw RGBA and surface here as PNG.
///
/// The arboard handle is opened on first use and kept for the life of the app:
/// on X11 and Wayland the copied contents are only served while it is alive.
#[derive(Default)]
pub struct SystemClipboard {
    clipboard: Mutex<Option<arboard::Clipboard>>,
}

impl SystemClipboard {
    pub fn new() -> Self {
        Self::default()
    }

    fn with_clipboard<T>(
        &self,
        f: impl FnOnce(&mut arboard::Clipboard) -> Result<T, HostError>,
    ) -> Result<T, HostError> {
        let mut slot = self.clipboard.lock();
        let clipboard = match slot.take() {
            Some(clipboard) => clipboard,
            None => {
                tracing::debug!("Opening system clipboard");
                arboard::Clipboard::new().map_err(|e| HostError::Unavailable(e.to_string()))?
            }
        };
        f(slot.insert(clipboard))
    }
}

impl ClipboardHost for SystemClipboard {
    fn write_items(&self, items: Vec<ClipboardItem>) -> Result<(), HostError> {
        let png = items
            .iter()
            .find_map(|item| item.get_type(ImageFileType::Png.mime_type()))
            .ok_or_else(|| HostError::Rejected("no image/png entry to copy".into()))?;
        let image = decode_image(&png.data).map_err(|e| HostError::Rejected(e.to_string()))?;

        let data = arboard::ImageData {
            width: image.width() as usize,
            height: image.height() as usize,
            bytes: Cow::Owned(image.into_raw()),
        };
        self.with_clipboard(|clipboard| {
            clipboard
                .set_image(data)
                .map_err(|e| HostError::Unavailable(e.to_string()))
        })
    }

    fn read_items(&self) -> Result<Vec<ClipboardItem>, HostError> {
        let data = self.with_clipboard(|clipboard| match clipboard.get_image() {
            Ok(data) => Ok(Some(data)),
            Err(arboard::Error::ContentNotAvailable) => Ok(None),
            Err(e) => Err(HostError::Unavailable(e.to_string())),
        })?;
        let Some(data) = data else {
            return Ok(Vec::new());
        };

        let image = RgbaImage::from_raw(
            data.width as u32,
            data.height as u32,
            data.bytes.into_owned(),
        )
        .ok_or_else(|| HostError::Rejected("clipboard image has inconsistent size".into()))?;

        let blob = encode_image(&image, ImageFileType::Png)
            .map_err(|e| HostError::Rejected(e.to_string()))?;
        Ok(vec![ClipboardItem::single(blob)])
    }
}

/// Desktop platforms expose no share sheet to a webview app
#[derive(Debug, Default)]
pub struct UnsupportedShare;

impl ShareHost for UnsupportedShare {
    fn can_share(&self, _payload: &SharePayload) -> bool {
        false
    }

    fn share(&self, _payload: SharePayload) -> Result<(), HostError> {
        Err(HostError::Unavailable("sharing is not supported on this platform".into()))
    }
}
