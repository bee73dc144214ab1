//! Canvas file and clipboard operations
//!
//! Each operation takes the canvas and the host capability it needs explicitly,
//! so the same code runs against native dialogs or in-memory test hosts.
//!
//! Opening, saving and pasting are also available as separate host and canvas
//! steps. A caller that keeps the canvas behind a lock runs the host step
//! (which may block on a native dialog) unlocked, then locks only to apply.

use image::RgbaImage;

use crate::canvas::{Canvas, RasterSurface};
use crate::errors::PaintError;
use crate::file::{encode_image, FileTypeFilter, ImageFileType};
use crate::host::{
    ClipboardHost, ClipboardItem, FileHost, SaveTarget, SharePayload, ShareHost, SharedFile,
};

/// A picked image, decoded and ready to draw
#[derive(Debug, Clone)]
pub struct LoadedImage {
    pub name: String,
    pub image: RgbaImage,
}

/// Ask the host for an image and decode it. `Ok(None)` when the picker was dismissed.
pub fn load_image(
    files: &dyn FileHost,
    filters: &[FileTypeFilter],
) -> Result<Option<LoadedImage>, PaintError> {
    let Some(opened) = files.pick_open_image(filters)? else {
        tracing::debug!("Open cancelled");
        return Ok(None);
    };

    let image = opened.blob.decode()?;
    tracing::info!(
        "Opened {} ({}x{})",
        opened.name,
        image.width(),
        image.height()
    );
    Ok(Some(LoadedImage {
        name: opened.name,
        image,
    }))
}

/// Pick an image and draw it onto the canvas at the origin.
///
/// Returns `false` when the user dismissed the picker.
pub fn open_image(
    canvas: &mut Canvas,
    files: &dyn FileHost,
    filters: &[FileTypeFilter],
) -> Result<bool, PaintError> {
    let Some(loaded) = load_image(files, filters)? else {
        return Ok(false);
    };
    canvas.draw_image(&loaded.image, 0, 0);
    Ok(true)
}

/// Pick a save location and write the canvas there, encoded as the type the
/// chosen name implies (PNG when it implies none).
pub fn save_image(
    canvas: &Canvas,
    files: &dyn FileHost,
    filters: &[FileTypeFilter],
    suggested_name: &str,
) -> Result<Option<SaveTarget>, PaintError> {
    let Some(target) = files.pick_save_target(filters, suggested_name)? else {
        tracing::debug!("Save cancelled");
        return Ok(None);
    };

    write_image(canvas.image(), files, &target)?;
    Ok(Some(target))
}

/// Encode `image` for an already chosen target and write it
pub fn write_image(
    image: &RgbaImage,
    files: &dyn FileHost,
    target: &SaveTarget,
) -> Result<(), PaintError> {
    let blob = encode_image(image, target.file_type())?;
    files.write_image(target, &blob)?;

    tracing::info!("Saved {} as {}", target.name, blob.mime_type);
    Ok(())
}

/// Put the canvas on the clipboard as a single PNG item
pub fn copy_image(canvas: &Canvas, clipboard: &dyn ClipboardHost) -> Result<(), PaintError> {
    let blob = encode_image(canvas.image(), ImageFileType::Png)?;
    tracing::info!("Copying canvas to clipboard ({} bytes)", blob.len());
    clipboard.write_items(vec![ClipboardItem::single(blob)])?;
    Ok(())
}

/// Decode every PNG on the clipboard, in clipboard order.
///
/// Entries of other types are skipped.
pub fn read_clipboard_images(clipboard: &dyn ClipboardHost) -> Result<Vec<RgbaImage>, PaintError> {
    let png = ImageFileType::Png.mime_type();
    let mut images = Vec::new();

    for item in clipboard.read_items()? {
        for blob in item.blobs().iter().filter(|b| b.mime_type == png) {
            images.push(blob.decode()?);
        }
    }
    Ok(images)
}

/// Draw `images` onto the canvas at the origin, returning how many were drawn
pub fn draw_pasted(canvas: &mut Canvas, images: &[RgbaImage]) -> usize {
    for image in images {
        canvas.draw_image(image, 0, 0);
    }
    tracing::info!("Pasted {} image(s) from clipboard", images.len());
    images.len()
}

/// Draw every PNG on the clipboard onto the canvas at the origin.
///
/// Entries of other types are skipped. Returns how many images were drawn.
pub fn paste_image(
    canvas: &mut Canvas,
    clipboard: &dyn ClipboardHost,
) -> Result<usize, PaintError> {
    let images = read_clipboard_images(clipboard)?;
    Ok(draw_pasted(canvas, &images))
}

/// Offer the canvas to the share sheet as a PNG named `file_name`.
///
/// Returns `false` when the host cannot share it.
pub fn share_image(
    canvas: &Canvas,
    share: &dyn ShareHost,
    file_name: &str,
) -> Result<bool, PaintError> {
    let blob = encode_image(canvas.image(), ImageFileType::Png)?;
    let payload = SharePayload {
        title: file_name.to_string(),
        files: vec![SharedFile {
            name: file_name.to_string(),
            blob,
        }],
    };

    if !share.can_share(&payload) {
        tracing::info!("Share not available for {}", file_name);
        return Ok(false);
    }

    share.share(payload)?;
    tracing::info!("Shared {}", file_name);
    Ok(true)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::canvas::Color;
    use crate::file::{decode_image, default_file_filters, ImageBlob};
    use crate::host::{MemoryClipboard, MemoryFileHost, MemoryShareHost, OpenedImage};
    use image::RgbaImage;

    const RED: Color = Color::rgb(255, 0, 0);

    fn red_png(width: u32, height: u32) -> ImageBlob {
        let img = RgbaImage::from_pixel(width, height, RED.to_rgba());
        encode_image(&img, ImageFileType::Png).unwrap()
    }

    fn target(name: &str) -> SaveTarget {
        SaveTarget {
            name: name.to_string(),
            location: format!("mem://{}", name),
        }
    }

    #[test]
    fn test_open_draws_at_origin() {
        let mut canvas = Canvas::new(4, 4, Color::WHITE);
        let files = MemoryFileHost::new();
        files.queue_open(Some(OpenedImage {
            name: "red.png".into(),
            blob: red_png(2, 2),
        }));

        assert!(open_image(&mut canvas, &files, &default_file_filters()).unwrap());
        assert_eq!(canvas.pixel(0, 0), Some(RED));
        assert_eq!(canvas.pixel(1, 1), Some(RED));
        assert_eq!(canvas.pixel(2, 2), Some(Color::WHITE));
    }

    #[test]
    fn test_load_then_apply_separately() {
        let files = MemoryFileHost::new();
        files.queue_open(Some(OpenedImage {
            name: "red.png".into(),
            blob: red_png(3, 1),
        }));

        // No canvas is involved until the decoded image is drawn
        let loaded = load_image(&files, &default_file_filters()).unwrap().unwrap();
        assert_eq!(loaded.name, "red.png");
        assert_eq!(loaded.image.dimensions(), (3, 1));

        let mut canvas = Canvas::new(4, 4, Color::WHITE);
        canvas.draw_image(&loaded.image, 0, 0);
        assert_eq!(canvas.pixel(2, 0), Some(RED));
        assert!(load_image(&files, &default_file_filters()).unwrap().is_none());
    }

    #[test]
    fn test_open_cancelled_leaves_canvas() {
        let mut canvas = Canvas::new(2, 2, Color::WHITE);
        let files = MemoryFileHost::new();
        files.queue_open(None);

        assert!(!open_image(&mut canvas, &files, &default_file_filters()).unwrap());
        assert!(canvas.image().pixels().all(|p| Color::from(*p) == Color::WHITE));
    }

    #[test]
    fn test_open_corrupt_file_errors() {
        let mut canvas = Canvas::new(2, 2, Color::WHITE);
        let files = MemoryFileHost::new();
        files.queue_open(Some(OpenedImage {
            name: "broken.png".into(),
            blob: ImageBlob::new("image/png", b"nope".to_vec()),
        }));

        let result = open_image(&mut canvas, &files, &default_file_filters());
        assert!(matches!(result, Err(PaintError::File(_))));
    }

    #[test]
    fn test_save_png() {
        let mut canvas = Canvas::new(3, 3, Color::WHITE);
        canvas.fill_rect(0, 0, 1, 1, Color::BLACK);
        let files = MemoryFileHost::new();
        files.queue_save(Some(target("drawing.png")));

        let saved = save_image(&canvas, &files, &default_file_filters(), "untitled.png").unwrap();
        assert_eq!(saved, Some(target("drawing.png")));

        let blob = files.written("mem://drawing.png").unwrap();
        assert_eq!(blob.mime_type, "image/png");
        assert_eq!(&decode_image(&blob.data).unwrap(), canvas.image());
    }

    #[test]
    fn test_save_follows_chosen_extension() {
        let canvas = Canvas::new(3, 3, Color::WHITE);
        let files = MemoryFileHost::new();
        files.queue_save(Some(target("photo.JPEG")));

        save_image(&canvas, &files, &default_file_filters(), "untitled.png").unwrap();
        let blob = files.written("mem://photo.JPEG").unwrap();
        assert_eq!(blob.mime_type, "image/jpeg");
    }

    #[test]
    fn test_write_image_to_chosen_target() {
        let image = RgbaImage::from_pixel(2, 2, RED.to_rgba());
        let files = MemoryFileHost::new();

        write_image(&image, &files, &target("copy.png")).unwrap();
        let blob = files.written("mem://copy.png").unwrap();
        assert_eq!(decode_image(&blob.data).unwrap(), image);
    }

    #[test]
    fn test_save_cancelled_writes_nothing() {
        let canvas = Canvas::new(3, 3, Color::WHITE);
        let files = MemoryFileHost::new();

        let saved = save_image(&canvas, &files, &default_file_filters(), "untitled.png").unwrap();
        assert!(saved.is_none());
        assert_eq!(files.written_count(), 0);
    }

    #[test]
    fn test_copy_then_paste_round_trip() {
        let mut source = Canvas::new(3, 2, Color::WHITE);
        source.fill_rect(2, 1, 1, 1, RED);
        let clipboard = MemoryClipboard::new();

        copy_image(&source, &clipboard).unwrap();

        let items = clipboard.read_items().unwrap();
        assert_eq!(items.len(), 1);
        assert_eq!(items[0].types().collect::<Vec<_>>(), vec!["image/png"]);

        let mut target = Canvas::new(3, 2, Color::BLACK);
        assert_eq!(paste_image(&mut target, &clipboard).unwrap(), 1);
        assert_eq!(target.image(), source.image());
    }

    #[test]
    fn test_paste_skips_other_types() {
        let clipboard = MemoryClipboard::with_items(vec![
            ClipboardItem::new(vec![
                ImageBlob::new("image/jpeg", vec![0xFF, 0xD8]),
                red_png(1, 1),
            ]),
            ClipboardItem::single(ImageBlob::new("text/plain", b"hello".to_vec())),
        ]);
        let mut canvas = Canvas::new(2, 2, Color::WHITE);

        assert_eq!(paste_image(&mut canvas, &clipboard).unwrap(), 1);
        assert_eq!(canvas.pixel(0, 0), Some(RED));
        assert_eq!(canvas.pixel(1, 1), Some(Color::WHITE));
    }

    #[test]
    fn test_read_clipboard_then_draw() {
        let clipboard = MemoryClipboard::with_items(vec![
            ClipboardItem::single(red_png(1, 1)),
            ClipboardItem::single(ImageBlob::new("text/plain", b"hi".to_vec())),
            ClipboardItem::single(red_png(2, 1)),
        ]);

        let images = read_clipboard_images(&clipboard).unwrap();
        assert_eq!(images.len(), 2);
        assert_eq!(images[1].dimensions(), (2, 1));

        let mut canvas = Canvas::new(3, 1, Color::WHITE);
        assert_eq!(draw_pasted(&mut canvas, &images), 2);
        assert_eq!(canvas.pixel(1, 0), Some(RED));
        assert_eq!(canvas.pixel(2, 0), Some(Color::WHITE));
    }

    #[test]
    fn test_paste_empty_clipboard() {
        let mut canvas = Canvas::new(2, 2, Color::WHITE);
        assert_eq!(paste_image(&mut canvas, &MemoryClipboard::new()).unwrap(), 0);
    }

    #[test]
    fn test_share() {
        let canvas = Canvas::new(2, 2, Color::WHITE);
        let share = MemoryShareHost::new(true);

        assert!(share_image(&canvas, &share, "untitled.png").unwrap());

        let shared = share.shared();
        assert_eq!(shared.len(), 1);
        assert_eq!(shared[0].title, "untitled.png");
        assert_eq!(shared[0].files[0].name, "untitled.png");
        assert_eq!(shared[0].files[0].blob.mime_type, "image/png");
    }

    #[test]
    fn test_share_unavailable() {
        let canvas = Canvas::new(2, 2, Color::WHITE);
        let share = MemoryShareHost::new(false);

        assert!(!share_image(&canvas, &share, "untitled.png").unwrap());
        assert!(share.shared().is_empty());
    }
}
