//! Application state owned by the host event loop

use parking_lot::{Mutex, MutexGuard};
use serde::Serialize;

use crate::actions;
use crate::canvas::{Canvas, Color, RasterSurface};
use crate::config::PaintConfig;
use crate::errors::PaintError;
use crate::file::{default_file_filters, encode_image, ImageBlob, ImageFileType};
use crate::host::{ClipboardHost, FileHost, SaveTarget, ShareHost};
use crate::paint::{handle_pointer_event, PaintSession, PointerEvent};
use crate::raster::Point;

/// Canvas information for the frontend
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CanvasInfo {
    pub width: u32,
    pub height: u32,
    pub ink: Color,
    pub brush_size: u32,
    pub drawing: bool,
}

/// Stamps produced by one pointer event, for the frontend to mirror
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct StampBatch {
    pub points: Vec<Point>,
    pub size: u32,
    pub color: Color,
}

/// One painting document: its pixels plus the in-progress stroke
#[derive(Debug)]
pub struct PaintApp {
    config: PaintConfig,
    canvas: Canvas,
    session: PaintSession,
}

impl PaintApp {
    pub fn new(config: PaintConfig) -> Result<Self, PaintError> {
        config.validate()?;

        tracing::info!(
            "Creating canvas: {}x{}",
            config.canvas_width,
            config.canvas_height
        );

        Ok(Self {
            canvas: Canvas::new(config.canvas_width, config.canvas_height, config.background),
            session: PaintSession::new(config.ink, config.brush_size),
            config,
        })
    }

    pub fn config(&self) -> &PaintConfig {
        &self.config
    }

    pub fn canvas(&self) -> &Canvas {
        &self.canvas
    }

    pub fn canvas_mut(&mut self) -> &mut Canvas {
        &mut self.canvas
    }

    pub fn session(&self) -> &PaintSession {
        &self.session
    }

    pub fn info(&self) -> CanvasInfo {
        CanvasInfo {
            width: self.canvas.width(),
            height: self.canvas.height(),
            ink: self.session.ink(),
            brush_size: self.session.brush_size(),
            drawing: self.session.is_drawing(),
        }
    }

    /// Feed one pointer event through the session onto the canvas
    pub fn handle_pointer(&mut self, event: PointerEvent) -> StampBatch {
        let points = handle_pointer_event(&mut self.session, &mut self.canvas, event);
        if !points.is_empty() {
            tracing::debug!("Stamped {} points", points.len());
        }

        StampBatch {
            points,
            size: self.session.brush_size(),
            color: self.session.ink(),
        }
    }

    pub fn set_color(&mut self, value: &str) -> Result<Color, PaintError> {
        let color: Color = value.parse()?;
        self.session.set_color(color);
        Ok(color)
    }

    pub fn snapshot_png(&self) -> Result<ImageBlob, PaintError> {
        Ok(encode_image(self.canvas.image(), ImageFileType::Png)?)
    }

    /// Back to a blank canvas, ending any stroke in progress
    pub fn reset(&mut self) {
        self.canvas.clear(self.config.background);
        self.session.pointer_up();
    }
}

/// A [`PaintApp`] shared between the event loop and file operations.
///
/// Pointer handling locks it for one event at a time. The file and clipboard
/// flows below never hold the lock while a host call runs, since a native
/// dialog may need the very thread that is waiting on the lock.
#[derive(Debug)]
pub struct SharedPaintApp {
    app: Mutex<PaintApp>,
}

impl SharedPaintApp {
    pub fn new(app: PaintApp) -> Self {
        Self {
            app: Mutex::new(app),
        }
    }

    pub fn lock(&self) -> MutexGuard<'_, PaintApp> {
        self.app.lock()
    }

    pub fn is_locked(&self) -> bool {
        self.app.is_locked()
    }

    /// Copy of the current canvas, taken under a short lock
    fn snapshot(&self) -> Canvas {
        self.lock().canvas().clone()
    }

    fn share_file_name(&self) -> String {
        self.lock().config().share_file_name.clone()
    }

    /// Pick and decode an image unlocked, then draw it at the origin
    pub fn open_image(&self, files: &dyn FileHost) -> Result<bool, PaintError> {
        let Some(loaded) = actions::load_image(files, &default_file_filters())? else {
            return Ok(false);
        };
        self.lock().canvas_mut().draw_image(&loaded.image, 0, 0);
        Ok(true)
    }

    /// Pick a target unlocked, snapshot the canvas, then encode and write unlocked
    pub fn save_image(&self, files: &dyn FileHost) -> Result<Option<SaveTarget>, PaintError> {
        let suggested = self.share_file_name();
        let Some(target) = files.pick_save_target(&default_file_filters(), &suggested)? else {
            tracing::debug!("Save cancelled");
            return Ok(None);
        };

        let canvas = self.snapshot();
        actions::write_image(canvas.image(), files, &target)?;
        Ok(Some(target))
    }

    pub fn copy_image(&self, clipboard: &dyn ClipboardHost) -> Result<(), PaintError> {
        let canvas = self.snapshot();
        actions::copy_image(&canvas, clipboard)
    }

    pub fn paste_image(&self, clipboard: &dyn ClipboardHost) -> Result<usize, PaintError> {
        let images = actions::read_clipboard_images(clipboard)?;
        Ok(actions::draw_pasted(self.lock().canvas_mut(), &images))
    }

    pub fn share_image(&self, share: &dyn ShareHost) -> Result<bool, PaintError> {
        let file_name = self.share_file_name();
        let canvas = self.snapshot();
        actions::share_image(&canvas, share, &file_name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::file::{decode_image, FileTypeFilter};
    use crate::host::{
        ClipboardItem, HostError, MemoryClipboard, MemoryFileHost, MemoryShareHost, OpenedImage,
        SharePayload,
    };
    use std::cell::Cell;

    fn small_app() -> PaintApp {
        PaintApp::new(PaintConfig {
            canvas_width: 16,
            canvas_height: 8,
            ..Default::default()
        })
        .unwrap()
    }

    #[test]
    fn test_new_app() {
        let app = small_app();
        let info = app.info();
        assert_eq!((info.width, info.height), (16, 8));
        assert_eq!(info.ink, Color::BLACK);
        assert_eq!(info.brush_size, 2);
        assert!(!info.drawing);
        assert_eq!(app.canvas().pixel(0, 0), Some(Color::WHITE));
    }

    #[test]
    fn test_invalid_config_rejected() {
        let result = PaintApp::new(PaintConfig {
            canvas_width: 0,
            ..Default::default()
        });
        assert!(matches!(result, Err(PaintError::InvalidConfig(_))));
    }

    #[test]
    fn test_stroke_through_app() {
        let mut app = small_app();

        assert!(app.handle_pointer(PointerEvent::Down { x: 0.0, y: 0.0 }).points.is_empty());
        assert!(app.info().drawing);

        let batch = app.handle_pointer(PointerEvent::Move { x: 4.0, y: 2.0 });
        assert_eq!(batch.points.len(), 5);
        assert_eq!(batch.size, 2);
        assert_eq!(batch.color, Color::BLACK);
        assert_eq!(app.canvas().pixel(4, 2), Some(Color::BLACK));

        app.handle_pointer(PointerEvent::Up);
        assert!(!app.info().drawing);
    }

    #[test]
    fn test_set_color() {
        let mut app = small_app();
        assert_eq!(app.set_color("#00ff00").unwrap(), Color::rgb(0, 255, 0));
        assert_eq!(app.info().ink, Color::rgb(0, 255, 0));

        assert!(matches!(app.set_color("green-ish"), Err(PaintError::Color(_))));
        assert_eq!(app.info().ink, Color::rgb(0, 255, 0));
    }

    #[test]
    fn test_snapshot_and_reset() {
        let mut app = small_app();
        app.handle_pointer(PointerEvent::Down { x: 1.0, y: 1.0 });
        app.handle_pointer(PointerEvent::Move { x: 3.0, y: 1.0 });

        let snapshot = decode_image(&app.snapshot_png().unwrap().data).unwrap();
        assert_eq!(&snapshot, app.canvas().image());

        app.reset();
        assert!(!app.info().drawing);
        assert_eq!(app.canvas().pixel(1, 1), Some(Color::WHITE));
    }

    #[test]
    fn test_stamp_batch_json() {
        let mut app = small_app();
        app.handle_pointer(PointerEvent::Down { x: 0.0, y: 0.0 });
        let batch = app.handle_pointer(PointerEvent::Move { x: 1.0, y: 0.0 });

        let json = serde_json::to_value(&batch).unwrap();
        assert_eq!(json["size"], 2);
        assert_eq!(json["color"], "#000000");
        assert_eq!(json["points"][1]["x"], 1);
    }

    /// File host that notes whether the shared app was locked during each host call
    struct LockWatchingFiles<'a> {
        shared: &'a SharedPaintApp,
        inner: MemoryFileHost,
        calls: Cell<usize>,
        calls_while_locked: Cell<usize>,
    }

    impl<'a> LockWatchingFiles<'a> {
        fn new(shared: &'a SharedPaintApp) -> Self {
            Self {
                shared,
                inner: MemoryFileHost::new(),
                calls: Cell::new(0),
                calls_while_locked: Cell::new(0),
            }
        }

        fn note(&self) {
            self.calls.set(self.calls.get() + 1);
            if self.shared.is_locked() {
                self.calls_while_locked.set(self.calls_while_locked.get() + 1);
            }
        }
    }

    impl FileHost for LockWatchingFiles<'_> {
        fn pick_open_image(
            &self,
            filters: &[FileTypeFilter],
        ) -> Result<Option<OpenedImage>, HostError> {
            self.note();
            self.inner.pick_open_image(filters)
        }

        fn pick_save_target(
            &self,
            filters: &[FileTypeFilter],
            suggested_name: &str,
        ) -> Result<Option<SaveTarget>, HostError> {
            self.note();
            self.inner.pick_save_target(filters, suggested_name)
        }

        fn write_image(&self, target: &SaveTarget, blob: &ImageBlob) -> Result<(), HostError> {
            self.note();
            self.inner.write_image(target, blob)
        }
    }

    /// Clipboard that notes whether the shared app was locked when read or written
    struct LockWatchingClipboard<'a> {
        shared: &'a SharedPaintApp,
        inner: MemoryClipboard,
        calls_while_locked: Cell<usize>,
    }

    impl LockWatchingClipboard<'_> {
        fn note(&self) {
            if self.shared.is_locked() {
                self.calls_while_locked.set(self.calls_while_locked.get() + 1);
            }
        }
    }

    impl ClipboardHost for LockWatchingClipboard<'_> {
        fn write_items(&self, items: Vec<ClipboardItem>) -> Result<(), HostError> {
            self.note();
            self.inner.write_items(items)
        }

        fn read_items(&self) -> Result<Vec<ClipboardItem>, HostError> {
            self.note();
            self.inner.read_items()
        }
    }

    fn red_png() -> ImageBlob {
        let img = image::RgbaImage::from_pixel(2, 2, Color::rgb(255, 0, 0).to_rgba());
        encode_image(&img, ImageFileType::Png).unwrap()
    }

    #[test]
    fn test_shared_open_picks_without_lock() {
        let shared = SharedPaintApp::new(small_app());
        let files = LockWatchingFiles::new(&shared);
        files.inner.queue_open(Some(OpenedImage {
            name: "red.png".into(),
            blob: red_png(),
        }));

        assert!(shared.open_image(&files).unwrap());
        assert_eq!(files.calls.get(), 1);
        assert_eq!(files.calls_while_locked.get(), 0);
        assert!(!shared.is_locked());
        assert_eq!(shared.lock().canvas().pixel(1, 1), Some(Color::rgb(255, 0, 0)));

        // Dismissed picker leaves the canvas alone
        assert!(!shared.open_image(&files).unwrap());
        assert_eq!(files.calls_while_locked.get(), 0);
    }

    #[test]
    fn test_shared_save_picks_and_writes_without_lock() {
        let shared = SharedPaintApp::new(small_app());
        shared.lock().handle_pointer(PointerEvent::Down { x: 0.0, y: 0.0 });
        shared.lock().handle_pointer(PointerEvent::Move { x: 3.0, y: 0.0 });

        let files = LockWatchingFiles::new(&shared);
        files.inner.queue_save(Some(SaveTarget {
            name: "drawing.png".into(),
            location: "mem://drawing.png".into(),
        }));

        let saved = shared.save_image(&files).unwrap();
        assert_eq!(saved.map(|t| t.name), Some("drawing.png".to_string()));
        // One pick plus one write, both unlocked
        assert_eq!(files.calls.get(), 2);
        assert_eq!(files.calls_while_locked.get(), 0);

        let blob = files.inner.written("mem://drawing.png").unwrap();
        assert_eq!(&decode_image(&blob.data).unwrap(), shared.lock().canvas().image());

        assert!(shared.save_image(&files).unwrap().is_none());
        assert_eq!(files.calls.get(), 3);
    }

    #[test]
    fn test_shared_clipboard_round_trip_without_lock() {
        let shared = SharedPaintApp::new(small_app());
        shared.lock().canvas_mut().fill_rect(0, 0, 1, 1, Color::BLACK);
        let clipboard = LockWatchingClipboard {
            shared: &shared,
            inner: MemoryClipboard::new(),
            calls_while_locked: Cell::new(0),
        };

        shared.copy_image(&clipboard).unwrap();
        shared.lock().reset();
        assert_eq!(shared.lock().canvas().pixel(0, 0), Some(Color::WHITE));

        assert_eq!(shared.paste_image(&clipboard).unwrap(), 1);
        assert_eq!(shared.lock().canvas().pixel(0, 0), Some(Color::BLACK));
        assert_eq!(clipboard.calls_while_locked.get(), 0);
    }

    #[test]
    fn test_shared_share_uses_configured_name() {
        let shared = SharedPaintApp::new(small_app());
        let share = MemoryShareHost::new(true);

        assert!(shared.share_image(&share).unwrap());
        let sent: Vec<SharePayload> = share.shared();
        assert_eq!(sent[0].files[0].name, "untitled.png");
    }
}
