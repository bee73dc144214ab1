//! Tauri commands - IPC interface between frontend and backend
//!
//! Pointer and query commands run on the main thread and lock the app for a
//! single call. File and clipboard commands run off it and leave the app
//! unlocked while the host works, so a native dialog never waits on a main
//! thread that is itself waiting on the lock.

use tauri::{AppHandle, State};

use crate::host::system::{DialogFileHost, SystemClipboard, UnsupportedShare};
use crate::paint::PointerEvent;
use crate::state::{CanvasInfo, PaintApp, SharedPaintApp, StampBatch};

/// Managed state shared by all commands
pub struct AppState {
    pub paint: SharedPaintApp,
    pub clipboard: SystemClipboard,
}

impl AppState {
    pub fn new(app: PaintApp) -> Self {
        Self {
            paint: SharedPaintApp::new(app),
            clipboard: SystemClipboard::new(),
        }
    }
}

/// Get canvas size, ink and stroke state
#[tauri::command]
pub fn get_canvas_info(state: State<'_, AppState>) -> CanvasInfo {
    state.paint.lock().info()
}

#[tauri::command]
pub fn pointer_down(state: State<'_, AppState>, x: f32, y: f32) {
    state.paint.lock().handle_pointer(PointerEvent::Down { x, y });
}

/// Extend the active stroke; the returned stamps let the webview draw them immediately
#[tauri::command]
pub fn pointer_move(state: State<'_, AppState>, x: f32, y: f32) -> StampBatch {
    state.paint.lock().handle_pointer(PointerEvent::Move { x, y })
}

#[tauri::command]
pub fn pointer_up(state: State<'_, AppState>) {
    state.paint.lock().handle_pointer(PointerEvent::Up);
}

/// Set ink from a color input value such as `#ff8000`, returning the normalized hex
#[tauri::command]
pub fn set_color(state: State<'_, AppState>, value: String) -> Result<String, String> {
    let color = state.paint.lock().set_color(&value)?;
    Ok(color.to_hex())
}

/// Current canvas as a PNG data URL
#[tauri::command]
pub fn get_canvas_snapshot(state: State<'_, AppState>) -> Result<String, String> {
    let blob = state.paint.lock().snapshot_png()?;
    Ok(blob.to_data_url())
}

#[tauri::command(async)]
pub fn open_image(app: AppHandle, state: State<'_, AppState>) -> Result<bool, String> {
    Ok(state.paint.open_image(&DialogFileHost::new(app))?)
}

/// Returns the saved file name, or `None` when the dialog was dismissed
#[tauri::command(async)]
pub fn save_image(app: AppHandle, state: State<'_, AppState>) -> Result<Option<String>, String> {
    let target = state.paint.save_image(&DialogFileHost::new(app))?;
    Ok(target.map(|t| t.name))
}

#[tauri::command(async)]
pub fn copy_image(state: State<'_, AppState>) -> Result<(), String> {
    Ok(state.paint.copy_image(&state.clipboard)?)
}

/// Returns how many images were pasted
#[tauri::command(async)]
pub fn paste_image(state: State<'_, AppState>) -> Result<usize, String> {
    Ok(state.paint.paste_image(&state.clipboard)?)
}

/// Returns whether the platform accepted the share
#[tauri::command(async)]
pub fn share_image(state: State<'_, AppState>) -> Result<bool, String> {
    Ok(state.paint.share_image(&UnsupportedShare)?)
}

#[tauri::command]
pub fn reset_canvas(state: State<'_, AppState>) -> CanvasInfo {
    let mut guard = state.paint.lock();
    guard.reset();
    guard.info()
}
