//! Pixel Paint - pixel painting canvas with native file, clipboard and share integration
//!
//! The library is platform-agnostic; the Tauri shell (`run`, `commands`) is
//! compiled only with the `desktop` feature.

pub mod actions;
pub mod app_meta;
pub mod canvas;
pub mod config;
pub mod errors;
pub mod file;
pub mod host;
pub mod paint;
pub mod raster;
pub mod state;

#[cfg(feature = "desktop")]
pub mod commands;

use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

/// Initialize logging. Safe to call more than once.
pub fn init() {
    let result = tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "pixel_paint_lib=debug,pixel_paint=debug,tauri=info".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .try_init();

    if result.is_ok() {
        tracing::info!("{} initializing...", app_meta::APP_NAME);
    }
}

/// Run the Tauri application
#[cfg(feature = "desktop")]
pub fn run() {
    use tauri::Manager;

    init();

    let paint_app = match state::PaintApp::new(config::PaintConfig::load()) {
        Ok(app) => app,
        Err(err) => {
            tracing::error!("Failed to create canvas: {}", err);
            return;
        }
    };

    let result = tauri::Builder::default()
        .plugin(tauri_plugin_dialog::init())
        .manage(commands::AppState::new(paint_app))
        .invoke_handler(tauri::generate_handler![
            commands::get_canvas_info,
            commands::pointer_down,
            commands::pointer_move,
            commands::pointer_up,
            commands::set_color,
            commands::get_canvas_snapshot,
            commands::open_image,
            commands::save_image,
            commands::copy_image,
            commands::paste_image,
            commands::share_image,
            commands::reset_canvas,
        ])
        .setup(|app| {
            #[cfg(debug_assertions)]
            {
                if let Some(window) = app.get_webview_window("main") {
                    window.open_devtools();
                }
            }
            #[cfg(not(debug_assertions))]
            let _ = app;
            Ok(())
        })
        .run(tauri::generate_context!());

    if let Err(err) = result {
        tracing::error!("Error while running tauri application: {}", err);
    }
}
