pub const APP_NAME: &str = "Pixel Paint";
pub const APP_CONFIG_DIR_NAME: &str = "pixel-paint";
pub const APP_CONFIG_FILE_NAME: &str = "config.json";
