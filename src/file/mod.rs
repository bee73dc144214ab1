//! File format support module
//!
//! PNG and JPEG encode/decode for the open, save, copy, paste and share flows,
//! plus the picker filter lists offered to native dialogs.

mod codec;
pub mod types;

pub use codec::{decode_image, encode_image};
pub use types::*;
