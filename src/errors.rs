use thiserror::Error;

use crate::canvas::ColorParseError;
use crate::file::FileError;
use crate::host::HostError;

#[derive(Debug, Error)]
pub enum PaintError {
    #[error("File error: {0}")]
    File(#[from] FileError),

    #[error("Host error: {0}")]
    Host(#[from] HostError),

    #[error("Invalid color: {0}")]
    Color(#[from] ColorParseError),

    #[error("Invalid config: {0}")]
    InvalidConfig(String),
}

impl From<PaintError> for String {
    fn from(e: PaintError) -> Self {
        e.to_string()
    }
}
