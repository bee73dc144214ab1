//! File types offered by the open/save pickers and the blob payload hosts exchange

use serde::{Deserialize, Serialize};

/// Image formats the canvas can be saved as
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum ImageFileType {
    #[default]
    Png,
    Jpeg,
}

impl ImageFileType {
    pub const ALL: [ImageFileType; 2] = [ImageFileType::Png, ImageFileType::Jpeg];

    pub fn mime_type(&self) -> &'static str {
        match self {
            ImageFileType::Png => "image/png",
            ImageFileType::Jpeg => "image/jpeg",
        }
    }

    /// Accepted extensions, leading dot included, preferred first
    pub fn extensions(&self) -> &'static [&'static str] {
        match self {
            ImageFileType::Png => &[".png"],
            ImageFileType::Jpeg => &[".jpg", ".jpeg"],
        }
    }

    pub fn description(&self) -> &'static str {
        match self {
            ImageFileType::Png => "PNG files",
            ImageFileType::Jpeg => "JPEG files",
        }
    }

    /// Detect type from a file name or path, ignoring case
    pub fn from_path(path: &str) -> Option<Self> {
        let lower = path.to_lowercase();
        Self::ALL
            .into_iter()
            .find(|t| t.extensions().iter().any(|ext| lower.ends_with(ext)))
    }

    pub fn from_mime(mime: &str) -> Option<Self> {
        Self::ALL
            .into_iter()
            .find(|t| t.mime_type().eq_ignore_ascii_case(mime.trim()))
    }

    pub(crate) fn image_format(&self) -> image::ImageFormat {
        match self {
            ImageFileType::Png => image::ImageFormat::Png,
            ImageFileType::Jpeg => image::ImageFormat::Jpeg,
        }
    }
}

/// One entry of a file picker's type list
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FileTypeFilter {
    pub description: String,
    pub mime_type: String,
    pub extensions: Vec<String>,
}

impl From<ImageFileType> for FileTypeFilter {
    fn from(file_type: ImageFileType) -> Self {
        Self {
            description: file_type.description().to_string(),
            mime_type: file_type.mime_type().to_string(),
            extensions: file_type
                .extensions()
                .iter()
                .map(|ext| ext.to_string())
                .collect(),
        }
    }
}

impl FileTypeFilter {
    /// Extensions without the leading dot, as native dialogs expect them
    pub fn bare_extensions(&self) -> Vec<&str> {
        self.extensions
            .iter()
            .map(|ext| ext.trim_start_matches('.'))
            .collect()
    }
}

/// Picker filters for open and save: PNG first, then JPEG
pub fn default_file_filters() -> Vec<FileTypeFilter> {
    ImageFileType::ALL.into_iter().map(FileTypeFilter::from).collect()
}

/// Encoded image bytes tagged with their MIME type
#[derive(Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ImageBlob {
    pub mime_type: String,
    pub data: Vec<u8>,
}

impl ImageBlob {
    pub fn new(mime_type: impl Into<String>, data: Vec<u8>) -> Self {
        Self {
            mime_type: mime_type.into(),
            data,
        }
    }

    pub fn file_type(&self) -> Option<ImageFileType> {
        ImageFileType::from_mime(&self.mime_type)
    }

    pub fn len(&self) -> usize {
        self.data.len()
    }

    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }
}

impl std::fmt::Debug for ImageBlob {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ImageBlob")
            .field("mime_type", &self.mime_type)
            .field("len", &self.data.len())
            .finish()
    }
}

/// File operation errors
#[derive(Debug, thiserror::Error)]
pub enum FileError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Image error: {0}")]
    Image(#[from] image::ImageError),

    #[error("Base64 decode error: {0}")]
    Base64(#[from] base64::DecodeError),

    #[error("Unsupported image type: {0}")]
    UnsupportedType(String),

    #[error("Invalid data URL: {0}")]
    InvalidDataUrl(String),
}

impl From<FileError> for String {
    fn from(e: FileError) -> Self {
        e.to_string()
    }
}
