//! Image blob encoding and decoding

use base64::{engine::general_purpose::STANDARD as BASE64, Engine};
use image::{DynamicImage, RgbaImage};
use std::io::Cursor;

use super::types::{FileError, ImageBlob, ImageFileType};

/// Browser default quality for `image/jpeg` exports
const JPEG_QUALITY: u8 = 92;

/// Encode canvas pixels into a blob of the requested type.
///
/// JPEG has no alpha channel, so alpha is dropped before encoding.
pub fn encode_image(image: &RgbaImage, file_type: ImageFileType) -> Result<ImageBlob, FileError> {
    let mut data = Vec::new();

    match file_type {
        ImageFileType::Png => {
            image.write_to(&mut Cursor::new(&mut data), file_type.image_format())?;
        }
        ImageFileType::Jpeg => {
            let rgb = DynamicImage::ImageRgba8(image.clone()).to_rgb8();
            let mut encoder =
                image::codecs::jpeg::JpegEncoder::new_with_quality(&mut data, JPEG_QUALITY);
            encoder.encode_image(&rgb)?;
        }
    }

    tracing::debug!(
        "Encoded {}x{} image as {} ({} bytes)",
        image.width(),
        image.height(),
        file_type.mime_type(),
        data.len()
    );

    Ok(ImageBlob::new(file_type.mime_type(), data))
}

/// Decode any supported image payload. The format is sniffed from the bytes,
/// so a misnamed file still opens.
pub fn decode_image(bytes: &[u8]) -> Result<RgbaImage, FileError> {
    let format = image::guess_format(bytes)?;
    if !ImageFileType::ALL.iter().any(|t| t.image_format() == format) {
        return Err(FileError::UnsupportedType(format!("{:?}", format)));
    }

    let decoded = image::load_from_memory_with_format(bytes, format)?;
    Ok(decoded.to_rgba8())
}

impl ImageBlob {
    /// `data:<mime>;base64,<payload>`
    pub fn to_data_url(&self) -> String {
        format!("data:{};base64,{}", self.mime_type, BASE64.encode(&self.data))
    }

    pub fn from_data_url(url: &str) -> Result<Self, FileError> {
        let rest = url
            .strip_prefix("data:")
            .ok_or_else(|| FileError::InvalidDataUrl("missing data: scheme".into()))?;
        let (header, payload) = rest
            .split_once(',')
            .ok_or_else(|| FileError::InvalidDataUrl("missing payload separator".into()))?;
        let mime_type = header
            .strip_suffix(";base64")
            .ok_or_else(|| FileError::InvalidDataUrl("payload is not base64".into()))?;

        Ok(Self::new(mime_type, BASE64.decode(payload)?))
    }

    /// Decode the blob into pixels
    pub fn decode(&self) -> Result<RgbaImage, FileError> {
        decode_image(&self.data)
    }
}
