use {crate::*, std::io::Read};

/// An image still in its original encoding, tagged with the sniffed format.
///
/// The bytes are kept exactly as read so the pixel decoder sees the original
/// encoding rather than a re-serialized form.
#[derive(Debug, Clone, PartialEq)]
pub struct EncodedImage {
    pub bytes: Vec<u8>,
    pub format: ImageFormat,
}

impl EncodedImage {
    pub fn from_bytes(bytes: Vec<u8>) -> Result<Self, ImageError> {
        let format = ImageFormat::sniff(&bytes)?;
        Ok(Self { bytes, format })
    }

    pub fn len(&self) -> usize {
        self.bytes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bytes.is_empty()
    }
}

/// Reads the whole stream once and detects its format.
///
/// # Errors
///
/// Returns `ImageError::InvalidImage` if the stream cannot be read and
/// `ImageError::UnsupportedFormat` if the content is neither PNG nor JPEG.
pub fn decode<R: Read>(mut reader: R) -> Result<EncodedImage, ImageError> {
    let mut bytes = Vec::new();
    reader
        .read_to_end(&mut bytes)
        .map_err(|e| ImageError::InvalidImage(format!("failed to read image stream: {e}")))?;
    EncodedImage::from_bytes(bytes)
}
