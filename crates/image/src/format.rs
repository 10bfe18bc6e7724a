use {
    crate::*,
    serde::{Deserialize, Serialize},
};

/// Encodings the pipeline can decode.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ImageFormat {
    Png,
    Jpeg,
}

impl ImageFormat {
    /// Detects the encoding from the leading magic bytes.
    pub fn sniff(data: &[u8]) -> Result<Self, ImageError> {
        match crates_image::guess_format(data) {
            Ok(crates_image::ImageFormat::Png) => Ok(ImageFormat::Png),
            Ok(crates_image::ImageFormat::Jpeg) => Ok(ImageFormat::Jpeg),
            Ok(other) => Err(ImageError::UnsupportedFormat(format!("{other:?}"))),
            Err(_) => Err(ImageError::UnsupportedFormat(
                "unrecognized image signature".to_string(),
            )),
        }
    }

    pub(crate) fn as_crates_image(self) -> crates_image::ImageFormat {
        match self {
            ImageFormat::Png => crates_image::ImageFormat::Png,
            ImageFormat::Jpeg => crates_image::ImageFormat::Jpeg,
        }
    }
}

impl std::fmt::Display for ImageFormat {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ImageFormat::Png => write!(f, "png"),
            ImageFormat::Jpeg => write!(f, "jpeg"),
        }
    }
}

/// Number of color channels an image is decoded into.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Channels {
    Gray,
    Rgb,
}

impl Channels {
    pub fn count(self) -> usize {
        match self {
            Channels::Gray => 1,
            Channels::Rgb => 3,
        }
    }

    pub fn from_count(count: usize) -> Result<Self, ImageError> {
        match count {
            1 => Ok(Channels::Gray),
            3 => Ok(Channels::Rgb),
            other => Err(ImageError::InvalidTensor(format!(
                "expected 1 or 3 channels, got {other}"
            ))),
        }
    }
}
