use std::fmt;

#[derive(Debug)]
pub enum ImageError {
    UnsupportedFormat(String),
    InvalidImage(String),
    InvalidTensor(String),
    Tensor(base::TensorError),
}

impl fmt::Display for ImageError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ImageError::UnsupportedFormat(msg) => write!(f, "unsupported image format: {msg}"),
            ImageError::InvalidImage(msg) => write!(f, "invalid image: {msg}"),
            ImageError::InvalidTensor(msg) => write!(f, "invalid image tensor: {msg}"),
            ImageError::Tensor(err) => write!(f, "tensor error: {err}"),
        }
    }
}

impl std::error::Error for ImageError {}

impl From<base::TensorError> for ImageError {
    fn from(err: base::TensorError) -> Self {
        ImageError::Tensor(err)
    }
}
