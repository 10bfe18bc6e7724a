use std::fmt;

#[derive(Debug)]
pub enum InferError {
    Configuration(String),
    UnsupportedFormat(String),
    InvalidImage(String),
    GraphBinding(String),
    Execution(String),
    Cancelled,
}

pub type Result<T> = std::result::Result<T, InferError>;

impl InferError {
    /// True when the caller stopped waiting, as opposed to the input or graph being bad.
    pub fn is_cancelled(&self) -> bool {
        matches!(self, InferError::Cancelled)
    }
}

impl fmt::Display for InferError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            InferError::Configuration(msg) => write!(f, "configuration error: {msg}"),
            InferError::UnsupportedFormat(msg) => write!(f, "unsupported format: {msg}"),
            InferError::InvalidImage(msg) => write!(f, "invalid image: {msg}"),
            InferError::GraphBinding(msg) => write!(f, "graph binding error: {msg}"),
            InferError::Execution(msg) => write!(f, "execution error: {msg}"),
            InferError::Cancelled => write!(f, "inference cancelled before completion"),
        }
    }
}

impl std::error::Error for InferError {}

impl From<image::ImageError> for InferError {
    fn from(err: image::ImageError) -> Self {
        match err {
            image::ImageError::UnsupportedFormat(msg) => InferError::UnsupportedFormat(msg),
            image::ImageError::InvalidImage(msg) | image::ImageError::InvalidTensor(msg) => {
                InferError::InvalidImage(msg)
            }
            image::ImageError::Tensor(err) => InferError::InvalidImage(err.to_string()),
        }
    }
}

impl From<base::TensorError> for InferError {
    fn from(err: base::TensorError) -> Self {
        InferError::Execution(err.to_string())
    }
}

impl From<serde_json::Error> for InferError {
    fn from(err: serde_json::Error) -> Self {
        InferError::Configuration(err.to_string())
    }
}
