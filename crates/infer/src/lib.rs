//! Image classification against frozen computation graphs.
//!
//! A [`Model`] names the graph node an image is fed into and the node the
//! scores are read from. Calls decode the image, resample it to the input
//! layer's size, run the graph in a fresh session and rank the scores.

pub mod backends;
pub mod config;
pub mod engine;
pub mod error;
pub mod graph;
pub mod model;
mod pipeline;
pub mod prediction;

pub use backends::TractGraph;
#[cfg(feature = "onnx")]
pub use backends::OrtGraph;
pub use config::ModelConfig;
pub use error::{InferError, Result};
pub use graph::{Graph, Session};
pub use image::{Channels, EncodedImage, ImageFormat};
pub use model::{ImageOptions, Layer, Model, ModelBuilder, Shape};
pub use prediction::{Class, Prediction, Predictions, rank};
