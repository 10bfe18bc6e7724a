mod tract;
pub use tract::TractGraph;

#[cfg(feature = "onnx")]
mod onnx;
#[cfg(feature = "onnx")]
pub use onnx::OrtGraph;
