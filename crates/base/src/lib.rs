pub mod log;
pub use log::*;

mod tensor;
pub use tensor::*;
