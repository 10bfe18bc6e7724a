use {crate::error::Result, base::Tensor};

/// A loaded, frozen computation graph.
///
/// The graph itself is immutable and shared between calls; every call asks
/// for its own [`Session`] so no bound tensors are ever visible across calls.
pub trait Graph: Send + Sync {
    fn backend(&self) -> &str;

    /// Whether a node with this name exists.
    fn contains(&self, key: &str) -> bool;

    /// Creates a fresh execution context feeding `input` and reading `output`.
    fn session(&self, input: &str, output: &str) -> Result<Box<dyn Session + '_>>;
}

/// Per-call execution context. Dropping it releases everything it holds.
pub trait Session {
    fn run(&mut self, input: Tensor<f32>) -> Result<Tensor<f32>>;
    fn input_name(&self) -> &str;
    fn output_name(&self) -> &str;
}
