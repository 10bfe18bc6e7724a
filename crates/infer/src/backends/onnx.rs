use {
    crate::{
        error::{InferError, Result},
        graph::{Graph, Session},
    },
    base::Tensor,
    ndarray::{ArrayD, IxDyn},
    ort::{inputs, session::Session as OrtSession},
    std::path::Path,
};

fn commit(bytes: &[u8]) -> Result<OrtSession> {
    OrtSession::builder()
        .map_err(|e| InferError::Execution(format!("failed to create session builder: {e}")))?
        .commit_from_memory(bytes)
        .map_err(|e| InferError::Execution(format!("failed to load model: {e}")))
}

/// Frozen ONNX graph executed by ONNX Runtime.
///
/// Only graph inputs and outputs are addressable. The serialized model is
/// kept so every call can commit its own session.
pub struct OrtGraph {
    bytes: Vec<u8>,
    input_names: Vec<String>,
    output_names: Vec<String>,
}

impl OrtGraph {
    pub fn from_memory(bytes: Vec<u8>) -> Result<Self> {
        let session = commit(&bytes)?;
        let input_names = session.inputs.iter().map(|i| i.name.clone()).collect();
        let output_names = session.outputs.iter().map(|o| o.name.clone()).collect();
        Ok(Self {
            bytes,
            input_names,
            output_names,
        })
    }

    pub fn from_file(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let bytes = std::fs::read(path).map_err(|e| {
            InferError::Configuration(format!("failed to read {}: {e}", path.display()))
        })?;
        Self::from_memory(bytes)
    }

    pub fn input_names(&self) -> &[String] {
        &self.input_names
    }

    pub fn output_names(&self) -> &[String] {
        &self.output_names
    }
}

impl Graph for OrtGraph {
    fn backend(&self) -> &str {
        "onnxruntime"
    }

    fn contains(&self, key: &str) -> bool {
        self.input_names.iter().chain(&self.output_names).any(|n| n == key)
    }

    fn session(&self, input: &str, output: &str) -> Result<Box<dyn Session + '_>> {
        if !self.input_names.iter().any(|n| n == input) {
            return Err(InferError::GraphBinding(format!(
                "'{input}' is not a graph input, expected one of {:?}",
                self.input_names
            )));
        }
        if !self.output_names.iter().any(|n| n == output) {
            return Err(InferError::GraphBinding(format!(
                "'{output}' is not a graph output, expected one of {:?}",
                self.output_names
            )));
        }
        Ok(Box::new(OrtRun {
            session: commit(&self.bytes)?,
            input: input.to_string(),
            output: output.to_string(),
        }))
    }
}

struct OrtRun {
    session: OrtSession,
    input: String,
    output: String,
}

impl Session for OrtRun {
    fn run(&mut self, input: Tensor<f32>) -> Result<Tensor<f32>> {
        let array = ArrayD::from_shape_vec(IxDyn(&input.shape), input.data)
            .map_err(|e| InferError::Execution(format!("failed to create ndarray: {e}")))?;
        let value = ort::value::Tensor::from_array(array)
            .map_err(|e| InferError::Execution(format!("failed to create input tensor: {e}")))?;
        let outputs = self
            .session
            .run(inputs![self.input.as_str() => value])
            .map_err(|e| InferError::Execution(format!("inference failed: {e}")))?;
        let array = outputs[self.output.as_str()]
            .try_extract_array::<f32>()
            .map_err(|e| {
                InferError::Execution(format!("output '{}' is not f32: {e}", self.output))
            })?;
        Ok(Tensor::new(array.shape().to_vec(), array.iter().copied().collect())?)
    }

    fn input_name(&self) -> &str {
        &self.input
    }

    fn output_name(&self) -> &str {
        &self.output
    }
}
