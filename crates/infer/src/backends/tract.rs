use {
    crate::{
        error::{InferError, Result},
        graph::{Graph, Session},
    },
    base::Tensor,
    std::path::Path,
    tract_core::prelude::{IntoTValue, TVec, TValue, TypedModel, TypedRunnableModel},
};

/// Frozen graph executed by tract.
///
/// Each session clones the typed model, marks the requested nodes as its
/// input and output, and builds its own runnable plan.
#[derive(Debug, Clone)]
pub struct TractGraph {
    model: TypedModel,
}

impl TractGraph {
    pub fn new(model: TypedModel) -> Self {
        Self { model }
    }

    /// Loads a frozen TensorFlow graph (`.pb`).
    ///
    /// `input` names the placeholder the image is fed into and `input_shape`
    /// its full shape, e.g. `[1, 28, 28, 1]`, so the graph can be typed.
    pub fn load_tensorflow(
        path: impl AsRef<Path>,
        input: &str,
        input_shape: &[usize],
    ) -> Result<Self> {
        use tract_tensorflow::prelude::{DatumExt, Framework, InferenceModelExt};

        let path = path.as_ref();
        let load = |e| InferError::Configuration(format!("failed to load {}: {e}", path.display()));
        let mut model = tract_tensorflow::tensorflow()
            .model_for_path(path)
            .map_err(load)?;
        model
            .set_input_names([input])
            .map_err(|e| InferError::GraphBinding(format!("input '{input}': {e}")))?;
        model
            .set_input_fact(0, f32::fact(input_shape.to_vec()).into())
            .map_err(load)?;
        let model = model.into_typed().map_err(load)?;
        base::log_info!(
            "Loaded TensorFlow graph {} ({} nodes)",
            path.display(),
            model.nodes().len()
        );
        Ok(Self { model })
    }

    pub fn model(&self) -> &TypedModel {
        &self.model
    }
}

impl Graph for TractGraph {
    fn backend(&self) -> &str {
        "tract"
    }

    fn contains(&self, key: &str) -> bool {
        self.model.node_by_name(key).is_ok()
    }

    fn session(&self, input: &str, output: &str) -> Result<Box<dyn Session + '_>> {
        let mut model = self.model.clone();
        model
            .set_input_names([input])
            .map_err(|e| InferError::GraphBinding(format!("input '{input}': {e}")))?;
        model
            .set_output_names([output])
            .map_err(|e| InferError::GraphBinding(format!("output '{output}': {e}")))?;
        let plan = model
            .into_runnable()
            .map_err(|e| InferError::Execution(format!("failed to plan graph: {e}")))?;
        Ok(Box::new(TractSession {
            plan,
            input: input.to_string(),
            output: output.to_string(),
        }))
    }
}

struct TractSession {
    plan: TypedRunnableModel<TypedModel>,
    input: String,
    output: String,
}

impl Session for TractSession {
    fn run(&mut self, input: Tensor<f32>) -> Result<Tensor<f32>> {
        let tensor = tract_core::prelude::Tensor::from_shape(&input.shape, &input.data)
            .map_err(|e| InferError::Execution(format!("failed to build input tensor: {e}")))?;
        let inputs: TVec<TValue> = vec![tensor.into_tvalue()].into();
        let outputs = self
            .plan
            .run(inputs)
            .map_err(|e| InferError::Execution(format!("graph run failed: {e}")))?;
        let value = outputs.into_iter().next().ok_or_else(|| {
            InferError::Execution(format!("graph produced no value for '{}'", self.output))
        })?;
        let value = value
            .cast_to::<f32>()
            .map_err(|e| {
                InferError::Execution(format!("output '{}' is not numeric: {e}", self.output))
            })?;
        let data = value
            .as_slice::<f32>()
            .map_err(|e| InferError::Execution(e.to_string()))?
            .to_vec();
        Ok(Tensor::new(value.shape().to_vec(), data)?)
    }

    fn input_name(&self) -> &str {
        &self.input
    }

    fn output_name(&self) -> &str {
        &self.output
    }
}
