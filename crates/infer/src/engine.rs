use {
    crate::{
        error::{InferError, Result},
        model::Model,
    },
    base::Tensor,
};

/// Feeds `pixels` to the model's input node and returns its output node's value.
///
/// Both keys are resolved against the graph here, at call time. The session
/// lives only for this call and is dropped on every path.
pub fn run(model: &Model, pixels: Tensor<f32>) -> Result<Tensor<f32>> {
    let graph = model.graph();
    for key in [&model.input().key, &model.output().key] {
        if !graph.contains(key) {
            return Err(InferError::GraphBinding(format!(
                "node '{key}' not found in {} graph",
                graph.backend()
            )));
        }
    }

    let mut session = graph.session(&model.input().key, &model.output().key)?;
    base::log_debug!(
        "Running {} graph: {} {:?} -> {}",
        graph.backend(),
        session.input_name(),
        pixels.shape,
        session.output_name()
    );
    let output = session.run(pixels)?;
    base::log_debug!("Output {} has shape {:?}", session.output_name(), output.shape);
    Ok(output)
}
