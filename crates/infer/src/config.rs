use {
    crate::{
        error::{InferError, Result},
        graph::Graph,
        model::{ImageOptions, Layer, Model, ModelBuilder, Shape},
    },
    serde::{Deserialize, Serialize},
    std::{
        path::{Path, PathBuf},
        sync::Arc,
    },
};

/// JSON descriptor for a model, e.g.
///
/// ```json
/// {
///   "input": { "key": "input", "dimensions": { "spatial": { "height": 299, "width": 299 } } },
///   "output": { "key": "InceptionV3/Predictions/Softmax" },
///   "labels": "labels.txt",
///   "options": { "is_gray": false }
/// }
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ModelConfig {
    pub input: Layer,
    pub output: Layer,
    #[serde(default)]
    pub labels: Option<PathBuf>,
    #[serde(default)]
    pub options: ImageOptions,
}

impl ModelConfig {
    pub fn from_json(text: &str) -> Result<Self> {
        Ok(serde_json::from_str(text)?)
    }

    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let text = std::fs::read_to_string(path).map_err(|e| {
            InferError::Configuration(format!("failed to read {}: {e}", path.display()))
        })?;
        Self::from_json(&text)
    }

    /// Full NHWC shape of the input placeholder, when the input is spatial.
    pub fn input_shape(&self) -> Option<Vec<usize>> {
        match self.input.dimensions {
            Shape::Spatial { height, width } => {
                Some(vec![1, height, width, self.options.channels().count()])
            }
            Shape::Open => None,
        }
    }

    pub fn builder(&self, graph: Arc<dyn Graph>) -> ModelBuilder {
        Model::builder(graph)
            .with_input(self.input.clone())
            .with_output(self.output.clone())
    }
}
