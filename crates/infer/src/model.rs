use {
    crate::{
        error::{InferError, Result},
        graph::Graph,
    },
    image::Channels,
    serde::{Deserialize, Serialize},
    std::{fmt, sync::Arc},
};

/// Shape a layer expects.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Shape {
    /// Resize target in pixels.
    Spatial { height: usize, width: usize },
    /// No resize; images are fed at their decoded size.
    #[default]
    Open,
}

impl Shape {
    pub fn spatial(&self) -> Option<(usize, usize)> {
        match *self {
            Shape::Spatial { height, width } => Some((height, width)),
            Shape::Open => None,
        }
    }
}

/// A named node of the graph plus the shape it expects.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Layer {
    pub key: String,
    #[serde(default)]
    pub dimensions: Shape,
}

impl Layer {
    pub fn spatial(key: impl Into<String>, height: usize, width: usize) -> Self {
        Self {
            key: key.into(),
            dimensions: Shape::Spatial { height, width },
        }
    }

    pub fn open(key: impl Into<String>) -> Self {
        Self {
            key: key.into(),
            dimensions: Shape::Open,
        }
    }
}

/// Options applied while turning an encoded image into the input tensor.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ImageOptions {
    #[serde(default)]
    pub is_gray: bool,
}

impl ImageOptions {
    pub fn with_gray(mut self, is_gray: bool) -> Self {
        self.is_gray = is_gray;
        self
    }

    pub fn channels(&self) -> Channels {
        if self.is_gray {
            Channels::Gray
        } else {
            Channels::Rgb
        }
    }
}

/// Immutable description of how images enter and predictions leave a graph.
///
/// Cloning is cheap; clones share the graph and labels.
#[derive(Clone)]
pub struct Model {
    graph: Arc<dyn Graph>,
    input: Layer,
    output: Layer,
    classes: Option<Arc<[String]>>,
}

impl Model {
    pub fn builder(graph: Arc<dyn Graph>) -> ModelBuilder {
        ModelBuilder {
            graph,
            input: None,
            output: None,
            classes: None,
        }
    }

    pub fn graph(&self) -> &dyn Graph {
        self.graph.as_ref()
    }

    pub fn input(&self) -> &Layer {
        &self.input
    }

    pub fn output(&self) -> &Layer {
        &self.output
    }

    pub fn classes(&self) -> Option<&[String]> {
        self.classes.as_deref()
    }
}

impl fmt::Debug for Model {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Model")
            .field("backend", &self.graph.backend())
            .field("input", &self.input)
            .field("output", &self.output)
            .field("classes", &self.classes.as_ref().map(|c| c.len()))
            .finish()
    }
}

pub struct ModelBuilder {
    graph: Arc<dyn Graph>,
    input: Option<Layer>,
    output: Option<Layer>,
    classes: Option<Vec<String>>,
}

impl ModelBuilder {
    pub fn with_input(mut self, input: Layer) -> Self {
        self.input = Some(input);
        self
    }

    pub fn with_output(mut self, output: Layer) -> Self {
        self.output = Some(output);
        self
    }

    pub fn with_classes<I, S>(mut self, classes: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.classes = Some(classes.into_iter().map(Into::into).collect());
        self
    }

    /// Validates the descriptor.
    ///
    /// Only presence and non-empty keys are checked; whether the keys exist in
    /// the graph is discovered when a call binds them.
    pub fn build(self) -> Result<Model> {
        let (Some(input), Some(output)) = (self.input, self.output) else {
            return Err(InferError::Configuration(
                "a valid input and output layer is required".to_string(),
            ));
        };
        if input.key.is_empty() || output.key.is_empty() {
            return Err(InferError::Configuration(
                "input and output layers need non-empty keys".to_string(),
            ));
        }
        Ok(Model {
            graph: self.graph,
            input,
            output,
            classes: self.classes.map(Arc::from),
        })
    }
}
