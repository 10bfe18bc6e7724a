#![allow(dead_code)]

use {
    base::Tensor,
    crates_image::ImageEncoder,
    infer::{Graph, InferError, Session, TractGraph},
    std::{
        sync::{
            Arc,
            atomic::{AtomicBool, Ordering},
        },
        time::Duration,
    },
    tract_core::{
        model::SpecialOps,
        prelude::{DatumExt, TypedModel},
    },
};

/// `input` placeholder of the given shape wired straight into an `output` identity node.
pub fn identity_graph(shape: &[usize]) -> Arc<dyn Graph> {
    let mut model = TypedModel::default();
    let source = model
        .add_source("input", f32::fact(shape.to_vec()))
        .unwrap();
    let output = model
        .wire_node("output", tract_core::ops::identity::Identity, &[source])
        .unwrap();
    model.set_output_outlets(&output).unwrap();
    Arc::new(TractGraph::new(model))
}

pub fn gray_png(width: u32, height: u32, pixel: impl Fn(u32, u32) -> u8) -> Vec<u8> {
    let mut buffer = Vec::new();
    let img = crates_image::GrayImage::from_fn(width, height, |x, y| {
        crates_image::Luma([pixel(x, y)])
    });
    crates_image::codecs::png::PngEncoder::new(&mut buffer)
        .write_image(img.as_raw(), width, height, crates_image::ExtendedColorType::L8)
        .unwrap();
    buffer
}

pub fn rgb_png(width: u32, height: u32, color: [u8; 3]) -> Vec<u8> {
    let mut buffer = Vec::new();
    let img = crates_image::RgbImage::from_pixel(width, height, crates_image::Rgb(color));
    crates_image::codecs::png::PngEncoder::new(&mut buffer)
        .write_image(img.as_raw(), width, height, crates_image::ExtendedColorType::Rgb8)
        .unwrap();
    buffer
}

pub fn rgb_jpeg(width: u32, height: u32) -> Vec<u8> {
    let mut buffer = Vec::new();
    let img = crates_image::RgbImage::from_fn(width, height, |x, y| {
        crates_image::Rgb([(x * 8) as u8, (y * 8) as u8, 128])
    });
    crates_image::codecs::jpeg::JpegEncoder::new(&mut buffer)
        .encode_image(&img)
        .unwrap();
    buffer
}

/// Graph whose sessions block for `delay` before echoing their input.
pub struct SlowGraph {
    pub delay: Duration,
    pub finished: Arc<AtomicBool>,
}

impl SlowGraph {
    pub fn new(delay: Duration) -> Self {
        Self {
            delay,
            finished: Arc::new(AtomicBool::new(false)),
        }
    }
}

impl Graph for SlowGraph {
    fn backend(&self) -> &str {
        "slow"
    }

    fn contains(&self, key: &str) -> bool {
        key == "input" || key == "output"
    }

    fn session(&self, _input: &str, _output: &str) -> Result<Box<dyn Session + '_>, InferError> {
        Ok(Box::new(SlowSession { graph: self }))
    }
}

struct SlowSession<'a> {
    graph: &'a SlowGraph,
}

impl Session for SlowSession<'_> {
    fn run(&mut self, input: Tensor<f32>) -> Result<Tensor<f32>, InferError> {
        std::thread::sleep(self.graph.delay);
        self.graph.finished.store(true, Ordering::SeqCst);
        Ok(input)
    }

    fn input_name(&self) -> &str {
        "input"
    }

    fn output_name(&self) -> &str {
        "output"
    }
}

fn varint(out: &mut Vec<u8>, mut value: u64) {
    while value >= 0x80 {
        out.push((value as u8 & 0x7f) | 0x80);
        value >>= 7;
    }
    out.push(value as u8);
}

/// Minimal protobuf writer for hand-built model files.
#[derive(Default)]
pub struct Proto(Vec<u8>);

impl Proto {
    pub fn uint(mut self, field: u64, value: u64) -> Self {
        varint(&mut self.0, field << 3);
        varint(&mut self.0, value);
        self
    }

    pub fn bytes(mut self, field: u64, value: &[u8]) -> Self {
        varint(&mut self.0, (field << 3) | 2);
        varint(&mut self.0, value.len() as u64);
        self.0.extend_from_slice(value);
        self
    }

    pub fn string(self, field: u64, value: &str) -> Self {
        self.bytes(field, value.as_bytes())
    }

    pub fn message(self, field: u64, value: Proto) -> Self {
        self.bytes(field, &value.0)
    }

    pub fn finish(self) -> Vec<u8> {
        self.0
    }
}

// TensorFlow NodeDef attr entry holding a float dtype
fn tf_float_attr(name: &str) -> Proto {
    Proto::default()
        .string(1, name)
        .message(2, Proto::default().uint(6, 1))
}

/// Frozen TensorFlow GraphDef: float `input` placeholder feeding an `output` identity.
pub fn tensorflow_identity_pb() -> Vec<u8> {
    let placeholder = Proto::default()
        .string(1, "input")
        .string(2, "Placeholder")
        .message(5, tf_float_attr("dtype"));
    let identity = Proto::default()
        .string(1, "output")
        .string(2, "Identity")
        .string(3, "input")
        .message(5, tf_float_attr("T"));
    Proto::default()
        .message(1, placeholder)
        .message(1, identity)
        .finish()
}

// ONNX ValueInfoProto for a float tensor of fixed shape
fn onnx_value_info(name: &str, shape: &[u64]) -> Proto {
    let dims = shape.iter().fold(Proto::default(), |dims, &d| {
        dims.message(1, Proto::default().uint(1, d))
    });
    let tensor_type = Proto::default().uint(1, 1).message(2, dims);
    Proto::default()
        .string(1, name)
        .message(2, Proto::default().message(1, tensor_type))
}

/// ONNX model (opset 13): `input` → Identity → `output`.
pub fn onnx_identity_model(shape: &[u64]) -> Vec<u8> {
    let node = Proto::default()
        .string(1, "input")
        .string(2, "output")
        .string(4, "Identity");
    let graph = Proto::default()
        .message(1, node)
        .string(2, "identity")
        .message(11, onnx_value_info("input", shape))
        .message(12, onnx_value_info("output", shape));
    Proto::default()
        .uint(1, 8)
        .message(7, graph)
        .message(8, Proto::default().string(1, "").uint(2, 13))
        .finish()
}

/// Writes `bytes` to a per-process temp file and returns its path.
pub fn temp_file(name: &str, bytes: &[u8]) -> std::path::PathBuf {
    let path = std::env::temp_dir().join(format!("infer-test-{}-{name}", std::process::id()));
    std::fs::write(&path, bytes).unwrap();
    path
}
