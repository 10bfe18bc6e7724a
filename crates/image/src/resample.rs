use {crate::*, base::Tensor};

/// Normalized crop box in `[y0, x0, y1, x1]` order.
///
/// Coordinates map `0.0` to the first pixel center and `1.0` to the last one,
/// so `FULL` samples the whole image without cropping.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CropBox {
    pub y0: f32,
    pub x0: f32,
    pub y1: f32,
    pub x1: f32,
}

impl CropBox {
    pub const FULL: CropBox = CropBox {
        y0: 0.0,
        x0: 0.0,
        y1: 1.0,
        x1: 1.0,
    };
}

// Bound tolerance for rounding in the sample coordinate.
const EDGE_EPSILON: f64 = 1e-6;

/// Where a single output row/column samples from the source.
#[derive(Clone, Copy)]
enum Sample {
    Outside,
    Inside { low: usize, high: usize, lerp: f32 },
}

fn sample_axis(start: f32, end: f32, source_len: usize, crop_len: usize, index: usize) -> Sample {
    let last = (source_len - 1) as f64;
    let position = if crop_len > 1 {
        let scale = (end - start) as f64 * last / (crop_len - 1) as f64;
        start as f64 * last + index as f64 * scale
    } else {
        0.5 * (start + end) as f64 * last
    };
    if position < -EDGE_EPSILON || position > last + EDGE_EPSILON {
        return Sample::Outside;
    }
    let position = position.clamp(0.0, last);
    let low = position.floor() as usize;
    let high = (position.ceil() as usize).min(source_len - 1);
    Sample::Inside {
        low,
        high,
        lerp: (position - low as f64) as f32,
    }
}

/// Bilinear crop-and-resize of one box out of a `[batch, height, width, channels]` tensor.
///
/// Samples falling outside the source take `extrapolation`. Output shape is
/// `[1, crop_height, crop_width, channels]`.
pub fn crop_and_resize(
    images: &Tensor<f32>,
    crop_box: CropBox,
    box_index: usize,
    crop_height: usize,
    crop_width: usize,
    extrapolation: f32,
) -> Result<Tensor<f32>, ImageError> {
    let [batch, height, width, depth] = match images.shape.as_slice() {
        &[b, h, w, c] => [b, h, w, c],
        other => {
            return Err(ImageError::InvalidTensor(format!(
                "expected [batch, height, width, channels], got {other:?}"
            )));
        }
    };
    Channels::from_count(depth)?;
    if box_index >= batch {
        return Err(ImageError::InvalidTensor(format!(
            "box index {box_index} out of range for batch of {batch}"
        )));
    }
    if height == 0 || width == 0 {
        return Err(ImageError::InvalidTensor("image has no pixels".to_string()));
    }
    if crop_height == 0 || crop_width == 0 {
        return Err(ImageError::InvalidTensor(format!(
            "crop size must be positive, got {crop_height}x{crop_width}"
        )));
    }
    let output_len = crop_height
        .checked_mul(crop_width)
        .and_then(|n| n.checked_mul(depth))
        .filter(|&n| n.checked_mul(size_of::<f32>()).is_some_and(|b| b <= isize::MAX as usize))
        .ok_or_else(|| {
            ImageError::InvalidTensor(format!(
                "crop size {crop_height}x{crop_width}x{depth} is too large"
            ))
        })?;

    let image = &images.data[box_index * height * width * depth..][..height * width * depth];
    let pixel = |y: usize, x: usize, c: usize| image[(y * width + x) * depth + c];

    let columns: Vec<Sample> = (0..crop_width)
        .map(|x| sample_axis(crop_box.x0, crop_box.x1, width, crop_width, x))
        .collect();

    let mut output = Vec::with_capacity(output_len);
    for y in 0..crop_height {
        let (top, bottom, y_lerp) =
            match sample_axis(crop_box.y0, crop_box.y1, height, crop_height, y) {
                Sample::Inside { low, high, lerp } => (low, high, lerp),
                Sample::Outside => {
                    output.extend(std::iter::repeat_n(extrapolation, crop_width * depth));
                    continue;
                }
            };
        for column in &columns {
            let (left, right, x_lerp) = match *column {
                Sample::Inside { low, high, lerp } => (low, high, lerp),
                Sample::Outside => {
                    output.extend(std::iter::repeat_n(extrapolation, depth));
                    continue;
                }
            };
            for c in 0..depth {
                let top_left = pixel(top, left, c);
                let top_right = pixel(top, right, c);
                let bottom_left = pixel(bottom, left, c);
                let bottom_right = pixel(bottom, right, c);
                let top_value = top_left + (top_right - top_left) * x_lerp;
                let bottom_value = bottom_left + (bottom_right - bottom_left) * x_lerp;
                output.push(top_value + (bottom_value - top_value) * y_lerp);
            }
        }
    }

    Ok(Tensor::new(vec![1, crop_height, crop_width, depth], output)?)
}

/// Decodes pixels into an HWC `u8` tensor with the requested channel count.
pub fn decode_pixels(encoded: &EncodedImage, channels: Channels) -> Result<Tensor<u8>, ImageError> {
    let image = crates_image::load_from_memory_with_format(
        &encoded.bytes,
        encoded.format.as_crates_image(),
    )
    .map_err(|e| ImageError::InvalidImage(format!("failed to decode {}: {e}", encoded.format)))?;

    let (width, height, data) = match channels {
        Channels::Gray => {
            let buf = image.to_luma8();
            let (w, h) = buf.dimensions();
            (w, h, buf.into_raw())
        }
        Channels::Rgb => {
            let buf = image.to_rgb8();
            let (w, h) = buf.dimensions();
            (w, h, buf.into_raw())
        }
    };
    Ok(Tensor::new(
        vec![height as usize, width as usize, channels.count()],
        data,
    )?)
}

/// Decodes, batches and bilinearly resizes an encoded image.
///
/// `target` is `(height, width)`; `None` keeps the decoded size. The result
/// has shape `[1, height, width, channels]` with values in `0.0..=255.0`.
pub fn resample(
    encoded: &EncodedImage,
    target: Option<(usize, usize)>,
    channels: Channels,
) -> Result<Tensor<f32>, ImageError> {
    let pixels = decode_pixels(encoded, channels)?;
    let (height, width) = target.unwrap_or((pixels.shape[0], pixels.shape[1]));
    let batched = pixels.to_f32().expand_dims(0)?;
    crop_and_resize(&batched, CropBox::FULL, 0, height, width, 0.0)
}
