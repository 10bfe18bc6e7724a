use {
    crate::*,
    base::Tensor,
    crates_image::{DynamicImage, GrayImage, RgbImage},
};

/// Converts an `[h, w, c]` or `[1, h, w, c]` float tensor back into an 8-bit image.
///
/// Values are clamped into `0..=255`. A 4-D tensor contributes only its first
/// batch entry.
pub fn tensor_to_image(tensor: &Tensor<f32>) -> Result<DynamicImage, ImageError> {
    let (height, width, depth, data) = match tensor.shape.as_slice() {
        &[h, w, c] => (h, w, c, &tensor.data[..]),
        &[b, h, w, c] if b > 0 => (h, w, c, &tensor.data[..h * w * c]),
        other => {
            return Err(ImageError::InvalidTensor(format!(
                "expected [h, w, c] or a non-empty [b, h, w, c], got {other:?}"
            )));
        }
    };
    let channels = Channels::from_count(depth)?;
    let pixels: Vec<u8> = data.iter().map(|&v| v.clamp(0.0, 255.0) as u8).collect();
    let (width, height) = (width as u32, height as u32);

    let image = match channels {
        Channels::Gray => GrayImage::from_raw(width, height, pixels).map(DynamicImage::ImageLuma8),
        Channels::Rgb => RgbImage::from_raw(width, height, pixels).map(DynamicImage::ImageRgb8),
    };
    image.ok_or_else(|| ImageError::InvalidTensor("pixel buffer too small".to_string()))
}
