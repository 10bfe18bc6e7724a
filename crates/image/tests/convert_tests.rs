use base::Tensor;
use image::{ImageError, tensor_to_image};

#[test]
fn test_rank_one_tensor_is_rejected() {
    let tensor = Tensor::new(vec![1], vec![0.0]).unwrap();
    assert!(matches!(tensor_to_image(&tensor), Err(ImageError::InvalidTensor(_))));
}

#[test]
fn test_two_channels_are_rejected() {
    let tensor = Tensor::new(vec![1, 1, 2], vec![0.0, 0.0]).unwrap();
    assert!(matches!(tensor_to_image(&tensor), Err(ImageError::InvalidTensor(_))));
}

#[test]
fn test_gray_tensor() {
    let tensor = Tensor::new(vec![2, 1, 1], vec![12.0, 300.0]).unwrap();
    let image = tensor_to_image(&tensor).unwrap().to_luma8();
    assert_eq!(image.dimensions(), (1, 2));
    assert_eq!(image.as_raw(), &vec![12, 255]);
}

#[test]
fn test_batched_rgb_tensor_uses_first_entry() {
    let tensor = Tensor::new(
        vec![2, 1, 1, 3],
        vec![1.0, 2.0, 3.0, 9.0, 9.0, 9.0],
    )
    .unwrap();
    let image = tensor_to_image(&tensor).unwrap().to_rgb8();
    assert_eq!(image.dimensions(), (1, 1));
    assert_eq!(image.as_raw(), &vec![1, 2, 3]);
}

#[test]
fn test_negative_values_clamp_to_zero() {
    let tensor = Tensor::new(vec![1, 1, 1], vec![-4.5]).unwrap();
    let image = tensor_to_image(&tensor).unwrap().to_luma8();
    assert_eq!(image.as_raw(), &vec![0]);
}
