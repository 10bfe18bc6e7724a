use base::{Tensor, TensorError};

#[test]
fn test_tensor_new_valid() {
    let tensor = Tensor::new(vec![2, 3], vec![1.0, 2.0, 3.0, 4.0, 5.0, 6.0]).unwrap();
    assert_eq!(tensor.shape, vec![2, 3]);
    assert_eq!(tensor.ndim(), 2);
    assert_eq!(tensor.len(), 6);
}

#[test]
fn test_tensor_new_shape_mismatch() {
    let result = Tensor::new(vec![2, 3], vec![1.0, 2.0, 3.0]);
    assert_eq!(
        result.unwrap_err(),
        TensorError::ShapeMismatch {
            expected: 6,
            got: 3
        }
    );
}

#[test]
fn test_tensor_new_overflow() {
    let result = Tensor::<f32>::new(vec![usize::MAX, 2], vec![]);
    assert!(matches!(result, Err(TensorError::ShapeOverflow)));
}

#[test]
fn test_expand_dims_adds_batch() {
    let tensor = Tensor::new(vec![2, 2, 1], vec![1u8, 2, 3, 4]).unwrap();
    let batched = tensor.expand_dims(0).unwrap();
    assert_eq!(batched.shape, vec![1, 2, 2, 1]);
    assert_eq!(batched.data, vec![1, 2, 3, 4]);
}

#[test]
fn test_expand_dims_trailing_axis() {
    let tensor = Tensor::new(vec![3], vec![1.0f32, 2.0, 3.0]).unwrap();
    assert_eq!(tensor.expand_dims(1).unwrap().shape, vec![3, 1]);
}

#[test]
fn test_expand_dims_out_of_range() {
    let tensor = Tensor::new(vec![3], vec![1.0f32, 2.0, 3.0]).unwrap();
    assert_eq!(
        tensor.expand_dims(2).unwrap_err(),
        TensorError::InvalidAxis { axis: 2, ndim: 1 }
    );
}

#[test]
fn test_to_f32() {
    let tensor = Tensor::new(vec![2], vec![7u8, 255]).unwrap();
    let converted = tensor.to_f32();
    assert_eq!(converted.shape, vec![2]);
    assert_eq!(converted.data, vec![7.0, 255.0]);
}
