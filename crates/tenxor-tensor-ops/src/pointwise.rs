use tenxor_tensor::{
    position::next_position,
    shape::{broadcast, numel},
    Tensor, TensorLike,
};

use crate::error::TensorOpsError;

/// Combine two tensors element by element after broadcasting their shapes.
///
/// The shapes are aligned from the right and every size-1 dimension of an operand is
/// repeated along the matching dimension of the result. For each result position, in
/// row-major order, `combine` receives the element of `a` and the element of `b` that map to
/// it.
///
/// # Arguments
///
/// * `a` - Left-hand side tensor.
/// * `b` - Right-hand side tensor.
/// * `combine` - The function computing a result element from a pair of input elements.
///
/// # Returns
///
/// A new `Tensor` with the broadcast shape.
///
/// # Errors
///
/// If the shapes cannot be broadcast together, the broadcast error naming the offending
/// dimension is returned.
///
/// # Example
///
/// ```
/// use tenxor_tensor::{Tensor, TensorLike};
/// use tenxor_tensor_ops::pointwise::pointwise;
///
/// let a = Tensor::from_shape_vec(&[3, 1], vec![1.0, 2.0, 3.0]).unwrap();
/// let b = Tensor::from_shape_vec(&[1, 4], vec![10.0, 20.0, 30.0, 40.0]).unwrap();
///
/// let c = pointwise(&a, &b, |x, y| x + y).unwrap();
/// assert_eq!(c.shape(), &[3, 4]);
/// assert_eq!(c.get(&[2, 1]), Ok(&23.0));
/// ```
pub fn pointwise<A, B, C, X, Y, F>(a: &X, b: &Y, mut combine: F) -> Result<Tensor<C>, TensorOpsError>
where
    X: TensorLike<A>,
    Y: TensorLike<B>,
    F: FnMut(&A, &B) -> C,
{
    let (a_shape, b_shape, out_shape) = broadcast(a.shape(), b.shape())?;
    let a_view = a.view(&a_shape)?;
    let b_view = b.view(&b_shape)?;

    log::debug!(
        "pointwise {:?} x {:?} broadcast as {:?} x {:?} into {:?}",
        a.shape(),
        b.shape(),
        a_shape,
        b_shape,
        out_shape
    );

    // the walk is row-major, so results are produced in flat buffer order
    let mut data = Vec::with_capacity(numel(&out_shape));
    let mut out_pos = vec![0; out_shape.len()];
    let mut a_pos = vec![0; out_shape.len()];
    let mut b_pos = vec![0; out_shape.len()];
    loop {
        for (k, &p) in out_pos.iter().enumerate() {
            a_pos[k] = if a_shape[k] == 1 { 0 } else { p };
            b_pos[k] = if b_shape[k] == 1 { 0 } else { p };
        }
        data.push(combine(a_view.get(&a_pos)?, b_view.get(&b_pos)?));

        if !next_position(&mut out_pos, &out_shape) {
            break;
        }
    }

    Ok(Tensor::from_shape_vec(&out_shape, data)?)
}

/// Add two tensors element-wise with broadcasting.
///
/// # Example
///
/// ```
/// use tenxor_tensor::Tensor;
/// use tenxor_tensor_ops::pointwise::add;
///
/// let a = Tensor::from_shape_vec(&[2, 2], vec![1, 2, 3, 4]).unwrap();
/// let b = Tensor::from_vec(vec![10, 20]).unwrap();
/// assert_eq!(add(&a, &b).unwrap().as_slice(), &[11, 22, 13, 24]);
/// ```
pub fn add<T>(lhs: &Tensor<T>, rhs: &Tensor<T>) -> Result<Tensor<T>, TensorOpsError>
where
    T: std::ops::Add<Output = T> + Clone,
{
    pointwise(lhs, rhs, |a, b| a.clone() + b.clone())
}

/// Subtract two tensors element-wise with broadcasting.
pub fn sub<T>(lhs: &Tensor<T>, rhs: &Tensor<T>) -> Result<Tensor<T>, TensorOpsError>
where
    T: std::ops::Sub<Output = T> + Clone,
{
    pointwise(lhs, rhs, |a, b| a.clone() - b.clone())
}

/// Multiply two tensors element-wise with broadcasting.
pub fn mul<T>(lhs: &Tensor<T>, rhs: &Tensor<T>) -> Result<Tensor<T>, TensorOpsError>
where
    T: std::ops::Mul<Output = T> + Clone,
{
    pointwise(lhs, rhs, |a, b| a.clone() * b.clone())
}

/// Divide two tensors element-wise with broadcasting.
pub fn div<T>(lhs: &Tensor<T>, rhs: &Tensor<T>) -> Result<Tensor<T>, TensorOpsError>
where
    T: std::ops::Div<Output = T> + Clone,
{
    pointwise(lhs, rhs, |a, b| a.clone() / b.clone())
}

/// Add a scalar to every element of the tensor.
pub fn add_scalar<T>(tensor: &Tensor<T>, scalar: T) -> Tensor<T>
where
    T: std::ops::Add<Output = T> + Clone,
{
    tensor.map(|x| x.clone() + scalar.clone())
}

/// Multiply every element of the tensor by a scalar.
///
/// # Example
///
/// ```
/// use tenxor_tensor::Tensor;
/// use tenxor_tensor_ops::pointwise::mul_scalar;
///
/// let t = Tensor::from_vec(vec![1.0, 2.0, 3.0]).unwrap();
/// assert_eq!(mul_scalar(&t, 2.0).as_slice(), &[2.0, 4.0, 6.0]);
/// ```
pub fn mul_scalar<T>(tensor: &Tensor<T>, scalar: T) -> Tensor<T>
where
    T: std::ops::Mul<Output = T> + Clone,
{
    tensor.map(|x| x.clone() * scalar.clone())
}
