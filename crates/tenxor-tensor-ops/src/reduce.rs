use num_traits::{Float, One, Zero};
use tenxor_tensor::{shape::normalize_dim, Tensor, TensorLike};

use crate::error::TensorOpsError;

/// Fold the elements of a tensor along dimension `dim`.
///
/// Every slice along `dim` is folded independently, starting from `seed` and applying
/// `combine(accumulator, element)` over increasing index along `dim`. Slices are visited in
/// row-major order of the result, so order-sensitive folds are reproducible.
///
/// # Arguments
///
/// * `tensor` - The tensor to reduce.
/// * `dim` - The dimension to fold. Negative values count from the end.
/// * `seed` - The initial accumulator of every slice.
/// * `combine` - The fold step.
///
/// # Returns
///
/// A new `Tensor` with dimension `dim` removed. Reducing a rank-1 tensor gives shape `[1]`.
///
/// # Errors
///
/// If `dim` does not name a dimension of the tensor, an error is returned.
///
/// # Example
///
/// ```
/// use tenxor_tensor::{Tensor, TensorLike};
/// use tenxor_tensor_ops::reduce::reduce;
///
/// let t = Tensor::from_shape_vec(&[2, 3], vec![1.0, 2.0, 3.0, 4.0, 5.0, 6.0]).unwrap();
///
/// let rows = reduce(&t, 1, 0.0, |acc, x| acc + x).unwrap();
/// assert_eq!(rows.shape(), &[2]);
/// assert_eq!(rows.as_slice(), &[6.0, 15.0]);
///
/// let cols = reduce(&t, 0, 0.0, |acc, x| acc + x).unwrap();
/// assert_eq!(cols.shape(), &[3]);
/// assert_eq!(cols.as_slice(), &[5.0, 7.0, 9.0]);
/// ```
pub fn reduce<T, U, X, F>(
    tensor: &X,
    dim: isize,
    seed: U,
    mut combine: F,
) -> Result<Tensor<U>, TensorOpsError>
where
    X: TensorLike<T>,
    U: Clone,
    F: FnMut(U, &T) -> U,
{
    let in_shape = tensor.shape();
    let rank = in_shape.len();
    let dim = normalize_dim(dim, rank).map_err(|_| TensorOpsError::DimOutOfBounds(dim, rank))?;
    let dim_size = in_shape[dim];

    // keep the reduced dimension with size 1 while filling, drop it at the end
    let mut out_shape = in_shape.to_vec();
    out_shape[dim] = 1;
    let mut result = Tensor::from_shape_val(&out_shape, seed.clone())?;

    let mut out_pos = vec![0; rank];
    let mut in_pos = vec![0; rank];
    loop {
        in_pos.copy_from_slice(&out_pos);
        let mut acc = seed.clone();
        for i in 0..dim_size {
            in_pos[dim] = i;
            acc = combine(acc, tensor.get(&in_pos)?);
        }
        result.set(&out_pos, acc)?;

        if !result.step(&mut out_pos) {
            break;
        }
    }

    log::debug!(
        "reduced {:?} along dimension {} into {:?}",
        in_shape,
        dim,
        out_shape
    );

    if rank == 1 {
        return Ok(result);
    }
    Ok(result.squeeze(dim as isize)?)
}

/// Compute the sum of the elements in the tensor along dimension `dim`.
///
/// # Example
///
/// ```
/// use tenxor_tensor::Tensor;
/// use tenxor_tensor_ops::reduce::sum;
///
/// let t = Tensor::from_shape_vec(&[2, 3], vec![1u8, 1, 1, 1, 1, 1]).unwrap();
/// let agg = sum(&t, 1).unwrap();
/// assert_eq!(agg.as_slice(), &[3, 3]);
/// ```
pub fn sum<T, X>(tensor: &X, dim: isize) -> Result<Tensor<T>, TensorOpsError>
where
    X: TensorLike<T>,
    T: Zero + Clone,
{
    reduce(tensor, dim, T::zero(), |acc, x| acc + x.clone())
}

/// Compute the product of the elements in the tensor along dimension `dim`.
pub fn product<T, X>(tensor: &X, dim: isize) -> Result<Tensor<T>, TensorOpsError>
where
    X: TensorLike<T>,
    T: One + Clone,
{
    reduce(tensor, dim, T::one(), |acc, x| acc * x.clone())
}

/// Compute the maximum of the elements in the tensor along dimension `dim`.
///
/// NaN elements are ignored unless a whole slice is NaN.
pub fn max<T, X>(tensor: &X, dim: isize) -> Result<Tensor<T>, TensorOpsError>
where
    X: TensorLike<T>,
    T: Float,
{
    reduce(tensor, dim, T::neg_infinity(), |acc, &x| acc.max(x))
}

/// Compute the minimum of the elements in the tensor along dimension `dim`.
///
/// NaN elements are ignored unless a whole slice is NaN.
pub fn min<T, X>(tensor: &X, dim: isize) -> Result<Tensor<T>, TensorOpsError>
where
    X: TensorLike<T>,
    T: Float,
{
    reduce(tensor, dim, T::infinity(), |acc, &x| acc.min(x))
}

#[cfg(test)]
mod tests {
    use tenxor_tensor::{ErrorKind, TensorError};

    use super::*;

    #[test]
    fn test_reduce_dim_oob() -> Result<(), TensorError> {
        let t = Tensor::from_shape_vec(&[2, 2], vec![2u8, 2, 2, 2])?;
        assert_eq!(
            sum(&t, 2).unwrap_err(),
            TensorOpsError::DimOutOfBounds(2, 2)
        );
        assert_eq!(
            sum(&t, -3).unwrap_err(),
            TensorOpsError::DimOutOfBounds(-3, 2)
        );
        assert_eq!(sum(&t, 2).unwrap_err().kind(), ErrorKind::Shape);
        Ok(())
    }

    #[test]
    fn test_sum_1d() -> Result<(), TensorOpsError> {
        let t = Tensor::from_shape_vec(&[4], vec![1u8, 1, 1, 1])?;
        let res = sum(&t, 0)?;
        assert_eq!(res.shape(), &[1]);
        assert_eq!(res.as_slice(), &[4]);
        Ok(())
    }

    #[test]
    fn test_sum_2d() -> Result<(), TensorOpsError> {
        let t = Tensor::from_shape_vec(&[2, 3], vec![1i32, 2, 3, 4, 5, 6])?;

        let agg = sum(&t, 1)?;
        assert_eq!(agg.shape(), &[2]);
        assert_eq!(agg.as_slice(), &[6, 15]);

        let agg = sum(&t, 0)?;
        assert_eq!(agg.shape(), &[3]);
        assert_eq!(agg.as_slice(), &[5, 7, 9]);

        assert_eq!(sum(&t, -1)?, sum(&t, 1)?);
        assert_eq!(sum(&t, -2)?, sum(&t, 0)?);
        Ok(())
    }

    #[test]
    fn test_sum_3d() -> Result<(), TensorOpsError> {
        let t = Tensor::from_shape_val(&[2, 3, 4], 1.0f32)?;

        let agg = sum(&t, 0)?;
        assert_eq!(agg.shape(), &[3, 4]);
        assert_eq!(agg.as_slice(), &[2.0; 12]);

        let agg = sum(&t, 1)?;
        assert_eq!(agg.shape(), &[2, 4]);
        assert_eq!(agg.as_slice(), &[3.0; 8]);

        let agg = sum(&t, 2)?;
        assert_eq!(agg.shape(), &[2, 3]);
        assert_eq!(agg.as_slice(), &[4.0; 6]);
        Ok(())
    }

    #[test]
    fn test_reduce_keeps_slice_positions() -> Result<(), TensorOpsError> {
        // element value encodes its position as abc
        let t = Tensor::from_shape_fn(&[2, 3, 2], |pos| pos[0] * 100 + pos[1] * 10 + pos[2])?;
        let agg = sum(&t, 1)?;
        assert_eq!(agg.shape(), &[2, 2]);
        assert_eq!(agg.as_slice(), &[30, 33, 330, 333]);
        Ok(())
    }

    #[test]
    fn test_reduce_is_ordered() -> Result<(), TensorOpsError> {
        let t = Tensor::from_shape_vec(&[2, 3], vec![1u32, 2, 3, 4, 5, 6])?;

        let digits = reduce(&t, 1, 0u32, |acc, &x| acc * 10 + x)?;
        assert_eq!(digits.as_slice(), &[123, 456]);

        let digits = reduce(&t, 0, 0u32, |acc, &x| acc * 10 + x)?;
        assert_eq!(digits.as_slice(), &[14, 25, 36]);

        let trace = reduce(&t, -1, String::new(), |acc, x| format!("{acc}{x},"))?;
        assert_eq!(trace.as_slice(), &["1,2,3,".to_string(), "4,5,6,".to_string()]);
        Ok(())
    }

    #[test]
    fn test_reduce_seed_is_per_slice() -> Result<(), TensorOpsError> {
        let t = Tensor::from_shape_vec(&[3, 2], vec![1, 1, 1, 1, 1, 1])?;
        let agg = reduce(&t, 1, 100, |acc, &x| acc + x)?;
        assert_eq!(agg.as_slice(), &[102, 102, 102]);
        Ok(())
    }

    #[test]
    fn test_product_max_min() -> Result<(), TensorOpsError> {
        let t = Tensor::from_shape_vec(&[2, 3], vec![1.0, -2.0, 3.0, 4.0, 5.0, -6.0])?;
        assert_eq!(product(&t, 1)?.as_slice(), &[-6.0, -120.0]);
        assert_eq!(max(&t, 1)?.as_slice(), &[3.0, 5.0]);
        assert_eq!(min(&t, 1)?.as_slice(), &[-2.0, -6.0]);
        assert_eq!(max(&t, 0)?.as_slice(), &[4.0, 5.0, 3.0]);
        assert_eq!(min(&t, 0)?.as_slice(), &[1.0, -2.0, -6.0]);
        Ok(())
    }

    #[test]
    fn test_reduce_leaves_input_untouched() -> Result<(), TensorOpsError> {
        let t = Tensor::from_shape_vec(&[2, 1, 2], vec![1, 2, 3, 4])?;
        let agg = sum(&t, 1)?;
        assert_eq!(agg.shape(), &[2, 2]);
        assert_eq!(agg.as_slice(), t.as_slice());
        assert!(!agg.shares_storage_with(&t));
        Ok(())
    }
}
