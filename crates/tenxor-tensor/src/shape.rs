//! Shape algebra.
//!
//! Pure functions deriving new shapes from existing ones. None of them touch element data.

use crate::tensor::TensorError;

/// Returns the number of elements described by a shape.
#[inline]
pub fn numel(shape: &[usize]) -> usize {
    shape.iter().product()
}

/// Returns the number of elements described by a shape, or `None` if it overflows `usize`.
///
/// ```rust
/// use tenxor_tensor::shape::checked_numel;
///
/// assert_eq!(checked_numel(&[2, 3]), Some(6));
/// assert_eq!(checked_numel(&[usize::MAX, 2]), None);
/// ```
pub fn checked_numel(shape: &[usize]) -> Option<usize> {
    shape.iter().try_fold(1usize, |acc, &s| acc.checked_mul(s))
}

/// Computes the strides for a row-major (C-contiguous) tensor layout.
///
/// The rightmost dimension has stride 1, and each dimension's stride is the product of all
/// dimensions to its right.
///
/// # Examples
///
/// ```rust
/// use tenxor_tensor::shape::get_strides_from_shape;
///
/// assert_eq!(get_strides_from_shape(&[2, 3]), vec![3, 1]);
/// assert_eq!(get_strides_from_shape(&[2, 3, 4]), vec![12, 4, 1]);
/// ```
pub fn get_strides_from_shape(shape: &[usize]) -> Vec<usize> {
    let mut strides = vec![0; shape.len()];
    let mut stride = 1;
    for i in (0..shape.len()).rev() {
        strides[i] = stride;
        stride *= shape[i];
    }
    strides
}

/// Resolves a possibly negative dimension against a rank.
///
/// Negative values count from the end, so `-1` is the last dimension. The resolved
/// dimension must lie in `[0, rank)`.
///
/// # Errors
///
/// Returns [`TensorError::DimOutOfRange`] carrying the dimension as given.
pub fn normalize_dim(dim: isize, rank: usize) -> Result<usize, TensorError> {
    let resolved = if dim < 0 { dim + rank as isize } else { dim };
    if resolved < 0 || resolved >= rank as isize {
        return Err(TensorError::DimOutOfRange { dim, rank });
    }
    Ok(resolved as usize)
}

/// Return the shape of a tensor of shape `old_shape` after reshaping to `new_shape`.
///
/// Every entry of `new_shape` must be positive, except for at most one `-1` whose size is
/// inferred from the number of elements of `old_shape`.
///
/// # Errors
///
/// * [`TensorError::InvalidDimensionSize`] if an entry is `0` or below `-1`.
/// * [`TensorError::MultipleInferredDimensions`] if more than one `-1` is given.
/// * [`TensorError::IncompatibleReshape`] if the elements do not fit the target shape.
///
/// # Example
///
/// ```
/// use tenxor_tensor::shape::reshape;
///
/// assert_eq!(reshape(&[2, 3], &[-1, 3]).unwrap(), vec![2, 3]);
/// assert_eq!(reshape(&[2, 3], &[3, -1]).unwrap(), vec![3, 2]);
/// assert!(reshape(&[2, 3], &[-1, 4]).is_err());
/// ```
pub fn reshape(old_shape: &[usize], new_shape: &[isize]) -> Result<Vec<usize>, TensorError> {
    if new_shape.is_empty() {
        return Err(TensorError::EmptyShape);
    }
    if new_shape.iter().any(|&s| s == 0 || s < -1) {
        return Err(TensorError::InvalidDimensionSize {
            shape: new_shape.to_vec(),
        });
    }

    let inferred: Vec<usize> = new_shape
        .iter()
        .enumerate()
        .filter(|(_, s)| **s == -1)
        .map(|(i, _)| i)
        .collect();
    if inferred.len() > 1 {
        return Err(TensorError::MultipleInferredDimensions {
            shape: new_shape.to_vec(),
        });
    }

    let total = numel(old_shape);
    let incompatible = || TensorError::IncompatibleReshape {
        from: old_shape.to_vec(),
        to: new_shape.to_vec(),
        numel: total,
    };
    // a product past usize::MAX can never match the source element count
    let known = new_shape
        .iter()
        .filter(|&&s| s != -1)
        .try_fold(1usize, |acc, &s| acc.checked_mul(s as usize))
        .ok_or_else(incompatible)?;

    let mut shape: Vec<usize> = new_shape.iter().map(|&s| s.max(1) as usize).collect();
    match inferred.first() {
        Some(&i) => {
            if total % known != 0 {
                return Err(incompatible());
            }
            shape[i] = total / known;
        }
        None if known != total => return Err(incompatible()),
        None => {}
    }
    Ok(shape)
}

/// Return the shape after removing the size-1 dimension `dim`.
///
/// Negative values of `dim` count from the end. Squeezing the only dimension of a rank-1
/// shape is refused since shapes keep at least one dimension.
///
/// # Errors
///
/// * [`TensorError::DimOutOfRange`] if `dim` does not name a dimension.
/// * [`TensorError::NonUnitSqueeze`] if the dimension has a size other than 1.
/// * [`TensorError::EmptyShape`] if the result would have no dimensions.
///
/// # Example
///
/// ```
/// use tenxor_tensor::shape::squeeze;
///
/// assert_eq!(squeeze(&[2, 1, 3], 1).unwrap(), vec![2, 3]);
/// assert_eq!(squeeze(&[2, 3, 1], -1).unwrap(), vec![2, 3]);
/// assert!(squeeze(&[2, 3], 2).is_err());
/// ```
pub fn squeeze(shape: &[usize], dim: isize) -> Result<Vec<usize>, TensorError> {
    let dim = normalize_dim(dim, shape.len())?;
    if shape[dim] != 1 {
        return Err(TensorError::NonUnitSqueeze {
            dim,
            size: shape[dim],
        });
    }
    if shape.len() == 1 {
        return Err(TensorError::EmptyShape);
    }
    let mut squeezed = shape.to_vec();
    squeezed.remove(dim);
    Ok(squeezed)
}

/// Return the shape after inserting a size-1 dimension at position `dim`.
///
/// Valid insertion points are `[0, rank]`. Negative values count from the end shifted by
/// one, so `-1` appends a trailing dimension and `-(rank + 1)` prepends one.
///
/// # Errors
///
/// Returns [`TensorError::DimOutOfRange`] if the insertion point is invalid.
///
/// # Example
///
/// ```
/// use tenxor_tensor::shape::unsqueeze;
///
/// assert_eq!(unsqueeze(&[2, 3], 0).unwrap(), vec![1, 2, 3]);
/// assert_eq!(unsqueeze(&[2, 3], 2).unwrap(), vec![2, 3, 1]);
/// assert_eq!(unsqueeze(&[2, 3], -1).unwrap(), vec![2, 3, 1]);
/// assert!(unsqueeze(&[2, 3], 3).is_err());
/// ```
pub fn unsqueeze(shape: &[usize], dim: isize) -> Result<Vec<usize>, TensorError> {
    let rank = shape.len() as isize;
    let resolved = if dim < 0 { dim + rank + 1 } else { dim };
    if resolved < 0 || resolved > rank {
        return Err(TensorError::DimOutOfRange {
            dim,
            rank: shape.len(),
        });
    }
    let mut unsqueezed = shape.to_vec();
    unsqueezed.insert(resolved as usize, 1);
    Ok(unsqueezed)
}

/// Broadcast two shapes against each other.
///
/// The shorter shape is left-padded with ones until both have the same rank. Each aligned
/// pair of sizes must then be equal, or one of them must be 1, in which case the result
/// takes the other.
///
/// # Returns
///
/// The padded left shape, the padded right shape and the shape of the result.
///
/// # Errors
///
/// Returns [`TensorError::BroadcastMismatch`] naming the first incompatible aligned dimension
/// and both padded shapes.
///
/// # Example
///
/// ```
/// use tenxor_tensor::shape::broadcast;
///
/// let (a, b, out) = broadcast(&[3, 1], &[4]).unwrap();
/// assert_eq!(a, vec![3, 1]);
/// assert_eq!(b, vec![1, 4]);
/// assert_eq!(out, vec![3, 4]);
/// ```
pub fn broadcast(
    shape_a: &[usize],
    shape_b: &[usize],
) -> Result<(Vec<usize>, Vec<usize>, Vec<usize>), TensorError> {
    let rank = shape_a.len().max(shape_b.len());
    let pad = |shape: &[usize]| {
        let mut padded = vec![1; rank - shape.len()];
        padded.extend_from_slice(shape);
        padded
    };
    let a = pad(shape_a);
    let b = pad(shape_b);

    let mut result = Vec::with_capacity(rank);
    for (dim, (&n, &m)) in a.iter().zip(b.iter()).enumerate() {
        let size = if n == 1 {
            m
        } else if m == 1 || n == m {
            n
        } else {
            return Err(TensorError::broadcast_mismatch(dim, &a, &b));
        };
        result.push(size);
    }

    Ok((a, b, result))
}
