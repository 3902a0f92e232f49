//! Translation between flat indices and multi-dimensional positions.
//!
//! All functions assume a row-major layout: the last dimension varies fastest.

use crate::{shape::get_strides_from_shape, tensor::TensorError};

/// Find the index in the flattened buffer corresponding to a position.
///
/// # Errors
///
/// Returns [`TensorError::IndexOutOfBounds`] if any coordinate is not smaller than the size of
/// its dimension, and [`TensorError::RankMismatch`] if the position and the shape have a
/// different number of dimensions.
///
/// # Example
///
/// ```
/// use tenxor_tensor::position::position_to_index;
///
/// assert_eq!(position_to_index(&[1, 2], &[2, 3]).unwrap(), 5);
/// assert!(position_to_index(&[2, 0], &[2, 3]).is_err());
/// ```
pub fn position_to_index(pos: &[usize], shape: &[usize]) -> Result<usize, TensorError> {
    if pos.len() != shape.len() {
        return Err(TensorError::RankMismatch {
            expected: shape.len(),
            actual: pos.len(),
        });
    }

    let mut index = 0;
    let mut stride = 1;
    for (dim, (&p, &size)) in pos.iter().zip(shape).enumerate().rev() {
        if p >= size {
            return Err(TensorError::index_out_of_bounds(dim, p, size));
        }
        index += p * stride;
        stride *= size;
    }
    Ok(index)
}

/// Find the position corresponding to an index in the flattened buffer.
///
/// This is the inverse of [`position_to_index`].
///
/// # Errors
///
/// Returns [`TensorError::IndexOutOfBounds`] if a resulting coordinate does not fit its
/// dimension, which happens exactly when `index` is not smaller than the number of elements.
///
/// # Example
///
/// ```
/// use tenxor_tensor::position::index_to_position;
///
/// assert_eq!(index_to_position(5, &[2, 3]).unwrap(), vec![1, 2]);
/// assert!(index_to_position(6, &[2, 3]).is_err());
/// ```
pub fn index_to_position(index: usize, shape: &[usize]) -> Result<Vec<usize>, TensorError> {
    let strides = get_strides_from_shape(shape);
    let mut pos = vec![0; shape.len()];
    let mut rem = index;
    for (dim, (&stride, &size)) in strides.iter().zip(shape).enumerate() {
        pos[dim] = rem / stride;
        rem %= stride;
        if pos[dim] >= size {
            return Err(TensorError::index_out_of_bounds(dim, pos[dim], size));
        }
    }
    Ok(pos)
}

/// Advance `pos` in place to the position that follows it in row-major order.
///
/// The last coordinate is incremented and overflow carries to the left, wrapping exhausted
/// dimensions back to zero. Starting from the all-zero position, repeated calls visit every
/// position of `shape` exactly once.
///
/// # Returns
///
/// `true` if `pos` now holds the next position, `false` once the carry runs past the first
/// dimension and every position has been visited. A position whose length differs from the
/// rank of `shape` is left untouched and `false` is returned.
///
/// # Example
///
/// ```
/// use tenxor_tensor::position::next_position;
///
/// let shape = [2, 2];
/// let mut pos = vec![0, 0];
/// let mut visited = vec![pos.clone()];
/// while next_position(&mut pos, &shape) {
///     visited.push(pos.clone());
/// }
/// assert_eq!(visited, vec![vec![0, 0], vec![0, 1], vec![1, 0], vec![1, 1]]);
/// ```
pub fn next_position(pos: &mut [usize], shape: &[usize]) -> bool {
    if pos.len() != shape.len() {
        return false;
    }
    let Some(mut k) = pos.len().checked_sub(1) else {
        return false;
    };
    pos[k] += 1;
    while k > 0 && pos[k] >= shape[k] {
        pos[k] = 0;
        pos[k - 1] += 1;
        k -= 1;
    }
    pos[0] < shape[0]
}

/// Iterator over every position of a shape in row-major order.
///
/// Created by [`positions`].
#[derive(Debug, Clone)]
pub struct Positions<'a> {
    shape: &'a [usize],
    next: Option<Vec<usize>>,
}

impl Iterator for Positions<'_> {
    type Item = Vec<usize>;

    fn next(&mut self) -> Option<Self::Item> {
        let current = self.next.take()?;
        let mut following = current.clone();
        if next_position(&mut following, self.shape) {
            self.next = Some(following);
        }
        Some(current)
    }
}

/// Returns an iterator over every position of `shape`, starting at the all-zero position.
///
/// Shapes with no dimensions or with a zero-sized dimension yield nothing.
pub fn positions(shape: &[usize]) -> Positions<'_> {
    let next = if shape.is_empty() || shape.contains(&0) {
        None
    } else {
        Some(vec![0; shape.len()])
    };
    Positions { shape, next }
}
