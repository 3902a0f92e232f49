use thiserror::Error;

use crate::{
    position::{next_position, position_to_index, positions},
    shape::{self, checked_numel, numel},
    storage::TensorStorage,
};

/// The broad category a [`TensorError`] belongs to.
///
/// Every failure in the engine falls into exactly one of these kinds, which lets callers
/// branch on the class of problem without matching every variant.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    /// The value count does not match the cardinality of the declared shape.
    Construction,
    /// An invalid reshape target, squeeze/unsqueeze dimension or reduction dimension.
    Shape,
    /// Two shapes cannot be broadcast against each other.
    Broadcast,
    /// A position coordinate or flat index is out of bounds.
    Index,
}

/// An error type for tensor operations.
///
/// This enum provides detailed error information for tensor creation,
/// shape manipulation and element access.
#[derive(Error, Debug, PartialEq)]
pub enum TensorError {
    /// Tensor shape does not match the provided data.
    ///
    /// The product of the shape dimensions must equal the number of elements exactly.
    ///
    /// # Example
    /// ```ignore
    /// // Error: shape [2, 2] expects 4 elements, but got 3
    /// let tensor = Tensor::from_shape_vec(&[2, 2], vec![1.0, 2.0, 3.0])?;
    /// ```
    #[error("Shape mismatch: shape {shape:?} expects {expected} elements, but got {actual} elements in data")]
    InvalidShape {
        /// The declared shape
        shape: Vec<usize>,
        /// Expected number of elements based on shape
        expected: usize,
        /// Actual number of elements in the data
        actual: usize,
    },

    /// A shape with no dimensions was requested.
    #[error("Empty shape: a tensor needs at least one dimension")]
    EmptyShape,

    /// A shape entry is zero, or negative other than the `-1` placeholder.
    #[error("Invalid dimension size in {shape:?}: sizes must be positive, or -1 to infer one dimension")]
    InvalidDimensionSize {
        /// The offending shape
        shape: Vec<isize>,
    },

    /// More than one `-1` placeholder was given to a reshape.
    #[error("Only one dimension can be inferred, got {shape:?}")]
    MultipleInferredDimensions {
        /// The offending target shape
        shape: Vec<isize>,
    },

    /// The target shape cannot hold the elements of the source shape.
    #[error("Cannot reshape {from:?} ({numel} elements) to {to:?}")]
    IncompatibleReshape {
        /// Source shape
        from: Vec<usize>,
        /// Requested target shape
        to: Vec<isize>,
        /// Number of elements in the source shape
        numel: usize,
    },

    /// A dimension index is out of range after resolving negative indices.
    #[error("Dimension {dim} out of range for shape of rank {rank}")]
    DimOutOfRange {
        /// The dimension as given by the caller
        dim: isize,
        /// The rank of the shape
        rank: usize,
    },

    /// Squeeze was asked to remove a dimension whose size is not 1.
    #[error("Cannot squeeze dimension {dim} of size {size}")]
    NonUnitSqueeze {
        /// The normalized dimension
        dim: usize,
        /// Its size
        size: usize,
    },

    /// Two shapes are not broadcast-compatible.
    #[error("Incompatible shapes {lhs:?} and {rhs:?} at dimension {dim}")]
    BroadcastMismatch {
        /// The aligned (0-indexed, after left padding) dimension that failed
        dim: usize,
        /// Left-hand shape after padding
        lhs: Vec<usize>,
        /// Right-hand shape after padding
        rhs: Vec<usize>,
    },

    /// Index exceeds tensor bounds.
    #[error("Index {index} at dimension {dim} out of bounds for size {size}")]
    IndexOutOfBounds {
        /// The dimension being indexed
        dim: usize,
        /// The invalid index that was attempted
        index: usize,
        /// The size of the dimension being indexed
        size: usize,
    },

    /// A position has a different number of coordinates than the shape has dimensions.
    #[error("Position of rank {actual} used with shape of rank {expected}")]
    RankMismatch {
        /// Rank of the shape
        expected: usize,
        /// Number of coordinates in the position
        actual: usize,
    },
}

impl TensorError {
    /// Creates an InvalidShape error with clear context.
    ///
    /// The expected count saturates at `usize::MAX` for shapes too large to count.
    pub fn invalid_shape(shape: &[usize], actual: usize) -> Self {
        Self::InvalidShape {
            shape: shape.to_vec(),
            expected: checked_numel(shape).unwrap_or(usize::MAX),
            actual,
        }
    }

    /// Creates an IndexOutOfBounds error with clear context.
    pub fn index_out_of_bounds(dim: usize, index: usize, size: usize) -> Self {
        Self::IndexOutOfBounds { dim, index, size }
    }

    /// Creates a BroadcastMismatch error from the padded shapes.
    pub fn broadcast_mismatch(dim: usize, lhs: &[usize], rhs: &[usize]) -> Self {
        Self::BroadcastMismatch {
            dim,
            lhs: lhs.to_vec(),
            rhs: rhs.to_vec(),
        }
    }

    /// Returns the category of the error.
    pub fn kind(&self) -> ErrorKind {
        match self {
            Self::InvalidShape { .. } => ErrorKind::Construction,
            Self::EmptyShape
            | Self::InvalidDimensionSize { .. }
            | Self::MultipleInferredDimensions { .. }
            | Self::IncompatibleReshape { .. }
            | Self::DimOutOfRange { .. }
            | Self::NonUnitSqueeze { .. } => ErrorKind::Shape,
            Self::BroadcastMismatch { .. } => ErrorKind::Broadcast,
            Self::IndexOutOfBounds { .. } | Self::RankMismatch { .. } => ErrorKind::Index,
        }
    }

    /// Returns a user-friendly suggestion for resolving the error.
    pub fn suggestion(&self) -> &str {
        match self.kind() {
            ErrorKind::Construction => {
                "Ensure the product of shape dimensions equals the number of data elements"
            }
            ErrorKind::Shape => {
                "Check that dimensions are in range and that the target shape holds the same number of elements"
            }
            ErrorKind::Broadcast => {
                "Aligned from the right, each pair of dimensions must be equal or contain a 1"
            }
            ErrorKind::Index => "Verify indices are within bounds (0 <= index < dimension_size)",
        }
    }
}

/// Checks that a shape is usable by a tensor: at least one dimension, all of them positive.
pub(crate) fn validate_shape(shape: &[usize]) -> Result<(), TensorError> {
    if shape.is_empty() {
        return Err(TensorError::EmptyShape);
    }
    if shape.contains(&0) {
        return Err(TensorError::InvalidDimensionSize {
            shape: shape.iter().map(|&s| s as isize).collect(),
        });
    }
    Ok(())
}

/// The capability set of a tensor-like type.
///
/// Anything that exposes a shape, positional access and a row-major stepper can be driven by
/// the reduction and pointwise engines. [`Tensor`] is the contiguous implementation; other
/// backing stores (strided views, memory-mapped buffers) can implement the same contract.
pub trait TensorLike<T> {
    /// The shape of the tensor.
    fn shape(&self) -> &[usize];

    /// Get a reference to the element at the given position.
    ///
    /// # Errors
    ///
    /// Returns an index error if the position does not fit the shape.
    fn get(&self, pos: &[usize]) -> Result<&T, TensorError>;

    /// Overwrite the element at the given position.
    ///
    /// # Errors
    ///
    /// Returns an index error if the position does not fit the shape.
    fn set(&mut self, pos: &[usize], value: T) -> Result<(), TensorError>;

    /// Advance `pos` to the next position in row-major order.
    ///
    /// Returns `false` once every position has been visited.
    fn step(&self, pos: &mut [usize]) -> bool {
        next_position(pos, self.shape())
    }

    /// Apply a function to every element, producing a new independently-owned tensor
    /// with the same shape.
    fn map<U, F>(&self, f: F) -> Tensor<U>
    where
        F: FnMut(&T) -> U;

    /// Reinterpret the same flat values under a different shape.
    ///
    /// The shape is taken as given; derive it with [`shape::reshape`] first when it comes from
    /// a reshape request with a `-1` placeholder.
    ///
    /// # Errors
    ///
    /// Returns a shape error if `shape` does not hold the same number of elements.
    fn view(&self, shape: &[usize]) -> Result<Self, TensorError>
    where
        Self: Sized;

    /// Remove the size-1 dimension `dim`. Negative values count from the end.
    ///
    /// Shapes keep at least one dimension, so squeezing a rank-1 tensor of shape `[1]` fails
    /// with [`TensorError::EmptyShape`] instead of producing a rank-0 tensor. The other
    /// failures are a `dim` out of range and a dimension whose size is not 1.
    fn squeeze(&self, dim: isize) -> Result<Self, TensorError>
    where
        Self: Sized,
    {
        let new_shape = shape::squeeze(self.shape(), dim)?;
        self.view(&new_shape)
    }

    /// Insert a size-1 dimension at `dim`. Negative values count from the end.
    fn unsqueeze(&self, dim: isize) -> Result<Self, TensorError>
    where
        Self: Sized,
    {
        let new_shape = shape::unsqueeze(self.shape(), dim)?;
        self.view(&new_shape)
    }

    /// The number of dimensions.
    fn rank(&self) -> usize {
        self.shape().len()
    }

    /// The number of elements.
    fn numel(&self) -> usize {
        numel(self.shape())
    }
}

/// A dynamic-rank multi-dimensional array with row-major layout.
///
/// `Tensor` pairs a flat buffer of elements with a shape. The number of elements always
/// equals the product of the shape, and the last dimension varies fastest in the buffer.
///
/// # Views and mutation
///
/// The buffer lives in a reference-counted [`TensorStorage`]. [`TensorLike::view`],
/// [`TensorLike::squeeze`], [`TensorLike::unsqueeze`] and `clone` hand out new tensors that
/// share it without copying. [`TensorLike::set`] is copy-on-write: writing through a tensor
/// whose buffer is shared first gives it a private copy, so a mutation is never visible
/// through any other tensor.
///
/// # Examples
///
/// ```rust
/// use tenxor_tensor::{Tensor, TensorLike};
///
/// let t = Tensor::from_shape_vec(&[2, 3], vec![1.0, 2.0, 3.0, 4.0, 5.0, 6.0]).unwrap();
/// assert_eq!(t.shape(), &[2, 3]);
/// assert_eq!(t.get(&[1, 2]), Ok(&6.0));
/// ```
pub struct Tensor<T> {
    storage: TensorStorage<T>,
    shape: Vec<usize>,
}

impl<T> Tensor<T> {
    /// Creates a new `Tensor` with the given shape and data.
    ///
    /// # Arguments
    ///
    /// * `shape` - The shape of the tensor.
    /// * `data` - A vector containing the data of the tensor in row-major order.
    ///
    /// # Errors
    ///
    /// If the number of elements in the data does not match the shape of the tensor, an
    /// error is returned. Empty shapes, zero-sized dimensions and shapes whose element count
    /// overflows `usize` are rejected.
    ///
    /// # Example
    ///
    /// ```
    /// use tenxor_tensor::{ErrorKind, Tensor, TensorLike};
    ///
    /// let t = Tensor::from_shape_vec(&[2, 2], vec![1, 2, 3, 4]).unwrap();
    /// assert_eq!(t.shape(), &[2, 2]);
    ///
    /// let err = Tensor::from_shape_vec(&[2, 2], vec![1, 2, 3]).unwrap_err();
    /// assert_eq!(err.kind(), ErrorKind::Construction);
    /// ```
    pub fn from_shape_vec(shape: &[usize], data: Vec<T>) -> Result<Self, TensorError> {
        validate_shape(shape)?;
        if checked_numel(shape) != Some(data.len()) {
            return Err(TensorError::invalid_shape(shape, data.len()));
        }
        Ok(Self {
            storage: TensorStorage::from_vec(data),
            shape: shape.to_vec(),
        })
    }

    /// Creates a rank-1 tensor holding all the given values.
    ///
    /// # Errors
    ///
    /// Returns an error if `data` is empty.
    pub fn from_vec(data: Vec<T>) -> Result<Self, TensorError> {
        let shape = [data.len()];
        Self::from_shape_vec(&shape, data)
    }

    /// Creates a new `Tensor` with the given shape and slice of data.
    pub fn from_shape_slice(shape: &[usize], data: &[T]) -> Result<Self, TensorError>
    where
        T: Clone,
    {
        Self::from_shape_vec(shape, data.to_vec())
    }

    /// Creates a new `Tensor` with the given shape, every element set to `value`.
    ///
    /// # Example
    ///
    /// ```
    /// use tenxor_tensor::Tensor;
    ///
    /// let t = Tensor::from_shape_val(&[2, 1, 3], 2u8).unwrap();
    /// assert_eq!(t.as_slice(), &[2, 2, 2, 2, 2, 2]);
    /// ```
    pub fn from_shape_val(shape: &[usize], value: T) -> Result<Self, TensorError>
    where
        T: Clone,
    {
        validate_shape(shape)?;
        let n = checked_numel(shape).ok_or_else(|| TensorError::invalid_shape(shape, 0))?;
        Self::from_shape_vec(shape, vec![value; n])
    }

    /// Create a new `Tensor` with the given shape and a function to generate the data.
    ///
    /// The function `f` is called with the position of each element, in row-major order.
    ///
    /// # Example
    ///
    /// ```
    /// use tenxor_tensor::Tensor;
    ///
    /// let t = Tensor::from_shape_fn(&[2, 2], |pos| (pos[0] * 2 + pos[1]) as u8).unwrap();
    /// assert_eq!(t.as_slice(), &[0, 1, 2, 3]);
    /// ```
    pub fn from_shape_fn<F>(shape: &[usize], mut f: F) -> Result<Self, TensorError>
    where
        F: FnMut(&[usize]) -> T,
    {
        validate_shape(shape)?;
        checked_numel(shape).ok_or_else(|| TensorError::invalid_shape(shape, 0))?;
        let data = positions(shape).map(|pos| f(&pos)).collect();
        Self::from_shape_vec(shape, data)
    }

    /// Create a new tensor with all elements set to zero.
    pub fn zeros(shape: &[usize]) -> Result<Self, TensorError>
    where
        T: Clone + num_traits::Zero,
    {
        Self::from_shape_val(shape, T::zero())
    }

    /// Get the data of the tensor as a slice, in row-major order.
    #[inline]
    pub fn as_slice(&self) -> &[T] {
        self.storage.as_slice()
    }

    /// Consumes the tensor and returns the underlying vector.
    ///
    /// The buffer is cloned only if another tensor still shares it.
    pub fn into_vec(self) -> Vec<T>
    where
        T: Clone,
    {
        self.storage.into_vec()
    }

    /// Returns an iterator over the elements of the tensor in row-major order.
    #[inline]
    pub fn iter(&self) -> std::slice::Iter<'_, T> {
        self.as_slice().iter()
    }

    /// Returns the row-major strides of the tensor.
    pub fn strides(&self) -> Vec<usize> {
        shape::get_strides_from_shape(&self.shape)
    }

    /// Returns true if both tensors currently read from the same buffer.
    pub fn shares_storage_with<U>(&self, other: &Tensor<U>) -> bool {
        self.storage.ptr_eq(&other.storage)
    }
}

impl<T: Clone> TensorLike<T> for Tensor<T> {
    fn shape(&self) -> &[usize] {
        &self.shape
    }

    fn get(&self, pos: &[usize]) -> Result<&T, TensorError> {
        let index = position_to_index(pos, &self.shape)?;
        Ok(&self.as_slice()[index])
    }

    fn set(&mut self, pos: &[usize], value: T) -> Result<(), TensorError> {
        let index = position_to_index(pos, &self.shape)?;
        self.storage.as_mut_slice()[index] = value;
        Ok(())
    }

    fn map<U, F>(&self, f: F) -> Tensor<U>
    where
        F: FnMut(&T) -> U,
    {
        Tensor {
            storage: TensorStorage::from_vec(self.iter().map(f).collect()),
            shape: self.shape.clone(),
        }
    }

    fn view(&self, shape: &[usize]) -> Result<Self, TensorError> {
        validate_shape(shape)?;
        if checked_numel(shape) != Some(self.numel()) {
            return Err(TensorError::IncompatibleReshape {
                from: self.shape.clone(),
                to: shape.iter().map(|&s| s as isize).collect(),
                numel: self.numel(),
            });
        }
        Ok(Self {
            storage: self.storage.clone(),
            shape: shape.to_vec(),
        })
    }
}

impl<T> Clone for Tensor<T> {
    fn clone(&self) -> Self {
        Self {
            storage: self.storage.clone(),
            shape: self.shape.clone(),
        }
    }
}

impl<T: PartialEq> PartialEq for Tensor<T> {
    fn eq(&self, other: &Self) -> bool {
        self.shape == other.shape && self.as_slice() == other.as_slice()
    }
}

impl<T: std::fmt::Debug> std::fmt::Debug for Tensor<T> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Tensor")
            .field("shape", &self.shape)
            .field("data", &self.as_slice())
            .finish()
    }
}

impl<T: std::fmt::Display> std::fmt::Display for Tensor<T> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        const PREVIEW: usize = 5;
        let data = self.as_slice();
        write!(
            f,
            "Tensor with shape {:?} and {} elements: [",
            self.shape,
            data.len()
        )?;
        for (i, v) in data.iter().take(PREVIEW).enumerate() {
            if i > 0 {
                write!(f, ", ")?;
            }
            write!(f, "{v}")?;
        }
        if data.len() > PREVIEW {
            write!(f, ", ...")?;
        }
        write!(f, "]")
    }
}
