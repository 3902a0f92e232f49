use tenxor_tensor::{ErrorKind, TensorError};
use thiserror::Error;

/// An error type for tensor operations.
#[derive(Error, Debug, PartialEq)]
pub enum TensorOpsError {
    /// The dimension to perform the operation over does not exist in the tensor.
    #[error("Dimension out of bounds. The dimension {0} is out of bounds for a tensor of rank {1}.")]
    DimOutOfBounds(isize, usize),

    /// Tensor error
    #[error("Error with the tensor: {0}")]
    TensorError(#[from] TensorError),
}

impl TensorOpsError {
    /// Returns the category of the error.
    pub fn kind(&self) -> ErrorKind {
        match self {
            Self::DimOutOfBounds(..) => ErrorKind::Shape,
            Self::TensorError(e) => e.kind(),
        }
    }
}
