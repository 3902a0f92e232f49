#![deny(missing_docs)]
#![doc = env!("CARGO_PKG_DESCRIPTION")]

/// Error types for tensor operations.
///
/// Defines [`TensorOpsError`] for handling failures during tensor computations.
pub mod error;

/// Broadcasting element-wise operations.
///
/// [`pointwise::pointwise`] combines two tensors of broadcast-compatible shapes with any binary
/// function; the arithmetic helpers are thin wrappers around it.
pub mod pointwise;

/// Reductions along one dimension.
///
/// [`reduce::reduce`] folds every slice along a dimension with a caller supplied seed and
/// combine function; `sum`, `product`, `max` and `min` are built on it.
pub mod reduce;

pub use error::TensorOpsError;
pub use pointwise::pointwise;
pub use reduce::reduce;
