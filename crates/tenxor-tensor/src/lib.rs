#![deny(missing_docs)]
#![doc = env!("CARGO_PKG_DESCRIPTION")]
//!
//! # Overview
//!
//! `tenxor-tensor` stores a flat buffer of elements together with a shape and translates
//! between multi-dimensional positions and flat indices in row-major order (the last
//! dimension varies fastest).
//!
//! # Architecture
//!
//! - **Shape algebra** ([`shape`]): pure functions for reshape, squeeze, unsqueeze and
//!   broadcasting that only look at shapes.
//! - **Coordinate translation** ([`position`]): flat index to position and back, plus the
//!   row-major stepper every whole-tensor walk is built on.
//! - **Tensor** ([`Tensor`], [`TensorLike`]): the array type and its capability trait.
//! - **Storage** ([`storage::TensorStorage`]): the reference-counted, copy-on-write buffer
//!   shared between a tensor and its views.
//!
//! # Quick Start
//!
//! ```rust
//! use tenxor_tensor::{shape, Tensor, TensorLike};
//!
//! let t = Tensor::from_shape_vec(&[2, 3], vec![1.0, 2.0, 3.0, 4.0, 5.0, 6.0]).unwrap();
//! assert_eq!(t.get(&[1, 0]), Ok(&4.0));
//!
//! // derive a shape with an inferred dimension, then view the data under it
//! let new_shape = shape::reshape(t.shape(), &[3, -1]).unwrap();
//! let v = t.view(&new_shape).unwrap();
//! assert_eq!(v.shape(), &[3, 2]);
//!
//! let doubled = v.map(|x| x * 2.0);
//! assert_eq!(doubled.as_slice(), &[2.0, 4.0, 6.0, 8.0, 10.0, 12.0]);
//! ```

/// Position module translating between flat indices and multi-dimensional positions.
pub mod position;

/// Serde module for serialization and deserialization.
///
/// Enabled with the `serde` feature.
#[cfg(feature = "serde")]
pub mod serde;

/// Shape module containing the shape algebra.
pub mod shape;

/// Storage module containing the shared element buffer.
pub mod storage;

/// Tensor module containing the tensor type, its capability trait and the error types.
pub mod tensor;

pub use crate::position::{index_to_position, next_position, position_to_index, positions};
pub use crate::tensor::{ErrorKind, Tensor, TensorError, TensorLike};
