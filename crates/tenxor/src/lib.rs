//! `tenxor` bundles the tensor container and its operations under one crate.
//!
//! ```rust
//! use tenxor::tensor::{Tensor, TensorLike};
//! use tenxor::tensor_ops::reduce::sum;
//!
//! let t = Tensor::from_shape_vec(&[2, 3], vec![1, 2, 3, 4, 5, 6]).unwrap();
//! assert_eq!(sum(&t, 1).unwrap().as_slice(), &[6, 15]);
//! assert_eq!(t.rank(), 2);
//! ```

#[doc(inline)]
pub use tenxor_tensor as tensor;

#[doc(inline)]
pub use tenxor_tensor_ops as tensor_ops;
