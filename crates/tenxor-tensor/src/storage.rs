//! Arc-based storage for cheap clones and zero-copy views.
//!
//! Clones and views of a tensor share one reference-counted buffer. Writing goes through
//! [`TensorStorage::as_mut_slice`], which detaches a shared buffer first, so a write is only
//! ever visible through the storage it was made on.

use std::sync::Arc;

/// Reference-counted, copy-on-write buffer of tensor elements.
///
/// # Thread Safety
///
/// `TensorStorage` is `Send + Sync` when `T: Send + Sync`.
pub struct TensorStorage<T> {
    data: Arc<Vec<T>>,
}

impl<T> TensorStorage<T> {
    /// Creates a new storage that takes ownership of `data`.
    pub fn from_vec(data: Vec<T>) -> Self {
        Self {
            data: Arc::new(data),
        }
    }

    /// Returns the storage data as a slice.
    #[inline]
    pub fn as_slice(&self) -> &[T] {
        &self.data
    }

    /// Returns the number of elements in the storage.
    #[inline]
    pub fn len(&self) -> usize {
        self.data.len()
    }

    /// Returns true if the storage holds no elements.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    /// Returns true if no other storage shares this buffer.
    #[inline]
    pub fn is_unique(&self) -> bool {
        Arc::strong_count(&self.data) == 1
    }

    /// Returns true if both storages read from the same buffer.
    pub fn ptr_eq<U>(&self, other: &TensorStorage<U>) -> bool {
        std::ptr::eq(
            Arc::as_ptr(&self.data) as *const (),
            Arc::as_ptr(&other.data) as *const (),
        )
    }

    /// Returns the storage data as a mutable slice.
    ///
    /// If the buffer is shared, it is cloned first and this storage keeps the private copy.
    pub fn as_mut_slice(&mut self) -> &mut [T]
    where
        T: Clone,
    {
        Arc::make_mut(&mut self.data).as_mut_slice()
    }

    /// Consumes the storage and returns the underlying vector.
    ///
    /// The buffer is moved out when this is the last reference, cloned otherwise.
    pub fn into_vec(self) -> Vec<T>
    where
        T: Clone,
    {
        Arc::try_unwrap(self.data).unwrap_or_else(|shared| (*shared).clone())
    }
}

impl<T> Clone for TensorStorage<T> {
    fn clone(&self) -> Self {
        Self {
            data: Arc::clone(&self.data),
        }
    }
}

impl<T> std::fmt::Debug for TensorStorage<T> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TensorStorage")
            .field("len", &self.len())
            .field("unique", &self.is_unique())
            .finish()
    }
}
