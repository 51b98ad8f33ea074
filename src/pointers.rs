//! Pointer Types
//!
//! A matrix is not internally synchronized: `apply`, `undo` and elimination all read then write
//! the grid and the history. [`MatrixPtr`] shares one matrix between threads and takes the write
//! lock for the whole duration of each of those calls, so they never interleave.
//!

use crate::error::MatrixError;
use crate::matrix::*;
use crate::parking_lot::lock_api::{RwLockReadGuard, RwLockWriteGuard};
use crate::parking_lot::{RawRwLock, RwLock};
use std::sync::Arc;

pub trait RwLockPtr<ObjType> {
    fn new_ptr(ptr: Arc<RwLock<ObjType>>) -> Self;

    fn new_value(obj: ObjType) -> Self;

    fn ptr(&self) -> &Arc<RwLock<ObjType>>;

    #[inline(always)]
    fn read_recursive(&self) -> RwLockReadGuard<RawRwLock, ObjType> {
        self.ptr().read_recursive()
    }

    #[inline(always)]
    fn write(&self) -> RwLockWriteGuard<RawRwLock, ObjType> {
        self.ptr().write()
    }

    fn ptr_eq(&self, other: &Self) -> bool {
        Arc::ptr_eq(self.ptr(), other.ptr())
    }
}

pub struct ArcRwLock<T> {
    ptr: Arc<RwLock<T>>,
}

impl<T: Send + Sync> Clone for ArcRwLock<T> {
    fn clone(&self) -> Self {
        Self::new_ptr(Arc::clone(self.ptr()))
    }
}

impl<T: Send + Sync> RwLockPtr<T> for ArcRwLock<T> {
    fn new_ptr(ptr: Arc<RwLock<T>>) -> Self {
        Self { ptr }
    }
    fn new_value(obj: T) -> Self {
        Self::new_ptr(Arc::new(RwLock::new(obj)))
    }
    #[inline(always)]
    fn ptr(&self) -> &Arc<RwLock<T>> {
        &self.ptr
    }
}

impl<T: Send + Sync> PartialEq for ArcRwLock<T> {
    fn eq(&self, other: &Self) -> bool {
        self.ptr_eq(other)
    }
}

impl<T: Send + Sync> Eq for ArcRwLock<T> {}

pub type MatrixPtr = ArcRwLock<RationalMatrix>;

impl MatrixPtr {
    pub fn apply(&self, operation: ElementaryRowOperation) -> Result<(), MatrixError> {
        self.write().apply(operation)
    }

    pub fn undo(&self) -> Option<ElementaryRowOperation> {
        self.write().undo()
    }

    pub fn eliminate(&self) -> EchelonInfo {
        self.write().eliminate()
    }

    /// a consistent copy of the current state
    pub fn cloned(&self) -> RationalMatrix {
        self.read_recursive().clone()
    }
}

impl std::fmt::Debug for MatrixPtr {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        let value = self.read_recursive();
        write!(f, "{:?}", value)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::util::*;

    #[test]
    fn pointers_shared_matrix() {
        // cargo test pointers_shared_matrix -- --nocapture
        let original = RationalMatrix::from_integers(&[vec![1, 2, 3], vec![4, 5, 6], vec![7, 8, 10]], true).unwrap();
        let matrix_ptr = MatrixPtr::new_value(original.clone());
        let cloned_ptr = matrix_ptr.clone();
        assert!(matrix_ptr.ptr_eq(&cloned_ptr));
        assert_eq!(matrix_ptr, cloned_ptr);
        assert!(matches!(
            matrix_ptr.apply(ElementaryRowOperation::swap(1, 4).unwrap()),
            Err(MatrixError::IndexOutOfRange { index: 4, bound: 3 })
        ));
        std::thread::scope(|scope| {
            for thread_index in 0..4i64 {
                let ptr = matrix_ptr.clone();
                scope.spawn(move || {
                    for round in 0..25i64 {
                        let operation = ElementaryRowOperation::add_scaled_row(
                            1 + (round as usize % 3),
                            1 + ((round as usize + 1) % 3),
                            rational(thread_index + 1, round + 1),
                        )
                        .unwrap();
                        ptr.apply(operation).unwrap();
                    }
                });
            }
        });
        assert_eq!(matrix_ptr.read_recursive().history().len(), 100);
        while cloned_ptr.undo().is_some() {}
        assert_eq!(matrix_ptr.cloned(), original);
        let info = matrix_ptr.eliminate();
        assert_eq!(info.rank(), 3);
        assert!(matrix_ptr.read_recursive().inverse().is_ok());
        println!("{matrix_ptr:?}");
    }
}
