//! Shared access to a namespace
//!
//! The namespace itself is single-threaded and lock-free. Callers that need it
//! from several threads wrap it here: one read-write lock around the whole
//! tree, so every operation still runs to completion before the next starts.

use crate::tree::FileSystem;
use parking_lot::RwLock;
use std::sync::Arc;

/// Cloneable handle to a namespace behind a read-write lock.
pub struct SharedFileSystem<T> {
    inner: Arc<RwLock<FileSystem<T>>>,
}

impl<T> SharedFileSystem<T> {
    pub fn new(fs: FileSystem<T>) -> Self {
        Self {
            inner: Arc::new(RwLock::new(fs)),
        }
    }

    /// Run `f` with shared access. Any number of readers may run at once.
    pub fn read<R>(&self, f: impl FnOnce(&FileSystem<T>) -> R) -> R {
        let guard = self.inner.read();
        f(&guard)
    }

    /// Run `f` with exclusive access.
    pub fn write<R>(&self, f: impl FnOnce(&mut FileSystem<T>) -> R) -> R {
        let mut guard = self.inner.write();
        f(&mut guard)
    }
}

impl<T> Clone for SharedFileSystem<T> {
    fn clone(&self) -> Self {
        Self {
            inner: Arc::clone(&self.inner),
        }
    }
}

impl<T> Default for SharedFileSystem<T> {
    fn default() -> Self {
        Self::new(FileSystem::new())
    }
}
