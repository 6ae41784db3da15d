use std::sync::Mutex;

use crate::sync::lock;

/// A mutation was attempted against a version of the store that has since been replaced.
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
#[error("store changed since version {expected} (now at {current})")]
pub struct StaleVersion {
    pub expected: u64,
    pub current: u64,
}

struct Versioned<T> {
    version: u64,
    value: T,
}

/// Single-writer cell: every write holds the lock and bumps the version, so a
/// hydration swap can never interleave with a partial CRUD update.
pub(crate) struct VersionedCell<T> {
    inner: Mutex<Versioned<T>>,
}

impl<T: Default> Default for VersionedCell<T> {
    fn default() -> Self {
        Self::new(T::default())
    }
}

impl<T> VersionedCell<T> {
    pub(crate) fn new(value: T) -> Self {
        Self {
            inner: Mutex::new(Versioned { version: 0, value }),
        }
    }

    pub(crate) fn version(&self) -> u64 {
        lock(&self.inner).version
    }

    pub(crate) fn read<R>(&self, f: impl FnOnce(&T) -> R) -> R {
        f(&lock(&self.inner).value)
    }

    pub(crate) fn update<R>(&self, f: impl FnOnce(&mut T) -> R) -> R {
        let mut guard = lock(&self.inner);
        guard.version += 1;
        f(&mut guard.value)
    }

    pub(crate) fn update_if_version<R>(
        &self,
        expected: u64,
        f: impl FnOnce(&mut T) -> R,
    ) -> Result<R, StaleVersion> {
        let mut guard = lock(&self.inner);
        if guard.version != expected {
            return Err(StaleVersion {
                expected,
                current: guard.version,
            });
        }
        guard.version += 1;
        Ok(f(&mut guard.value))
    }
}
