//! Cloneable shared state for handles that outlive a borrow of the game.

extern crate alloc;

use alloc::sync::Arc;

#[cfg(feature = "std")]
type Lock<T> = std::sync::Mutex<T>;

#[cfg(all(not(feature = "std"), feature = "alloc"))]
type Lock<T> = spin::Mutex<T>;

/// A value shared between clones, locked for the duration of a closure.
#[derive(Debug, Default)]
pub struct Shared<T>(Arc<Lock<T>>);

impl<T> Shared<T> {
    pub fn new(value: T) -> Self {
        Self(Arc::new(Lock::new(value)))
    }

    pub fn with<R>(&self, f: impl FnOnce(&mut T) -> R) -> R {
        #[cfg(feature = "std")]
        let mut guard = self
            .0
            .lock()
            .unwrap_or_else(std::sync::PoisonError::into_inner);
        #[cfg(all(not(feature = "std"), feature = "alloc"))]
        let mut guard = self.0.lock();

        f(&mut guard)
    }
}

impl<T> Clone for Shared<T> {
    fn clone(&self) -> Self {
        Self(Arc::clone(&self.0))
    }
}
