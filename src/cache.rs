//! Explicit content cache cells.
//!
//! A [`ContentCell`] holds an optional computed value. Whether a cached value
//! is reused is decided per call by a [`CachePolicy`], so the same cell can
//! serve a production request (compute once) and a debug request (always
//! recompute) without any hidden lazy-attribute state.
//!
//! The cell never holds its lock while computing: two threads racing on an
//! empty cell both compute and the last writer wins. Computations are
//! deterministic, so the only cost is redundant work.

use parking_lot::RwLock;

/// Whether a cached value may be reused.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CachePolicy {
    /// Compute on first access, reuse for the lifetime of the cell.
    ComputeOnce,
    /// Compute on every access and never store the result.
    AlwaysRecompute,
}

impl CachePolicy {
    /// `AlwaysRecompute` when `live`, `ComputeOnce` otherwise.
    #[inline]
    pub const fn from_live(live: bool) -> Self {
        if live {
            Self::AlwaysRecompute
        } else {
            Self::ComputeOnce
        }
    }
}

/// Cache cell for a computed value.
#[derive(Debug)]
pub struct ContentCell<T> {
    slot: RwLock<Option<T>>,
}

impl<T: Clone> ContentCell<T> {
    pub const fn new() -> Self {
        Self {
            slot: RwLock::new(None),
        }
    }

    /// Return the cached value, or compute it.
    ///
    /// With [`CachePolicy::AlwaysRecompute`] the cached value (if any) is
    /// ignored and the fresh result is not stored.
    pub fn get_or_try_compute<E>(
        &self,
        policy: CachePolicy,
        compute: impl FnOnce() -> Result<T, E>,
    ) -> Result<T, E> {
        if policy == CachePolicy::AlwaysRecompute {
            return compute();
        }

        if let Some(value) = self.slot.read().as_ref() {
            return Ok(value.clone());
        }

        let value = compute()?;
        *self.slot.write() = Some(value.clone());
        Ok(value)
    }

    #[cfg(test)]
    fn cached(&self) -> Option<T> {
        self.slot.read().clone()
    }

    #[cfg(test)]
    fn is_filled(&self) -> bool {
        self.slot.read().is_some()
    }
}

impl<T: Clone> Default for ContentCell<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T: Clone> Clone for ContentCell<T> {
    fn clone(&self) -> Self {
        Self {
            slot: RwLock::new(self.slot.read().clone()),
        }
    }
}
