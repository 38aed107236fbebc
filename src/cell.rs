//! Single-slot lazy singleton cell.
//!
//! Where [`Registry`](crate::Registry) guards many types behind one store,
//! [`SingletonCell`] guards exactly one: the check-and-set lives next to the
//! type it protects. The occupied/empty state of the slot doubles as the
//! "already initialized" flag, so repeated `get_or_init` calls short-circuit
//! the init closure while still handing back the stored instance.
//!
//! `new` is `const`, so a cell can live in a `static` when a process-wide
//! scope is wanted.

use std::sync::{Arc, Mutex};

use tracing::debug;

/// A lazily-initialized slot holding at most one instance of `T`.
///
/// The instance is constructed on the first [`get_or_init`](Self::get_or_init)
/// call and reused by every later one; all callers share the same `Arc<T>`.
///
/// # Examples
///
/// ```
/// use lazy_registry::SingletonCell;
/// use std::sync::Arc;
///
/// static GREETING: SingletonCell<String> = SingletonCell::new();
///
/// let first = GREETING.get_or_init(|| "hello".to_string());
/// let second = GREETING.get_or_init(|| "never built".to_string());
///
/// assert!(Arc::ptr_eq(&first, &second));
/// assert_eq!(&*second, "hello");
/// ```
pub struct SingletonCell<T> {
    slot: Mutex<Option<Arc<T>>>,
}

impl<T> SingletonCell<T> {
    /// Creates an empty cell.
    pub const fn new() -> Self {
        Self {
            slot: Mutex::new(None),
        }
    }

    /// Returns the instance, constructing it on first call.
    ///
    /// If the slot is empty, `init` runs exactly once and its result is
    /// stored; otherwise `init` is dropped unused. The slot lock is held
    /// while `init` runs, so `init` must not touch the same cell.
    pub fn get_or_init(&self, init: impl FnOnce() -> T) -> Arc<T> {
        let mut slot = self.slot.lock().unwrap_or_else(|p| p.into_inner());

        match &*slot {
            Some(instance) => {
                debug!(type_name = std::any::type_name::<T>(), "reusing singleton instance");
                instance.clone()
            }
            None => {
                let instance = Arc::new(init());
                *slot = Some(instance.clone());
                debug!(type_name = std::any::type_name::<T>(), "created singleton instance");
                instance
            }
        }
    }

    /// Fallible form of [`get_or_init`](Self::get_or_init).
    ///
    /// If the slot is empty and `init` fails, the error propagates and the
    /// slot stays empty, so a later call will retry construction.
    ///
    /// # Errors
    ///
    /// Whatever `init` returns.
    pub fn try_get_or_init<E>(&self, init: impl FnOnce() -> Result<T, E>) -> Result<Arc<T>, E> {
        let mut slot = self.slot.lock().unwrap_or_else(|p| p.into_inner());

        if let Some(instance) = &*slot {
            debug!(type_name = std::any::type_name::<T>(), "reusing singleton instance");
            return Ok(instance.clone());
        }

        let instance = Arc::new(init()?);
        *slot = Some(instance.clone());
        debug!(type_name = std::any::type_name::<T>(), "created singleton instance");
        Ok(instance)
    }

    /// Returns the stored instance without constructing, if any.
    pub fn get(&self) -> Option<Arc<T>> {
        self.slot
            .lock()
            .unwrap_or_else(|p| p.into_inner())
            .clone()
    }

    /// Returns `true` if the instance has been constructed.
    pub fn is_initialized(&self) -> bool {
        self.slot
            .lock()
            .unwrap_or_else(|p| p.into_inner())
            .is_some()
    }

    /// Empties the slot so the next `get_or_init` constructs afresh.
    ///
    /// Intended for test isolation. Already-retrieved `Arc<T>` references
    /// remain valid.
    #[doc(hidden)]
    pub fn reset(&self) {
        let mut slot = self.slot.lock().unwrap_or_else(|p| p.into_inner());
        *slot = None;
    }
}

impl<T> Default for SingletonCell<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T> std::fmt::Debug for SingletonCell<T> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SingletonCell")
            .field("initialized", &self.is_initialized())
            .finish()
    }
}

// -------------------------------------------------------------------------------------------------
// Tests
// -------------------------------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicUsize, Ordering};

    #[test]
    fn test_init_runs_once() {
        let cell = SingletonCell::new();
        let calls = AtomicUsize::new(0);

        let first = cell.get_or_init(|| {
            calls.fetch_add(1, Ordering::SeqCst);
            "data".to_string()
        });
        let second = cell.get_or_init(|| {
            calls.fetch_add(1, Ordering::SeqCst);
            "other".to_string()
        });

        assert_eq!(calls.load(Ordering::SeqCst), 1);
        assert!(Arc::ptr_eq(&first, &second));
        assert_eq!(&*second, "data");
    }

    #[test]
    fn test_get_before_and_after_init() {
        let cell = SingletonCell::new();
        assert!(cell.get().is_none());
        assert!(!cell.is_initialized());

        cell.get_or_init(|| 42i32);

        assert!(cell.is_initialized());
        assert_eq!(*cell.get().unwrap(), 42);
    }

    #[test]
    fn test_try_get_or_init_failure_leaves_slot_empty() {
        let cell: SingletonCell<u32> = SingletonCell::new();

        let result: Result<Arc<u32>, &str> = cell.try_get_or_init(|| Err("constructor failed"));
        assert_eq!(result.unwrap_err(), "constructor failed");
        assert!(!cell.is_initialized());

        let ok = cell.try_get_or_init::<&str>(|| Ok(9));
        assert_eq!(*ok.unwrap(), 9);
    }

    #[test]
    fn test_reset_allows_reconstruction() {
        let cell = SingletonCell::new();

        let first = cell.get_or_init(|| 1u8);
        cell.reset();
        let second = cell.get_or_init(|| 2u8);

        assert_eq!(*first, 1);
        assert_eq!(*second, 2);
        assert!(!Arc::ptr_eq(&first, &second));
    }

    #[test]
    fn test_static_cell_shared_across_threads() {
        use std::thread;

        static CELL: SingletonCell<u64> = SingletonCell::new();
        static CALLS: AtomicUsize = AtomicUsize::new(0);

        let handles: Vec<_> = (0..8)
            .map(|_| {
                thread::spawn(|| {
                    CELL.get_or_init(|| {
                        CALLS.fetch_add(1, Ordering::SeqCst);
                        7
                    })
                })
            })
            .collect();

        let instances: Vec<Arc<u64>> = handles.into_iter().map(|h| h.join().unwrap()).collect();

        assert_eq!(CALLS.load(Ordering::SeqCst), 1);
        for pair in instances.windows(2) {
            assert!(Arc::ptr_eq(&pair[0], &pair[1]));
        }
    }

    #[test]
    fn test_debug_reports_state() {
        let cell: SingletonCell<i32> = SingletonCell::new();
        assert_eq!(format!("{:?}", cell), "SingletonCell { initialized: false }");

        cell.get_or_init(|| 1);
        assert_eq!(format!("{:?}", cell), "SingletonCell { initialized: true }");
    }
}
