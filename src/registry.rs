//! Owned, type-keyed singleton registry with lazy construction.
//!
//! A [`Registry`] maps each type to the single instance of that type living
//! in its scope. The instance is constructed on first acquisition and reused
//! by every later acquisition, so repeated calls hand back `Arc`s to the same
//! allocation.
//!
//! The registry is an explicit value rather than a process-wide static: pass
//! it (or a cheap clone of the handle) to whoever needs it, and drop or
//! [`reset`](Registry::reset) it to get a fresh scope. Use the
//! [`define_registry!`](crate::define_registry) macro when a shared static
//! scope is more convenient.
//!
//! # Examples
//!
//! ```
//! use lazy_registry::Registry;
//! use std::sync::Arc;
//!
//! let registry = Registry::new();
//!
//! // First acquisition constructs the instance
//! let first: Arc<String> = registry.acquire_with(|| "shared".to_string());
//!
//! // Later acquisitions reuse it; the constructor is ignored
//! let second: Arc<String> = registry.acquire_with(|| "never built".to_string());
//!
//! assert!(Arc::ptr_eq(&first, &second));
//! assert_eq!(&*second, "shared");
//! ```

use std::{
    any::{Any, TypeId},
    collections::HashMap,
    fmt,
    sync::{Arc, Mutex},
};

use tracing::debug;

use crate::{Construct, RegistryError, RegistryEvent};

/// Type-erased instance store, keyed by the instance's `TypeId`.
type Store = HashMap<TypeId, Arc<dyn Any + Send + Sync>>;

/// User-supplied tracing callback, invoked for every registry operation.
type TraceCallback = Arc<dyn Fn(&RegistryEvent) + Send + Sync>;

/// State shared by all clones of one registry handle.
struct Shared {
    store: Mutex<Store>,
    trace: Mutex<Option<TraceCallback>>,
}

/// A lazily-constructing singleton registry.
///
/// For any type `T`, at most one instance exists per registry: the first
/// acquisition runs the supplied constructor and records the result, every
/// later acquisition returns the recorded `Arc<T>` unchanged. Distinct types
/// never share an instance, and distinct registries never share a store.
///
/// Cloning the handle is cheap and yields a view of the same store, which is
/// how the registry is meant to be injected into consumers.
///
/// All operations are thread-safe. Constructors run under the store lock so
/// they execute at most once per type; a constructor must therefore not
/// acquire from the same registry, or it will deadlock.
#[derive(Clone)]
pub struct Registry {
    shared: Arc<Shared>,
}

impl Registry {
    /// Creates an empty registry.
    pub fn new() -> Self {
        Self {
            shared: Arc::new(Shared {
                store: Mutex::new(HashMap::new()),
                trace: Mutex::new(None),
            }),
        }
    }

    // -------------------------------------------------------------------------------------------------
    // Tracing
    // -------------------------------------------------------------------------------------------------

    /// Sets a tracing callback that will be invoked on every registry operation.
    ///
    /// The callback receives a [`RegistryEvent`] describing the operation.
    /// It is invoked with no registry locks held, so it may call back into
    /// the registry.
    ///
    /// # Lock Poisoning Recovery
    ///
    /// If the trace lock is poisoned, this method automatically recovers by
    /// extracting the inner value.
    ///
    /// # Examples
    ///
    /// ```
    /// use lazy_registry::Registry;
    ///
    /// let registry = Registry::new();
    /// registry.set_trace_callback(|event| println!("[registry] {}", event));
    /// ```
    pub fn set_trace_callback(&self, callback: impl Fn(&RegistryEvent) + Send + Sync + 'static) {
        let mut guard = self.shared.trace.lock().unwrap_or_else(|p| p.into_inner());
        *guard = Some(Arc::new(callback));
    }

    /// Clears the tracing callback.
    ///
    /// After calling this, no events will be delivered. Stored instances are
    /// unaffected.
    pub fn clear_trace_callback(&self) {
        let mut guard = self.shared.trace.lock().unwrap_or_else(|p| p.into_inner());
        *guard = None;
    }

    /// Emits a registry event using the current callback, if any.
    fn emit_event(&self, event: &RegistryEvent) {
        // Clone the callback out so it runs without the trace lock held.
        let callback = {
            let guard = self.shared.trace.lock().unwrap_or_else(|p| p.into_inner());
            guard.clone()
        };
        if let Some(callback) = callback {
            callback(event);
        }
    }

    // -------------------------------------------------------------------------------------------------
    // Acquisition
    // -------------------------------------------------------------------------------------------------

    /// Returns the singleton instance of `T`, constructing it on first call.
    ///
    /// If no instance of `T` is recorded, `init` runs exactly once (under the
    /// store lock) and its result is recorded; otherwise `init` is dropped
    /// unused and the recorded instance is returned. Two acquisitions of the
    /// same type on the same registry always satisfy `Arc::ptr_eq`.
    ///
    /// `init` must not acquire from the same registry (deadlock).
    ///
    /// # Examples
    ///
    /// ```
    /// use lazy_registry::Registry;
    /// use std::sync::Arc;
    ///
    /// let registry = Registry::new();
    ///
    /// let a = registry.acquire_with(|| vec![1u8, 2, 3]);
    /// let b = registry.acquire_with(|| vec![9u8]); // ignored, already built
    ///
    /// assert!(Arc::ptr_eq(&a, &b));
    /// assert_eq!(&*b, &[1, 2, 3]);
    /// ```
    pub fn acquire_with<T: Send + Sync + 'static>(&self, init: impl FnOnce() -> T) -> Arc<T> {
        self.acquire_arc_with(|| Arc::new(init()))
    }

    /// Like [`acquire_with`](Self::acquire_with), but the constructor yields
    /// an `Arc<T>` directly.
    ///
    /// Useful when the instance already lives in an `Arc`, avoiding an extra
    /// allocation on first acquisition.
    pub fn acquire_arc_with<T: Send + Sync + 'static>(
        &self,
        init: impl FnOnce() -> Arc<T>,
    ) -> Arc<T> {
        let type_name = std::any::type_name::<T>();

        let mut store = self.shared.store.lock().unwrap_or_else(|p| p.into_inner());

        // Entries are keyed by TypeId, so a stored value that fails the
        // downcast cannot occur through this API; treat it as absent.
        let existing = store
            .get(&TypeId::of::<T>())
            .and_then(|any_arc| any_arc.clone().downcast::<T>().ok());

        let (instance, created) = match existing {
            Some(instance) => (instance, false),
            None => {
                let instance = init();
                store.insert(TypeId::of::<T>(), instance.clone());
                (instance, true)
            }
        };

        drop(store);

        if created {
            debug!(type_name, "created singleton instance");
            self.emit_event(&RegistryEvent::Created { type_name });
        } else {
            debug!(type_name, "reusing singleton instance");
            self.emit_event(&RegistryEvent::Reused { type_name });
        }

        instance
    }

    /// Fallible form of [`acquire_with`](Self::acquire_with).
    ///
    /// If no instance of `T` is recorded and `init` fails, the error
    /// propagates unchanged and nothing is recorded, so a later acquisition
    /// will retry construction. The registry adds no failure modes of its
    /// own.
    ///
    /// # Errors
    ///
    /// Whatever `init` returns.
    ///
    /// # Examples
    ///
    /// ```
    /// use lazy_registry::Registry;
    ///
    /// let registry = Registry::new();
    ///
    /// let err: Result<_, String> = registry.try_acquire_with(|| Err::<u32, _>("boom".into()));
    /// assert!(err.is_err());
    ///
    /// // The failed attempt recorded nothing; this one constructs.
    /// let ok: Result<_, String> = registry.try_acquire_with(|| Ok(7u32));
    /// assert_eq!(*ok.unwrap(), 7);
    /// ```
    pub fn try_acquire_with<T, E>(
        &self,
        init: impl FnOnce() -> Result<T, E>,
    ) -> Result<Arc<T>, E>
    where
        T: Send + Sync + 'static,
    {
        let type_name = std::any::type_name::<T>();

        let mut store = self.shared.store.lock().unwrap_or_else(|p| p.into_inner());

        let existing = store
            .get(&TypeId::of::<T>())
            .and_then(|any_arc| any_arc.clone().downcast::<T>().ok());

        if let Some(instance) = existing {
            drop(store);
            debug!(type_name, "reusing singleton instance");
            self.emit_event(&RegistryEvent::Reused { type_name });
            return Ok(instance);
        }

        let instance = Arc::new(init()?);
        store.insert(TypeId::of::<T>(), instance.clone());
        drop(store);

        debug!(type_name, "created singleton instance");
        self.emit_event(&RegistryEvent::Created { type_name });

        Ok(instance)
    }

    /// Returns the singleton instance of `T`, constructing it via
    /// [`Construct`] on first call.
    ///
    /// This is the uniform, trait-based form: any type implementing
    /// [`Construct`] participates without registry-specific glue at the call
    /// site.
    ///
    /// # Examples
    ///
    /// ```
    /// use lazy_registry::{Construct, Registry};
    /// use std::sync::Arc;
    ///
    /// struct AppState {
    ///     motd: String,
    /// }
    ///
    /// impl Construct for AppState {
    ///     fn construct() -> Self {
    ///         Self { motd: "hello".to_string() }
    ///     }
    /// }
    ///
    /// let registry = Registry::new();
    /// let s1: Arc<AppState> = registry.acquire();
    /// let s2: Arc<AppState> = registry.acquire();
    ///
    /// assert!(Arc::ptr_eq(&s1, &s2));
    /// assert_eq!(s1.motd, "hello");
    /// ```
    pub fn acquire<T: Construct>(&self) -> Arc<T> {
        self.acquire_with(T::construct)
    }

    // -------------------------------------------------------------------------------------------------
    // Lookup
    // -------------------------------------------------------------------------------------------------

    /// Retrieves the recorded instance of `T` without constructing.
    ///
    /// # Errors
    ///
    /// - [`RegistryError::TypeNotFound`] if no instance of `T` is recorded
    /// - [`RegistryError::TypeMismatch`] if the stored value fails to downcast (cannot
    ///   occur through the public API)
    ///
    /// # Examples
    ///
    /// ```
    /// use lazy_registry::Registry;
    /// use std::sync::Arc;
    ///
    /// let registry = Registry::new();
    /// assert!(registry.get::<u32>().is_err());
    ///
    /// registry.acquire_with(|| 42u32);
    /// let num: Arc<u32> = registry.get().unwrap();
    /// assert_eq!(*num, 42);
    /// ```
    pub fn get<T: Send + Sync + 'static>(&self) -> Result<Arc<T>, RegistryError> {
        let type_name = std::any::type_name::<T>();

        let store = self
            .shared
            .store
            .lock()
            .map_err(|_| RegistryError::RegistryLock)?;

        let any_arc_opt = store.get(&TypeId::of::<T>()).cloned();

        drop(store);

        let result: Result<Arc<T>, RegistryError> = match any_arc_opt {
            Some(any_arc) => any_arc
                .downcast::<T>()
                .map_err(|_| RegistryError::TypeMismatch { type_name }),
            None => Err(RegistryError::TypeNotFound { type_name }),
        };

        self.emit_event(&RegistryEvent::Get {
            type_name,
            found: result.is_ok(),
        });

        result
    }

    /// Retrieves a clone of the recorded instance of `T`.
    ///
    /// Useful when an owned value is needed rather than shared access
    /// through an `Arc`.
    ///
    /// # Errors
    ///
    /// Same as [`get`](Self::get).
    pub fn get_cloned<T: Send + Sync + Clone + 'static>(&self) -> Result<T, RegistryError> {
        let arc = self.get::<T>()?;
        Ok((*arc).clone())
    }

    /// Checks whether an instance of `T` is recorded.
    ///
    /// # Errors
    ///
    /// - [`RegistryError::RegistryLock`] if the store lock is poisoned
    ///
    /// # Examples
    ///
    /// ```
    /// use lazy_registry::Registry;
    ///
    /// let registry = Registry::new();
    /// assert!(!registry.contains::<u32>().unwrap());
    ///
    /// registry.acquire_with(|| 1u32);
    /// assert!(registry.contains::<u32>().unwrap());
    /// ```
    pub fn contains<T: Send + Sync + 'static>(&self) -> Result<bool, RegistryError> {
        let found = self
            .shared
            .store
            .lock()
            .map(|store| store.contains_key(&TypeId::of::<T>()))
            .map_err(|_| RegistryError::RegistryLock)?;

        self.emit_event(&RegistryEvent::Contains {
            type_name: std::any::type_name::<T>(),
            found,
        });

        Ok(found)
    }

    /// Returns the number of recorded instances.
    pub fn len(&self) -> usize {
        self.shared
            .store
            .lock()
            .unwrap_or_else(|p| p.into_inner())
            .len()
    }

    /// Returns `true` if no instance has been recorded.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    // -------------------------------------------------------------------------------------------------
    // Override and reset hooks
    // -------------------------------------------------------------------------------------------------

    /// Overrides the recorded instance of `T` with `value`.
    ///
    /// This is the explicit escape hatch from the build-once rule, intended
    /// for tests and hot-swap scenarios. `Arc`s handed out before the
    /// replacement keep the old instance; only later acquisitions see the
    /// new one.
    pub fn replace<T: Send + Sync + 'static>(&self, value: T) {
        self.replace_arc(Arc::new(value));
    }

    /// Like [`replace`](Self::replace), but takes an `Arc<T>` directly.
    ///
    /// # Lock Poisoning Recovery
    ///
    /// If the store lock is poisoned, this method automatically recovers.
    pub fn replace_arc<T: Send + Sync + 'static>(&self, value: Arc<T>) {
        self.shared
            .store
            .lock()
            .unwrap_or_else(|p| p.into_inner())
            .insert(TypeId::of::<T>(), value);

        let type_name = std::any::type_name::<T>();
        debug!(type_name, "replaced singleton instance");
        self.emit_event(&RegistryEvent::Replaced { type_name });
    }

    /// Removes all recorded instances, returning the registry to its empty
    /// state.
    ///
    /// Primarily intended for test isolation. Already-retrieved `Arc<T>`
    /// references remain valid; the tracing callback is unaffected (use
    /// [`clear_trace_callback`](Self::clear_trace_callback) for that).
    #[doc(hidden)]
    pub fn reset(&self) {
        if let Ok(mut store) = self.shared.store.lock() {
            store.clear();
        }

        debug!("reset registry");
        self.emit_event(&RegistryEvent::Reset {});
    }
}

impl Default for Registry {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Debug for Registry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Registry")
            .field("instances", &self.len())
            .finish()
    }
}

// -------------------------------------------------------------------------------------------------
// Tests
// -------------------------------------------------------------------------------------------------
