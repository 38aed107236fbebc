//! Macro for declaring named registry scopes.
//!
//! The macro wraps a lazily-initialized static [`Registry`](crate::Registry)
//! in a module with free-function forwarding, so many call sites can share
//! one scope without threading a handle through.

/// Declares a named registry scope with a single macro invocation.
///
/// The macro generates a module containing a static [`Registry`](crate::Registry)
/// and free functions that delegate to it. Each invocation produces a fully
/// isolated scope.
///
/// # Examples
///
/// ```rust
/// use lazy_registry::define_registry;
/// use std::sync::Arc;
///
/// // Create a named scope
/// define_registry!(app);
///
/// // First acquisition constructs, later ones reuse
/// let count: Arc<i32> = app::acquire_with(|| 42);
/// let again: Arc<i32> = app::acquire_with(|| 0);
///
/// assert!(Arc::ptr_eq(&count, &again));
/// assert_eq!(*again, 42);
/// ```
///
/// # Multiple Scopes
///
/// You can declare multiple isolated scopes:
///
/// ```rust
/// use lazy_registry::define_registry;
///
/// define_registry!(database);
/// define_registry!(cache);
///
/// // Each scope constructs its own instance of the same type
/// database::acquire_with(|| "db state".to_string());
/// cache::acquire_with(|| "cache state".to_string());
///
/// assert_eq!(&*database::get::<String>().unwrap(), "db state");
/// assert_eq!(&*cache::get::<String>().unwrap(), "cache state");
/// ```
///
/// # Handle-Based Usage
///
/// If a consumer wants the registry injected rather than named, hand it the
/// underlying handle:
///
/// ```rust
/// use lazy_registry::{define_registry, Registry};
///
/// define_registry!(app);
///
/// fn consumer(registry: &Registry) -> std::sync::Arc<u32> {
///     registry.acquire_with(|| 7)
/// }
///
/// let seven = consumer(&app::registry());
/// assert_eq!(*seven, 7);
/// ```
#[macro_export]
macro_rules! define_registry {
    ($name:ident) => {
        pub mod $name {
            use std::sync::{Arc, LazyLock};

            // Scope-private registry; everything below delegates to it.
            static REGISTRY: LazyLock<$crate::Registry> = LazyLock::new($crate::Registry::new);

            /// Returns a handle to this scope's registry, for injection into
            /// consumers that take a `&Registry`.
            pub fn registry() -> $crate::Registry {
                REGISTRY.clone()
            }

            /// Returns the singleton instance of `T`, constructing it on first call.
            pub fn acquire_with<T: Send + Sync + 'static>(init: impl FnOnce() -> T) -> Arc<T> {
                REGISTRY.acquire_with(init)
            }

            /// Fallible form of `acquire_with`; constructor errors propagate.
            pub fn try_acquire_with<T, E>(
                init: impl FnOnce() -> Result<T, E>,
            ) -> Result<Arc<T>, E>
            where
                T: Send + Sync + 'static,
            {
                REGISTRY.try_acquire_with(init)
            }

            /// Returns the singleton instance of `T`, constructing it via its
            /// `Construct` impl on first call.
            pub fn acquire<T: $crate::Construct>() -> Arc<T> {
                REGISTRY.acquire()
            }

            /// Retrieves the recorded instance of `T` without constructing.
            pub fn get<T: Send + Sync + 'static>() -> Result<Arc<T>, $crate::RegistryError> {
                REGISTRY.get()
            }

            /// Retrieves a clone of the recorded instance of `T`.
            pub fn get_cloned<T: Send + Sync + Clone + 'static>(
            ) -> Result<T, $crate::RegistryError> {
                REGISTRY.get_cloned()
            }

            /// Checks whether an instance of `T` is recorded.
            pub fn contains<T: Send + Sync + 'static>() -> Result<bool, $crate::RegistryError> {
                REGISTRY.contains::<T>()
            }

            /// Overrides the recorded instance of `T` with `value`.
            pub fn replace<T: Send + Sync + 'static>(value: T) {
                REGISTRY.replace(value)
            }

            /// Sets a tracing callback for this scope's operations.
            pub fn set_trace_callback(
                callback: impl Fn(&$crate::RegistryEvent) + Send + Sync + 'static,
            ) {
                REGISTRY.set_trace_callback(callback)
            }

            /// Clears the tracing callback.
            pub fn clear_trace_callback() {
                REGISTRY.clear_trace_callback()
            }

            #[doc(hidden)]
            pub fn reset() {
                REGISTRY.reset()
            }
        }
    };
}
