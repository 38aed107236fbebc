/// Capability trait for types the registry can construct on its own.
///
/// Implementing `Construct` lets a type participate in trait-based
/// acquisition ([`Registry::acquire`](crate::Registry::acquire)): the
/// registry invokes [`construct`](Self::construct) the first time the type
/// is requested and never again for that scope. This keeps the guard logic
/// in one place instead of repeating it per type.
///
/// The constructor takes no arguments by design: a singleton's identity is
/// its type, so anything its construction needs should be reachable from the
/// type itself (often `Self::default()`). For constructors that need
/// call-site inputs, use
/// [`Registry::acquire_with`](crate::Registry::acquire_with) instead.
///
/// # Examples
///
/// ```
/// use lazy_registry::{Construct, Registry};
/// use std::sync::Arc;
///
/// #[derive(Default)]
/// struct ConnectionPool {
///     capacity: usize,
/// }
///
/// impl Construct for ConnectionPool {
///     fn construct() -> Self {
///         Self { capacity: 16 }
///     }
/// }
///
/// let registry = Registry::new();
/// let pool: Arc<ConnectionPool> = registry.acquire();
/// assert_eq!(pool.capacity, 16);
/// ```
pub trait Construct: Send + Sync + Sized + 'static {
    /// Builds the singleton instance. Called at most once per registry scope.
    fn construct() -> Self;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_construct_builds_value() {
        struct Marker(u8);

        impl Construct for Marker {
            fn construct() -> Self {
                Marker(42)
            }
        }

        assert_eq!(Marker::construct().0, 42);
    }
}
