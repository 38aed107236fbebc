//! Integration tests for registry isolation.
//!
//! Distinct registries never share instances, whether they are owned values
//! or macro-declared static scopes. This is what makes the registry usable
//! in tests: each test builds its own scope instead of relying on process
//! restart to discard state.

use lazy_registry::{define_registry, Registry};
use std::sync::Arc;

#[test]
fn test_owned_registries_do_not_share_instances() {
    let a = Registry::new();
    let b = Registry::new();

    let in_a = a.acquire_with(|| "state for A".to_string());
    let in_b = b.acquire_with(|| "state for B".to_string());

    assert!(!Arc::ptr_eq(&in_a, &in_b));
    assert_eq!(&*in_a, "state for A");
    assert_eq!(&*in_b, "state for B");
}

#[test]
fn test_multiple_isolated_scopes() {
    // Declare three separate scopes
    define_registry!(database);
    define_registry!(cache);
    define_registry!(config);

    // Same type, each scope constructs its own instance
    database::acquire_with(|| "postgresql://localhost".to_string());
    cache::acquire_with(|| "redis://localhost".to_string());
    config::acquire_with(|| "app_config".to_string());

    let db: Arc<String> = database::get().unwrap();
    let cache_val: Arc<String> = cache::get().unwrap();
    let cfg: Arc<String> = config::get().unwrap();

    assert_eq!(&**db, "postgresql://localhost");
    assert_eq!(&**cache_val, "redis://localhost");
    assert_eq!(&**cfg, "app_config");
}

#[test]
fn test_scope_does_not_leak_between_scopes() {
    define_registry!(isolated_a);
    define_registry!(isolated_b);

    isolated_a::acquire_with(|| "only in A".to_string());

    assert!(isolated_a::contains::<String>().unwrap());
    assert!(!isolated_b::contains::<String>().unwrap());
}

#[test]
fn test_cloned_handle_is_the_same_scope() {
    let registry = Registry::new();
    let injected = registry.clone();

    // A consumer holding the clone acquires from the same store
    let original = registry.acquire_with(|| 42u32);
    let via_clone = injected.acquire_with(|| 0u32);

    assert!(Arc::ptr_eq(&original, &via_clone));
}

#[test]
fn test_reset_isolates_test_cases() {
    // The pattern for tests sharing one registry: reset between cases
    let registry = Registry::new();

    registry.acquire_with(|| "case one state".to_string());
    assert!(registry.contains::<String>().unwrap());

    registry.reset();

    assert!(registry.is_empty());
    let fresh = registry.acquire_with(|| "case two state".to_string());
    assert_eq!(&*fresh, "case two state");
}
