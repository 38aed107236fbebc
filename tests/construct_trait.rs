//! Integration tests for trait-based acquisition and real-world patterns.
//!
//! `Construct` lets many types participate in the singleton guarantee
//! uniformly: the guard logic lives in the registry, each type only supplies
//! its constructor.
//!
//! NOTE: Tests touching the shared `services` scope use #[serial] because
//! they share one static registry. Running them in parallel could cause
//! interference.

use lazy_registry::{define_registry, Construct, Registry};
use serial_test::serial;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

// Shared scope for the service-locator style tests
define_registry!(services);

static DB_CONSTRUCTIONS: AtomicUsize = AtomicUsize::new(0);

struct DatabaseService {
    connection_string: String,
}

impl Construct for DatabaseService {
    fn construct() -> Self {
        DB_CONSTRUCTIONS.fetch_add(1, Ordering::SeqCst);
        Self {
            connection_string: "postgres://localhost".to_string(),
        }
    }
}

struct CacheService {
    redis_url: String,
}

impl Construct for CacheService {
    fn construct() -> Self {
        Self {
            redis_url: "redis://localhost".to_string(),
        }
    }
}

#[test]
#[serial]
fn test_trait_based_acquisition_is_lazy_and_unique() {
    services::reset();
    DB_CONSTRUCTIONS.store(0, Ordering::SeqCst);

    let db1: Arc<DatabaseService> = services::acquire();
    let db2: Arc<DatabaseService> = services::acquire();

    assert!(Arc::ptr_eq(&db1, &db2));
    assert_eq!(db1.connection_string, "postgres://localhost");
    assert_eq!(DB_CONSTRUCTIONS.load(Ordering::SeqCst), 1);
}

#[test]
#[serial]
fn test_multiple_services_in_one_scope() {
    services::reset();

    let db: Arc<DatabaseService> = services::acquire();
    let cache: Arc<CacheService> = services::acquire();

    assert_eq!(db.connection_string, "postgres://localhost");
    assert_eq!(cache.redis_url, "redis://localhost");

    // Both are now recorded and reused
    assert!(services::contains::<DatabaseService>().unwrap());
    assert!(services::contains::<CacheService>().unwrap());
}

#[test]
#[serial]
fn test_replace_overrides_a_service_for_testing() {
    services::reset();

    let real: Arc<DatabaseService> = services::acquire();
    assert_eq!(real.connection_string, "postgres://localhost");

    // Swap in a stub; later acquisitions see it instead of constructing
    services::replace(DatabaseService {
        connection_string: "postgres://stub".to_string(),
    });

    let stubbed: Arc<DatabaseService> = services::acquire();
    assert_eq!(stubbed.connection_string, "postgres://stub");
}

#[test]
fn test_construct_with_owned_registry() {
    #[derive(Default)]
    struct FeatureFlags {
        entries: Vec<(String, bool)>,
    }

    impl Construct for FeatureFlags {
        fn construct() -> Self {
            Self {
                entries: vec![("new_ui".to_string(), true)],
            }
        }
    }

    let registry = Registry::new();

    let flags: Arc<FeatureFlags> = registry.acquire();
    assert_eq!(flags.entries.len(), 1);

    // Owned registries give each test its own scope, no serial needed
    let other = Registry::new();
    let other_flags: Arc<FeatureFlags> = other.acquire();
    assert!(!Arc::ptr_eq(&flags, &other_flags));
}

#[test]
fn test_default_backed_construct() {
    // Common pattern: constructor delegates to Default
    #[derive(Default)]
    struct Metrics {
        samples: Vec<u64>,
    }

    impl Construct for Metrics {
        fn construct() -> Self {
            Self::default()
        }
    }

    let registry = Registry::new();
    let metrics: Arc<Metrics> = registry.acquire();
    assert!(metrics.samples.is_empty());
}
