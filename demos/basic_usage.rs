//! Basic usage example for lazy-registry.
//!
//! Demonstrates:
//! - Lazy construction: the instance is built on the first acquisition only
//! - Reuse: later acquisitions return the same `Arc`, ignoring their closure
//! - Identity check with `Arc::ptr_eq`
//!
//! Run with: `cargo run --example basic_usage`

use lazy_registry::Registry;
use std::sync::Arc;

/// A type with one-time initialization and some business logic.
struct Service {
    some_data: String,
}

impl Service {
    fn init() -> Self {
        println!("   Initializing the Service instance (only once)...");
        Self {
            some_data: "Important data".to_string(),
        }
    }

    fn some_business_logic(&self) {
        println!("   Doing something with: {}", self.some_data);
    }
}

fn main() {
    println!("=== lazy-registry: Basic Usage ===\n");

    let registry = Registry::new();

    // -------------------------------------------------------------------------
    // 1. First acquisition constructs
    // -------------------------------------------------------------------------
    println!("1. First acquisition...");

    let s1: Arc<Service> = registry.acquire_with(Service::init);

    // -------------------------------------------------------------------------
    // 2. Second acquisition reuses
    // -------------------------------------------------------------------------
    println!("\n2. Second acquisition (constructor is skipped)...");

    let s2: Arc<Service> = registry.acquire_with(Service::init);

    // -------------------------------------------------------------------------
    // 3. Both handles drive the same instance
    // -------------------------------------------------------------------------
    println!("\n3. Calling business logic through both handles...");

    s1.some_business_logic();
    s2.some_business_logic();

    let same = Arc::ptr_eq(&s1, &s2);
    println!("\n   Are s1 and s2 the same instance? {}", same);

    // Two instances of one type in one scope would be a logic error
    assert!(same, "singleton violated: two instances exist for one type");
}
