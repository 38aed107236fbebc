//! Replacement and reset example for lazy-registry.
//!
//! Demonstrates:
//! - `replace`: overriding a stored instance (e.g. hot-reloaded settings)
//! - Arc reference safety: old handles keep the old instance
//! - `reset`: returning a registry to its empty state between test cases
//!
//! Run with: `cargo run --example replacement_and_reset`

use lazy_registry::Registry;
use std::sync::Arc;

/// Application configuration that might be hot-swapped.
#[derive(Debug, Clone)]
struct AppSettings {
    api_endpoint: String,
    version: u32,
}

impl AppSettings {
    fn describe(&self) -> String {
        format!("v{} -> {}", self.version, self.api_endpoint)
    }
}

fn main() {
    println!("=== lazy-registry: Replacement and Reset ===\n");

    let registry = Registry::new();

    // -------------------------------------------------------------------------
    // 1. Initial configuration built lazily
    // -------------------------------------------------------------------------
    println!("1. Acquiring initial configuration...");

    let v1: Arc<AppSettings> = registry.acquire_with(|| AppSettings {
        api_endpoint: "https://api.v1.example.com".to_string(),
        version: 1,
    });

    println!("   {}", v1.describe());

    // -------------------------------------------------------------------------
    // 2. Replace the stored instance
    // -------------------------------------------------------------------------
    println!("\n2. Replacing the configuration...");

    registry.replace(AppSettings {
        api_endpoint: "https://api.v2.example.com".to_string(),
        version: 2,
    });

    let v2: Arc<AppSettings> = registry.acquire_with(|| unreachable_settings());

    println!("   old handle still sees: {}", v1.describe());
    println!("   new acquisition sees:  {}", v2.describe());

    // -------------------------------------------------------------------------
    // 3. Reset the registry entirely
    // -------------------------------------------------------------------------
    println!("\n3. Resetting the registry...");

    registry.reset();
    println!("   registry empty: {}", registry.is_empty());

    let fresh: Arc<AppSettings> = registry.acquire_with(|| AppSettings {
        api_endpoint: "https://api.v3.example.com".to_string(),
        version: 3,
    });

    println!("   constructed afresh: {}", fresh.describe());
}

fn unreachable_settings() -> AppSettings {
    // The instance exists, so acquire_with never calls this
    unreachable!("constructor must not run for a recorded type")
}
