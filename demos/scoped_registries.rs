//! Scoped registries example for lazy-registry.
//!
//! Demonstrates:
//! - Declaring named static scopes with `define_registry!`
//! - Trait-based acquisition via `Construct`
//! - Observing created vs reused acquisitions with a trace callback
//!
//! Run with: `cargo run --example scoped_registries`

use lazy_registry::{define_registry, Construct};
use std::sync::Arc;

// Two isolated scopes
define_registry!(app);
define_registry!(background);

struct JobQueue {
    name: String,
}

impl Construct for JobQueue {
    fn construct() -> Self {
        println!("   [construct] building a JobQueue");
        Self {
            name: "default queue".to_string(),
        }
    }
}

fn main() {
    println!("=== lazy-registry: Scoped Registries ===\n");

    // -------------------------------------------------------------------------
    // 1. Watch the app scope's events
    // -------------------------------------------------------------------------
    println!("1. Setting a trace callback on the app scope...");

    app::set_trace_callback(|event| println!("   [app-trace] {}", event));

    // -------------------------------------------------------------------------
    // 2. Acquire via the Construct trait
    // -------------------------------------------------------------------------
    println!("\n2. Acquiring JobQueue from the app scope twice...");

    let q1: Arc<JobQueue> = app::acquire();
    let q2: Arc<JobQueue> = app::acquire();

    println!("   q1 and q2 identical: {}", Arc::ptr_eq(&q1, &q2));
    println!("   queue name: {}", q1.name);

    // -------------------------------------------------------------------------
    // 3. The background scope builds its own instance
    // -------------------------------------------------------------------------
    println!("\n3. Acquiring JobQueue from the background scope...");

    let q3: Arc<JobQueue> = background::acquire();

    println!(
        "   app and background share an instance: {}",
        Arc::ptr_eq(&q1, &q3)
    );
}
