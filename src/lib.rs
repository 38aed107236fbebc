//! # Lazy Registry
//!
//! A thread-safe singleton registry with lazy construction: for any type,
//! at most one instance exists per registry scope, built on first
//! acquisition and reused thereafter.
//!
//! This crate provides two flavors of the same guarantee:
//!
//! - [`Registry`] — a central, type-keyed store that intercepts construction
//!   for any number of participating types, so the check-and-set guard is
//!   written once and applied polymorphically.
//! - [`SingletonCell`] — a single-slot cell that keeps the guard next to one
//!   specific type, usable as a `static`.
//!
//! ## Quick Start
//!
//! ```rust
//! use lazy_registry::Registry;
//! use std::sync::Arc;
//!
//! let registry = Registry::new();
//!
//! // Constructed on first acquisition...
//! let first: Arc<String> = registry.acquire_with(|| "Important data".to_string());
//!
//! // ...reused on every later one; the closure is ignored
//! let second: Arc<String> = registry.acquire_with(|| "never built".to_string());
//!
//! assert!(Arc::ptr_eq(&first, &second));
//! ```
//!
//! ## Features
//!
//! - **Lazy**: instances are built on first request, never eagerly
//! - **Thread-safe**: all operations are safe across threads; the
//!   constructor runs at most once per type per scope even under contention
//! - **Type-safe**: instances are stored and retrieved with full type
//!   information
//! - **Injectable**: registries are owned values with cheap-clone handles,
//!   so tests get a fresh scope instead of fighting process-global state
//! - **Observable**: `tracing` debug events plus an optional callback system
//!   distinguishing created vs reused acquisitions
//!
//! ## Main Types
//!
//! - [`Registry`] - owned registry handle; `acquire_with` / `acquire` / `get`
//! - [`SingletonCell`] - single-slot lazy cell for one type
//! - [`Construct`] - capability trait for trait-based acquisition
//! - [`define_registry!`] - declare a named static registry scope
//! - [`RegistryEvent`] / [`RegistryError`] - observability and lookup errors

mod cell;
mod construct;
mod macros;
mod registry;
mod registry_error;
mod registry_event;

// Re-export the main public API
pub use cell::SingletonCell;
pub use construct::Construct;
pub use registry::Registry;
pub use registry_error::RegistryError;
pub use registry_event::RegistryEvent;
