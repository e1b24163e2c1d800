//! # Home Inventory Core
//!
//! Shared, runtime-free logic for Home Inventory: entity models, the
//! [`source::InventorySource`] data-access trait, the global search
//! aggregator, and the caller-side search session.
//!
//! This crate contains no tokio, HTTP, filesystem I/O, or other
//! native-only dependencies. Any async runtime can drive it, and the
//! in-memory source makes it usable without a server.

pub mod batch;
pub mod models;
pub mod navigation;
pub mod search;
pub mod session;
pub mod source;
