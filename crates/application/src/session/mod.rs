//! Session handling
//!
//! This module provides:
//! - The session store, a thin wrapper over durable storage
//! - An in-memory storage for tests and ephemeral sessions

mod memory;
mod store;

pub use memory::InMemorySessionStorage;
pub use store::SessionStore;
