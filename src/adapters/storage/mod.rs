//! Storage Adapters
//!
//! Implementations of the SessionStore port.
//!
//! ## Available Adapters
//!
//! - **InMemorySessionStore** - Sharded in-process table with optimistic versioning
//!
//! ## Usage
//!
//! ```ignore
//! use adapters::storage::InMemorySessionStore;
//!
//! let store = InMemorySessionStore::with_config(32, 8);
//! ```

mod in_memory_session_store;

pub use in_memory_session_store::{
    InMemorySessionStore, DEFAULT_MAX_UPDATE_ATTEMPTS, DEFAULT_SHARD_COUNT,
};
