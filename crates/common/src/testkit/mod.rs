//! Test support: an in-memory storage provider with real flat-listing
//! semantics (delimiter grouping, prefix echo, pagination).

mod store;

pub use store::{MemoryStore, StoredObject};
