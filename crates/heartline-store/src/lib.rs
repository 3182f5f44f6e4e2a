//! Heartline: key/value store implementations.
//!
//! `MemoryStore` stands in for session storage: it lives exactly as long as
//! the process. `JsonFileStore` stands in for durable storage and keeps its
//! contents in a single JSON object on disk.

pub mod json_file_store;
pub mod memory_store;

pub use json_file_store::JsonFileStore;
pub use memory_store::MemoryStore;
