//! Storage Layer
//!
//! Durable local persistence for serializable store state.

pub mod persist;

pub use persist::StatePersistence;
