//! Repository traits (ports) and the in-memory adapter

pub mod node_store;
pub mod memory_store;

pub use node_store::NodeStore;
pub use memory_store::InMemoryNodeStore;

#[cfg(test)]
pub use node_store::MockNodeStore;
