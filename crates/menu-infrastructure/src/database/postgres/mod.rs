//! PostgreSQL repository implementations

pub mod node_store_impl;

pub use node_store_impl::PgNodeStore;
