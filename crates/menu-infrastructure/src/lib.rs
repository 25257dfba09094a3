//! # Menu Infrastructure
//! 
//! PostgreSQL implementation of the node store (adapter).

pub mod database;

pub use database::{create_pool, run_migrations, PgNodeStore};
