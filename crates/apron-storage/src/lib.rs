//! # apron-storage
//!
//! SQLite entity store for the Apron incident engine.
//! One serialized writer connection, a round-robin read pool, schema
//! migrations, per-table queries, and idempotent seed data.

pub mod connection;
pub mod migrations;
pub mod queries;
pub mod seed;

pub use connection::writer::with_immediate_transaction;
pub use connection::DatabaseManager;
