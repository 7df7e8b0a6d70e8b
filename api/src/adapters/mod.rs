//! Adapters layer
//!
//! Concrete implementations of the port traits.
//! Currently a single SQL adapter built on SeaORM.

pub mod sql;

pub use sql::{connect, sync_schema, SqlBenefitRepository};
