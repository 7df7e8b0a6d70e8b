//! SQL adapters
//!
//! Implementations of repository traits using SeaORM. SQLite is the default
//! backend; PostgreSQL works through the same code.

pub mod benefit_repo;
pub mod connection;


pub use benefit_repo::SqlBenefitRepository;
pub use connection::{connect, sync_schema};
