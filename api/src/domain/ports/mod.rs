//! Domain ports (traits)
//!
//! Interfaces the services need from storage. `adapters::sql` provides the
//! production implementation, `test_utils` an in-memory one.

pub mod repositories;

pub use repositories::{
    BenefitRepository, CountFilter, ListOptions, SortDirection, SortField, TxFuture,
};
