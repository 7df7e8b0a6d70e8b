//! SeaORM entities
//!
//! Table definitions used by the SQL adapters. Domain code works with
//! `domain::entities` and never sees these models directly.

pub mod benefits;
