//! Domain layer
//!
//! The benefit model and the storage contract it relies on. Nothing in here
//! knows about HTTP or SeaORM.
//! - `entities`: the `Benefit` record and its rules
//! - `ports`: the repository trait and listing options

pub mod entities;
pub mod ports;
