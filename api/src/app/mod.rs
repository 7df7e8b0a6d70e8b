//! Application layer
//!
//! Contains use cases and service orchestration.
//! Services coordinate between domain entities and ports.

pub mod benefit_service;

pub use benefit_service::{BenefitService, ListRequest};
