//! HTTP handlers
//!
//! Axum request handlers for the API endpoints.

pub mod benefits;

pub use benefits::{
    activate_benefit, count_benefits, create_benefit, deactivate_benefit, delete_benefit,
    list_benefits,
};
