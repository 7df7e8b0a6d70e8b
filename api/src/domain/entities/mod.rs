//! Domain entities
//!
//! Separate from the SeaORM models in the `entity` module; adapters convert
//! between the two.

pub mod benefit;

pub use benefit::{Benefit, BenefitId, NewBenefit};
