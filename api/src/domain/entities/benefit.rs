//! Benefit domain entity
//!
//! Represents an employee benefit offering (health plan, meal voucher, ...).

use chrono::{DateTime, Utc};
use serde::Serialize;

use crate::error::DomainError;

pub const NAME_MIN_LEN: usize = 3;
pub const NAME_MAX_LEN: usize = 100;
pub const DESCRIPTION_MAX_LEN: usize = 255;

/// Storage-assigned identifier for a benefit
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
#[serde(transparent)]
pub struct BenefitId(pub i32);

impl From<i32> for BenefitId {
    fn from(id: i32) -> Self {
        Self(id)
    }
}

impl TryFrom<i64> for BenefitId {
    type Error = DomainError;

    /// Only positive ids that fit the storage key are accepted.
    fn try_from(raw: i64) -> Result<Self, Self::Error> {
        match i32::try_from(raw) {
            Ok(id) if id > 0 => Ok(Self(id)),
            _ => Err(DomainError::InvalidId(raw.to_string())),
        }
    }
}

impl std::fmt::Display for BenefitId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Data needed to create a new benefit
#[derive(Debug, Clone, Default)]
pub struct NewBenefit {
    pub name: String,
    pub description: Option<String>,
    /// Defaults to active when not given
    pub is_active: Option<bool>,
}

/// Outcome of checking a benefit against the business rules
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ValidationReport {
    pub errors: Vec<String>,
}

impl ValidationReport {
    pub fn is_valid(&self) -> bool {
        self.errors.is_empty()
    }
}

/// An employee benefit
#[derive(Debug, Clone, PartialEq)]
pub struct Benefit {
    /// `None` until the benefit has been persisted
    pub id: Option<BenefitId>,
    pub name: String,
    pub description: Option<String>,
    pub is_active: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Benefit {
    /// Build an unpersisted benefit. Name and description are trimmed;
    /// nothing is validated here.
    pub fn new(input: NewBenefit) -> Self {
        let now = Utc::now();
        Self {
            id: None,
            name: input.name.trim().to_string(),
            description: input.description.map(|d| d.trim().to_string()),
            is_active: input.is_active.unwrap_or(true),
            created_at: now,
            updated_at: now,
        }
    }

    pub fn activate(&mut self) {
        self.is_active = true;
        self.updated_at = Utc::now();
    }

    pub fn deactivate(&mut self) {
        self.is_active = false;
        self.updated_at = Utc::now();
    }

    /// Check every business rule and collect all violations.
    pub fn is_valid(&self) -> ValidationReport {
        let mut errors = Vec::new();
        errors.extend(self.name_error());
        errors.extend(self.description_error());
        ValidationReport { errors }
    }

    /// Like [`Benefit::is_valid`], but fails with every violation found.
    pub fn validate(&self) -> Result<(), DomainError> {
        let report = self.is_valid();
        if report.is_valid() {
            Ok(())
        } else {
            Err(DomainError::Validation(report.errors))
        }
    }

    fn name_error(&self) -> Option<String> {
        let len = self.name.trim().chars().count();
        if len == 0 {
            Some("Name cannot be empty".to_string())
        } else if len < NAME_MIN_LEN {
            Some(format!("Name must be at least {} characters", NAME_MIN_LEN))
        } else if len > NAME_MAX_LEN {
            Some(format!("Name must be at most {} characters", NAME_MAX_LEN))
        } else {
            None
        }
    }

    fn description_error(&self) -> Option<String> {
        match &self.description {
            Some(d) if d.chars().count() > DESCRIPTION_MAX_LEN => Some(format!(
                "Description must be at most {} characters",
                DESCRIPTION_MAX_LEN
            )),
            _ => None,
        }
    }
}
