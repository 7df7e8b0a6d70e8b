//! Repository port traits
//!
//! These traits define the interface for data persistence.
//! Implementations are provided by adapters (e.g., the SeaORM SQL adapter).

use std::future::Future;
use std::pin::Pin;

use async_trait::async_trait;

use crate::domain::entities::{Benefit, BenefitId};
use crate::error::DomainError;

/// Column a benefit listing is ordered by
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SortField {
    Id,
    #[default]
    Name,
    CreatedAt,
    UpdatedAt,
}

impl std::fmt::Display for SortField {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            SortField::Id => write!(f, "id"),
            SortField::Name => write!(f, "name"),
            SortField::CreatedAt => write!(f, "createdAt"),
            SortField::UpdatedAt => write!(f, "updatedAt"),
        }
    }
}

impl std::str::FromStr for SortField {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "id" => Ok(SortField::Id),
            "name" => Ok(SortField::Name),
            "createdAt" => Ok(SortField::CreatedAt),
            "updatedAt" => Ok(SortField::UpdatedAt),
            _ => Err(format!(
                "orderBy must be one of: id, name, createdAt, updatedAt (got '{}')",
                s
            )),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SortDirection {
    #[default]
    Asc,
    Desc,
}

impl std::fmt::Display for SortDirection {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            SortDirection::Asc => write!(f, "ASC"),
            SortDirection::Desc => write!(f, "DESC"),
        }
    }
}

impl std::str::FromStr for SortDirection {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_uppercase().as_str() {
            "ASC" => Ok(SortDirection::Asc),
            "DESC" => Ok(SortDirection::Desc),
            _ => Err(format!("orderDirection must be ASC or DESC (got '{}')", s)),
        }
    }
}

/// Pagination and ordering for benefit listings.
///
/// The default orders by name, ascending, with no limit.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct ListOptions {
    pub limit: Option<u64>,
    pub offset: Option<u64>,
    pub order_by: SortField,
    pub direction: SortDirection,
}

/// Filters for counting benefits
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct CountFilter {
    pub is_active: Option<bool>,
}

/// Future returned by the work passed to [`BenefitRepository::transaction`]
pub type TxFuture<'r, T> = Pin<Box<dyn Future<Output = Result<T, DomainError>> + Send + 'r>>;

/// Repository for Benefit entities
#[async_trait]
pub trait BenefitRepository: Send + Sync {
    /// Repository handed to transactional work; every call it makes joins
    /// the same unit of work.
    type Tx: BenefitRepository;

    /// Persist a new benefit and return it with its assigned id
    async fn create(&self, benefit: &Benefit) -> Result<Benefit, DomainError>;

    /// Find a benefit by ID
    async fn find_by_id(&self, id: BenefitId) -> Result<Option<Benefit>, DomainError>;

    /// List all benefits
    async fn find_all(&self, options: &ListOptions) -> Result<Vec<Benefit>, DomainError>;

    /// List active benefits
    async fn find_active(&self, options: &ListOptions) -> Result<Vec<Benefit>, DomainError>;

    /// List inactive benefits
    async fn find_inactive(&self, options: &ListOptions) -> Result<Vec<Benefit>, DomainError>;

    /// Find benefits whose name contains `name`
    async fn find_by_name(
        &self,
        name: &str,
        options: &ListOptions,
    ) -> Result<Vec<Benefit>, DomainError>;

    /// Overwrite the stored benefit. Returns `None` if `id` does not exist.
    async fn update(
        &self,
        id: BenefitId,
        benefit: &Benefit,
    ) -> Result<Option<Benefit>, DomainError>;

    /// Remove a benefit. Returns whether a row was deleted.
    async fn delete(&self, id: BenefitId) -> Result<bool, DomainError>;

    /// Count benefits matching the filter
    async fn count(&self, filter: &CountFilter) -> Result<u64, DomainError>;

    /// Check whether a benefit other than `exclude_id` already uses `name`
    async fn exists_by_name(
        &self,
        name: &str,
        exclude_id: Option<BenefitId>,
    ) -> Result<bool, DomainError>;

    /// Run `work` in a single unit of work.
    ///
    /// Commits when `work` succeeds. On error everything `work` did is rolled
    /// back and the error is returned as-is.
    async fn transaction<T, F>(&self, work: F) -> Result<T, DomainError>
    where
        T: Send,
        F: for<'r> FnOnce(&'r Self::Tx) -> TxFuture<'r, T> + Send;
}
