//! Benefit service
//!
//! Use cases for the benefit lifecycle: create, list, activate, deactivate
//! and delete. Each call is a short, sequential conversation with the
//! repository; the service itself holds no state.

use std::sync::Arc;

use crate::domain::entities::{Benefit, BenefitId, NewBenefit};
use crate::domain::ports::{BenefitRepository, CountFilter, ListOptions, TxFuture};
use crate::error::DomainError;

/// Benefits inserted by [`BenefitService::seed_sample_data`]
const SAMPLE_BENEFITS: [(&str, &str, bool); 4] = [
    (
        "Plano de Saúde",
        "Cobertura médica completa para funcionários",
        true,
    ),
    ("Vale Refeição", "Auxílio alimentação mensal", true),
    ("Vale Transporte", "Auxílio para transporte público", true),
    (
        "Seguro de Vida",
        "Proteção para a família do funcionário",
        false,
    ),
];

/// Listing request: pagination plus the status filter
#[derive(Debug, Clone, Default)]
pub struct ListRequest {
    pub options: ListOptions,
    pub active_only: bool,
    pub inactive_only: bool,
}

/// Service for managing benefits
pub struct BenefitService<BR>
where
    BR: BenefitRepository,
{
    benefits: Arc<BR>,
}

impl<BR> BenefitService<BR>
where
    BR: BenefitRepository,
{
    pub fn new(benefits: Arc<BR>) -> Self {
        Self { benefits }
    }

    /// Create a benefit
    ///
    /// The name must be valid and not used by any other benefit. Nothing is
    /// written when either check fails.
    pub async fn create(&self, input: NewBenefit) -> Result<Benefit, DomainError> {
        let benefit = Benefit::new(input);
        benefit.validate()?;

        let taken = self
            .benefits
            .exists_by_name(&benefit.name, None)
            .await
            .map_err(|e| e.context("Failed to create benefit"))?;
        if taken {
            return Err(DomainError::AlreadyExists(benefit.name));
        }

        let created = self
            .benefits
            .create(&benefit)
            .await
            .map_err(|e| e.context("Failed to create benefit"))?;

        tracing::info!(benefit_id = ?created.id, name = %created.name, "Benefit created");
        Ok(created)
    }

    /// List benefits. `active_only` wins over `inactive_only`.
    pub async fn list(&self, request: &ListRequest) -> Result<Vec<Benefit>, DomainError> {
        let result = if request.active_only {
            self.benefits.find_active(&request.options).await
        } else if request.inactive_only {
            self.benefits.find_inactive(&request.options).await
        } else {
            self.benefits.find_all(&request.options).await
        };

        result.map_err(|e| e.context("Failed to list benefits"))
    }

    /// List benefits whose name contains `name`
    pub async fn search(
        &self,
        name: &str,
        options: &ListOptions,
    ) -> Result<Vec<Benefit>, DomainError> {
        self.benefits
            .find_by_name(name, options)
            .await
            .map_err(|e| e.context("Failed to search benefits"))
    }

    pub async fn count(&self, filter: &CountFilter) -> Result<u64, DomainError> {
        self.benefits
            .count(filter)
            .await
            .map_err(|e| e.context("Failed to count benefits"))
    }

    /// Activate a benefit. Already active benefits are returned unchanged.
    ///
    /// Concurrent status changes are last-write-wins.
    pub async fn activate(&self, raw_id: i64) -> Result<Benefit, DomainError> {
        let id = BenefitId::try_from(raw_id)?;
        apply_status(self.benefits.as_ref(), id, true)
            .await
            .map_err(|e| e.context("Failed to activate benefit"))
    }

    /// Deactivate a benefit. Already inactive benefits are returned unchanged.
    pub async fn deactivate(&self, raw_id: i64) -> Result<Benefit, DomainError> {
        let id = BenefitId::try_from(raw_id)?;
        apply_status(self.benefits.as_ref(), id, false)
            .await
            .map_err(|e| e.context("Failed to deactivate benefit"))
    }

    /// Delete a benefit
    pub async fn delete(&self, raw_id: i64) -> Result<(), DomainError> {
        let id = BenefitId::try_from(raw_id)?;
        self.remove(id)
            .await
            .map_err(|e| e.context("Failed to delete benefit"))
    }

    async fn remove(&self, id: BenefitId) -> Result<(), DomainError> {
        if self.benefits.find_by_id(id).await?.is_none() {
            return Err(DomainError::NotFound(id));
        }

        if !self.benefits.delete(id).await? {
            return Err(DomainError::DeleteFailed(id));
        }

        tracing::info!(benefit_id = %id, "Benefit deleted");
        Ok(())
    }

    /// Insert the sample benefits if there are no benefits yet.
    ///
    /// Returns how many were inserted.
    pub async fn seed_sample_data(&self) -> Result<u64, DomainError> {
        self.benefits
            .transaction(|tx| seeding(tx))
            .await
            .map_err(|e| e.context("Failed to seed sample benefits"))
    }
}

async fn apply_status<R>(repo: &R, id: BenefitId, active: bool) -> Result<Benefit, DomainError>
where
    R: BenefitRepository,
{
    let mut benefit = repo
        .find_by_id(id)
        .await?
        .ok_or(DomainError::NotFound(id))?;

    if benefit.is_active == active {
        return Ok(benefit);
    }

    if active {
        benefit.activate();
    } else {
        benefit.deactivate();
    }

    let updated = repo
        .update(id, &benefit)
        .await?
        .ok_or(DomainError::NotFound(id))?;

    tracing::info!(benefit_id = %id, is_active = active, "Benefit status changed");
    Ok(updated)
}

fn seeding<R>(repo: &R) -> TxFuture<'_, u64>
where
    R: BenefitRepository,
{
    Box::pin(seed_into(repo))
}

async fn seed_into<R>(repo: &R) -> Result<u64, DomainError>
where
    R: BenefitRepository,
{
    if repo.count(&CountFilter::default()).await? > 0 {
        tracing::debug!("Benefits table not empty, skipping sample data");
        return Ok(0);
    }

    let mut inserted = 0;
    for (name, description, is_active) in SAMPLE_BENEFITS {
        let benefit = Benefit::new(NewBenefit {
            name: name.to_string(),
            description: Some(description.to_string()),
            is_active: Some(is_active),
        });
        repo.create(&benefit).await?;
        inserted += 1;
    }

    tracing::info!(count = inserted, "Sample benefits inserted");
    Ok(inserted)
}
