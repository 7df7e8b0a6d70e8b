//! Mock implementations of port traits
//!
//! In-memory repository that can be configured for testing. It stores data
//! in memory and counts calls so tests can verify what was (not) written.

use async_trait::async_trait;
use std::cmp::Ordering;
use std::collections::BTreeMap;
use std::sync::atomic::{AtomicUsize, Ordering as AtomicOrdering};
use std::sync::{Arc, RwLock};

use crate::domain::entities::{Benefit, BenefitId};
use crate::domain::ports::{
    BenefitRepository, CountFilter, ListOptions, SortDirection, SortField, TxFuture,
};
use crate::error::DomainError;

// ============================================================================
// In-Memory Benefit Repository
// ============================================================================

#[derive(Default)]
struct CallCounts {
    create: AtomicUsize,
    find_by_id: AtomicUsize,
    update: AtomicUsize,
    delete: AtomicUsize,
    exists_by_name: AtomicUsize,
}

#[derive(Default)]
pub struct InMemoryBenefitRepository {
    benefits: Arc<RwLock<BTreeMap<BenefitId, Benefit>>>,
    next_id: Arc<RwLock<i32>>,
    calls: Arc<CallCounts>,
    /// Every call fails with a database error
    failing: bool,
    /// `delete` reports that no row was removed
    delete_removes_nothing: bool,
}

impl InMemoryBenefitRepository {
    pub fn new() -> Self {
        Self::default()
    }

    /// Repository whose storage is unreachable
    pub fn failing() -> Self {
        Self {
            failing: true,
            ..Self::default()
        }
    }

    /// Pre-populate with a benefit; an id is assigned if it has none
    pub fn with_benefit(self, mut benefit: Benefit) -> Self {
        {
            let mut next_id = self.next_id.write().unwrap();
            let id = match benefit.id {
                Some(id) => id,
                None => BenefitId(*next_id + 1),
            };
            *next_id = (*next_id).max(id.0);
            benefit.id = Some(id);
            self.benefits.write().unwrap().insert(id, benefit);
        }
        self
    }

    pub fn delete_removes_nothing(mut self) -> Self {
        self.delete_removes_nothing = true;
        self
    }

    pub fn create_calls(&self) -> usize {
        self.calls.create.load(AtomicOrdering::SeqCst)
    }

    pub fn find_by_id_calls(&self) -> usize {
        self.calls.find_by_id.load(AtomicOrdering::SeqCst)
    }

    pub fn update_calls(&self) -> usize {
        self.calls.update.load(AtomicOrdering::SeqCst)
    }

    pub fn delete_calls(&self) -> usize {
        self.calls.delete.load(AtomicOrdering::SeqCst)
    }

    pub fn exists_by_name_calls(&self) -> usize {
        self.calls.exists_by_name.load(AtomicOrdering::SeqCst)
    }

    fn check(&self) -> Result<(), DomainError> {
        if self.failing {
            Err(DomainError::Database("connection refused".to_string()))
        } else {
            Ok(())
        }
    }

    fn select<P>(&self, options: &ListOptions, keep: P) -> Result<Vec<Benefit>, DomainError>
    where
        P: Fn(&Benefit) -> bool,
    {
        self.check()?;
        let benefits = self.benefits.read().unwrap();
        let mut matched: Vec<Benefit> = benefits.values().filter(|&b| keep(b)).cloned().collect();

        matched.sort_by(|a, b| {
            let primary = match options.order_by {
                SortField::Id => a.id.cmp(&b.id),
                SortField::Name => a.name.cmp(&b.name),
                SortField::CreatedAt => a.created_at.cmp(&b.created_at),
                SortField::UpdatedAt => a.updated_at.cmp(&b.updated_at),
            };
            let primary = match options.direction {
                SortDirection::Asc => primary,
                SortDirection::Desc => primary.reverse(),
            };
            match primary {
                Ordering::Equal => a.id.cmp(&b.id),
                other => other,
            }
        });

        let offset = options.offset.unwrap_or(0) as usize;
        let limit = options.limit.map(|l| l as usize).unwrap_or(usize::MAX);
        Ok(matched.into_iter().skip(offset).take(limit).collect())
    }
}

#[async_trait]
impl BenefitRepository for InMemoryBenefitRepository {
    type Tx = Self;

    async fn create(&self, benefit: &Benefit) -> Result<Benefit, DomainError> {
        self.calls.create.fetch_add(1, AtomicOrdering::SeqCst);
        self.check()?;
        benefit.validate()?;

        let mut next_id = self.next_id.write().unwrap();
        *next_id += 1;
        let mut created = benefit.clone();
        created.id = Some(BenefitId(*next_id));
        self.benefits
            .write()
            .unwrap()
            .insert(BenefitId(*next_id), created.clone());
        Ok(created)
    }

    async fn find_by_id(&self, id: BenefitId) -> Result<Option<Benefit>, DomainError> {
        self.calls.find_by_id.fetch_add(1, AtomicOrdering::SeqCst);
        self.check()?;
        Ok(self.benefits.read().unwrap().get(&id).cloned())
    }

    async fn find_all(&self, options: &ListOptions) -> Result<Vec<Benefit>, DomainError> {
        self.select(options, |_| true)
    }

    async fn find_active(&self, options: &ListOptions) -> Result<Vec<Benefit>, DomainError> {
        self.select(options, |b| b.is_active)
    }

    async fn find_inactive(&self, options: &ListOptions) -> Result<Vec<Benefit>, DomainError> {
        self.select(options, |b| !b.is_active)
    }

    async fn find_by_name(
        &self,
        name: &str,
        options: &ListOptions,
    ) -> Result<Vec<Benefit>, DomainError> {
        self.select(options, |b| b.name.contains(name))
    }

    async fn update(
        &self,
        id: BenefitId,
        benefit: &Benefit,
    ) -> Result<Option<Benefit>, DomainError> {
        self.calls.update.fetch_add(1, AtomicOrdering::SeqCst);
        self.check()?;
        benefit.validate()?;

        let mut benefits = self.benefits.write().unwrap();
        let Some(stored) = benefits.get_mut(&id) else {
            return Ok(None);
        };
        stored.name = benefit.name.clone();
        stored.description = benefit.description.clone();
        stored.is_active = benefit.is_active;
        stored.updated_at = benefit.updated_at;
        Ok(Some(stored.clone()))
    }

    async fn delete(&self, id: BenefitId) -> Result<bool, DomainError> {
        self.calls.delete.fetch_add(1, AtomicOrdering::SeqCst);
        self.check()?;
        if self.delete_removes_nothing {
            return Ok(false);
        }
        Ok(self.benefits.write().unwrap().remove(&id).is_some())
    }

    async fn count(&self, filter: &CountFilter) -> Result<u64, DomainError> {
        self.check()?;
        let benefits = self.benefits.read().unwrap();
        let count = benefits
            .values()
            .filter(|b| filter.is_active.map_or(true, |active| b.is_active == active))
            .count();
        Ok(count as u64)
    }

    async fn exists_by_name(
        &self,
        name: &str,
        exclude_id: Option<BenefitId>,
    ) -> Result<bool, DomainError> {
        self.calls.exists_by_name.fetch_add(1, AtomicOrdering::SeqCst);
        self.check()?;
        let benefits = self.benefits.read().unwrap();
        Ok(benefits
            .values()
            .any(|b| b.name == name && (exclude_id.is_none() || b.id != exclude_id)))
    }

    async fn transaction<T, F>(&self, work: F) -> Result<T, DomainError>
    where
        T: Send,
        F: for<'r> FnOnce(&'r Self::Tx) -> TxFuture<'r, T> + Send,
    {
        self.check()?;
        let snapshot = self.benefits.read().unwrap().clone();

        let outcome = work(self).await;
        if outcome.is_err() {
            *self.benefits.write().unwrap() = snapshot;
        }
        outcome
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_utils::test_benefit_named;

    async fn create_then_fail<R: BenefitRepository>(repo: &R) -> Result<(), DomainError> {
        repo.create(&test_benefit_named("Vale Cultura")).await?;
        Err(DomainError::Database("boom".to_string()))
    }

    fn failing_work<R: BenefitRepository>(repo: &R) -> TxFuture<'_, ()> {
        Box::pin(create_then_fail(repo))
    }

    #[tokio::test]
    async fn transaction_restores_state_on_error() {
        let repo = InMemoryBenefitRepository::new();

        let result = repo.transaction(|tx| failing_work(tx)).await;

        assert!(result.is_err());
        assert_eq!(repo.count(&CountFilter::default()).await.unwrap(), 0);
    }

    #[tokio::test]
    async fn with_benefit_assigns_sequential_ids() {
        let repo = InMemoryBenefitRepository::new()
            .with_benefit(test_benefit_named("Vale Cultura"))
            .with_benefit(test_benefit_named("Gympass"));

        let all = repo
            .find_all(&ListOptions {
                order_by: SortField::Id,
                ..Default::default()
            })
            .await
            .unwrap();
        let ids: Vec<_> = all.iter().filter_map(|b| b.id).collect();
        assert_eq!(ids, [BenefitId(1), BenefitId(2)]);
    }
}
