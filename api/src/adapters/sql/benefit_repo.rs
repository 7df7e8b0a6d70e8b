//! SQL adapter for BenefitRepository

use async_trait::async_trait;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, ConnectionTrait, DatabaseConnection, DatabaseTransaction,
    EntityTrait, Order, PaginatorTrait, QueryFilter, QueryOrder, QuerySelect,
    Select, Set, TransactionTrait,
};

use crate::domain::entities::{Benefit, BenefitId};
use crate::domain::ports::{
    BenefitRepository, CountFilter, ListOptions, SortDirection, SortField, TxFuture,
};
use crate::entity::benefits;
use crate::error::DomainError;

/// SeaORM implementation of BenefitRepository.
///
/// `C` is either the pool (`DatabaseConnection`) or an open
/// `DatabaseTransaction`; the same queries run against both.
pub struct SqlBenefitRepository<C = DatabaseConnection> {
    db: C,
}

impl<C> SqlBenefitRepository<C> {
    pub fn new(db: C) -> Self {
        Self { db }
    }

    fn into_inner(self) -> C {
        self.db
    }
}

impl<C> SqlBenefitRepository<C>
where
    C: ConnectionTrait,
{
    async fn fetch(
        &self,
        query: Select<benefits::Entity>,
        options: &ListOptions,
    ) -> Result<Vec<Benefit>, DomainError> {
        let results = apply_list_options(query, options)
            .all(&self.db)
            .await
            .map_err(|e| DomainError::Database(e.to_string()))?;

        Ok(results.into_iter().map(|m| m.into()).collect())
    }
}

#[async_trait]
impl<C> BenefitRepository for SqlBenefitRepository<C>
where
    C: ConnectionTrait + TransactionTrait + Send + Sync,
{
    type Tx = SqlBenefitRepository<DatabaseTransaction>;

    async fn create(&self, benefit: &Benefit) -> Result<Benefit, DomainError> {
        benefit.validate()?;

        let model = benefits::ActiveModel {
            name: Set(benefit.name.trim().to_string()),
            description: Set(trimmed(&benefit.description)),
            is_active: Set(benefit.is_active),
            created_at: Set(benefit.created_at),
            updated_at: Set(benefit.updated_at),
            ..Default::default()
        };

        let result = model
            .insert(&self.db)
            .await
            .map_err(|e| DomainError::Database(e.to_string()))?;

        Ok(result.into())
    }

    async fn find_by_id(&self, id: BenefitId) -> Result<Option<Benefit>, DomainError> {
        let result = benefits::Entity::find_by_id(id.0)
            .one(&self.db)
            .await
            .map_err(|e| DomainError::Database(e.to_string()))?;

        Ok(result.map(|m| m.into()))
    }

    async fn find_all(&self, options: &ListOptions) -> Result<Vec<Benefit>, DomainError> {
        self.fetch(benefits::Entity::find(), options).await
    }

    async fn find_active(&self, options: &ListOptions) -> Result<Vec<Benefit>, DomainError> {
        let query = benefits::Entity::find().filter(benefits::Column::IsActive.eq(true));
        self.fetch(query, options).await
    }

    async fn find_inactive(&self, options: &ListOptions) -> Result<Vec<Benefit>, DomainError> {
        let query = benefits::Entity::find().filter(benefits::Column::IsActive.eq(false));
        self.fetch(query, options).await
    }

    async fn find_by_name(
        &self,
        name: &str,
        options: &ListOptions,
    ) -> Result<Vec<Benefit>, DomainError> {
        let query = benefits::Entity::find().filter(benefits::Column::Name.contains(name));
        self.fetch(query, options).await
    }

    async fn update(
        &self,
        id: BenefitId,
        benefit: &Benefit,
    ) -> Result<Option<Benefit>, DomainError> {
        benefit.validate()?;

        // Single statement: no read lock is held when the write lock is taken
        let changes = benefits::ActiveModel {
            name: Set(benefit.name.trim().to_string()),
            description: Set(trimmed(&benefit.description)),
            is_active: Set(benefit.is_active),
            updated_at: Set(benefit.updated_at),
            ..Default::default()
        };

        let result = benefits::Entity::update_many()
            .set(changes)
            .filter(benefits::Column::Id.eq(id.0))
            .exec(&self.db)
            .await
            .map_err(|e| DomainError::Database(e.to_string()))?;

        if result.rows_affected == 0 {
            return Ok(None);
        }

        self.find_by_id(id).await
    }

    async fn delete(&self, id: BenefitId) -> Result<bool, DomainError> {
        let result = benefits::Entity::delete_by_id(id.0)
            .exec(&self.db)
            .await
            .map_err(|e| DomainError::Database(e.to_string()))?;

        Ok(result.rows_affected > 0)
    }

    async fn count(&self, filter: &CountFilter) -> Result<u64, DomainError> {
        let mut query = benefits::Entity::find();
        if let Some(is_active) = filter.is_active {
            query = query.filter(benefits::Column::IsActive.eq(is_active));
        }

        query
            .count(&self.db)
            .await
            .map_err(|e| DomainError::Database(e.to_string()))
    }

    async fn exists_by_name(
        &self,
        name: &str,
        exclude_id: Option<BenefitId>,
    ) -> Result<bool, DomainError> {
        let mut query = benefits::Entity::find().filter(benefits::Column::Name.eq(name));
        if let Some(id) = exclude_id {
            query = query.filter(benefits::Column::Id.ne(id.0));
        }

        let count = query
            .count(&self.db)
            .await
            .map_err(|e| DomainError::Database(e.to_string()))?;

        Ok(count > 0)
    }

    async fn transaction<T, F>(&self, work: F) -> Result<T, DomainError>
    where
        T: Send,
        F: for<'r> FnOnce(&'r Self::Tx) -> TxFuture<'r, T> + Send,
    {
        let txn = self
            .db
            .begin()
            .await
            .map_err(|e| DomainError::Database(e.to_string()))?;

        let scoped = SqlBenefitRepository::new(txn);
        let outcome = work(&scoped).await;
        let txn = scoped.into_inner();

        match outcome {
            Ok(value) => {
                txn.commit()
                    .await
                    .map_err(|e| DomainError::Database(e.to_string()))?;
                Ok(value)
            }
            Err(e) => {
                if let Err(rollback_err) = txn.rollback().await {
                    tracing::error!(error = %rollback_err, "Failed to roll back transaction");
                }
                Err(e)
            }
        }
    }
}

fn apply_list_options(
    query: Select<benefits::Entity>,
    options: &ListOptions,
) -> Select<benefits::Entity> {
    let column = match options.order_by {
        SortField::Id => benefits::Column::Id,
        SortField::Name => benefits::Column::Name,
        SortField::CreatedAt => benefits::Column::CreatedAt,
        SortField::UpdatedAt => benefits::Column::UpdatedAt,
    };
    let order = match options.direction {
        SortDirection::Asc => Order::Asc,
        SortDirection::Desc => Order::Desc,
    };

    let mut query = query.order_by(column, order);
    if options.order_by != SortField::Id {
        // Stable order for ties
        query = query.order_by_asc(benefits::Column::Id);
    }

    if let Some(limit) = options.limit {
        query = query.limit(limit);
    } else if options.offset.is_some() {
        // SQLite rejects OFFSET without LIMIT
        query = query.limit(i64::MAX as u64);
    }
    if let Some(offset) = options.offset {
        query = query.offset(offset);
    }

    query
}

fn trimmed(description: &Option<String>) -> Option<String> {
    description.as_ref().map(|d| d.trim().to_string())
}

/// Convert SeaORM model to domain entity
impl From<benefits::Model> for Benefit {
    fn from(model: benefits::Model) -> Self {
        Benefit {
            id: Some(BenefitId(model.id)),
            name: model.name,
            description: model.description,
            is_active: model.is_active,
            created_at: model.created_at,
            updated_at: model.updated_at,
        }
    }
}
