use async_trait::async_trait;
use database::BaseRepository;
use sea_orm::{DatabaseConnection, DbErr, EntityTrait, QueryOrder};

use crate::{
    entity,
    error::{ProductError, ProductResult},
    models::Product,
    repository::ProductRepository,
};

/// PostgreSQL implementation of [`ProductRepository`]
pub struct PgProductRepository {
    base: BaseRepository<entity::Entity>,
}

impl PgProductRepository {
    pub fn new(db: DatabaseConnection) -> Self {
        Self {
            base: BaseRepository::new(db),
        }
    }
}

/// Largest offset PostgreSQL accepts as a `BIGINT` bind value.
const MAX_OFFSET: u64 = i64::MAX as u64;

#[async_trait]
impl ProductRepository for PgProductRepository {
    async fn find_page(&self, offset: u64, limit: u64) -> ProductResult<(Vec<Product>, u64)> {
        let total = self.base.count().await?;

        // Past any possible row; the bind value would overflow BIGINT
        if offset > MAX_OFFSET {
            return Ok((Vec::new(), total));
        }

        let select = entity::Entity::find().order_by_asc(entity::Column::Id);
        let models = self
            .base
            .find_window(select, offset, limit.min(MAX_OFFSET))
            .await?;

        Ok((models.into_iter().map(Product::from).collect(), total))
    }

    async fn find_by_id(&self, id: i64) -> ProductResult<Option<Product>> {
        let model = self.base.find_by_id(id).await?;
        Ok(model.map(Product::from))
    }

    async fn save(&self, product: Product) -> ProductResult<Product> {
        let existing_id = product.id;
        let active_model: entity::ActiveModel = product.into();

        let model = match existing_id {
            None => {
                let model = self.base.insert(active_model).await?;
                tracing::info!(product_id = model.id, "Created product");
                model
            }
            Some(id) => {
                let model = self
                    .base
                    .update(active_model)
                    .await
                    .map_err(|e| match e {
                        DbErr::RecordNotUpdated => ProductError::NotFound(id),
                        other => ProductError::Database(other),
                    })?;
                tracing::info!(product_id = model.id, "Updated product");
                model
            }
        };

        Ok(model.into())
    }

    async fn delete_by_id(&self, id: i64) -> ProductResult<bool> {
        let rows = self.base.delete_by_id(id).await?;

        if rows > 0 {
            tracing::info!(product_id = id, "Deleted product");
        }
        Ok(rows > 0)
    }
}
