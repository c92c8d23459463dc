//! Generic SeaORM repository shared by domain gateways.
//!
//! Domain crates wrap a [`BaseRepository`] and layer their own ordering,
//! filtering and error mapping on top of it. Everything here returns raw
//! [`DbErr`] so the caller decides how a failure surfaces.

use std::marker::PhantomData;

use sea_orm::{
    ActiveModelBehavior, ActiveModelTrait, DatabaseConnection, DbErr, EntityTrait,
    IntoActiveModel, PaginatorTrait, PrimaryKeyTrait, QuerySelect, Select,
};

type PrimaryKeyValue<E> = <<E as EntityTrait>::PrimaryKey as PrimaryKeyTrait>::ValueType;

/// Thin CRUD layer over a single SeaORM entity.
pub struct BaseRepository<E: EntityTrait> {
    db: DatabaseConnection,
    _entity: PhantomData<E>,
}

impl<E: EntityTrait> Clone for BaseRepository<E> {
    fn clone(&self) -> Self {
        Self {
            db: self.db.clone(),
            _entity: PhantomData,
        }
    }
}

impl<E> BaseRepository<E>
where
    E: EntityTrait,
    E::Model: Send + Sync,
{
    pub fn new(db: DatabaseConnection) -> Self {
        Self {
            db,
            _entity: PhantomData,
        }
    }

    pub async fn find_by_id<K>(&self, id: K) -> Result<Option<E::Model>, DbErr>
    where
        K: Into<PrimaryKeyValue<E>>,
    {
        E::find_by_id(id).one(&self.db).await
    }

    /// Runs `select` with an offset/limit window applied.
    pub async fn find_window(
        &self,
        select: Select<E>,
        offset: u64,
        limit: u64,
    ) -> Result<Vec<E::Model>, DbErr> {
        select.offset(offset).limit(limit).all(&self.db).await
    }

    /// Total number of rows in the entity's table.
    pub async fn count(&self) -> Result<u64, DbErr> {
        E::find().count(&self.db).await
    }

    pub async fn insert<A>(&self, model: A) -> Result<E::Model, DbErr>
    where
        A: ActiveModelTrait<Entity = E> + ActiveModelBehavior + Send,
        E::Model: IntoActiveModel<A>,
    {
        model.insert(&self.db).await
    }

    /// Fails with [`DbErr::RecordNotUpdated`] when no row matches the primary key.
    pub async fn update<A>(&self, model: A) -> Result<E::Model, DbErr>
    where
        A: ActiveModelTrait<Entity = E> + ActiveModelBehavior + Send,
        E::Model: IntoActiveModel<A>,
    {
        model.update(&self.db).await
    }

    /// Returns the number of rows removed (0 when the id was absent).
    pub async fn delete_by_id<K>(&self, id: K) -> Result<u64, DbErr>
    where
        K: Into<PrimaryKeyValue<E>>,
    {
        let result = E::delete_by_id(id).exec(&self.db).await?;
        Ok(result.rows_affected)
    }
}
