//! `PostgreSQL` repository implementation for bucket item storage.

use super::{
    models::{BucketItemRow, NewBucketItemRow},
    schema::bucket_items,
};
use crate::bucket::{
    domain::{BucketItem, BucketItemId, PersistedBucketItemData},
    ports::{BucketRepository, BucketRepositoryError, BucketRepositoryResult},
};
use crate::directory::domain::UserId;
use async_trait::async_trait;
use diesel::pg::PgConnection;
use diesel::prelude::*;
use diesel::r2d2::{ConnectionManager, Pool};
use diesel::result::{DatabaseErrorKind, Error as DieselError};

/// `PostgreSQL` connection pool type used by bucket adapters.
pub type BucketPgPool = Pool<ConnectionManager<PgConnection>>;

/// `PostgreSQL`-backed bucket repository.
#[derive(Debug, Clone)]
pub struct PostgresBucketRepository {
    pool: BucketPgPool,
}

impl PostgresBucketRepository {
    /// Creates a new repository from a `PostgreSQL` connection pool.
    #[must_use]
    pub const fn new(pool: BucketPgPool) -> Self {
        Self { pool }
    }

    async fn run_blocking<F, T>(&self, f: F) -> BucketRepositoryResult<T>
    where
        F: FnOnce(&mut PgConnection) -> BucketRepositoryResult<T> + Send + 'static,
        T: Send + 'static,
    {
        let pool = self.pool.clone();
        tokio::task::spawn_blocking(move || {
            let mut connection = pool.get().map_err(BucketRepositoryError::persistence)?;
            f(&mut connection)
        })
        .await
        .map_err(BucketRepositoryError::persistence)?
    }
}

#[async_trait]
impl BucketRepository for PostgresBucketRepository {
    async fn store(&self, item: &BucketItem) -> BucketRepositoryResult<()> {
        let item_id = item.id();
        let new_row = to_new_row(item)?;

        self.run_blocking(move |connection| {
            diesel::insert_into(bucket_items::table)
                .values(&new_row)
                .execute(connection)
                .map_err(|err| match err {
                    DieselError::DatabaseError(DatabaseErrorKind::UniqueViolation, _) => {
                        BucketRepositoryError::DuplicateItem(item_id)
                    }
                    _ => BucketRepositoryError::persistence(err),
                })?;
            Ok(())
        })
        .await
    }

    async fn find_by_id(&self, id: BucketItemId) -> BucketRepositoryResult<Option<BucketItem>> {
        self.run_blocking(move |connection| {
            let row = bucket_items::table
                .find(id.into_inner())
                .select(BucketItemRow::as_select())
                .first::<BucketItemRow>(connection)
                .optional()
                .map_err(BucketRepositoryError::persistence)?;
            row.map(row_to_item).transpose()
        })
        .await
    }

    async fn list_all(&self) -> BucketRepositoryResult<Vec<BucketItem>> {
        self.run_blocking(move |connection| {
            let rows = bucket_items::table
                .select(BucketItemRow::as_select())
                .load::<BucketItemRow>(connection)
                .map_err(BucketRepositoryError::persistence)?;
            rows.into_iter().map(row_to_item).collect()
        })
        .await
    }

    async fn delete(&self, id: BucketItemId) -> BucketRepositoryResult<()> {
        self.run_blocking(move |connection| {
            let affected = diesel::delete(bucket_items::table.find(id.into_inner()))
                .execute(connection)
                .map_err(BucketRepositoryError::persistence)?;
            if affected == 0 {
                return Err(BucketRepositoryError::NotFound(id));
            }
            Ok(())
        })
        .await
    }
}

fn to_new_row(item: &BucketItem) -> BucketRepositoryResult<NewBucketItemRow> {
    let tags = serde_json::to_value(item.tags()).map_err(BucketRepositoryError::persistence)?;
    let file = serde_json::to_value(item.file()).map_err(BucketRepositoryError::persistence)?;

    Ok(NewBucketItemRow {
        id: item.id().into_inner(),
        name: item.name().to_owned(),
        description: item.description().map(str::to_owned),
        tags,
        uploaded_by: item.uploaded_by().into_inner(),
        file,
        created_at: item.created_at(),
        updated_at: item.updated_at(),
    })
}

fn row_to_item(row: BucketItemRow) -> BucketRepositoryResult<BucketItem> {
    let tags: Vec<String> =
        serde_json::from_value(row.tags).map_err(BucketRepositoryError::persistence)?;
    let file = serde_json::from_value(row.file).map_err(BucketRepositoryError::persistence)?;

    Ok(BucketItem::from_persisted(PersistedBucketItemData {
        id: BucketItemId::from_uuid(row.id),
        name: row.name,
        description: row.description,
        tags,
        uploaded_by: UserId::from_uuid(row.uploaded_by),
        file,
        created_at: row.created_at,
        updated_at: row.updated_at,
    }))
}
