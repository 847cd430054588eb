use async_trait::async_trait;
use models::product;
use sea_orm::{
    sea_query::Expr, ActiveModelTrait, ActiveValue, ColumnTrait, DatabaseConnection, EntityTrait, QueryFilter,
    QueryOrder, QuerySelect, Set,
};
use tracing::{debug, instrument};

use crate::errors::ServiceError;

/// Data access for the `products` table.
///
/// Update and delete do not check that the row exists; a missing id is a
/// successful no-op and callers that care must `fetch_one` first.
#[async_trait]
pub trait ProductRepository: Send + Sync {
    async fn fetch_one(&self, id: i32) -> Result<product::Model, ServiceError>;
    /// Rows ordered by id ascending; empty when the window is past the end.
    async fn fetch_many(&self, offset: u64, limit: u64) -> Result<Vec<product::Model>, ServiceError>;
    /// Insert with a server-assigned id; `product.id` is ignored.
    async fn create(&self, product: product::Model) -> Result<product::Model, ServiceError>;
    /// Overwrite name and price of the row `product.id`, returning what was written.
    async fn update(&self, product: product::Model) -> Result<product::Model, ServiceError>;
    async fn delete(&self, id: i32) -> Result<(), ServiceError>;
}

/// SeaORM-backed repository implementation.
pub struct SeaOrmProductRepository {
    pub db: DatabaseConnection,
}

impl SeaOrmProductRepository {
    pub fn new(db: DatabaseConnection) -> Self { Self { db } }
}

#[async_trait]
impl ProductRepository for SeaOrmProductRepository {
    async fn fetch_one(&self, id: i32) -> Result<product::Model, ServiceError> {
        product::Entity::find_by_id(id)
            .one(&self.db)
            .await?
            .ok_or_else(|| ServiceError::not_found("product"))
    }

    async fn fetch_many(&self, offset: u64, limit: u64) -> Result<Vec<product::Model>, ServiceError> {
        let rows = product::Entity::find()
            .order_by_asc(product::Column::Id)
            .offset(offset)
            .limit(limit)
            .all(&self.db)
            .await?;
        Ok(rows)
    }

    #[instrument(skip(self, product), fields(name = %product.name))]
    async fn create(&self, product: product::Model) -> Result<product::Model, ServiceError> {
        let p = product.validated()?;
        let am = product::ActiveModel {
            id: ActiveValue::NotSet,
            name: Set(p.name),
            price: Set(p.price),
        };
        Ok(am.insert(&self.db).await?)
    }

    #[instrument(skip(self, product), fields(id = product.id))]
    async fn update(&self, product: product::Model) -> Result<product::Model, ServiceError> {
        let p = product.validated()?;
        let res = product::Entity::update_many()
            .col_expr(product::Column::Name, Expr::value(p.name.clone()))
            .col_expr(product::Column::Price, Expr::value(p.price))
            .filter(product::Column::Id.eq(p.id))
            .exec(&self.db)
            .await?;
        debug!(rows_affected = res.rows_affected, "product update executed");
        Ok(p)
    }

    async fn delete(&self, id: i32) -> Result<(), ServiceError> {
        let res = product::Entity::delete_by_id(id).exec(&self.db).await?;
        debug!(id, rows_affected = res.rows_affected, "product delete executed");
        Ok(())
    }
}
