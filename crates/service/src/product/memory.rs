use std::collections::BTreeMap;

use async_trait::async_trait;
use models::product;
use tokio::sync::RwLock;

use crate::errors::ServiceError;
use crate::product::repository::ProductRepository;

/// Process-local product table.
///
/// Mirrors the SQL repository: ids come from a counter that never goes back,
/// rows are kept ordered by id, and update/delete of a missing id succeed.
#[derive(Default)]
pub struct InMemoryProductRepository {
    inner: RwLock<Table>,
}

#[derive(Default)]
struct Table {
    last_id: i32,
    rows: BTreeMap<i32, product::Model>,
}

impl InMemoryProductRepository {
    pub fn new() -> Self { Self::default() }

    /// Number of stored rows.
    pub async fn len(&self) -> usize {
        self.inner.read().await.rows.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.len().await == 0
    }
}

#[async_trait]
impl ProductRepository for InMemoryProductRepository {
    async fn fetch_one(&self, id: i32) -> Result<product::Model, ServiceError> {
        let table = self.inner.read().await;
        table.rows.get(&id).cloned().ok_or_else(|| ServiceError::not_found("product"))
    }

    async fn fetch_many(&self, offset: u64, limit: u64) -> Result<Vec<product::Model>, ServiceError> {
        let table = self.inner.read().await;
        let skip = usize::try_from(offset).unwrap_or(usize::MAX);
        let take = usize::try_from(limit).unwrap_or(usize::MAX);
        Ok(table.rows.values().skip(skip).take(take).cloned().collect())
    }

    async fn create(&self, product: product::Model) -> Result<product::Model, ServiceError> {
        let mut p = product.validated()?;
        let mut table = self.inner.write().await;
        let id = table
            .last_id
            .checked_add(1)
            .ok_or_else(|| ServiceError::Db("product id sequence exhausted".into()))?;
        table.last_id = id;
        p.id = id;
        table.rows.insert(id, p.clone());
        Ok(p)
    }

    async fn update(&self, product: product::Model) -> Result<product::Model, ServiceError> {
        let p = product.validated()?;
        let mut table = self.inner.write().await;
        if let Some(row) = table.rows.get_mut(&p.id) {
            *row = p.clone();
        }
        Ok(p)
    }

    async fn delete(&self, id: i32) -> Result<(), ServiceError> {
        self.inner.write().await.rows.remove(&id);
        Ok(())
    }
}
