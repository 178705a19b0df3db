/// Product storage abstraction
///
/// HTTP handlers talk to a `ProductStore` rather than to a pool directly. Two
/// implementations exist:
///
/// - [`PgProductStore`]: PostgreSQL through `sqlx`, used by the server
/// - [`MemoryProductStore`]: in-process store for tests and local demos; it can
///   also be built in an unavailable state where every call fails, which stands
///   in for a database that cannot be reached
///
/// # Example
///
/// ```
/// use catalog_shared::store::{MemoryProductStore, ProductStore};
/// use catalog_shared::generator::ProductGenerator;
///
/// # async fn example() -> Result<(), catalog_shared::store::StoreError> {
/// let store = MemoryProductStore::new();
/// let inserted = store.insert_many(ProductGenerator::new().generate(5)).await?;
/// assert_eq!(store.list().await?.len(), inserted.len());
/// # Ok(())
/// # }
/// ```

use async_trait::async_trait;
use chrono::Utc;
use sqlx::PgPool;
use tokio::sync::RwLock;
use tracing::debug;
use uuid::Uuid;

use crate::db::pool::health_check;
use crate::models::product::{CreateProduct, Product};
use crate::report::{aggregate_daily, DailyRevenue, MonthRange};

/// Store error types
#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    /// Query or connection failure reported by the database driver
    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    /// The store cannot be reached at all
    #[error("Store unavailable: {0}")]
    Unavailable(String),
}

/// Store result type alias
pub type StoreResult<T> = Result<T, StoreError>;

/// Typed access to the product collection
#[async_trait]
pub trait ProductStore: Send + Sync {
    /// Short name used in logs
    fn name(&self) -> &str;

    /// Every product, unfiltered, in the store's own order
    async fn list(&self) -> StoreResult<Vec<Product>>;

    /// Inserts all records or none, returning them with assigned ids
    async fn insert_many(&self, records: Vec<CreateProduct>) -> StoreResult<Vec<Product>>;

    /// Per-day revenue inside `range`, ascending by date
    async fn daily_revenue(&self, range: &MonthRange) -> StoreResult<Vec<DailyRevenue>>;

    /// Checks that the store answers
    async fn ping(&self) -> StoreResult<()>;
}

/// PostgreSQL-backed product store
#[derive(Debug, Clone)]
pub struct PgProductStore {
    pool: PgPool,
}

impl PgProductStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    pub fn pool(&self) -> &PgPool {
        &self.pool
    }
}

#[async_trait]
impl ProductStore for PgProductStore {
    fn name(&self) -> &str {
        "postgres"
    }

    async fn list(&self) -> StoreResult<Vec<Product>> {
        Ok(Product::list_all(&self.pool).await?)
    }

    async fn insert_many(&self, records: Vec<CreateProduct>) -> StoreResult<Vec<Product>> {
        debug!(count = records.len(), "Bulk inserting products");
        Ok(Product::create_many(&self.pool, records).await?)
    }

    async fn daily_revenue(&self, range: &MonthRange) -> StoreResult<Vec<DailyRevenue>> {
        Ok(Product::daily_revenue(&self.pool, range).await?)
    }

    async fn ping(&self) -> StoreResult<()> {
        Ok(health_check(&self.pool).await?)
    }
}

/// In-memory product store
#[derive(Debug, Default)]
pub struct MemoryProductStore {
    products: RwLock<Vec<Product>>,
    unavailable: Option<String>,
}

impl MemoryProductStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// A store whose every operation fails with [`StoreError::Unavailable`]
    pub fn unavailable(reason: impl Into<String>) -> Self {
        Self {
            products: RwLock::default(),
            unavailable: Some(reason.into()),
        }
    }

    fn check(&self) -> StoreResult<()> {
        match &self.unavailable {
            Some(reason) => Err(StoreError::Unavailable(reason.clone())),
            None => Ok(()),
        }
    }
}

#[async_trait]
impl ProductStore for MemoryProductStore {
    fn name(&self) -> &str {
        "memory"
    }

    async fn list(&self) -> StoreResult<Vec<Product>> {
        self.check()?;
        Ok(self.products.read().await.clone())
    }

    async fn insert_many(&self, records: Vec<CreateProduct>) -> StoreResult<Vec<Product>> {
        self.check()?;

        let now = Utc::now();
        let inserted: Vec<Product> = records
            .into_iter()
            .map(|record| Product {
                id: Uuid::new_v4(),
                created_at: record.created_at_or(now),
                name: record.name,
                price: record.price,
                quantity: record.quantity,
            })
            .collect();

        self.products.write().await.extend(inserted.iter().cloned());
        Ok(inserted)
    }

    async fn daily_revenue(&self, range: &MonthRange) -> StoreResult<Vec<DailyRevenue>> {
        self.check()?;
        let products = self.products.read().await;
        Ok(aggregate_daily(products.iter(), range))
    }

    async fn ping(&self) -> StoreResult<()> {
        self.check()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn record(price: f64, day: u32) -> CreateProduct {
        CreateProduct {
            name: "Licensed Rubber Ball".to_string(),
            price,
            quantity: 4,
            created_at: Some(Utc.with_ymd_and_hms(2024, 3, day, 12, 0, 0).unwrap()),
        }
    }

    #[tokio::test]
    async fn test_memory_insert_assigns_ids_and_lists_once() {
        let store = MemoryProductStore::new();

        let inserted = store
            .insert_many(vec![record(1.0, 1), record(2.0, 2), record(3.0, 3)])
            .await
            .unwrap();
        assert_eq!(inserted.len(), 3);

        let listed = store.list().await.unwrap();
        assert_eq!(listed, inserted);

        let mut ids: Vec<Uuid> = listed.iter().map(|p| p.id).collect();
        ids.sort();
        ids.dedup();
        assert_eq!(ids.len(), 3);
    }

    #[tokio::test]
    async fn test_memory_insert_fills_missing_created_at() {
        let store = MemoryProductStore::new();
        let before = Utc::now();

        let inserted = store
            .insert_many(vec![CreateProduct {
                name: "Generic Soft Towels".to_string(),
                price: 9.0,
                quantity: 1,
                created_at: None,
            }])
            .await
            .unwrap();

        assert!(inserted[0].created_at >= before);
        assert!(inserted[0].created_at <= Utc::now());
    }

    #[tokio::test]
    async fn test_memory_daily_revenue() {
        let store = MemoryProductStore::new();
        store
            .insert_many(vec![record(1.5, 9), record(2.0, 9), record(7.0, 2)])
            .await
            .unwrap();

        let range = MonthRange::new(2024, 3).unwrap();
        let report = store.daily_revenue(&range).await.unwrap();

        assert_eq!(report.len(), 2);
        assert_eq!(report[0].date, "2024-03-02");
        assert_eq!(report[1].date, "2024-03-09");
        assert_eq!(report[1].price, 3.5);
        assert_eq!(report[1].count, 2);
    }

    #[tokio::test]
    async fn test_unavailable_store_fails_every_call() {
        let store = MemoryProductStore::unavailable("no connection");
        let range = MonthRange::new(2024, 3).unwrap();

        assert!(matches!(store.list().await, Err(StoreError::Unavailable(_))));
        assert!(matches!(
            store.insert_many(vec![record(1.0, 1)]).await,
            Err(StoreError::Unavailable(_))
        ));
        assert!(matches!(
            store.daily_revenue(&range).await,
            Err(StoreError::Unavailable(_))
        ));
        assert!(store.ping().await.is_err());
    }

    #[test]
    fn test_store_error_display() {
        let err = StoreError::Unavailable("no connection".to_string());
        assert_eq!(err.to_string(), "Store unavailable: no connection");
    }
}
