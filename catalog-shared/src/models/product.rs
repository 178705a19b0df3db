/// Product model and database operations
///
/// Products are only ever inserted and read; nothing in the service updates
/// or deletes them.
///
/// # Schema
///
/// ```sql
/// CREATE TABLE products (
///     id UUID PRIMARY KEY DEFAULT gen_random_uuid(),
///     name TEXT NOT NULL,
///     price DOUBLE PRECISION NOT NULL,
///     quantity BIGINT NOT NULL,
///     created_at TIMESTAMPTZ NOT NULL DEFAULT NOW()
/// );
/// ```
///
/// # Example
///
/// ```no_run
/// use catalog_shared::models::product::{CreateProduct, Product};
/// use catalog_shared::db::pool::{create_lazy_pool, DatabaseConfig};
///
/// # async fn example() -> Result<(), Box<dyn std::error::Error>> {
/// let pool = create_lazy_pool(&DatabaseConfig::default())?;
///
/// let inserted = Product::create_many(&pool, vec![CreateProduct {
///     name: "Handcrafted Granite Table".to_string(),
///     price: 249.0,
///     quantity: 12,
///     created_at: None,
/// }]).await?;
///
/// println!("Inserted {} products", inserted.len());
/// # Ok(())
/// # }
/// ```

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::PgPool;
use utoipa::ToSchema;
use uuid::Uuid;

use crate::report::{DailyRevenue, MonthRange};

/// Product model
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema, sqlx::FromRow)]
#[serde(rename_all = "camelCase")]
pub struct Product {
    /// Store-assigned identifier
    #[serde(rename = "_id")]
    pub id: Uuid,

    /// Product name
    pub name: String,

    /// Unit price
    pub price: f64,

    /// Units in stock
    pub quantity: i64,

    /// Creation time, used for revenue bucketing
    pub created_at: DateTime<Utc>,
}

/// Input for inserting a product
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CreateProduct {
    pub name: String,
    pub price: f64,
    pub quantity: i64,

    /// Defaults to the moment the record is inserted
    #[serde(default)]
    pub created_at: Option<DateTime<Utc>>,
}

impl CreateProduct {
    /// Creation time to store, filling in `now` when none was given
    pub fn created_at_or(&self, now: DateTime<Utc>) -> DateTime<Utc> {
        self.created_at.unwrap_or(now)
    }
}

impl Product {
    /// Lists every product in storage order
    pub async fn list_all(pool: &PgPool) -> Result<Vec<Self>, sqlx::Error> {
        let products = sqlx::query_as::<_, Product>(
            r#"
            SELECT id, name, price, quantity, created_at
            FROM products
            "#,
        )
        .fetch_all(pool)
        .await?;

        Ok(products)
    }

    /// Inserts a batch of products in one statement
    ///
    /// The batch is all-or-nothing. Records without `created_at` get the
    /// time of this call.
    pub async fn create_many(
        pool: &PgPool,
        records: Vec<CreateProduct>,
    ) -> Result<Vec<Self>, sqlx::Error> {
        if records.is_empty() {
            return Ok(Vec::new());
        }

        let now = Utc::now();
        let mut names = Vec::with_capacity(records.len());
        let mut prices = Vec::with_capacity(records.len());
        let mut quantities = Vec::with_capacity(records.len());
        let mut created = Vec::with_capacity(records.len());

        for record in records {
            created.push(record.created_at_or(now));
            names.push(record.name);
            prices.push(record.price);
            quantities.push(record.quantity);
        }

        let products = sqlx::query_as::<_, Product>(
            r#"
            INSERT INTO products (name, price, quantity, created_at)
            SELECT * FROM UNNEST($1::text[], $2::float8[], $3::int8[], $4::timestamptz[])
            RETURNING id, name, price, quantity, created_at
            "#,
        )
        .bind(names)
        .bind(prices)
        .bind(quantities)
        .bind(created)
        .fetch_all(pool)
        .await?;

        Ok(products)
    }

    /// Daily revenue for the days of `range` that have products
    pub async fn daily_revenue(
        pool: &PgPool,
        range: &MonthRange,
    ) -> Result<Vec<DailyRevenue>, sqlx::Error> {
        let rows = sqlx::query_as::<_, DailyRevenue>(
            r#"
            SELECT to_char(created_at AT TIME ZONE 'UTC', 'YYYY-MM-DD') AS date,
                   SUM(price)::float8 AS price,
                   COUNT(*) AS count
            FROM products
            WHERE created_at >= $1 AND created_at < $2
            GROUP BY 1
            ORDER BY 1 ASC
            "#,
        )
        .bind(range.start_instant())
        .bind(range.end_instant())
        .fetch_all(pool)
        .await?;

        Ok(rows)
    }

    /// Counts all products
    pub async fn count(pool: &PgPool) -> Result<i64, sqlx::Error> {
        let (count,): (i64,) = sqlx::query_as("SELECT COUNT(*) FROM products")
            .fetch_one(pool)
            .await?;

        Ok(count)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn test_product_wire_names() {
        let product = Product {
            id: Uuid::nil(),
            name: "Small Wooden Gloves".to_string(),
            price: 12.5,
            quantity: 3,
            created_at: Utc.with_ymd_and_hms(2024, 3, 5, 10, 0, 0).unwrap(),
        };

        let json = serde_json::to_value(&product).unwrap();
        assert_eq!(json["_id"], Uuid::nil().to_string());
        assert_eq!(json["name"], "Small Wooden Gloves");
        assert_eq!(json["price"], 12.5);
        assert_eq!(json["quantity"], 3);
        assert_eq!(json["createdAt"], "2024-03-05T10:00:00Z");
        assert!(json.get("created_at").is_none());
    }

    #[test]
    fn test_create_product_defaults_created_at_per_call() {
        let record: CreateProduct = serde_json::from_value(serde_json::json!({
            "name": "Sleek Cotton Hat",
            "price": 5.0,
            "quantity": 1
        }))
        .unwrap();

        assert!(record.created_at.is_none());

        let first = Utc.with_ymd_and_hms(2024, 1, 1, 0, 0, 0).unwrap();
        let later = Utc.with_ymd_and_hms(2024, 6, 1, 0, 0, 0).unwrap();
        assert_eq!(record.created_at_or(first), first);
        assert_eq!(record.created_at_or(later), later);
    }

    #[test]
    fn test_create_product_keeps_explicit_created_at() {
        let at = Utc.with_ymd_and_hms(2023, 11, 2, 9, 30, 0).unwrap();
        let record = CreateProduct {
            name: "Tasty Fresh Bacon".to_string(),
            price: 1.0,
            quantity: 1,
            created_at: Some(at),
        };

        assert_eq!(record.created_at_or(Utc::now()), at);
    }
}
