/// Image model and database operations
///
/// # Schema
///
/// ```sql
/// CREATE TABLE images (
///     id UUID PRIMARY KEY DEFAULT gen_random_uuid(),
///     name TEXT NOT NULL,
///     url TEXT NOT NULL,
///     created_at TIMESTAMPTZ NOT NULL DEFAULT NOW(),
///     updated_at TIMESTAMPTZ NOT NULL DEFAULT NOW()
/// );
/// ```

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::PgPool;
use uuid::Uuid;

/// Image model
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, sqlx::FromRow)]
#[serde(rename_all = "camelCase")]
pub struct Image {
    #[serde(rename = "_id")]
    pub id: Uuid,
    pub name: String,
    pub url: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Input for creating an image
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateImage {
    pub name: String,
    pub url: String,
}

impl Image {
    /// Inserts an image; both timestamps are set by the database
    pub async fn create(pool: &PgPool, data: CreateImage) -> Result<Self, sqlx::Error> {
        let image = sqlx::query_as::<_, Image>(
            r#"
            INSERT INTO images (name, url)
            VALUES ($1, $2)
            RETURNING id, name, url, created_at, updated_at
            "#,
        )
        .bind(data.name)
        .bind(data.url)
        .fetch_one(pool)
        .await?;

        Ok(image)
    }

    /// Lists every image, oldest first
    pub async fn list_all(pool: &PgPool) -> Result<Vec<Self>, sqlx::Error> {
        let images = sqlx::query_as::<_, Image>(
            r#"
            SELECT id, name, url, created_at, updated_at
            FROM images
            ORDER BY created_at ASC
            "#,
        )
        .fetch_all(pool)
        .await?;

        Ok(images)
    }
}
