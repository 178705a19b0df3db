/// Database layer for the catalog
///
/// # Modules
///
/// - `pool`: Lazily-connecting PostgreSQL pool and health checks
/// - `connector`: Connect loop that retries on a fixed delay until the database answers
/// - `migrations`: Bundled schema migrations
///
/// # Example
///
/// ```no_run
/// use catalog_shared::db::{connector, pool::{create_lazy_pool, DatabaseConfig}};
///
/// #[tokio::main]
/// async fn main() -> Result<(), Box<dyn std::error::Error>> {
///     let config = DatabaseConfig {
///         url: std::env::var("DATABASE_URL")?,
///         ..Default::default()
///     };
///
///     let pool = create_lazy_pool(&config)?;
///     connector::connect(&pool, connector::DEFAULT_RETRY_DELAY).await;
///     Ok(())
/// }
/// ```

pub mod connector;
pub mod migrations;
pub mod pool;
