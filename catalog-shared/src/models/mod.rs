/// Database models for the catalog
///
/// # Models
///
/// - `product`: Catalog products (listed, bulk-inserted, aggregated into revenue reports)
/// - `image`: Named image URLs; schema only, not exposed over HTTP

pub mod image;
pub mod product;
