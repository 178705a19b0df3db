/// Interactive API documentation
///
/// - `GET /api-docs` - Swagger UI page
/// - `GET /api-docs/openapi.json` - OpenAPI document the page renders

use crate::error::ErrorResponse;
use crate::routes::{health, products, smoke};
use axum::{response::Html, Json};
use catalog_shared::{models::product::Product, report::DailyRevenue};
use utoipa::OpenApi;

/// Where the Swagger UI page loads the document from
pub const OPENAPI_PATH: &str = "/api-docs/openapi.json";

#[derive(OpenApi)]
#[openapi(
    info(title = "Product Catalog API", description = "Products, monthly revenue and synthetic data"),
    paths(
        products::list_products,
        products::generate_products,
        smoke::echo,
        smoke::test_v1,
        smoke::test_v2,
        health::health_check,
    ),
    components(schemas(
        Product,
        DailyRevenue,
        products::ProductListing,
        products::ProductsResponse,
        products::GenerateRequest,
        smoke::NamePayload,
        health::HealthResponse,
        ErrorResponse,
    )),
    tags(
        (name = "products", description = "Product listing, revenue report and data generation"),
        (name = "test", description = "Smoke-test endpoints"),
        (name = "health", description = "Service health")
    )
)]
pub struct ApiDoc;

pub async fn openapi_json() -> Json<utoipa::openapi::OpenApi> {
    Json(ApiDoc::openapi())
}

pub async fn docs_page() -> Html<String> {
    Html(format!(
        r##"<!DOCTYPE html>
<html lang="en">
<head>
  <meta charset="utf-8" />
  <title>Product Catalog API</title>
  <link rel="stylesheet" href="https://unpkg.com/swagger-ui-dist@5/swagger-ui.css" />
</head>
<body>
  <div id="swagger-ui"></div>
  <script src="https://unpkg.com/swagger-ui-dist@5/swagger-ui-bundle.js" crossorigin></script>
  <script>
    window.onload = () => {{
      window.ui = SwaggerUIBundle({{ url: "{}", dom_id: "#swagger-ui" }});
    }};
  </script>
</body>
</html>
"##,
        OPENAPI_PATH
    ))
}
