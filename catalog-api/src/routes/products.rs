/// Product endpoints
///
/// # Endpoints
///
/// - `GET /api/products` - List products, or a daily revenue report when both
///   `month` and `year` are given
/// - `POST /api/products/generate` - Insert `num` synthetic products

use crate::{
    app::AppState,
    error::{ApiError, ApiResult},
    extract::JsonOrForm,
};
use axum::{
    extract::{Query, State},
    Json,
};
use catalog_shared::{
    generator::{ProductGenerator, MAX_BATCH},
    models::product::Product,
    report::{DailyRevenue, MonthRange, ReportError},
};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use utoipa::{IntoParams, ToSchema};

/// Report filter for `GET /api/products`
#[derive(Debug, Default, Deserialize, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct ProductQuery {
    /// Month to report on (1-12)
    pub month: Option<String>,

    /// Year to report on
    pub year: Option<String>,
}

impl ProductQuery {
    /// The month to aggregate, if both parameters were given
    pub fn month_range(&self) -> Result<Option<MonthRange>, ReportError> {
        let present = |v: &Option<String>| v.as_deref().filter(|s| !s.is_empty()).map(str::to_owned);

        match (present(&self.month), present(&self.year)) {
            (Some(month), Some(year)) => MonthRange::parse(&month, &year).map(Some),
            _ => Ok(None),
        }
    }
}

/// Either raw products or daily aggregates
#[derive(Debug, Serialize, ToSchema)]
#[serde(untagged)]
pub enum ProductListing {
    Records(Vec<Product>),
    Daily(Vec<DailyRevenue>),
}

impl ProductListing {
    pub fn len(&self) -> usize {
        match self {
            ProductListing::Records(records) => records.len(),
            ProductListing::Daily(days) => days.len(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// Success envelope for product endpoints
#[derive(Debug, Serialize, ToSchema)]
pub struct ProductsResponse {
    /// Always `true`
    pub success: bool,
    pub products: ProductListing,
}

impl ProductsResponse {
    fn ok(products: ProductListing) -> Self {
        Self {
            success: true,
            products,
        }
    }
}

/// Body of `POST /api/products/generate`
#[derive(Debug, Default, Deserialize, ToSchema)]
pub struct GenerateRequest {
    /// How many products to generate (number or numeric string)
    #[serde(default)]
    #[schema(value_type = Option<f64>, example = 10)]
    pub num: Option<Value>,
}

/// Reads `num` the way a loosely typed client sends it
///
/// A string must be numeric as a whole (decimal, exponent, `0x`/`0o`/`0b`
/// prefixed or `Infinity`; an empty string is zero), but the count is taken
/// from its leading integer only, so `"1e2"` asks for 1 record and `"0x10"`
/// for 16. JSON numbers are truncated. Negative, non-finite or digit-less
/// counts mean zero. Missing, null, booleans, objects and arrays are rejected.
pub fn parse_num(value: Option<&Value>) -> Option<usize> {
    let n = match value? {
        Value::Number(n) => n.as_f64()?,
        Value::String(s) => {
            let s = s.trim();
            numeric_value(s)?;
            leading_integer(s)
        }
        _ => return None,
    };

    if !n.is_finite() || n <= 0.0 {
        return Some(0);
    }

    // Saturates for huge values; the caller's cap rejects those.
    Some(n.trunc() as usize)
}

/// Whole-string numeric value, `None` if the string is not a number
fn numeric_value(s: &str) -> Option<f64> {
    if s.is_empty() {
        return Some(0.0);
    }

    for (prefix, radix) in [("0x", 16), ("0o", 8), ("0b", 2)] {
        let lower = s.get(..2).map(str::to_ascii_lowercase);
        if lower.as_deref() == Some(prefix) {
            let digits = &s[2..];
            if digits.is_empty() || !digits.chars().all(|c| c.is_digit(radix)) {
                return None;
            }
            return Some(
                digits
                    .chars()
                    .filter_map(|c| c.to_digit(radix))
                    .fold(0.0, |acc, d| acc * f64::from(radix) + f64::from(d)),
            );
        }
    }

    let unsigned = s.strip_prefix(&['+', '-'][..]).unwrap_or(s);
    if unsigned == "Infinity" {
        return Some(if s.starts_with('-') { f64::NEG_INFINITY } else { f64::INFINITY });
    }

    if !unsigned
        .chars()
        .all(|c| c.is_ascii_digit() || matches!(c, '.' | 'e' | 'E' | '+' | '-'))
    {
        return None;
    }

    s.parse::<f64>().ok()
}

/// Leading integer of a string, NaN when there are no digits
fn leading_integer(s: &str) -> f64 {
    let (negative, rest) = match s.as_bytes().first() {
        Some(b'-') => (true, &s[1..]),
        Some(b'+') => (false, &s[1..]),
        _ => (false, s),
    };

    let (radix, digits) = match rest.get(..2) {
        Some("0x") | Some("0X") => (16, &rest[2..]),
        _ => (10, rest),
    };

    let mut value: Option<f64> = None;
    for d in digits.chars().map_while(|c| c.to_digit(radix)) {
        value = Some(value.unwrap_or(0.0) * f64::from(radix) + f64::from(d));
    }

    match value {
        Some(v) if negative => -v,
        Some(v) => v,
        None => f64::NAN,
    }
}

/// List products or report daily revenue
///
/// Without `month` and `year` every product is returned, unfiltered. With both,
/// products are bucketed by creation day and the days of that month are
/// returned in ascending order.
///
/// # Errors
///
/// - `400 Bad Request`: month or year is not a valid number
/// - `500 Internal Server Error`: store failure
#[utoipa::path(
    get,
    path = "/api/products",
    tag = "products",
    params(ProductQuery),
    responses(
        (status = 200, description = "Products or daily revenue", body = ProductsResponse),
        (status = 400, description = "Invalid month or year", body = crate::error::ErrorResponse),
        (status = 500, description = "Store failure", body = crate::error::ErrorResponse)
    )
)]
pub async fn list_products(
    State(state): State<AppState>,
    Query(query): Query<ProductQuery>,
) -> ApiResult<Json<ProductsResponse>> {
    let products = match query.month_range()? {
        Some(range) => {
            tracing::debug!(
                year = range.year(),
                month = range.month(),
                from = %range.start_label(),
                to = %range.end_label(),
                "Building daily revenue report"
            );
            ProductListing::Daily(state.store.daily_revenue(&range).await?)
        }
        None => ProductListing::Records(state.store.list().await?),
    };

    tracing::debug!(store = state.store.name(), rows = products.len(), "Products listed");

    Ok(Json(ProductsResponse::ok(products)))
}

/// Generate synthetic products
///
/// Creates `num` random products, inserts them in one batch and returns them.
///
/// # Errors
///
/// - `400 Bad Request`: `num` is not a number, or exceeds `GENERATE_MAX`
///   (never more than [`MAX_BATCH`])
/// - `500 Internal Server Error`: store failure
#[utoipa::path(
    post,
    path = "/api/products/generate",
    tag = "products",
    request_body = GenerateRequest,
    responses(
        (status = 200, description = "Inserted products", body = ProductsResponse),
        (status = 400, description = "num is not a number or too large", body = crate::error::ErrorResponse),
        (status = 500, description = "Store failure", body = crate::error::ErrorResponse)
    )
)]
pub async fn generate_products(
    State(state): State<AppState>,
    JsonOrForm(req): JsonOrForm<GenerateRequest>,
) -> ApiResult<Json<ProductsResponse>> {
    let count = parse_num(req.num.as_ref())
        .ok_or_else(|| ApiError::BadRequest("num must be a number".to_string()))?;

    let max = state
        .config
        .api
        .generate_max
        .map_or(MAX_BATCH, |max| max.min(MAX_BATCH));
    if count > max {
        return Err(ApiError::BadRequest(format!("num must not exceed {}", max)));
    }

    let records = ProductGenerator::new().generate(count);
    let products = state.store.insert_many(records).await?;

    tracing::info!(count = products.len(), "Generated synthetic products");

    Ok(Json(ProductsResponse::ok(ProductListing::Records(products))))
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_parse_num_accepts_numbers_and_numeric_strings() {
        assert_eq!(parse_num(Some(&json!(5))), Some(5));
        assert_eq!(parse_num(Some(&json!(0))), Some(0));
        assert_eq!(parse_num(Some(&json!("12"))), Some(12));
        assert_eq!(parse_num(Some(&json!(" 7 "))), Some(7));
        assert_eq!(parse_num(Some(&json!("+4"))), Some(4));
        assert_eq!(parse_num(Some(&json!(3.99))), Some(3));
    }

    #[test]
    fn test_parse_num_counts_leading_integer_of_strings() {
        assert_eq!(parse_num(Some(&json!("2.9"))), Some(2));
        assert_eq!(parse_num(Some(&json!("1e2"))), Some(1));
        assert_eq!(parse_num(Some(&json!("0x10"))), Some(16));
        assert_eq!(parse_num(Some(&json!(".5"))), Some(0));
        assert_eq!(parse_num(Some(&json!("Infinity"))), Some(0));
    }

    #[test]
    fn test_parse_num_empty_and_negative_mean_zero() {
        assert_eq!(parse_num(Some(&json!(""))), Some(0));
        assert_eq!(parse_num(Some(&json!(-4))), Some(0));
        assert_eq!(parse_num(Some(&json!("-1"))), Some(0));
    }

    #[test]
    fn test_parse_num_saturates_huge_values() {
        assert_eq!(parse_num(Some(&json!(1e20))), Some(usize::MAX));
    }

    #[test]
    fn test_parse_num_rejects_non_numbers() {
        assert_eq!(parse_num(None), None);
        assert_eq!(parse_num(Some(&json!("abc"))), None);
        assert_eq!(parse_num(Some(&json!("12abc"))), None);
        assert_eq!(parse_num(Some(&json!("0x"))), None);
        assert_eq!(parse_num(Some(&json!("0xZZ"))), None);
        assert_eq!(parse_num(Some(&json!(true))), None);
        assert_eq!(parse_num(Some(&json!([1]))), None);
        assert_eq!(parse_num(Some(&json!({"n": 1}))), None);
        assert_eq!(parse_num(Some(&json!("NaN"))), None);
        assert_eq!(parse_num(Some(&json!("inf"))), None);
    }

    #[test]
    fn test_month_range_requires_both_parameters() {
        let only_month = ProductQuery {
            month: Some("3".to_string()),
            year: None,
        };
        assert_eq!(only_month.month_range(), Ok(None));

        let empty_year = ProductQuery {
            month: Some("3".to_string()),
            year: Some(String::new()),
        };
        assert_eq!(empty_year.month_range(), Ok(None));

        let both = ProductQuery {
            month: Some("3".to_string()),
            year: Some("2024".to_string()),
        };
        let range = both.month_range().unwrap().unwrap();
        assert_eq!(range.start_label(), "2024-03-01");
        assert_eq!(range.end_label(), "2024-03-31");
    }

    #[test]
    fn test_listing_serializes_as_bare_array() {
        let listing = ProductListing::Daily(vec![DailyRevenue {
            date: "2024-03-01".to_string(),
            price: 4.0,
            count: 1,
        }]);

        let json = serde_json::to_value(ProductsResponse::ok(listing)).unwrap();
        assert_eq!(json["success"], true);
        assert_eq!(json["products"][0]["date"], "2024-03-01");
        assert_eq!(json["products"][0]["count"], 1);
    }
}
