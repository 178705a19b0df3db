/// Monthly revenue report
///
/// Products are bucketed by the UTC calendar date of `created_at`. Each bucket
/// carries the summed price and the number of products created that day. A
/// report covers one calendar month and lists its non-empty days in ascending
/// order.
///
/// Month and day are zero-padded when rendered, so `month = "3"` and
/// `month = "03"` select the same range.
///
/// # Example
///
/// ```
/// use catalog_shared::report::MonthRange;
///
/// let range = MonthRange::parse("2", "2024").unwrap();
/// assert_eq!(range.start_label(), "2024-02-01");
/// assert_eq!(range.end_label(), "2024-02-29");
/// ```

use chrono::{DateTime, Datelike, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use utoipa::ToSchema;

use crate::models::product::Product;

/// Date format used for bucket keys
pub const BUCKET_FORMAT: &str = "%Y-%m-%d";

/// Errors raised while reading report parameters
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ReportError {
    /// Month is not a number between 1 and 12
    #[error("month must be a number between 1 and 12, got {0:?}")]
    InvalidMonth(String),

    /// Year is not a number between 1 and 9999
    #[error("year must be a number between 1 and 9999, got {0:?}")]
    InvalidYear(String),
}

/// Aggregated sales for one calendar day
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema, sqlx::FromRow)]
pub struct DailyRevenue {
    /// Day of the bucket (`YYYY-MM-DD`)
    #[schema(example = "2024-03-05")]
    pub date: String,

    /// Sum of the prices of the products created that day
    pub price: f64,

    /// Number of products created that day
    pub count: i64,
}

/// Inclusive range of days covering one calendar month
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MonthRange {
    first_day: NaiveDate,
    last_day: NaiveDate,
}

impl MonthRange {
    /// Builds the range for `month` of `year`
    pub fn new(year: i32, month: u32) -> Result<Self, ReportError> {
        if !(1..=9999).contains(&year) {
            return Err(ReportError::InvalidYear(year.to_string()));
        }

        let first_day = NaiveDate::from_ymd_opt(year, month, 1)
            .ok_or_else(|| ReportError::InvalidMonth(month.to_string()))?;

        // Day before the first of the following month.
        let (next_year, next_month) = if month == 12 {
            (year + 1, 1)
        } else {
            (year, month + 1)
        };
        let last_day = NaiveDate::from_ymd_opt(next_year, next_month, 1)
            .and_then(|d| d.pred_opt())
            .ok_or_else(|| ReportError::InvalidYear(year.to_string()))?;

        Ok(Self {
            first_day,
            last_day,
        })
    }

    /// Parses month and year as they arrive in a query string
    pub fn parse(month: &str, year: &str) -> Result<Self, ReportError> {
        let month_num: u32 = month
            .trim()
            .parse()
            .map_err(|_| ReportError::InvalidMonth(month.to_string()))?;
        let year_num: i32 = year
            .trim()
            .parse()
            .map_err(|_| ReportError::InvalidYear(year.to_string()))?;

        if !(1..=12).contains(&month_num) {
            return Err(ReportError::InvalidMonth(month.to_string()));
        }

        Self::new(year_num, month_num)
    }

    pub fn first_day(&self) -> NaiveDate {
        self.first_day
    }

    pub fn last_day(&self) -> NaiveDate {
        self.last_day
    }

    /// `YYYY-MM-01`
    pub fn start_label(&self) -> String {
        self.first_day.format(BUCKET_FORMAT).to_string()
    }

    /// `YYYY-MM-<last day>`
    pub fn end_label(&self) -> String {
        self.last_day.format(BUCKET_FORMAT).to_string()
    }

    /// First instant of the month (UTC), inclusive
    pub fn start_instant(&self) -> DateTime<Utc> {
        self.first_day.and_time(chrono::NaiveTime::MIN).and_utc()
    }

    /// First instant after the month (UTC), exclusive
    pub fn end_instant(&self) -> DateTime<Utc> {
        // last_day is at most 9999-12-31, whose successor chrono still represents.
        let next = self.last_day.succ_opt().unwrap_or(self.last_day);
        next.and_time(chrono::NaiveTime::MIN).and_utc()
    }

    /// Whether the UTC date of `at` falls inside the month
    pub fn contains(&self, at: &DateTime<Utc>) -> bool {
        let day = at.date_naive();
        day >= self.first_day && day <= self.last_day
    }

    pub fn month(&self) -> u32 {
        self.first_day.month()
    }

    pub fn year(&self) -> i32 {
        self.first_day.year()
    }
}

/// Buckets `products` by day and keeps the days inside `range`
///
/// Output is sorted ascending by date. Days without products are not listed.
pub fn aggregate_daily<'a, I>(products: I, range: &MonthRange) -> Vec<DailyRevenue>
where
    I: IntoIterator<Item = &'a Product>,
{
    let mut buckets: BTreeMap<NaiveDate, (f64, i64)> = BTreeMap::new();

    for product in products {
        let entry = buckets
            .entry(product.created_at.date_naive())
            .or_insert((0.0, 0));
        entry.0 += product.price;
        entry.1 += 1;
    }

    buckets
        .range(range.first_day()..=range.last_day())
        .map(|(day, (price, count))| DailyRevenue {
            date: day.format(BUCKET_FORMAT).to_string(),
            price: *price,
            count: *count,
        })
        .collect()
}
