/// Synthetic product records
///
/// Generates plausible-looking catalog entries for seeding a database or
/// exercising the revenue report:
///
/// - name: `<adjective> <material> <product>`, e.g. "Ergonomic Granite Chair"
/// - price: an amount between 1 and 1000, rendered as a two-decimal price tag
/// - quantity: an integer between 0 and 99999
/// - created_at: a moment within the year before the reference time
///
/// # Example
///
/// ```
/// use catalog_shared::generator::ProductGenerator;
///
/// let records = ProductGenerator::new().generate(3);
/// assert_eq!(records.len(), 3);
/// ```

use chrono::{DateTime, Duration, Utc};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use crate::models::product::CreateProduct;

const ADJECTIVES: &[&str] = &[
    "Small", "Ergonomic", "Rustic", "Intelligent", "Gorgeous", "Incredible", "Fantastic",
    "Practical", "Sleek", "Awesome", "Generic", "Handcrafted", "Handmade", "Licensed",
    "Refined", "Unbranded", "Tasty",
];

const MATERIALS: &[&str] = &[
    "Steel", "Wooden", "Concrete", "Plastic", "Cotton", "Granite", "Rubber", "Metal", "Soft",
    "Fresh", "Frozen",
];

const PRODUCTS: &[&str] = &[
    "Chair", "Car", "Computer", "Keyboard", "Mouse", "Bike", "Ball", "Gloves", "Pants",
    "Shirt", "Table", "Shoes", "Hat", "Towels", "Soap", "Tuna", "Chicken", "Fish", "Cheese",
    "Bacon", "Pizza", "Salad", "Sausages", "Chips",
];

/// Lowest generated price
pub const MIN_PRICE: f64 = 1.0;

/// Highest generated price
pub const MAX_PRICE: f64 = 1000.0;

/// Highest generated quantity
pub const MAX_QUANTITY: i64 = 99_999;

/// How far back generated timestamps reach
pub const LOOKBACK_DAYS: i64 = 365;

/// Largest batch a single request may generate, whatever `GENERATE_MAX` says
pub const MAX_BATCH: usize = 100_000;

/// Random product factory
#[derive(Debug)]
pub struct ProductGenerator<R = StdRng> {
    rng: R,
    reference_time: Option<DateTime<Utc>>,
}

impl ProductGenerator<StdRng> {
    /// Generator seeded from the OS, anchored at the current time
    pub fn new() -> Self {
        Self::with_rng(StdRng::from_entropy())
    }

    /// Reproducible generator
    pub fn seeded(seed: u64) -> Self {
        Self::with_rng(StdRng::seed_from_u64(seed))
    }
}

impl Default for ProductGenerator<StdRng> {
    fn default() -> Self {
        Self::new()
    }
}

impl<R: Rng> ProductGenerator<R> {
    pub fn with_rng(rng: R) -> Self {
        Self {
            rng,
            reference_time: None,
        }
    }

    /// Pins "now" so generated timestamps are reproducible
    pub fn at(mut self, reference_time: DateTime<Utc>) -> Self {
        self.reference_time = Some(reference_time);
        self
    }

    /// Generates `count` records
    pub fn generate(&mut self, count: usize) -> Vec<CreateProduct> {
        let now = self.reference_time.unwrap_or_else(Utc::now);
        (0..count).map(|_| self.product(now)).collect()
    }

    fn product(&mut self, now: DateTime<Utc>) -> CreateProduct {
        let tag = self.price_tag();

        CreateProduct {
            name: self.product_name(),
            // The tag is always "<digits>.<two digits>".
            price: tag.parse().unwrap_or(MIN_PRICE),
            quantity: self.rng.gen_range(0..=MAX_QUANTITY),
            created_at: Some(self.past(now)),
        }
    }

    /// e.g. "Ergonomic Granite Chair"
    pub fn product_name(&mut self) -> String {
        format!(
            "{} {} {}",
            self.pick(ADJECTIVES),
            self.pick(MATERIALS),
            self.pick(PRODUCTS)
        )
    }

    /// Price rendered with two decimals, e.g. "482.17"
    pub fn price_tag(&mut self) -> String {
        let cents = self
            .rng
            .gen_range((MIN_PRICE * 100.0) as u64..=(MAX_PRICE * 100.0) as u64);
        format!("{}.{:02}", cents / 100, cents % 100)
    }

    fn past(&mut self, now: DateTime<Utc>) -> DateTime<Utc> {
        let lookback_ms = Duration::days(LOOKBACK_DAYS).num_milliseconds();
        let offset = self.rng.gen_range(1..=lookback_ms);
        now - Duration::milliseconds(offset)
    }

    fn pick(&mut self, words: &[&'static str]) -> &'static str {
        words[self.rng.gen_range(0..words.len())]
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn test_generates_requested_count() {
        let mut generator = ProductGenerator::seeded(7);
        assert_eq!(generator.generate(0).len(), 0);
        assert_eq!(generator.generate(1).len(), 1);
        assert_eq!(generator.generate(250).len(), 250);
    }

    #[test]
    fn test_fields_stay_in_range() {
        let now = Utc.with_ymd_and_hms(2024, 6, 15, 12, 0, 0).unwrap();
        let records = ProductGenerator::seeded(42).at(now).generate(500);

        for record in &records {
            assert!(record.price >= MIN_PRICE && record.price <= MAX_PRICE);
            assert!((0..=MAX_QUANTITY).contains(&record.quantity));

            let created = record.created_at.expect("generated records carry a timestamp");
            assert!(created < now);
            assert!(created >= now - Duration::days(LOOKBACK_DAYS));
        }
    }

    #[test]
    fn test_names_have_three_words() {
        let records = ProductGenerator::seeded(3).generate(50);

        for record in &records {
            let words: Vec<&str> = record.name.split(' ').collect();
            assert_eq!(words.len(), 3, "unexpected name {:?}", record.name);
            assert!(ADJECTIVES.contains(&words[0]));
            assert!(MATERIALS.contains(&words[1]));
            assert!(PRODUCTS.contains(&words[2]));
        }
    }

    #[test]
    fn test_price_tag_has_two_decimals() {
        let mut generator = ProductGenerator::seeded(11);

        for _ in 0..200 {
            let tag = generator.price_tag();
            let (units, cents) = tag.split_once('.').expect("tag has a decimal point");
            assert!(!units.is_empty());
            assert_eq!(cents.len(), 2);

            let value: f64 = tag.parse().unwrap();
            assert!((MIN_PRICE..=MAX_PRICE).contains(&value));
        }
    }

    #[test]
    fn test_same_seed_same_records() {
        let now = Utc.with_ymd_and_hms(2024, 1, 1, 0, 0, 0).unwrap();
        let a = ProductGenerator::seeded(99).at(now).generate(20);
        let b = ProductGenerator::seeded(99).at(now).generate(20);
        assert_eq!(a, b);
    }
}
