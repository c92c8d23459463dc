//! Shared test utilities for domain testing
//!
//! - `TestDatabase`: PostgreSQL container with migrations applied (feature: "postgres")
//! - `TestDataBuilder`: deterministic, constraint-satisfying product data
//! - `assertions`: small assertion helpers
//!
//! ```rust,no_run
//! use test_utils::{TestDatabase, TestDataBuilder};
//!
//! # async fn example() {
//! let db = TestDatabase::new().await;
//! let builder = TestDataBuilder::from_test_name("my_test");
//! let name = builder.name("widget");
//! # }
//! ```

#[cfg(feature = "postgres")]
mod postgres;

#[cfg(feature = "postgres")]
pub use postgres::TestDatabase;

/// Deterministic test data derived from a seed.
///
/// Generated values satisfy the product field rules: names stay within
/// 3-30 characters, descriptions are at least 8 characters, prices and
/// quantities are strictly positive.
pub struct TestDataBuilder {
    seed: u64,
}

impl TestDataBuilder {
    pub fn new(seed: u64) -> Self {
        Self { seed }
    }

    /// Seed from the test name so each test gets its own data.
    ///
    /// ```
    /// use test_utils::TestDataBuilder;
    ///
    /// let builder = TestDataBuilder::from_test_name("test_create_product");
    /// assert!(builder.name("widget").len() <= 30);
    /// ```
    pub fn from_test_name(name: &str) -> Self {
        use std::collections::hash_map::DefaultHasher;
        use std::hash::{Hash, Hasher};

        let mut hasher = DefaultHasher::new();
        name.hash(&mut hasher);
        Self::new(hasher.finish())
    }

    fn tag(&self) -> u64 {
        self.seed % 1_000_000
    }

    /// `<prefix>-<6 digit tag>`, truncated to 30 characters.
    pub fn name(&self, prefix: &str) -> String {
        let mut name = format!("{}-{:06}", prefix, self.tag());
        name.truncate(30);
        name
    }

    pub fn description(&self, subject: &str) -> String {
        format!("Test description for {} #{}", subject, self.tag())
    }

    /// Price in the range 1.00..=100.99
    pub fn price(&self) -> f64 {
        let cents = self.seed % 10_000;
        1.0 + cents as f64 / 100.0
    }

    /// Quantity in the range 1..=50
    pub fn quantity(&self) -> i32 {
        (self.seed % 50) as i32 + 1
    }
}

/// Test assertion helpers
pub mod assertions {
    /// Unwrap `Some`, panicking with `context` otherwise.
    pub fn assert_some<T>(value: Option<T>, context: &str) -> T {
        value.unwrap_or_else(|| panic!("{}: expected Some, got None", context))
    }

    /// Compare floats with a small absolute tolerance.
    pub fn assert_close(actual: f64, expected: f64, context: &str) {
        assert!(
            (actual - expected).abs() < 1e-9,
            "{}: expected {}, got {}",
            context,
            expected,
            actual
        );
    }
}
