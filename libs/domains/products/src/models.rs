use serde::{Deserialize, Serialize};
use utoipa::{IntoParams, ToSchema};
use validator::{Validate, ValidationError};

pub const DEFAULT_PAGE_SIZE: u64 = 10;
pub const MAX_PAGE_SIZE: u64 = 100;

/// Persisted product record.
///
/// `id` is `None` until the store assigns one on insert.
#[derive(Debug, Clone, PartialEq)]
pub struct Product {
    pub id: Option<i64>,
    pub name: String,
    pub description: String,
    pub price: f64,
    pub quantity: i32,
}

/// Wire representation of a product, used for both requests and responses.
///
/// Any `id` sent by a client is ignored; the path (on update) or the store
/// (on create) decides it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema, Validate)]
pub struct ProductDto {
    #[serde(default)]
    #[schema(read_only, example = 1)]
    pub id: Option<i64>,

    #[validate(length(min = 3, max = 30), custom(function = "not_blank"))]
    #[schema(example = "Widget", min_length = 3, max_length = 30)]
    pub name: String,

    #[validate(length(min = 8), custom(function = "not_blank"))]
    #[schema(example = "A very useful widget", min_length = 8)]
    pub description: String,

    #[validate(range(exclusive_min = 0.0))]
    #[schema(example = 9.99, exclusive_minimum = 0.0)]
    pub price: f64,

    #[validate(range(min = 1))]
    #[schema(example = 5, minimum = 1)]
    pub quantity: i32,
}

/// Rejects strings made only of whitespace.
fn not_blank(value: &str) -> Result<(), ValidationError> {
    if value.trim().is_empty() {
        let mut error = ValidationError::new("blank");
        error.message = Some("must not be blank".into());
        return Err(error);
    }
    Ok(())
}

/// Page selection for list endpoints. `page` is zero-based.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, IntoParams, Validate)]
#[into_params(parameter_in = Query)]
pub struct PageParams {
    /// Zero-based page number
    #[serde(default)]
    #[param(default = 0, minimum = 0)]
    pub page: u64,

    /// Items per page
    #[serde(default = "default_page_size")]
    #[validate(range(min = 1, max = 100))]
    #[param(default = 10, minimum = 1, maximum = 100)]
    pub size: u64,
}

fn default_page_size() -> u64 {
    DEFAULT_PAGE_SIZE
}

impl Default for PageParams {
    fn default() -> Self {
        Self {
            page: 0,
            size: DEFAULT_PAGE_SIZE,
        }
    }
}

/// One page of results plus position metadata.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct PaginatedResponse<T> {
    pub content: Vec<T>,
    pub total_pages: u64,
    pub total_elements: u64,
    /// Current page, zero-based
    pub number: u64,
    /// Requested page size
    pub size: u64,
}
