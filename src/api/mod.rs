//! REST API handlers and shared response types

pub mod category;
pub mod health;
pub mod metrics;
pub mod order;
pub mod product;
pub mod user;

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// Maximum allowed page size for pagination
pub(crate) const MAX_PAGE_SIZE: i64 = 100;

pub(crate) fn default_page() -> i64 {
    1
}

pub(crate) fn default_size() -> i64 {
    20
}

/// Reject page values less than 1
pub(crate) fn deserialize_page<'de, D>(deserializer: D) -> std::result::Result<i64, D::Error>
where
    D: serde::Deserializer<'de>,
{
    let value = i64::deserialize(deserializer)?;
    if value < 1 {
        return Err(serde::de::Error::custom(
            "page must be a positive integer (>= 1)",
        ));
    }
    Ok(value)
}

/// Reject size values less than 1, clamp to MAX_PAGE_SIZE
pub(crate) fn deserialize_size<'de, D>(deserializer: D) -> std::result::Result<i64, D::Error>
where
    D: serde::Deserializer<'de>,
{
    let value = i64::deserialize(deserializer)?;
    if value < 1 {
        return Err(serde::de::Error::custom(
            "size must be a positive integer (>= 1)",
        ));
    }
    Ok(value.min(MAX_PAGE_SIZE))
}

/// Paginated response wrapper
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PageResponse<T> {
    pub content: Vec<T>,
    pub page: i64,
    pub size: i64,
    pub total_elements: i64,
    pub total_pages: i64,
}

impl<T: Serialize> PageResponse<T> {
    pub fn new(content: Vec<T>, page: i64, size: i64, total_elements: i64) -> Self {
        let total_pages = (total_elements as f64 / size as f64).ceil() as i64;
        Self {
            content,
            page,
            size,
            total_elements,
            total_pages,
        }
    }
}

/// Message response (for error documentation in the OpenAPI spec)
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct MessageResponse {
    pub message: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_page_response_computes_total_pages() {
        let page = PageResponse::new(vec![1, 2, 3], 1, 3, 7);
        assert_eq!(page.total_pages, 3);
        assert_eq!(page.total_elements, 7);

        let exact = PageResponse::new(vec![1, 2], 1, 2, 4);
        assert_eq!(exact.total_pages, 2);
    }
}
