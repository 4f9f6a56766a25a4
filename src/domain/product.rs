//! Product domain model, mutation payload and field validation

use super::category::{Category, CategoryDto};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::ToSchema;
use validator::{Validate, ValidationError};

/// Product aggregate: catalog row plus its category references
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Product {
    pub id: i64,
    pub name: String,
    pub description: String,
    pub price: Decimal,
    pub img_url: String,
    pub categories: Vec<Category>,
}

/// Catalog row without category links, used by the paginated listing
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct ProductSummary {
    pub id: i64,
    pub name: String,
    pub price: Decimal,
    pub img_url: String,
}

/// Category reference inside a product mutation payload
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct CategoryRef {
    pub id: i64,
}

/// Create/update request body for a product
///
/// Violations are collected per field, never fail-fast, so one 422 response
/// enumerates everything the client has to fix.
#[derive(Debug, Clone, Serialize, Deserialize, Validate, ToSchema)]
pub struct ProductPayload {
    #[validate(length(min = 3, message = "name must have at least 3 characters"))]
    pub name: String,

    #[validate(length(min = 10, message = "description must have at least 10 characters"))]
    pub description: String,

    #[validate(custom(function = "validate_price"))]
    pub price: Decimal,

    #[serde(default)]
    pub img_url: String,

    #[validate(length(min = 1, message = "product must have at least one category"))]
    pub categories: Vec<CategoryRef>,
}

/// Strictly positive: a zero price is invalid, not just a negative one.
fn validate_price(price: &Decimal) -> Result<(), ValidationError> {
    if *price > Decimal::ZERO {
        Ok(())
    } else {
        let mut err = ValidationError::new("positive");
        err.message = Some("price must be positive".into());
        Err(err)
    }
}

/// Full wire-format projection of a product
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct ProductDto {
    pub id: i64,
    pub name: String,
    pub description: String,
    pub price: Decimal,
    pub img_url: String,
    pub categories: Vec<CategoryDto>,
}

impl From<Product> for ProductDto {
    fn from(product: Product) -> Self {
        Self {
            id: product.id,
            name: product.name,
            description: product.description,
            price: product.price,
            img_url: product.img_url,
            categories: product
                .categories
                .into_iter()
                .map(CategoryDto::from)
                .collect(),
        }
    }
}

/// Minimal wire-format projection for catalog listings
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct ProductMinDto {
    pub id: i64,
    pub name: String,
    pub price: Decimal,
    pub img_url: String,
}

impl From<ProductSummary> for ProductMinDto {
    fn from(summary: ProductSummary) -> Self {
        Self {
            id: summary.id,
            name: summary.name,
            price: summary.price,
            img_url: summary.img_url,
        }
    }
}
