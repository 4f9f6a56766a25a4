//! Product catalog business logic

use crate::domain::{ProductDto, ProductMinDto, ProductPayload};
use crate::error::{AppError, Result};
use crate::repository::ProductRepository;
use std::sync::Arc;
use validator::Validate;

pub struct ProductService<R: ProductRepository> {
    repo: Arc<R>,
}

impl<R: ProductRepository> ProductService<R> {
    pub fn new(repo: Arc<R>) -> Self {
        Self { repo }
    }

    pub async fn find_by_id(&self, id: i64) -> Result<ProductDto> {
        let product = self
            .repo
            .find_by_id(id)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("Product {} not found", id)))?;

        Ok(ProductDto::from(product))
    }

    /// Paginated, case-insensitive name search. `page` is 1-based.
    pub async fn list(&self, name: &str, page: i64, size: i64) -> Result<(Vec<ProductMinDto>, i64)> {
        let offset = (page - 1) * size;
        let products = self.repo.search_by_name(name, offset, size).await?;
        let total = self.repo.count_by_name(name).await?;

        Ok((products.into_iter().map(ProductMinDto::from).collect(), total))
    }

    pub async fn insert(&self, payload: ProductPayload) -> Result<ProductDto> {
        payload.validate()?;

        let product = self.repo.insert(&payload).await?;
        Ok(ProductDto::from(product))
    }

    pub async fn update(&self, id: i64, payload: ProductPayload) -> Result<ProductDto> {
        if !self.repo.exists_by_id(id).await? {
            return Err(AppError::NotFound(format!("Product {} not found", id)));
        }

        payload.validate()?;

        let product = self.repo.update(id, &payload).await?;
        Ok(ProductDto::from(product))
    }

    pub async fn delete(&self, id: i64) -> Result<()> {
        if !self.repo.exists_by_id(id).await? {
            return Err(AppError::NotFound(format!("Product {} not found", id)));
        }

        match self.repo.delete_by_id(id).await {
            Ok(()) => Ok(()),
            // A product referenced by order items must not disappear from
            // historical orders; surface the violation as a client error
            // without the raw driver detail.
            Err(AppError::Database(sqlx::Error::Database(db))) if db.is_foreign_key_violation() => {
                Err(AppError::DatabaseConflict(
                    "Product is referenced by existing order items".to_string(),
                ))
            }
            Err(e) => Err(e),
        }
    }
}
