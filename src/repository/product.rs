//! Product repository

use crate::domain::{Category, Product, ProductPayload, ProductSummary};
use crate::error::{AppError, Result};
use async_trait::async_trait;
use sqlx::{FromRow, MySqlPool};

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait ProductRepository: Send + Sync {
    async fn find_by_id(&self, id: i64) -> Result<Option<Product>>;
    async fn exists_by_id(&self, id: i64) -> Result<bool>;
    /// Case-insensitive substring search over product names; an empty
    /// pattern matches everything. Ordered by id for stable pages.
    async fn search_by_name(
        &self,
        name: &str,
        offset: i64,
        limit: i64,
    ) -> Result<Vec<ProductSummary>>;
    async fn count_by_name(&self, name: &str) -> Result<i64>;
    async fn insert(&self, payload: &ProductPayload) -> Result<Product>;
    async fn update(&self, id: i64, payload: &ProductPayload) -> Result<Product>;
    /// Raw delete. A foreign-key violation (product referenced by order
    /// items) propagates as a `Database` error for the service to reclassify.
    async fn delete_by_id(&self, id: i64) -> Result<()>;
}

/// Flat catalog row; category links are loaded separately.
#[derive(Debug, FromRow)]
struct ProductRow {
    id: i64,
    name: String,
    description: String,
    price: rust_decimal::Decimal,
    img_url: String,
}

pub struct ProductRepositoryImpl {
    pool: MySqlPool,
}

impl ProductRepositoryImpl {
    pub fn new(pool: MySqlPool) -> Self {
        Self { pool }
    }

    async fn categories_of(&self, product_id: i64) -> Result<Vec<Category>> {
        let categories = sqlx::query_as::<_, Category>(
            r#"
            SELECT c.id, c.name
            FROM categories c
            JOIN product_categories pc ON pc.category_id = c.id
            WHERE pc.product_id = ?
            ORDER BY c.id
            "#,
        )
        .bind(product_id)
        .fetch_all(&self.pool)
        .await?;

        Ok(categories)
    }
}

fn like_pattern(name: &str) -> String {
    format!("%{}%", name)
}

#[async_trait]
impl ProductRepository for ProductRepositoryImpl {
    async fn find_by_id(&self, id: i64) -> Result<Option<Product>> {
        let row = sqlx::query_as::<_, ProductRow>(
            r#"
            SELECT id, name, description, price, img_url
            FROM products
            WHERE id = ?
            "#,
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        let Some(row) = row else {
            return Ok(None);
        };

        let categories = self.categories_of(row.id).await?;

        Ok(Some(Product {
            id: row.id,
            name: row.name,
            description: row.description,
            price: row.price,
            img_url: row.img_url,
            categories,
        }))
    }

    async fn exists_by_id(&self, id: i64) -> Result<bool> {
        let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM products WHERE id = ?")
            .bind(id)
            .fetch_one(&self.pool)
            .await?;

        Ok(count > 0)
    }

    async fn search_by_name(
        &self,
        name: &str,
        offset: i64,
        limit: i64,
    ) -> Result<Vec<ProductSummary>> {
        let products = sqlx::query_as::<_, ProductSummary>(
            r#"
            SELECT id, name, price, img_url
            FROM products
            WHERE LOWER(name) LIKE LOWER(?)
            ORDER BY id
            LIMIT ? OFFSET ?
            "#,
        )
        .bind(like_pattern(name))
        .bind(limit)
        .bind(offset)
        .fetch_all(&self.pool)
        .await?;

        Ok(products)
    }

    async fn count_by_name(&self, name: &str) -> Result<i64> {
        let count: i64 =
            sqlx::query_scalar("SELECT COUNT(*) FROM products WHERE LOWER(name) LIKE LOWER(?)")
                .bind(like_pattern(name))
                .fetch_one(&self.pool)
                .await?;

        Ok(count)
    }

    async fn insert(&self, payload: &ProductPayload) -> Result<Product> {
        let mut tx = self.pool.begin().await?;

        let result = sqlx::query(
            r#"
            INSERT INTO products (name, description, price, img_url)
            VALUES (?, ?, ?, ?)
            "#,
        )
        .bind(&payload.name)
        .bind(&payload.description)
        .bind(payload.price)
        .bind(&payload.img_url)
        .execute(&mut *tx)
        .await?;

        let id = result.last_insert_id() as i64;

        for category in &payload.categories {
            sqlx::query("INSERT INTO product_categories (product_id, category_id) VALUES (?, ?)")
                .bind(id)
                .bind(category.id)
                .execute(&mut *tx)
                .await?;
        }

        tx.commit().await?;

        self.find_by_id(id)
            .await?
            .ok_or_else(|| AppError::Internal(anyhow::anyhow!("Failed to reload created product")))
    }

    async fn update(&self, id: i64, payload: &ProductPayload) -> Result<Product> {
        let mut tx = self.pool.begin().await?;

        sqlx::query(
            r#"
            UPDATE products
            SET name = ?, description = ?, price = ?, img_url = ?
            WHERE id = ?
            "#,
        )
        .bind(&payload.name)
        .bind(&payload.description)
        .bind(payload.price)
        .bind(&payload.img_url)
        .bind(id)
        .execute(&mut *tx)
        .await?;

        sqlx::query("DELETE FROM product_categories WHERE product_id = ?")
            .bind(id)
            .execute(&mut *tx)
            .await?;

        for category in &payload.categories {
            sqlx::query("INSERT INTO product_categories (product_id, category_id) VALUES (?, ?)")
                .bind(id)
                .bind(category.id)
                .execute(&mut *tx)
                .await?;
        }

        tx.commit().await?;

        self.find_by_id(id)
            .await?
            .ok_or_else(|| AppError::Internal(anyhow::anyhow!("Failed to reload updated product")))
    }

    async fn delete_by_id(&self, id: i64) -> Result<()> {
        sqlx::query("DELETE FROM products WHERE id = ?")
            .bind(id)
            .execute(&self.pool)
            .await?;

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_like_pattern() {
        assert_eq!(like_pattern("Macbook"), "%Macbook%");
        assert_eq!(like_pattern(""), "%%");
    }
}
