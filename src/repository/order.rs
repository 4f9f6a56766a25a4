//! Order repository

use crate::domain::{Order, OrderClient, OrderItem, OrderStatus, Payment};
use crate::error::{AppError, Result};
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use sqlx::{FromRow, MySqlPool};

/// One order line ready for persistence, unit price already snapshotted.
#[derive(Debug, Clone, PartialEq)]
pub struct NewOrderItem {
    pub product_id: i64,
    pub quantity: i32,
    pub price: Decimal,
}

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait OrderRepository: Send + Sync {
    async fn find_by_id(&self, id: i64) -> Result<Option<Order>>;
    async fn insert(
        &self,
        client_id: i64,
        moment: DateTime<Utc>,
        status: OrderStatus,
        items: &[NewOrderItem],
    ) -> Result<Order>;
}

#[derive(Debug, FromRow)]
struct OrderRow {
    id: i64,
    moment: DateTime<Utc>,
    status: OrderStatus,
    client_id: i64,
}

pub struct OrderRepositoryImpl {
    pool: MySqlPool,
}

impl OrderRepositoryImpl {
    pub fn new(pool: MySqlPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl OrderRepository for OrderRepositoryImpl {
    async fn find_by_id(&self, id: i64) -> Result<Option<Order>> {
        let row = sqlx::query_as::<_, OrderRow>(
            r#"
            SELECT id, moment, status, client_id
            FROM orders
            WHERE id = ?
            "#,
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        let Some(row) = row else {
            return Ok(None);
        };

        let client = sqlx::query_as::<_, OrderClient>(
            r#"
            SELECT id, name, email
            FROM users
            WHERE id = ?
            "#,
        )
        .bind(row.client_id)
        .fetch_one(&self.pool)
        .await?;

        let payment = sqlx::query_as::<_, Payment>(
            r#"
            SELECT id, moment
            FROM payments
            WHERE order_id = ?
            "#,
        )
        .bind(row.id)
        .fetch_optional(&self.pool)
        .await?;

        let items = sqlx::query_as::<_, OrderItem>(
            r#"
            SELECT oi.product_id, p.name, oi.price, oi.quantity, p.img_url
            FROM order_items oi
            JOIN products p ON p.id = oi.product_id
            WHERE oi.order_id = ?
            ORDER BY oi.product_id
            "#,
        )
        .bind(row.id)
        .fetch_all(&self.pool)
        .await?;

        Ok(Some(Order {
            id: row.id,
            moment: row.moment,
            status: row.status,
            client,
            payment,
            items,
        }))
    }

    async fn insert(
        &self,
        client_id: i64,
        moment: DateTime<Utc>,
        status: OrderStatus,
        items: &[NewOrderItem],
    ) -> Result<Order> {
        let mut tx = self.pool.begin().await?;

        let result = sqlx::query(
            r#"
            INSERT INTO orders (moment, status, client_id)
            VALUES (?, ?, ?)
            "#,
        )
        .bind(moment)
        .bind(status)
        .bind(client_id)
        .execute(&mut *tx)
        .await?;

        let id = result.last_insert_id() as i64;

        for item in items {
            sqlx::query(
                r#"
                INSERT INTO order_items (order_id, product_id, quantity, price)
                VALUES (?, ?, ?, ?)
                "#,
            )
            .bind(id)
            .bind(item.product_id)
            .bind(item.quantity)
            .bind(item.price)
            .execute(&mut *tx)
            .await?;
        }

        tx.commit().await?;

        self.find_by_id(id)
            .await?
            .ok_or_else(|| AppError::Internal(anyhow::anyhow!("Failed to reload created order")))
    }
}
