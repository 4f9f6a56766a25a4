//! Order business logic

use crate::domain::{OrderDto, OrderPayload, OrderStatus};
use crate::error::{AppError, Result};
use crate::middleware::auth::AuthUser;
use crate::policy;
use crate::repository::{NewOrderItem, OrderRepository, ProductRepository};
use chrono::Utc;
use std::sync::Arc;
use validator::Validate;

pub struct OrderService<O: OrderRepository, P: ProductRepository> {
    order_repo: Arc<O>,
    product_repo: Arc<P>,
}

impl<O: OrderRepository, P: ProductRepository> OrderService<O, P> {
    pub fn new(order_repo: Arc<O>, product_repo: Arc<P>) -> Self {
        Self {
            order_repo,
            product_repo,
        }
    }

    /// Look the order up, then let the policy decide whether this principal
    /// may see it. Absent orders are 404 for everyone, owners and strangers
    /// alike.
    pub async fn find_by_id(&self, id: i64, principal: &AuthUser) -> Result<OrderDto> {
        let order = self
            .order_repo
            .find_by_id(id)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("Order {} not found", id)))?;

        policy::validate_order_access(principal, &order)?;

        Ok(OrderDto::from(order))
    }

    /// Create an order for the authenticated client. Each line resolves its
    /// product through the gateway and snapshots the current unit price, so
    /// later catalog changes never touch the order's value.
    pub async fn insert(&self, payload: OrderPayload, principal: &AuthUser) -> Result<OrderDto> {
        payload.validate()?;

        // Repeated product ids collapse into one line with the summed quantity.
        let mut lines: Vec<(i64, i32)> = Vec::new();
        for item in &payload.items {
            match lines.iter_mut().find(|(id, _)| *id == item.product_id) {
                Some((_, quantity)) => *quantity += item.quantity,
                None => lines.push((item.product_id, item.quantity)),
            }
        }

        let mut items = Vec::with_capacity(lines.len());
        for (product_id, quantity) in lines {
            let product = self
                .product_repo
                .find_by_id(product_id)
                .await?
                .ok_or_else(|| AppError::NotFound(format!("Product {} not found", product_id)))?;

            items.push(NewOrderItem {
                product_id,
                quantity,
                price: product.price,
            });
        }

        let order = self
            .order_repo
            .insert(principal.id, Utc::now(), OrderStatus::WaitingPayment, &items)
            .await?;

        Ok(OrderDto::from(order))
    }
}
