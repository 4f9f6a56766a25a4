//! Order domain model: aggregate, status lifecycle and wire projections

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use validator::Validate;

/// Order status lifecycle. Transitions are driven by the payment workflow,
/// which lives outside this service; this core only reads the value.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, sqlx::Type, ToSchema,
)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
#[sqlx(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum OrderStatus {
    WaitingPayment,
    Paid,
    Shipped,
    Delivered,
    Canceled,
}

/// The order's owning client, as embedded in the order aggregate
#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow, ToSchema)]
pub struct OrderClient {
    pub id: i64,
    pub name: String,
    pub email: String,
}

/// Payment record, optional 1:1 with an order
#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow, ToSchema)]
pub struct Payment {
    pub id: i64,
    pub moment: DateTime<Utc>,
}

/// One line of an order. `price` is the unit price snapshotted at purchase
/// time, so later catalog price changes never alter historical order value.
#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow)]
pub struct OrderItem {
    pub product_id: i64,
    pub name: String,
    pub price: Decimal,
    pub quantity: i32,
    pub img_url: String,
}

/// Order aggregate as loaded from the store
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Order {
    pub id: i64,
    pub moment: DateTime<Utc>,
    pub status: OrderStatus,
    pub client: OrderClient,
    pub payment: Option<Payment>,
    pub items: Vec<OrderItem>,
}

/// One requested line in an order creation payload
#[derive(Debug, Clone, Serialize, Deserialize, Validate, ToSchema)]
pub struct OrderItemPayload {
    pub product_id: i64,
    #[validate(range(min = 1, message = "quantity must be at least 1"))]
    pub quantity: i32,
}

/// Order creation request body
#[derive(Debug, Clone, Serialize, Deserialize, Validate, ToSchema)]
pub struct OrderPayload {
    #[validate(length(min = 1, message = "order must have at least one item"), nested)]
    pub items: Vec<OrderItemPayload>,
}

/// Wire-format projection of an order line, with its extended amount
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct OrderItemDto {
    pub product_id: i64,
    pub name: String,
    pub price: Decimal,
    pub quantity: i32,
    pub img_url: String,
    pub sub_total: Decimal,
}

impl From<OrderItem> for OrderItemDto {
    fn from(item: OrderItem) -> Self {
        let sub_total = item.price * Decimal::from(item.quantity);
        Self {
            product_id: item.product_id,
            name: item.name,
            price: item.price,
            quantity: item.quantity,
            img_url: item.img_url,
            sub_total,
        }
    }
}

/// Wire-format projection of an order. `total` is computed from the items,
/// never stored: it always equals the sum of price x quantity.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct OrderDto {
    pub id: i64,
    pub moment: DateTime<Utc>,
    pub status: OrderStatus,
    pub client: OrderClient,
    pub payment: Option<Payment>,
    pub items: Vec<OrderItemDto>,
    pub total: Decimal,
}

impl From<Order> for OrderDto {
    fn from(order: Order) -> Self {
        let items: Vec<OrderItemDto> = order.items.into_iter().map(OrderItemDto::from).collect();
        let total = items.iter().map(|i| i.sub_total).sum();
        Self {
            id: order.id,
            moment: order.moment,
            status: order.status,
            client: order.client,
            payment: order.payment,
            items,
            total,
        }
    }
}
