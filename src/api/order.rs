//! Order API handlers

use crate::domain::{OrderDto, OrderPayload};
use crate::error::Result;
use crate::middleware::auth::AuthUser;
use crate::server::AppState;
use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::IntoResponse,
    Json,
};

/// Get order by id (owner or admin)
#[utoipa::path(
    get,
    path = "/orders/{id}",
    tag = "Orders",
    params(("id" = i64, Path, description = "Order id")),
    security(("bearer_jwt" = [])),
    responses(
        (status = 200, description = "Order found", body = OrderDto),
        (status = 401, description = "Missing or invalid token"),
        (status = 403, description = "Order belongs to another client"),
        (status = 404, description = "Order does not exist")
    )
)]
pub async fn get(
    auth: AuthUser,
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> Result<impl IntoResponse> {
    let order = state.order_service.find_by_id(id, &auth).await?;
    Ok(Json(order))
}

/// Create an order for the authenticated client
#[utoipa::path(
    post,
    path = "/orders",
    tag = "Orders",
    request_body = OrderPayload,
    security(("bearer_jwt" = [])),
    responses(
        (status = 201, description = "Order created", body = OrderDto),
        (status = 401, description = "Missing or invalid token"),
        (status = 404, description = "A referenced product does not exist"),
        (status = 422, description = "Field validation failed")
    )
)]
pub async fn create(
    auth: AuthUser,
    State(state): State<AppState>,
    Json(payload): Json<OrderPayload>,
) -> Result<impl IntoResponse> {
    let order = state.order_service.insert(payload, &auth).await?;
    Ok((StatusCode::CREATED, Json(order)))
}
