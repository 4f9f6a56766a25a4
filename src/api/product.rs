//! Product API handlers

use crate::api::{default_page, default_size, deserialize_page, deserialize_size, PageResponse};
use crate::domain::{ProductDto, ProductPayload};
use crate::error::Result;
use crate::middleware::auth::AuthUser;
use crate::policy;
use crate::server::AppState;
use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    response::IntoResponse,
    Json,
};
use serde::Deserialize;
use utoipa::IntoParams;

/// Query parameters for the catalog listing
#[derive(Debug, Deserialize, IntoParams)]
pub struct ProductFilter {
    /// Case-insensitive substring match on the product name; empty matches all
    #[serde(default)]
    pub name: String,
    #[serde(default = "default_page", deserialize_with = "deserialize_page")]
    #[param(minimum = 1)]
    pub page: i64,
    #[serde(
        default = "default_size",
        deserialize_with = "deserialize_size",
        alias = "per_page"
    )]
    #[param(minimum = 1, maximum = 100)]
    pub size: i64,
}

/// List products (public)
#[utoipa::path(
    get,
    path = "/products",
    tag = "Catalog",
    params(ProductFilter),
    responses((status = 200, description = "Paginated product listing"))
)]
pub async fn list(
    State(state): State<AppState>,
    Query(filter): Query<ProductFilter>,
) -> Result<impl IntoResponse> {
    let (products, total) = state
        .product_service
        .list(&filter.name, filter.page, filter.size)
        .await?;

    Ok(Json(PageResponse::new(
        products,
        filter.page,
        filter.size,
        total,
    )))
}

/// Get product by id (public)
#[utoipa::path(
    get,
    path = "/products/{id}",
    tag = "Catalog",
    params(("id" = i64, Path, description = "Product id")),
    responses(
        (status = 200, description = "Product found", body = ProductDto),
        (status = 404, description = "Product does not exist")
    )
)]
pub async fn get(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> Result<impl IntoResponse> {
    let product = state.product_service.find_by_id(id).await?;
    Ok(Json(product))
}

/// Create product (admin only)
#[utoipa::path(
    post,
    path = "/products",
    tag = "Catalog",
    request_body = ProductPayload,
    security(("bearer_jwt" = [])),
    responses(
        (status = 201, description = "Product created", body = ProductDto),
        (status = 401, description = "Missing or invalid token"),
        (status = 403, description = "Caller is not an admin"),
        (status = 422, description = "Field validation failed")
    )
)]
pub async fn create(
    auth: AuthUser,
    State(state): State<AppState>,
    Json(payload): Json<ProductPayload>,
) -> Result<impl IntoResponse> {
    policy::require_admin(&auth)?;

    let product = state.product_service.insert(payload).await?;
    Ok((StatusCode::CREATED, Json(product)))
}

/// Update product (admin only)
#[utoipa::path(
    put,
    path = "/products/{id}",
    tag = "Catalog",
    params(("id" = i64, Path, description = "Product id")),
    request_body = ProductPayload,
    security(("bearer_jwt" = [])),
    responses(
        (status = 200, description = "Product updated", body = ProductDto),
        (status = 401, description = "Missing or invalid token"),
        (status = 403, description = "Caller is not an admin"),
        (status = 404, description = "Product does not exist"),
        (status = 422, description = "Field validation failed")
    )
)]
pub async fn update(
    auth: AuthUser,
    State(state): State<AppState>,
    Path(id): Path<i64>,
    Json(payload): Json<ProductPayload>,
) -> Result<impl IntoResponse> {
    policy::require_admin(&auth)?;

    let product = state.product_service.update(id, payload).await?;
    Ok(Json(product))
}

/// Delete product (admin only)
#[utoipa::path(
    delete,
    path = "/products/{id}",
    tag = "Catalog",
    params(("id" = i64, Path, description = "Product id")),
    security(("bearer_jwt" = [])),
    responses(
        (status = 204, description = "Product deleted"),
        (status = 400, description = "Product is referenced by order items"),
        (status = 401, description = "Missing or invalid token"),
        (status = 403, description = "Caller is not an admin"),
        (status = 404, description = "Product does not exist")
    )
)]
pub async fn delete(
    auth: AuthUser,
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> Result<impl IntoResponse> {
    policy::require_admin(&auth)?;

    state.product_service.delete(id).await?;
    Ok(StatusCode::NO_CONTENT)
}
