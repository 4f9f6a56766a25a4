//! Category API handlers

use crate::domain::CategoryDto;
use crate::error::Result;
use crate::server::AppState;
use axum::{extract::State, response::IntoResponse, Json};

/// List all categories (public, unpaginated reference data)
#[utoipa::path(
    get,
    path = "/categories",
    tag = "Catalog",
    responses((status = 200, description = "All categories in id order", body = [CategoryDto]))
)]
pub async fn list(State(state): State<AppState>) -> Result<impl IntoResponse> {
    let categories = state.category_service.find_all().await?;
    Ok(Json(categories))
}
