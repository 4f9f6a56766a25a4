//! User API handlers

use crate::domain::UserDto;
use crate::error::Result;
use crate::middleware::auth::AuthUser;
use crate::server::AppState;
use axum::{extract::State, response::IntoResponse, Json};

/// Profile of the authenticated user
#[utoipa::path(
    get,
    path = "/users/me",
    tag = "Users",
    security(("bearer_jwt" = [])),
    responses(
        (status = 200, description = "Authenticated user profile", body = UserDto),
        (status = 401, description = "Missing or invalid token")
    )
)]
pub async fn me(auth: AuthUser, State(state): State<AppState>) -> Result<impl IntoResponse> {
    let user = state.user_service.get_me(&auth).await?;
    Ok(Json(user))
}
