//! Single-copy stock adjustments (JSON)

use axum::{extract::State, Json};

use crate::{
    error::AppResult,
    models::{book::IsbnRequest, AdjustDirection, AdjustResult},
    AppState,
};

use super::AdminSession;

/// Add one copy of a book
#[utoipa::path(
    post,
    path = "/api/inventory/add-one",
    tag = "inventory",
    request_body = IsbnRequest,
    responses(
        (status = 200, description = "Copy added", body = AdjustResult),
        (status = 403, description = "Admin session required")
    )
)]
pub async fn add_one(
    State(state): State<AppState>,
    _admin: AdminSession,
    Json(request): Json<IsbnRequest>,
) -> AppResult<Json<AdjustResult>> {
    let result = state
        .services
        .inventory
        .adjust_by_one(&request.isbn, AdjustDirection::Increment)
        .await?;
    Ok(Json(result))
}

/// Remove one available copy of a book
#[utoipa::path(
    post,
    path = "/api/inventory/remove-one",
    tag = "inventory",
    request_body = IsbnRequest,
    responses(
        (status = 200, description = "Copy removed, or `success = false` when none is available", body = AdjustResult),
        (status = 403, description = "Admin session required")
    )
)]
pub async fn remove_one(
    State(state): State<AppState>,
    _admin: AdminSession,
    Json(request): Json<IsbnRequest>,
) -> AppResult<Json<AdjustResult>> {
    let result = state
        .services
        .inventory
        .adjust_by_one(&request.isbn, AdjustDirection::Decrement)
        .await?;
    Ok(Json(result))
}
