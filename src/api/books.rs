//! Public book lookup

use axum::{extract::State, Json};

use crate::{
    error::AppResult,
    models::book::{BookLookupResponse, IsbnRequest},
    AppState,
};

/// Get book details by ISBN-13
#[utoipa::path(
    post,
    path = "/books/getBookDetailsByISBN",
    tag = "books",
    request_body = IsbnRequest,
    responses(
        (status = 200, description = "Lookup result; `success = false` for a malformed or unknown ISBN", body = BookLookupResponse)
    )
)]
pub async fn get_book_details_by_isbn(
    State(state): State<AppState>,
    Json(request): Json<IsbnRequest>,
) -> AppResult<Json<BookLookupResponse>> {
    let response = state.services.inventory.lookup(&request.isbn).await?;
    Ok(Json(response))
}
