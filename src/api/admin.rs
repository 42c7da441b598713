//! Admin pages: add/remove books, top-up, inventory and member listings

use axum::{
    extract::{Query, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    Form,
};
use serde::Deserialize;

use crate::{
    error::{AppError, AppResult},
    models::{book::TopUpQuery, BookForm},
    views, AppState,
};

use super::AdminSession;

/// Message and status for a failed form submission; infrastructure
/// failures keep their 5xx status behind a generic message.
fn form_failure(error: &AppError) -> (StatusCode, String) {
    if error.is_recoverable() {
        (error.status_code(), error.public_message())
    } else {
        error.report();
        (
            error.status_code(),
            "An unexpected error occurred while processing your request. Please check server logs for details."
                .to_string(),
        )
    }
}

pub async fn add_books_form(AdminSession(user): AdminSession) -> Response {
    views::admin::add_books_page(&user, &BookForm::default(), None).into_response()
}

pub async fn add_books(
    State(state): State<AppState>,
    AdminSession(user): AdminSession,
    Form(form): Form<BookForm>,
) -> Response {
    match state.services.inventory.add_book(&form).await {
        Ok(result) => views::outcome_page(&result).into_response(),
        Err(e) => {
            let (status, message) = form_failure(&e);
            (status, views::admin::add_books_page(&user, &form, Some(&message))).into_response()
        }
    }
}

/// Top-up reached from the confirmation offered by add-books
pub async fn update_quantity(
    State(state): State<AppState>,
    AdminSession(_): AdminSession,
    Query(query): Query<TopUpQuery>,
) -> AppResult<Response> {
    let result = state
        .services
        .inventory
        .update_quantity(&query.isbn, query.quantity.as_deref())
        .await?;
    Ok(views::outcome_page(&result).into_response())
}

/// Remove form, pre-filled from the query string
pub async fn remove_books_form(AdminSession(user): AdminSession, Query(form): Query<BookForm>) -> Response {
    views::admin::remove_books_page(&user, &form, None, None).into_response()
}

pub async fn remove_books(
    State(state): State<AppState>,
    AdminSession(user): AdminSession,
    Form(form): Form<BookForm>,
) -> Response {
    match state.services.inventory.remove_book(&form).await {
        Ok(result) => views::outcome_page(&result).into_response(),
        Err(e) => {
            let (status, message) = form_failure(&e);
            let page = match e {
                AppError::InvalidQuantity(_) => views::admin::remove_books_page(&user, &form, None, Some(&message)),
                _ => views::admin::remove_books_page(&user, &form, Some(&message), None),
            };
            (status, page).into_response()
        }
    }
}

pub async fn manage_inventory(
    State(state): State<AppState>,
    AdminSession(user): AdminSession,
) -> AppResult<Response> {
    let books = state.services.inventory.list_books().await?;
    Ok(views::admin::manage_inventory_page(&user, &books).into_response())
}

pub async fn view_members(State(state): State<AppState>, AdminSession(user): AdminSession) -> AppResult<Response> {
    let members = state.services.members.list_all().await?;
    Ok(views::admin::view_members_page(&user, &members).into_response())
}

#[derive(Debug, Default, Deserialize)]
pub struct MemberSearchParams {
    pub query: Option<String>,
}

/// Table rows matching the live search box
pub async fn search_members(
    State(state): State<AppState>,
    AdminSession(_): AdminSession,
    Query(params): Query<MemberSearchParams>,
) -> Response {
    let query = params.query.unwrap_or_default();

    match state.services.members.search(&query).await {
        Ok(members) => views::admin::member_rows(&members).into_response(),
        Err(e) => {
            e.report();
            (StatusCode::INTERNAL_SERVER_ERROR, views::admin::member_search_failed_row()).into_response()
        }
    }
}
