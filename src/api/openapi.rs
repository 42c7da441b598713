//! OpenAPI documentation for the JSON endpoints

use axum::Router;
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

use crate::api::{books, health, inventory};

#[derive(OpenApi)]
#[openapi(
    info(
        title = "Library Portal API",
        version = "0.1.0",
        description = "JSON endpoints of the library portal",
        license(name = "AGPL-3.0", url = "https://www.gnu.org/licenses/agpl-3.0.html")
    ),
    paths(
        health::health_check,
        inventory::add_one,
        inventory::remove_one,
        books::get_book_details_by_isbn,
    ),
    components(
        schemas(
            crate::models::book::Book,
            crate::models::book::IsbnRequest,
            crate::models::book::BookLookupResponse,
            crate::models::book::AdjustResult,
            health::HealthResponse,
            crate::error::ErrorResponse,
        )
    ),
    tags(
        (name = "health", description = "Health check endpoints"),
        (name = "inventory", description = "Single-copy stock adjustments (admin)"),
        (name = "books", description = "Book lookup")
    )
)]
pub struct ApiDoc;

/// Create the OpenAPI documentation router
pub fn create_openapi_router() -> Router {
    Router::new().merge(SwaggerUi::new("/swagger-ui").url("/api-docs/openapi.json", ApiDoc::openapi()))
}
