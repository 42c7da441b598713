//! HTTP handlers and routing

pub mod admin;
pub mod auth;
pub mod books;
pub mod dashboards;
pub mod health;
pub mod inventory;
pub mod openapi;

use axum::{
    async_trait,
    extract::FromRequestParts,
    http::request::Parts,
    routing::{get, post},
    Router,
};
use axum_extra::extract::cookie::CookieJar;
use tower_http::{compression::CompressionLayer, trace::TraceLayer};

use crate::{
    error::AppError,
    models::{Role, SessionUser},
    AppState,
};

/// Session attached to the request, if any. Unknown or expired session ids
/// resolve to an anonymous session.
#[derive(Debug, Clone, Default)]
pub struct ActiveSession {
    pub id: Option<String>,
    pub user: Option<SessionUser>,
}

impl ActiveSession {
    pub fn has_role(&self, role: Role) -> bool {
        self.user.as_ref().is_some_and(|user| user.role == role)
    }

    pub fn is_admin(&self) -> bool {
        self.has_role(Role::Admin)
    }

    /// Access guard shared by every protected route
    pub fn require_role(&self, role: Role) -> Result<&SessionUser, AppError> {
        match &self.user {
            Some(user) if user.role == role => Ok(user),
            Some(user) => Err(AppError::Forbidden(format!(
                "user {} has role {}, {} required",
                user.id, user.role, role
            ))),
            None => Err(AppError::Forbidden(format!("no session, {} required", role))),
        }
    }
}

#[async_trait]
impl FromRequestParts<AppState> for ActiveSession {
    type Rejection = AppError;

    async fn from_request_parts(parts: &mut Parts, state: &AppState) -> Result<Self, Self::Rejection> {
        let sessions = &state.services.sessions;
        let jar = CookieJar::from_headers(&parts.headers);

        let Some(id) = jar.get(sessions.cookie_name()).map(|c| c.value().to_string()) else {
            return Ok(ActiveSession::default());
        };

        let user = sessions.resolve(&id).await?;
        Ok(ActiveSession { id: Some(id), user })
    }
}

/// Extractor for admin-only routes; anyone else gets the 403 page
pub struct AdminSession(pub SessionUser);

#[async_trait]
impl FromRequestParts<AppState> for AdminSession {
    type Rejection = AppError;

    async fn from_request_parts(parts: &mut Parts, state: &AppState) -> Result<Self, Self::Rejection> {
        let session = ActiveSession::from_request_parts(parts, state).await?;
        let user = session.require_role(Role::Admin)?.clone();
        Ok(AdminSession(user))
    }
}

/// Create the application router with all routes
pub fn create_router(state: AppState) -> Router {
    let app = Router::new()
        .route("/", get(auth::root))
        // Authentication
        .route("/login", get(auth::login_form).post(auth::login))
        .route("/signup", get(auth::signup_form).post(auth::signup))
        .route("/logout", get(auth::logout))
        // Dashboards
        .route("/student/dashboard", get(dashboards::student))
        .route("/faculty/dashboard", get(dashboards::faculty))
        .route("/admin/dashboard", get(dashboards::admin))
        // Inventory administration
        .route("/admin/add-books", get(admin::add_books_form).post(admin::add_books))
        .route("/admin/update-quantity", get(admin::update_quantity))
        .route("/admin/remove-books", get(admin::remove_books_form).post(admin::remove_books))
        .route("/admin/manage-inventory", get(admin::manage_inventory))
        // Members
        .route("/admin/view-members", get(admin::view_members))
        .route("/api/admin/search-members", get(admin::search_members))
        // JSON endpoints
        .route("/api/inventory/add-one", post(inventory::add_one))
        .route("/api/inventory/remove-one", post(inventory::remove_one))
        .route("/books/getBookDetailsByISBN", post(books::get_book_details_by_isbn))
        .route("/health", get(health::health_check))
        .with_state(state);

    app.merge(openapi::create_openapi_router())
        .layer(CompressionLayer::new())
        .layer(TraceLayer::new_for_http())
}
