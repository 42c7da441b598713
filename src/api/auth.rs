//! Login, signup and logout

use axum::{
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Redirect, Response},
    Form,
};
use axum_extra::extract::cookie::{Cookie, CookieJar, SameSite};

use crate::{
    error::AppResult,
    models::user::{LoginForm, SignupForm},
    views, AppState,
};

use super::ActiveSession;

/// `/`: landing page of the signed-in user, or the login form
pub async fn root(session: ActiveSession) -> Redirect {
    match &session.user {
        Some(user) => Redirect::to(user.role.landing_page()),
        None => Redirect::to("/login"),
    }
}

pub async fn login_form(session: ActiveSession) -> Response {
    match &session.user {
        Some(user) => Redirect::to(user.role.landing_page()).into_response(),
        None => views::auth::login_page(None, "").into_response(),
    }
}

/// Authenticate, bind the user to a new session and send them to their dashboard
pub async fn login(
    State(state): State<AppState>,
    jar: CookieJar,
    Form(form): Form<LoginForm>,
) -> AppResult<Response> {
    let user = match state.services.auth.login(&form).await {
        Ok(user) => user,
        Err(e) if e.is_recoverable() => {
            let page = views::auth::login_page(Some(&e.public_message()), &form.email);
            return Ok((e.status_code(), page).into_response());
        }
        Err(e) => return Err(e),
    };

    let sessions = &state.services.sessions;

    // A later login replaces whatever identity the browser carried
    if let Some(previous) = jar.get(sessions.cookie_name()) {
        if let Err(e) = sessions.close(previous.value()).await {
            tracing::warn!("Failed to destroy previous session on login: {}", e);
        }
    }

    let (session_id, _) = sessions.open(&user).await?;

    let cookie = Cookie::build((sessions.cookie_name().to_string(), session_id))
        .path("/")
        .http_only(true)
        .same_site(SameSite::Lax)
        .secure(sessions.secure_cookie());

    Ok((jar.add(cookie), Redirect::to(user.role.landing_page())).into_response())
}

pub async fn signup_form() -> Response {
    views::auth::signup_page(None, "", "").into_response()
}

pub async fn signup(State(state): State<AppState>, Form(form): Form<SignupForm>) -> AppResult<Response> {
    match state.services.auth.signup(&form).await {
        Ok(_) => Ok(Redirect::to("/login").into_response()),
        Err(e) if e.is_recoverable() => {
            let page = views::auth::signup_page(Some(&e.public_message()), &form.name, &form.email);
            Ok((e.status_code(), page).into_response())
        }
        Err(e) => {
            e.report();
            let page = views::auth::signup_page(Some(&e.public_message()), &form.name, &form.email);
            Ok((StatusCode::INTERNAL_SERVER_ERROR, page).into_response())
        }
    }
}

/// Destroy the session whatever its state and go back to the login form
pub async fn logout(State(state): State<AppState>, jar: CookieJar) -> Response {
    let sessions = &state.services.sessions;

    if let Some(cookie) = jar.get(sessions.cookie_name()) {
        if let Err(e) = sessions.close(cookie.value()).await {
            tracing::warn!("Failed to destroy session on logout: {}", e);
        }
    }

    let removal = Cookie::build((sessions.cookie_name().to_string(), "")).path("/");
    (jar.remove(removal), Redirect::to("/login")).into_response()
}
