//! Role dashboards. A session of another role is sent back to the login form.

use axum::response::{IntoResponse, Redirect, Response};
use maud::Markup;

use crate::{
    models::{Role, SessionUser},
    views,
};

use super::ActiveSession;

fn render_for(session: &ActiveSession, role: Role, page: fn(&SessionUser) -> Markup) -> Response {
    match session.require_role(role) {
        Ok(user) => page(user).into_response(),
        Err(_) => Redirect::to("/login").into_response(),
    }
}

pub async fn student(session: ActiveSession) -> Response {
    render_for(&session, Role::Student, views::dashboards::student_dashboard)
}

pub async fn faculty(session: ActiveSession) -> Response {
    render_for(&session, Role::Faculty, views::dashboards::faculty_dashboard)
}

pub async fn admin(session: ActiveSession) -> Response {
    render_for(&session, Role::Admin, views::dashboards::admin_dashboard)
}
