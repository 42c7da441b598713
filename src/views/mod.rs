//! Server-rendered HTML pages

pub mod admin;
pub mod auth;
pub mod dashboards;

use maud::{html, Markup, DOCTYPE};

use crate::models::{OutcomeStatus, SessionUser, WorkflowResult};

/// Seconds before a success page moves on by itself
const CONTINUE_AFTER_SECONDS: u32 = 2;

/// Common page shell
pub fn layout(title: &str, body: Markup) -> Markup {
    layout_with_head(title, None, body)
}

/// Page shell with extra elements appended to `<head>`
pub fn layout_with_head(title: &str, extra_head: Option<Markup>, body: Markup) -> Markup {
    html! {
        (DOCTYPE)
        html lang="en" {
            head {
                meta charset="utf-8";
                meta name="viewport" content="width=device-width, initial-scale=1";
                title { (title) " | Library" }
                link rel="icon" href="/open-book.png";
                link rel="stylesheet" href="/assets/css/style.css";
                @if let Some(extra) = extra_head {
                    (extra)
                }
            }
            body {
                (body)
            }
        }
    }
}

/// Header shown on every page of a signed-in user
pub fn user_header(user: &SessionUser) -> Markup {
    html! {
        header.topbar {
            span.brand { "Library" }
            span.who { (user.name) " (" (user.role.as_str()) ")" }
            a href="/logout" { "Logout" }
        }
    }
}

/// Static page returned with 403 to anyone failing the admin check
pub fn forbidden_page() -> Markup {
    html! {
        (DOCTYPE)
        html lang="en" {
            head {
                meta charset="utf-8";
                title { "403 Forbidden" }
                style {
                    "html, body { margin: 0; padding: 0; height: 100%; width: 100%; "
                    "background: url('/assets/images/http403.jpg') no-repeat center center; "
                    "background-size: contain; background-color: black; }"
                }
            }
            body {}
        }
    }
}

/// Present a workflow result: a notice that moves on, or a yes/no question
pub fn outcome_page(result: &WorkflowResult) -> Markup {
    let refresh = match result.status {
        OutcomeStatus::Success => Some(html! {
            meta http-equiv="refresh" content=(format!("{};url={}", CONTINUE_AFTER_SECONDS, result.redirect));
        }),
        OutcomeStatus::Confirm => None,
    };

    let body = match result.status {
        OutcomeStatus::Success => html! {
            main.notice {
                p.message { (result.message) }
                a.button href=(result.redirect) { "Continue" }
            }
        },
        OutcomeStatus::Confirm => html! {
            main.confirm {
                p.message { (result.message) }
                a.button href=(result.redirect) { "Yes" }
                @if let Some(cancel) = &result.cancel {
                    a.button.secondary href=(cancel) { "No" }
                }
            }
        },
    };

    layout_with_head("Notice", refresh, body)
}
