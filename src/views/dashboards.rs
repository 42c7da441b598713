//! Role landing pages

use maud::{html, Markup};

use super::{layout, user_header};
use crate::models::SessionUser;

fn greeting(user: &SessionUser) -> Markup {
    html! {
        h1 { "Welcome, " (user.name) }
        p.muted { "Signed in since " (user.authenticated_at.format("%Y-%m-%d %H:%M UTC").to_string()) }
    }
}

pub fn student_dashboard(user: &SessionUser) -> Markup {
    layout(
        "Student dashboard",
        html! {
            (user_header(user))
            main.dashboard {
                (greeting(user))
                p { "Browse the catalogue at the front desk or ask a librarian for help." }
            }
        },
    )
}

pub fn faculty_dashboard(user: &SessionUser) -> Markup {
    layout(
        "Faculty dashboard",
        html! {
            (user_header(user))
            main.dashboard {
                (greeting(user))
                p { "Contact the library administrator to request new titles for your courses." }
            }
        },
    )
}

pub fn admin_dashboard(user: &SessionUser) -> Markup {
    layout(
        "Admin dashboard",
        html! {
            (user_header(user))
            main.dashboard {
                (greeting(user))
                nav.tiles {
                    a href="/admin/add-books" { "Add books" }
                    a href="/admin/remove-books" { "Remove books" }
                    a href="/admin/manage-inventory" { "Manage inventory" }
                    a href="/admin/view-members" { "View members" }
                }
            }
        },
    )
}
