//! Login and signup pages

use maud::{html, Markup};

use super::layout;

pub fn login_page(message: Option<&str>, email: &str) -> Markup {
    layout(
        "Login",
        html! {
            main.auth {
                h1 { "Login" }
                @if let Some(message) = message {
                    p.error { (message) }
                }
                form method="post" action="/login" {
                    label for="email" { "Email" }
                    input #email type="email" name="email" value=(email) required;
                    label for="password" { "Password" }
                    input #password type="password" name="password" required;
                    button type="submit" { "Login" }
                }
                p { "No account yet? " a href="/signup" { "Sign up" } }
            }
        },
    )
}

pub fn signup_page(message: Option<&str>, name: &str, email: &str) -> Markup {
    layout(
        "Sign up",
        html! {
            main.auth {
                h1 { "Sign up" }
                @if let Some(message) = message {
                    p.error { (message) }
                }
                form method="post" action="/signup" {
                    label for="name" { "Name" }
                    input #name type="text" name="name" value=(name) required;
                    label for="email" { "Email" }
                    input #email type="email" name="email" value=(email) required;
                    label for="password" { "Password" }
                    input #password type="password" name="password" required;
                    label for="role" { "Role" }
                    select #role name="role" {
                        option value="student" { "Student" }
                        option value="faculty" { "Faculty" }
                        option value="admin" { "Admin" }
                    }
                    button type="submit" { "Create account" }
                }
                p { "Already registered? " a href="/login" { "Login" } }
            }
        },
    )
}
