//! Admin pages: inventory forms and listings, member roster

use maud::{html, Markup};

use super::{layout, user_header};
use crate::models::{Book, BookForm, Member, SessionUser};

fn book_fields(form: &BookForm) -> Markup {
    html! {
        label for="isbn" { "ISBN" }
        input #isbn type="text" name="isbn" value=(form.isbn) maxlength="13" required;
        label for="bookName" { "Book name" }
        input #bookName type="text" name="bookName" value=(form.book_name) required;
        label for="authorName" { "Author name" }
        input #authorName type="text" name="authorName" value=(form.author_name) required;
        label for="publisherName" { "Publisher name" }
        input #publisherName type="text" name="publisherName" value=(form.publisher_name) required;
    }
}

pub fn add_books_page(user: &SessionUser, form: &BookForm, message: Option<&str>) -> Markup {
    layout(
        "Add books",
        html! {
            (user_header(user))
            main.form-page {
                h1 { "Add books" }
                @if let Some(message) = message {
                    p.error { (message) }
                }
                form method="post" action="/admin/add-books" {
                    (book_fields(form))
                    label for="quantity" { "Quantity" }
                    input #quantity type="number" name="quantity" min="1" value=(form.quantity) required;
                    button type="submit" { "Add" }
                }
                a href="/admin/dashboard" { "Back to dashboard" }
            }
        },
    )
}

/// `details_message` concerns the ISBN and book details, `quantity_message` the quantity
pub fn remove_books_page(
    user: &SessionUser,
    form: &BookForm,
    details_message: Option<&str>,
    quantity_message: Option<&str>,
) -> Markup {
    layout(
        "Remove books",
        html! {
            (user_header(user))
            main.form-page {
                h1 { "Remove books" }
                @if let Some(message) = details_message {
                    p.error { (message) }
                }
                form method="post" action="/admin/remove-books" {
                    (book_fields(form))
                    label for="quantity" { "Quantity" }
                    input #quantity type="number" name="quantity" min="1" value=(form.quantity) required;
                    @if let Some(message) = quantity_message {
                        p.error { (message) }
                    }
                    button type="submit" { "Remove" }
                }
                a href="/admin/dashboard" { "Back to dashboard" }
            }
        },
    )
}

pub fn manage_inventory_page(user: &SessionUser, books: &[Book]) -> Markup {
    layout(
        "Manage inventory",
        html! {
            (user_header(user))
            main.table-page {
                h1 { "Inventory" }
                table {
                    thead {
                        tr {
                            th { "ISBN" }
                            th { "Book name" }
                            th { "Author" }
                            th { "Publisher" }
                            th { "Available" }
                            th { "Borrowed" }
                        }
                    }
                    tbody {
                        @if books.is_empty() {
                            tr { td colspan="6" { "There are no books in the library yet." } }
                        }
                        @for book in books {
                            tr data-isbn=(book.isbn) {
                                td data-label="ISBN" { (book.isbn) }
                                td data-label="Book name" { (book.book_name) }
                                td data-label="Author" { (book.author_name) }
                                td data-label="Publisher" { (book.publisher_name) }
                                td data-label="Available" { (book.available) }
                                td data-label="Borrowed" { (book.borrowed) }
                            }
                        }
                    }
                }
                a href="/admin/dashboard" { "Back to dashboard" }
            }
        },
    )
}

/// Table rows for the member roster; also served alone to the live search
pub fn member_rows(members: &[Member]) -> Markup {
    html! {
        @if members.is_empty() {
            tr { td colspan="5" { center { "There are no users registered yet or no results found..." } } }
        }
        @for (index, member) in members.iter().enumerate() {
            tr {
                td data-label="Sl.No." { (index + 1) }
                td data-label="User Type" { (member.role.as_str()) }
                td data-label="User Id" { (member.id) }
                td data-label="Name" { (member.name) }
                td data-label="Email Id" { (member.email) }
            }
        }
    }
}

pub fn member_search_failed_row() -> Markup {
    html! {
        tr { td colspan="5" { center { "Search failed due to a server error." } } }
    }
}

pub fn view_members_page(user: &SessionUser, members: &[Member]) -> Markup {
    layout(
        "Members",
        html! {
            (user_header(user))
            main.table-page {
                h1 { "Members" }
                input #member-search type="search" name="query" placeholder="Search by id, name, email or role"
                    data-endpoint="/api/admin/search-members";
                table {
                    thead {
                        tr {
                            th { "Sl.No." }
                            th { "User Type" }
                            th { "User Id" }
                            th { "Name" }
                            th { "Email Id" }
                        }
                    }
                    tbody #member-rows {
                        (member_rows(members))
                    }
                }
                a href="/admin/dashboard" { "Back to dashboard" }
                script src="/assets/js/member-search.js" {}
            }
        },
    )
}
