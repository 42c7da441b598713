//! Book model and inventory form types

use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::ToSchema;
use validator::Validate;

/// Length of an ISBN-13 identity key
pub const ISBN_LENGTH: usize = 13;

/// Book row; `isbn` is the identity key
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, FromRow, ToSchema)]
pub struct Book {
    pub isbn: String,
    pub book_name: String,
    pub author_name: String,
    pub publisher_name: String,
    /// Copies on the shelf
    pub available: i32,
    /// Copies out on loan
    pub borrowed: i32,
}

impl Book {
    /// Whether submitted title, author and publisher agree with the stored
    /// ones, ignoring case and surrounding whitespace.
    pub fn matches_details(&self, book_name: &str, author_name: &str, publisher_name: &str) -> bool {
        normalize(&self.book_name) == normalize(book_name)
            && normalize(&self.author_name) == normalize(author_name)
            && normalize(&self.publisher_name) == normalize(publisher_name)
    }
}

fn normalize(s: &str) -> String {
    s.trim().to_lowercase()
}

/// Values needed to insert a new book
#[derive(Debug, Clone)]
pub struct NewBook {
    pub isbn: String,
    pub book_name: String,
    pub author_name: String,
    pub publisher_name: String,
    pub available: i32,
}

/// Add/remove book form. Field names follow the HTML form.
#[derive(Debug, Clone, Deserialize, Validate)]
#[serde(default)]
pub struct BookForm {
    #[validate(length(min = 1, message = "All fields are required."))]
    pub isbn: String,
    #[serde(rename = "bookName")]
    #[validate(length(min = 1, message = "All fields are required."))]
    pub book_name: String,
    #[serde(rename = "authorName")]
    #[validate(length(min = 1, message = "All fields are required."))]
    pub author_name: String,
    #[serde(rename = "publisherName")]
    #[validate(length(min = 1, message = "All fields are required."))]
    pub publisher_name: String,
    pub quantity: String,
}

impl BookForm {
    /// Title, author or publisher left empty once surrounding whitespace is dropped
    pub fn has_blank_details(&self) -> bool {
        [&self.book_name, &self.author_name, &self.publisher_name]
            .iter()
            .any(|field| field.trim().is_empty())
    }
}

impl Default for BookForm {
    fn default() -> Self {
        Self {
            isbn: String::new(),
            book_name: String::new(),
            author_name: String::new(),
            publisher_name: String::new(),
            quantity: "1".to_string(),
        }
    }
}

/// `?isbn=&quantity=` of the top-up link
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct TopUpQuery {
    pub isbn: String,
    pub quantity: Option<String>,
}

/// Request body carrying a single ISBN
#[derive(Debug, Clone, Deserialize, ToSchema)]
pub struct IsbnRequest {
    /// ISBN-13 of the book
    pub isbn: String,
}

/// Result of a book lookup by ISBN
#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct BookLookupResponse {
    pub success: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub book: Option<Book>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
}

/// Direction of a single-copy stock adjustment
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AdjustDirection {
    Increment,
    Decrement,
}

/// Acknowledgment of a single-copy adjustment. A refused decrement is
/// reported with `success = false`, never as an error.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct AdjustResult {
    pub success: bool,
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub available: Option<i32>,
}

/// ISBN-13: exactly thirteen ASCII digits.
pub fn is_valid_isbn(isbn: &str) -> bool {
    isbn.len() == ISBN_LENGTH && isbn.bytes().all(|b| b.is_ascii_digit())
}

/// Parse a strictly positive copy count.
pub fn parse_quantity(raw: &str) -> Option<i32> {
    raw.trim().parse::<i32>().ok().filter(|q| *q > 0)
}
