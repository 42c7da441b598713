//! Book inventory workflows: add with duplicate detection, quantity top-up,
//! removal, and single-copy adjustments.
//!
//! Each call is a one-shot decision over the current store contents. Lookups
//! and mutations are separate statements; the mutations of the removal paths
//! are conditional on the observed `available` so that a concurrent change
//! is reported as a `Conflict` instead of being overwritten.

use validator::Validate;

use crate::{
    error::{AppError, AppResult},
    models::{
        book::{is_valid_isbn, parse_quantity, BookLookupResponse},
        AdjustDirection, AdjustResult, Book, BookForm, NewBook, WorkflowResult,
    },
    repository::Repository,
};

pub const DASHBOARD: &str = "/admin/dashboard";
pub const ADD_BOOKS: &str = "/admin/add-books";

const STALE_INVENTORY: &str = "The inventory changed while processing your request. Please try again.";

#[derive(Clone)]
pub struct InventoryService {
    repository: Repository,
}

impl InventoryService {
    pub fn new(repository: Repository) -> Self {
        Self { repository }
    }

    /// Add a new title. An ISBN already in stock with the same details is
    /// not touched; the caller gets a confirmation offering a top-up instead.
    pub async fn add_book(&self, form: &BookForm) -> AppResult<WorkflowResult> {
        form.validate()?;
        if form.has_blank_details() {
            return Err(AppError::Validation("All fields are required.".to_string()));
        }

        let isbn = form.isbn.trim();
        if !is_valid_isbn(isbn) {
            return Err(AppError::Validation(
                "Invalid ISBN. Please enter the 13 digit ISBN of the book.".to_string(),
            ));
        }
        let quantity = parse_quantity(&form.quantity).ok_or_else(|| {
            AppError::InvalidQuantity(
                "Invalid quantity entered. Quantity must be a positive number.".to_string(),
            )
        })?;

        match self.repository.books.find_by_isbn(isbn).await? {
            Some(existing) => {
                if !existing.matches_details(&form.book_name, &form.author_name, &form.publisher_name) {
                    tracing::info!(isbn, "Add book rejected: details do not match stored ISBN");
                    return Err(AppError::Validation(
                        "Book details don't match with ISBN. Please enter the correct ISBN or check the book details."
                            .to_string(),
                    ));
                }

                tracing::info!(isbn, quantity, "Book already stocked, offering top-up");
                Ok(WorkflowResult::confirm(
                    "This book already exists in the library. Do you want to add more quantity of this book into the library?",
                    format!("/admin/update-quantity?isbn={}&quantity={}", isbn, quantity),
                    ADD_BOOKS,
                ))
            }
            None => {
                self.repository
                    .books
                    .insert(&NewBook {
                        isbn: isbn.to_string(),
                        book_name: form.book_name.trim().to_string(),
                        author_name: form.author_name.trim().to_string(),
                        publisher_name: form.publisher_name.trim().to_string(),
                        available: quantity,
                    })
                    .await?;

                tracing::info!(isbn, quantity, "Book added");
                Ok(WorkflowResult::success("Book(s) added successfully", DASHBOARD))
            }
        }
    }

    /// Add copies to an ISBN. Missing or non-positive quantities count as one;
    /// an unknown ISBN changes nothing and is still reported as done.
    pub async fn update_quantity(&self, isbn: &str, quantity: Option<&str>) -> AppResult<WorkflowResult> {
        let isbn = isbn.trim();
        let quantity = quantity.and_then(parse_quantity).unwrap_or(1);

        let touched = self.repository.books.add_available(isbn, quantity).await?;
        if touched == 0 {
            tracing::warn!(isbn, "Top-up matched no book");
        } else {
            tracing::info!(isbn, quantity, "Book quantity topped up");
        }

        Ok(WorkflowResult::success(
            format!(
                "{} book(s) added successfully to existing inventory (ISBN: {})!",
                quantity, isbn
            ),
            DASHBOARD,
        ))
    }

    /// Remove copies of a title. Removing every available copy deletes the
    /// row, unless copies are still on loan, in which case `available` drops
    /// to zero and the row stays.
    pub async fn remove_book(&self, form: &BookForm) -> AppResult<WorkflowResult> {
        let isbn = form.isbn.trim();

        let book = self.repository.books.find_by_isbn(isbn).await?.ok_or_else(|| {
            AppError::NotFound("Invalid request! This book does not exist in the library.".to_string())
        })?;

        if !book.matches_details(&form.book_name, &form.author_name, &form.publisher_name) {
            return Err(AppError::Validation(
                "Book details doesn't match with ISBN. Please enter the correct ISBN or check the book details."
                    .to_string(),
            ));
        }

        let quantity = parse_quantity(&form.quantity).ok_or_else(|| {
            AppError::InvalidQuantity(
                "Invalid quantity entered. Quantity must be a positive number.".to_string(),
            )
        })?;

        if quantity > book.available {
            return Err(AppError::InvalidQuantity(format!(
                "Invalid quantity entered. Quantity to remove ({}) is more than the available quantity ({}).",
                quantity, book.available
            )));
        }

        self.apply_removal(&book, quantity).await
    }

    async fn apply_removal(&self, book: &Book, quantity: i32) -> AppResult<WorkflowResult> {
        let books = &self.repository.books;
        let isbn = book.isbn.as_str();

        if quantity < book.available {
            ensure_applied(books.remove_available(isbn, quantity, book.available).await?)?;
            tracing::info!(isbn, quantity, "Book copies removed");
            Ok(WorkflowResult::success("Book(s) removed successfully", DASHBOARD))
        } else if book.borrowed > 0 {
            ensure_applied(books.zero_available(isbn, book.available).await?)?;
            tracing::info!(isbn, borrowed = book.borrowed, "Book availability set to zero");
            Ok(WorkflowResult::success(
                "Book(s) removed successfully! (Available set to zero)",
                DASHBOARD,
            ))
        } else {
            ensure_applied(books.delete_if_unborrowed(isbn, book.available).await?)?;
            tracing::info!(isbn, "Book deleted");
            Ok(WorkflowResult::success(
                "Book(s) permanently removed from library",
                DASHBOARD,
            ))
        }
    }

    /// Add or take away one copy. A decrement that cannot be applied is a
    /// soft failure (`success = false`); only store failures are errors.
    pub async fn adjust_by_one(&self, isbn: &str, direction: AdjustDirection) -> AppResult<AdjustResult> {
        let isbn = isbn.trim();
        let books = &self.repository.books;

        match direction {
            AdjustDirection::Increment => {
                let available = books.increment_available(isbn).await?;
                Ok(AdjustResult {
                    success: true,
                    message: "One copy added".to_string(),
                    available,
                })
            }
            AdjustDirection::Decrement => {
                let Some(book) = books.find_by_isbn(isbn).await? else {
                    return Ok(soft_failure("Book not found", None));
                };
                if book.available <= 0 {
                    return Ok(soft_failure("No available copies to remove", Some(book.available)));
                }

                match books.decrement_available(isbn).await? {
                    Some(available) => Ok(AdjustResult {
                        success: true,
                        message: "One copy removed".to_string(),
                        available: Some(available),
                    }),
                    None => Ok(soft_failure("No available copies to remove", Some(0))),
                }
            }
        }
    }

    /// All books, ordered by name
    pub async fn list_books(&self) -> AppResult<Vec<Book>> {
        self.repository.books.list_by_name().await
    }

    /// Look a book up by ISBN-13; a malformed or unknown ISBN is reported
    /// in the response, not as an error
    pub async fn lookup(&self, isbn: &str) -> AppResult<BookLookupResponse> {
        let isbn = isbn.trim();
        if isbn.chars().count() != crate::models::book::ISBN_LENGTH {
            return Ok(BookLookupResponse {
                success: false,
                book: None,
                message: Some("Invalid ISBN. It must be 13 characters long.".to_string()),
            });
        }

        Ok(match self.repository.books.find_by_isbn(isbn).await? {
            Some(book) => BookLookupResponse {
                success: true,
                book: Some(book),
                message: None,
            },
            None => BookLookupResponse {
                success: false,
                book: None,
                message: Some("Book not found".to_string()),
            },
        })
    }
}

fn ensure_applied(applied: bool) -> AppResult<()> {
    if applied {
        Ok(())
    } else {
        Err(AppError::Conflict(STALE_INVENTORY.to_string()))
    }
}

fn soft_failure(message: &str, available: Option<i32>) -> AdjustResult {
    AdjustResult {
        success: false,
        message: message.to_string(),
        available,
    }
}
