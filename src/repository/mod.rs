//! Repository layer for database operations
//!
//! Each store is a trait so the services can run against Postgres in
//! production and against in-memory stores in tests.

pub mod books;
pub mod users;

use std::sync::Arc;

use async_trait::async_trait;
use sqlx::{Pool, Postgres};

use crate::{
    error::AppResult,
    models::{Book, Member, NewBook, NewUser, User},
};

/// Persistence of user accounts
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait UserStore: Send + Sync {
    /// Exact-match lookup by email
    async fn find_by_email(&self, email: &str) -> AppResult<Option<User>>;

    async fn email_exists(&self, email: &str) -> AppResult<bool>;

    /// Insert a user; a duplicate email is a `Conflict`
    async fn create(&self, user: &NewUser) -> AppResult<User>;

    /// Case-insensitive substring match over id, email, role and name,
    /// ordered by ascending id. An empty query matches everyone.
    async fn search(&self, query: &str) -> AppResult<Vec<Member>>;
}

/// Persistence of the book inventory.
///
/// Methods taking `expected_available` only apply when the stored
/// `available` still equals the value the caller observed, and report
/// whether they did.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait BookStore: Send + Sync {
    async fn find_by_isbn(&self, isbn: &str) -> AppResult<Option<Book>>;

    /// All books ordered by name
    async fn list_by_name(&self) -> AppResult<Vec<Book>>;

    /// Insert with `borrowed = 0`; an existing ISBN is a `Conflict`
    async fn insert(&self, book: &NewBook) -> AppResult<()>;

    /// `available += quantity`, returns the number of rows touched
    async fn add_available(&self, isbn: &str, quantity: i32) -> AppResult<u64>;

    async fn remove_available(&self, isbn: &str, quantity: i32, expected_available: i32) -> AppResult<bool>;

    async fn zero_available(&self, isbn: &str, expected_available: i32) -> AppResult<bool>;

    /// Delete the row if nothing is on loan
    async fn delete_if_unborrowed(&self, isbn: &str, expected_available: i32) -> AppResult<bool>;

    /// `available += 1`, returns the new count if the book exists
    async fn increment_available(&self, isbn: &str) -> AppResult<Option<i32>>;

    /// `available -= 1` if positive, returns the new count if applied
    async fn decrement_available(&self, isbn: &str) -> AppResult<Option<i32>>;
}

/// Main repository struct holding the stores
#[derive(Clone)]
pub struct Repository {
    pub users: Arc<dyn UserStore>,
    pub books: Arc<dyn BookStore>,
}

impl Repository {
    /// Create a new repository backed by the given database pool
    pub fn new(pool: Pool<Postgres>) -> Self {
        Self {
            users: Arc::new(users::UsersRepository::new(pool.clone())),
            books: Arc::new(books::BooksRepository::new(pool)),
        }
    }

    /// Create a repository from arbitrary store implementations
    pub fn with_stores(users: Arc<dyn UserStore>, books: Arc<dyn BookStore>) -> Self {
        Self { users, books }
    }
}

/// Escape `%`, `_` and `\` so user input matches literally inside LIKE.
pub(crate) fn escape_like(input: &str) -> String {
    let mut escaped = String::with_capacity(input.len());
    for c in input.chars() {
        if matches!(c, '%' | '_' | '\\') {
            escaped.push('\\');
        }
        escaped.push(c);
    }
    escaped
}
