//! Books repository for database operations

use async_trait::async_trait;
use sqlx::{Pool, Postgres};

use crate::{
    error::{AppError, AppResult},
    models::{Book, NewBook},
};

use super::BookStore;

#[derive(Clone)]
pub struct BooksRepository {
    pool: Pool<Postgres>,
}

impl BooksRepository {
    pub fn new(pool: Pool<Postgres>) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl BookStore for BooksRepository {
    async fn find_by_isbn(&self, isbn: &str) -> AppResult<Option<Book>> {
        let book = sqlx::query_as::<_, Book>(
            r#"
            SELECT isbn, book_name, author_name, publisher_name, available, borrowed
            FROM books
            WHERE isbn = $1
            "#,
        )
        .bind(isbn)
        .fetch_optional(&self.pool)
        .await?;

        Ok(book)
    }

    async fn list_by_name(&self) -> AppResult<Vec<Book>> {
        let books = sqlx::query_as::<_, Book>(
            r#"
            SELECT isbn, book_name, author_name, publisher_name, available, borrowed
            FROM books
            ORDER BY book_name ASC
            "#,
        )
        .fetch_all(&self.pool)
        .await?;

        Ok(books)
    }

    async fn insert(&self, book: &NewBook) -> AppResult<()> {
        sqlx::query(
            r#"
            INSERT INTO books (isbn, book_name, author_name, publisher_name, available, borrowed)
            VALUES ($1, $2, $3, $4, $5, 0)
            "#,
        )
        .bind(&book.isbn)
        .bind(&book.book_name)
        .bind(&book.author_name)
        .bind(&book.publisher_name)
        .bind(book.available)
        .execute(&self.pool)
        .await
        .map_err(|e| match e {
            sqlx::Error::Database(ref db) if db.is_unique_violation() => {
                AppError::Conflict(format!("A book with ISBN {} was added concurrently", book.isbn))
            }
            other => AppError::Database(other),
        })?;

        Ok(())
    }

    async fn add_available(&self, isbn: &str, quantity: i32) -> AppResult<u64> {
        let result = sqlx::query("UPDATE books SET available = available + $1 WHERE isbn = $2")
            .bind(quantity)
            .bind(isbn)
            .execute(&self.pool)
            .await?;

        Ok(result.rows_affected())
    }

    async fn remove_available(&self, isbn: &str, quantity: i32, expected_available: i32) -> AppResult<bool> {
        let result = sqlx::query(
            "UPDATE books SET available = available - $1 WHERE isbn = $2 AND available = $3",
        )
        .bind(quantity)
        .bind(isbn)
        .bind(expected_available)
        .execute(&self.pool)
        .await?;

        Ok(result.rows_affected() == 1)
    }

    async fn zero_available(&self, isbn: &str, expected_available: i32) -> AppResult<bool> {
        let result = sqlx::query("UPDATE books SET available = 0 WHERE isbn = $1 AND available = $2")
            .bind(isbn)
            .bind(expected_available)
            .execute(&self.pool)
            .await?;

        Ok(result.rows_affected() == 1)
    }

    async fn delete_if_unborrowed(&self, isbn: &str, expected_available: i32) -> AppResult<bool> {
        let result = sqlx::query("DELETE FROM books WHERE isbn = $1 AND available = $2 AND borrowed = 0")
            .bind(isbn)
            .bind(expected_available)
            .execute(&self.pool)
            .await?;

        Ok(result.rows_affected() == 1)
    }

    async fn increment_available(&self, isbn: &str) -> AppResult<Option<i32>> {
        let available = sqlx::query_scalar::<_, i32>(
            "UPDATE books SET available = available + 1 WHERE isbn = $1 RETURNING available",
        )
        .bind(isbn)
        .fetch_optional(&self.pool)
        .await?;

        Ok(available)
    }

    async fn decrement_available(&self, isbn: &str) -> AppResult<Option<i32>> {
        let available = sqlx::query_scalar::<_, i32>(
            "UPDATE books SET available = available - 1 WHERE isbn = $1 AND available > 0 RETURNING available",
        )
        .bind(isbn)
        .fetch_optional(&self.pool)
        .await?;

        Ok(available)
    }
}
