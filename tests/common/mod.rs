//! In-memory stores and request helpers shared by the integration tests

#![allow(dead_code)]

use std::collections::{BTreeMap, HashMap};
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use axum::{
    body::Body,
    http::{header, Request, Response},
    Router,
};
use chrono::Utc;
use tower::util::ServiceExt; // for `oneshot`
use uuid::Uuid;

use library_portal::{
    api,
    config::SessionConfig,
    error::{AppError, AppResult},
    models::{Book, Member, NewBook, NewUser, Role, SessionUser, User},
    repository::{BookStore, Repository, UserStore},
    services::{sessions::SessionStore, Services},
    AppConfig, AppState,
};

pub const ISBN: &str = "9780000000001";

#[derive(Default)]
pub struct MemoryUserStore {
    users: Mutex<Vec<User>>,
}

impl MemoryUserStore {
    pub fn count(&self) -> usize {
        self.users.lock().unwrap().len()
    }
}

#[async_trait]
impl UserStore for MemoryUserStore {
    async fn find_by_email(&self, email: &str) -> AppResult<Option<User>> {
        Ok(self.users.lock().unwrap().iter().find(|u| u.email == email).cloned())
    }

    async fn email_exists(&self, email: &str) -> AppResult<bool> {
        Ok(self.users.lock().unwrap().iter().any(|u| u.email == email))
    }

    async fn create(&self, user: &NewUser) -> AppResult<User> {
        let mut users = self.users.lock().unwrap();
        if users.iter().any(|u| u.email == user.email) {
            return Err(AppError::Conflict("Error: Could not create user.".into()));
        }
        let created = User {
            id: users.len() as i32 + 1,
            name: user.name.clone(),
            email: user.email.clone(),
            password: user.password_hash.clone(),
            role: user.role,
        };
        users.push(created.clone());
        Ok(created)
    }

    async fn search(&self, query: &str) -> AppResult<Vec<Member>> {
        let needle = query.to_lowercase();
        let mut found: Vec<Member> = self
            .users
            .lock()
            .unwrap()
            .iter()
            .filter(|u| {
                u.id.to_string().contains(&needle)
                    || u.email.to_lowercase().contains(&needle)
                    || u.role.as_str().contains(&needle)
                    || u.name.to_lowercase().contains(&needle)
            })
            .map(Member::from)
            .collect();
        found.sort_by_key(|m| m.id);
        Ok(found)
    }
}

/// Book store with the same conditional-update semantics as the SQL one
#[derive(Default)]
pub struct MemoryBookStore {
    books: Mutex<BTreeMap<String, Book>>,
}

impl MemoryBookStore {
    pub fn put(&self, book: Book) {
        self.books.lock().unwrap().insert(book.isbn.clone(), book);
    }

    pub fn get(&self, isbn: &str) -> Option<Book> {
        self.books.lock().unwrap().get(isbn).cloned()
    }

    pub fn snapshot(&self) -> Vec<Book> {
        self.books.lock().unwrap().values().cloned().collect()
    }
}

#[async_trait]
impl BookStore for MemoryBookStore {
    async fn find_by_isbn(&self, isbn: &str) -> AppResult<Option<Book>> {
        Ok(self.get(isbn))
    }

    async fn list_by_name(&self) -> AppResult<Vec<Book>> {
        let mut books = self.snapshot();
        books.sort_by(|a, b| a.book_name.cmp(&b.book_name));
        Ok(books)
    }

    async fn insert(&self, book: &NewBook) -> AppResult<()> {
        let mut books = self.books.lock().unwrap();
        if books.contains_key(&book.isbn) {
            return Err(AppError::Conflict("Book already exists".into()));
        }
        books.insert(
            book.isbn.clone(),
            Book {
                isbn: book.isbn.clone(),
                book_name: book.book_name.clone(),
                author_name: book.author_name.clone(),
                publisher_name: book.publisher_name.clone(),
                available: book.available,
                borrowed: 0,
            },
        );
        Ok(())
    }

    async fn add_available(&self, isbn: &str, quantity: i32) -> AppResult<u64> {
        match self.books.lock().unwrap().get_mut(isbn) {
            Some(book) => {
                book.available = checked_available(book.available, quantity)?;
                Ok(1)
            }
            None => Ok(0),
        }
    }

    async fn remove_available(&self, isbn: &str, quantity: i32, expected_available: i32) -> AppResult<bool> {
        match self.books.lock().unwrap().get_mut(isbn) {
            Some(book) if book.available == expected_available => {
                book.available -= quantity;
                Ok(true)
            }
            _ => Ok(false),
        }
    }

    async fn zero_available(&self, isbn: &str, expected_available: i32) -> AppResult<bool> {
        match self.books.lock().unwrap().get_mut(isbn) {
            Some(book) if book.available == expected_available => {
                book.available = 0;
                Ok(true)
            }
            _ => Ok(false),
        }
    }

    async fn delete_if_unborrowed(&self, isbn: &str, expected_available: i32) -> AppResult<bool> {
        let mut books = self.books.lock().unwrap();
        match books.get(isbn) {
            Some(book) if book.available == expected_available && book.borrowed == 0 => {
                books.remove(isbn);
                Ok(true)
            }
            _ => Ok(false),
        }
    }

    async fn increment_available(&self, isbn: &str) -> AppResult<Option<i32>> {
        match self.books.lock().unwrap().get_mut(isbn) {
            Some(book) => {
                book.available = checked_available(book.available, 1)?;
                Ok(Some(book.available))
            }
            None => Ok(None),
        }
    }

    async fn decrement_available(&self, isbn: &str) -> AppResult<Option<i32>> {
        match self.books.lock().unwrap().get_mut(isbn) {
            Some(book) if book.available > 0 => {
                book.available -= 1;
                Ok(Some(book.available))
            }
            _ => Ok(None),
        }
    }
}

/// Postgres rejects an `INTEGER` overflow instead of wrapping
fn checked_available(available: i32, added: i32) -> AppResult<i32> {
    available
        .checked_add(added)
        .ok_or_else(|| AppError::Database(sqlx::Error::Protocol("integer out of range".into())))
}

/// Session store without expiry
#[derive(Default)]
pub struct MemorySessionStore {
    sessions: Mutex<HashMap<String, SessionUser>>,
}

impl MemorySessionStore {
    pub fn contains(&self, session_id: &str) -> bool {
        self.sessions.lock().unwrap().contains_key(session_id)
    }

    pub fn len(&self) -> usize {
        self.sessions.lock().unwrap().len()
    }
}

#[async_trait]
impl SessionStore for MemorySessionStore {
    async fn load(&self, session_id: &str) -> AppResult<Option<SessionUser>> {
        Ok(self.sessions.lock().unwrap().get(session_id).cloned())
    }

    async fn save(&self, session_id: &str, user: &SessionUser, _ttl_seconds: u64) -> AppResult<()> {
        self.sessions
            .lock()
            .unwrap()
            .insert(session_id.to_string(), user.clone());
        Ok(())
    }

    async fn destroy(&self, session_id: &str) -> AppResult<()> {
        self.sessions.lock().unwrap().remove(session_id);
        Ok(())
    }
}

pub struct TestApp {
    pub router: Router,
    pub services: Arc<Services>,
    pub users: Arc<MemoryUserStore>,
    pub books: Arc<MemoryBookStore>,
    pub sessions: Arc<MemorySessionStore>,
}

impl TestApp {
    pub fn new() -> Self {
        let users = Arc::new(MemoryUserStore::default());
        let books = Arc::new(MemoryBookStore::default());
        let sessions = Arc::new(MemorySessionStore::default());

        let repository = Repository::with_stores(users.clone(), books.clone());
        let services = Arc::new(Services::new(
            repository,
            sessions.clone(),
            SessionConfig::default(),
        ));

        let state = AppState {
            config: Arc::new(AppConfig::default()),
            services: services.clone(),
        };

        Self {
            router: api::create_router(state),
            services,
            users,
            books,
            sessions,
        }
    }

    /// Put a session straight into the store and return its `Cookie` header value
    pub fn session_cookie(&self, role: Role) -> String {
        let id = Uuid::new_v4().to_string();
        self.sessions.sessions.lock().unwrap().insert(
            id.clone(),
            SessionUser {
                id: 100,
                name: format!("Test {}", role),
                email: format!("{}@example.org", role),
                role,
                authenticated_at: Utc::now(),
            },
        );
        format!("library_session={}", id)
    }

    pub async fn send(&self, request: Request<Body>) -> Response<Body> {
        self.router.clone().oneshot(request).await.unwrap()
    }

    pub async fn get(&self, uri: &str, cookie: Option<&str>) -> Response<Body> {
        let mut builder = Request::builder().uri(uri);
        if let Some(cookie) = cookie {
            builder = builder.header(header::COOKIE, cookie);
        }
        self.send(builder.body(Body::empty()).unwrap()).await
    }

    pub async fn post_form(&self, uri: &str, form: &str, cookie: Option<&str>) -> Response<Body> {
        let mut builder = Request::builder()
            .method("POST")
            .uri(uri)
            .header(header::CONTENT_TYPE, "application/x-www-form-urlencoded");
        if let Some(cookie) = cookie {
            builder = builder.header(header::COOKIE, cookie);
        }
        self.send(builder.body(Body::from(form.to_string())).unwrap()).await
    }

    pub async fn post_json(&self, uri: &str, json: serde_json::Value, cookie: Option<&str>) -> Response<Body> {
        let mut builder = Request::builder()
            .method("POST")
            .uri(uri)
            .header(header::CONTENT_TYPE, "application/json");
        if let Some(cookie) = cookie {
            builder = builder.header(header::COOKIE, cookie);
        }
        self.send(builder.body(Body::from(json.to_string())).unwrap()).await
    }
}

pub fn book(available: i32, borrowed: i32) -> Book {
    Book {
        isbn: ISBN.into(),
        book_name: "The Pragmatic Programmer".into(),
        author_name: "Andrew Hunt".into(),
        publisher_name: "Addison-Wesley".into(),
        available,
        borrowed,
    }
}

/// Urlencoded add/remove form for `book()`
pub fn book_form(author: &str, quantity: &str) -> String {
    format!(
        "isbn={}&bookName=The+Pragmatic+Programmer&authorName={}&publisherName=Addison-Wesley&quantity={}",
        ISBN,
        author.replace(' ', "+"),
        quantity
    )
}

pub async fn body_string(response: Response<Body>) -> String {
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX).await.unwrap();
    String::from_utf8(bytes.to_vec()).unwrap()
}

pub async fn body_json(response: Response<Body>) -> serde_json::Value {
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX).await.unwrap();
    serde_json::from_slice(&bytes).unwrap()
}

pub fn location(response: &Response<Body>) -> &str {
    response
        .headers()
        .get(header::LOCATION)
        .and_then(|v| v.to_str().ok())
        .unwrap_or_default()
}

/// `name=value` part of the session cookie set by a response
pub fn session_cookie_from(response: &Response<Body>) -> Option<String> {
    response
        .headers()
        .get_all(header::SET_COOKIE)
        .iter()
        .filter_map(|v| v.to_str().ok())
        .find(|v| v.starts_with("library_session="))
        .and_then(|v| v.split(';').next())
        .map(str::to_string)
}
