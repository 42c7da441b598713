//! Data models for the library portal

pub mod book;
pub mod outcome;
pub mod user;

// Re-export commonly used types
pub use book::{AdjustDirection, AdjustResult, Book, BookForm, NewBook};
pub use outcome::{OutcomeStatus, WorkflowResult};
pub use user::{Member, NewUser, Role, SessionUser, User};
