// セッション機能モジュール

pub mod models;
pub mod store;

pub use models::{CurrentUser, USER_KEY};
pub use store::{FileSessionStore, InMemorySession, SessionReader};
