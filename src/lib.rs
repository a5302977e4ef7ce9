// 機能モジュール構造
pub mod features;
pub mod shared;

pub use features::bills::{
    BillsController, HttpStore, InMemoryStore, NewBillController, Store,
};
pub use features::navigation::{LoggingNavigator, Navigator, Route};
pub use features::session::{FileSessionStore, InMemorySession, SessionReader};
pub use shared::{AppError, AppResult};
