pub mod content_repository;
pub mod manager;
pub mod models;
pub mod query_builder;
pub mod user_repository;

pub use content_repository::PgContentStore;
pub use manager::{DatabaseError, DatabaseManager};
pub use user_repository::PgUserStore;
