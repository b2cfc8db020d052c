pub mod content;
pub mod user;

pub use content::ContentRow;
pub use user::UserRow;
