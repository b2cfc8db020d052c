// handlers/public/mod.rs - Public handlers (no identity required)

pub mod auth;
pub mod content;
