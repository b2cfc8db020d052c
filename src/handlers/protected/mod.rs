// handlers/protected/mod.rs - Protected handlers (identity required)
//
// Route prefix: /api/admin/*. Each handler passes the request's Identity to
// the catalog or user service, which applies the gate before doing any work.

pub mod content;
pub mod upload;
pub mod user;
