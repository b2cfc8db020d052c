//! Object storage backends for [`ObjectStore`](crate::catalog::ObjectStore).

pub mod r2;

pub use r2::{build_s3_client, R2ObjectStore};
