//! Content catalog: listing, lookup and mutation of news content, plus the
//! image upload flow that feeds content rows.
//!
//! Storage and object storage are reached only through [`ContentStore`] and
//! [`ObjectStore`]; everything in here is testable without Postgres or R2.

pub mod error;
pub mod executor;
pub mod gate;
pub mod model;
pub mod mutation;
pub mod pagination;
pub mod query;
pub mod store;
pub mod tags;
pub mod upload;
pub mod validation;

pub use error::{CatalogError, CatalogResult};
pub use executor::{ContentListing, ContentQueryExecutor};
pub use gate::{AuthenticatedUser, Identity};
pub use model::{AuthorSummary, CategorySummary, Content, ContentDraft, ContentRecord, ContentRequest, ContentResponse};
pub use mutation::ContentMutationService;
pub use pagination::Pagination;
pub use query::{ContentColumn, ListingDefaults, ListingMode, QuerySpec, SortDirection};
pub use store::{ContentFilter, ContentPage, ContentQuery, ContentStore};
pub use upload::{FileUploadRequest, ObjectStore, PresignedUpload, UploadCoordinator};
