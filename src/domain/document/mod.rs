pub mod error;
mod extractors;
pub mod service;

pub use error::DocumentError;
pub use service::{enrich_theme, DocumentService, UploadedDocument};
