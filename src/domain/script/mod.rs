pub mod error;
pub mod prompt;
pub mod service;

pub use error::ScriptServiceError;
pub use service::{ScriptService, ScriptServiceApi};
