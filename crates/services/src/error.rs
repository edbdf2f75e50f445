//! Shared error types for the services crate.

use thiserror::Error;

use quiz_core::CatalogError;

/// Errors emitted while assembling a `QuizContext`.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum ContextError {
    #[error(transparent)]
    Catalog(#[from] CatalogError),
}
