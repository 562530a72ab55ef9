//! Errors surfaced by use-case services.
//!
//! Storage failures never appear here; the store absorbs them. The one
//! exception is a write over a collection that could not be read.

use crate::model::validation::ValidationError;
use crate::store::Loaded;
use log::warn;
use std::error::Error;
use std::fmt::{Display, Formatter};

pub type ServiceResult<T> = Result<T, ServiceError>;

#[derive(Debug)]
pub enum ServiceError {
    /// Draft rejected before reaching the store.
    Validation(ValidationError),
    /// No record with `id` in `collection`.
    NotFound { collection: &'static str, id: String },
    /// Upload contained no usable rows.
    EmptyUpload { rejected: usize },
    /// Stored collection could not be read, so it is not written back.
    Unreadable { collection: &'static str },
    /// Cached member snapshot refers to a member that no longer exists.
    StaleMemberSession(String),
}

impl Display for ServiceError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Validation(err) => write!(f, "{err}"),
            Self::NotFound { collection, id } => write!(f, "{collection} record not found: {id}"),
            Self::EmptyUpload { rejected } => write!(
                f,
                "upload has no rows with both registration_number and name ({rejected} rejected)"
            ),
            Self::Unreadable { collection } => write!(
                f,
                "stored {collection} collection is unreadable; refusing to overwrite it"
            ),
            Self::StaleMemberSession(id) => {
                write!(f, "stored member snapshot refers to unknown member: {id}")
            }
        }
    }
}

impl Error for ServiceError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Validation(err) => Some(err),
            _ => None,
        }
    }
}

impl From<ValidationError> for ServiceError {
    fn from(value: ValidationError) -> Self {
        Self::Validation(value)
    }
}

impl ServiceError {
    pub(crate) fn not_found(collection: &'static str, id: &str) -> Self {
        Self::NotFound {
            collection,
            id: id.to_string(),
        }
    }
}

/// Unwraps a collection that is about to be modified and saved.
///
/// A fallback value stands in for data that is still stored, so writing it
/// back would erase that data.
pub(crate) fn writable<T>(loaded: Loaded<T>, collection: &'static str) -> ServiceResult<T> {
    if loaded.fell_back() {
        warn!(
            "event=collection_write module=service status=refused key={collection} source={:?}",
            loaded.source
        );
        return Err(ServiceError::Unreadable { collection });
    }
    Ok(loaded.value)
}
