//! Error types for ncaccess.
//!
//! This module provides a unified error handling approach using `thiserror`.

use crate::element::ElementType;
use crate::status::Status;
use std::collections::TryReserveError;
use std::fmt;
use thiserror::Error;

/// Result type alias for ncaccess operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur while moving data to or from a dataset.
#[derive(Debug, Error)]
pub enum Error {
    /// The caller's buffer does not fit the stored type or length.
    ///
    /// Raised before the storage engine is touched.
    #[error(
        "type or length mismatch: storage holds {stored_len} x {stored_type}, buffer has {buffer_len} x {buffer_type}"
    )]
    TypeOrLengthMismatch {
        stored_type: StoredType,
        stored_len: usize,
        buffer_type: ElementType,
        buffer_len: usize,
    },

    /// The storage engine reported a failure.
    #[error("storage error: {status}: {message}")]
    Storage { status: Status, message: String },

    /// A buffer for a whole-array read could not be allocated.
    #[error("cannot allocate buffer of {len} elements")]
    Allocation {
        len: usize,
        #[source]
        source: TryReserveError,
    },

    /// A flat read could not be shaped into an n-dimensional array.
    #[error("shape error: {0}")]
    Shape(#[from] ndarray::ShapeError),
}

/// Type held in storage, as seen when validating an accessor.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StoredType {
    /// A numeric type.
    Numeric(ElementType),
    /// Character or string data.
    Text,
}

impl fmt::Display for StoredType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            StoredType::Numeric(ty) => fmt::Display::fmt(ty, f),
            StoredType::Text => f.write_str("text"),
        }
    }
}

impl From<ElementType> for StoredType {
    fn from(ty: ElementType) -> Self {
        StoredType::Numeric(ty)
    }
}

impl Error {
    /// Create a TypeOrLengthMismatch error.
    pub fn mismatch(
        stored_type: impl Into<StoredType>,
        stored_len: usize,
        buffer_type: ElementType,
        buffer_len: usize,
    ) -> Self {
        Self::TypeOrLengthMismatch {
            stored_type: stored_type.into(),
            stored_len,
            buffer_type,
            buffer_len,
        }
    }

    /// Create a Storage error.
    pub fn storage(status: Status, message: impl Into<String>) -> Self {
        Self::Storage {
            status,
            message: message.into(),
        }
    }

    /// Create a Storage error described by its status alone.
    pub fn status(status: Status) -> Self {
        Self::storage(status, status.description())
    }

    /// Status of a Storage error.
    pub fn storage_status(&self) -> Option<Status> {
        match self {
            Self::Storage { status, .. } => Some(*status),
            _ => None,
        }
    }

    /// Whether this is a validation failure.
    pub fn is_mismatch(&self) -> bool {
        matches!(self, Self::TypeOrLengthMismatch { .. })
    }
}

impl From<netcdf::Error> for Error {
    fn from(err: netcdf::Error) -> Self {
        let status = match &err {
            netcdf::Error::Netcdf(code) => Status::from_code(*code).unwrap_or(Status::Library),
            _ => Status::Library,
        };
        Self::storage(status, err.to_string())
    }
}
