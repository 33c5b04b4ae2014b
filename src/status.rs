//! Storage engine status codes.
//!
//! libnetcdf reports every failure as a negative integer. This module keeps an
//! explicit mapping from those integers to named variants so callers can match
//! on the cause of a [`StorageError`](crate::Error::Storage) without memorising
//! magic numbers. Codes that are not listed here survive as
//! [`Status::Unknown`].

use std::fmt;

/// Status reported by the storage engine for a failed call.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Status {
    /// Not a valid dataset or variable id (also: handle used after close).
    BadId,
    /// Too many datasets open.
    TooManyOpen,
    /// File exists and clobbering was disabled.
    Exists,
    /// Invalid argument.
    InvalidArgument,
    /// Write to a read-only dataset.
    Permission,
    /// Operation requires define mode.
    NotInDefineMode,
    /// Operation not allowed in define mode.
    InDefineMode,
    /// Index exceeds a dimension bound.
    InvalidCoordinates,
    /// Name already in use.
    NameInUse,
    /// Attribute not found.
    AttributeNotFound,
    /// Not a valid data type, or a type conflict.
    BadType,
    /// Invalid dimension id or name.
    BadDimension,
    /// Variable not found.
    VariableNotFound,
    /// Not a netCDF file.
    NotNetcdf,
    /// Start plus count exceeds a dimension bound.
    EdgeOutOfBounds,
    /// Name contains illegal characters.
    BadName,
    /// Numeric conversion not representable.
    Range,
    /// Memory allocation failure inside the engine.
    OutOfMemory,
    /// File likely truncated or corrupted.
    Truncated,
    /// Generic I/O error.
    Io,
    /// Error in the HDF5 layer.
    Hdf,
    /// Cannot read.
    CantRead,
    /// Cannot write.
    CantWrite,
    /// Cannot create.
    CantCreate,
    /// Problem with file metadata.
    FileMetadata,
    /// Engine error that carries no numeric status.
    Library,
    /// A status code without a named variant.
    Unknown(i32),
}

const TABLE: &[(i32, Status)] = &[
    (-33, Status::BadId),
    (-34, Status::TooManyOpen),
    (-35, Status::Exists),
    (-36, Status::InvalidArgument),
    (-37, Status::Permission),
    (-38, Status::NotInDefineMode),
    (-39, Status::InDefineMode),
    (-40, Status::InvalidCoordinates),
    (-42, Status::NameInUse),
    (-43, Status::AttributeNotFound),
    (-45, Status::BadType),
    (-46, Status::BadDimension),
    (-49, Status::VariableNotFound),
    (-51, Status::NotNetcdf),
    (-57, Status::EdgeOutOfBounds),
    (-59, Status::BadName),
    (-60, Status::Range),
    (-61, Status::OutOfMemory),
    (-64, Status::Truncated),
    (-68, Status::Io),
    (-101, Status::Hdf),
    (-102, Status::CantRead),
    (-103, Status::CantWrite),
    (-104, Status::CantCreate),
    (-105, Status::FileMetadata),
];

impl Status {
    /// Map a raw engine status code.
    ///
    /// Success (`0`) is not a failure status and maps to `None`.
    pub fn from_code(code: i32) -> Option<Self> {
        if code == 0 {
            return None;
        }
        let status = TABLE
            .iter()
            .find(|(c, _)| *c == code)
            .map(|(_, s)| *s)
            .unwrap_or(Status::Unknown(code));
        Some(status)
    }

    /// The raw engine code, if this status has one.
    pub fn code(&self) -> Option<i32> {
        match self {
            Status::Library => None,
            Status::Unknown(code) => Some(*code),
            other => TABLE.iter().find(|(_, s)| s == other).map(|(c, _)| *c),
        }
    }

    /// Short human readable description.
    pub fn description(&self) -> &'static str {
        match self {
            Status::BadId => "not a valid id",
            Status::TooManyOpen => "too many datasets open",
            Status::Exists => "file exists and clobbering is disabled",
            Status::InvalidArgument => "invalid argument",
            Status::Permission => "write to read only dataset",
            Status::NotInDefineMode => "operation not allowed in data mode",
            Status::InDefineMode => "operation not allowed in define mode",
            Status::InvalidCoordinates => "index exceeds dimension bound",
            Status::NameInUse => "name already in use",
            Status::AttributeNotFound => "attribute not found",
            Status::BadType => "not a valid data type or type mismatch",
            Status::BadDimension => "invalid dimension id or name",
            Status::VariableNotFound => "variable not found",
            Status::NotNetcdf => "unknown file format",
            Status::EdgeOutOfBounds => "start+count exceeds dimension bound",
            Status::BadName => "name contains illegal characters",
            Status::Range => "numeric conversion not representable",
            Status::OutOfMemory => "memory allocation failure",
            Status::Truncated => "file likely truncated or possibly corrupted",
            Status::Io => "I/O failure",
            Status::Hdf => "HDF error",
            Status::CantRead => "can't read",
            Status::CantWrite => "can't write",
            Status::CantCreate => "can't create",
            Status::FileMetadata => "problem with file metadata",
            Status::Library => "engine error",
            Status::Unknown(_) => "unknown status",
        }
    }
}

impl fmt::Display for Status {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.code() {
            Some(code) => write!(f, "{} ({})", self.description(), code),
            None => f.write_str(self.description()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn success_is_not_a_status() {
        assert_eq!(Status::from_code(0), None);
    }

    #[test]
    fn known_codes_map_both_ways() {
        for (code, status) in TABLE {
            assert_eq!(Status::from_code(*code), Some(*status));
            assert_eq!(status.code(), Some(*code));
        }
    }

    #[test]
    fn unknown_code_is_preserved() {
        let status = Status::from_code(-9999).unwrap();
        assert_eq!(status, Status::Unknown(-9999));
        assert_eq!(status.code(), Some(-9999));
        assert_eq!(status.to_string(), "unknown status (-9999)");
    }

    #[test]
    fn library_status_has_no_code() {
        assert_eq!(Status::Library.code(), None);
        assert_eq!(Status::Library.to_string(), "engine error");
    }
}
