use std::fmt;

use common::time_uuid::TimeUuidError;
use thiserror::Error;
use uuid::Uuid;

/// Identifier of the row a conversion was working on, if it had one yet.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RowRef(pub Option<Uuid>);

impl fmt::Display for RowRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.0 {
            Some(id) => write!(f, "{id}"),
            None => f.write_str("<unassigned>"),
        }
    }
}

/// Stored column content that cannot be decoded.
#[derive(Debug, Error)]
pub enum CodecError {
    #[error("column '{column}' holds malformed JSON: {source}")]
    MalformedJson {
        column: &'static str,
        source: serde_json::Error,
    },

    #[error("column '{column}' holds unknown value '{value}'. Valid values: {expected}")]
    UnknownVariant {
        column: &'static str,
        value: String,
        expected: String,
    },

    #[error("column '{column}' expected {expected} but found {found}")]
    UnexpectedType {
        column: &'static str,
        expected: &'static str,
        found: &'static str,
    },
}

impl CodecError {
    /// Name of the column whose content failed to decode.
    pub fn column(&self) -> &'static str {
        match self {
            Self::MalformedJson { column, .. }
            | Self::UnknownVariant { column, .. }
            | Self::UnexpectedType { column, .. } => column,
        }
    }
}

#[derive(Debug, Error)]
pub enum DaoError {
    #[error("plugin {id}: {source}")]
    Codec { id: RowRef, source: CodecError },

    #[error("plugin {id}: required field '{field}' is missing")]
    MissingRequiredField { field: &'static str, id: RowRef },

    #[error("plugin {id}: identifier has no usable timestamp: {source}")]
    InvalidIdentifier { id: Uuid, source: TimeUuidError },

    #[error("column '{0}' is not in the plugin schema")]
    UnknownColumn(String),

    #[error("Store error: {0}")]
    Store(String),
}

impl DaoError {
    pub(crate) fn codec(id: Option<Uuid>, source: CodecError) -> Self {
        tracing::warn!(column = source.column(), id = %RowRef(id), "Failed to decode column: {source}");
        Self::Codec {
            id: RowRef(id),
            source,
        }
    }

    pub(crate) fn missing(field: &'static str, id: Option<Uuid>) -> Self {
        Self::MissingRequiredField {
            field,
            id: RowRef(id),
        }
    }
}
