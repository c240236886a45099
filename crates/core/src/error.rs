//! Error types for rowsmith.
//!
//! Every variant here is an operation-level failure: the whole call is
//! abandoned and nothing partial stays visible. Per-field problems are not
//! errors; the marshaller records them as issues and carries on.

use crate::types::PropertyKind;
use core::fmt;

/// Result type alias for rowsmith operations.
pub type Result<T> = core::result::Result<T, Error>;

/// Operation-level failures.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Error {
    /// Missing, empty or mistyped entry-point arguments.
    InvalidArguments {
        message: String,
    },
    /// No registration exists for the logical table name.
    TableNotConfigured {
        table: String,
    },
    /// The registered path does not resolve to a table.
    TableNotFound {
        table: String,
        path: String,
    },
    /// The table exists but has no row schema.
    SchemaNotFound {
        table: String,
    },
    /// The allocator could not provide scratch memory.
    AllocationFailed {
        schema: String,
        size: usize,
    },
    /// The template row named by the registration is missing.
    TemplateRowNotFound {
        table: String,
        row: String,
    },
    /// The table refused the new row.
    RowInsertFailed {
        table: String,
        row: String,
        reason: String,
    },
    /// An existing row was expected but not found.
    RowNotFound {
        table: String,
        row: String,
    },
    /// A property name did not resolve in the row schema.
    PropertyNotFound {
        schema: String,
        property: String,
    },
    /// A property exists but has the wrong kind for the operation.
    PropertyKindMismatch {
        property: String,
        expected: PropertyKind,
        got: PropertyKind,
    },
    /// Invalid schema definition.
    InvalidSchema {
        message: String,
    },
    /// Invalid operation.
    InvalidOperation {
        message: String,
    },
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Error::InvalidArguments { message } => {
                write!(f, "Invalid arguments: {}", message)
            }
            Error::TableNotConfigured { table } => {
                write!(f, "Table not configured: {}", table)
            }
            Error::TableNotFound { table, path } => {
                write!(f, "Table {} not found at path {}", table, path)
            }
            Error::SchemaNotFound { table } => {
                write!(f, "Row schema not found for table {}", table)
            }
            Error::AllocationFailed { schema, size } => {
                write!(f, "Failed to allocate {} bytes for {}", size, schema)
            }
            Error::TemplateRowNotFound { table, row } => {
                write!(f, "Template row {} not found in table {}", row, table)
            }
            Error::RowInsertFailed { table, row, reason } => {
                write!(f, "Failed to insert row {} into table {}: {}", row, table, reason)
            }
            Error::RowNotFound { table, row } => {
                write!(f, "Row {} not found in table {}", row, table)
            }
            Error::PropertyNotFound { schema, property } => {
                write!(f, "Property {} not found in {}", property, schema)
            }
            Error::PropertyKindMismatch { property, expected, got } => {
                write!(
                    f,
                    "Property {} has kind {:?}, expected {:?}",
                    property, got, expected
                )
            }
            Error::InvalidSchema { message } => {
                write!(f, "Invalid schema: {}", message)
            }
            Error::InvalidOperation { message } => {
                write!(f, "Invalid operation: {}", message)
            }
        }
    }
}

impl std::error::Error for Error {}

impl Error {
    /// Creates an invalid arguments error.
    pub fn invalid_arguments(message: impl Into<String>) -> Self {
        Error::InvalidArguments {
            message: message.into(),
        }
    }

    /// Creates a table not configured error.
    pub fn table_not_configured(table: impl Into<String>) -> Self {
        Error::TableNotConfigured { table: table.into() }
    }

    /// Creates a table not found error.
    pub fn table_not_found(table: impl Into<String>, path: impl Into<String>) -> Self {
        Error::TableNotFound {
            table: table.into(),
            path: path.into(),
        }
    }

    /// Creates a schema not found error.
    pub fn schema_not_found(table: impl Into<String>) -> Self {
        Error::SchemaNotFound { table: table.into() }
    }

    /// Creates an allocation failure error.
    pub fn allocation_failed(schema: impl Into<String>, size: usize) -> Self {
        Error::AllocationFailed {
            schema: schema.into(),
            size,
        }
    }

    /// Creates a template row not found error.
    pub fn template_row_not_found(table: impl Into<String>, row: impl Into<String>) -> Self {
        Error::TemplateRowNotFound {
            table: table.into(),
            row: row.into(),
        }
    }

    /// Creates a row insert failure error.
    pub fn row_insert_failed(
        table: impl Into<String>,
        row: impl Into<String>,
        reason: impl Into<String>,
    ) -> Self {
        Error::RowInsertFailed {
            table: table.into(),
            row: row.into(),
            reason: reason.into(),
        }
    }

    /// Creates a row not found error.
    pub fn row_not_found(table: impl Into<String>, row: impl Into<String>) -> Self {
        Error::RowNotFound {
            table: table.into(),
            row: row.into(),
        }
    }

    /// Creates a property not found error.
    pub fn property_not_found(schema: impl Into<String>, property: impl Into<String>) -> Self {
        Error::PropertyNotFound {
            schema: schema.into(),
            property: property.into(),
        }
    }

    /// Creates a property kind mismatch error.
    pub fn property_kind_mismatch(
        property: impl Into<String>,
        expected: PropertyKind,
        got: PropertyKind,
    ) -> Self {
        Error::PropertyKindMismatch {
            property: property.into(),
            expected,
            got,
        }
    }

    /// Creates an invalid schema error.
    pub fn invalid_schema(message: impl Into<String>) -> Self {
        Error::InvalidSchema {
            message: message.into(),
        }
    }

    /// Creates an invalid operation error.
    pub fn invalid_operation(message: impl Into<String>) -> Self {
        Error::InvalidOperation {
            message: message.into(),
        }
    }
}
