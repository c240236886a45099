//! Field-level issues: writes that were skipped without failing the row.

use core::fmt;
use rowsmith_core::PropertyKind;

/// Why a field write was skipped.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum IssueReason {
    /// No field of that name exists in the record or nested struct.
    UnknownField,
    /// A table key that is not a string where a field name or map key was
    /// expected.
    NonStringKey { key: &'static str },
    /// The dynamic value has the wrong shape for the destination kind.
    KindMismatch {
        expected: PropertyKind,
        got: &'static str,
    },
    /// An object path that does not name a live object.
    UnresolvedObject { path: String },
    /// A map whose key/value types cannot be populated; it is left empty.
    UnsupportedMap { key: PropertyKind, value: PropertyKind },
}

/// A skipped write and the location it was meant for.
///
/// Paths are dotted for struct members and indexed for container entries:
/// `Stats.Damage`, `Tags[0]`, `Recipes[Iron].Count`.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct FieldIssue {
    pub path: String,
    pub reason: IssueReason,
}

impl FieldIssue {
    pub fn new(path: impl Into<String>, reason: IssueReason) -> Self {
        Self {
            path: path.into(),
            reason,
        }
    }
}

impl fmt::Display for IssueReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            IssueReason::UnknownField => write!(f, "unknown field"),
            IssueReason::NonStringKey { key } => write!(f, "{} key is not a string", key),
            IssueReason::KindMismatch { expected, got } => {
                write!(f, "expected value for {}, got {}", expected.type_name(), got)
            }
            IssueReason::UnresolvedObject { path } => write!(f, "object not found: {}", path),
            IssueReason::UnsupportedMap { key, value } => write!(
                f,
                "unsupported map TMap<{}, {}>",
                key.type_name(),
                value.type_name()
            ),
        }
    }
}

impl fmt::Display for FieldIssue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.path, self.reason)
    }
}
