use crate::mol::GraphError;

/// Errors produced when reading a Molfile. Line numbers are one-based.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum MolfileError {
    /// A well-formed record this reader does not translate (query atoms,
    /// query bonds, S-groups, radicals and the like).
    #[error("line {line}: unsupported record '{record}'")]
    UnsupportedRecord { line: usize, record: String },
    /// Text that is not a valid Molfile.
    #[error("line {line}: {reason}")]
    MalformedInput { line: usize, reason: String },
    /// Bonds that do not form a simple graph over the atom block.
    #[error(transparent)]
    Graph(#[from] GraphError),
}

pub(crate) fn malformed(line: usize, reason: impl Into<String>) -> MolfileError {
    MolfileError::MalformedInput {
        line,
        reason: reason.into(),
    }
}

pub(crate) fn unsupported(line: usize, record: impl Into<String>) -> MolfileError {
    MolfileError::UnsupportedRecord {
        line,
        record: record.into(),
    }
}
