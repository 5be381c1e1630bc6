use std::fmt;

use crate::mol::GraphError;

/// The three `/`-separated parts of a notation string.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Section {
    Header,
    Atoms,
    Bonds,
}

impl fmt::Display for Section {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Section::Header => "header",
            Section::Atoms => "atom",
            Section::Bonds => "bond",
        };
        f.write_str(name)
    }
}

/// Errors produced when parsing a notation string. Every variant describes
/// malformed input; see [`NotationError::is_malformed`].
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum NotationError {
    /// The string ended before the named section.
    #[error("missing {0} section")]
    MissingSection(Section),
    /// Text followed the bond section.
    #[error("unexpected text after bond section: '{text}'")]
    TrailingSection { text: String },
    /// A header count is not a plain decimal number.
    #[error("invalid count '{text}' in header")]
    InvalidCount { text: String },
    /// The header disagrees with what the atom or bond section lists.
    #[error("header declares {declared} {section}s but {found} are listed")]
    CountMismatch {
        section: Section,
        declared: usize,
        found: usize,
    },
    /// An atom token does not match `[mass]Symbol[charge]`.
    #[error("invalid atom token '{text}' at rank {rank}")]
    InvalidAtom { rank: usize, text: String },
    /// An atom token names no known element.
    #[error("unknown element '{symbol}' at rank {rank}")]
    UnknownElement { rank: usize, symbol: String },
    /// A bond record does not match `(rank symbol rank)`.
    #[error("invalid bond record '{text}'")]
    InvalidBond { text: String },
    /// A bond names a rank outside `1..=atom count`.
    #[error("rank {rank} out of range 1..={atom_count}")]
    RankOutOfRange { rank: usize, atom_count: usize },
    /// Bond records that do not form a simple graph.
    #[error(transparent)]
    Graph(#[from] GraphError),
}

impl NotationError {
    /// Input the codec could not accept. Parsing has no other failure kind, so
    /// this is true for every variant.
    pub fn is_malformed(&self) -> bool {
        true
    }
}
