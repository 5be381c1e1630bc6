//! The line notation: a header, the atoms in rank order, then the bonds.
//!
//! ```text
//! 3:2/C,C,O/(1-2)(2-3)
//! ```
//!
//! Ranks in bond records are one-based. The canonical writer lists each bond
//! lower rank first and sorts the records; the parser also accepts other
//! well-formed orderings so that a hand-written notation can be normalized
//! with [`crate::canonicalize_notation`].

pub mod error;
mod parser;
mod writer;

use petgraph::graph::NodeIndex;

use crate::atom::Atom;
use crate::bond::Bond;
use crate::mol::Mol;
pub use error::{NotationError, Section};
pub use writer::{to_canonical_notation_of, to_notation};

/// Parses a notation string into a graph whose atom `i` has rank `i + 1`.
/// The empty string parses to the empty graph.
pub fn parse_notation(s: &str) -> Result<Mol<Atom, Bond>, NotationError> {
    let trimmed = s.trim();
    if trimmed.is_empty() {
        return Ok(Mol::new());
    }
    let parsed = parser::parse(trimmed)?;

    let mut mol = Mol::with_capacity(parsed.atoms.len(), parsed.bonds.len());
    for atom in parsed.atoms {
        mol.add_atom(atom);
    }
    for (a, b, order) in parsed.bonds {
        mol.add_bond(NodeIndex::new(a), NodeIndex::new(b), Bond::new(order))?;
    }
    Ok(mol)
}
