//! Text-to-text entry points: Molfile to canonical notation and back.

use crate::canonical::{CanonConfig, CanonError};
use crate::graph_ops::renumber_atoms_canonical_with;
use crate::molfile::{read_molfile, write_molfile, MolfileError};
use crate::notation::{parse_notation, to_canonical_notation_of, to_notation, NotationError};

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ConvertError {
    #[error(transparent)]
    Molfile(#[from] MolfileError),
    #[error(transparent)]
    Notation(#[from] NotationError),
    #[error(transparent)]
    Canon(#[from] CanonError),
}

/// Canonical notation of the structure in a Molfile.
///
/// Empty input, and structures without atoms or without bonds, give the empty
/// string.
pub fn to_canonical_notation(molfile: &str) -> Result<String, ConvertError> {
    to_canonical_notation_with(molfile, &CanonConfig::default())
}

/// Like [`to_canonical_notation`] with a search budget.
pub fn to_canonical_notation_with(molfile: &str, config: &CanonConfig) -> Result<String, ConvertError> {
    if molfile.trim().is_empty() {
        log::debug!("empty molfile, empty notation");
        return Ok(String::new());
    }
    let mol = read_molfile(molfile)?;
    if mol.bond_count() == 0 {
        log::debug!("{} atoms without bonds, empty notation", mol.atom_count());
        return Ok(String::new());
    }

    let canonical = renumber_atoms_canonical_with(&mol, config)?;
    Ok(to_notation(&canonical))
}

/// V3000 Molfile of a notation string, atoms in notation order. Empty input
/// gives the empty string.
pub fn from_canonical_notation(notation: &str) -> Result<String, ConvertError> {
    if notation.trim().is_empty() {
        return Ok(String::new());
    }
    let mol = parse_notation(notation)?;
    Ok(write_molfile(&mol))
}

/// Canonical form of any well-formed notation, e.g. one with its atoms listed
/// in another order.
pub fn canonicalize_notation(notation: &str) -> Result<String, ConvertError> {
    let mol = parse_notation(notation)?;
    let canonical = to_canonical_notation_of(&mol);
    if canonical != notation.trim() {
        log::debug!("notation was not canonical: '{}' -> '{canonical}'", notation.trim());
    }
    Ok(canonical)
}
