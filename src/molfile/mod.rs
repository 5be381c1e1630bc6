//! Molfile (CTfile) connection tables: a V2000 and V3000 reader and a V3000
//! writer. Only atoms, charges, isotopes and bond orders are translated;
//! coordinates and stereo flags are dropped.

pub mod error;
mod v2000;
mod v3000;
mod writer;

use petgraph::graph::NodeIndex;

use crate::atom::Atom;
use crate::bond::{Bond, BondOrder};
use crate::mol::Mol;
pub use error::MolfileError;
pub use writer::write_molfile;

/// Atom and bond blocks as read, before graph construction. Bond endpoints
/// are one-based positions in `atoms`.
#[derive(Debug, Default)]
struct Table {
    atoms: Vec<Atom>,
    bonds: Vec<(usize, usize, BondOrder)>,
}

/// Query and pseudo-atom symbols, which name no element.
fn is_query_symbol(symbol: &str) -> bool {
    matches!(symbol, "A" | "Q" | "*" | "L" | "LP" | "R#" | "AH" | "QH" | "X" | "XH" | "M" | "MH")
}

/// The version stamp closes the counts line, the fourth line of the header.
fn is_v3000(text: &str) -> bool {
    text.lines()
        .nth(3)
        .is_some_and(|counts| counts.trim_end().ends_with("V3000"))
}

/// Reads one Molfile, V2000 or V3000 by its counts line.
pub fn read_molfile(text: &str) -> Result<Mol<Atom, Bond>, MolfileError> {
    let table = if is_v3000(text) {
        v3000::read(text)?
    } else {
        v2000::read(text)?
    };
    log::debug!(
        "read molfile: {} atoms, {} bonds",
        table.atoms.len(),
        table.bonds.len()
    );

    let mut mol = Mol::with_capacity(table.atoms.len(), table.bonds.len());
    for atom in table.atoms {
        mol.add_atom(atom);
    }
    for (a, b, order) in table.bonds {
        mol.add_bond(NodeIndex::new(a - 1), NodeIndex::new(b - 1), Bond::new(order))?;
    }
    Ok(mol)
}
