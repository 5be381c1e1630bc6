use petgraph::graph::NodeIndex;

use crate::atom::Atom;
use crate::bond::Bond;
use crate::graph_ops::renumber_atoms_canonical;
use crate::mol::Mol;

/// Writes `mol` in its current atom order: atom `i` gets rank `i + 1`.
///
/// Graphs without bonds write as the empty string, as do graphs without
/// atoms.
pub fn to_notation(mol: &Mol<Atom, Bond>) -> String {
    if mol.bond_count() == 0 {
        return String::new();
    }

    let mut out = format!("{}:{}/", mol.atom_count(), mol.bond_count());

    let atoms: Vec<String> = mol.atoms().map(|idx| atom_token(mol.atom(idx))).collect();
    out.push_str(&atoms.join(","));
    out.push('/');

    let mut bonds: Vec<(usize, usize, char)> = mol
        .bond_triples()
        .map(|(a, b, bond)| {
            let (lo, hi) = ordered(a, b);
            (lo, hi, bond.order.symbol())
        })
        .collect();
    bonds.sort_unstable();
    for (lo, hi, symbol) in bonds {
        out.push('(');
        out.push_str(&(lo + 1).to_string());
        out.push(symbol);
        out.push_str(&(hi + 1).to_string());
        out.push(')');
    }
    out
}

/// Canonicalizes `mol` and writes it. Isomorphic graphs write identically.
pub fn to_canonical_notation_of(mol: &Mol<Atom, Bond>) -> String {
    to_notation(&renumber_atoms_canonical(mol))
}

fn ordered(a: NodeIndex, b: NodeIndex) -> (usize, usize) {
    let (a, b) = (a.index(), b.index());
    (a.min(b), a.max(b))
}

pub(crate) fn atom_token(atom: &Atom) -> String {
    let mut token = String::new();
    if atom.isotope > 0 {
        token.push_str(&atom.isotope.to_string());
    }
    token.push_str(atom.element.symbol());
    if atom.formal_charge != 0 {
        if atom.formal_charge > 0 {
            token.push('+');
        }
        token.push_str(&atom.formal_charge.to_string());
    }
    token
}
