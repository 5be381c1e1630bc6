use petgraph::graph::NodeIndex;

use crate::mol::Mol;
use crate::partition::Partition;
use crate::traits::AtomLabel;

/// Local, numbering-independent description of one atom.
///
/// Field order is the comparison order: element first, then charge, isotope
/// and degree.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct AtomInvariant {
    pub atomic_num: u8,
    pub formal_charge: i8,
    pub isotope: u16,
    pub degree: usize,
}

pub fn atom_invariant<A: AtomLabel, B>(mol: &Mol<A, B>, idx: NodeIndex) -> AtomInvariant {
    let atom = mol.atom(idx);
    AtomInvariant {
        atomic_num: atom.atomic_num(),
        formal_charge: atom.formal_charge(),
        isotope: atom.isotope(),
        degree: mol.degree(idx),
    }
}

/// Invariants for every atom, indexed by node index.
pub fn atom_invariants<A: AtomLabel, B>(mol: &Mol<A, B>) -> Vec<AtomInvariant> {
    mol.atoms().map(|idx| atom_invariant(mol, idx)).collect()
}

/// Starting partition for refinement: atoms with equal invariants share a
/// color, and colors follow invariant order.
pub fn initial_partition(invariants: &[AtomInvariant]) -> Partition {
    Partition::from_keys(invariants)
}
