use petgraph::graph::NodeIndex;

use crate::canonical::{canonical_order, canonical_order_with, CanonConfig, CanonError};
use crate::mol::Mol;
use crate::traits::{AtomLabel, HasBondOrder};

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum RenumberError {
    #[error("new_order length {got} != atom count {expected}")]
    LengthMismatch { expected: usize, got: usize },
    #[error("new_order is not a valid permutation")]
    InvalidPermutation,
}

fn validate_permutation(new_order: &[usize], n: usize) -> Result<(), RenumberError> {
    if new_order.len() != n {
        return Err(RenumberError::LengthMismatch {
            expected: n,
            got: new_order.len(),
        });
    }
    let mut seen = vec![false; n];
    for &idx in new_order {
        if idx >= n || seen[idx] {
            return Err(RenumberError::InvalidPermutation);
        }
        seen[idx] = true;
    }
    Ok(())
}

/// Copies `mol` with its atoms relabeled: `new_order[new_idx] = old_idx`.
/// Bonds keep their arena order; only their endpoints are remapped.
pub fn renumber_atoms<A: Clone, B: Clone>(
    mol: &Mol<A, B>,
    new_order: &[usize],
) -> Result<Mol<A, B>, RenumberError> {
    let n = mol.atom_count();
    validate_permutation(new_order, n)?;
    Ok(permuted(mol, new_order))
}

fn permuted<A: Clone, B: Clone>(mol: &Mol<A, B>, new_order: &[usize]) -> Mol<A, B> {
    let mut new_mol = Mol::with_capacity(mol.atom_count(), mol.bond_count());
    for &old_idx in new_order {
        new_mol.add_atom(mol.atom(NodeIndex::new(old_idx)).clone());
    }

    // old_to_new[old_idx] = new_idx
    let mut old_to_new = vec![0usize; new_order.len()];
    for (new_idx, &old_idx) in new_order.iter().enumerate() {
        old_to_new[old_idx] = new_idx;
    }

    for (a, b, bond) in mol.bond_triples() {
        let new_a = NodeIndex::new(old_to_new[a.index()]);
        let new_b = NodeIndex::new(old_to_new[b.index()]);
        // A permutation of a simple graph is still simple.
        new_mol.add_bond_unchecked(new_a, new_b, bond.clone());
    }
    new_mol
}

/// The canonically numbered copy of `mol`: atom `i` of the result has
/// canonical rank `i`. The input is left untouched.
pub fn renumber_atoms_canonical<A, B>(mol: &Mol<A, B>) -> Mol<A, B>
where
    A: AtomLabel + Clone,
    B: HasBondOrder + Clone,
{
    permuted(mol, &canonical_order(mol))
}

/// [`renumber_atoms_canonical`] under a search budget.
pub fn renumber_atoms_canonical_with<A, B>(mol: &Mol<A, B>, config: &CanonConfig) -> Result<Mol<A, B>, CanonError>
where
    A: AtomLabel + Clone,
    B: HasBondOrder + Clone,
{
    Ok(permuted(mol, &canonical_order_with(mol, config)?))
}
