//! Ordered vertex partitions and the pure transitions the canonicalizer
//! applies to them.
//!
//! A partition assigns every atom a *color*. Colors are canonical by
//! construction: an atom's color is the number of atoms whose key sorts
//! strictly before its own, i.e. the start position of its cell in the
//! ordered partition. Atoms sharing a color form a cell. A partition is
//! discrete when every cell is a singleton, at which point the colors are
//! exactly the ranks `0..n`.

use petgraph::graph::NodeIndex;

use crate::bond::BondOrder;
use crate::mol::Mol;
use crate::traits::HasBondOrder;

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Partition {
    colors: Vec<usize>,
}

impl Partition {
    /// Ranks `keys` so that equal keys share a color and colors follow key
    /// order.
    pub fn from_keys<K: Ord>(keys: &[K]) -> Self {
        let n = keys.len();
        let mut indices: Vec<usize> = (0..n).collect();
        indices.sort_by(|&a, &b| keys[a].cmp(&keys[b]));
        let mut colors = vec![0usize; n];
        for i in 1..n {
            colors[indices[i]] = if keys[indices[i]] == keys[indices[i - 1]] {
                colors[indices[i - 1]]
            } else {
                i
            };
        }
        Self { colors }
    }

    /// Builds a partition from arbitrary per-atom labels, normalizing them to
    /// cell start positions.
    pub fn from_colors(colors: &[usize]) -> Self {
        Self::from_keys(colors)
    }

    pub fn colors(&self) -> &[usize] {
        &self.colors
    }

    pub fn color(&self, atom: usize) -> usize {
        self.colors[atom]
    }

    pub fn len(&self) -> usize {
        self.colors.len()
    }

    pub fn is_empty(&self) -> bool {
        self.colors.is_empty()
    }

    pub fn cell_count(&self) -> usize {
        let mut sorted = self.colors.clone();
        sorted.sort_unstable();
        sorted.dedup();
        sorted.len()
    }

    pub fn is_discrete(&self) -> bool {
        self.cell_count() == self.len()
    }

    /// Members of the cell with the given color, ascending by atom index.
    pub fn cell(&self, color: usize) -> Vec<usize> {
        (0..self.len()).filter(|&i| self.colors[i] == color).collect()
    }

    /// Lowest color shared by more than one atom.
    pub fn target_cell(&self) -> Option<usize> {
        let mut sizes = vec![0usize; self.len()];
        for &c in &self.colors {
            sizes[c] += 1;
        }
        sizes.iter().position(|&size| size > 1)
    }

    /// Splits `atom` off its cell. The atom keeps the cell's start color and
    /// the remaining members move to the next position, so the result is
    /// still normalized.
    pub fn individualize(&self, atom: usize) -> Partition {
        let color = self.colors[atom];
        let colors = self
            .colors
            .iter()
            .enumerate()
            .map(|(i, &c)| if c == color && i != atom { c + 1 } else { c })
            .collect();
        Partition { colors }
    }

    /// One refinement round: every atom's signature is its own color plus the
    /// sorted multiset of `(neighbor color, bond order)`. Cells only ever
    /// split, never merge, because the own color leads the signature.
    pub fn refine_once<A, B: HasBondOrder>(&self, mol: &Mol<A, B>) -> Partition {
        let signatures: Vec<(usize, Vec<(usize, BondOrder)>)> = (0..self.len())
            .map(|i| {
                let mut around: Vec<(usize, BondOrder)> = mol
                    .neighbor_bonds(NodeIndex::new(i))
                    .map(|(nb, edge)| (self.colors[nb.index()], mol.bond(edge).bond_order()))
                    .collect();
                around.sort_unstable();
                (self.colors[i], around)
            })
            .collect();
        Partition::from_keys(&signatures)
    }

    /// Refines until the number of cells stops growing. Terminates after at
    /// most `n` rounds since each productive round adds a cell.
    pub fn refine<A, B: HasBondOrder>(&self, mol: &Mol<A, B>) -> Partition {
        let mut current = self.clone();
        let mut cells = current.cell_count();
        for round in 0..self.len() {
            if cells == current.len() {
                break;
            }
            let next = current.refine_once(mol);
            let next_cells = next.cell_count();
            log::trace!("refinement round {round}: {cells} -> {next_cells} cells");
            if next_cells <= cells {
                break;
            }
            current = next;
            cells = next_cells;
        }
        current
    }

    /// Atoms listed by color. For a discrete partition this maps rank to atom
    /// index; ties keep ascending atom order.
    pub fn order(&self) -> Vec<usize> {
        let mut order: Vec<usize> = (0..self.len()).collect();
        order.sort_by_key(|&i| self.colors[i]);
        order
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::atom::Atom;
    use crate::bond::{Bond, BondOrder};
    use crate::element::Element;

    fn path(len: usize) -> Mol<Atom, Bond> {
        let mut mol = Mol::new();
        let atoms: Vec<_> = (0..len).map(|_| mol.add_atom(Atom::new(Element::C))).collect();
        for w in atoms.windows(2) {
            mol.add_bond(w[0], w[1], Bond::default()).unwrap();
        }
        mol
    }

    fn ring(len: usize) -> Mol<Atom, Bond> {
        let mut mol = path(len);
        mol.add_bond(NodeIndex::new(len - 1), NodeIndex::new(0), Bond::default())
            .unwrap();
        mol
    }

    #[test]
    fn from_keys_uses_cell_start_positions() {
        let p = Partition::from_keys(&["b", "a", "b", "c", "a"]);
        assert_eq!(p.colors(), &[2, 0, 2, 4, 0]);
        assert_eq!(p.cell_count(), 3);
        assert_eq!(p.cell(2), vec![0, 2]);
        assert_eq!(p.target_cell(), Some(0));
    }

    #[test]
    fn from_colors_normalizes() {
        let p = Partition::from_colors(&[7, 7, 3]);
        assert_eq!(p.colors(), &[1, 1, 0]);
    }

    #[test]
    fn empty_partition_is_discrete() {
        let p = Partition::from_colors(&[]);
        assert!(p.is_empty());
        assert!(p.is_discrete());
        assert_eq!(p.target_cell(), None);
    }

    #[test]
    fn individualize_keeps_partition_normalized() {
        let p = Partition::from_colors(&[0, 0, 0, 3]);
        let q = p.individualize(1);
        assert_eq!(q.colors(), &[1, 0, 1, 3]);
        assert_eq!(q, Partition::from_colors(q.colors()));
        assert_eq!(q.target_cell(), Some(1));
    }

    #[test]
    fn refine_splits_path_by_distance_from_end() {
        let mol = path(5);
        let p = Partition::from_colors(&[0; 5]).refine(&mol);
        // ends, then their neighbours, then the centre
        assert_eq!(p.colors(), &[0, 2, 4, 2, 0]);
    }

    #[test]
    fn refine_cannot_split_a_ring() {
        let mol = ring(6);
        let p = Partition::from_colors(&[0; 6]).refine(&mol);
        assert_eq!(p.cell_count(), 1);
    }

    #[test]
    fn refine_after_individualization_splits_ring_into_mirror_pairs() {
        let mol = ring(6);
        let p = Partition::from_colors(&[0; 6]).individualize(0).refine(&mol);
        // atom 0 alone; 1/5, 2/4 stay paired by the mirror symmetry; 3 alone
        assert_eq!(p.cell_count(), 4);
        assert_eq!(p.color(1), p.color(5));
        assert_eq!(p.color(2), p.color(4));
        assert_ne!(p.color(0), p.color(3));
    }

    #[test]
    fn refine_uses_bond_orders() {
        let mut mol = Mol::<Atom, Bond>::new();
        let a = mol.add_atom(Atom::new(Element::C));
        let b = mol.add_atom(Atom::new(Element::C));
        let c = mol.add_atom(Atom::new(Element::C));
        mol.add_bond(a, b, Bond::default()).unwrap();
        mol.add_bond(b, c, Bond::new(BondOrder::Double)).unwrap();
        let p = Partition::from_colors(&[0, 1, 0]).refine(&mol);
        assert!(p.is_discrete());
    }

    #[test]
    fn refine_is_a_pure_function_of_input() {
        let mol = path(4);
        let start = Partition::from_colors(&[0; 4]);
        let once = start.refine(&mol);
        assert_eq!(once, start.refine(&mol));
        assert_eq!(once.refine(&mol), once);
    }

    #[test]
    fn order_lists_atoms_by_color() {
        let p = Partition::from_colors(&[2, 0, 1]);
        assert_eq!(p.order(), vec![1, 2, 0]);
    }
}
