use petgraph::graph::{EdgeIndex, NodeIndex, UnGraph};
use petgraph::visit::EdgeRef;

/// Structural errors raised while building a [`Mol`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum GraphError {
    /// A bond endpoint does not name an atom of this graph.
    #[error("atom index {index} does not exist (graph has {atom_count} atoms)")]
    InvalidReference { index: usize, atom_count: usize },
    /// The unordered atom pair is already bonded.
    #[error("atoms {a} and {b} are already bonded")]
    DuplicateEdge { a: usize, b: usize },
    /// Both endpoints name the same atom.
    #[error("atom {index} cannot be bonded to itself")]
    SelfLoop { index: usize },
}

/// A simple undirected molecular graph.
///
/// Atoms and bonds live in dense arenas and refer to each other through
/// [`NodeIndex`]/[`EdgeIndex`]. Indices are validated when a bond is added,
/// and the adjacency lists are maintained by the arena, so they always agree
/// with the bond set.
pub struct Mol<A, B> {
    graph: UnGraph<A, B>,
}

impl<A, B> Mol<A, B> {
    pub fn new() -> Self {
        Self {
            graph: UnGraph::default(),
        }
    }

    pub fn with_capacity(atoms: usize, bonds: usize) -> Self {
        Self {
            graph: UnGraph::with_capacity(atoms, bonds),
        }
    }

    pub fn atom(&self, idx: NodeIndex) -> &A {
        &self.graph[idx]
    }

    pub fn bond(&self, idx: EdgeIndex) -> &B {
        &self.graph[idx]
    }

    pub fn add_atom(&mut self, atom: A) -> NodeIndex {
        self.graph.add_node(atom)
    }

    /// Adds a bond between two existing, distinct, not yet bonded atoms.
    pub fn add_bond(&mut self, a: NodeIndex, b: NodeIndex, bond: B) -> Result<EdgeIndex, GraphError> {
        let atom_count = self.atom_count();
        for idx in [a, b] {
            if idx.index() >= atom_count {
                return Err(GraphError::InvalidReference {
                    index: idx.index(),
                    atom_count,
                });
            }
        }
        if a == b {
            return Err(GraphError::SelfLoop { index: a.index() });
        }
        if self.graph.find_edge(a, b).is_some() {
            return Err(GraphError::DuplicateEdge {
                a: a.index(),
                b: b.index(),
            });
        }
        Ok(self.graph.add_edge(a, b, bond))
    }

    /// For callers that already hold a simple graph, e.g. when permuting one.
    pub(crate) fn add_bond_unchecked(&mut self, a: NodeIndex, b: NodeIndex, bond: B) -> EdgeIndex {
        self.graph.add_edge(a, b, bond)
    }

    pub fn atom_count(&self) -> usize {
        self.graph.node_count()
    }

    pub fn bond_count(&self) -> usize {
        self.graph.edge_count()
    }

    pub fn degree(&self, idx: NodeIndex) -> usize {
        self.graph.edges(idx).count()
    }

    pub fn neighbors(&self, idx: NodeIndex) -> impl Iterator<Item = NodeIndex> + '_ {
        self.graph.neighbors(idx)
    }

    /// Adjacency view: `(neighbor, bond)` pairs incident to `idx`.
    pub fn neighbor_bonds(&self, idx: NodeIndex) -> impl Iterator<Item = (NodeIndex, EdgeIndex)> + '_ {
        self.graph.edges(idx).map(move |e| {
            let other = if e.source() == idx { e.target() } else { e.source() };
            (other, e.id())
        })
    }

    pub fn atoms(&self) -> impl Iterator<Item = NodeIndex> + '_ {
        self.graph.node_indices()
    }

    pub fn bonds(&self) -> impl Iterator<Item = EdgeIndex> + '_ {
        self.graph.edge_indices()
    }

    pub fn bond_between(&self, a: NodeIndex, b: NodeIndex) -> Option<EdgeIndex> {
        self.graph.find_edge(a, b)
    }

    pub fn bond_endpoints(&self, idx: EdgeIndex) -> Option<(NodeIndex, NodeIndex)> {
        self.graph.edge_endpoints(idx)
    }

    /// All bonds as `(a, b, payload)` triples in arena order.
    pub fn bond_triples(&self) -> impl Iterator<Item = (NodeIndex, NodeIndex, &B)> + '_ {
        self.graph
            .edge_references()
            .map(|e| (e.source(), e.target(), e.weight()))
    }
}

impl<A: Clone, B: Clone> Clone for Mol<A, B> {
    fn clone(&self) -> Self {
        Self {
            graph: self.graph.clone(),
        }
    }
}

impl<A, B> Default for Mol<A, B> {
    fn default() -> Self {
        Self::new()
    }
}

impl<A: PartialEq, B: PartialEq> PartialEq for Mol<A, B> {
    /// Index-wise equality: same atoms at the same indices and the same bonds
    /// in the same arena order. Isomorphic graphs with different numberings
    /// are *not* equal; compare canonical notations for that.
    fn eq(&self, other: &Self) -> bool {
        if self.atom_count() != other.atom_count() || self.bond_count() != other.bond_count() {
            return false;
        }
        if self.atoms().any(|idx| self.atom(idx) != other.atom(idx)) {
            return false;
        }
        self.bonds().all(|idx| {
            self.bond(idx) == other.bond(idx) && self.bond_endpoints(idx) == other.bond_endpoints(idx)
        })
    }
}

impl<A: std::fmt::Debug, B: std::fmt::Debug> std::fmt::Debug for Mol<A, B> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Mol")
            .field("atom_count", &self.atom_count())
            .field("bond_count", &self.bond_count())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::atom::Atom;
    use crate::bond::{Bond, BondOrder};
    use crate::element::Element;

    fn n(i: usize) -> NodeIndex {
        NodeIndex::new(i)
    }

    #[test]
    fn add_bond_rejects_missing_atom() {
        let mut mol = Mol::<Atom, Bond>::new();
        let a = mol.add_atom(Atom::new(Element::C));
        let err = mol.add_bond(a, n(5), Bond::default()).unwrap_err();
        assert_eq!(
            err,
            GraphError::InvalidReference {
                index: 5,
                atom_count: 1
            }
        );
        assert_eq!(mol.bond_count(), 0);
    }

    #[test]
    fn add_bond_rejects_duplicate_in_either_direction() {
        let mut mol = Mol::<Atom, Bond>::new();
        let a = mol.add_atom(Atom::new(Element::C));
        let b = mol.add_atom(Atom::new(Element::O));
        mol.add_bond(a, b, Bond::default()).unwrap();
        assert!(matches!(
            mol.add_bond(a, b, Bond::new(BondOrder::Double)),
            Err(GraphError::DuplicateEdge { .. })
        ));
        assert!(matches!(
            mol.add_bond(b, a, Bond::default()),
            Err(GraphError::DuplicateEdge { .. })
        ));
        assert_eq!(mol.bond_count(), 1);
    }

    #[test]
    fn add_bond_rejects_self_loop() {
        let mut mol = Mol::<Atom, Bond>::new();
        let a = mol.add_atom(Atom::new(Element::C));
        assert_eq!(
            mol.add_bond(a, a, Bond::default()),
            Err(GraphError::SelfLoop { index: 0 })
        );
    }

    #[test]
    fn neighbor_bonds_reports_other_endpoint() {
        let mut mol = Mol::<Atom, Bond>::new();
        let c = mol.add_atom(Atom::new(Element::C));
        let o = mol.add_atom(Atom::new(Element::O));
        let h = mol.add_atom(Atom::new(Element::H));
        let co = mol.add_bond(c, o, Bond::new(BondOrder::Double)).unwrap();
        let hc = mol.add_bond(h, c, Bond::default()).unwrap();

        let mut from_c: Vec<_> = mol.neighbor_bonds(c).collect();
        from_c.sort();
        assert_eq!(from_c, vec![(o, co), (h, hc)]);
        assert_eq!(mol.neighbor_bonds(h).collect::<Vec<_>>(), vec![(c, hc)]);
        assert_eq!(mol.degree(c), 2);
        assert_eq!(mol.degree(o), 1);
    }

    #[test]
    fn equality_is_index_wise() {
        let mut a = Mol::<Atom, Bond>::new();
        let a0 = a.add_atom(Atom::new(Element::C));
        let a1 = a.add_atom(Atom::new(Element::O));
        a.add_bond(a0, a1, Bond::default()).unwrap();

        let mut b = Mol::<Atom, Bond>::new();
        let b0 = b.add_atom(Atom::new(Element::O));
        let b1 = b.add_atom(Atom::new(Element::C));
        b.add_bond(b0, b1, Bond::default()).unwrap();

        assert_eq!(a, a.clone());
        assert_ne!(a, b);
    }
}
