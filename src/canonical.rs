//! Canonical atom ordering.
//!
//! Colors start from [`AtomInvariant`]s and are refined by neighborhood
//! until stable. Cells that refinement cannot split are resolved by an
//! individualize-and-refine search: every non-redundant member of the lowest
//! non-singleton cell is tried, and the discrete leaf with the smallest
//! [`Certificate`] wins. Two leaves with equal certificates differ by a graph
//! automorphism; those are collected and used to skip branches that are
//! images of ones already explored.

use std::convert::Infallible;

use petgraph::graph::NodeIndex;

use crate::bond::BondOrder;
use crate::invariant::{atom_invariants, initial_partition, AtomInvariant};
use crate::mol::Mol;
use crate::partition::Partition;
use crate::traits::{AtomLabel, HasBondOrder};

/// Knobs for [`canonical_ordering_with`].
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct CanonConfig {
    /// Upper bound on visited search-tree nodes. `None` searches to
    /// completion.
    pub max_search_nodes: Option<usize>,
}

impl CanonConfig {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_max_search_nodes(mut self, limit: usize) -> Self {
        self.max_search_nodes = Some(limit);
        self
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum CanonError {
    #[error("canonicalization exceeded its budget of {budget} search nodes")]
    Timeout { budget: usize },
}

/// Graph as seen through one labeling: atom keys in rank order, then bonds as
/// `(lower rank, higher rank, order)` sorted ascending.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord)]
pub struct Certificate {
    atoms: Vec<AtomInvariant>,
    bonds: Vec<(usize, usize, BondOrder)>,
}

impl Certificate {
    fn new<A, B: HasBondOrder>(mol: &Mol<A, B>, invariants: &[AtomInvariant], order: &[usize]) -> Self {
        let mut rank = vec![0usize; order.len()];
        for (r, &atom) in order.iter().enumerate() {
            rank[atom] = r;
        }
        let mut bonds: Vec<(usize, usize, BondOrder)> = mol
            .bond_triples()
            .map(|(a, b, bond)| {
                let (ra, rb) = (rank[a.index()], rank[b.index()]);
                (ra.min(rb), ra.max(rb), bond.bond_order())
            })
            .collect();
        bonds.sort_unstable();
        Self {
            atoms: order.iter().map(|&atom| invariants[atom]).collect(),
            bonds,
        }
    }
}

/// Ranks atoms canonically: `result[atom_index]` is the atom's position in
/// `0..n`. Isomorphic graphs get orderings under which they are identical.
pub fn canonical_ordering<A, B>(mol: &Mol<A, B>) -> Vec<usize>
where
    A: AtomLabel,
    B: HasBondOrder,
{
    match run(mol, Unbounded) {
        Ok(ranks) => ranks,
        Err(never) => match never {},
    }
}

/// Like [`canonical_ordering`], but gives up with [`CanonError::Timeout`] once
/// the configured search budget is spent.
pub fn canonical_ordering_with<A, B>(mol: &Mol<A, B>, config: &CanonConfig) -> Result<Vec<usize>, CanonError>
where
    A: AtomLabel,
    B: HasBondOrder,
{
    match config.max_search_nodes {
        Some(limit) => run(mol, NodeLimit { limit, used: 0 }),
        None => match run(mol, Unbounded) {
            Ok(ranks) => Ok(ranks),
            Err(never) => match never {},
        },
    }
}

trait Budget {
    type Error;

    fn spend(&mut self) -> Result<(), Self::Error>;
}

struct Unbounded;

impl Budget for Unbounded {
    type Error = Infallible;

    fn spend(&mut self) -> Result<(), Infallible> {
        Ok(())
    }
}

struct NodeLimit {
    limit: usize,
    used: usize,
}

impl Budget for NodeLimit {
    type Error = CanonError;

    fn spend(&mut self) -> Result<(), CanonError> {
        if self.used >= self.limit {
            return Err(CanonError::Timeout { budget: self.limit });
        }
        self.used += 1;
        Ok(())
    }
}

fn run<A, B, G>(mol: &Mol<A, B>, budget: G) -> Result<Vec<usize>, G::Error>
where
    A: AtomLabel,
    B: HasBondOrder,
    G: Budget,
{
    let n = mol.atom_count();
    if n == 0 {
        return Ok(Vec::new());
    }

    let invariants = atom_invariants(mol);
    let start = initial_partition(&invariants).refine(mol);

    let order = if start.is_discrete() {
        start.order()
    } else {
        let mut search = Search {
            mol,
            invariants: &invariants,
            budget,
            first: None,
            best: None,
            automorphisms: Vec::new(),
            visited: 0,
        };
        search.explore(&start, &mut Vec::new())?;
        log::debug!(
            "canonical search over {n} atoms: {} tree nodes, {} automorphisms",
            search.visited,
            search.automorphisms.len()
        );
        match search.best {
            Some(leaf) => leaf.order,
            None => start.order(),
        }
    };

    let mut ranks = vec![0usize; n];
    for (rank, &atom) in order.iter().enumerate() {
        ranks[atom] = rank;
    }
    Ok(ranks)
}

#[derive(Clone)]
struct Leaf {
    /// `order[rank]` is the atom at that rank.
    order: Vec<usize>,
    /// Atoms individualized on the way to this leaf.
    path: Vec<usize>,
    certificate: Certificate,
}

enum Flow {
    Continue,
    /// Unwind to the search node at this depth and move on to its next
    /// candidate.
    BackjumpTo(usize),
}

struct Search<'a, A, B, G> {
    mol: &'a Mol<A, B>,
    invariants: &'a [AtomInvariant],
    budget: G,
    first: Option<Leaf>,
    best: Option<Leaf>,
    automorphisms: Vec<Vec<usize>>,
    visited: usize,
}

impl<A, B, G> Search<'_, A, B, G>
where
    B: HasBondOrder,
    G: Budget,
{
    fn explore(&mut self, partition: &Partition, path: &mut Vec<usize>) -> Result<Flow, G::Error> {
        self.budget.spend()?;
        self.visited += 1;

        let Some(color) = partition.target_cell() else {
            return Ok(self.visit_leaf(partition, path));
        };

        let mut tried: Vec<usize> = Vec::new();
        for atom in partition.cell(color) {
            if self.in_explored_orbit(atom, &tried, path) {
                continue;
            }
            tried.push(atom);
            let child = partition.individualize(atom).refine(self.mol);
            path.push(atom);
            let flow = self.explore(&child, path)?;
            path.pop();
            if let Flow::BackjumpTo(depth) = flow {
                if depth < path.len() {
                    return Ok(flow);
                }
            }
        }
        Ok(Flow::Continue)
    }

    fn visit_leaf(&mut self, partition: &Partition, path: &[usize]) -> Flow {
        let order = partition.order();
        let certificate = Certificate::new(self.mol, self.invariants, &order);
        let leaf = Leaf {
            order,
            path: path.to_vec(),
            certificate,
        };

        if self.first.is_none() {
            self.first = Some(leaf.clone());
            self.best = Some(leaf);
            return Flow::Continue;
        }
        let (Some(first), Some(best)) = (&self.first, &self.best) else {
            return Flow::Continue;
        };

        let earlier = if leaf.certificate == first.certificate {
            Some(first)
        } else if leaf.certificate == best.certificate {
            Some(best)
        } else {
            None
        };
        if let Some(earlier) = earlier {
            if let Some((gamma, jump)) = automorphism_between(earlier, &leaf) {
                self.automorphisms.push(gamma);
                log::trace!("automorphism found, {} so far", self.automorphisms.len());
                if let Some(depth) = jump {
                    return Flow::BackjumpTo(depth);
                }
            }
            return Flow::Continue;
        }

        if leaf.certificate < best.certificate {
            self.best = Some(leaf);
        }
        Flow::Continue
    }

    /// True when some known automorphism fixing every atom on `path` maps
    /// `atom` to a candidate already tried at this node.
    fn in_explored_orbit(&self, atom: usize, tried: &[usize], path: &[usize]) -> bool {
        if tried.is_empty() {
            return false;
        }
        let n = self.mol.atom_count();
        let mut orbits = Orbits::new(n);
        for gamma in &self.automorphisms {
            if path.iter().all(|&v| gamma[v] == v) {
                for (i, &g) in gamma.iter().enumerate() {
                    orbits.union(i, g);
                }
            }
        }
        let root = orbits.find(atom);
        tried.iter().any(|&t| orbits.find(t) == root)
    }
}

/// The automorphism mapping `earlier` onto `leaf` (two leaves with equal
/// certificates), plus the depth to backjump to when it fixes the common path
/// prefix and maps `earlier`'s next choice onto `leaf`'s. In that case the
/// current subtree is an image of one already searched.
fn automorphism_between(earlier: &Leaf, leaf: &Leaf) -> Option<(Vec<usize>, Option<usize>)> {
    let n = leaf.order.len();
    let mut gamma = vec![0usize; n];
    for r in 0..n {
        gamma[earlier.order[r]] = leaf.order[r];
    }
    if gamma.iter().enumerate().all(|(i, &g)| i == g) {
        return None;
    }

    let common = earlier
        .path
        .iter()
        .zip(&leaf.path)
        .take_while(|(a, b)| a == b)
        .count();
    let fixes_prefix = earlier.path[..common].iter().all(|&v| gamma[v] == v);
    let maps_branch = match (earlier.path.get(common), leaf.path.get(common)) {
        (Some(&from), Some(&to)) => gamma[from] == to,
        _ => false,
    };
    let jump = (fixes_prefix && maps_branch).then_some(common);
    Some((gamma, jump))
}

/// Union-find over atom indices.
struct Orbits {
    parent: Vec<usize>,
}

impl Orbits {
    fn new(n: usize) -> Self {
        Self {
            parent: (0..n).collect(),
        }
    }

    fn find(&mut self, x: usize) -> usize {
        let mut root = x;
        while self.parent[root] != root {
            root = self.parent[root];
        }
        let mut cur = x;
        while self.parent[cur] != root {
            let next = self.parent[cur];
            self.parent[cur] = root;
            cur = next;
        }
        root
    }

    fn union(&mut self, a: usize, b: usize) {
        let (ra, rb) = (self.find(a), self.find(b));
        if ra != rb {
            self.parent[ra.max(rb)] = ra.min(rb);
        }
    }
}

fn invert(ranks: &[usize]) -> Vec<usize> {
    let mut order = vec![0usize; ranks.len()];
    for (atom, &rank) in ranks.iter().enumerate() {
        order[rank] = atom;
    }
    order
}

/// The atom permutation `new_order[rank] = atom` for the canonical ordering.
pub fn canonical_order<A, B>(mol: &Mol<A, B>) -> Vec<usize>
where
    A: AtomLabel,
    B: HasBondOrder,
{
    invert(&canonical_ordering(mol))
}

/// [`canonical_order`] under a search budget.
pub fn canonical_order_with<A, B>(mol: &Mol<A, B>, config: &CanonConfig) -> Result<Vec<usize>, CanonError>
where
    A: AtomLabel,
    B: HasBondOrder,
{
    Ok(invert(&canonical_ordering_with(mol, config)?))
}

/// The graph as seen through its canonical ordering. Two graphs are
/// isomorphic exactly when their certificates are equal.
pub fn canonical_certificate<A, B>(mol: &Mol<A, B>) -> Certificate
where
    A: AtomLabel,
    B: HasBondOrder,
{
    Certificate::new(mol, &atom_invariants(mol), &canonical_order(mol))
}

/// Atom indices ordered by canonical rank, as [`NodeIndex`]es.
pub fn canonical_atoms<A, B>(mol: &Mol<A, B>) -> Vec<NodeIndex>
where
    A: AtomLabel,
    B: HasBondOrder,
{
    canonical_order(mol).into_iter().map(NodeIndex::new).collect()
}
