//! Canonical labeling of molecular graphs and a line notation built on it.
//!
//! ```
//! use tucancrab::{to_canonical_notation_of, Atom, Bond, BondOrder, Element, Mol};
//!
//! let mut mol = Mol::<Atom, Bond>::new();
//! let o = mol.add_atom(Atom::new(Element::O));
//! let c = mol.add_atom(Atom::new(Element::C));
//! mol.add_bond(o, c, Bond::new(BondOrder::Double)).unwrap();
//! assert_eq!(to_canonical_notation_of(&mol), "2:1/C,O/(1=2)");
//! ```

pub mod atom;
pub mod bond;
pub mod canonical;
pub mod convert;
pub mod element;
pub mod graph_ops;
pub mod invariant;
pub mod mol;
pub mod molfile;
pub mod notation;
pub mod partition;
pub mod traits;

pub use atom::Atom;
pub use bond::{Bond, BondOrder};
pub use canonical::{
    canonical_atoms, canonical_certificate, canonical_order, canonical_order_with, canonical_ordering,
    canonical_ordering_with, CanonConfig, CanonError, Certificate,
};
pub use convert::{
    canonicalize_notation, from_canonical_notation, to_canonical_notation,
    to_canonical_notation_with, ConvertError,
};
pub use element::{Element, UnknownElement};
pub use graph_ops::{renumber_atoms, renumber_atoms_canonical, renumber_atoms_canonical_with, RenumberError};
pub use invariant::{atom_invariant, atom_invariants, initial_partition, AtomInvariant};
pub use mol::{GraphError, Mol};
pub use molfile::{read_molfile, write_molfile, MolfileError};
pub use notation::{parse_notation, to_canonical_notation_of, to_notation, NotationError, Section};
pub use partition::Partition;
pub use traits::{AtomLabel, HasAtomicNum, HasBondOrder, HasFormalCharge, HasIsotope};
