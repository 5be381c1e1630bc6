use crate::bond::BondOrder;

pub trait HasAtomicNum {
    fn atomic_num(&self) -> u8;
}

pub trait HasFormalCharge {
    fn formal_charge(&self) -> i8;
}

pub trait HasIsotope {
    fn isotope(&self) -> u16;
}

pub trait HasBondOrder {
    fn bond_order(&self) -> BondOrder;
}

/// Everything the canonicalizer reads from an atom payload.
pub trait AtomLabel: HasAtomicNum + HasFormalCharge + HasIsotope {}

impl<T: HasAtomicNum + HasFormalCharge + HasIsotope> AtomLabel for T {}
