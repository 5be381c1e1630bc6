use crate::element::Element;

/// Default atom type for a molecular graph node.
///
/// `Atom` stores only the labels the canonical notation carries: element,
/// formal charge and isotope. Coordinates, stereo parities and implicit
/// hydrogen counts are not part of the model.
///
/// # Examples
///
/// ```
/// use tucancrab::{Atom, Element};
///
/// let oxide = Atom::new(Element::O).with_charge(-1);
/// assert_eq!(oxide.element.symbol(), "O");
/// assert_eq!(oxide.formal_charge, -1);
/// assert_eq!(oxide.isotope, 0);
/// ```
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Atom {
    pub element: Element,
    /// Formal charge in elementary charge units.
    pub formal_charge: i8,
    /// Mass number. `0` means natural isotopic abundance (the common case).
    pub isotope: u16,
}

impl Atom {
    pub fn new(element: Element) -> Self {
        Self {
            element,
            formal_charge: 0,
            isotope: 0,
        }
    }

    pub fn with_charge(mut self, formal_charge: i8) -> Self {
        self.formal_charge = formal_charge;
        self
    }

    pub fn with_isotope(mut self, isotope: u16) -> Self {
        self.isotope = isotope;
        self
    }
}

impl crate::traits::HasAtomicNum for Atom {
    fn atomic_num(&self) -> u8 {
        self.element.atomic_num()
    }
}

impl crate::traits::HasFormalCharge for Atom {
    fn formal_charge(&self) -> i8 {
        self.formal_charge
    }
}

impl crate::traits::HasIsotope for Atom {
    fn isotope(&self) -> u16 {
        self.isotope
    }
}
