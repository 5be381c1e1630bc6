use crate::atom::Atom;
use crate::bond::Bond;
use crate::mol::Mol;

/// Writes `mol` as a V3000 Molfile in its current atom order. Coordinates are
/// all zero.
pub fn write_molfile(mol: &Mol<Atom, Bond>) -> String {
    let mut out = String::new();
    out.push('\n');
    out.push_str("  tucancrab\n");
    out.push('\n');
    out.push_str("  0  0  0     0  0            999 V3000\n");
    out.push_str("M  V30 BEGIN CTAB\n");
    out.push_str(&format!(
        "M  V30 COUNTS {} {} 0 0 0\n",
        mol.atom_count(),
        mol.bond_count()
    ));

    out.push_str("M  V30 BEGIN ATOM\n");
    for idx in mol.atoms() {
        let atom = mol.atom(idx);
        out.push_str(&format!(
            "M  V30 {} {} 0.0000 0.0000 0.0000 0",
            idx.index() + 1,
            atom.element.symbol()
        ));
        if atom.formal_charge != 0 {
            out.push_str(&format!(" CHG={}", atom.formal_charge));
        }
        if atom.isotope != 0 {
            out.push_str(&format!(" MASS={}", atom.isotope));
        }
        out.push('\n');
    }
    out.push_str("M  V30 END ATOM\n");

    if mol.bond_count() > 0 {
        out.push_str("M  V30 BEGIN BOND\n");
        for (i, (a, b, bond)) in mol.bond_triples().enumerate() {
            out.push_str(&format!(
                "M  V30 {} {} {} {}\n",
                i + 1,
                bond.order.molfile_code(),
                a.index() + 1,
                b.index() + 1
            ));
        }
        out.push_str("M  V30 END BOND\n");
    }

    out.push_str("M  V30 END CTAB\n");
    out.push_str("M  END\n");
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::bond::BondOrder;
    use crate::element::Element;

    #[test]
    fn writes_charges_and_masses_only_when_set() {
        let mut mol = Mol::new();
        let c = mol.add_atom(Atom::new(Element::C).with_isotope(13));
        let o = mol.add_atom(Atom::new(Element::O).with_charge(-1));
        mol.add_bond(c, o, Bond::new(BondOrder::Double)).unwrap();
        let text = write_molfile(&mol);
        let lines: Vec<&str> = text.lines().collect();
        assert!(lines[3].ends_with("V3000"));
        assert_eq!(lines[5], "M  V30 COUNTS 2 1 0 0 0");
        assert_eq!(lines[7], "M  V30 1 C 0.0000 0.0000 0.0000 0 MASS=13");
        assert_eq!(lines[8], "M  V30 2 O 0.0000 0.0000 0.0000 0 CHG=-1");
        assert_eq!(lines[11], "M  V30 1 2 1 2");
        assert_eq!(lines.last(), Some(&"M  END"));
    }

    #[test]
    fn bondless_graph_has_no_bond_block() {
        let mut mol = Mol::new();
        mol.add_atom(Atom::new(Element::C));
        let text = write_molfile(&mol);
        assert!(!text.contains("BEGIN BOND"));
        assert!(text.contains("M  V30 COUNTS 1 0 0 0 0"));
    }
}
