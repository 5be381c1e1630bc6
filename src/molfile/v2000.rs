use crate::atom::Atom;
use crate::bond::BondOrder;
use crate::element::Element;
use crate::molfile::error::{malformed, unsupported, MolfileError};
use crate::molfile::{is_query_symbol, Table};

/// Fixed-column slice, trimmed. Short lines yield an empty field.
fn column(line: &str, start: usize, end: usize) -> &str {
    line.get(start..end.min(line.len())).unwrap_or("").trim()
}

fn number<T: std::str::FromStr>(field: &str, line: usize, what: &str) -> Result<T, MolfileError> {
    field
        .parse()
        .map_err(|_| malformed(line, format!("invalid {what} '{field}'")))
}

pub(super) fn read(text: &str) -> Result<Table, MolfileError> {
    let lines: Vec<&str> = text.lines().collect();
    if lines.len() < 4 {
        return Err(malformed(lines.len(), "header block truncated"));
    }

    // Counts line (line 4): aaabbblllfffcccsssxxxrrrpppiiimmmvvvvvv
    let counts = lines[3];
    let num_atoms: usize = number(column(counts, 0, 3), 4, "atom count")?;
    let num_bonds: usize = number(column(counts, 3, 6), 4, "bond count")?;

    let atom_start = 4;
    let bond_start = atom_start + num_atoms;
    let props_start = bond_start + num_bonds;
    if lines.len() < props_start {
        return Err(malformed(
            lines.len(),
            format!("expected {num_atoms} atoms and {num_bonds} bonds"),
        ));
    }

    let mut table = Table::default();
    for (i, line) in lines[atom_start..bond_start].iter().enumerate() {
        table.atoms.push(read_atom(line, atom_start + i + 1)?);
    }
    for (i, line) in lines[bond_start..props_start].iter().enumerate() {
        table.bonds.push(read_bond(line, bond_start + i + 1)?);
    }

    let mut saw_charge = false;
    for (i, line) in lines[props_start..].iter().enumerate() {
        let lineno = props_start + i + 1;
        if line.starts_with("M  END") {
            break;
        }
        if line.trim().is_empty() {
            continue;
        }
        if line.starts_with("M  CHG") {
            // Any CHG record supersedes every atom-block charge.
            if !saw_charge {
                for atom in &mut table.atoms {
                    atom.formal_charge = 0;
                }
                saw_charge = true;
            }
            for (atom, value) in property_pairs(line, lineno, table.atoms.len())? {
                table.atoms[atom].formal_charge = number(value, lineno, "charge")?;
            }
        } else if line.starts_with("M  ISO") {
            for (atom, value) in property_pairs(line, lineno, table.atoms.len())? {
                let mass: u16 = number(value, lineno, "isotope mass")?;
                if mass == 0 {
                    return Err(malformed(lineno, "isotope mass must be positive"));
                }
                table.atoms[atom].isotope = mass;
            }
        } else {
            return Err(unsupported(lineno, line.trim_end()));
        }
    }

    Ok(table)
}

// Columns: x(0..10) y(10..20) z(20..30) _ symbol(31..34) dd(34..36) ccc(36..39)
fn read_atom(line: &str, lineno: usize) -> Result<Atom, MolfileError> {
    let symbol = column(line, 31, 34);
    if is_query_symbol(symbol) {
        return Err(unsupported(lineno, line.trim_end()));
    }
    let element = Element::from_symbol(symbol)
        .ok_or_else(|| malformed(lineno, format!("unknown element '{symbol}'")))?;

    let mass_diff = column(line, 34, 36);
    if !mass_diff.is_empty() && number::<i8>(mass_diff, lineno, "mass difference")? != 0 {
        // Relative masses need a table of standard isotopes; M  ISO carries
        // the same information absolutely.
        return Err(unsupported(lineno, line.trim_end()));
    }

    let code = column(line, 36, 39);
    let formal_charge = match code {
        "" | "0" | "4" => 0,
        "1" => 3,
        "2" => 2,
        "3" => 1,
        "5" => -1,
        "6" => -2,
        "7" => -3,
        _ => return Err(malformed(lineno, format!("invalid charge code '{code}'"))),
    };

    Ok(Atom {
        element,
        formal_charge,
        isotope: 0,
    })
}

// Columns: atom1(0..3) atom2(3..6) type(6..9)
fn read_bond(line: &str, lineno: usize) -> Result<(usize, usize, BondOrder), MolfileError> {
    let a: usize = number(column(line, 0, 3), lineno, "bond atom")?;
    let b: usize = number(column(line, 3, 6), lineno, "bond atom")?;
    if a == 0 || b == 0 {
        return Err(malformed(lineno, "bond atom numbers are one-based"));
    }
    let code: u8 = number(column(line, 6, 9), lineno, "bond type")?;
    let order = BondOrder::from_molfile_code(code).ok_or_else(|| unsupported(lineno, line.trim_end()))?;
    Ok((a, b, order))
}

/// `M  XXX  n aaa vvv ...` as zero-based atom indices with their raw values.
fn property_pairs(line: &str, lineno: usize, atom_count: usize) -> Result<Vec<(usize, &str)>, MolfileError> {
    let parts: Vec<&str> = line.split_whitespace().collect();
    let count: usize = match parts.get(2) {
        Some(field) => number(field, lineno, "entry count")?,
        None => return Err(malformed(lineno, "property record without entry count")),
    };
    let fields = parts.len().saturating_sub(3);
    if fields % 2 != 0 || count.checked_mul(2) != Some(fields) {
        return Err(malformed(lineno, format!("expected {count} entries")));
    }
    parts[3..]
        .chunks(2)
        .map(|pair| {
            let atom: usize = number(pair[0], lineno, "atom number")?;
            if atom == 0 || atom > atom_count {
                return Err(malformed(lineno, format!("no atom {atom}")));
            }
            Ok((atom - 1, pair[1]))
        })
        .collect()
}
