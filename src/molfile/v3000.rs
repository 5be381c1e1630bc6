use std::collections::HashMap;

use crate::atom::Atom;
use crate::bond::BondOrder;
use crate::element::Element;
use crate::mol::GraphError;
use crate::molfile::error::{malformed, unsupported, MolfileError};
use crate::molfile::{is_query_symbol, Table};

/// One `M  V30` record with continuations joined, tagged with the line it
/// starts on.
struct Record {
    line: usize,
    text: String,
}

fn records(text: &str) -> Result<Vec<Record>, MolfileError> {
    let mut records = Vec::new();
    let mut pending: Option<Record> = None;
    for (i, line) in text.lines().enumerate().skip(4) {
        let lineno = i + 1;
        if line.starts_with("M  END") {
            break;
        }
        let Some(content) = line.strip_prefix("M  V30 ") else {
            if pending.is_some() {
                return Err(malformed(lineno, "continued record not completed"));
            }
            if line.trim().is_empty() {
                continue;
            }
            return Err(unsupported(lineno, line.trim_end()));
        };
        let content = content.trim_end();
        let (content, continues) = match content.strip_suffix('-') {
            Some(head) => (head, true),
            None => (content, false),
        };
        let record = match pending.take() {
            Some(mut record) => {
                record.text.push_str(content);
                record
            }
            None => Record {
                line: lineno,
                text: content.to_string(),
            },
        };
        if continues {
            pending = Some(record);
        } else {
            records.push(record);
        }
    }
    if let Some(record) = pending {
        return Err(malformed(record.line, "continued record not completed"));
    }
    Ok(records)
}

#[derive(Clone, Copy, PartialEq, Eq)]
enum Block {
    Outside,
    Ctab,
    Atom,
    Bond,
    Collection,
}

pub(super) fn read(text: &str) -> Result<Table, MolfileError> {
    let mut table = Table::default();
    let mut ids: HashMap<usize, usize> = HashMap::new();
    let mut counts: Option<(usize, usize, usize)> = None;
    let mut block = Block::Outside;
    let mut ctab_closed = false;

    for record in records(text)? {
        let words: Vec<&str> = record.text.split_whitespace().collect();
        let line = record.line;
        match (block, words.as_slice()) {
            (Block::Outside, ["BEGIN", "CTAB"]) if !ctab_closed => block = Block::Ctab,
            (Block::Ctab, ["COUNTS", na, nb, ..]) => {
                let na = na.parse().map_err(|_| malformed(line, format!("invalid atom count '{na}'")))?;
                let nb = nb.parse().map_err(|_| malformed(line, format!("invalid bond count '{nb}'")))?;
                counts = Some((na, nb, line));
            }
            (Block::Ctab, ["BEGIN", "ATOM"]) => block = Block::Atom,
            (Block::Ctab, ["BEGIN", "BOND"]) => block = Block::Bond,
            (Block::Ctab, ["BEGIN", "COLLECTION"]) => {
                log::debug!("line {line}: skipping COLLECTION block");
                block = Block::Collection;
            }
            (Block::Ctab, ["BEGIN", _, ..]) => return Err(unsupported(line, record.text.as_str())),
            (Block::Ctab, ["END", "CTAB"]) => {
                block = Block::Outside;
                ctab_closed = true;
            }
            (Block::Atom, ["END", "ATOM"]) | (Block::Bond, ["END", "BOND"]) | (Block::Collection, ["END", "COLLECTION"]) => {
                block = Block::Ctab;
            }
            (Block::Atom, fields) => {
                let (id, atom) = read_atom(fields, line)?;
                if ids.insert(id, table.atoms.len()).is_some() {
                    return Err(malformed(line, format!("duplicate atom id {id}")));
                }
                table.atoms.push(atom);
            }
            (Block::Bond, fields) => {
                let (a, b, order) = read_bond(fields, line)?;
                let resolve = |id: usize| {
                    ids.get(&id).map(|&idx| idx + 1).ok_or(GraphError::InvalidReference {
                        index: id,
                        atom_count: table.atoms.len(),
                    })
                };
                let bond = (resolve(a)?, resolve(b)?, order);
                table.bonds.push(bond);
            }
            (Block::Collection, _) => {}
            (Block::Outside, ["BEGIN", kind, ..]) if *kind != "CTAB" => {
                return Err(unsupported(line, record.text.as_str()))
            }
            _ => return Err(malformed(line, format!("unexpected record '{}'", record.text))),
        }
    }

    if block != Block::Outside || !ctab_closed {
        return Err(malformed(text.lines().count(), "connection table not closed"));
    }
    let Some((num_atoms, num_bonds, line)) = counts else {
        return Err(malformed(4, "missing COUNTS record"));
    };
    if table.atoms.len() != num_atoms {
        return Err(malformed(
            line,
            format!("expected {num_atoms} atoms, found {}", table.atoms.len()),
        ));
    }
    if table.bonds.len() != num_bonds {
        return Err(malformed(
            line,
            format!("expected {num_bonds} bonds, found {}", table.bonds.len()),
        ));
    }
    Ok(table)
}

/// `index type x y z aamap [KEYWORD=value ...]`
fn read_atom(fields: &[&str], line: usize) -> Result<(usize, Atom), MolfileError> {
    if fields.len() < 6 {
        return Err(malformed(line, "atom record too short"));
    }
    let id: usize = fields[0]
        .parse()
        .map_err(|_| malformed(line, format!("invalid atom index '{}'", fields[0])))?;
    let symbol = fields[1];
    if is_query_symbol(symbol) || symbol.starts_with('[') || symbol.starts_with("NOT") {
        return Err(unsupported(line, fields.join(" ")));
    }
    let element = Element::from_symbol(symbol)
        .ok_or_else(|| malformed(line, format!("unknown element '{symbol}'")))?;

    let mut atom = Atom::new(element);
    for field in &fields[6..] {
        if let Some(value) = field.strip_prefix("CHG=") {
            atom.formal_charge = value
                .parse()
                .map_err(|_| malformed(line, format!("invalid CHG value '{value}'")))?;
        } else if let Some(value) = field.strip_prefix("MASS=") {
            atom.isotope = value
                .parse()
                .map_err(|_| malformed(line, format!("invalid MASS value '{value}'")))?;
        } else if field.starts_with("RAD=") && *field != "RAD=0" {
            return Err(unsupported(line, fields.join(" ")));
        }
    }
    Ok((id, atom))
}

/// `index type atom1 atom2 [KEYWORD=value ...]`, atoms by their record index.
fn read_bond(fields: &[&str], line: usize) -> Result<(usize, usize, BondOrder), MolfileError> {
    if fields.len() < 4 {
        return Err(malformed(line, "bond record too short"));
    }
    let field = |i: usize, what: &str| -> Result<usize, MolfileError> {
        fields[i]
            .parse()
            .map_err(|_| malformed(line, format!("invalid {what} '{}'", fields[i])))
    };
    let code = field(1, "bond type")?;
    let a = field(2, "bond atom")?;
    let b = field(3, "bond atom")?;
    let order = u8::try_from(code)
        .ok()
        .and_then(BondOrder::from_molfile_code)
        .ok_or_else(|| unsupported(line, fields.join(" ")))?;
    Ok((a, b, order))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn continuation_lines_are_joined() {
        let text = "\n\n\n  0  0  0     0  0            999 V3000\nM  V30 BEGIN CTAB\nM  V30 COUNTS 1 0 -\nM  V30 0 0 0\nM  END\n";
        let records = records(text).unwrap();
        assert_eq!(records.len(), 2);
        assert_eq!(records[1].text, "COUNTS 1 0 0 0 0");
        assert_eq!(records[1].line, 6);
    }

    #[test]
    fn dangling_continuation() {
        let text = "\n\n\n  0  0  0     0  0            999 V3000\nM  V30 COUNTS 1 -\nM  END\n";
        assert!(matches!(
            records(text),
            Err(MolfileError::MalformedInput { line: 5, .. })
        ));
    }

    #[test]
    fn atom_keywords() {
        let (id, atom) = read_atom(&["7", "C", "0", "0", "0", "0", "CHG=-1", "MASS=13", "CFG=2"], 9).unwrap();
        assert_eq!(id, 7);
        assert_eq!(atom, Atom::new(Element::C).with_charge(-1).with_isotope(13));
    }

    #[test]
    fn radicals_unsupported() {
        assert!(matches!(
            read_atom(&["1", "C", "0", "0", "0", "0", "RAD=2"], 5),
            Err(MolfileError::UnsupportedRecord { line: 5, .. })
        ));
        assert!(read_atom(&["1", "C", "0", "0", "0", "0", "RAD=0"], 5).is_ok());
    }

    #[test]
    fn query_atoms_and_bonds_unsupported() {
        for symbol in ["A", "Q", "*", "[C,N]", "R#"] {
            assert!(matches!(
                read_atom(&["1", symbol, "0", "0", "0", "0"], 3),
                Err(MolfileError::UnsupportedRecord { .. })
            ));
        }
        assert!(matches!(
            read_bond(&["1", "8", "1", "2"], 3),
            Err(MolfileError::UnsupportedRecord { .. })
        ));
    }
}
