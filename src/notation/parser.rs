use crate::atom::Atom;
use crate::bond::BondOrder;
use crate::element::Element;
use crate::notation::error::{NotationError, Section};

pub(super) struct Parsed {
    pub atoms: Vec<Atom>,
    /// `(a, b, order)` with zero-based atom indices, in input order.
    pub bonds: Vec<(usize, usize, BondOrder)>,
}

pub(super) fn parse(input: &str) -> Result<Parsed, NotationError> {
    let (header, rest) = input
        .split_once('/')
        .ok_or(NotationError::MissingSection(Section::Atoms))?;
    let (atom_text, bond_text) = rest
        .split_once('/')
        .ok_or(NotationError::MissingSection(Section::Bonds))?;
    if let Some((_, trailing)) = bond_text.split_once('/') {
        return Err(NotationError::TrailingSection {
            text: trailing.to_string(),
        });
    }

    let (atom_count, bond_count) = parse_header(header)?;

    let atoms = parse_atoms(atom_text)?;
    if atoms.len() != atom_count {
        return Err(NotationError::CountMismatch {
            section: Section::Atoms,
            declared: atom_count,
            found: atoms.len(),
        });
    }

    let bonds = parse_bonds(bond_text, atom_count)?;
    if bonds.len() != bond_count {
        return Err(NotationError::CountMismatch {
            section: Section::Bonds,
            declared: bond_count,
            found: bonds.len(),
        });
    }

    Ok(Parsed { atoms, bonds })
}

/// Plain decimal without sign or leading zeros.
fn parse_number(text: &str) -> Option<usize> {
    if text.is_empty() || !text.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    if text.len() > 1 && text.starts_with('0') {
        return None;
    }
    text.parse().ok()
}

fn parse_header(header: &str) -> Result<(usize, usize), NotationError> {
    let invalid = |text: &str| NotationError::InvalidCount {
        text: text.to_string(),
    };
    let (atoms, bonds) = header.split_once(':').ok_or_else(|| invalid(header))?;
    let atom_count = parse_number(atoms).ok_or_else(|| invalid(atoms))?;
    let bond_count = parse_number(bonds).ok_or_else(|| invalid(bonds))?;
    Ok((atom_count, bond_count))
}

fn parse_atoms(text: &str) -> Result<Vec<Atom>, NotationError> {
    if text.is_empty() {
        return Ok(Vec::new());
    }
    text.split(',')
        .enumerate()
        .map(|(i, token)| parse_atom(i + 1, token))
        .collect()
}

fn parse_atom(rank: usize, text: &str) -> Result<Atom, NotationError> {
    let invalid = || NotationError::InvalidAtom {
        rank,
        text: text.to_string(),
    };

    let symbol_start = text.find(|c: char| !c.is_ascii_digit()).ok_or_else(invalid)?;
    let (mass, rest) = text.split_at(symbol_start);
    let isotope = if mass.is_empty() {
        0
    } else {
        parse_number(mass)
            .and_then(|m| u16::try_from(m).ok())
            .filter(|&m| m > 0)
            .ok_or_else(invalid)?
    };

    if !rest.starts_with(|c: char| c.is_ascii_uppercase()) {
        return Err(invalid());
    }
    let symbol_end = rest
        .char_indices()
        .skip(1)
        .find(|(_, c)| !c.is_ascii_lowercase())
        .map_or(rest.len(), |(i, _)| i);
    let (symbol, charge) = rest.split_at(symbol_end);
    let element = Element::from_symbol(symbol).ok_or_else(|| NotationError::UnknownElement {
        rank,
        symbol: symbol.to_string(),
    })?;
    let formal_charge = parse_charge(charge).ok_or_else(invalid)?;

    Ok(Atom {
        element,
        formal_charge,
        isotope,
    })
}

/// `""`, or a sign followed by a nonzero magnitude.
fn parse_charge(text: &str) -> Option<i8> {
    if text.is_empty() {
        return Some(0);
    }
    let (sign, digits) = match text.as_bytes()[0] {
        b'+' => (1i64, &text[1..]),
        b'-' => (-1i64, &text[1..]),
        _ => return None,
    };
    let magnitude = parse_number(digits).filter(|&m| m > 0)?;
    let magnitude = i64::try_from(magnitude).ok()?;
    i8::try_from(sign * magnitude).ok()
}

fn parse_bonds(text: &str, atom_count: usize) -> Result<Vec<(usize, usize, BondOrder)>, NotationError> {
    let invalid = |text: &str| NotationError::InvalidBond {
        text: text.to_string(),
    };

    let mut bonds = Vec::new();
    let mut rest = text;
    while !rest.is_empty() {
        let body = rest.strip_prefix('(').ok_or_else(|| invalid(rest))?;
        let end = body.find(')').ok_or_else(|| invalid(rest))?;
        let record = &rest[..end + 2];
        bonds.push(parse_bond(record, &body[..end], atom_count)?);
        rest = &body[end + 1..];
    }
    Ok(bonds)
}

fn parse_bond(record: &str, inner: &str, atom_count: usize) -> Result<(usize, usize, BondOrder), NotationError> {
    let invalid = || NotationError::InvalidBond {
        text: record.to_string(),
    };

    let split = inner.find(|c: char| !c.is_ascii_digit()).ok_or_else(invalid)?;
    let (lhs, rest) = inner.split_at(split);
    let mut chars = rest.chars();
    let symbol = chars.next().ok_or_else(invalid)?;
    let order = BondOrder::from_symbol(symbol).ok_or_else(invalid)?;
    let rhs = chars.as_str();

    let a = parse_rank(lhs, atom_count).ok_or_else(invalid)??;
    let b = parse_rank(rhs, atom_count).ok_or_else(invalid)??;
    Ok((a, b, order))
}

/// `None` when `text` is not a number at all; `Some(Err)` when it is one but
/// names no atom.
fn parse_rank(text: &str, atom_count: usize) -> Option<Result<usize, NotationError>> {
    let rank = parse_number(text)?;
    if rank == 0 || rank > atom_count {
        return Some(Err(NotationError::RankOutOfRange { rank, atom_count }));
    }
    Some(Ok(rank - 1))
}
