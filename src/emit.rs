//! Emission records, placeholder resolution and the optional overlap check.

use std::fmt;

use crate::{error::AsmError, symbols::SymbolTable};

/// Hex digits taken by a pending label reference.
pub const SYM_DIGITS: u8 = 8;

/// A resolved field rendered as exactly `digits` uppercase hex digits.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Lit {
    pub value: u64,
    pub digits: u8,
}

impl Lit {
    pub fn nibble(v: u8) -> Self { Lit { value: (v & 0xF) as u64, digits: 1 } }
    pub fn byte(v: u8)   -> Self { Lit { value: v as u64, digits: 2 } }
    pub fn word(v: u32)  -> Self { Lit { value: v as u64, digits: 8 } }
    pub fn quad(v: u64)  -> Self { Lit { value: v, digits: 16 } }
}

impl fmt::Display for Lit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:0w$X}", self.value, w = self.digits as usize)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Field {
    Lit(Lit),
    /// Label reference, filled in by [`resolve`].
    Sym(String),
}

impl Field {
    fn digits(&self) -> u32 {
        match self {
            Field::Lit(l) => l.digits as u32,
            Field::Sym(_) => SYM_DIGITS as u32,
        }
    }
}

impl fmt::Display for Field {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Field::Lit(l) => write!(f, "{l}"),
            Field::Sym(name) => write!(f, "#{name}#"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Record {
    /// 1-based source line that produced this record.
    pub line: usize,
    pub addr: u32,
    pub fields: Vec<Field>,
}

impl Record {
    /// Size in bytes.
    pub(crate) fn len(&self) -> u32 {
        self.fields.iter().map(Field::digits).sum::<u32>() / 2
    }
}

impl fmt::Display for Record {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.fields.iter().try_for_each(|field| write!(f, "{field}"))
    }
}

/// A record with every label reference replaced by its address.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Resolved {
    pub addr: u32,
    pub fields: Vec<Lit>,
}

impl fmt::Display for Resolved {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.fields.iter().try_for_each(|lit| write!(f, "{lit}"))
    }
}

/// Replace every pending reference with the label's address. Runs only after
/// the whole source has been scanned, so forward references resolve.
pub fn resolve(records: &[Record], syms: &SymbolTable) -> Result<Vec<Resolved>, AsmError> {
    records
        .iter()
        .map(|rec| {
            let fields = rec
                .fields
                .iter()
                .map(|field| match field {
                    Field::Lit(l) => Ok(*l),
                    Field::Sym(name) => syms
                        .get(name)
                        .map(Lit::word)
                        .ok_or_else(|| AsmError::UnresolvedSymbol(name.clone()).at(rec.line)),
                })
                .collect::<Result<Vec<_>, _>>()?;
            Ok(Resolved { addr: rec.addr, fields })
        })
        .collect()
}

/// Fail if any two records claim the same byte. Records are only ever placed
/// on top of each other through `.pos`, which is otherwise unchecked.
pub fn check_overlaps(records: &[Record]) -> Result<(), AsmError> {
    let mut spans: Vec<(u64, u64, usize)> = records
        .iter()
        .map(|r| (r.addr as u64, r.addr as u64 + r.len() as u64, r.line))
        .collect();
    spans.sort_by_key(|&(start, _, line)| (start, line));

    let mut reach: Option<(u64, usize)> = None;
    for (start, end, line) in spans {
        if let Some((prev_end, prev_line)) = reach {
            if start < prev_end {
                return Err(AsmError::Overlap { addr: start as u32, prev_line }.at(line));
            }
        }
        reach = Some((end, line));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn rec(line: usize, addr: u32, fields: Vec<Field>) -> Record {
        Record { line, addr, fields }
    }

    #[test]
    fn length_counts_pending_fields() {
        let r = rec(1, 0, vec![Field::Lit(Lit::byte(0x70)), Field::Sym("loop".into())]);
        assert_eq!(r.len(), 5);
        assert_eq!(r.to_string(), "70#loop#");
    }

    #[test]
    fn literal_widths() {
        assert_eq!(Lit::word(5).to_string(), "00000005");
        assert_eq!(Lit::quad(0xABC).to_string(), "0000000000000ABC");
        assert_eq!(Lit::nibble(0xF).to_string(), "F");
    }

    #[test]
    fn resolves_forward_reference() {
        let mut syms = SymbolTable::new();
        syms.define("done", 0x1C).unwrap();
        let recs = vec![rec(1, 0, vec![Field::Lit(Lit::byte(0x80)), Field::Sym("done".into())])];
        let out = resolve(&recs, &syms).unwrap();
        assert_eq!(out[0].to_string(), "800000001C");
    }

    #[test]
    fn missing_symbol_is_fatal() {
        let recs = vec![rec(4, 0, vec![Field::Lit(Lit::byte(0x80)), Field::Sym("nowhere".into())])];
        let err = resolve(&recs, &SymbolTable::new()).unwrap_err();
        assert_eq!(err.line(), Some(4));
        assert_eq!(err.kind(), &AsmError::UnresolvedSymbol("nowhere".into()));
    }

    #[test]
    fn overlap_detected_only_when_bytes_collide() {
        let a = rec(1, 0x10, vec![Field::Lit(Lit::word(1))]);
        let b = rec(2, 0x14, vec![Field::Lit(Lit::word(2))]);
        assert!(check_overlaps(&[a.clone(), b]).is_ok());

        let c = rec(3, 0x12, vec![Field::Lit(Lit::byte(0))]);
        let err = check_overlaps(&[a, c]).unwrap_err();
        assert_eq!(err.line(), Some(3));
        assert_eq!(err.kind(), &AsmError::Overlap { addr: 0x12, prev_line: 1 });
    }
}
