//! y86asm – two-pass assembler for a Y86-style instruction set that emits a
//! textual `address: hex-bytes` object listing.
//!
//! The first pass classifies each line, tracks the location counter, binds
//! labels and encodes directives and instructions, leaving label operands as
//! pending fields. The second pass fills those in from the finished symbol
//! table, so labels may be used before they are defined.

pub mod directive;
pub mod emit;
pub mod encoder;
pub mod error;
pub mod lexer;
pub mod listing;
pub mod numeral;
pub mod parser;
pub mod symbols;

pub use error::AsmError;

/// Assembly switches; both off by default.
#[derive(Debug, Clone, Copy, Default)]
pub struct Options {
    /// Reject lines that are neither a directive nor an instruction.
    pub strict: bool,
    /// Reject records whose bytes overlap (only reachable through `.pos`).
    pub check_overlap: bool,
}

/// Assemble source lines into listing lines. Any error aborts the whole run
/// and nothing is returned.
pub fn assemble<I, S>(lines: I, opts: &Options) -> Result<Vec<String>, AsmError>
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    let pass1 = parser::first_pass(lines, opts)?;
    let resolved = parser::second_pass(&pass1, opts)?;
    Ok(listing::render(&resolved))
}
