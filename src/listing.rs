use std::io::{self, Write};

use crate::emit::Resolved;

/// `0x<addr>:    <bytes>`, address unpadded.
pub fn format_line(rec: &Resolved) -> String {
    format!("0x{:X}:    {}", rec.addr, rec)
}

/// One line per record, in emission order (not address order).
pub fn render(records: &[Resolved]) -> Vec<String> {
    records.iter().map(format_line).collect()
}

pub fn write_listing<W: Write>(mut out: W, lines: &[String]) -> io::Result<()> {
    for line in lines {
        writeln!(out, "{line}")?;
    }
    out.flush()
}
