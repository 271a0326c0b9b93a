use thiserror::Error;

#[derive(Debug, Error, PartialEq)]
pub enum AsmError {
    #[error("malformed numeral: `{0}`")]
    MalformedNumeral(String),

    #[error("unknown register: `{0}`")]
    UnknownRegister(String),

    #[error("unresolved symbol: `{0}`")]
    UnresolvedSymbol(String),

    #[error("duplicate label: `{0}`")]
    DuplicateLabel(String),

    #[error("bad operands for `{0}`")]
    BadOperands(String),

    #[error("value {value} does not fit in {bits} bits")]
    ValueOutOfRange { value: i64, bits: u32 },

    #[error(".align needs a positive argument, got {0}")]
    InvalidAlignment(i64),

    #[error("unrecognized line: `{0}`")]
    UnrecognizedLine(String),

    #[error("0x{addr:X} overlaps bytes already emitted by line {prev_line}")]
    Overlap { addr: u32, prev_line: usize },

    #[error("address/size overflow")]
    Overflow,

    #[error("line {line}: {source}")]
    AtLine {
        line: usize,
        source: Box<AsmError>,
    },
}

impl AsmError {
    /// Attach a 1-based source line number.
    pub fn at(self, line: usize) -> Self {
        match self {
            e @ AsmError::AtLine { .. } => e,
            e => AsmError::AtLine { line, source: Box::new(e) },
        }
    }

    /// The underlying error with any line context stripped.
    pub fn kind(&self) -> &AsmError {
        match self {
            AsmError::AtLine { source, .. } => source.kind(),
            e => e,
        }
    }

    pub fn line(&self) -> Option<usize> {
        match self {
            AsmError::AtLine { line, .. } => Some(*line),
            _ => None,
        }
    }
}
