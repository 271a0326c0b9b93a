//! `.pos`, `.align`, `.long` and `.quad`.

use crate::{
    emit::{Field, Lit},
    error::AsmError,
    numeral,
};

/// A directive and its raw numeral argument.
#[derive(Debug, Clone, PartialEq)]
pub enum Directive {
    Pos(String),
    Align(String),
    Long(String),
    Quad(String),
}

impl Directive {
    /// Apply the directive at location `pc`. Placement directives move `pc`
    /// and emit nothing; data directives return their fields and leave the
    /// advance to the caller.
    pub fn eval(&self, pc: &mut u32) -> Result<Option<Vec<Field>>, AsmError> {
        match self {
            Directive::Pos(arg) => {
                let v = numeral::parse(arg)?;
                *pc = u32::try_from(v).map_err(|_| AsmError::ValueOutOfRange { value: v, bits: 32 })?;
                Ok(None)
            }
            Directive::Align(arg) => {
                let v = numeral::parse(arg)?;
                let align = u32::try_from(v)
                    .ok()
                    .filter(|&a| a > 0)
                    .ok_or(AsmError::InvalidAlignment(v))?;
                *pc = pc.checked_next_multiple_of(align).ok_or(AsmError::Overflow)?;
                Ok(None)
            }
            Directive::Long(arg) => {
                let v = numeral::to_u32(numeral::parse(arg)?)?;
                Ok(Some(vec![Field::Lit(Lit::word(v))]))
            }
            Directive::Quad(arg) => {
                let v = numeral::parse(arg)?;
                Ok(Some(vec![Field::Lit(Lit::quad(v as u64))]))
            }
        }
    }
}
