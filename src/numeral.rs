//! Literal parsing: `$5`, `5`, `$0x1f`, `0x1f`, `-3`.

use crate::error::AsmError;

/// Parse a numeral token. A leading `$` is optional and an empty remainder
/// reads as zero. Hex literals may use the full 64 bits.
pub fn parse(tok: &str) -> Result<i64, AsmError> {
    let body = tok.strip_prefix('$').unwrap_or(tok);
    if body.is_empty() {
        return Ok(0);
    }

    let parsed = match body.strip_prefix("0x").or_else(|| body.strip_prefix("0X")) {
        Some(hex) => u64::from_str_radix(hex, 16).map(|v| v as i64).ok(),
        None => body.parse::<i64>().ok(),
    };
    parsed.ok_or_else(|| AsmError::MalformedNumeral(tok.to_string()))
}

/// Two's-complement low 32 bits of `v`, rejecting values that need more.
pub fn to_u32(v: i64) -> Result<u32, AsmError> {
    if (i32::MIN as i64..=u32::MAX as i64).contains(&v) {
        Ok(v as u32)
    } else {
        Err(AsmError::ValueOutOfRange { value: v, bits: 32 })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn decimal_and_hex() {
        assert_eq!(parse("$5").unwrap(), 5);
        assert_eq!(parse("5").unwrap(), 5);
        assert_eq!(parse("$0x1f").unwrap(), 0x1f);
        assert_eq!(parse("0x100").unwrap(), 0x100);
        assert_eq!(parse("-12").unwrap(), -12);
        assert_eq!(parse("0xffffffffffffffff").unwrap(), -1);
    }

    #[test]
    fn empty_is_zero() {
        assert_eq!(parse("").unwrap(), 0);
        assert_eq!(parse("$").unwrap(), 0);
    }

    #[test]
    fn malformed() {
        assert_eq!(parse("12ab"), Err(AsmError::MalformedNumeral("12ab".into())));
        assert_eq!(parse("$0xzz"), Err(AsmError::MalformedNumeral("$0xzz".into())));
        assert_eq!(parse("0x"), Err(AsmError::MalformedNumeral("0x".into())));
    }

    #[test]
    fn word_range() {
        assert_eq!(to_u32(-1).unwrap(), 0xFFFF_FFFF);
        assert_eq!(to_u32(0xFFFF_FFFF).unwrap(), 0xFFFF_FFFF);
        assert_eq!(
            to_u32(0x1_0000_0000),
            Err(AsmError::ValueOutOfRange { value: 0x1_0000_0000, bits: 32 })
        );
    }
}
