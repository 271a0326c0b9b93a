//! Label name → address table. Names are case-insensitive.

use std::collections::HashMap;

use crate::error::AsmError;

#[derive(Debug, Default)]
pub struct SymbolTable {
    labels: HashMap<String, u32>,
}

impl SymbolTable {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn define(&mut self, name: &str, addr: u32) -> Result<(), AsmError> {
        let key = name.to_ascii_lowercase();
        if self.labels.contains_key(&key) {
            return Err(AsmError::DuplicateLabel(key));
        }
        self.labels.insert(key, addr);
        Ok(())
    }

    pub fn get(&self, name: &str) -> Option<u32> {
        self.labels.get(&name.to_ascii_lowercase()).copied()
    }

    pub(crate) fn len(&self) -> usize {
        self.labels.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn lookup_ignores_case() {
        let mut syms = SymbolTable::new();
        syms.define("Loop", 0x20).unwrap();
        assert_eq!(syms.get("LOOP"), Some(0x20));
        assert_eq!(syms.get("done"), None);
    }

    #[test]
    fn duplicate_rejected() {
        let mut syms = SymbolTable::new();
        syms.define("x", 0).unwrap();
        assert_eq!(syms.define("X", 4), Err(AsmError::DuplicateLabel("x".into())));
        assert_eq!(syms.get("x"), Some(0));
    }
}
