//! Two-way lookup between protocol bytes and their symbolic names.

use std::borrow::Cow;
use std::collections::HashMap;

use crate::error::{Result, SchemaError};

/// Bidirectional mapping between small integers and symbolic names.
///
/// Lookups are O(1) in both directions: a 256-slot array for byte→name and
/// a hash map for name→byte. Decoding a byte with no mapping yields its
/// uppercase two-digit hex rendering instead of failing, so every byte has
/// a defined decode. Encoding an unknown name has no such fallback; the codec
/// treats it as a hard error so corrupt frames are never sent.
pub struct ConstantTable {
    name: &'static str,
    by_byte: [Option<&'static str>; 256],
    by_name: HashMap<&'static str, u8>,
}

impl ConstantTable {
    /// Build a table from `(byte, name)` entries.
    ///
    /// Rejects empty tables and duplicate bytes or names.
    pub fn new(name: &'static str, entries: &[(u8, &'static str)]) -> Result<Self> {
        if entries.is_empty() {
            return Err(SchemaError::EmptyTable { table: name });
        }

        let mut by_byte = [None; 256];
        let mut by_name = HashMap::with_capacity(entries.len());

        for &(byte, value) in entries {
            if by_byte[byte as usize].replace(value).is_some() {
                return Err(SchemaError::DuplicateConstant {
                    table: name,
                    entry: format!("byte {byte:#04x}"),
                });
            }
            if by_name.insert(value, byte).is_some() {
                return Err(SchemaError::DuplicateConstant {
                    table: name,
                    entry: format!("name '{value}'"),
                });
            }
        }

        Ok(Self {
            name,
            by_byte,
            by_name,
        })
    }

    /// The table's own name, used in error messages.
    pub fn name(&self) -> &'static str {
        self.name
    }

    /// The symbolic name for a byte, or its hex rendering when unmapped.
    pub fn name_of(&self, byte: u8) -> Cow<'static, str> {
        match self.by_byte[byte as usize] {
            Some(name) => Cow::Borrowed(name),
            None => Cow::Owned(format!("{byte:02X}")),
        }
    }

    /// Whether a byte has a declared name.
    pub fn is_mapped(&self, byte: u8) -> bool {
        self.by_byte[byte as usize].is_some()
    }

    /// The byte for a symbolic name, if declared.
    pub fn byte_of(&self, name: &str) -> Option<u8> {
        self.by_name.get(name).copied()
    }

    /// Number of declared entries.
    pub fn len(&self) -> usize {
        self.by_name.len()
    }

    /// Whether the table has no entries (never true for a constructed table).
    pub fn is_empty(&self) -> bool {
        self.by_name.is_empty()
    }

    /// Iterate declared `(byte, name)` pairs in byte order.
    pub fn iter(&self) -> impl Iterator<Item = (u8, &'static str)> + '_ {
        self.by_byte
            .iter()
            .enumerate()
            .filter_map(|(byte, name)| name.map(|n| (byte as u8, n)))
    }
}

impl std::fmt::Debug for ConstantTable {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ConstantTable")
            .field("name", &self.name)
            .field("entries", &self.len())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn alarm_types() -> ConstantTable {
        ConstantTable::new(
            "zwaveAlarmType",
            &[(0x01, "SMOKE"), (0x02, "CO"), (0x03, "CO2")],
        )
        .unwrap()
    }

    #[test]
    fn test_both_directions() {
        let table = alarm_types();
        assert_eq!(table.name_of(0x02), "CO");
        assert_eq!(table.byte_of("CO"), Some(0x02));
    }

    #[test]
    fn test_unmapped_byte_falls_back_to_hex() {
        let table = alarm_types();
        assert_eq!(table.name_of(0x7F), "7F");
        assert_eq!(table.name_of(0x0B), "0B");
        assert!(!table.is_mapped(0x7F));
        assert!(table.is_mapped(0x01));
    }

    #[test]
    fn test_unknown_name_has_no_byte() {
        let table = alarm_types();
        assert_eq!(table.byte_of("VOLCANO"), None);
    }

    #[test]
    fn test_rejects_duplicate_byte() {
        let result = ConstantTable::new("t", &[(0x01, "A"), (0x01, "B")]);
        assert!(matches!(
            result,
            Err(SchemaError::DuplicateConstant { .. })
        ));
    }

    #[test]
    fn test_rejects_duplicate_name() {
        let result = ConstantTable::new("t", &[(0x01, "A"), (0x02, "A")]);
        assert!(matches!(
            result,
            Err(SchemaError::DuplicateConstant { .. })
        ));
    }

    #[test]
    fn test_rejects_empty_table() {
        assert!(matches!(
            ConstantTable::new("t", &[]),
            Err(SchemaError::EmptyTable { .. })
        ));
    }

    #[test]
    fn test_iter_in_byte_order() {
        let table = ConstantTable::new("t", &[(0x10, "B"), (0x01, "A")]).unwrap();
        let entries: Vec<_> = table.iter().collect();
        assert_eq!(entries, vec![(0x01, "A"), (0x10, "B")]);
    }
}
