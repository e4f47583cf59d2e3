//! Typed field values and the ordered map decode produces and encode
//! consumes.

use serde::ser::{Serialize, SerializeMap, SerializeSeq, Serializer};

/// One decoded or to-be-encoded field value.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FieldValue {
    /// Single-bit flag.
    Bool(bool),
    /// Fixed-width or sub-byte integer.
    Int(i64),
    /// Symbolic enum name, or the hex fallback for an unmapped byte.
    Name(String),
    /// Variable-length byte run.
    Bytes(Vec<u8>),
    /// Ordered elements of a variant group.
    Group(Vec<FieldMap>),
}

impl From<bool> for FieldValue {
    fn from(v: bool) -> Self {
        Self::Bool(v)
    }
}

impl From<i64> for FieldValue {
    fn from(v: i64) -> Self {
        Self::Int(v)
    }
}

impl From<i32> for FieldValue {
    fn from(v: i32) -> Self {
        Self::Int(v.into())
    }
}

impl From<u8> for FieldValue {
    fn from(v: u8) -> Self {
        Self::Int(v.into())
    }
}

impl From<u16> for FieldValue {
    fn from(v: u16) -> Self {
        Self::Int(v.into())
    }
}

impl From<u32> for FieldValue {
    fn from(v: u32) -> Self {
        Self::Int(v.into())
    }
}

impl From<&str> for FieldValue {
    fn from(v: &str) -> Self {
        Self::Name(v.to_string())
    }
}

impl From<String> for FieldValue {
    fn from(v: String) -> Self {
        Self::Name(v)
    }
}

impl From<Vec<u8>> for FieldValue {
    fn from(v: Vec<u8>) -> Self {
        Self::Bytes(v)
    }
}

impl From<&[u8]> for FieldValue {
    fn from(v: &[u8]) -> Self {
        Self::Bytes(v.to_vec())
    }
}

impl From<Vec<FieldMap>> for FieldValue {
    fn from(v: Vec<FieldMap>) -> Self {
        Self::Group(v)
    }
}

/// Name→value mapping for one message (or one group element).
///
/// Keeps insertion order so iteration matches the schema's wire order.
/// Owned entirely by the caller of one encode or decode call.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FieldMap {
    entries: Vec<(&'static str, FieldValue)>,
}

impl FieldMap {
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert a value, replacing any previous value under the same name.
    pub fn insert(&mut self, name: &'static str, value: impl Into<FieldValue>) {
        let value = value.into();
        match self.entries.iter_mut().find(|(n, _)| *n == name) {
            Some(entry) => entry.1 = value,
            None => self.entries.push((name, value)),
        }
    }

    /// Builder-style [`insert`](Self::insert).
    pub fn with(mut self, name: &'static str, value: impl Into<FieldValue>) -> Self {
        self.insert(name, value);
        self
    }

    pub fn get(&self, name: &str) -> Option<&FieldValue> {
        self.entries
            .iter()
            .find(|(n, _)| *n == name)
            .map(|(_, v)| v)
    }

    /// The integer under `name`, if present and an integer.
    pub fn int(&self, name: &str) -> Option<i64> {
        match self.get(name) {
            Some(FieldValue::Int(v)) => Some(*v),
            _ => None,
        }
    }

    /// The flag under `name`, if present and a flag.
    pub fn flag(&self, name: &str) -> Option<bool> {
        match self.get(name) {
            Some(FieldValue::Bool(v)) => Some(*v),
            _ => None,
        }
    }

    /// The symbolic name under `name`, if present and a name.
    pub fn name(&self, name: &str) -> Option<&str> {
        match self.get(name) {
            Some(FieldValue::Name(v)) => Some(v.as_str()),
            _ => None,
        }
    }

    /// The byte run under `name`, if present and bytes.
    pub fn bytes(&self, name: &str) -> Option<&[u8]> {
        match self.get(name) {
            Some(FieldValue::Bytes(v)) => Some(v.as_slice()),
            _ => None,
        }
    }

    /// The group elements under `name`, if present and a group.
    pub fn group(&self, name: &str) -> Option<&[FieldMap]> {
        match self.get(name) {
            Some(FieldValue::Group(v)) => Some(v.as_slice()),
            _ => None,
        }
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Iterate entries in insertion order.
    pub fn iter(&self) -> impl Iterator<Item = (&'static str, &FieldValue)> {
        self.entries.iter().map(|(n, v)| (*n, v))
    }
}

impl Serialize for FieldValue {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            Self::Bool(v) => serializer.serialize_bool(*v),
            Self::Int(v) => serializer.serialize_i64(*v),
            Self::Name(v) => serializer.serialize_str(v),
            Self::Bytes(v) => {
                let hex: String = v.iter().map(|b| format!("{b:02X}")).collect();
                serializer.serialize_str(&hex)
            }
            Self::Group(elements) => {
                let mut seq = serializer.serialize_seq(Some(elements.len()))?;
                for element in elements {
                    seq.serialize_element(element)?;
                }
                seq.end()
            }
        }
    }
}

impl Serialize for FieldMap {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.entries.len()))?;
        for (name, value) in &self.entries {
            map.serialize_entry(name, value)?;
        }
        map.end()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_insert_preserves_order_and_replaces() {
        let mut map = FieldMap::new();
        map.insert("b", 2u8);
        map.insert("a", 1u8);
        map.insert("b", 3u8);

        let names: Vec<_> = map.iter().map(|(n, _)| n).collect();
        assert_eq!(names, vec!["b", "a"]);
        assert_eq!(map.int("b"), Some(3));
    }

    #[test]
    fn test_typed_accessors() {
        let map = FieldMap::new()
            .with("flag", true)
            .with("count", 7u8)
            .with("mode", "ARM_HOME")
            .with("data", vec![0x01u8, 0x02]);

        assert_eq!(map.flag("flag"), Some(true));
        assert_eq!(map.int("count"), Some(7));
        assert_eq!(map.name("mode"), Some("ARM_HOME"));
        assert_eq!(map.bytes("data"), Some(&[0x01u8, 0x02][..]));
        assert_eq!(map.int("mode"), None);
        assert_eq!(map.get("missing"), None);
    }

    #[test]
    fn test_serializes_bytes_as_hex() {
        let map = FieldMap::new().with("data", vec![0xDEu8, 0xAD]);
        let json = serde_json::to_string(&map).unwrap();
        assert_eq!(json, r#"{"data":"DEAD"}"#);
    }

    #[test]
    fn test_serializes_group_as_array() {
        let element = FieldMap::new().with("firmwareId", 0x1234u16);
        let map = FieldMap::new().with("targets", vec![element]);
        let json = serde_json::to_string(&map).unwrap();
        assert_eq!(json, r#"{"targets":[{"firmwareId":4660}]}"#);
    }
}
