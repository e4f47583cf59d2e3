//! Command Class Protection (0x75), version 1.

use std::sync::LazyLock;

use zwcmd_schema::{ConstantTable, MessageSchema};

/// Command class key for COMMAND_CLASS_PROTECTION.
pub const COMMAND_CLASS: u8 = 0x75;

pub const PROTECTION_SET: u8 = 0x01;
pub const PROTECTION_GET: u8 = 0x02;
pub const PROTECTION_REPORT: u8 = 0x03;

/// Protection states, shared by Set and Report.
pub static PROTECTION_STATE: LazyLock<ConstantTable> = LazyLock::new(|| {
    ConstantTable::new(
        "protectionState",
        &[
            (0x00, "UNPROTECTED"),
            (0x01, "PROTECTION_BY_SEQUENCE"),
            (0x02, "NO_OPERATION_POSSIBLE"),
        ],
    )
    .expect("protection state table")
});

pub static SET: LazyLock<MessageSchema> = LazyLock::new(|| {
    MessageSchema::builder(COMMAND_CLASS, PROTECTION_SET, "PROTECTION_SET")
        .enum_byte("protectionState", &PROTECTION_STATE)
        .finish()
        .expect("PROTECTION_SET layout")
});

pub static GET: LazyLock<MessageSchema> = LazyLock::new(|| {
    MessageSchema::builder(COMMAND_CLASS, PROTECTION_GET, "PROTECTION_GET")
        .finish()
        .expect("PROTECTION_GET layout")
});

pub static REPORT: LazyLock<MessageSchema> = LazyLock::new(|| {
    MessageSchema::builder(COMMAND_CLASS, PROTECTION_REPORT, "PROTECTION_REPORT")
        .enum_byte("protectionState", &PROTECTION_STATE)
        .finish()
        .expect("PROTECTION_REPORT layout")
});

#[cfg(test)]
mod tests {
    use zwcmd_codec::{decode, encode, EncodeError, FieldMap};

    use super::*;

    #[test]
    fn test_protection_set_documented_frame() {
        let fields = decode(&SET, &[0x75, 0x01, 0x01]).unwrap();
        assert_eq!(fields.name("protectionState"), Some("PROTECTION_BY_SEQUENCE"));

        let frame = encode(&SET, &fields).unwrap();
        assert_eq!(frame.as_ref(), &[0x75, 0x01, 0x01]);
    }

    #[test]
    fn test_empty_get_is_header_only() {
        let frame = encode(&GET, &FieldMap::new()).unwrap();
        assert_eq!(frame.as_ref(), &[0x75, 0x02]);
        assert!(decode(&GET, &frame).unwrap().is_empty());
    }

    #[test]
    fn test_unknown_state_name_fails_encode() {
        let values = FieldMap::new().with("protectionState", "LOCKED");
        assert!(matches!(
            encode(&REPORT, &values),
            Err(EncodeError::UnknownEnumValue { .. })
        ));
    }
}
