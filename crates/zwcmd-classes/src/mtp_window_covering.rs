//! Command Class Mtp Window Covering (0x51), version 1.

use std::sync::LazyLock;

use zwcmd_schema::{ConstantTable, MessageSchema};

/// Command class key for COMMAND_CLASS_MTP_WINDOW_COVERING.
pub const COMMAND_CLASS: u8 = 0x51;

pub const MOVE_TO_POSITION_SET: u8 = 0x01;
pub const MOVE_TO_POSITION_GET: u8 = 0x02;
pub const MOVE_TO_POSITION_REPORT: u8 = 0x03;

/// End positions; intermediate positions stay numeric.
pub static VALUE: LazyLock<ConstantTable> = LazyLock::new(|| {
    ConstantTable::new("value", &[(0x00, "CLOSE"), (0xFF, "OPEN")]).expect("covering value table")
});

pub static SET: LazyLock<MessageSchema> = LazyLock::new(|| {
    MessageSchema::builder(COMMAND_CLASS, MOVE_TO_POSITION_SET, "MOVE_TO_POSITION_SET")
        .enum_byte("value", &VALUE)
        .finish()
        .expect("MOVE_TO_POSITION_SET layout")
});

pub static GET: LazyLock<MessageSchema> = LazyLock::new(|| {
    MessageSchema::builder(COMMAND_CLASS, MOVE_TO_POSITION_GET, "MOVE_TO_POSITION_GET")
        .finish()
        .expect("MOVE_TO_POSITION_GET layout")
});

pub static REPORT: LazyLock<MessageSchema> = LazyLock::new(|| {
    MessageSchema::builder(COMMAND_CLASS, MOVE_TO_POSITION_REPORT, "MOVE_TO_POSITION_REPORT")
        .enum_byte("value", &VALUE)
        .finish()
        .expect("MOVE_TO_POSITION_REPORT layout")
});

#[cfg(test)]
mod tests {
    use zwcmd_codec::{decode, encode, FieldMap};

    use super::*;

    #[test]
    fn test_open_and_close() {
        let frame = encode(&SET, &FieldMap::new().with("value", "OPEN")).unwrap();
        assert_eq!(frame.as_ref(), &[0x51, 0x01, 0xFF]);

        let fields = decode(&REPORT, &[0x51, 0x03, 0x00]).unwrap();
        assert_eq!(fields.name("value"), Some("CLOSE"));
    }

    #[test]
    fn test_partial_position_decodes_to_hex() {
        let fields = decode(&REPORT, &[0x51, 0x03, 0x32]).unwrap();
        assert_eq!(fields.name("value"), Some("32"));
    }
}
