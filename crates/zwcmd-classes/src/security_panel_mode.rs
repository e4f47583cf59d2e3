//! Command Class Security Panel Mode (0x24), version 1.

use std::sync::LazyLock;

use zwcmd_schema::{ConstantTable, MessageSchema};

/// Command class key for COMMAND_CLASS_SECURITY_PANEL_MODE.
pub const COMMAND_CLASS: u8 = 0x24;

pub const SECURITY_PANEL_MODE_SUPPORTED_GET: u8 = 0x01;
pub const SECURITY_PANEL_MODE_SUPPORTED_REPORT: u8 = 0x02;
pub const SECURITY_PANEL_MODE_GET: u8 = 0x03;
pub const SECURITY_PANEL_MODE_REPORT: u8 = 0x04;
pub const SECURITY_PANEL_MODE_SET: u8 = 0x05;

/// Panel arming modes.
pub static MODE: LazyLock<ConstantTable> = LazyLock::new(|| {
    ConstantTable::new(
        "mode",
        &[
            (0x01, "ARM_HOME"),
            (0x02, "ARM_AWAY,_NO_DELAY"),
            (0x03, "ARM_AWAY,_DELAYED"),
            (0x04, "DISARM"),
            (0x05, "ALARM_TRIGGER"),
        ],
    )
    .expect("panel mode table")
});

pub static SUPPORTED_GET: LazyLock<MessageSchema> = LazyLock::new(|| {
    MessageSchema::builder(
        COMMAND_CLASS,
        SECURITY_PANEL_MODE_SUPPORTED_GET,
        "SECURITY_PANEL_MODE_SUPPORTED_GET",
    )
    .finish()
    .expect("SECURITY_PANEL_MODE_SUPPORTED_GET layout")
});

pub static SUPPORTED_REPORT: LazyLock<MessageSchema> = LazyLock::new(|| {
    MessageSchema::builder(
        COMMAND_CLASS,
        SECURITY_PANEL_MODE_SUPPORTED_REPORT,
        "SECURITY_PANEL_MODE_SUPPORTED_REPORT",
    )
    .u16_be("supportedModeBitMask")
    .finish()
    .expect("SECURITY_PANEL_MODE_SUPPORTED_REPORT layout")
});

pub static GET: LazyLock<MessageSchema> = LazyLock::new(|| {
    MessageSchema::builder(COMMAND_CLASS, SECURITY_PANEL_MODE_GET, "SECURITY_PANEL_MODE_GET")
        .finish()
        .expect("SECURITY_PANEL_MODE_GET layout")
});

pub static REPORT: LazyLock<MessageSchema> = LazyLock::new(|| {
    MessageSchema::builder(
        COMMAND_CLASS,
        SECURITY_PANEL_MODE_REPORT,
        "SECURITY_PANEL_MODE_REPORT",
    )
    .enum_byte("mode", &MODE)
    .finish()
    .expect("SECURITY_PANEL_MODE_REPORT layout")
});

pub static SET: LazyLock<MessageSchema> = LazyLock::new(|| {
    MessageSchema::builder(COMMAND_CLASS, SECURITY_PANEL_MODE_SET, "SECURITY_PANEL_MODE_SET")
        .enum_byte("mode", &MODE)
        .finish()
        .expect("SECURITY_PANEL_MODE_SET layout")
});

#[cfg(test)]
mod tests {
    use zwcmd_codec::{decode, encode, FieldMap};

    use super::*;

    #[test]
    fn test_supported_report_wide_bitmask() {
        // The mask is a plain big-endian u16; (0x01 << 8) + 0x30, not the
        // operator-precedence accident the generated sources carried.
        let fields = decode(&SUPPORTED_REPORT, &[0x24, 0x02, 0x01, 0x30]).unwrap();
        assert_eq!(fields.int("supportedModeBitMask"), Some(0x0130));
    }

    #[test]
    fn test_mode_roundtrip() {
        let values = FieldMap::new().with("mode", "DISARM");
        let frame = encode(&SET, &values).unwrap();
        assert_eq!(frame.as_ref(), &[0x24, 0x05, 0x04]);
        assert_eq!(decode(&SET, &frame).unwrap(), values);
    }
}
