//! Command Class Thermostat Fan Mode (0x44), version 2.

use std::sync::LazyLock;

use zwcmd_schema::{BitPart, ConstantTable, MessageSchema};

/// Command class key for COMMAND_CLASS_THERMOSTAT_FAN_MODE.
pub const COMMAND_CLASS: u8 = 0x44;

pub const THERMOSTAT_FAN_MODE_SET: u8 = 0x01;
pub const THERMOSTAT_FAN_MODE_GET: u8 = 0x02;
pub const THERMOSTAT_FAN_MODE_REPORT: u8 = 0x03;
pub const THERMOSTAT_FAN_MODE_SUPPORTED_GET: u8 = 0x04;
pub const THERMOSTAT_FAN_MODE_SUPPORTED_REPORT: u8 = 0x05;

/// Fan modes, packed into the low nibble of the level byte.
pub static FAN_MODE: LazyLock<ConstantTable> = LazyLock::new(|| {
    ConstantTable::new(
        "fanMode",
        &[
            (0x00, "AUTO_LOW"),
            (0x01, "LOW"),
            (0x02, "AUTO_HIGH"),
            (0x03, "HIGH"),
            (0x04, "AUTO_MEDIUM"),
            (0x05, "MEDIUM"),
        ],
    )
    .expect("fan mode table")
});

fn level_fields(command: u8, name: &'static str) -> MessageSchema {
    MessageSchema::builder(COMMAND_CLASS, command, name)
        .bits(
            "level",
            vec![
                BitPart::enumerated("fanMode", 0x0F, &FAN_MODE),
                BitPart::flag("off", 0x80),
            ],
        )
        .finish()
        .expect("fan mode level layout")
}

pub static SET: LazyLock<MessageSchema> =
    LazyLock::new(|| level_fields(THERMOSTAT_FAN_MODE_SET, "THERMOSTAT_FAN_MODE_SET"));

pub static GET: LazyLock<MessageSchema> = LazyLock::new(|| {
    MessageSchema::builder(COMMAND_CLASS, THERMOSTAT_FAN_MODE_GET, "THERMOSTAT_FAN_MODE_GET")
        .finish()
        .expect("THERMOSTAT_FAN_MODE_GET layout")
});

pub static REPORT: LazyLock<MessageSchema> =
    LazyLock::new(|| level_fields(THERMOSTAT_FAN_MODE_REPORT, "THERMOSTAT_FAN_MODE_REPORT"));

pub static SUPPORTED_GET: LazyLock<MessageSchema> = LazyLock::new(|| {
    MessageSchema::builder(
        COMMAND_CLASS,
        THERMOSTAT_FAN_MODE_SUPPORTED_GET,
        "THERMOSTAT_FAN_MODE_SUPPORTED_GET",
    )
    .finish()
    .expect("THERMOSTAT_FAN_MODE_SUPPORTED_GET layout")
});

pub static SUPPORTED_REPORT: LazyLock<MessageSchema> = LazyLock::new(|| {
    MessageSchema::builder(
        COMMAND_CLASS,
        THERMOSTAT_FAN_MODE_SUPPORTED_REPORT,
        "THERMOSTAT_FAN_MODE_SUPPORTED_REPORT",
    )
    .bytes_remaining("bitMask")
    .finish()
    .expect("THERMOSTAT_FAN_MODE_SUPPORTED_REPORT layout")
});

#[cfg(test)]
mod tests {
    use zwcmd_codec::{decode, encode, EncodeError, FieldMap};

    use super::*;

    #[test]
    fn test_set_packs_mode_and_off_flag() {
        let values = FieldMap::new().with("fanMode", "MEDIUM").with("off", true);
        let frame = encode(&SET, &values).unwrap();
        assert_eq!(frame.as_ref(), &[0x44, 0x01, 0x85]);
        assert_eq!(decode(&SET, &frame).unwrap(), values);
    }

    #[test]
    fn test_unknown_fan_mode_fails_encode() {
        let values = FieldMap::new().with("fanMode", "TURBO").with("off", false);
        assert!(matches!(
            encode(&SET, &values),
            Err(EncodeError::UnknownEnumValue { .. })
        ));
    }

    #[test]
    fn test_supported_report_takes_rest() {
        let fields = decode(&SUPPORTED_REPORT, &[0x44, 0x05, 0x3F]).unwrap();
        assert_eq!(fields.bytes("bitMask"), Some(&[0x3Fu8][..]));
    }
}
