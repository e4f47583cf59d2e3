//! Command Class Alarm (0x71), version 2.

use std::sync::LazyLock;

use zwcmd_schema::{BitPart, ConstantTable, MessageSchema, NODE_ID};

/// Command class key for COMMAND_CLASS_ALARM.
pub const COMMAND_CLASS: u8 = 0x71;

pub const ALARM_GET: u8 = 0x04;
pub const ALARM_REPORT: u8 = 0x05;
pub const ALARM_SET: u8 = 0x06;
pub const ALARM_TYPE_SUPPORTED_GET: u8 = 0x07;
pub const ALARM_TYPE_SUPPORTED_REPORT: u8 = 0x08;

/// Z-Wave alarm types.
pub static ZWAVE_ALARM_TYPE: LazyLock<ConstantTable> = LazyLock::new(|| {
    ConstantTable::new(
        "zwaveAlarmType",
        &[
            (0x01, "SMOKE"),
            (0x02, "CO"),
            (0x03, "CO2"),
            (0x04, "HEAT"),
            (0x05, "WATER"),
            (0x06, "ACCESS_CONTROL"),
            (0x07, "BURGLAR"),
            (0x08, "POWER_MANAGEMENT"),
            (0x09, "SYSTEM"),
            (0x0A, "EMERGENCY"),
            (0x0B, "CLOCK"),
        ],
    )
    .expect("alarm type table")
});

/// Z-Wave alarm status values.
pub static ZWAVE_ALARM_STATUS: LazyLock<ConstantTable> = LazyLock::new(|| {
    ConstantTable::new("zwaveAlarmStatus", &[(0x00, "OFF"), (0xFF, "ON")])
        .expect("alarm status table")
});

pub static GET: LazyLock<MessageSchema> = LazyLock::new(|| {
    MessageSchema::builder(COMMAND_CLASS, ALARM_GET, "ALARM_GET")
        .u8("alarmType")
        .enum_byte("zwaveAlarmType", &ZWAVE_ALARM_TYPE)
        .finish()
        .expect("ALARM_GET layout")
});

pub static REPORT: LazyLock<MessageSchema> = LazyLock::new(|| {
    MessageSchema::builder(COMMAND_CLASS, ALARM_REPORT, "ALARM_REPORT")
        .u8("alarmType")
        .u8("alarmLevel")
        .u8("zensorNetSourceNodeId")
        .rule("zensorNetSourceNodeId", NODE_ID)
        .enum_byte("zwaveAlarmStatus", &ZWAVE_ALARM_STATUS)
        .enum_byte("zwaveAlarmType", &ZWAVE_ALARM_TYPE)
        .u8("zwaveAlarmEvent")
        .u8("numberOfEventParameters")
        .bytes_counted("eventParameter", "numberOfEventParameters")
        .finish()
        .expect("ALARM_REPORT layout")
});

pub static SET: LazyLock<MessageSchema> = LazyLock::new(|| {
    MessageSchema::builder(COMMAND_CLASS, ALARM_SET, "ALARM_SET")
        .enum_byte("zwaveAlarmType", &ZWAVE_ALARM_TYPE)
        .enum_byte("zwaveAlarmStatus", &ZWAVE_ALARM_STATUS)
        .finish()
        .expect("ALARM_SET layout")
});

pub static TYPE_SUPPORTED_GET: LazyLock<MessageSchema> = LazyLock::new(|| {
    MessageSchema::builder(
        COMMAND_CLASS,
        ALARM_TYPE_SUPPORTED_GET,
        "ALARM_TYPE_SUPPORTED_GET",
    )
    .finish()
    .expect("ALARM_TYPE_SUPPORTED_GET layout")
});

pub static TYPE_SUPPORTED_REPORT: LazyLock<MessageSchema> = LazyLock::new(|| {
    MessageSchema::builder(
        COMMAND_CLASS,
        ALARM_TYPE_SUPPORTED_REPORT,
        "ALARM_TYPE_SUPPORTED_REPORT",
    )
    .bits(
        "properties1",
        vec![BitPart::uint("count", 0x1F), BitPart::flag("v1Alarm", 0x80)],
    )
    .bytes_counted("bitMask", "count")
    .finish()
    .expect("ALARM_TYPE_SUPPORTED_REPORT layout")
});

#[cfg(test)]
mod tests {
    use zwcmd_codec::{decode, encode, DecodeError, EncodeError, FieldMap};

    use super::*;

    #[test]
    fn test_alarm_get_documented_frame() {
        let values = FieldMap::new()
            .with("alarmType", 5u8)
            .with("zwaveAlarmType", "CO");
        let frame = encode(&GET, &values).unwrap();
        assert_eq!(frame.as_ref(), &[0x71, 0x04, 0x05, 0x02]);
        assert_eq!(decode(&GET, &frame).unwrap(), values);
    }

    #[test]
    fn test_alarm_report_node_id_bounds() {
        let values = |node: i64| {
            FieldMap::new()
                .with("alarmType", 1u8)
                .with("alarmLevel", 0u8)
                .with("zensorNetSourceNodeId", node)
                .with("zwaveAlarmStatus", "ON")
                .with("zwaveAlarmType", "SMOKE")
                .with("zwaveAlarmEvent", 0u8)
                .with("numberOfEventParameters", 0u8)
                .with("eventParameter", Vec::<u8>::new())
        };

        assert!(encode(&REPORT, &values(1)).is_ok());
        assert!(encode(&REPORT, &values(232)).is_ok());
        assert!(matches!(
            encode(&REPORT, &values(0)),
            Err(EncodeError::RangeViolation { .. })
        ));
        assert!(matches!(
            encode(&REPORT, &values(233)),
            Err(EncodeError::RangeViolation { .. })
        ));
    }

    #[test]
    fn test_alarm_report_header_only_is_truncated() {
        assert!(matches!(
            decode(&REPORT, &[0x71, 0x05]),
            Err(DecodeError::TruncatedBuffer { .. })
        ));
    }

    #[test]
    fn test_type_supported_report_counted_bitmask() {
        let frame = [0x71, 0x08, 0x82, 0x06, 0x00];
        let fields = decode(&TYPE_SUPPORTED_REPORT, &frame).unwrap();
        assert_eq!(fields.int("count"), Some(2));
        assert_eq!(fields.flag("v1Alarm"), Some(true));
        assert_eq!(fields.bytes("bitMask"), Some(&[0x06u8, 0x00][..]));
        assert_eq!(encode(&TYPE_SUPPORTED_REPORT, &fields).unwrap().as_ref(), &frame);
    }

    #[test]
    fn test_unmapped_alarm_type_decodes_to_hex() {
        let fields = decode(&GET, &[0x71, 0x04, 0x01, 0x0C]).unwrap();
        assert_eq!(fields.name("zwaveAlarmType"), Some("0C"));
    }
}
