//! Command Class Scene Controller Conf (0x2D), version 1.

use std::sync::LazyLock;

use zwcmd_schema::{ConstantTable, MessageSchema};

/// Command class key for COMMAND_CLASS_SCENE_CONTROLLER_CONF.
pub const COMMAND_CLASS: u8 = 0x2D;

pub const SCENE_CONTROLLER_CONF_SET: u8 = 0x01;
pub const SCENE_CONTROLLER_CONF_GET: u8 = 0x02;
pub const SCENE_CONTROLLER_CONF_REPORT: u8 = 0x03;

/// Named dimming durations; other bytes are a duration in seconds.
pub static DIMMING_DURATION: LazyLock<ConstantTable> = LazyLock::new(|| {
    ConstantTable::new(
        "dimmingDuration",
        &[(0x00, "INSTANTLY"), (0xFF, "FACTORY_DEFAULT")],
    )
    .expect("dimming duration table")
});

pub static SET: LazyLock<MessageSchema> = LazyLock::new(|| {
    MessageSchema::builder(COMMAND_CLASS, SCENE_CONTROLLER_CONF_SET, "SCENE_CONTROLLER_CONF_SET")
        .u8("groupId")
        .u8("sceneId")
        .enum_byte("dimmingDuration", &DIMMING_DURATION)
        .finish()
        .expect("SCENE_CONTROLLER_CONF_SET layout")
});

pub static GET: LazyLock<MessageSchema> = LazyLock::new(|| {
    MessageSchema::builder(COMMAND_CLASS, SCENE_CONTROLLER_CONF_GET, "SCENE_CONTROLLER_CONF_GET")
        .u8("groupId")
        .finish()
        .expect("SCENE_CONTROLLER_CONF_GET layout")
});

pub static REPORT: LazyLock<MessageSchema> = LazyLock::new(|| {
    MessageSchema::builder(
        COMMAND_CLASS,
        SCENE_CONTROLLER_CONF_REPORT,
        "SCENE_CONTROLLER_CONF_REPORT",
    )
    .u8("groupId")
    .u8("sceneId")
    .enum_byte("dimmingDuration", &DIMMING_DURATION)
    .finish()
    .expect("SCENE_CONTROLLER_CONF_REPORT layout")
});

#[cfg(test)]
mod tests {
    use zwcmd_codec::{decode, encode, FieldMap};

    use super::*;

    #[test]
    fn test_set_roundtrip() {
        let values = FieldMap::new()
            .with("groupId", 2u8)
            .with("sceneId", 14u8)
            .with("dimmingDuration", "INSTANTLY");
        let frame = encode(&SET, &values).unwrap();
        assert_eq!(frame.as_ref(), &[0x2D, 0x01, 0x02, 0x0E, 0x00]);
        assert_eq!(decode(&SET, &frame).unwrap(), values);
    }

    #[test]
    fn test_numeric_duration_decodes_to_hex() {
        let fields = decode(&REPORT, &[0x2D, 0x03, 0x01, 0x01, 0x1E]).unwrap();
        assert_eq!(fields.name("dimmingDuration"), Some("1E"));
    }
}
