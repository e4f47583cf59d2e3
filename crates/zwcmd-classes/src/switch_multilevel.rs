//! Command Class Switch Multilevel (0x26), version 1.

use std::sync::LazyLock;

use zwcmd_schema::{BitPart, ConstantTable, MessageSchema};

/// Command class key for COMMAND_CLASS_SWITCH_MULTILEVEL.
pub const COMMAND_CLASS: u8 = 0x26;

pub const SWITCH_MULTILEVEL_SET: u8 = 0x01;
pub const SWITCH_MULTILEVEL_GET: u8 = 0x02;
pub const SWITCH_MULTILEVEL_REPORT: u8 = 0x03;
pub const SWITCH_MULTILEVEL_START_LEVEL_CHANGE: u8 = 0x04;
pub const SWITCH_MULTILEVEL_STOP_LEVEL_CHANGE: u8 = 0x05;

/// Switch values, shared by Set and Report.
pub static VALUE: LazyLock<ConstantTable> = LazyLock::new(|| {
    ConstantTable::new("value", &[(0x00, "OFF_DISABLE"), (0xFF, "ON_ENABLE")])
        .expect("switch value table")
});

pub static SET: LazyLock<MessageSchema> = LazyLock::new(|| {
    MessageSchema::builder(COMMAND_CLASS, SWITCH_MULTILEVEL_SET, "SWITCH_MULTILEVEL_SET")
        .enum_byte("value", &VALUE)
        .finish()
        .expect("SWITCH_MULTILEVEL_SET layout")
});

pub static GET: LazyLock<MessageSchema> = LazyLock::new(|| {
    MessageSchema::builder(COMMAND_CLASS, SWITCH_MULTILEVEL_GET, "SWITCH_MULTILEVEL_GET")
        .finish()
        .expect("SWITCH_MULTILEVEL_GET layout")
});

pub static REPORT: LazyLock<MessageSchema> = LazyLock::new(|| {
    MessageSchema::builder(
        COMMAND_CLASS,
        SWITCH_MULTILEVEL_REPORT,
        "SWITCH_MULTILEVEL_REPORT",
    )
    .enum_byte("value", &VALUE)
    .finish()
    .expect("SWITCH_MULTILEVEL_REPORT layout")
});

pub static START_LEVEL_CHANGE: LazyLock<MessageSchema> = LazyLock::new(|| {
    MessageSchema::builder(
        COMMAND_CLASS,
        SWITCH_MULTILEVEL_START_LEVEL_CHANGE,
        "SWITCH_MULTILEVEL_START_LEVEL_CHANGE",
    )
    .bits(
        "level",
        vec![
            BitPart::flag("ignoreStartLevel", 0x20),
            BitPart::flag("upDown", 0x40),
        ],
    )
    .u8("startLevel")
    .finish()
    .expect("SWITCH_MULTILEVEL_START_LEVEL_CHANGE layout")
});

pub static STOP_LEVEL_CHANGE: LazyLock<MessageSchema> = LazyLock::new(|| {
    MessageSchema::builder(
        COMMAND_CLASS,
        SWITCH_MULTILEVEL_STOP_LEVEL_CHANGE,
        "SWITCH_MULTILEVEL_STOP_LEVEL_CHANGE",
    )
    .finish()
    .expect("SWITCH_MULTILEVEL_STOP_LEVEL_CHANGE layout")
});
