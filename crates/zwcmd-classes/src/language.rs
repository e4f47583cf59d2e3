//! Command Class Language (0x89), version 1.

use std::sync::LazyLock;

use zwcmd_schema::MessageSchema;

/// Command class key for COMMAND_CLASS_LANGUAGE.
pub const COMMAND_CLASS: u8 = 0x89;

pub const LANGUAGE_SET: u8 = 0x01;
pub const LANGUAGE_GET: u8 = 0x02;
pub const LANGUAGE_REPORT: u8 = 0x03;

// ISO 639-2 language code (three ASCII letters) followed by an ISO 3166-1
// country code packed into two bytes.
fn language_fields(command: u8, name: &'static str) -> MessageSchema {
    MessageSchema::builder(COMMAND_CLASS, command, name)
        .bytes_fixed("language", 3)
        .u16_be("country")
        .finish()
        .expect("language layout")
}

pub static SET: LazyLock<MessageSchema> =
    LazyLock::new(|| language_fields(LANGUAGE_SET, "LANGUAGE_SET"));

pub static GET: LazyLock<MessageSchema> = LazyLock::new(|| {
    MessageSchema::builder(COMMAND_CLASS, LANGUAGE_GET, "LANGUAGE_GET")
        .finish()
        .expect("LANGUAGE_GET layout")
});

pub static REPORT: LazyLock<MessageSchema> =
    LazyLock::new(|| language_fields(LANGUAGE_REPORT, "LANGUAGE_REPORT"));
