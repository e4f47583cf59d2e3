//! Command Class Screen Md (0x92), version 2.

use std::sync::LazyLock;

use zwcmd_schema::{BitPart, GroupEnd, MessageSchema, NODE_ID};

/// Command class key for COMMAND_CLASS_SCREEN_MD.
pub const COMMAND_CLASS: u8 = 0x92;

pub const SCREEN_MD_GET: u8 = 0x01;
pub const SCREEN_MD_REPORT: u8 = 0x03;

pub static GET: LazyLock<MessageSchema> = LazyLock::new(|| {
    MessageSchema::builder(COMMAND_CLASS, SCREEN_MD_GET, "SCREEN_MD_GET")
        .u8("numberOfReports")
        .u8("nodeId")
        .rule("nodeId", NODE_ID)
        .finish()
        .expect("SCREEN_MD_GET layout")
});

/// One report carries any number of screen lines; each line header records
/// how many characters follow it.
pub static REPORT: LazyLock<MessageSchema> = LazyLock::new(|| {
    MessageSchema::builder(COMMAND_CLASS, SCREEN_MD_REPORT, "SCREEN_MD_REPORT")
        .bits(
            "properties1",
            vec![
                BitPart::uint("charPresentation", 0x07),
                BitPart::uint("screenSettings", 0x38),
                BitPart::flag("moreData", 0x80),
            ],
        )
        .group("lines", GroupEnd::Remaining, |g| {
            g.bits(
                "lineProperties",
                vec![
                    BitPart::uint("lineNumber", 0x0F),
                    BitPart::flag("clear", 0x10),
                    BitPart::uint("lineSettings", 0xE0),
                ],
            )
            .u8("characterPosition")
            .u8("numberOfCharacters")
            .bytes_counted("character", "numberOfCharacters")
        })
        .finish()
        .expect("SCREEN_MD_REPORT layout")
});
