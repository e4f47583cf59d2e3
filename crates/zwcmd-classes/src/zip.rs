//! Command Class Z/IP (0x23), version 2.

use std::sync::LazyLock;

use zwcmd_schema::{BitPart, MessageSchema};

/// Command class key for COMMAND_CLASS_ZIP.
pub const COMMAND_CLASS: u8 = 0x23;

pub const COMMAND_ZIP_PACKET: u8 = 0x02;

/// A Z/IP packet: two flag bytes, addressing, then an optional header
/// extension (sized by its length byte) and the encapsulated command.
pub static PACKET: LazyLock<MessageSchema> = LazyLock::new(|| {
    MessageSchema::builder(COMMAND_CLASS, COMMAND_ZIP_PACKET, "COMMAND_ZIP_PACKET")
        .bits(
            "properties1",
            vec![
                BitPart::flag("nackOptionError", 0x04),
                BitPart::flag("nackQueueFull", 0x08),
                BitPart::flag("nackWaiting", 0x10),
                BitPart::flag("nackResponse", 0x20),
                BitPart::flag("ackResponse", 0x40),
                BitPart::flag("ackRequest", 0x80),
            ],
        )
        .bits(
            "properties2",
            vec![
                BitPart::flag("secureOrigin", 0x10),
                BitPart::flag("moreInformation", 0x20),
                BitPart::flag("zWaveCmdIncluded", 0x40),
                BitPart::flag("headerExtIncluded", 0x80),
            ],
        )
        .u8("seqNo")
        .bits("properties3", vec![BitPart::uint("sourceEndPoint", 0x7F)])
        .bits(
            "properties4",
            vec![
                BitPart::uint("destinationEndPoint", 0x7F),
                BitPart::flag("bitAddress", 0x80),
            ],
        )
        .u8("headerLength")
        .bytes_counted("headerExtension", "headerLength")
        .bytes_remaining("zWaveCommand")
        .finish()
        .expect("COMMAND_ZIP_PACKET layout")
});
