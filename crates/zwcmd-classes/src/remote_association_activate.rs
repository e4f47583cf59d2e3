//! Command Class Remote Association Activate (0x7C), version 1.

use std::sync::LazyLock;

use zwcmd_schema::MessageSchema;

/// Command class key for COMMAND_CLASS_REMOTE_ASSOCIATION_ACTIVATE.
pub const COMMAND_CLASS: u8 = 0x7C;

pub const REMOTE_ASSOCIATION_ACTIVATE: u8 = 0x01;

pub static ACTIVATE: LazyLock<MessageSchema> = LazyLock::new(|| {
    MessageSchema::builder(
        COMMAND_CLASS,
        REMOTE_ASSOCIATION_ACTIVATE,
        "REMOTE_ASSOCIATION_ACTIVATE",
    )
    .u8("groupingIdentifier")
    .finish()
    .expect("REMOTE_ASSOCIATION_ACTIVATE layout")
});
