//! Declarative codec for command-class frames.
//!
//! zwcmd turns per-message hand-rolled byte twiddling into data: a frame
//! layout is a [`schema::MessageSchema`], and one encoder/decoder pair
//! handles every message.
//!
//! # Crate Structure
//!
//! - [`schema`] — field descriptors, constant tables, validated layouts
//! - [`codec`] — `encode`/`decode`, typed field maps, group iteration
//! - [`classes`] — the message catalog and its `(class, command)` registry

/// Re-export schema types.
pub mod schema {
    pub use zwcmd_schema::*;
}

/// Re-export codec types.
pub mod codec {
    pub use zwcmd_codec::*;
}

/// Re-export the message catalog.
pub mod classes {
    pub use zwcmd_classes::*;
}
