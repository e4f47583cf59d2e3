//! Declarative byte-layout schemas for command-class frames.
//!
//! A frame is one command-class byte, one command byte, and a payload laid
//! out per a command-specific schema. This crate holds the layout model:
//! typed field descriptors, packed-bit helpers, symbolic constant tables,
//! and the validated [`MessageSchema`] the codec crate consumes.
//!
//! Schemas and tables are immutable once built and are meant to be
//! constructed once (typically in `LazyLock` statics) and shared freely.

pub mod bits;
pub mod constants;
pub mod error;
pub mod field;
pub mod message;
pub mod rules;

pub use constants::ConstantTable;
pub use error::{Result, SchemaError};
pub use field::{BitKind, BitPart, ByteOrder, Field, FieldKind, GroupEnd, IntSpec, Length};
pub use message::{GroupBuilder, MessageSchema, SchemaBuilder};
pub use rules::{Rule, NODE_ID};
