//! Schema-driven encoder and decoder for command-class frames.
//!
//! The two entry points are [`encode`] and [`decode`]: pure, synchronous,
//! CPU-bound transforms between a typed [`FieldMap`] and the wire bytes,
//! driven entirely by an immutable [`zwcmd_schema::MessageSchema`]. Both
//! fail closed: an error returns no partial buffer and no partial map.

pub mod decode;
pub mod encode;
pub mod error;
pub mod group;
pub mod value;

pub use decode::decode;
pub use encode::encode;
pub use error::{DecodeError, EncodeError};
pub use group::GroupIter;
pub use value::{FieldMap, FieldValue};
