/// Errors raised while constructing schemas and constant tables.
///
/// Everything here is a build-time fault in the layout description itself;
/// a schema that constructs successfully never produces these at runtime.
#[derive(Debug, thiserror::Error)]
pub enum SchemaError {
    /// Two fields (or bit parts) in the same scope share a name.
    #[error("duplicate field name '{field}'")]
    DuplicateField { field: &'static str },

    /// A bit part's mask intersects a previously declared part of the same byte.
    #[error("bit part '{part}' of '{field}' overlaps earlier parts (mask {mask:#04x})")]
    OverlappingBits {
        field: &'static str,
        part: &'static str,
        mask: u8,
    },

    /// A bit part was declared with an all-zero mask.
    #[error("bit part '{part}' of '{field}' has an empty mask")]
    EmptyMask {
        field: &'static str,
        part: &'static str,
    },

    /// A counted region names a count field that does not precede it.
    #[error("field '{field}' is counted by '{count}', which is not declared before it")]
    UnknownCountField {
        field: &'static str,
        count: &'static str,
    },

    /// A counted region names a count field that cannot hold a count.
    #[error("field '{field}' is counted by '{count}', which is not an integer field")]
    CountFieldNotInteger {
        field: &'static str,
        count: &'static str,
    },

    /// A fixed-width integer was declared with an unsupported width.
    #[error("field '{field}' has unsupported integer width {width} (expected 1..=4)")]
    BadIntWidth { field: &'static str, width: u8 },

    /// A marker-delimited region was declared with an empty marker.
    #[error("field '{field}' has an empty marker sequence")]
    EmptyMarker { field: &'static str },

    /// A variant group was declared with no sub-fields.
    #[error("variant group '{field}' has no fields")]
    EmptyGroup { field: &'static str },

    /// A packed byte was declared with no bit parts.
    #[error("packed byte '{field}' has no bit parts")]
    EmptyBits { field: &'static str },

    /// A variant group was declared inside another group.
    #[error("variant group '{field}' cannot nest inside a group")]
    NestedGroup { field: &'static str },

    /// A field follows a region that consumes the rest of the buffer.
    #[error("field '{field}' follows open-ended field '{after}'")]
    TrailingFields {
        field: &'static str,
        after: &'static str,
    },

    /// Fields after a `RemainingLess(n)` region must be fixed-width and total n bytes.
    #[error("fields after '{field}' must be fixed-width and total {reserved} bytes")]
    BadTail {
        field: &'static str,
        reserved: usize,
    },

    /// A validation rule targets a field that is missing or not an integer.
    #[error("rule '{rule}' targets '{field}', which is not an integer field of this schema")]
    RuleTarget {
        rule: &'static str,
        field: &'static str,
    },

    /// A constant table was declared with no entries.
    #[error("constant table '{table}' has no entries")]
    EmptyTable { table: &'static str },

    /// A constant table maps the same byte or name twice.
    #[error("constant table '{table}' declares {entry} more than once")]
    DuplicateConstant {
        table: &'static str,
        entry: String,
    },
}

pub type Result<T> = std::result::Result<T, SchemaError>;
