use zwcmd_schema::Rule;

/// Errors raised while encoding a frame.
///
/// Encoding aborts on the first error and returns no partial bytes.
#[derive(Debug, thiserror::Error)]
pub enum EncodeError {
    /// A value is absent, has the wrong kind, or contradicts the layout
    /// (does not fit its declared width, disagrees with its count field, …).
    #[error("field '{field}' does not match its schema: {reason}")]
    SchemaMismatch {
        field: &'static str,
        reason: String,
    },

    /// A validation rule attached to the field rejected the value.
    #[error("rule '{rule}' rejected field '{field}': {value} is outside [{min}, {max}]")]
    RangeViolation {
        rule: &'static str,
        field: &'static str,
        value: i64,
        min: i64,
        max: i64,
    },

    /// A symbolic name has no byte in the field's constant table. Unknown
    /// names never encode to a default; the frame is not produced.
    #[error("unknown name '{name}' for enum field '{field}' (table '{table}')")]
    UnknownEnumValue {
        field: &'static str,
        table: &'static str,
        name: String,
    },
}

impl EncodeError {
    pub(crate) fn mismatch(field: &'static str, reason: impl Into<String>) -> Self {
        Self::SchemaMismatch {
            field,
            reason: reason.into(),
        }
    }

    pub(crate) fn range(field: &'static str, rule: &Rule, value: i64) -> Self {
        Self::RangeViolation {
            rule: rule.name,
            field,
            value,
            min: rule.min,
            max: rule.max,
        }
    }
}

/// Errors raised while decoding a frame.
///
/// Decoding aborts on the first error and returns no partial field map.
#[derive(Debug, thiserror::Error)]
pub enum DecodeError {
    /// The frame's two leading bytes do not match the schema's class and
    /// command.
    #[error("frame header {found:02X?} does not match schema header {expected:02X?}")]
    HeaderMismatch { expected: [u8; 2], found: [u8; 2] },

    /// Fewer bytes remain than the next field requires. Checked before
    /// every read, never inferred from an out-of-bounds access.
    #[error("buffer truncated at field '{field}': {needed} bytes needed, {remaining} remain")]
    TruncatedBuffer {
        field: &'static str,
        needed: usize,
        remaining: usize,
    },

    /// A marker-delimited region ran to the end of the buffer without its
    /// marker appearing.
    #[error("marker {marker:02X?} not found for field '{field}'")]
    MarkerNotFound {
        field: &'static str,
        marker: &'static [u8],
    },

    /// A variant group iteration consumed no bytes. This is an engine or
    /// schema fault, never a legitimate input state; the group is aborted
    /// rather than looped.
    #[error("variant group '{field}' made no forward progress")]
    GroupStalled { field: &'static str },

    /// A counted region's count field was not decoded before it. The
    /// schema builder rejects such layouts; this only fires for hand-built
    /// field lists that bypassed it.
    #[error("count field '{count}' for '{field}' was not decoded before it")]
    MissingCount {
        field: &'static str,
        count: &'static str,
    },
}
