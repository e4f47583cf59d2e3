//! Schema-driven frame decoding.

use tracing::debug;
use zwcmd_schema::{BitKind, ByteOrder, Field, FieldKind, IntSpec, Length, MessageSchema};

use crate::error::DecodeError;
use crate::group::GroupIter;
use crate::value::{FieldMap, FieldValue};

/// Decode a complete frame against its schema.
///
/// The two leading bytes must match the schema's class and command. Every
/// read is bounds-checked before it happens; a short buffer is reported as
/// [`DecodeError::TruncatedBuffer`], never inferred from a slice panic.
/// On any error the call returns nothing, never a partially filled map.
pub fn decode(schema: &MessageSchema, frame: &[u8]) -> Result<FieldMap, DecodeError> {
    if frame.len() < 2 {
        return Err(DecodeError::TruncatedBuffer {
            field: "header",
            needed: 2,
            remaining: frame.len(),
        });
    }
    let found = [frame[0], frame[1]];
    if found != schema.header() {
        return Err(DecodeError::HeaderMismatch {
            expected: schema.header(),
            found,
        });
    }

    debug!(message = schema.name(), len = frame.len(), "decoding frame");

    let mut cursor = Cursor::new(frame);
    cursor.advance(2);

    let mut fields = FieldMap::new();
    decode_fields(schema.fields(), &mut cursor, &mut fields, None)?;

    if !cursor.at_end() {
        debug!(
            message = schema.name(),
            trailing = cursor.remaining(),
            "ignoring trailing bytes after last field"
        );
    }

    Ok(fields)
}

/// Bounds-checked read position over one frame.
#[derive(Debug, Clone, Copy)]
pub(crate) struct Cursor<'a> {
    buf: &'a [u8],
    pos: usize,
}

impl<'a> Cursor<'a> {
    pub(crate) fn new(buf: &'a [u8]) -> Self {
        Self { buf, pos: 0 }
    }

    pub(crate) fn position(&self) -> usize {
        self.pos
    }

    pub(crate) fn remaining(&self) -> usize {
        self.buf.len() - self.pos
    }

    pub(crate) fn at_end(&self) -> bool {
        self.pos >= self.buf.len()
    }

    pub(crate) fn advance(&mut self, n: usize) {
        self.pos += n;
    }

    /// The unread tail, borrowed for the buffer's lifetime.
    pub(crate) fn rest(&self) -> &'a [u8] {
        &self.buf[self.pos..]
    }

    pub(crate) fn starts_with(&self, marker: &[u8]) -> bool {
        self.rest().starts_with(marker)
    }

    /// Offset of `marker` relative to the current position.
    pub(crate) fn find(&self, marker: &[u8]) -> Option<usize> {
        let rest = self.rest();
        if marker.is_empty() || rest.len() < marker.len() {
            return None;
        }
        (0..=rest.len() - marker.len()).find(|&i| rest[i..].starts_with(marker))
    }

    /// Consume exactly `n` bytes, or fail with `TruncatedBuffer`.
    pub(crate) fn take(&mut self, field: &'static str, n: usize) -> Result<&'a [u8], DecodeError> {
        if self.remaining() < n {
            return Err(DecodeError::TruncatedBuffer {
                field,
                needed: n,
                remaining: self.remaining(),
            });
        }
        let bytes = &self.buf[self.pos..self.pos + n];
        self.pos += n;
        Ok(bytes)
    }

    pub(crate) fn u8(&mut self, field: &'static str) -> Result<u8, DecodeError> {
        Ok(self.take(field, 1)?[0])
    }
}

/// Decode one field scope into `out`.
///
/// `outer` is the enclosing message map when decoding a group element, so
/// counted regions can resolve counts recorded outside the element.
pub(crate) fn decode_fields(
    fields: &[Field],
    cursor: &mut Cursor<'_>,
    out: &mut FieldMap,
    outer: Option<&FieldMap>,
) -> Result<(), DecodeError> {
    for field in fields {
        match &field.kind {
            FieldKind::Int(spec) => {
                let bytes = cursor.take(field.name, spec.width as usize)?;
                out.insert(field.name, read_int(spec, bytes));
            }
            FieldKind::Bits(parts) => {
                let byte = cursor.u8(field.name)?;
                for part in parts {
                    let raw = zwcmd_schema::bits::unpack(byte, part.mask, part.shift);
                    match part.kind {
                        BitKind::Flag => out.insert(part.name, raw != 0),
                        BitKind::Uint => out.insert(part.name, i64::from(raw)),
                        BitKind::Enum(table) => {
                            if !table.is_mapped(raw) {
                                debug!(
                                    field = part.name,
                                    table = table.name(),
                                    value = raw,
                                    "unmapped enum value, reporting hex fallback"
                                );
                            }
                            out.insert(part.name, table.name_of(raw).into_owned());
                        }
                    }
                }
            }
            FieldKind::Enum(table) => {
                let byte = cursor.u8(field.name)?;
                if !table.is_mapped(byte) {
                    debug!(
                        field = field.name,
                        table = table.name(),
                        value = byte,
                        "unmapped enum byte, reporting hex fallback"
                    );
                }
                out.insert(field.name, table.name_of(byte).into_owned());
            }
            FieldKind::Bytes(length) => {
                let bytes = match *length {
                    Length::Remaining => cursor.take(field.name, cursor.remaining())?,
                    Length::RemainingLess(reserve) => {
                        let available = cursor.remaining();
                        if available < reserve {
                            return Err(DecodeError::TruncatedBuffer {
                                field: field.name,
                                needed: reserve,
                                remaining: available,
                            });
                        }
                        cursor.take(field.name, available - reserve)?
                    }
                    Length::Fixed(n) => cursor.take(field.name, n)?,
                    Length::CountedBy(count) => {
                        let n = lookup_count(field.name, count, out, outer)?;
                        cursor.take(field.name, n)?
                    }
                    Length::UntilMarker(marker) => {
                        let Some(offset) = cursor.find(marker) else {
                            return Err(DecodeError::MarkerNotFound {
                                field: field.name,
                                marker,
                            });
                        };
                        let bytes = cursor.take(field.name, offset)?;
                        cursor.advance(marker.len());
                        bytes
                    }
                };
                out.insert(field.name, bytes.to_vec());
            }
            FieldKind::Group { fields: sub, end } => {
                let mut iter = GroupIter::over(field.name, sub, cursor.rest(), end, out)?;
                let mut elements = Vec::new();
                for element in iter.by_ref() {
                    elements.push(element?);
                }
                let consumed = iter.position();
                cursor.advance(consumed);
                out.insert(field.name, FieldValue::Group(elements));
            }
        }
    }
    Ok(())
}

fn read_int(spec: &IntSpec, bytes: &[u8]) -> i64 {
    let mut raw: u64 = 0;
    match spec.order {
        ByteOrder::BigEndian => {
            for &b in bytes {
                raw = (raw << 8) | u64::from(b);
            }
        }
        ByteOrder::LittleEndian => {
            for &b in bytes.iter().rev() {
                raw = (raw << 8) | u64::from(b);
            }
        }
    }
    if spec.signed {
        let shift = 64 - 8 * u32::from(spec.width);
        ((raw << shift) as i64) >> shift
    } else {
        raw as i64
    }
}

fn lookup_count(
    field: &'static str,
    count: &'static str,
    scope: &FieldMap,
    outer: Option<&FieldMap>,
) -> Result<usize, DecodeError> {
    let value = scope
        .int(count)
        .or_else(|| outer.and_then(|o| o.int(count)))
        .ok_or(DecodeError::MissingCount { field, count })?;
    Ok(usize::try_from(value).unwrap_or(0))
}
