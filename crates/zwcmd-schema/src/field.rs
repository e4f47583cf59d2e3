//! Field descriptors: the building blocks of a message layout.

use crate::bits;
use crate::constants::ConstantTable;

/// Byte order for multi-byte integers.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ByteOrder {
    /// Most significant byte first (the protocol's native order).
    BigEndian,
    /// Least significant byte first.
    LittleEndian,
}

/// Shape of a fixed-width integer field.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct IntSpec {
    /// Width in bytes, 1..=4.
    pub width: u8,
    /// Two's-complement interpretation when set.
    pub signed: bool,
    /// Byte order on the wire.
    pub order: ByteOrder,
}

impl IntSpec {
    /// Unsigned big-endian integer of the given width.
    pub const fn unsigned(width: u8) -> Self {
        Self {
            width,
            signed: false,
            order: ByteOrder::BigEndian,
        }
    }

    /// Signed big-endian integer of the given width.
    pub const fn signed(width: u8) -> Self {
        Self {
            width,
            signed: true,
            order: ByteOrder::BigEndian,
        }
    }

    /// Same spec with little-endian byte order.
    pub const fn little_endian(mut self) -> Self {
        self.order = ByteOrder::LittleEndian;
        self
    }

    /// Smallest value the field can carry.
    pub fn min_value(&self) -> i64 {
        if self.signed {
            -(1i64 << (8 * self.width - 1))
        } else {
            0
        }
    }

    /// Largest value the field can carry.
    pub fn max_value(&self) -> i64 {
        if self.signed {
            (1i64 << (8 * self.width - 1)) - 1
        } else {
            (1i64 << (8 * self.width)) - 1
        }
    }
}

/// What a sub-byte bit range holds.
#[derive(Debug, Clone, Copy)]
pub enum BitKind {
    /// Single-bit boolean.
    Flag,
    /// Small unsigned integer.
    Uint,
    /// Small enumeration resolved through a constant table.
    Enum(&'static ConstantTable),
}

/// One named bit range within a packed byte.
#[derive(Debug, Clone, Copy)]
pub struct BitPart {
    pub name: &'static str,
    pub mask: u8,
    pub shift: u8,
    pub kind: BitKind,
}

impl BitPart {
    /// A single-bit boolean at the given mask.
    pub const fn flag(name: &'static str, mask: u8) -> Self {
        Self {
            name,
            mask,
            shift: bits_shift(mask),
            kind: BitKind::Flag,
        }
    }

    /// A small unsigned integer occupying the masked range.
    pub const fn uint(name: &'static str, mask: u8) -> Self {
        Self {
            name,
            mask,
            shift: bits_shift(mask),
            kind: BitKind::Uint,
        }
    }

    /// A small enumeration occupying the masked range.
    pub const fn enumerated(name: &'static str, mask: u8, table: &'static ConstantTable) -> Self {
        Self {
            name,
            mask,
            shift: bits_shift(mask),
            kind: BitKind::Enum(table),
        }
    }

    /// Largest raw value the masked range can hold.
    pub fn max_value(&self) -> u8 {
        bits::max_value(self.mask, self.shift)
    }
}

const fn bits_shift(mask: u8) -> u8 {
    mask.trailing_zeros() as u8
}

/// How a variable-length byte run finds its end.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Length {
    /// All bytes to the end of the buffer. Must be the last field.
    Remaining,
    /// All bytes except the last `n`, which belong to trailing
    /// fixed-width fields.
    RemainingLess(usize),
    /// Exactly `n` bytes.
    Fixed(usize),
    /// As many bytes as an earlier integer field recorded.
    CountedBy(&'static str),
    /// Bytes up to (not including) a marker sequence; the marker itself
    /// is consumed and not part of the value.
    UntilMarker(&'static [u8]),
}

/// How a variant group finds its end.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GroupEnd {
    /// Elements repeat until the buffer is exhausted.
    Remaining,
    /// Exactly as many elements as an earlier integer field recorded.
    CountedBy(&'static str),
    /// Elements repeat until the marker is next in the stream; the marker
    /// is then consumed.
    Marker(&'static [u8]),
}

/// The typed layout of one named field.
#[derive(Debug, Clone)]
pub enum FieldKind {
    /// Fixed-width integer.
    Int(IntSpec),
    /// One byte packed with named bit ranges. The field's own name labels
    /// the byte in errors; the parts carry the decoded names.
    Bits(Vec<BitPart>),
    /// One byte resolved through a constant table.
    Enum(&'static ConstantTable),
    /// Variable-length byte run.
    Bytes(Length),
    /// Repeated sub-structure.
    Group {
        fields: Vec<Field>,
        end: GroupEnd,
    },
}

/// A named field within a message layout.
#[derive(Debug, Clone)]
pub struct Field {
    pub name: &'static str,
    pub kind: FieldKind,
}

impl Field {
    /// Bytes this field occupies on the wire, when that is fixed.
    ///
    /// Variable-length fields and groups return `None`.
    pub fn fixed_width(&self) -> Option<usize> {
        match &self.kind {
            FieldKind::Int(spec) => Some(spec.width as usize),
            FieldKind::Bits(_) | FieldKind::Enum(_) => Some(1),
            FieldKind::Bytes(Length::Fixed(n)) => Some(*n),
            FieldKind::Bytes(_) | FieldKind::Group { .. } => None,
        }
    }

    /// Whether this field consumes everything left in the buffer.
    pub fn is_open_ended(&self) -> bool {
        matches!(
            &self.kind,
            FieldKind::Bytes(Length::Remaining) | FieldKind::Group { end: GroupEnd::Remaining, .. }
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_int_spec_bounds() {
        assert_eq!(IntSpec::unsigned(1).max_value(), 255);
        assert_eq!(IntSpec::unsigned(2).max_value(), 65_535);
        assert_eq!(IntSpec::unsigned(1).min_value(), 0);
        assert_eq!(IntSpec::signed(1).min_value(), -128);
        assert_eq!(IntSpec::signed(1).max_value(), 127);
        assert_eq!(IntSpec::signed(4).min_value(), i64::from(i32::MIN));
        assert_eq!(IntSpec::unsigned(4).max_value(), i64::from(u32::MAX));
    }

    #[test]
    fn test_bit_part_shift_derived_from_mask() {
        let part = BitPart::uint("screenSettings", 0x38);
        assert_eq!(part.shift, 3);
        assert_eq!(part.max_value(), 7);

        let flag = BitPart::flag("moreData", 0x80);
        assert_eq!(flag.shift, 7);
        assert_eq!(flag.max_value(), 1);
    }

    #[test]
    fn test_fixed_width() {
        let field = Field {
            name: "seqNo",
            kind: FieldKind::Int(IntSpec::unsigned(2)),
        };
        assert_eq!(field.fixed_width(), Some(2));

        let open = Field {
            name: "data",
            kind: FieldKind::Bytes(Length::Remaining),
        };
        assert_eq!(open.fixed_width(), None);
        assert!(open.is_open_ended());
    }
}
