//! Schema-driven frame encoding.

use bytes::{BufMut, Bytes, BytesMut};
use tracing::debug;
use zwcmd_schema::{
    bits, BitKind, ByteOrder, Field, FieldKind, GroupEnd, IntSpec, Length, MessageSchema, Rule,
};

use crate::error::EncodeError;
use crate::value::FieldMap;

/// Encode a frame from typed values against its schema.
///
/// Emits the two header bytes, then every field in schema order. The output
/// length is a pure function of the inputs; on any error nothing is
/// returned, never a partial buffer.
pub fn encode(schema: &MessageSchema, values: &FieldMap) -> Result<Bytes, EncodeError> {
    debug!(message = schema.name(), "encoding frame");

    let mut out = BytesMut::with_capacity(2 + schema.fields().len() * 2);
    out.put_u8(schema.command_class());
    out.put_u8(schema.command());
    encode_fields(schema.fields(), values, None, schema.rules(), &mut out)?;
    Ok(out.freeze())
}

fn encode_fields(
    fields: &[Field],
    values: &FieldMap,
    outer: Option<&FieldMap>,
    rules: &[(&'static str, Rule)],
    out: &mut BytesMut,
) -> Result<(), EncodeError> {
    for field in fields {
        match &field.kind {
            FieldKind::Int(spec) => {
                let value = values
                    .int(field.name)
                    .ok_or_else(|| EncodeError::mismatch(field.name, "expected an integer"))?;
                if let Some((_, rule)) = rules.iter().find(|(name, _)| *name == field.name) {
                    if !rule.check(value) {
                        return Err(EncodeError::range(field.name, rule, value));
                    }
                }
                if value < spec.min_value() || value > spec.max_value() {
                    return Err(EncodeError::mismatch(
                        field.name,
                        format!("{value} does not fit a {}-byte integer", spec.width),
                    ));
                }
                put_int(out, spec, value);
            }
            FieldKind::Bits(parts) => {
                let mut byte = 0u8;
                for part in parts {
                    let raw = match part.kind {
                        BitKind::Flag => {
                            let set = values.flag(part.name).ok_or_else(|| {
                                EncodeError::mismatch(part.name, "expected a flag")
                            })?;
                            u8::from(set)
                        }
                        BitKind::Uint => {
                            let value = values.int(part.name).ok_or_else(|| {
                                EncodeError::mismatch(part.name, "expected an integer")
                            })?;
                            if let Some((_, rule)) =
                                rules.iter().find(|(name, _)| *name == part.name)
                            {
                                if !rule.check(value) {
                                    return Err(EncodeError::range(part.name, rule, value));
                                }
                            }
                            if value < 0 || value > i64::from(part.max_value()) {
                                return Err(EncodeError::mismatch(
                                    part.name,
                                    format!("{value} does not fit mask {:#04x}", part.mask),
                                ));
                            }
                            value as u8
                        }
                        BitKind::Enum(table) => {
                            let name = values.name(part.name).ok_or_else(|| {
                                EncodeError::mismatch(part.name, "expected a symbolic name")
                            })?;
                            let raw = table.byte_of(name).ok_or_else(|| {
                                EncodeError::UnknownEnumValue {
                                    field: part.name,
                                    table: table.name(),
                                    name: name.to_string(),
                                }
                            })?;
                            if raw > part.max_value() {
                                return Err(EncodeError::mismatch(
                                    part.name,
                                    format!("table value {raw:#04x} does not fit mask {:#04x}", part.mask),
                                ));
                            }
                            raw
                        }
                    };
                    byte = bits::pack(byte, part.mask, part.shift, raw);
                }
                out.put_u8(byte);
            }
            FieldKind::Enum(table) => {
                let name = values
                    .name(field.name)
                    .ok_or_else(|| EncodeError::mismatch(field.name, "expected a symbolic name"))?;
                let byte = table
                    .byte_of(name)
                    .ok_or_else(|| EncodeError::UnknownEnumValue {
                        field: field.name,
                        table: table.name(),
                        name: name.to_string(),
                    })?;
                out.put_u8(byte);
            }
            FieldKind::Bytes(length) => {
                let bytes = values
                    .bytes(field.name)
                    .ok_or_else(|| EncodeError::mismatch(field.name, "expected a byte run"))?;
                match length {
                    Length::Remaining | Length::RemainingLess(_) => {}
                    Length::Fixed(n) => {
                        if bytes.len() != *n {
                            return Err(EncodeError::mismatch(
                                field.name,
                                format!("expected exactly {n} bytes, got {}", bytes.len()),
                            ));
                        }
                    }
                    Length::CountedBy(count) => {
                        let declared = lookup_count(field.name, count, values, outer)?;
                        if declared != bytes.len() as i64 {
                            return Err(EncodeError::mismatch(
                                field.name,
                                format!(
                                    "count field '{count}' records {declared} bytes, value has {}",
                                    bytes.len()
                                ),
                            ));
                        }
                    }
                    Length::UntilMarker(marker) => {
                        if contains(bytes, marker) {
                            return Err(EncodeError::mismatch(
                                field.name,
                                format!("value contains the delimiting marker {marker:02X?}"),
                            ));
                        }
                    }
                }
                out.put_slice(bytes);
                if let Length::UntilMarker(marker) = length {
                    out.put_slice(marker);
                }
            }
            FieldKind::Group { fields: sub, end } => {
                let elements = values
                    .group(field.name)
                    .ok_or_else(|| EncodeError::mismatch(field.name, "expected group elements"))?;
                match end {
                    GroupEnd::CountedBy(count) => {
                        let declared = lookup_count(field.name, count, values, outer)?;
                        if declared != elements.len() as i64 {
                            return Err(EncodeError::mismatch(
                                field.name,
                                format!(
                                    "count field '{count}' records {declared} elements, value has {}",
                                    elements.len()
                                ),
                            ));
                        }
                        for element in elements {
                            encode_fields(sub, element, Some(values), &[], out)?;
                        }
                    }
                    GroupEnd::Remaining => {
                        for element in elements {
                            encode_fields(sub, element, Some(values), &[], out)?;
                        }
                    }
                    GroupEnd::Marker(marker) => {
                        for element in elements {
                            let mut encoded = BytesMut::new();
                            encode_fields(sub, element, Some(values), &[], &mut encoded)?;
                            if encoded.starts_with(marker) {
                                return Err(EncodeError::mismatch(
                                    field.name,
                                    format!(
                                        "element encoding starts with the group marker {marker:02X?}"
                                    ),
                                ));
                            }
                            out.put_slice(&encoded);
                        }
                        out.put_slice(marker);
                    }
                }
            }
        }
    }
    Ok(())
}

fn put_int(out: &mut BytesMut, spec: &IntSpec, value: i64) {
    let raw = (value as u64).to_be_bytes();
    let wire = &raw[8 - spec.width as usize..];
    match spec.order {
        ByteOrder::BigEndian => out.put_slice(wire),
        ByteOrder::LittleEndian => {
            for &b in wire.iter().rev() {
                out.put_u8(b);
            }
        }
    }
}

fn lookup_count(
    field: &'static str,
    count: &str,
    scope: &FieldMap,
    outer: Option<&FieldMap>,
) -> Result<i64, EncodeError> {
    scope
        .int(count)
        .or_else(|| outer.and_then(|o| o.int(count)))
        .ok_or_else(|| EncodeError::mismatch(field, format!("count field '{count}' is absent")))
}

fn contains(haystack: &[u8], needle: &[u8]) -> bool {
    !needle.is_empty() && haystack.windows(needle.len()).any(|w| w == needle)
}
