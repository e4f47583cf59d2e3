//! Message layouts and the builder that validates them.

use crate::constants::ConstantTable;
use crate::error::{Result, SchemaError};
use crate::field::{BitKind, BitPart, Field, FieldKind, GroupEnd, IntSpec, Length};
use crate::rules::Rule;

/// The immutable byte layout of one command message.
///
/// A schema is built once from static protocol tables and shared read-only
/// across every encode and decode call; nothing mutates it afterwards, so
/// concurrent use needs no locking.
#[derive(Debug)]
pub struct MessageSchema {
    command_class: u8,
    command: u8,
    name: &'static str,
    fields: Vec<Field>,
    rules: Vec<(&'static str, Rule)>,
}

impl MessageSchema {
    /// Start building a schema for `(command_class, command)`.
    pub fn builder(command_class: u8, command: u8, name: &'static str) -> SchemaBuilder {
        SchemaBuilder {
            command_class,
            command,
            name,
            fields: Vec::new(),
            rules: Vec::new(),
        }
    }

    /// Command-class byte, the first byte of every frame.
    pub fn command_class(&self) -> u8 {
        self.command_class
    }

    /// Command byte, the second byte of every frame.
    pub fn command(&self) -> u8 {
        self.command
    }

    /// Symbolic message name, e.g. `ALARM_GET`.
    pub fn name(&self) -> &'static str {
        self.name
    }

    /// The two header bytes.
    pub fn header(&self) -> [u8; 2] {
        [self.command_class, self.command]
    }

    /// Payload fields in wire order.
    pub fn fields(&self) -> &[Field] {
        &self.fields
    }

    /// Attached validation rules as `(field, rule)` pairs.
    pub fn rules(&self) -> &[(&'static str, Rule)] {
        &self.rules
    }

    /// The rule attached to `field`, if any.
    pub fn rule_for(&self, field: &str) -> Option<&Rule> {
        self.rules
            .iter()
            .find(|(name, _)| *name == field)
            .map(|(_, rule)| rule)
    }
}

/// Fluent builder for [`MessageSchema`].
///
/// Field methods only record the layout; every structural check runs in
/// [`finish`](Self::finish) so a malformed layout is rejected before any
/// frame is ever encoded or decoded with it.
pub struct SchemaBuilder {
    command_class: u8,
    command: u8,
    name: &'static str,
    fields: Vec<Field>,
    rules: Vec<(&'static str, Rule)>,
}

impl SchemaBuilder {
    /// Unsigned single byte.
    pub fn u8(mut self, name: &'static str) -> Self {
        self.fields.push(Field {
            name,
            kind: FieldKind::Int(IntSpec::unsigned(1)),
        });
        self
    }

    /// Unsigned big-endian 16-bit integer.
    pub fn u16_be(mut self, name: &'static str) -> Self {
        self.fields.push(Field {
            name,
            kind: FieldKind::Int(IntSpec::unsigned(2)),
        });
        self
    }

    /// Unsigned big-endian 32-bit integer.
    pub fn u32_be(mut self, name: &'static str) -> Self {
        self.fields.push(Field {
            name,
            kind: FieldKind::Int(IntSpec::unsigned(4)),
        });
        self
    }

    /// Integer with an explicit shape.
    pub fn int(mut self, name: &'static str, spec: IntSpec) -> Self {
        self.fields.push(Field {
            name,
            kind: FieldKind::Int(spec),
        });
        self
    }

    /// One byte packed with named bit parts.
    pub fn bits(mut self, name: &'static str, parts: Vec<BitPart>) -> Self {
        self.fields.push(Field {
            name,
            kind: FieldKind::Bits(parts),
        });
        self
    }

    /// One byte resolved through a constant table.
    pub fn enum_byte(mut self, name: &'static str, table: &'static ConstantTable) -> Self {
        self.fields.push(Field {
            name,
            kind: FieldKind::Enum(table),
        });
        self
    }

    /// Byte run consuming the rest of the buffer. Must be the last field.
    pub fn bytes_remaining(mut self, name: &'static str) -> Self {
        self.fields.push(Field {
            name,
            kind: FieldKind::Bytes(Length::Remaining),
        });
        self
    }

    /// Byte run consuming all but the last `reserve` bytes, which belong to
    /// trailing fixed-width fields.
    pub fn bytes_remaining_less(mut self, name: &'static str, reserve: usize) -> Self {
        self.fields.push(Field {
            name,
            kind: FieldKind::Bytes(Length::RemainingLess(reserve)),
        });
        self
    }

    /// Byte run of a fixed size.
    pub fn bytes_fixed(mut self, name: &'static str, len: usize) -> Self {
        self.fields.push(Field {
            name,
            kind: FieldKind::Bytes(Length::Fixed(len)),
        });
        self
    }

    /// Byte run whose length an earlier integer field records.
    pub fn bytes_counted(mut self, name: &'static str, count: &'static str) -> Self {
        self.fields.push(Field {
            name,
            kind: FieldKind::Bytes(Length::CountedBy(count)),
        });
        self
    }

    /// Byte run ending at (and consuming) a marker sequence.
    pub fn bytes_until(mut self, name: &'static str, marker: &'static [u8]) -> Self {
        self.fields.push(Field {
            name,
            kind: FieldKind::Bytes(Length::UntilMarker(marker)),
        });
        self
    }

    /// Repeated sub-structure. The closure declares the element layout.
    pub fn group<F>(mut self, name: &'static str, end: GroupEnd, build: F) -> Self
    where
        F: FnOnce(GroupBuilder) -> GroupBuilder,
    {
        let group = build(GroupBuilder { fields: Vec::new() });
        self.fields.push(Field {
            name,
            kind: FieldKind::Group {
                fields: group.fields,
                end,
            },
        });
        self
    }

    /// Attach a validation rule to an integer field declared earlier.
    pub fn rule(mut self, field: &'static str, rule: Rule) -> Self {
        self.rules.push((field, rule));
        self
    }

    /// Validate the layout and freeze it into a [`MessageSchema`].
    pub fn finish(self) -> Result<MessageSchema> {
        validate_scope(&self.fields, &[], true)?;

        for (field, rule) in &self.rules {
            if !scope_has_integer(&self.fields, field) {
                return Err(SchemaError::RuleTarget {
                    rule: rule.name,
                    field,
                });
            }
        }

        Ok(MessageSchema {
            command_class: self.command_class,
            command: self.command,
            name: self.name,
            fields: self.fields,
            rules: self.rules,
        })
    }
}

/// Builder for the fields of one group element.
///
/// Deliberately smaller than [`SchemaBuilder`]: groups cannot nest, and the
/// open-ended length policies only make sense at message scope.
pub struct GroupBuilder {
    fields: Vec<Field>,
}

impl GroupBuilder {
    /// Unsigned single byte.
    pub fn u8(mut self, name: &'static str) -> Self {
        self.fields.push(Field {
            name,
            kind: FieldKind::Int(IntSpec::unsigned(1)),
        });
        self
    }

    /// Unsigned big-endian 16-bit integer.
    pub fn u16_be(mut self, name: &'static str) -> Self {
        self.fields.push(Field {
            name,
            kind: FieldKind::Int(IntSpec::unsigned(2)),
        });
        self
    }

    /// Integer with an explicit shape.
    pub fn int(mut self, name: &'static str, spec: IntSpec) -> Self {
        self.fields.push(Field {
            name,
            kind: FieldKind::Int(spec),
        });
        self
    }

    /// One byte packed with named bit parts.
    pub fn bits(mut self, name: &'static str, parts: Vec<BitPart>) -> Self {
        self.fields.push(Field {
            name,
            kind: FieldKind::Bits(parts),
        });
        self
    }

    /// One byte resolved through a constant table.
    pub fn enum_byte(mut self, name: &'static str, table: &'static ConstantTable) -> Self {
        self.fields.push(Field {
            name,
            kind: FieldKind::Enum(table),
        });
        self
    }

    /// Byte run of a fixed size.
    pub fn bytes_fixed(mut self, name: &'static str, len: usize) -> Self {
        self.fields.push(Field {
            name,
            kind: FieldKind::Bytes(Length::Fixed(len)),
        });
        self
    }

    /// Byte run whose length an integer field records (element scope first,
    /// then message scope).
    pub fn bytes_counted(mut self, name: &'static str, count: &'static str) -> Self {
        self.fields.push(Field {
            name,
            kind: FieldKind::Bytes(Length::CountedBy(count)),
        });
        self
    }

    /// Byte run ending at (and consuming) a marker sequence.
    pub fn bytes_until(mut self, name: &'static str, marker: &'static [u8]) -> Self {
        self.fields.push(Field {
            name,
            kind: FieldKind::Bytes(Length::UntilMarker(marker)),
        });
        self
    }
}

/// Names an integer value can be read from: plain integer fields and the
/// uint parts of packed bytes.
fn integer_names(fields: &[Field]) -> Vec<&'static str> {
    let mut names = Vec::new();
    for field in fields {
        match &field.kind {
            FieldKind::Int(_) => names.push(field.name),
            FieldKind::Bits(parts) => {
                for part in parts {
                    if matches!(part.kind, BitKind::Uint) {
                        names.push(part.name);
                    }
                }
            }
            _ => {}
        }
    }
    names
}

fn scope_has_integer(fields: &[Field], name: &str) -> bool {
    integer_names(fields).contains(&name)
}

/// Structural checks for one field scope (the message or one group element).
///
/// `outer_integers` carries the integer names visible from an enclosing
/// scope; `is_message_scope` gates group declarations and the
/// `RemainingLess` policy.
fn validate_scope(
    fields: &[Field],
    outer_integers: &[&'static str],
    is_message_scope: bool,
) -> Result<()> {
    let mut seen: Vec<&'static str> = Vec::new();
    let mut integers: Vec<&'static str> = outer_integers.to_vec();
    let mut open_after: Option<(&'static str, usize)> = None;

    for field in fields {
        // Nothing may follow a field that consumes the rest of the buffer;
        // after RemainingLess(n), only fixed-width fields totaling n.
        if let Some((after, reserve)) = open_after {
            match field.fixed_width() {
                Some(width) if width <= reserve => {
                    open_after = Some((after, reserve - width));
                }
                _ => {
                    if reserve == 0 {
                        return Err(SchemaError::TrailingFields {
                            field: field.name,
                            after,
                        });
                    }
                    return Err(SchemaError::BadTail {
                        field: after,
                        reserved: reserve,
                    });
                }
            }
        }

        record_name(&mut seen, field.name)?;

        match &field.kind {
            FieldKind::Int(spec) => {
                if spec.width == 0 || spec.width > 4 {
                    return Err(SchemaError::BadIntWidth {
                        field: field.name,
                        width: spec.width,
                    });
                }
                integers.push(field.name);
            }
            FieldKind::Bits(parts) => {
                if parts.is_empty() {
                    return Err(SchemaError::EmptyBits { field: field.name });
                }
                let mut used = 0u8;
                for part in parts {
                    if part.mask == 0 {
                        return Err(SchemaError::EmptyMask {
                            field: field.name,
                            part: part.name,
                        });
                    }
                    if used & part.mask != 0 {
                        return Err(SchemaError::OverlappingBits {
                            field: field.name,
                            part: part.name,
                            mask: part.mask,
                        });
                    }
                    used |= part.mask;
                    record_name(&mut seen, part.name)?;
                    if matches!(part.kind, BitKind::Uint) {
                        integers.push(part.name);
                    }
                }
            }
            FieldKind::Enum(_) => {}
            FieldKind::Bytes(length) => match length {
                Length::CountedBy(count) => {
                    check_count_ref(field.name, count, &integers, &seen)?;
                }
                Length::UntilMarker(marker) => {
                    if marker.is_empty() {
                        return Err(SchemaError::EmptyMarker { field: field.name });
                    }
                }
                Length::Remaining => {
                    open_after = Some((field.name, 0));
                }
                Length::RemainingLess(reserve) => {
                    if !is_message_scope {
                        return Err(SchemaError::BadTail {
                            field: field.name,
                            reserved: *reserve,
                        });
                    }
                    open_after = Some((field.name, *reserve));
                }
                Length::Fixed(_) => {}
            },
            FieldKind::Group { fields: sub, end } => {
                if !is_message_scope {
                    // GroupBuilder cannot express this, but hand-built
                    // Field values could.
                    return Err(SchemaError::NestedGroup { field: field.name });
                }
                if sub.is_empty() {
                    return Err(SchemaError::EmptyGroup { field: field.name });
                }
                match end {
                    GroupEnd::CountedBy(count) => {
                        check_count_ref(field.name, count, &integers, &seen)?;
                    }
                    GroupEnd::Marker(marker) => {
                        if marker.is_empty() {
                            return Err(SchemaError::EmptyMarker { field: field.name });
                        }
                    }
                    GroupEnd::Remaining => {
                        open_after = Some((field.name, 0));
                    }
                }
                validate_scope(sub, &integers, false)?;
            }
        }
    }

    // A RemainingLess tail that was never fully covered by trailing fields.
    if let Some((after, reserve)) = open_after {
        if reserve != 0 {
            return Err(SchemaError::BadTail {
                field: after,
                reserved: reserve,
            });
        }
    }

    Ok(())
}

fn record_name(seen: &mut Vec<&'static str>, name: &'static str) -> Result<()> {
    if seen.contains(&name) {
        return Err(SchemaError::DuplicateField { field: name });
    }
    seen.push(name);
    Ok(())
}

fn check_count_ref(
    field: &'static str,
    count: &'static str,
    integers: &[&'static str],
    seen: &[&'static str],
) -> Result<()> {
    if integers.contains(&count) {
        return Ok(());
    }
    if seen.contains(&count) {
        return Err(SchemaError::CountFieldNotInteger { field, count });
    }
    Err(SchemaError::UnknownCountField { field, count })
}
