//! Lazy iteration over the elements of a variant group.

use zwcmd_schema::{Field, GroupEnd};

use crate::decode::{decode_fields, Cursor};
use crate::error::DecodeError;
use crate::value::FieldMap;

/// Decodes one group element at a time from a buffer region.
///
/// The iterator is finite, fallible, and non-restartable: it is bound to
/// one decode call's buffer and stops permanently after the first error or
/// after its termination policy is satisfied. Each yielded element is a
/// fully decoded [`FieldMap`]; the cursor must advance on every element,
/// and a stalled iteration is reported as [`DecodeError::GroupStalled`]
/// rather than looping.
#[derive(Debug)]
pub struct GroupIter<'a> {
    name: &'static str,
    fields: &'a [Field],
    cursor: Cursor<'a>,
    outer: &'a FieldMap,
    remaining_count: Option<usize>,
    marker: Option<&'static [u8]>,
    done: bool,
}

impl<'a> GroupIter<'a> {
    /// Iterate group elements over `region`, which starts at the group's
    /// first byte.
    ///
    /// `outer` is the enclosing message's decoded fields; a `CountedBy`
    /// policy resolves its element count there, and element fields may
    /// resolve counted-byte references against it as well.
    pub fn over(
        name: &'static str,
        fields: &'a [Field],
        region: &'a [u8],
        end: &GroupEnd,
        outer: &'a FieldMap,
    ) -> Result<Self, DecodeError> {
        let (remaining_count, marker) = match *end {
            GroupEnd::Remaining => (None, None),
            GroupEnd::CountedBy(count) => {
                let value = outer
                    .int(count)
                    .ok_or(DecodeError::MissingCount { field: name, count })?;
                (Some(usize::try_from(value).unwrap_or(0)), None)
            }
            GroupEnd::Marker(marker) => (None, Some(marker)),
        };
        Ok(Self {
            name,
            fields,
            cursor: Cursor::new(region),
            outer,
            remaining_count,
            marker,
            done: false,
        })
    }

    /// Bytes consumed from the region so far, including a consumed marker.
    pub fn position(&self) -> usize {
        self.cursor.position()
    }
}

impl Iterator for GroupIter<'_> {
    type Item = Result<FieldMap, DecodeError>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.done {
            return None;
        }

        if let Some(marker) = self.marker {
            if self.cursor.starts_with(marker) {
                self.cursor.advance(marker.len());
                self.done = true;
                return None;
            }
            if self.cursor.at_end() {
                self.done = true;
                return Some(Err(DecodeError::MarkerNotFound {
                    field: self.name,
                    marker,
                }));
            }
        } else if let Some(count) = self.remaining_count {
            if count == 0 {
                self.done = true;
                return None;
            }
        } else if self.cursor.at_end() {
            self.done = true;
            return None;
        }

        let before = self.cursor.position();
        let mut element = FieldMap::new();
        if let Err(err) = decode_fields(self.fields, &mut self.cursor, &mut element, Some(self.outer))
        {
            self.done = true;
            return Some(Err(err));
        }

        if self.cursor.position() == before {
            self.done = true;
            return Some(Err(DecodeError::GroupStalled { field: self.name }));
        }

        if let Some(count) = self.remaining_count.as_mut() {
            *count -= 1;
        }
        Some(Ok(element))
    }
}

#[cfg(test)]
mod tests {
    use zwcmd_schema::{FieldKind, IntSpec};

    use super::*;

    fn u16_field(name: &'static str) -> Field {
        Field {
            name,
            kind: FieldKind::Int(IntSpec::unsigned(2)),
        }
    }

    #[test]
    fn test_remaining_policy_drains_region() {
        let fields = [u16_field("firmwareId")];
        let outer = FieldMap::new();
        let region = [0x11, 0x22, 0x33, 0x44];

        let mut iter =
            GroupIter::over("targets", &fields, &region, &GroupEnd::Remaining, &outer).unwrap();
        let elements: Vec<_> = iter.by_ref().collect::<Result<_, _>>().unwrap();

        assert_eq!(elements.len(), 2);
        assert_eq!(elements[0].int("firmwareId"), Some(0x1122));
        assert_eq!(iter.position(), 4);
    }

    #[test]
    fn test_empty_region_yields_no_elements() {
        let fields = [u16_field("firmwareId")];
        let outer = FieldMap::new();

        let mut iter =
            GroupIter::over("targets", &fields, &[], &GroupEnd::Remaining, &outer).unwrap();
        assert!(iter.next().is_none());
        assert_eq!(iter.position(), 0);
    }

    #[test]
    fn test_counted_policy_reads_count_from_outer() {
        let fields = [u16_field("firmwareId")];
        let outer = FieldMap::new().with("numberOfFirmwareTargets", 1u8);
        let region = [0x11, 0x22, 0x33, 0x44];

        let mut iter = GroupIter::over(
            "targets",
            &fields,
            &region,
            &GroupEnd::CountedBy("numberOfFirmwareTargets"),
            &outer,
        )
        .unwrap();
        let elements: Vec<_> = iter.by_ref().collect::<Result<_, _>>().unwrap();

        assert_eq!(elements.len(), 1);
        assert_eq!(iter.position(), 2);
    }

    #[test]
    fn test_counted_policy_requires_decoded_count() {
        let fields = [u16_field("firmwareId")];
        let outer = FieldMap::new();

        let err = GroupIter::over(
            "targets",
            &fields,
            &[0x11, 0x22],
            &GroupEnd::CountedBy("numberOfFirmwareTargets"),
            &outer,
        )
        .unwrap_err();
        assert!(matches!(err, DecodeError::MissingCount { .. }));
    }

    #[test]
    fn test_marker_policy_consumes_marker() {
        let fields = [u16_field("entry")];
        let outer = FieldMap::new();
        let region = [0x11, 0x22, 0xF1, 0x00, 0x99];

        let mut iter = GroupIter::over(
            "entries",
            &fields,
            &region,
            &GroupEnd::Marker(&[0xF1, 0x00]),
            &outer,
        )
        .unwrap();
        let elements: Vec<_> = iter.by_ref().collect::<Result<_, _>>().unwrap();

        assert_eq!(elements.len(), 1);
        // Marker consumed, trailing 0x99 left for the caller.
        assert_eq!(iter.position(), 4);
    }

    #[test]
    fn test_marker_policy_without_marker_fails() {
        let fields = [u16_field("entry")];
        let outer = FieldMap::new();
        let region = [0x11, 0x22];

        let mut iter = GroupIter::over(
            "entries",
            &fields,
            &region,
            &GroupEnd::Marker(&[0xF1, 0x00]),
            &outer,
        )
        .unwrap();
        assert!(iter.next().unwrap().is_ok());
        assert!(matches!(
            iter.next().unwrap(),
            Err(DecodeError::MarkerNotFound { .. })
        ));
        // Non-restartable after the error.
        assert!(iter.next().is_none());
    }
}
