//! Registry-driven end-to-end checks over the catalog.

use zwcmd_classes::{lookup, registry};
use zwcmd_codec::{decode, encode, DecodeError, FieldMap};

#[test]
fn test_dispatch_then_decode_then_reencode() {
    // The frames a dispatch layer would feed us: header bytes select the
    // schema, the codec does the rest.
    let frames: &[&[u8]] = &[
        &[0x71, 0x04, 0x05, 0x02],
        &[0x75, 0x01, 0x01],
        &[0x26, 0x03, 0xFF],
        &[0x24, 0x05, 0x04],
        &[0x7C, 0x01, 0x03],
        &[0x2D, 0x01, 0x02, 0x0E, 0x00],
        &[0x52, 0x01, 0x07],
        &[0x89, 0x01, b'd', b'e', b'u', b'D', b'E'],
    ];

    for frame in frames {
        let schema = lookup(frame[0], frame[1]).unwrap();
        let fields = decode(schema, frame).unwrap();
        let reencoded = encode(schema, &fields).unwrap();
        assert_eq!(&reencoded.as_ref(), frame, "{}", schema.name());
    }
}

#[test]
fn test_every_catalog_schema_accepts_its_own_header() {
    for schema in registry::all() {
        let header = schema.header();
        let result = decode(schema, &header);
        // Empty-payload messages decode; the rest fail cleanly with a
        // truncation error, never a panic or a partial map.
        match result {
            Ok(fields) => {
                let reencoded = encode(schema, &fields).unwrap();
                assert_eq!(reencoded.as_ref(), header, "{}", schema.name());
            }
            Err(err) => assert!(
                matches!(
                    err,
                    DecodeError::TruncatedBuffer { .. } | DecodeError::MarkerNotFound { .. }
                ),
                "{}: {err}",
                schema.name()
            ),
        }
    }
}

#[test]
fn test_catalog_headers_are_unique() {
    let mut seen = std::collections::HashSet::new();
    for schema in registry::all() {
        assert!(
            seen.insert(schema.header()),
            "duplicate header {:02X?} for {}",
            schema.header(),
            schema.name()
        );
    }
}

#[test]
fn test_unknown_header_has_no_schema() {
    assert!(lookup(0x00, 0x00).is_none());
}

#[test]
fn test_documented_alarm_get_scenario() {
    let schema = lookup(0x71, 0x04).unwrap();

    let values = FieldMap::new()
        .with("alarmType", 5u8)
        .with("zwaveAlarmType", "CO");
    assert_eq!(
        encode(schema, &values).unwrap().as_ref(),
        &[0x71, 0x04, 0x05, 0x02]
    );

    let fields = decode(schema, &[0x71, 0x04, 0x05, 0x02]).unwrap();
    assert_eq!(fields, values);
}
