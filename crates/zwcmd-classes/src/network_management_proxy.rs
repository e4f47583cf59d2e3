//! Command Class Network Management Proxy (0x52), version 1.

use std::sync::LazyLock;

use zwcmd_schema::{BitPart, ConstantTable, MessageSchema, NODE_ID};

/// Command class key for COMMAND_CLASS_NETWORK_MANAGEMENT_PROXY.
pub const COMMAND_CLASS: u8 = 0x52;

pub const NODE_LIST_GET: u8 = 0x01;
pub const NODE_LIST_REPORT: u8 = 0x02;
pub const NODE_INFO_CACHED_GET: u8 = 0x03;
pub const NODE_INFO_CACHED_REPORT: u8 = 0x04;

/// Separates the non-secure command-class list from the security-scheme-0
/// list in a cached node info report.
pub const SECURITY_SCHEME_0_MARK: [u8; 2] = [0xF1, 0x00];

/// Freshness of a reported node list.
pub static NODE_LIST_STATUS: LazyLock<ConstantTable> = LazyLock::new(|| {
    ConstantTable::new(
        "status",
        &[(0x00, "LATEST"), (0x01, "MAY_NOT_BE_THE_LATEST")],
    )
    .expect("node list status table")
});

/// Cached node status, packed into the high nibble of properties1.
pub static NODE_STATUS: LazyLock<ConstantTable> = LazyLock::new(|| {
    ConstantTable::new(
        "status",
        &[
            (0x00, "STATUS_OK"),
            (0x01, "STATUS_NOT_RESPONDING"),
            (0x02, "STATUS_UNKNOWN"),
        ],
    )
    .expect("node status table")
});

pub static LIST_GET: LazyLock<MessageSchema> = LazyLock::new(|| {
    MessageSchema::builder(COMMAND_CLASS, NODE_LIST_GET, "NODE_LIST_GET")
        .u8("seqNo")
        .finish()
        .expect("NODE_LIST_GET layout")
});

pub static LIST_REPORT: LazyLock<MessageSchema> = LazyLock::new(|| {
    MessageSchema::builder(COMMAND_CLASS, NODE_LIST_REPORT, "NODE_LIST_REPORT")
        .u8("seqNo")
        .enum_byte("status", &NODE_LIST_STATUS)
        .u8("nodeListControllerId")
        .bytes_remaining("nodeListData")
        .finish()
        .expect("NODE_LIST_REPORT layout")
});

pub static INFO_CACHED_GET: LazyLock<MessageSchema> = LazyLock::new(|| {
    MessageSchema::builder(COMMAND_CLASS, NODE_INFO_CACHED_GET, "NODE_INFO_CACHED_GET")
        .u8("seqNo")
        .bits("properties1", vec![BitPart::uint("maxAge", 0x0F)])
        .u8("nodeId")
        .rule("nodeId", NODE_ID)
        .finish()
        .expect("NODE_INFO_CACHED_GET layout")
});

pub static INFO_CACHED_REPORT: LazyLock<MessageSchema> = LazyLock::new(|| {
    MessageSchema::builder(
        COMMAND_CLASS,
        NODE_INFO_CACHED_REPORT,
        "NODE_INFO_CACHED_REPORT",
    )
    .u8("seqNo")
    .bits(
        "properties1",
        vec![
            BitPart::uint("age", 0x0F),
            BitPart::enumerated("status", 0xF0, &NODE_STATUS),
        ],
    )
    .bits(
        "properties2",
        vec![BitPart::uint("capability", 0x7F), BitPart::flag("listening", 0x80)],
    )
    .bits(
        "properties3",
        vec![
            BitPart::uint("security", 0x0F),
            BitPart::uint("sensor", 0x70),
            BitPart::flag("opt", 0x80),
        ],
    )
    .u8("reserved")
    .u8("basicDeviceClass")
    .u8("genericDeviceClass")
    .u8("specificDeviceClass")
    .bytes_until("nonSecureCommandClass", &SECURITY_SCHEME_0_MARK)
    .bytes_remaining("securityScheme0CommandClass")
    .finish()
    .expect("NODE_INFO_CACHED_REPORT layout")
});

#[cfg(test)]
mod tests {
    use zwcmd_codec::{decode, encode, DecodeError, FieldMap};

    use super::*;

    #[test]
    fn test_node_list_report_takes_rest_of_buffer() {
        let frame = [0x52, 0x02, 0x07, 0x00, 0x01, 0xFF, 0x1F, 0x00];
        let fields = decode(&LIST_REPORT, &frame).unwrap();
        assert_eq!(fields.int("seqNo"), Some(7));
        assert_eq!(fields.name("status"), Some("LATEST"));
        assert_eq!(fields.bytes("nodeListData"), Some(&[0xFFu8, 0x1F, 0x00][..]));
        assert_eq!(encode(&LIST_REPORT, &fields).unwrap().as_ref(), &frame);
    }

    #[test]
    fn test_info_cached_report_marker_split() {
        let frame = [
            0x52, 0x04, 0x01, // seqNo
            0x12, // age = 2, status = STATUS_NOT_RESPONDING
            0x9C, // capability = 0x1C, listening
            0x71, // security = 1, sensor = 7
            0x00, // reserved
            0x04, 0x10, 0x01, // device classes
            0x20, 0x26, // non-secure classes
            0xF1, 0x00, // mark
            0x85, // scheme 0 classes
        ];
        let fields = decode(&INFO_CACHED_REPORT, &frame).unwrap();
        assert_eq!(fields.int("age"), Some(2));
        assert_eq!(fields.name("status"), Some("STATUS_NOT_RESPONDING"));
        assert_eq!(fields.flag("listening"), Some(true));
        assert_eq!(fields.int("sensor"), Some(7));
        assert_eq!(
            fields.bytes("nonSecureCommandClass"),
            Some(&[0x20u8, 0x26][..])
        );
        assert_eq!(
            fields.bytes("securityScheme0CommandClass"),
            Some(&[0x85u8][..])
        );

        assert_eq!(encode(&INFO_CACHED_REPORT, &fields).unwrap().as_ref(), &frame);
    }

    #[test]
    fn test_info_cached_report_without_mark_fails() {
        let frame = [
            0x52, 0x04, 0x01, 0x12, 0x9C, 0x71, 0x00, 0x04, 0x10, 0x01, 0x20, 0x26,
        ];
        assert!(matches!(
            decode(&INFO_CACHED_REPORT, &frame),
            Err(DecodeError::MarkerNotFound { .. })
        ));
    }

    #[test]
    fn test_info_cached_get_roundtrip() {
        let values = FieldMap::new()
            .with("seqNo", 3u8)
            .with("maxAge", 5i64)
            .with("nodeId", 12u8);
        let frame = encode(&INFO_CACHED_GET, &values).unwrap();
        assert_eq!(frame.as_ref(), &[0x52, 0x03, 0x03, 0x05, 0x0C]);
        assert_eq!(decode(&INFO_CACHED_GET, &frame).unwrap(), values);
    }
}
