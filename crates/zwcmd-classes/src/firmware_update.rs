//! Command Class Firmware Update Md (0x7A), version 4.

use std::sync::LazyLock;

use zwcmd_schema::{BitPart, ConstantTable, GroupEnd, MessageSchema};

/// Command class key for COMMAND_CLASS_FIRMWARE_UPDATE_MD.
pub const COMMAND_CLASS: u8 = 0x7A;

pub const FIRMWARE_MD_GET: u8 = 0x01;
pub const FIRMWARE_MD_REPORT: u8 = 0x02;
pub const FIRMWARE_UPDATE_MD_REQUEST_GET: u8 = 0x03;
pub const FIRMWARE_UPDATE_MD_REQUEST_REPORT: u8 = 0x04;
pub const FIRMWARE_UPDATE_MD_GET: u8 = 0x05;
pub const FIRMWARE_UPDATE_MD_REPORT: u8 = 0x06;
pub const FIRMWARE_UPDATE_MD_STATUS_REPORT: u8 = 0x07;
pub const FIRMWARE_UPDATE_ACTIVATION_SET: u8 = 0x08;
pub const FIRMWARE_UPDATE_ACTIVATION_STATUS_REPORT: u8 = 0x09;

/// Status values for the final transfer report.
pub static STATUS_REPORT_STATUS: LazyLock<ConstantTable> = LazyLock::new(|| {
    ConstantTable::new(
        "status",
        &[
            (0x00, "UNABLE_TO_RECEIVE_WITHOUT_CHECKSUM_ERROR"),
            (0x01, "UNABLE_TO_RECEIVE"),
            (0x02, "DOES_NOT_MATCH_THE_MANUFACTURER_ID"),
            (0x03, "DOES_NOT_MATCH_THE_FIRMWARE_ID"),
            (0x04, "DOES_NOT_MATCH_THE_FIRMWARE_TARGET"),
            (0x05, "INVALID_FILE_HEADER_INFORMATION"),
            (0x06, "INVALID_FILE_HEADER_FORMAT"),
            (0x07, "INSUFFICIENT_MEMORY"),
            (0xFD, "SUCCESSFULLY_WAITING_FOR_ACTIVATION"),
            (0xFE, "SUCCESSFULLY_STORED"),
            (0xFF, "SUCCESSFULLY"),
        ],
    )
    .expect("status report table")
});

/// Status values for the request report.
pub static REQUEST_REPORT_STATUS: LazyLock<ConstantTable> = LazyLock::new(|| {
    ConstantTable::new(
        "status",
        &[
            (0x00, "INVALID_COMBINATION"),
            (0x01, "REQUIRES_AUTHENTICATION"),
            (0x02, "INVALID_FRAGMENT_SIZE"),
            (0x03, "NOT_UPGRADABLE"),
            (0xFF, "VALID_COMBINATION"),
        ],
    )
    .expect("request report table")
});

/// Status values for the activation status report.
pub static ACTIVATION_STATUS: LazyLock<ConstantTable> = LazyLock::new(|| {
    ConstantTable::new(
        "firmwareUpdateStatus",
        &[
            (0x00, "INVALID_COMBINATION"),
            (0x01, "ERROR_ACTIVATING_THE_FIRMWARE"),
            (0xFF, "FIRMWARE_UPDATE_COMPLETED_SUCCESSFULLY"),
        ],
    )
    .expect("activation status table")
});

pub static MD_GET: LazyLock<MessageSchema> = LazyLock::new(|| {
    MessageSchema::builder(COMMAND_CLASS, FIRMWARE_MD_GET, "FIRMWARE_MD_GET")
        .finish()
        .expect("FIRMWARE_MD_GET layout")
});

pub static MD_REPORT: LazyLock<MessageSchema> = LazyLock::new(|| {
    MessageSchema::builder(COMMAND_CLASS, FIRMWARE_MD_REPORT, "FIRMWARE_MD_REPORT")
        .u16_be("manufacturerId")
        .u16_be("firmware0Id")
        .u16_be("firmware0Checksum")
        .u8("firmwareUpgradable")
        .u8("numberOfFirmwareTargets")
        .u16_be("maxFragmentSize")
        .group("targets", GroupEnd::CountedBy("numberOfFirmwareTargets"), |g| {
            g.u16_be("firmwareId")
        })
        .finish()
        .expect("FIRMWARE_MD_REPORT layout")
});

pub static REQUEST_GET: LazyLock<MessageSchema> = LazyLock::new(|| {
    MessageSchema::builder(
        COMMAND_CLASS,
        FIRMWARE_UPDATE_MD_REQUEST_GET,
        "FIRMWARE_UPDATE_MD_REQUEST_GET",
    )
    .u16_be("manufacturerId")
    .u16_be("firmwareId")
    .u16_be("checksum")
    .u8("firmwareTarget")
    .u16_be("fragmentSize")
    .bits("properties1", vec![BitPart::flag("activation", 0x01)])
    .finish()
    .expect("FIRMWARE_UPDATE_MD_REQUEST_GET layout")
});

pub static REQUEST_REPORT: LazyLock<MessageSchema> = LazyLock::new(|| {
    MessageSchema::builder(
        COMMAND_CLASS,
        FIRMWARE_UPDATE_MD_REQUEST_REPORT,
        "FIRMWARE_UPDATE_MD_REQUEST_REPORT",
    )
    .enum_byte("status", &REQUEST_REPORT_STATUS)
    .finish()
    .expect("FIRMWARE_UPDATE_MD_REQUEST_REPORT layout")
});

pub static UPDATE_MD_GET: LazyLock<MessageSchema> = LazyLock::new(|| {
    MessageSchema::builder(COMMAND_CLASS, FIRMWARE_UPDATE_MD_GET, "FIRMWARE_UPDATE_MD_GET")
        .u8("numberOfReports")
        .bits(
            "properties1",
            vec![BitPart::uint("reportNumber1", 0x7F), BitPart::flag("zero", 0x80)],
        )
        .u8("reportNumber2")
        .finish()
        .expect("FIRMWARE_UPDATE_MD_GET layout")
});

pub static UPDATE_MD_REPORT: LazyLock<MessageSchema> = LazyLock::new(|| {
    MessageSchema::builder(
        COMMAND_CLASS,
        FIRMWARE_UPDATE_MD_REPORT,
        "FIRMWARE_UPDATE_MD_REPORT",
    )
    .bits(
        "properties1",
        vec![BitPart::uint("reportNumber1", 0x7F), BitPart::flag("last", 0x80)],
    )
    .u8("reportNumber2")
    .bytes_remaining_less("data", 2)
    .u16_be("checksum")
    .finish()
    .expect("FIRMWARE_UPDATE_MD_REPORT layout")
});

pub static STATUS_REPORT: LazyLock<MessageSchema> = LazyLock::new(|| {
    MessageSchema::builder(
        COMMAND_CLASS,
        FIRMWARE_UPDATE_MD_STATUS_REPORT,
        "FIRMWARE_UPDATE_MD_STATUS_REPORT",
    )
    .enum_byte("status", &STATUS_REPORT_STATUS)
    .u16_be("waitTime")
    .finish()
    .expect("FIRMWARE_UPDATE_MD_STATUS_REPORT layout")
});

pub static ACTIVATION_SET: LazyLock<MessageSchema> = LazyLock::new(|| {
    MessageSchema::builder(
        COMMAND_CLASS,
        FIRMWARE_UPDATE_ACTIVATION_SET,
        "FIRMWARE_UPDATE_ACTIVATION_SET",
    )
    .u16_be("manufacturerId")
    .u16_be("firmwareId")
    .u16_be("checksum")
    .u8("firmwareTarget")
    .finish()
    .expect("FIRMWARE_UPDATE_ACTIVATION_SET layout")
});

pub static ACTIVATION_STATUS_REPORT: LazyLock<MessageSchema> = LazyLock::new(|| {
    MessageSchema::builder(
        COMMAND_CLASS,
        FIRMWARE_UPDATE_ACTIVATION_STATUS_REPORT,
        "FIRMWARE_UPDATE_ACTIVATION_STATUS_REPORT",
    )
    .u16_be("manufacturerId")
    .u8("firmwareId")
    .u16_be("checksum")
    .u8("firmwareTarget")
    .enum_byte("firmwareUpdateStatus", &ACTIVATION_STATUS)
    .finish()
    .expect("FIRMWARE_UPDATE_ACTIVATION_STATUS_REPORT layout")
});

#[cfg(test)]
mod tests {
    use zwcmd_codec::{decode, encode, FieldMap};

    use super::*;

    #[test]
    fn test_md_report_with_firmware_targets() {
        let frame = [
            0x7A, 0x02, 0x01, 0x0E, 0x00, 0x10, 0xAB, 0xCD, 0xFF, 0x02, 0x00, 0x28, 0x00, 0x11,
            0x00, 0x12,
        ];
        let fields = decode(&MD_REPORT, &frame).unwrap();
        assert_eq!(fields.int("manufacturerId"), Some(0x010E));
        assert_eq!(fields.int("maxFragmentSize"), Some(0x28));
        let targets = fields.group("targets").unwrap();
        assert_eq!(targets.len(), 2);
        assert_eq!(targets[0].int("firmwareId"), Some(0x11));
        assert_eq!(targets[1].int("firmwareId"), Some(0x12));

        assert_eq!(encode(&MD_REPORT, &fields).unwrap().as_ref(), &frame);
    }

    #[test]
    fn test_md_report_with_no_targets() {
        let frame = [
            0x7A, 0x02, 0x01, 0x0E, 0x00, 0x10, 0xAB, 0xCD, 0xFF, 0x00, 0x00, 0x28,
        ];
        let fields = decode(&MD_REPORT, &frame).unwrap();
        assert_eq!(fields.group("targets"), Some(&[][..]));
    }

    #[test]
    fn test_update_md_report_trailing_checksum() {
        let frame = [0x7A, 0x06, 0x81, 0x00, 0xDE, 0xAD, 0x12, 0x34];
        let fields = decode(&UPDATE_MD_REPORT, &frame).unwrap();
        assert_eq!(fields.int("reportNumber1"), Some(1));
        assert_eq!(fields.flag("last"), Some(true));
        assert_eq!(fields.bytes("data"), Some(&[0xDEu8, 0xAD][..]));
        assert_eq!(fields.int("checksum"), Some(0x1234));

        assert_eq!(encode(&UPDATE_MD_REPORT, &fields).unwrap().as_ref(), &frame);
    }

    #[test]
    fn test_status_report_roundtrip() {
        let values = FieldMap::new()
            .with("status", "SUCCESSFULLY_WAITING_FOR_ACTIVATION")
            .with("waitTime", 30u16);
        let frame = encode(&STATUS_REPORT, &values).unwrap();
        assert_eq!(frame.as_ref(), &[0x7A, 0x07, 0xFD, 0x00, 0x1E]);
        assert_eq!(decode(&STATUS_REPORT, &frame).unwrap(), values);
    }

    #[test]
    fn test_activation_roundtrip() {
        let values = FieldMap::new()
            .with("manufacturerId", 0x010Eu16)
            .with("firmwareId", 0x01u8)
            .with("checksum", 0xBEEFu16)
            .with("firmwareTarget", 0u8)
            .with("firmwareUpdateStatus", "FIRMWARE_UPDATE_COMPLETED_SUCCESSFULLY");
        let frame = encode(&ACTIVATION_STATUS_REPORT, &values).unwrap();
        assert_eq!(
            frame.as_ref(),
            &[0x7A, 0x09, 0x01, 0x0E, 0x01, 0xBE, 0xEF, 0x00, 0xFF]
        );
        assert_eq!(decode(&ACTIVATION_STATUS_REPORT, &frame).unwrap(), values);
    }
}
