//! Command Class Basic Tariff Info (0x36), version 1.

use std::sync::LazyLock;

use zwcmd_schema::{BitPart, MessageSchema};

/// Command class key for COMMAND_CLASS_BASIC_TARIFF_INFO.
pub const COMMAND_CLASS: u8 = 0x36;

pub const BASIC_TARIFF_INFO_GET: u8 = 0x01;
pub const BASIC_TARIFF_INFO_REPORT: u8 = 0x02;

pub static GET: LazyLock<MessageSchema> = LazyLock::new(|| {
    MessageSchema::builder(COMMAND_CLASS, BASIC_TARIFF_INFO_GET, "BASIC_TARIFF_INFO_GET")
        .finish()
        .expect("BASIC_TARIFF_INFO_GET layout")
});

pub static REPORT: LazyLock<MessageSchema> = LazyLock::new(|| {
    MessageSchema::builder(
        COMMAND_CLASS,
        BASIC_TARIFF_INFO_REPORT,
        "BASIC_TARIFF_INFO_REPORT",
    )
    .bits(
        "properties1",
        vec![
            BitPart::uint("totalNoImportRates", 0x0F),
            BitPart::flag("dual", 0x80),
        ],
    )
    .bits("properties2", vec![BitPart::uint("e1CurrentRateInUse", 0x0F)])
    .u32_be("e1RateConsumptionRegister")
    .u8("e1TimeForNextRateHours")
    .u8("e1TimeForNextRateMinutes")
    .u8("e1TimeForNextRateSeconds")
    .bits("properties3", vec![BitPart::uint("e2CurrentRateInUse", 0x0F)])
    .u32_be("e2RateConsumptionRegister")
    .finish()
    .expect("BASIC_TARIFF_INFO_REPORT layout")
});

#[cfg(test)]
mod tests {
    use zwcmd_codec::{decode, encode, FieldMap};

    use super::*;

    #[test]
    fn test_report_roundtrip() {
        let values = FieldMap::new()
            .with("totalNoImportRates", 4i64)
            .with("dual", true)
            .with("e1CurrentRateInUse", 2i64)
            .with("e1RateConsumptionRegister", 0x0102_0304u32)
            .with("e1TimeForNextRateHours", 23u8)
            .with("e1TimeForNextRateMinutes", 59u8)
            .with("e1TimeForNextRateSeconds", 1u8)
            .with("e2CurrentRateInUse", 1i64)
            .with("e2RateConsumptionRegister", 0xAABB_CCDDu32);

        let frame = encode(&REPORT, &values).unwrap();
        assert_eq!(
            frame.as_ref(),
            &[
                0x36, 0x02, 0x84, 0x02, 0x01, 0x02, 0x03, 0x04, 0x17, 0x3B, 0x01, 0x01, 0xAA,
                0xBB, 0xCC, 0xDD
            ]
        );
        assert_eq!(decode(&REPORT, &frame).unwrap(), values);
    }
}
