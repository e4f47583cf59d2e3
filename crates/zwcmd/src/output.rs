use std::io::IsTerminal;

use clap::ValueEnum;
use comfy_table::{presets::UTF8_FULL, ContentArrangement, Table};
use serde::Serialize;
use zwcmd_codec::{FieldMap, FieldValue};
use zwcmd_schema::MessageSchema;

#[derive(Clone, Debug, Copy, ValueEnum)]
pub enum OutputFormat {
    Json,
    Table,
    Pretty,
    Raw,
}

impl OutputFormat {
    pub fn default_for_stdout() -> Self {
        if std::io::stdout().is_terminal() {
            Self::Table
        } else {
            Self::Json
        }
    }
}

#[derive(Serialize)]
struct DecodedOutput<'a> {
    message: &'a str,
    command_class: u8,
    command: u8,
    fields: &'a FieldMap,
}

/// Print one decoded frame.
pub fn print_fields(schema: &MessageSchema, fields: &FieldMap, format: OutputFormat) {
    match format {
        OutputFormat::Json => {
            let out = DecodedOutput {
                message: schema.name(),
                command_class: schema.command_class(),
                command: schema.command(),
                fields,
            };
            println!(
                "{}",
                serde_json::to_string(&out).unwrap_or_else(|_| "{}".to_string())
            );
        }
        OutputFormat::Table => {
            let mut table = Table::new();
            table
                .load_preset(UTF8_FULL)
                .set_content_arrangement(ContentArrangement::Dynamic)
                .set_header(vec!["FIELD", "VALUE"]);
            table.add_row(vec!["message".to_string(), schema.name().to_string()]);
            for (name, value) in fields.iter() {
                table.add_row(vec![name.to_string(), render_value(value)]);
            }
            println!("{table}");
        }
        OutputFormat::Pretty => {
            println!("message={}", schema.name());
            for (name, value) in fields.iter() {
                println!("{name}={}", render_value(value));
            }
        }
        OutputFormat::Raw => {
            println!(
                "{}",
                serde_json::to_string(fields).unwrap_or_else(|_| "{}".to_string())
            );
        }
    }
}

/// Print one encoded frame.
pub fn print_frame(schema: &MessageSchema, frame: &[u8], format: OutputFormat) {
    match format {
        OutputFormat::Json => {
            println!(
                r#"{{"message":"{}","frame":"{}"}}"#,
                schema.name(),
                to_hex(frame)
            );
        }
        OutputFormat::Table => {
            let mut table = Table::new();
            table
                .load_preset(UTF8_FULL)
                .set_content_arrangement(ContentArrangement::Dynamic)
                .set_header(vec!["MESSAGE", "BYTES", "FRAME"])
                .add_row(vec![
                    schema.name().to_string(),
                    frame.len().to_string(),
                    to_hex(frame),
                ]);
            println!("{table}");
        }
        OutputFormat::Pretty => {
            println!("message={} frame={}", schema.name(), to_hex(frame));
        }
        OutputFormat::Raw => {
            println!("{}", to_hex(frame));
        }
    }
}

pub fn to_hex(bytes: &[u8]) -> String {
    bytes.iter().map(|b| format!("{b:02X}")).collect()
}

fn render_value(value: &FieldValue) -> String {
    match value {
        FieldValue::Bool(v) => v.to_string(),
        FieldValue::Int(v) => v.to_string(),
        FieldValue::Name(v) => v.clone(),
        FieldValue::Bytes(v) => to_hex(v),
        FieldValue::Group(elements) => {
            serde_json::to_string(&elements).unwrap_or_else(|_| format!("{} elements", elements.len()))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_to_hex() {
        assert_eq!(to_hex(&[0x71, 0x04, 0x05, 0x02]), "71040502");
        assert_eq!(to_hex(&[]), "");
    }

    #[test]
    fn test_render_value_variants() {
        assert_eq!(render_value(&FieldValue::Bool(true)), "true");
        assert_eq!(render_value(&FieldValue::Int(7)), "7");
        assert_eq!(render_value(&FieldValue::Name("CO".into())), "CO");
        assert_eq!(render_value(&FieldValue::Bytes(vec![0xDE, 0xAD])), "DEAD");
    }
}
