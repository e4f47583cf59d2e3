use comfy_table::{presets::UTF8_FULL, ContentArrangement, Table};
use serde::Serialize;
use zwcmd_classes::registry;

use crate::cmd::ClassesArgs;
use crate::exit::{CliResult, SUCCESS};
use crate::output::OutputFormat;

#[derive(Serialize)]
struct MessageRow {
    command_class: u8,
    command: u8,
    message: &'static str,
    fields: usize,
}

pub fn run(args: ClassesArgs, format: OutputFormat) -> CliResult<i32> {
    let rows: Vec<MessageRow> = registry::all()
        .filter(|schema| args.class.is_none_or(|class| schema.command_class() == class))
        .map(|schema| MessageRow {
            command_class: schema.command_class(),
            command: schema.command(),
            message: schema.name(),
            fields: schema.fields().len(),
        })
        .collect();

    match format {
        OutputFormat::Json | OutputFormat::Raw => {
            println!(
                "{}",
                serde_json::to_string(&rows).unwrap_or_else(|_| "[]".to_string())
            );
        }
        OutputFormat::Table => {
            let mut table = Table::new();
            table
                .load_preset(UTF8_FULL)
                .set_content_arrangement(ContentArrangement::Dynamic)
                .set_header(vec!["CLASS", "COMMAND", "MESSAGE", "FIELDS"]);
            for row in &rows {
                table.add_row(vec![
                    format!("{:#04X}", row.command_class),
                    format!("{:#04X}", row.command),
                    row.message.to_string(),
                    row.fields.to_string(),
                ]);
            }
            println!("{table}");
        }
        OutputFormat::Pretty => {
            for row in &rows {
                println!(
                    "{:#04X} {:#04X} {} ({} fields)",
                    row.command_class, row.command, row.message, row.fields
                );
            }
        }
    }

    Ok(SUCCESS)
}
