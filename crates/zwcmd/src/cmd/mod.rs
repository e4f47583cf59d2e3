use clap::{Args, Subcommand};

use crate::exit::{usage_error, CliError, CliResult};
use crate::output::OutputFormat;

pub mod classes;
pub mod decode;
pub mod encode;
pub mod version;

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Decode a hex frame into named fields.
    Decode(DecodeArgs),
    /// Encode named fields into a hex frame.
    Encode(EncodeArgs),
    /// List the known command classes and messages.
    Classes(ClassesArgs),
    /// Show version information.
    Version(VersionArgs),
}

pub fn run(command: Command, format: OutputFormat) -> CliResult<i32> {
    match command {
        Command::Decode(args) => decode::run(args, format),
        Command::Encode(args) => encode::run(args, format),
        Command::Classes(args) => classes::run(args, format),
        Command::Version(args) => version::run(args),
    }
}

#[derive(Args, Debug)]
pub struct DecodeArgs {
    /// Frame bytes as hex (e.g. "71040502", "71 04 05 02", "0x71,0x04,...").
    pub frame: String,
}

#[derive(Args, Debug)]
pub struct EncodeArgs {
    /// Message name, e.g. ALARM_GET.
    #[arg(long, conflicts_with_all = ["class", "command"])]
    pub message: Option<String>,
    /// Command-class byte (with --command).
    #[arg(long, value_parser = parse_byte, requires = "command")]
    pub class: Option<u8>,
    /// Command byte (with --class).
    #[arg(long, value_parser = parse_byte, requires = "class")]
    pub command: Option<u8>,
    /// Field values as a JSON object.
    #[arg(long)]
    pub values: String,
}

#[derive(Args, Debug, Default)]
pub struct ClassesArgs {
    /// Only list messages of one command class.
    #[arg(long, value_parser = parse_byte)]
    pub class: Option<u8>,
}

#[derive(Args, Debug)]
pub struct VersionArgs {
    /// Show extended build provenance.
    #[arg(long)]
    pub extended: bool,
}

/// Accepts decimal ("113") and hex ("0x71") byte values.
pub fn parse_byte(s: &str) -> Result<u8, String> {
    let parsed = match s.strip_prefix("0x").or_else(|| s.strip_prefix("0X")) {
        Some(hex) => u8::from_str_radix(hex, 16),
        None => s.parse(),
    };
    parsed.map_err(|_| format!("'{s}' is not a byte value"))
}

/// Parse a hex byte string, tolerating spaces, commas, and 0x prefixes.
pub fn parse_hex(input: &str) -> CliResult<Vec<u8>> {
    let cleaned: String = input
        .split([' ', ',', '\t'])
        .map(|chunk| chunk.trim_start_matches("0x").trim_start_matches("0X"))
        .collect();

    if cleaned.is_empty() {
        return Err(usage_error("empty frame"));
    }
    if cleaned.len() % 2 != 0 {
        return Err(usage_error(format!(
            "odd number of hex digits in frame '{input}'"
        )));
    }

    (0..cleaned.len())
        .step_by(2)
        .map(|i| {
            u8::from_str_radix(&cleaned[i..i + 2], 16)
                .map_err(|_| usage_error(format!("invalid hex byte '{}'", &cleaned[i..i + 2])))
        })
        .collect::<Result<Vec<u8>, CliError>>()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_hex_formats() {
        let expected = vec![0x71, 0x04, 0x05, 0x02];
        assert_eq!(parse_hex("71040502").unwrap(), expected);
        assert_eq!(parse_hex("71 04 05 02").unwrap(), expected);
        assert_eq!(parse_hex("0x71,0x04,0x05,0x02").unwrap(), expected);
    }

    #[test]
    fn test_parse_hex_rejects_garbage() {
        assert!(parse_hex("").is_err());
        assert!(parse_hex("7").is_err());
        assert!(parse_hex("7G").is_err());
    }

    #[test]
    fn test_parse_byte() {
        assert_eq!(parse_byte("0x71").unwrap(), 0x71);
        assert_eq!(parse_byte("113").unwrap(), 113);
        assert!(parse_byte("zap").is_err());
        assert!(parse_byte("256").is_err());
    }
}
