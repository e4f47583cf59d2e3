use zwcmd_classes::lookup;

use crate::cmd::{parse_hex, DecodeArgs};
use crate::exit::{decode_error, usage_error, CliResult, SUCCESS};
use crate::output::{print_fields, OutputFormat};

pub fn run(args: DecodeArgs, format: OutputFormat) -> CliResult<i32> {
    let frame = parse_hex(&args.frame)?;
    if frame.len() < 2 {
        return Err(usage_error("a frame needs at least class and command bytes"));
    }

    let schema = lookup(frame[0], frame[1]).ok_or_else(|| {
        usage_error(format!(
            "no known message for class {:#04x} command {:#04x}",
            frame[0], frame[1]
        ))
    })?;

    let fields = zwcmd_codec::decode(schema, &frame)
        .map_err(|err| decode_error(schema.name(), err))?;

    print_fields(schema, &fields, format);
    Ok(SUCCESS)
}

#[cfg(test)]
mod tests {
    use crate::exit::{DATA_INVALID, USAGE};

    use super::*;

    #[test]
    fn test_decodes_known_frame() {
        let args = DecodeArgs {
            frame: "71040502".to_string(),
        };
        assert_eq!(run(args, OutputFormat::Raw).unwrap(), SUCCESS);
    }

    #[test]
    fn test_unknown_header_is_usage_error() {
        let args = DecodeArgs {
            frame: "0000".to_string(),
        };
        let err = run(args, OutputFormat::Raw).unwrap_err();
        assert_eq!(err.code, USAGE);
    }

    #[test]
    fn test_truncated_frame_is_data_error() {
        let args = DecodeArgs {
            frame: "7105".to_string(),
        };
        let err = run(args, OutputFormat::Raw).unwrap_err();
        assert_eq!(err.code, DATA_INVALID);
    }
}
