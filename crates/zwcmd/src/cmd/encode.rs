use serde_json::Value;
use zwcmd_classes::{lookup, registry};
use zwcmd_codec::FieldMap;
use zwcmd_schema::{BitKind, Field, FieldKind, MessageSchema};

use crate::cmd::{parse_hex, EncodeArgs};
use crate::exit::{encode_error, usage_error, CliResult, SUCCESS};
use crate::output::{print_frame, OutputFormat};

pub fn run(args: EncodeArgs, format: OutputFormat) -> CliResult<i32> {
    let schema = resolve_schema(&args)?;

    let json: Value = serde_json::from_str(&args.values)
        .map_err(|err| usage_error(format!("--values is not valid JSON: {err}")))?;
    let Value::Object(object) = json else {
        return Err(usage_error("--values must be a JSON object"));
    };

    let values = field_map_for(schema.fields(), &object)?;
    let frame =
        zwcmd_codec::encode(schema, &values).map_err(|err| encode_error(schema.name(), err))?;

    print_frame(schema, &frame, format);
    Ok(SUCCESS)
}

fn resolve_schema(args: &EncodeArgs) -> CliResult<&'static MessageSchema> {
    if let Some(name) = &args.message {
        return registry::all()
            .find(|schema| schema.name().eq_ignore_ascii_case(name))
            .ok_or_else(|| usage_error(format!("unknown message '{name}'")));
    }
    if let (Some(class), Some(command)) = (args.class, args.command) {
        return lookup(class, command).ok_or_else(|| {
            usage_error(format!(
                "no known message for class {class:#04x} command {command:#04x}"
            ))
        });
    }
    Err(usage_error("pass --message NAME, or --class and --command"))
}

/// Build a typed field map from a JSON object, guided by the schema.
///
/// JSON keys that match no schema field are rejected; missing keys are left
/// to the encoder, which reports them per field.
fn field_map_for(fields: &[Field], object: &serde_json::Map<String, Value>) -> CliResult<FieldMap> {
    let mut map = FieldMap::new();
    let mut known: Vec<&'static str> = Vec::new();

    for field in fields {
        match &field.kind {
            FieldKind::Int(_) => {
                known.push(field.name);
                if let Some(value) = object.get(field.name) {
                    map.insert(field.name, as_int(field.name, value)?);
                }
            }
            FieldKind::Bits(parts) => {
                for part in parts {
                    known.push(part.name);
                    let Some(value) = object.get(part.name) else {
                        continue;
                    };
                    match part.kind {
                        BitKind::Flag => map.insert(part.name, as_flag(part.name, value)?),
                        BitKind::Uint => map.insert(part.name, as_int(part.name, value)?),
                        BitKind::Enum(_) => map.insert(part.name, as_name(part.name, value)?),
                    }
                }
            }
            FieldKind::Enum(_) => {
                known.push(field.name);
                if let Some(value) = object.get(field.name) {
                    map.insert(field.name, as_name(field.name, value)?);
                }
            }
            FieldKind::Bytes(_) => {
                known.push(field.name);
                if let Some(value) = object.get(field.name) {
                    map.insert(field.name, as_bytes(field.name, value)?);
                }
            }
            FieldKind::Group { fields: sub, .. } => {
                known.push(field.name);
                if let Some(value) = object.get(field.name) {
                    let Value::Array(items) = value else {
                        return Err(usage_error(format!(
                            "field '{}' must be a JSON array",
                            field.name
                        )));
                    };
                    let mut elements = Vec::with_capacity(items.len());
                    for item in items {
                        let Value::Object(element) = item else {
                            return Err(usage_error(format!(
                                "elements of '{}' must be JSON objects",
                                field.name
                            )));
                        };
                        elements.push(field_map_for(sub, element)?);
                    }
                    map.insert(field.name, elements);
                }
            }
        }
    }

    for key in object.keys() {
        if !known.contains(&key.as_str()) {
            return Err(usage_error(format!("unknown field '{key}'")));
        }
    }

    Ok(map)
}

fn as_int(name: &str, value: &Value) -> CliResult<i64> {
    value
        .as_i64()
        .ok_or_else(|| usage_error(format!("field '{name}' must be an integer")))
}

fn as_flag(name: &str, value: &Value) -> CliResult<bool> {
    value
        .as_bool()
        .ok_or_else(|| usage_error(format!("field '{name}' must be a boolean")))
}

fn as_name(name: &str, value: &Value) -> CliResult<String> {
    value
        .as_str()
        .map(str::to_string)
        .ok_or_else(|| usage_error(format!("field '{name}' must be a string")))
}

fn as_bytes(name: &str, value: &Value) -> CliResult<Vec<u8>> {
    let text = value
        .as_str()
        .ok_or_else(|| usage_error(format!("field '{name}' must be a hex string")))?;
    if text.is_empty() {
        return Ok(Vec::new());
    }
    parse_hex(text)
}

#[cfg(test)]
mod tests {
    use crate::exit::USAGE;

    use super::*;

    fn encode_args(message: &str, values: &str) -> EncodeArgs {
        EncodeArgs {
            message: Some(message.to_string()),
            class: None,
            command: None,
            values: values.to_string(),
        }
    }

    #[test]
    fn test_encodes_by_message_name() {
        let args = encode_args("ALARM_GET", r#"{"alarmType":5,"zwaveAlarmType":"CO"}"#);
        assert_eq!(run(args, OutputFormat::Raw).unwrap(), SUCCESS);
    }

    #[test]
    fn test_unknown_json_key_is_usage_error() {
        let args = encode_args("ALARM_GET", r#"{"alarmKind":5}"#);
        let err = run(args, OutputFormat::Raw).unwrap_err();
        assert_eq!(err.code, USAGE);
        assert!(err.message.contains("alarmKind"));
    }

    #[test]
    fn test_group_values_from_json() {
        let args = encode_args(
            "FIRMWARE_MD_REPORT",
            r#"{
                "manufacturerId": 270,
                "firmware0Id": 16,
                "firmware0Checksum": 43981,
                "firmwareUpgradable": 255,
                "numberOfFirmwareTargets": 1,
                "maxFragmentSize": 40,
                "targets": [{"firmwareId": 17}]
            }"#,
        );
        assert_eq!(run(args, OutputFormat::Raw).unwrap(), SUCCESS);
    }

    #[test]
    fn test_schema_resolution_by_class_and_command() {
        let args = EncodeArgs {
            message: None,
            class: Some(0x75),
            command: Some(0x01),
            values: r#"{"protectionState":"UNPROTECTED"}"#.to_string(),
        };
        assert_eq!(run(args, OutputFormat::Raw).unwrap(), SUCCESS);
    }

    #[test]
    fn test_missing_schema_selector_is_usage_error() {
        let args = EncodeArgs {
            message: None,
            class: None,
            command: None,
            values: "{}".to_string(),
        };
        assert_eq!(run(args, OutputFormat::Raw).unwrap_err().code, USAGE);
    }
}
