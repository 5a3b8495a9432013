//! The detect subcommand: classify a raw checklist payload.

use std::path::Path;

use serde_json::json;

use visado_interchange::{detect_and_parse, DetectedChecklist};

use crate::OutputFormat;

pub(crate) fn run(file: &Path, output: OutputFormat) -> Result<(), String> {
    let raw = std::fs::read_to_string(file)
        .map_err(|e| format!("cannot read {}: {}", file.display(), e))?;

    let detected = detect_and_parse(&raw);
    let format = detected.format();

    match output {
        OutputFormat::Json => {
            let payload = match &detected {
                DetectedChecklist::Brain(brain) => serde_json::to_value(brain).unwrap(),
                DetectedChecklist::Legacy(legacy) => serde_json::to_value(legacy).unwrap(),
                DetectedChecklist::Unknown => serde_json::Value::Null,
            };
            let report = json!({ "format": format.as_str(), "payload": payload });
            println!("{}", serde_json::to_string_pretty(&report).unwrap());
        }
        OutputFormat::Text => match &detected {
            DetectedChecklist::Brain(brain) => {
                println!(
                    "brain: {}/{} with {} documents",
                    brain.country_code,
                    brain.visa_type_code,
                    brain.required_documents.len()
                );
            }
            DetectedChecklist::Legacy(legacy) => {
                println!(
                    "legacy: {}/{} with {} items",
                    legacy.country,
                    legacy.visa_type,
                    legacy.checklist.len()
                );
            }
            DetectedChecklist::Unknown => println!("unknown"),
        },
    }
    Ok(())
}
