//! The validate subcommand: per-condition diagnostics for a rule-set
//! file, the same checks the store applies at create/patch time.

use std::path::Path;

use serde_json::json;

use crate::ruleset;
use crate::OutputFormat;

pub(crate) fn run(file: &Path, output: OutputFormat) -> Result<(), String> {
    let rule_set = ruleset::load(file)?;

    let mut diagnostics = Vec::new();
    for doc in &rule_set.documents {
        if let Some(expr) = doc.condition() {
            if let Err(err) = visado_condition::parse(expr) {
                diagnostics.push((doc.document_type.clone(), expr.to_owned(), err.to_string()));
            }
        }
    }

    let conditioned = rule_set
        .documents
        .iter()
        .filter(|d| d.has_condition())
        .count();
    // Conditions require the version-2 rule-set schema
    let minimum_version = if conditioned > 0 { 2 } else { 1 };

    match output {
        OutputFormat::Json => {
            let report = json!({
                "countryCode": rule_set.country_code,
                "visaType": rule_set.visa_type,
                "documents": rule_set.documents.len(),
                "conditionedDocuments": conditioned,
                "minimumVersion": minimum_version,
                "valid": diagnostics.is_empty(),
                "diagnostics": diagnostics
                    .iter()
                    .map(|(doc, condition, message)| json!({
                        "documentType": doc,
                        "condition": condition,
                        "message": message,
                    }))
                    .collect::<Vec<_>>(),
            });
            println!("{}", serde_json::to_string_pretty(&report).unwrap());
        }
        OutputFormat::Text => {
            println!(
                "rule set {}/{}: {} documents, {} conditioned, minimum version {}",
                rule_set.country_code,
                rule_set.visa_type,
                rule_set.documents.len(),
                conditioned,
                minimum_version
            );
            for (doc, condition, message) in &diagnostics {
                println!("  {}: `{}` -- {}", doc, condition, message);
            }
            if diagnostics.is_empty() {
                println!("ok");
            }
        }
    }

    if diagnostics.is_empty() {
        Ok(())
    } else {
        Err(format!(
            "{} invalid condition(s) in {}",
            diagnostics.len(),
            file.display()
        ))
    }
}
