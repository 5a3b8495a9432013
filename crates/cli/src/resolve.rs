//! The resolve subcommand: file-backed store, one applicant, one
//! checklist in the requested schema.

use std::path::Path;
use std::sync::Arc;

use visado_condition::ApplicantProfile;
use visado_interchange::{
    to_legacy, ChecklistBrainItem, ChecklistBrainOutput, DestinationContext, ItemPriority,
    ItemStatus, DEFAULT_DISCLAIMER,
};
use visado_resolve::{ResolvedChecklist, Resolver};
use visado_store::{DocumentCategory, MemoryStore, RuleSetStore};

use crate::ruleset::{self, RuleSetFile};
use crate::{OutputFormat, SchemaArg};

pub(crate) async fn run(
    file: &Path,
    profile_path: &Path,
    schema: SchemaArg,
    output: OutputFormat,
) -> Result<(), String> {
    let rule_set = ruleset::load(file)?;
    let profile = load_profile(profile_path)?;

    let store = Arc::new(MemoryStore::new());
    let draft = store
        .create_draft(
            &rule_set.country_code,
            &rule_set.visa_type,
            rule_set.documents.clone(),
        )
        .await
        .map_err(|e| e.to_string())?;
    store.approve(&draft.id).await.map_err(|e| e.to_string())?;

    let resolver = Resolver::new(store);
    let checklist = resolver
        .resolve(&rule_set.country_code, &rule_set.visa_type, &profile)
        .await
        .map_err(|e| e.to_string())?;

    for warning in &checklist.warnings {
        eprintln!(
            "warning: {}: `{}` -- {}",
            warning.document_type, warning.condition, warning.message
        );
    }

    let brain = brain_output(&rule_set, &profile, &checklist);
    match (schema, output) {
        (SchemaArg::Brain, OutputFormat::Json) => {
            println!("{}", serde_json::to_string_pretty(&brain).unwrap());
        }
        (SchemaArg::Legacy, OutputFormat::Json) => {
            let legacy = to_legacy(&brain, &rule_set.visa_type);
            println!("{}", serde_json::to_string_pretty(&legacy).unwrap());
        }
        (_, OutputFormat::Text) => {
            println!(
                "{} {} checklist, rule set version {}:",
                rule_set.country_code, rule_set.visa_type, checklist.version
            );
            for item in &brain.required_documents {
                println!("  [{}] {} -- {}", status_label(item.status), item.id, item.description);
            }
        }
    }
    Ok(())
}

fn load_profile(path: &Path) -> Result<ApplicantProfile, String> {
    let raw = std::fs::read_to_string(path)
        .map_err(|e| format!("cannot read {}: {}", path.display(), e))?;
    serde_json::from_str(&raw).map_err(|e| format!("cannot parse {}: {}", path.display(), e))
}

fn status_label(status: ItemStatus) -> &'static str {
    match status {
        ItemStatus::Required => "required",
        ItemStatus::HighlyRecommended => "recommended",
        ItemStatus::Conditional => "conditional",
        ItemStatus::Optional => "optional",
    }
}

/// Render the applicant-specific resolution into the canonical schema.
/// Excluded documents are dropped; the rest keep declaration order.
fn brain_output(
    rule_set: &RuleSetFile,
    profile: &ApplicantProfile,
    checklist: &ResolvedChecklist,
) -> ChecklistBrainOutput {
    let required_documents = checklist
        .included()
        .map(|resolved| {
            let doc = &resolved.document;
            let (status, priority) = match doc.category {
                DocumentCategory::Required => (ItemStatus::Required, ItemPriority::High),
                DocumentCategory::HighlyRecommended => {
                    (ItemStatus::HighlyRecommended, ItemPriority::Medium)
                }
                DocumentCategory::Optional => (ItemStatus::Optional, ItemPriority::Low),
            };
            ChecklistBrainItem {
                id: doc.document_type.clone(),
                status,
                name: doc.document_type.clone(),
                description: doc.description.clone(),
                where_to_obtain: String::new(),
                priority,
                is_core_required: doc.category == DocumentCategory::Required
                    && !doc.has_condition(),
                is_conditional: doc.has_condition(),
                ..ChecklistBrainItem::default()
            }
        })
        .collect();

    let destination = DestinationContext {
        country_code: rule_set.country_code.clone(),
        country_name: rule_set.country_name.clone(),
        visa_type_code: rule_set.visa_type.clone(),
        visa_type_label: rule_set.visa_type_label.clone(),
    };

    ChecklistBrainOutput {
        country_code: destination.country_code.clone(),
        country_name: if destination.country_name.is_empty() {
            destination.country_code.clone()
        } else {
            destination.country_name.clone()
        },
        visa_type_code: destination.visa_type_code.clone(),
        visa_type_label: if destination.visa_type_label.is_empty() {
            destination.visa_type_code.clone()
        } else {
            destination.visa_type_label.clone()
        },
        profile_summary: visado_interchange::summarize_profile(profile),
        required_documents,
        disclaimer: DEFAULT_DISCLAIMER.to_owned(),
    }
}
