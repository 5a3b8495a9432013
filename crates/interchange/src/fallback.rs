//! Baseline checklist for degraded operation.
//!
//! When no rule set and no generated payload is available, callers can
//! still show the documents every application needs. Using it is an
//! explicit caller choice; resolution itself fails fast instead.

use crate::adapter::DEFAULT_DISCLAIMER;
use crate::types::{
    ChecklistBrainItem, ChecklistBrainOutput, DestinationContext, ItemPriority, ItemStatus,
};

fn baseline_item(id: &str, name: &str, description: &str) -> ChecklistBrainItem {
    ChecklistBrainItem {
        id: id.to_owned(),
        status: ItemStatus::Required,
        who_needs_it: "All applicants".to_owned(),
        name: name.to_owned(),
        description: description.to_owned(),
        priority: ItemPriority::High,
        is_core_required: true,
        is_conditional: false,
        ..ChecklistBrainItem::default()
    }
}

/// The documents common to every application, plus the acceptance
/// letter for student visas.
pub fn fallback_checklist(
    destination: &DestinationContext,
    visa_type: &str,
) -> ChecklistBrainOutput {
    let mut documents = vec![
        baseline_item(
            "passport",
            "Valid Passport",
            "Passport valid for at least 6 months beyond intended stay",
        ),
        baseline_item(
            "application_form",
            "Visa Application Form",
            "Completed and signed visa application form",
        ),
        baseline_item(
            "photo",
            "Passport Photo",
            "Recent passport-sized photograph",
        ),
        baseline_item(
            "financial_proof",
            "Financial Proof",
            "Bank statements or proof of sufficient funds",
        ),
    ];

    if visa_type == "student" {
        documents.push(baseline_item(
            "acceptance_letter",
            "Acceptance Letter",
            "Letter of acceptance from educational institution",
        ));
    }

    ChecklistBrainOutput {
        country_code: destination.country_code.clone(),
        country_name: if destination.country_name.is_empty() {
            destination.country_code.clone()
        } else {
            destination.country_name.clone()
        },
        visa_type_code: visa_type.to_owned(),
        visa_type_label: if destination.visa_type_label.is_empty() {
            visa_type.to_owned()
        } else {
            destination.visa_type_label.clone()
        },
        profile_summary: String::new(),
        required_documents: documents,
        disclaimer: DEFAULT_DISCLAIMER.to_owned(),
    }
}
