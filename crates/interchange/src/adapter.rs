//! Bidirectional mapping between the canonical and legacy schemas.
//!
//! `to_legacy` is lossy by design (CONDITIONAL folds into
//! highly_recommended); `to_brain_output` reconstructs the canonical
//! shape from the flat legacy flags and normalizes free-text fallbacks
//! so no localized field comes back empty while a fallback exists.

use crate::types::{
    ChecklistBrainItem, ChecklistBrainOutput, DestinationContext, ItemPriority, ItemStatus,
    LegacyCategory, LegacyChecklistItem, LegacyChecklistResponse,
};
use visado_condition::ApplicantProfile;

/// Disclaimer attached to reconstructed canonical payloads.
pub const DEFAULT_DISCLAIMER: &str =
    "Requirements change without notice; verify the final list with the embassy or consulate.";

fn status_to_category(status: ItemStatus) -> LegacyCategory {
    match status {
        ItemStatus::Required => LegacyCategory::Required,
        ItemStatus::HighlyRecommended | ItemStatus::Conditional => {
            LegacyCategory::HighlyRecommended
        }
        ItemStatus::Optional => LegacyCategory::Optional,
    }
}

fn category_to_status(category: LegacyCategory) -> ItemStatus {
    match category {
        LegacyCategory::Required => ItemStatus::Required,
        LegacyCategory::HighlyRecommended => ItemStatus::HighlyRecommended,
        LegacyCategory::Optional => ItemStatus::Optional,
    }
}

/// First non-empty candidate, or empty when every fallback is empty.
fn first_non_empty(candidates: &[&str]) -> String {
    candidates
        .iter()
        .find(|s| !s.is_empty())
        .map(|s| (*s).to_owned())
        .unwrap_or_default()
}

/// Map a canonical payload onto the legacy client schema.
pub fn to_legacy(brain: &ChecklistBrainOutput, visa_type: &str) -> LegacyChecklistResponse {
    let checklist = brain.required_documents.iter().map(legacy_item).collect();

    let notes = if brain.disclaimer.is_empty() {
        Vec::new()
    } else {
        vec![brain.disclaimer.clone()]
    };

    LegacyChecklistResponse {
        response_type: "checklist".to_owned(),
        visa_type: visa_type.to_owned(),
        country: brain.country_code.clone(),
        checklist,
        notes,
    }
}

fn legacy_item(item: &ChecklistBrainItem) -> LegacyChecklistItem {
    let category = status_to_category(item.status);
    LegacyChecklistItem {
        document: item.id.clone(),
        category,
        required: category == LegacyCategory::Required,
        who_needs_it: item.who_needs_it.clone(),
        name: item.name.clone(),
        name_uz: item.name_uz.clone(),
        name_ru: item.name_ru.clone(),
        description: item.description.clone(),
        description_uz: item.description_uz.clone(),
        description_ru: item.description_ru.clone(),
        where_to_obtain: item.where_to_obtain.clone(),
        where_to_obtain_uz: item.where_to_obtain_uz.clone(),
        where_to_obtain_ru: item.where_to_obtain_ru.clone(),
        priority: Some(item.priority),
    }
}

/// Reconstruct the canonical payload from a legacy one.
pub fn to_brain_output(
    legacy: &LegacyChecklistResponse,
    profile: &ApplicantProfile,
    destination: &DestinationContext,
) -> ChecklistBrainOutput {
    let country_code = first_non_empty(&[&destination.country_code, &legacy.country]);
    let visa_type_code = first_non_empty(&[&destination.visa_type_code, &legacy.visa_type]);

    ChecklistBrainOutput {
        country_name: first_non_empty(&[&destination.country_name, &country_code]),
        visa_type_label: first_non_empty(&[&destination.visa_type_label, &visa_type_code]),
        country_code,
        visa_type_code,
        profile_summary: summarize_profile(profile),
        required_documents: legacy.checklist.iter().map(brain_item).collect(),
        disclaimer: DEFAULT_DISCLAIMER.to_owned(),
    }
}

fn brain_item(item: &LegacyChecklistItem) -> ChecklistBrainItem {
    let status = category_to_status(item.category);
    let priority = item.priority.unwrap_or(if item.required {
        ItemPriority::High
    } else {
        ItemPriority::Medium
    });

    // Fallback chain: localized -> English/default -> raw identifier.
    let name = first_non_empty(&[&item.name, &item.document]);
    let description = first_non_empty(&[&item.description, &item.document]);
    let where_to_obtain = first_non_empty(&[&item.where_to_obtain, &item.document]);

    ChecklistBrainItem {
        id: item.document.clone(),
        status,
        who_needs_it: item.who_needs_it.clone(),
        name_uz: first_non_empty(&[&item.name_uz, &name]),
        name_ru: first_non_empty(&[&item.name_ru, &name]),
        name,
        description_uz: first_non_empty(&[&item.description_uz, &description]),
        description_ru: first_non_empty(&[&item.description_ru, &description]),
        description,
        where_to_obtain_uz: first_non_empty(&[&item.where_to_obtain_uz, &where_to_obtain]),
        where_to_obtain_ru: first_non_empty(&[&item.where_to_obtain_ru, &where_to_obtain]),
        where_to_obtain,
        priority,
        is_core_required: item.required,
        is_conditional: item.category == LegacyCategory::HighlyRecommended && !item.required,
    }
}

/// Compact applicant summary for the canonical payload header.
pub fn summarize_profile(profile: &ApplicantProfile) -> String {
    let mut parts = vec![
        format!("visa: {}", profile.visa_type),
        format!("sponsor: {}", profile.sponsor_type.as_str()),
        format!("status: {}", profile.current_status.as_str()),
    ];
    if let Some(score) = &profile.risk_score {
        parts.push(format!("risk: {}", score.level.as_str()));
    }
    if profile.has_international_travel {
        parts.push("has travel history".to_owned());
    }
    if profile.previous_visa_rejections {
        parts.push("previous visa rejections".to_owned());
    }
    if profile.previous_overstay {
        parts.push("previous overstay".to_owned());
    }
    parts.join(", ")
}

#[cfg(test)]
mod tests {
    use super::*;
    use visado_condition::{CurrentStatus, SponsorType};

    fn profile() -> ApplicantProfile {
        ApplicantProfile {
            sponsor_type: SponsorType::SelfSponsored,
            current_status: CurrentStatus::Employed,
            is_student: false,
            is_employed: true,
            has_international_travel: true,
            previous_visa_rejections: false,
            previous_overstay: false,
            has_property_in_local_country: true,
            has_family_in_local_country: false,
            has_children: false,
            has_university_invitation: false,
            has_other_invitation: false,
            visa_type: "tourist".to_owned(),
            risk_score: None,
        }
    }

    fn brain_item_with_status(id: &str, status: ItemStatus) -> ChecklistBrainItem {
        ChecklistBrainItem {
            id: id.to_owned(),
            status,
            name: format!("{} name", id),
            description: format!("{} description", id),
            priority: ItemPriority::High,
            is_core_required: status == ItemStatus::Required,
            ..ChecklistBrainItem::default()
        }
    }

    #[test]
    fn status_category_table() {
        assert_eq!(
            status_to_category(ItemStatus::Required),
            LegacyCategory::Required
        );
        assert_eq!(
            status_to_category(ItemStatus::HighlyRecommended),
            LegacyCategory::HighlyRecommended
        );
        assert_eq!(
            status_to_category(ItemStatus::Conditional),
            LegacyCategory::HighlyRecommended
        );
        assert_eq!(
            status_to_category(ItemStatus::Optional),
            LegacyCategory::Optional
        );
    }

    #[test]
    fn to_legacy_sets_required_flag_from_category() {
        let brain = ChecklistBrainOutput {
            country_code: "US".to_owned(),
            visa_type_code: "tourist".to_owned(),
            required_documents: vec![
                brain_item_with_status("passport", ItemStatus::Required),
                brain_item_with_status("itinerary", ItemStatus::Conditional),
            ],
            disclaimer: "check with the embassy".to_owned(),
            ..ChecklistBrainOutput::default()
        };
        let legacy = to_legacy(&brain, "tourist");

        assert_eq!(legacy.response_type, "checklist");
        assert_eq!(legacy.country, "US");
        assert_eq!(legacy.checklist[0].document, "passport");
        assert!(legacy.checklist[0].required);
        assert_eq!(
            legacy.checklist[1].category,
            LegacyCategory::HighlyRecommended
        );
        assert!(!legacy.checklist[1].required);
        assert_eq!(legacy.notes, vec!["check with the embassy".to_owned()]);
    }

    #[test]
    fn to_brain_output_reconstructs_flags() {
        let legacy = LegacyChecklistResponse {
            response_type: "checklist".to_owned(),
            visa_type: "tourist".to_owned(),
            country: "US".to_owned(),
            checklist: vec![
                LegacyChecklistItem {
                    document: "passport".to_owned(),
                    category: LegacyCategory::Required,
                    required: true,
                    ..LegacyChecklistItem::default()
                },
                LegacyChecklistItem {
                    document: "invitation".to_owned(),
                    category: LegacyCategory::HighlyRecommended,
                    required: false,
                    ..LegacyChecklistItem::default()
                },
            ],
            notes: Vec::new(),
        };
        let destination = DestinationContext {
            country_code: "US".to_owned(),
            country_name: "United States".to_owned(),
            visa_type_code: "tourist".to_owned(),
            visa_type_label: "Tourist (B-2)".to_owned(),
        };
        let brain = to_brain_output(&legacy, &profile(), &destination);

        assert_eq!(brain.country_name, "United States");
        assert!(!brain.profile_summary.is_empty());

        let passport = &brain.required_documents[0];
        assert_eq!(passport.status, ItemStatus::Required);
        assert!(passport.is_core_required);
        assert!(!passport.is_conditional);
        assert_eq!(passport.priority, ItemPriority::High);

        let invitation = &brain.required_documents[1];
        assert_eq!(invitation.status, ItemStatus::HighlyRecommended);
        assert!(!invitation.is_core_required);
        assert!(invitation.is_conditional);
        assert_eq!(invitation.priority, ItemPriority::Medium);
    }

    #[test]
    fn localized_fields_fall_back_to_default_then_identifier() {
        let legacy = LegacyChecklistResponse {
            response_type: "checklist".to_owned(),
            visa_type: "tourist".to_owned(),
            country: "US".to_owned(),
            checklist: vec![LegacyChecklistItem {
                document: "bank_statement".to_owned(),
                category: LegacyCategory::Required,
                required: true,
                name: "Bank statement".to_owned(),
                name_ru: "Выписка из банка".to_owned(),
                ..LegacyChecklistItem::default()
            }],
            notes: Vec::new(),
        };
        let destination = DestinationContext {
            country_code: "US".to_owned(),
            visa_type_code: "tourist".to_owned(),
            ..DestinationContext::default()
        };
        let brain = to_brain_output(&legacy, &profile(), &destination);
        let item = &brain.required_documents[0];

        // name_uz missing -> English name; name_ru present -> kept
        assert_eq!(item.name_uz, "Bank statement");
        assert_eq!(item.name_ru, "Выписка из банка");
        // description entirely missing -> raw identifier, never empty
        assert_eq!(item.description, "bank_statement");
        assert_eq!(item.description_uz, "bank_statement");
    }

    #[test]
    fn destination_labels_fall_back_to_codes() {
        let legacy = LegacyChecklistResponse {
            response_type: "checklist".to_owned(),
            visa_type: "work".to_owned(),
            country: "CA".to_owned(),
            checklist: Vec::new(),
            notes: Vec::new(),
        };
        let destination = DestinationContext {
            country_code: String::new(),
            visa_type_code: String::new(),
            ..DestinationContext::default()
        };
        let brain = to_brain_output(&legacy, &profile(), &destination);
        assert_eq!(brain.country_code, "CA");
        assert_eq!(brain.country_name, "CA");
        assert_eq!(brain.visa_type_code, "work");
        assert_eq!(brain.visa_type_label, "work");
    }
}
