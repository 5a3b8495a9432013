//! Wire types for the two checklist schemas.
//!
//! The canonical ("brain") schema is the internally preferred shape; the
//! legacy schema is the older client-facing one still required for
//! backward compatibility. Both arrive from external generators as
//! loosely-shaped JSON, so every field beyond the identifying ones is
//! defaulted and enum strings degrade to their documented defaults
//! instead of failing the whole payload.

use serde::{Deserialize, Serialize};

/// Status of an item in the canonical schema. Wire form is
/// SCREAMING_SNAKE_CASE; unrecognized strings degrade to `Optional`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE", from = "String")]
pub enum ItemStatus {
    Required,
    HighlyRecommended,
    #[default]
    Optional,
    Conditional,
}

impl From<String> for ItemStatus {
    fn from(s: String) -> Self {
        match s.trim() {
            "REQUIRED" => ItemStatus::Required,
            "HIGHLY_RECOMMENDED" => ItemStatus::HighlyRecommended,
            "CONDITIONAL" => ItemStatus::Conditional,
            _ => ItemStatus::Optional,
        }
    }
}

/// Category of an item in the legacy schema. Wire form is snake_case;
/// unrecognized strings degrade to `Optional`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case", from = "String")]
pub enum LegacyCategory {
    Required,
    HighlyRecommended,
    #[default]
    Optional,
}

impl From<String> for LegacyCategory {
    fn from(s: String) -> Self {
        match s.trim() {
            "required" => LegacyCategory::Required,
            "highly_recommended" => LegacyCategory::HighlyRecommended,
            _ => LegacyCategory::Optional,
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase", from = "String")]
pub enum ItemPriority {
    High,
    #[default]
    Medium,
    Low,
}

impl From<String> for ItemPriority {
    fn from(s: String) -> Self {
        match s.trim() {
            "high" => ItemPriority::High,
            "low" => ItemPriority::Low,
            _ => ItemPriority::Medium,
        }
    }
}

/// One item of the canonical checklist. Localized variants cover the
/// product's three app languages: English (default field), Uzbek, and
/// Russian.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ChecklistBrainItem {
    #[serde(default)]
    pub id: String,
    #[serde(default)]
    pub status: ItemStatus,
    #[serde(default)]
    pub who_needs_it: String,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub name_uz: String,
    #[serde(default)]
    pub name_ru: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub description_uz: String,
    #[serde(default)]
    pub description_ru: String,
    #[serde(default)]
    pub where_to_obtain: String,
    #[serde(default)]
    pub where_to_obtain_uz: String,
    #[serde(default)]
    pub where_to_obtain_ru: String,
    #[serde(default)]
    pub priority: ItemPriority,
    #[serde(default)]
    pub is_core_required: bool,
    #[serde(default)]
    pub is_conditional: bool,
}

/// The canonical checklist payload.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ChecklistBrainOutput {
    #[serde(default)]
    pub country_code: String,
    #[serde(default)]
    pub country_name: String,
    #[serde(default)]
    pub visa_type_code: String,
    #[serde(default)]
    pub visa_type_label: String,
    #[serde(default)]
    pub profile_summary: String,
    #[serde(default)]
    pub required_documents: Vec<ChecklistBrainItem>,
    #[serde(default)]
    pub disclaimer: String,
}

/// One item of the legacy checklist. Mirrors [`ChecklistBrainItem`]
/// with `document` for `id`, `category` for `status`, and a flat
/// `required` flag in place of `is_core_required`/`is_conditional`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LegacyChecklistItem {
    #[serde(default)]
    pub document: String,
    #[serde(default)]
    pub category: LegacyCategory,
    #[serde(default)]
    pub required: bool,
    #[serde(default)]
    pub who_needs_it: String,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub name_uz: String,
    #[serde(default)]
    pub name_ru: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub description_uz: String,
    #[serde(default)]
    pub description_ru: String,
    #[serde(default)]
    pub where_to_obtain: String,
    #[serde(default)]
    pub where_to_obtain_uz: String,
    #[serde(default)]
    pub where_to_obtain_ru: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub priority: Option<ItemPriority>,
}

fn checklist_type() -> String {
    "checklist".to_owned()
}

/// The legacy checklist payload.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LegacyChecklistResponse {
    #[serde(rename = "type", default = "checklist_type")]
    pub response_type: String,
    #[serde(default)]
    pub visa_type: String,
    #[serde(default)]
    pub country: String,
    pub checklist: Vec<LegacyChecklistItem>,
    #[serde(default)]
    pub notes: Vec<String>,
}

/// Destination labels supplied by the caller when reconstructing the
/// canonical schema from a legacy payload.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DestinationContext {
    pub country_code: String,
    #[serde(default)]
    pub country_name: String,
    pub visa_type_code: String,
    #[serde(default)]
    pub visa_type_label: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn unknown_status_degrades_to_optional() {
        let item: ChecklistBrainItem =
            serde_json::from_str(r#"{"id":"passport","status":"MANDATORY"}"#).unwrap();
        assert_eq!(item.status, ItemStatus::Optional);
    }

    #[test]
    fn status_serializes_screaming_snake() {
        assert_eq!(
            serde_json::to_string(&ItemStatus::HighlyRecommended).unwrap(),
            r#""HIGHLY_RECOMMENDED""#
        );
    }

    #[test]
    fn sparse_legacy_item_deserializes_with_defaults() {
        let item: LegacyChecklistItem =
            serde_json::from_str(r#"{"document":"passport","category":"required","required":true}"#)
                .unwrap();
        assert_eq!(item.document, "passport");
        assert_eq!(item.category, LegacyCategory::Required);
        assert!(item.required);
        assert!(item.priority.is_none());
        assert!(item.name.is_empty());
    }

    #[test]
    fn legacy_response_defaults_type_tag() {
        let response: LegacyChecklistResponse =
            serde_json::from_str(r#"{"checklist":[]}"#).unwrap();
        assert_eq!(response.response_type, "checklist");
        assert!(response.notes.is_empty());
    }
}
