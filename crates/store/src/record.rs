use serde::{Deserialize, Serialize};

/// How strongly a document is recommended when its condition holds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DocumentCategory {
    Required,
    HighlyRecommended,
    Optional,
}

/// A single document entry within a rule set version.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RequiredDocument {
    /// Stable document identifier, e.g. `passport` or `bank_statement`.
    pub document_type: String,
    pub category: DocumentCategory,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub validity_requirements: String,
    #[serde(default)]
    pub format_requirements: String,
    /// Condition expression gating this entry. Absent, empty, or
    /// whitespace-only means the document applies unconditionally.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub condition: Option<String>,
}

impl RequiredDocument {
    /// The effective condition: trimmed, `None` when absent or blank.
    pub fn condition(&self) -> Option<&str> {
        match self.condition.as_deref().map(str::trim) {
            Some("") | None => None,
            Some(expr) => Some(expr),
        }
    }

    pub fn has_condition(&self) -> bool {
        self.condition().is_some()
    }
}

/// One version of the document requirements for a (country, visa type)
/// pair.
///
/// Version numbers are positive and strictly increasing per pair. At most
/// one version per pair is active: the highest-numbered one with
/// `is_approved = true`. Drafts (`is_approved = false`) are editable and
/// are never used for resolution.
///
/// Conditions are a capability introduced at version 2, so any version
/// containing a conditioned document has `version >= 2`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RuleSetVersion {
    pub id: String,
    pub country_code: String,
    pub visa_type: String,
    pub version: u32,
    pub is_approved: bool,
    pub documents: Vec<RequiredDocument>,
    /// Opaque pass-through data. The engine never interprets these.
    #[serde(default)]
    pub financial_requirements: serde_json::Value,
    #[serde(default)]
    pub processing_info: serde_json::Value,
    #[serde(default)]
    pub fees: serde_json::Value,
}

impl RuleSetVersion {
    pub fn has_conditions(&self) -> bool {
        self.documents.iter().any(RequiredDocument::has_condition)
    }
}
