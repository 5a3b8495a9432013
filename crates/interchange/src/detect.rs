//! Best-effort classification of externally supplied checklist payloads.
//!
//! Generated payloads arrive in one of two shapes (canonical or legacy),
//! frequently wrapped in Markdown code fences or surrounded by prose.
//! The contract here is "best-effort classify", not "validate": nothing
//! in this module returns an error, and malformed input is an `Unknown`
//! result the caller must branch on.

use serde::Serialize;

use crate::adapter::to_brain_output;
use crate::types::{
    ChecklistBrainOutput, DestinationContext, LegacyChecklistResponse,
};
use visado_condition::ApplicantProfile;

/// Format tag accompanying a detection result.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum DetectedFormat {
    Brain,
    Legacy,
    Unknown,
}

impl DetectedFormat {
    pub fn as_str(&self) -> &'static str {
        match self {
            DetectedFormat::Brain => "brain",
            DetectedFormat::Legacy => "legacy",
            DetectedFormat::Unknown => "unknown",
        }
    }
}

/// Outcome of [`detect_and_parse`]: an explicit tagged union instead of
/// ad hoc property probing at every call site.
#[derive(Debug, Clone, PartialEq)]
pub enum DetectedChecklist {
    Brain(ChecklistBrainOutput),
    Legacy(LegacyChecklistResponse),
    Unknown,
}

impl DetectedChecklist {
    pub fn format(&self) -> DetectedFormat {
        match self {
            DetectedChecklist::Brain(_) => DetectedFormat::Brain,
            DetectedChecklist::Legacy(_) => DetectedFormat::Legacy,
            DetectedChecklist::Unknown => DetectedFormat::Unknown,
        }
    }
}

/// Classify a raw payload as canonical, legacy, or unknown.
///
/// Canonical requires top-level `countryCode`, `visaTypeCode`, and an
/// array `requiredDocuments`; legacy requires an array `checklist`.
/// Anything else, including malformed JSON, is `Unknown`.
pub fn detect_and_parse(raw: &str) -> DetectedChecklist {
    let candidate = extract_json_candidate(raw);
    let value: serde_json::Value = match serde_json::from_str(&candidate) {
        Ok(v) => v,
        Err(_) => return DetectedChecklist::Unknown,
    };

    let is_brain = value.get("countryCode").is_some()
        && value.get("visaTypeCode").is_some()
        && value
            .get("requiredDocuments")
            .map(serde_json::Value::is_array)
            .unwrap_or(false);
    if is_brain {
        return match serde_json::from_value(value) {
            Ok(brain) => DetectedChecklist::Brain(brain),
            Err(_) => DetectedChecklist::Unknown,
        };
    }

    let is_legacy = value
        .get("checklist")
        .map(serde_json::Value::is_array)
        .unwrap_or(false);
    if is_legacy {
        return match serde_json::from_value(value) {
            Ok(legacy) => DetectedChecklist::Legacy(legacy),
            Err(_) => DetectedChecklist::Unknown,
        };
    }

    DetectedChecklist::Unknown
}

/// Classify a payload and normalize whatever was recognized into the
/// canonical schema. Legacy payloads are mapped through
/// [`to_brain_output`] with the supplied profile and destination.
pub fn detect_and_normalize(
    raw: &str,
    profile: &ApplicantProfile,
    destination: &DestinationContext,
) -> (DetectedFormat, Option<ChecklistBrainOutput>) {
    match detect_and_parse(raw) {
        DetectedChecklist::Brain(brain) => (DetectedFormat::Brain, Some(brain)),
        DetectedChecklist::Legacy(legacy) => (
            DetectedFormat::Legacy,
            Some(to_brain_output(&legacy, profile, destination)),
        ),
        DetectedChecklist::Unknown => (DetectedFormat::Unknown, None),
    }
}

/// Strip Markdown code fences and surrounding prose, leaving the
/// outermost JSON object.
fn extract_json_candidate(raw: &str) -> String {
    let mut text = raw.trim();

    if let Some(start) = text.find("```json") {
        let after = &text[start + 7..];
        if let Some(end) = after.find("```") {
            text = after[..end].trim();
        }
    } else if let Some(start) = text.find("```") {
        let after = &text[start + 3..];
        if let Some(end) = after.find("```") {
            text = after[..end].trim();
        }
    }

    if let (Some(open), Some(close)) = (text.find('{'), text.rfind('}')) {
        if close > open {
            return text[open..=close].to_owned();
        }
    }
    text.to_owned()
}
