//! The fixed applicant-attribute vocabulary.
//!
//! An [`ApplicantProfile`] is an immutable snapshot of everything a
//! condition expression may reference. Attribute lookup goes through
//! [`ApplicantProfile::attr`], which is the single source of truth for
//! the vocabulary: a field name the match below does not know is an
//! `UnknownField`, full stop.

use serde::{Deserialize, Serialize};

use crate::ast::FieldPath;
use crate::error::ConditionError;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SponsorType {
    #[serde(rename = "self")]
    SelfSponsored,
    Family,
    Employer,
    Other,
}

impl SponsorType {
    pub fn as_str(&self) -> &'static str {
        match self {
            SponsorType::SelfSponsored => "self",
            SponsorType::Family => "family",
            SponsorType::Employer => "employer",
            SponsorType::Other => "other",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CurrentStatus {
    Employed,
    Student,
    Unemployed,
    Other,
}

impl CurrentStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            CurrentStatus::Employed => "employed",
            CurrentStatus::Student => "student",
            CurrentStatus::Unemployed => "unemployed",
            CurrentStatus::Other => "other",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RiskLevel {
    Low,
    Medium,
    High,
}

impl RiskLevel {
    pub fn as_str(&self) -> &'static str {
        match self {
            RiskLevel::Low => "low",
            RiskLevel::Medium => "medium",
            RiskLevel::High => "high",
        }
    }
}

/// Risk assessment attached to a profile. Optional: not every applicant
/// has been scored, and `riskScore.level` on an unscored profile is an
/// `UnknownField` (absent traversal), not a default.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct RiskScore {
    pub level: RiskLevel,
}

/// Immutable applicant snapshot passed into resolution. Never mutated by
/// the engine.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ApplicantProfile {
    pub sponsor_type: SponsorType,
    pub current_status: CurrentStatus,
    #[serde(default)]
    pub is_student: bool,
    #[serde(default)]
    pub is_employed: bool,
    #[serde(default)]
    pub has_international_travel: bool,
    #[serde(default)]
    pub previous_visa_rejections: bool,
    #[serde(default)]
    pub previous_overstay: bool,
    #[serde(default)]
    pub has_property_in_local_country: bool,
    #[serde(default)]
    pub has_family_in_local_country: bool,
    #[serde(default)]
    pub has_children: bool,
    #[serde(default)]
    pub has_university_invitation: bool,
    #[serde(default)]
    pub has_other_invitation: bool,
    pub visa_type: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub risk_score: Option<RiskScore>,
}

/// The value an attribute lookup yields: conditions compare strings and
/// booleans, nothing else.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AttrValue {
    Text(String),
    Bool(bool),
}

impl AttrValue {
    pub fn type_name(&self) -> &'static str {
        match self {
            AttrValue::Text(_) => "string",
            AttrValue::Bool(_) => "boolean",
        }
    }
}

impl ApplicantProfile {
    /// Resolve a dotted field path against this profile.
    ///
    /// `riskScore.level` is the only nested path; a bare `riskScore` is
    /// not a comparable leaf and is reported as unknown like any other
    /// out-of-vocabulary name.
    pub fn attr(&self, path: &FieldPath) -> Result<AttrValue, ConditionError> {
        let unknown = || ConditionError::UnknownField {
            field: path.to_string(),
        };

        match path.segments() {
            [name] => match name.as_str() {
                "sponsorType" => Ok(AttrValue::Text(self.sponsor_type.as_str().to_owned())),
                "currentStatus" => Ok(AttrValue::Text(self.current_status.as_str().to_owned())),
                "visaType" => Ok(AttrValue::Text(self.visa_type.clone())),
                "isStudent" => Ok(AttrValue::Bool(self.is_student)),
                "isEmployed" => Ok(AttrValue::Bool(self.is_employed)),
                "hasInternationalTravel" => Ok(AttrValue::Bool(self.has_international_travel)),
                "previousVisaRejections" => Ok(AttrValue::Bool(self.previous_visa_rejections)),
                "previousOverstay" => Ok(AttrValue::Bool(self.previous_overstay)),
                "hasPropertyInLocalCountry" => {
                    Ok(AttrValue::Bool(self.has_property_in_local_country))
                }
                "hasFamilyInLocalCountry" => Ok(AttrValue::Bool(self.has_family_in_local_country)),
                "hasChildren" => Ok(AttrValue::Bool(self.has_children)),
                "hasUniversityInvitation" => Ok(AttrValue::Bool(self.has_university_invitation)),
                "hasOtherInvitation" => Ok(AttrValue::Bool(self.has_other_invitation)),
                _ => Err(unknown()),
            },
            [root, leaf] if root == "riskScore" && leaf == "level" => match &self.risk_score {
                Some(score) => Ok(AttrValue::Text(score.level.as_str().to_owned())),
                None => Err(unknown()),
            },
            _ => Err(unknown()),
        }
    }
}
