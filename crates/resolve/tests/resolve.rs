//! End-to-end resolution behavior against the in-memory store.

use std::sync::Arc;

use async_trait::async_trait;
use visado_condition::{
    ApplicantProfile, CurrentStatus, RiskLevel, RiskScore, SponsorType,
};
use visado_resolve::Resolver;
use visado_store::{
    DocumentCategory, MemoryStore, RequiredDocument, RuleSetStore, RuleSetVersion, StoreError,
};

fn doc(document_type: &str, category: DocumentCategory, condition: Option<&str>) -> RequiredDocument {
    RequiredDocument {
        document_type: document_type.to_owned(),
        category,
        description: format!("{} description", document_type),
        validity_requirements: String::new(),
        format_requirements: String::new(),
        condition: condition.map(str::to_owned),
    }
}

fn student_profile() -> ApplicantProfile {
    ApplicantProfile {
        sponsor_type: SponsorType::Family,
        current_status: CurrentStatus::Student,
        is_student: true,
        is_employed: false,
        has_international_travel: false,
        previous_visa_rejections: false,
        previous_overstay: false,
        has_property_in_local_country: false,
        has_family_in_local_country: false,
        has_children: false,
        has_university_invitation: true,
        has_other_invitation: false,
        visa_type: "student".to_owned(),
        risk_score: Some(RiskScore {
            level: RiskLevel::Low,
        }),
    }
}

async fn seeded_store() -> Arc<MemoryStore> {
    let store = Arc::new(MemoryStore::new());
    let draft = store
        .create_draft(
            "DE",
            "student",
            vec![
                doc("passport", DocumentCategory::Required, None),
                doc(
                    "enrollment_letter",
                    DocumentCategory::Required,
                    Some("isStudent === true"),
                ),
                doc(
                    "sponsor_letter",
                    DocumentCategory::Required,
                    Some("sponsorType !== 'self'"),
                ),
                doc(
                    "employment_contract",
                    DocumentCategory::HighlyRecommended,
                    Some("isEmployed === true"),
                ),
                doc("travel_insurance", DocumentCategory::Optional, None),
            ],
        )
        .await
        .unwrap();
    store.approve(&draft.id).await.unwrap();
    store
}

#[tokio::test]
async fn resolves_conditions_against_the_profile() {
    let store = seeded_store().await;
    let resolver = Resolver::new(Arc::clone(&store));
    let checklist = resolver
        .resolve("DE", "student", &student_profile())
        .await
        .unwrap();

    assert!(checklist.warnings.is_empty());
    let flags: Vec<(&str, bool)> = checklist
        .documents
        .iter()
        .map(|d| (d.document.document_type.as_str(), d.included))
        .collect();
    assert_eq!(
        flags,
        vec![
            ("passport", true),
            ("enrollment_letter", true),
            ("sponsor_letter", true),
            ("employment_contract", false),
            ("travel_insurance", true),
        ]
    );
    // Category carried verbatim from the rule set
    assert_eq!(
        checklist.documents[3].document.category,
        DocumentCategory::HighlyRecommended
    );
}

#[tokio::test]
async fn resolve_is_idempotent() {
    let store = seeded_store().await;
    let resolver = Resolver::new(store);
    let profile = student_profile();
    let first = resolver.resolve("DE", "student", &profile).await.unwrap();
    let second = resolver.resolve("DE", "student", &profile).await.unwrap();
    assert_eq!(first, second);
}

#[tokio::test]
async fn missing_rule_set_fails_fast() {
    let store = Arc::new(MemoryStore::new());
    let resolver = Resolver::new(store);
    let err = resolver
        .resolve("FR", "tourist", &student_profile())
        .await
        .unwrap_err();
    assert!(matches!(err, StoreError::NotFound { .. }));
}

#[tokio::test]
async fn unknown_field_condition_fails_open_with_warning() {
    let store = Arc::new(MemoryStore::new());
    // `fooBar` parses fine, so authoring-time validation admits it; it is
    // simply outside the applicant vocabulary at evaluation time.
    let draft = store
        .create_draft(
            "DE",
            "student",
            vec![doc(
                "residence_permit",
                DocumentCategory::Required,
                Some("fooBar === 'x'"),
            )],
        )
        .await
        .unwrap();
    store.approve(&draft.id).await.unwrap();

    let resolver = Resolver::new(store);
    let checklist = resolver
        .resolve("DE", "student", &student_profile())
        .await
        .unwrap();

    assert!(checklist.documents[0].included);
    assert_eq!(checklist.warnings.len(), 1);
    assert_eq!(checklist.warnings[0].document_type, "residence_permit");
    assert!(checklist.warnings[0].message.contains("unknown field"));
}

#[tokio::test]
async fn type_mismatch_condition_fails_open_with_warning() {
    let store = Arc::new(MemoryStore::new());
    let draft = store
        .create_draft(
            "DE",
            "student",
            vec![doc(
                "guardian_consent",
                DocumentCategory::Required,
                Some("isStudent === 'true'"),
            )],
        )
        .await
        .unwrap();
    store.approve(&draft.id).await.unwrap();

    let resolver = Resolver::new(store);
    let checklist = resolver
        .resolve("DE", "student", &student_profile())
        .await
        .unwrap();

    assert!(checklist.documents[0].included);
    assert_eq!(checklist.warnings.len(), 1);
    assert!(checklist.warnings[0].message.contains("type mismatch"));
}

/// A backend holding data written before authoring-time validation
/// existed: the stored condition no longer parses. The resolver must
/// still fail open rather than propagate.
struct StaleConditionStore {
    version: Arc<RuleSetVersion>,
}

#[async_trait]
impl RuleSetStore for StaleConditionStore {
    async fn get_active_version(
        &self,
        _country_code: &str,
        _visa_type: &str,
    ) -> Result<Arc<RuleSetVersion>, StoreError> {
        Ok(Arc::clone(&self.version))
    }

    async fn create_draft(
        &self,
        _country_code: &str,
        _visa_type: &str,
        _documents: Vec<RequiredDocument>,
    ) -> Result<RuleSetVersion, StoreError> {
        Err(StoreError::Backend("read-only fixture".to_owned()))
    }

    async fn approve(&self, _id: &str) -> Result<(), StoreError> {
        Err(StoreError::Backend("read-only fixture".to_owned()))
    }

    async fn patch(
        &self,
        _id: &str,
        _documents: Vec<RequiredDocument>,
    ) -> Result<RuleSetVersion, StoreError> {
        Err(StoreError::Backend("read-only fixture".to_owned()))
    }
}

#[tokio::test]
async fn unparseable_stored_condition_fails_open_with_warning() {
    let store = Arc::new(StaleConditionStore {
        version: Arc::new(RuleSetVersion {
            id: "legacy-1".to_owned(),
            country_code: "DE".to_owned(),
            visa_type: "student".to_owned(),
            version: 2,
            is_approved: true,
            documents: vec![doc(
                "passport",
                DocumentCategory::Required,
                Some("isStudent === true || isEmployed === true && x === true"),
            )],
            financial_requirements: serde_json::Value::Null,
            processing_info: serde_json::Value::Null,
            fees: serde_json::Value::Null,
        }),
    });

    let resolver = Resolver::new(store);
    let checklist = resolver
        .resolve("DE", "student", &student_profile())
        .await
        .unwrap();

    assert!(checklist.documents[0].included);
    assert_eq!(checklist.warnings.len(), 1);
    assert!(checklist.warnings[0].message.contains("invalid expression"));
}
