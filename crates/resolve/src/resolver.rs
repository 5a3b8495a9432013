//! The requirement resolver: active rule set version × applicant
//! profile → applicant-specific document list.
//!
//! This is a pure read path. Condition evaluation errors degrade to
//! `included = true` plus a recorded warning (fail-open): a malformed or
//! stale condition must never hide an otherwise-required document, but
//! the defect is surfaced for audit rather than swallowed.

use std::sync::Arc;

use serde::{Deserialize, Serialize};
use tracing::warn;

use crate::cache::ExprCache;
use visado_condition::{eval_expr, ApplicantProfile, ConditionError};
use visado_store::{RequiredDocument, RuleSetStore, StoreError};

/// A document entry annotated with the outcome of its condition.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ResolvedDocument {
    #[serde(flatten)]
    pub document: RequiredDocument,
    pub included: bool,
}

/// A condition defect recovered by fail-open inclusion.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ConditionWarning {
    pub document_type: String,
    pub condition: String,
    pub message: String,
}

/// The applicant-specific resolution result.
///
/// `documents` preserves the rule set's declaration order; category and
/// pass-through data are carried verbatim on each entry.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ResolvedChecklist {
    pub rule_set_id: String,
    pub country_code: String,
    pub visa_type: String,
    pub version: u32,
    pub documents: Vec<ResolvedDocument>,
    pub warnings: Vec<ConditionWarning>,
}

impl ResolvedChecklist {
    /// The entries whose condition held (or that carry no condition).
    pub fn included(&self) -> impl Iterator<Item = &ResolvedDocument> {
        self.documents.iter().filter(|d| d.included)
    }
}

/// Resolves document requirements against a rule set store.
///
/// Holds a shared [`ExprCache`] so each distinct condition string is
/// parsed once across all resolutions.
pub struct Resolver<S> {
    store: Arc<S>,
    cache: ExprCache,
}

impl<S: RuleSetStore> Resolver<S> {
    pub fn new(store: Arc<S>) -> Self {
        Resolver {
            store,
            cache: ExprCache::new(),
        }
    }

    /// Resolve the concrete document list for one applicant.
    ///
    /// Fails fast with [`StoreError::NotFound`] when no approved rule
    /// set exists for the pair; never writes to the store.
    pub async fn resolve(
        &self,
        country_code: &str,
        visa_type: &str,
        profile: &ApplicantProfile,
    ) -> Result<ResolvedChecklist, StoreError> {
        let active = self.store.get_active_version(country_code, visa_type).await?;

        let mut documents = Vec::with_capacity(active.documents.len());
        let mut warnings = Vec::new();

        for doc in &active.documents {
            let included = match doc.condition() {
                None => true,
                Some(expr) => self.evaluate_condition(doc, expr, profile, &mut warnings),
            };
            documents.push(ResolvedDocument {
                document: doc.clone(),
                included,
            });
        }

        Ok(ResolvedChecklist {
            rule_set_id: active.id.clone(),
            country_code: active.country_code.clone(),
            visa_type: active.visa_type.clone(),
            version: active.version,
            documents,
            warnings,
        })
    }

    fn evaluate_condition(
        &self,
        doc: &RequiredDocument,
        expr: &str,
        profile: &ApplicantProfile,
        warnings: &mut Vec<ConditionWarning>,
    ) -> bool {
        let outcome: Result<bool, ConditionError> = self
            .cache
            .parsed(expr)
            .and_then(|ast| eval_expr(&ast, profile));

        match outcome {
            Ok(included) => included,
            Err(err) => {
                warn!(
                    document_type = %doc.document_type,
                    condition = expr,
                    error = %err,
                    "condition failed to evaluate; including document fail-open"
                );
                warnings.push(ConditionWarning {
                    document_type: doc.document_type.clone(),
                    condition: expr.to_owned(),
                    message: err.to_string(),
                });
                true
            }
        }
    }
}
