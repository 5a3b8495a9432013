use std::sync::Arc;

use async_trait::async_trait;

use crate::error::StoreError;
use crate::record::{RequiredDocument, RuleSetVersion};
use visado_condition::ConditionError;

/// The storage trait for versioned rule sets.
///
/// A `RuleSetStore` holds every [`RuleSetVersion`] per (country code,
/// visa type) pair and enforces the approval and version-monotonicity
/// invariants:
///
/// - version numbers per pair are positive and strictly increasing
/// - the active version is the highest-numbered approved one; drafts are
///   never returned by [`get_active_version`](RuleSetStore::get_active_version)
/// - approved versions are write-once
/// - a version containing any conditioned document has `version >= 2`
///
/// ## Concurrency
///
/// `get_active_version` runs on every applicant resolution and must
/// support many concurrent readers; mutations are administrative and
/// rare. A reader racing an `approve` may observe the old or the new
/// active version, but never a version with `is_approved = true` and a
/// partially-written document list: publication of a version is atomic.
/// Active versions are returned as `Arc` snapshots so readers hold an
/// immutable view regardless of later mutations.
///
/// ## Authoring-time validation
///
/// `create_draft` and `patch` parse every document condition and fail
/// with [`StoreError::InvalidCondition`] rather than persisting text the
/// resolver would have to fail-open on. See [`validate_documents`].
///
/// ## Authorization
///
/// The store performs none. Callers must ensure only administrative
/// identities reach the mutation methods.
///
/// Implementations must be `Send + Sync + 'static` to be shared across
/// async task boundaries.
#[async_trait]
pub trait RuleSetStore: Send + Sync + 'static {
    /// The active version for a pair: highest-numbered with
    /// `is_approved = true`.
    ///
    /// Returns `Err(StoreError::NotFound)` if no approved version exists,
    /// even when drafts do.
    async fn get_active_version(
        &self,
        country_code: &str,
        visa_type: &str,
    ) -> Result<Arc<RuleSetVersion>, StoreError>;

    /// Create a new draft at version = (max existing version for the
    /// pair) + 1, `is_approved = false`.
    ///
    /// A first draft that already carries conditions is created at
    /// version 2 directly, keeping the conditions-imply-version>=2
    /// invariant without a separate patch round-trip.
    ///
    /// Returns the stored record so the caller learns the assigned id
    /// and version.
    async fn create_draft(
        &self,
        country_code: &str,
        visa_type: &str,
        documents: Vec<RequiredDocument>,
    ) -> Result<RuleSetVersion, StoreError>;

    /// Mark a draft approved.
    ///
    /// Approval is the only transition out of draft; there is no reject
    /// or revert. A flawed draft is abandoned by creating a new one.
    ///
    /// Returns `Err(StoreError::AlreadyApproved)` on a second call and
    /// `Err(StoreError::VersionNotFound)` for an unknown id.
    async fn approve(&self, id: &str) -> Result<(), StoreError>;

    /// Replace a draft's document list.
    ///
    /// Fails with `Err(StoreError::ImmutableVersion)` when the target is
    /// approved. Introducing a condition into a version-1 draft bumps the
    /// stored version number to 2 before persisting.
    ///
    /// Returns the updated record (its `version` may have been bumped).
    async fn patch(
        &self,
        id: &str,
        documents: Vec<RequiredDocument>,
    ) -> Result<RuleSetVersion, StoreError>;
}

/// Authoring-time condition validation shared by store backends.
///
/// Every non-blank condition must parse against the expression grammar.
/// Vocabulary and type errors remain evaluation-time concerns (they
/// depend on the profile), but syntax never reaches the resolver.
pub fn validate_documents(documents: &[RequiredDocument]) -> Result<(), StoreError> {
    for doc in documents {
        if let Some(expr) = doc.condition() {
            if let Err(source) = visado_condition::parse(expr) {
                // Only parse failures are authoring defects here
                debug_assert!(matches!(source, ConditionError::InvalidExpression { .. }));
                return Err(StoreError::InvalidCondition {
                    document_type: doc.document_type.clone(),
                    source,
                });
            }
        }
    }
    Ok(())
}
