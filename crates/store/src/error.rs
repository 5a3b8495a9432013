use visado_condition::ConditionError;

/// All errors that can be returned by a RuleSetStore implementation.
#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    /// No approved rule set exists for the (country, visa type) pair.
    /// Surfaced to callers as "no requirements available"; never retried.
    #[error("no approved rule set for {country_code}/{visa_type}")]
    NotFound {
        country_code: String,
        visa_type: String,
    },

    /// No rule set version with the given id.
    #[error("rule set version not found: {id}")]
    VersionNotFound { id: String },

    /// `approve` was called on a version that is already approved.
    #[error("rule set version already approved: {id}")]
    AlreadyApproved { id: String },

    /// `patch` targeted an approved version. Approved versions are
    /// write-once; edits go through a new draft.
    #[error("rule set version {id} is approved and immutable")]
    ImmutableVersion { id: String },

    /// A document carries a condition that does not parse. Rejected at
    /// authoring time so resolution never meets unparseable text.
    #[error("invalid condition on document '{document_type}': {source}")]
    InvalidCondition {
        document_type: String,
        #[source]
        source: ConditionError,
    },

    /// A backend-specific storage error (DB connection, serialization, etc.).
    #[error("storage backend error: {0}")]
    Backend(String),
}
