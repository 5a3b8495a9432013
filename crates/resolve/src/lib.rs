//! visado-resolve: applicant-specific requirement resolution.
//!
//! Combines the active [`visado_store::RuleSetVersion`] for a
//! (country, visa type) pair with an applicant profile by evaluating
//! each document's condition, producing the concrete checklist the
//! surrounding service hands to the schema adapter.

mod cache;
mod resolver;

pub use cache::ExprCache;
pub use resolver::{ConditionWarning, ResolvedChecklist, ResolvedDocument, Resolver};
