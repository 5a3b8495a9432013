//! visado-condition: the condition expression language over applicant
//! profiles.
//!
//! A condition is a boolean expression gating whether a document entry
//! applies to an applicant, e.g.:
//!
//! ```text
//! sponsorType !== 'self'
//! (isStudent === true) || (hasUniversityInvitation === true)
//! riskScore.level === 'high' && previousVisaRejections === true
//! ```
//!
//! The crate provides:
//!
//! - [`parse`] -- expression text to typed [`Expr`] AST
//! - [`evaluate`] / [`eval_expr`] -- AST against an [`ApplicantProfile`]
//! - the fixed attribute vocabulary ([`ApplicantProfile`] and friends)
//!
//! Parsing is exposed separately from evaluation so rule-set authoring
//! can validate conditions at write time and resolution can memoize
//! parsed ASTs per distinct expression string.

pub mod ast;
pub mod error;
pub mod eval;
pub mod lexer;
pub mod parser;
pub mod profile;

pub use ast::{CompareOp, Expr, FieldPath, Literal};
pub use error::ConditionError;
pub use eval::{eval_expr, evaluate};
pub use parser::parse;
pub use profile::{
    ApplicantProfile, AttrValue, CurrentStatus, RiskLevel, RiskScore, SponsorType,
};
