//! Condition evaluation.
//!
//! Pure function of (expression, profile): no side effects, no caching
//! here. Expressions repeat across many applicants, so callers that
//! evaluate in bulk parse once via [`crate::parse`] and reuse the AST
//! with [`eval_expr`].

use crate::ast::{CompareOp, Expr, Literal};
use crate::error::ConditionError;
use crate::parser::parse;
use crate::profile::{ApplicantProfile, AttrValue};

/// Parse and evaluate a condition expression against a profile.
pub fn evaluate(expression: &str, profile: &ApplicantProfile) -> Result<bool, ConditionError> {
    let expr = parse(expression)?;
    eval_expr(&expr, profile)
}

/// Evaluate an already-parsed expression against a profile.
///
/// `&&`/`||` chains short-circuit left to right, so an erroring term
/// after the deciding one is never reached.
pub fn eval_expr(expr: &Expr, profile: &ApplicantProfile) -> Result<bool, ConditionError> {
    match expr {
        Expr::Compare { field, op, literal } => {
            let actual = profile.attr(field)?;
            let equal = match (&actual, literal) {
                (AttrValue::Text(value), Literal::Str(lit)) => value == lit,
                (AttrValue::Bool(value), Literal::Bool(lit)) => value == lit,
                (actual, literal) => {
                    return Err(ConditionError::TypeMismatch {
                        field: field.to_string(),
                        field_type: actual.type_name(),
                        literal_type: literal.type_name(),
                    });
                }
            };
            Ok(match op {
                CompareOp::StrictEq => equal,
                CompareOp::StrictNeq => !equal,
            })
        }
        Expr::All(terms) => {
            for term in terms {
                if !eval_expr(term, profile)? {
                    return Ok(false);
                }
            }
            Ok(true)
        }
        Expr::Any(terms) => {
            for term in terms {
                if eval_expr(term, profile)? {
                    return Ok(true);
                }
            }
            Ok(false)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::profile::{
        ApplicantProfile, CurrentStatus, RiskLevel, RiskScore, SponsorType,
    };

    fn profile() -> ApplicantProfile {
        ApplicantProfile {
            sponsor_type: SponsorType::Family,
            current_status: CurrentStatus::Student,
            is_student: false,
            is_employed: false,
            has_international_travel: false,
            previous_visa_rejections: true,
            previous_overstay: false,
            has_property_in_local_country: false,
            has_family_in_local_country: false,
            has_children: false,
            has_university_invitation: true,
            has_other_invitation: false,
            visa_type: "student".to_owned(),
            risk_score: Some(RiskScore {
                level: RiskLevel::Medium,
            }),
        }
    }

    #[test]
    fn strict_neq_against_differing_value() {
        assert!(evaluate("sponsorType !== 'self'", &profile()).unwrap());
    }

    #[test]
    fn strict_neq_against_matching_value() {
        let mut p = profile();
        p.sponsor_type = SponsorType::SelfSponsored;
        assert!(!evaluate("sponsorType !== 'self'", &p).unwrap());
    }

    #[test]
    fn or_of_parenthesized_atoms() {
        // isStudent is false but the invitation side carries the OR
        assert!(evaluate(
            "(isStudent === true) || (hasUniversityInvitation === true)",
            &profile()
        )
        .unwrap());
    }

    #[test]
    fn and_chain_short_circuits_before_error() {
        // first term false; the unknown-field term after it is never reached
        assert!(!evaluate("isStudent === true && fooBar === 'x'", &profile()).unwrap());
    }

    #[test]
    fn or_chain_short_circuits_before_error() {
        assert!(
            evaluate("hasUniversityInvitation === true || fooBar === 'x'", &profile()).unwrap()
        );
    }

    #[test]
    fn string_comparison_is_case_sensitive() {
        assert!(!evaluate("visaType === 'Student'", &profile()).unwrap());
        assert!(evaluate("visaType === 'student'", &profile()).unwrap());
    }

    #[test]
    fn dotted_path_resolves() {
        assert!(evaluate("riskScore.level === 'medium'", &profile()).unwrap());
        assert!(!evaluate("riskScore.level === 'high'", &profile()).unwrap());
    }

    #[test]
    fn unknown_field_errors() {
        let err = evaluate("fooBar === 'x'", &profile()).unwrap_err();
        assert_eq!(
            err,
            ConditionError::UnknownField {
                field: "fooBar".to_owned()
            }
        );
    }

    #[test]
    fn boolean_field_against_string_literal_is_type_mismatch() {
        let err = evaluate("isStudent === 'true'", &profile()).unwrap_err();
        assert!(matches!(err, ConditionError::TypeMismatch { .. }));
    }

    #[test]
    fn string_field_against_boolean_literal_is_type_mismatch() {
        let err = evaluate("sponsorType === true", &profile()).unwrap_err();
        assert!(matches!(err, ConditionError::TypeMismatch { .. }));
    }

    #[test]
    fn nested_grouping_evaluates() {
        let expr = "(sponsorType === 'family' && previousVisaRejections === true) \
                    || hasOtherInvitation === true";
        assert!(evaluate(expr, &profile()).unwrap());
    }

    #[test]
    fn reused_ast_matches_direct_evaluation() {
        let src = "currentStatus === 'student' && visaType === 'student'";
        let ast = crate::parse(src).unwrap();
        assert_eq!(
            eval_expr(&ast, &profile()).unwrap(),
            evaluate(src, &profile()).unwrap()
        );
    }
}
