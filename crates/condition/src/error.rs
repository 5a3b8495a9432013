/// Errors produced while parsing or evaluating a condition expression.
///
/// `InvalidExpression` is a parse-time defect; `UnknownField` and
/// `TypeMismatch` are evaluation-time defects against a concrete profile.
/// Callers on the resolution path treat all three as fail-open (the
/// document stays visible), callers on the authoring path surface them.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ConditionError {
    /// The expression text does not conform to the condition grammar.
    #[error("invalid expression: {message} (at offset {at})")]
    InvalidExpression { message: String, at: usize },

    /// The expression references an attribute outside the fixed applicant
    /// vocabulary, or traverses a path that is absent on this profile.
    #[error("unknown field: {field}")]
    UnknownField { field: String },

    /// A boolean field was compared against a string literal or vice versa.
    #[error("type mismatch on '{field}': {field_type} field compared with {literal_type} literal")]
    TypeMismatch {
        field: String,
        field_type: &'static str,
        literal_type: &'static str,
    },
}

impl ConditionError {
    pub(crate) fn invalid(message: impl Into<String>, at: usize) -> Self {
        ConditionError::InvalidExpression {
            message: message.into(),
            at,
        }
    }
}
