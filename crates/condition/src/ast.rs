use std::fmt;

use serde::{Deserialize, Serialize};

/// A dotted attribute path, e.g. `sponsorType` or `riskScore.level`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct FieldPath(pub Vec<String>);

impl FieldPath {
    pub fn segments(&self) -> &[String] {
        &self.0
    }
}

impl fmt::Display for FieldPath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0.join("."))
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum CompareOp {
    /// `===`
    StrictEq,
    /// `!==`
    StrictNeq,
}

/// A comparison literal. The grammar admits quoted strings and the bare
/// keywords `true`/`false`; nothing else.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum Literal {
    Str(String),
    Bool(bool),
}

impl Literal {
    pub fn type_name(&self) -> &'static str {
        match self {
            Literal::Str(_) => "string",
            Literal::Bool(_) => "boolean",
        }
    }
}

/// Parsed condition expression.
///
/// `All`/`Any` are n-ary rather than binary: the grammar forbids mixing
/// `&&` and `||` at one nesting level, so a connector chain is flat by
/// construction and each node holds at least two terms.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum Expr {
    Compare {
        field: FieldPath,
        op: CompareOp,
        literal: Literal,
    },
    /// `term && term && ...`
    All(Vec<Expr>),
    /// `term || term || ...`
    Any(Vec<Expr>),
}
