//! Recursive-descent parser for condition expressions.
//!
//! Grammar, left to right:
//!
//! ```text
//! expression := term (('&&' term)* | ('||' term)*)
//! term       := atom | '(' expression ')'
//! atom       := field ('===' | '!==') literal
//! field      := word ('.' word)*
//! literal    := string | 'true' | 'false'
//! ```
//!
//! Mixing `&&` and `||` at the same nesting level without parentheses is
//! rejected: rule authors must disambiguate with explicit grouping.

use crate::ast::{CompareOp, Expr, FieldPath, Literal};
use crate::error::ConditionError;
use crate::lexer::{lex, Spanned, Token};

/// Parse a condition expression into an [`Expr`].
///
/// Empty or whitespace-only input is a parse error here; the resolution
/// layer treats such input as "no condition" and never calls the parser.
pub fn parse(expression: &str) -> Result<Expr, ConditionError> {
    let tokens = lex(expression)?;
    let mut parser = Parser { tokens, pos: 0 };
    if parser.peek() == &Token::Eof {
        return Err(ConditionError::invalid("empty expression", 0));
    }
    let expr = parser.parse_expr()?;
    if parser.peek() != &Token::Eof {
        return Err(parser.err(format!(
            "unexpected {} after expression",
            parser.peek().describe()
        )));
    }
    Ok(expr)
}

struct Parser {
    tokens: Vec<Spanned>,
    pos: usize,
}

impl Parser {
    fn peek(&self) -> &Token {
        &self.tokens[self.pos].token
    }

    fn cur_at(&self) -> usize {
        self.tokens[self.pos].at
    }

    fn advance(&mut self) {
        if self.pos + 1 < self.tokens.len() {
            self.pos += 1;
        }
    }

    fn err(&self, message: impl Into<String>) -> ConditionError {
        ConditionError::invalid(message, self.cur_at())
    }

    fn take_word(&mut self) -> Result<String, ConditionError> {
        match self.peek().clone() {
            Token::Word(w) => {
                self.advance();
                Ok(w)
            }
            other => Err(self.err(format!("expected field name, got {}", other.describe()))),
        }
    }

    // -- Expression parsing --------------------------------------

    fn parse_expr(&mut self) -> Result<Expr, ConditionError> {
        let first = self.parse_term()?;

        match self.peek() {
            Token::AndAnd => {
                let mut terms = vec![first];
                while self.peek() == &Token::AndAnd {
                    self.advance();
                    terms.push(self.parse_term()?);
                }
                if self.peek() == &Token::OrOr {
                    return Err(self.err(
                        "mixed '&&' and '||' at the same level; parenthesize to disambiguate",
                    ));
                }
                Ok(Expr::All(terms))
            }
            Token::OrOr => {
                let mut terms = vec![first];
                while self.peek() == &Token::OrOr {
                    self.advance();
                    terms.push(self.parse_term()?);
                }
                if self.peek() == &Token::AndAnd {
                    return Err(self.err(
                        "mixed '&&' and '||' at the same level; parenthesize to disambiguate",
                    ));
                }
                Ok(Expr::Any(terms))
            }
            _ => Ok(first),
        }
    }

    fn parse_term(&mut self) -> Result<Expr, ConditionError> {
        if self.peek() == &Token::LParen {
            self.advance();
            let inner = self.parse_expr()?;
            if self.peek() != &Token::RParen {
                return Err(self.err(format!("expected ')', got {}", self.peek().describe())));
            }
            self.advance();
            return Ok(inner);
        }
        self.parse_atom()
    }

    fn parse_atom(&mut self) -> Result<Expr, ConditionError> {
        let field = self.parse_field_path()?;
        let op = self.parse_compare_op()?;
        let literal = self.parse_literal()?;
        Ok(Expr::Compare { field, op, literal })
    }

    fn parse_field_path(&mut self) -> Result<FieldPath, ConditionError> {
        let first = self.take_word()?;
        if first == "true" || first == "false" {
            return Err(self.err("expected field name, got boolean literal"));
        }
        let mut segments = vec![first];
        while self.peek() == &Token::Dot {
            self.advance();
            segments.push(self.take_word()?);
        }
        Ok(FieldPath(segments))
    }

    fn parse_compare_op(&mut self) -> Result<CompareOp, ConditionError> {
        let op = match self.peek() {
            Token::StrictEq => CompareOp::StrictEq,
            Token::StrictNeq => CompareOp::StrictNeq,
            other => {
                return Err(self.err(format!(
                    "expected '===' or '!==', got {}",
                    other.describe()
                )));
            }
        };
        self.advance();
        Ok(op)
    }

    fn parse_literal(&mut self) -> Result<Literal, ConditionError> {
        match self.peek().clone() {
            Token::Str(s) => {
                self.advance();
                Ok(Literal::Str(s))
            }
            Token::Word(w) if w == "true" => {
                self.advance();
                Ok(Literal::Bool(true))
            }
            Token::Word(w) if w == "false" => {
                self.advance();
                Ok(Literal::Bool(false))
            }
            other => Err(self.err(format!(
                "expected string or boolean literal, got {}",
                other.describe()
            ))),
        }
    }
}
