use crate::error::ConditionError;

#[derive(Debug, Clone, PartialEq)]
pub enum Token {
    /// Identifiers: field names and the `true`/`false` keywords
    Word(String),
    /// Quoted string literal (content without quotes, escapes resolved).
    /// Both `'...'` and `"..."` are accepted: authored conditions use
    /// single quotes, JSON-transported ones arrive double-quoted.
    Str(String),
    LParen,
    RParen,
    Dot,
    /// `===`
    StrictEq,
    /// `!==`
    StrictNeq,
    /// `&&`
    AndAnd,
    /// `||`
    OrOr,
    Eof,
}

impl Token {
    /// Short description used in parser diagnostics.
    pub fn describe(&self) -> String {
        match self {
            Token::Word(w) => format!("'{}'", w),
            Token::Str(_) => "string literal".to_owned(),
            Token::LParen => "'('".to_owned(),
            Token::RParen => "')'".to_owned(),
            Token::Dot => "'.'".to_owned(),
            Token::StrictEq => "'==='".to_owned(),
            Token::StrictNeq => "'!=='".to_owned(),
            Token::AndAnd => "'&&'".to_owned(),
            Token::OrOr => "'||'".to_owned(),
            Token::Eof => "end of expression".to_owned(),
        }
    }
}

#[derive(Debug, Clone)]
pub struct Spanned {
    pub token: Token,
    /// Character offset of the token start within the expression.
    pub at: usize,
}

pub fn lex(src: &str) -> Result<Vec<Spanned>, ConditionError> {
    let mut tokens = Vec::new();
    let chars: Vec<char> = src.chars().collect();
    let mut pos = 0usize;

    while pos < chars.len() {
        let c = chars[pos];

        if c.is_whitespace() {
            pos += 1;
            continue;
        }

        let tok_at = pos;

        // String literal, single- or double-quoted
        if c == '\'' || c == '"' {
            let quote = c;
            pos += 1;
            let mut s = String::new();
            loop {
                if pos >= chars.len() {
                    return Err(ConditionError::invalid(
                        "unterminated string literal",
                        tok_at,
                    ));
                }
                let sc = chars[pos];
                if sc == quote {
                    pos += 1;
                    break;
                }
                if sc == '\\' {
                    pos += 1;
                    if pos >= chars.len() {
                        return Err(ConditionError::invalid(
                            "unterminated escape in string",
                            tok_at,
                        ));
                    }
                    match chars[pos] {
                        '\'' => s.push('\''),
                        '"' => s.push('"'),
                        '\\' => s.push('\\'),
                        'n' => s.push('\n'),
                        't' => s.push('\t'),
                        other => {
                            s.push('\\');
                            s.push(other);
                        }
                    }
                    pos += 1;
                    continue;
                }
                s.push(sc);
                pos += 1;
            }
            tokens.push(Spanned {
                token: Token::Str(s),
                at: tok_at,
            });
            continue;
        }

        // Identifier
        if c.is_ascii_alphabetic() || c == '_' {
            let mut w = String::new();
            while pos < chars.len()
                && (chars[pos].is_ascii_alphanumeric() || chars[pos] == '_')
            {
                w.push(chars[pos]);
                pos += 1;
            }
            tokens.push(Spanned {
                token: Token::Word(w),
                at: tok_at,
            });
            continue;
        }

        // Operators and punctuation
        let token = match c {
            '(' => {
                pos += 1;
                Token::LParen
            }
            ')' => {
                pos += 1;
                Token::RParen
            }
            '.' => {
                pos += 1;
                Token::Dot
            }
            '=' => {
                // Only the strict triple form is part of the grammar
                if chars.get(pos + 1) == Some(&'=') && chars.get(pos + 2) == Some(&'=') {
                    pos += 3;
                    Token::StrictEq
                } else {
                    return Err(ConditionError::invalid(
                        "expected '===' (loose '==' and assignment '=' are not supported)",
                        tok_at,
                    ));
                }
            }
            '!' => {
                if chars.get(pos + 1) == Some(&'=') && chars.get(pos + 2) == Some(&'=') {
                    pos += 3;
                    Token::StrictNeq
                } else {
                    return Err(ConditionError::invalid(
                        "expected '!==' (loose '!=' and unary '!' are not supported)",
                        tok_at,
                    ));
                }
            }
            '&' => {
                if chars.get(pos + 1) == Some(&'&') {
                    pos += 2;
                    Token::AndAnd
                } else {
                    return Err(ConditionError::invalid("expected '&&'", tok_at));
                }
            }
            '|' => {
                if chars.get(pos + 1) == Some(&'|') {
                    pos += 2;
                    Token::OrOr
                } else {
                    return Err(ConditionError::invalid("expected '||'", tok_at));
                }
            }
            other => {
                return Err(ConditionError::invalid(
                    format!("unexpected character '{}'", other),
                    tok_at,
                ));
            }
        };
        tokens.push(Spanned { token, at: tok_at });
    }

    tokens.push(Spanned {
        token: Token::Eof,
        at: chars.len(),
    });
    Ok(tokens)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn kinds(src: &str) -> Vec<Token> {
        lex(src).unwrap().into_iter().map(|s| s.token).collect()
    }

    #[test]
    fn lex_simple_atom() {
        assert_eq!(
            kinds("sponsorType !== 'self'"),
            vec![
                Token::Word("sponsorType".to_owned()),
                Token::StrictNeq,
                Token::Str("self".to_owned()),
                Token::Eof,
            ]
        );
    }

    #[test]
    fn lex_double_quoted_literal() {
        assert_eq!(
            kinds(r#"visaType === "student""#),
            vec![
                Token::Word("visaType".to_owned()),
                Token::StrictEq,
                Token::Str("student".to_owned()),
                Token::Eof,
            ]
        );
    }

    #[test]
    fn lex_dotted_path_and_parens() {
        assert_eq!(
            kinds("(riskScore.level === 'high')"),
            vec![
                Token::LParen,
                Token::Word("riskScore".to_owned()),
                Token::Dot,
                Token::Word("level".to_owned()),
                Token::StrictEq,
                Token::Str("high".to_owned()),
                Token::RParen,
                Token::Eof,
            ]
        );
    }

    #[test]
    fn lex_connectors() {
        assert_eq!(
            kinds("a === true && b === false || c === true"),
            vec![
                Token::Word("a".to_owned()),
                Token::StrictEq,
                Token::Word("true".to_owned()),
                Token::AndAnd,
                Token::Word("b".to_owned()),
                Token::StrictEq,
                Token::Word("false".to_owned()),
                Token::OrOr,
                Token::Word("c".to_owned()),
                Token::StrictEq,
                Token::Word("true".to_owned()),
                Token::Eof,
            ]
        );
    }

    #[test]
    fn lex_escaped_quote() {
        assert_eq!(
            kinds(r"name === 'it\'s'"),
            vec![
                Token::Word("name".to_owned()),
                Token::StrictEq,
                Token::Str("it's".to_owned()),
                Token::Eof,
            ]
        );
    }

    #[test]
    fn lex_rejects_loose_equality() {
        let err = lex("a == 'x'").unwrap_err();
        assert!(matches!(err, ConditionError::InvalidExpression { .. }));
    }

    #[test]
    fn lex_rejects_unterminated_string() {
        let err = lex("a === 'x").unwrap_err();
        assert!(matches!(err, ConditionError::InvalidExpression { .. }));
    }

    #[test]
    fn lex_rejects_single_ampersand() {
        let err = lex("a === true & b === true").unwrap_err();
        assert!(matches!(err, ConditionError::InvalidExpression { .. }));
    }
}
