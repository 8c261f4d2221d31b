// Condition Parser Implementation
//
// Turns the segments produced by the lexer into comparison tokens. A segment
// must have the shape `column operator literal`; anything else is kept as an
// `Invalid` token and skipped at evaluation time.

use std::iter::Peekable;
use std::str::Chars;

use log::{debug, warn};

use super::ast::{Comparison, ComparisonOp, Condition, ConditionToken};
use super::lexer::{Lexer, Token, bind_parameters};
use crate::query::executor::result::DataValue;
use crate::query::executor::type_conversion::parse_numeric;

/// Parser for a condition whose placeholders are already bound
pub struct ConditionParser<'a> {
    tokens: Vec<Token<'a>>,
}

impl<'a> ConditionParser<'a> {
    /// Create a new parser from bound condition text
    pub fn new(input: &'a str) -> Self {
        ConditionParser {
            tokens: Lexer::new(input).tokenize(),
        }
    }

    /// Parse into a flat token sequence. Never fails.
    pub fn parse(self) -> Condition {
        let tokens: Vec<ConditionToken> = self
            .tokens
            .into_iter()
            .map(|token| match token {
                Token::Connective(c) => ConditionToken::Connective(c),
                Token::Segment(segment) => match parse_comparison(segment) {
                    Some(comparison) => ConditionToken::Comparison(comparison),
                    None => {
                        if !segment.trim().is_empty() {
                            warn!("Dropping unparseable condition segment: {:?}", segment);
                        }
                        ConditionToken::Invalid(segment.to_string())
                    }
                },
            })
            .collect();

        Condition::new(tokens)
    }
}

/// Bind `params` into `condition` and parse the result
pub fn parse_condition(condition: &str, params: &[DataValue]) -> Condition {
    let bound = bind_parameters(condition, params);
    debug!("Parsing condition: {}", bound);
    ConditionParser::new(&bound).parse()
}

fn is_column_char(ch: char) -> bool {
    ch.is_alphanumeric() || ch == '_' || ch == '.'
}

fn skip_whitespace(chars: &mut Peekable<Chars<'_>>) {
    while chars.next_if(|c| c.is_whitespace()).is_some() {}
}

// Longest match first, so `>=` is never read as `>` followed by `=`.
fn read_operator(chars: &mut Peekable<Chars<'_>>) -> Option<ComparisonOp> {
    let first = chars.next()?;
    let has_equals = chars.next_if_eq(&'=').is_some();
    match (first, has_equals) {
        ('>', true) => Some(ComparisonOp::GreaterEqual),
        ('<', true) => Some(ComparisonOp::LessEqual),
        ('!', true) => Some(ComparisonOp::NotEquals),
        ('>', false) => Some(ComparisonOp::GreaterThan),
        ('<', false) => Some(ComparisonOp::LessThan),
        ('=', false) => Some(ComparisonOp::Equals),
        _ => None,
    }
}

fn read_quoted(chars: &mut Peekable<Chars<'_>>, quote: char) -> Option<String> {
    let mut text = String::new();
    loop {
        match chars.next()? {
            '\\' => text.push(chars.next()?),
            c if c == quote => return Some(text),
            c => text.push(c),
        }
    }
}

/// Type a bare (unquoted) literal
fn bare_literal(text: &str) -> DataValue {
    if let Some(n) = parse_numeric(text) {
        DataValue::Number(n)
    } else if text.eq_ignore_ascii_case("true") {
        DataValue::Boolean(true)
    } else if text.eq_ignore_ascii_case("false") {
        DataValue::Boolean(false)
    } else {
        DataValue::Text(text.to_string())
    }
}

/// Parse `column operator literal`. Returns `None` for any other shape.
pub fn parse_comparison(segment: &str) -> Option<Comparison> {
    let mut chars = segment.trim().chars().peekable();

    let mut column = String::new();
    while let Some(c) = chars.next_if(|c| is_column_char(*c)) {
        column.push(c);
    }
    if column.is_empty() {
        return None;
    }

    skip_whitespace(&mut chars);
    let op = read_operator(&mut chars)?;
    skip_whitespace(&mut chars);

    let value = match chars.peek() {
        Some(&q) if q == '\'' || q == '"' => {
            chars.next();
            let text = read_quoted(&mut chars, q)?;
            // Nothing may follow the closing quote.
            if chars.next().is_some() {
                return None;
            }
            DataValue::Text(text)
        }
        Some(_) => {
            let rest: String = chars.collect();
            let rest = rest.trim();
            if rest.contains(['\'', '"']) {
                return None;
            }
            bare_literal(rest)
        }
        None => return None,
    };

    Some(Comparison { column, op, value })
}
