// Condition Lexer Implementation
//
// Two textual passes run before a condition is parsed:
//
// 1. `bind_parameters` replaces each `?` placeholder with the next positional
//    parameter, quoting and escaping text.
// 2. `Lexer::tokenize` cuts the bound text at the `AND` / `OR` keywords.
//
// Both passes skip over quoted literals, so a `?` or ` and ` inside quotes is
// ordinary text. Inside quotes a backslash escapes the next character.

use crate::query::executor::result::DataValue;
use crate::query::executor::type_conversion::{as_number, comparison_text};
use crate::query::parser::ast::Connective;

fn is_quote(ch: char) -> bool {
    ch == '\'' || ch == '"'
}

/// Render a parameter the way it is spliced into condition text.
///
/// Numeric-looking values go in bare; everything else becomes a single-quoted
/// literal. `Null` renders as the empty literal `''`.
pub fn render_parameter(param: &DataValue) -> String {
    match param {
        DataValue::Null => "''".to_string(),
        DataValue::Boolean(b) => if *b { "1" } else { "0" }.to_string(),
        other if as_number(other).is_some() => comparison_text(other).trim().to_string(),
        other => {
            let text = comparison_text(other);
            let mut quoted = String::with_capacity(text.len() + 2);
            quoted.push('\'');
            for ch in text.chars() {
                if ch == '\\' || ch == '\'' {
                    quoted.push('\\');
                }
                quoted.push(ch);
            }
            quoted.push('\'');
            quoted
        }
    }
}

/// Substitute `?` placeholders left to right. Missing parameters bind as
/// empty text; surplus parameters are ignored.
pub fn bind_parameters(condition: &str, params: &[DataValue]) -> String {
    let mut bound = String::with_capacity(condition.len());
    let mut params = params.iter();
    let mut quote: Option<char> = None;
    let mut chars = condition.chars();

    while let Some(ch) = chars.next() {
        match quote {
            Some(q) => {
                bound.push(ch);
                if ch == '\\' {
                    if let Some(escaped) = chars.next() {
                        bound.push(escaped);
                    }
                } else if ch == q {
                    quote = None;
                }
            }
            None if ch == '?' => match params.next() {
                Some(param) => bound.push_str(&render_parameter(param)),
                None => bound.push_str("''"),
            },
            None => {
                if is_quote(ch) {
                    quote = Some(ch);
                }
                bound.push(ch);
            }
        }
    }

    bound
}

/// Lexical unit of a bound condition
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Token<'a> {
    /// Text between connectives, not yet parsed
    Segment(&'a str),
    Connective(Connective),
}

/// Splits a bound condition on whitespace-delimited `AND` / `OR`
pub struct Lexer<'a> {
    input: &'a str,
    chars: Vec<(usize, char)>,
}

impl<'a> Lexer<'a> {
    pub fn new(input: &'a str) -> Self {
        Lexer {
            input,
            chars: input.char_indices().collect(),
        }
    }

    fn byte_offset(&self, index: usize) -> usize {
        self.chars
            .get(index)
            .map(|(pos, _)| *pos)
            .unwrap_or(self.input.len())
    }

    /// If a keyword surrounded by whitespace starts at the whitespace run at
    /// `index`, return it with the index just past its trailing whitespace.
    fn keyword_at(&self, index: usize) -> Option<(Connective, usize)> {
        let mut i = index;
        while i < self.chars.len() && self.chars[i].1.is_whitespace() {
            i += 1;
        }
        let word_start = i;
        while i < self.chars.len() && self.chars[i].1.is_ascii_alphabetic() {
            i += 1;
        }
        let word_end = i;
        while i < self.chars.len() && self.chars[i].1.is_whitespace() {
            i += 1;
        }
        if word_start == index || word_end == i {
            return None;
        }

        let word = &self.input[self.byte_offset(word_start)..self.byte_offset(word_end)];
        Connective::from_keyword(word).map(|keyword| (keyword, i))
    }

    /// Produce the alternating segment / connective sequence. The first and
    /// last tokens are always segments, possibly empty.
    pub fn tokenize(&self) -> Vec<Token<'a>> {
        let mut tokens = Vec::new();
        let mut segment_start = 0;
        let mut quote: Option<char> = None;
        let mut i = 0;

        while i < self.chars.len() {
            let (pos, ch) = self.chars[i];

            if let Some(q) = quote {
                if ch == '\\' {
                    i += 2;
                    continue;
                }
                if ch == q {
                    quote = None;
                }
                i += 1;
                continue;
            }

            if is_quote(ch) {
                quote = Some(ch);
            } else if ch.is_whitespace() {
                if let Some((keyword, next)) = self.keyword_at(i) {
                    tokens.push(Token::Segment(&self.input[segment_start..pos]));
                    tokens.push(Token::Connective(keyword));
                    segment_start = self.byte_offset(next);
                    i = next;
                    continue;
                }
            }
            i += 1;
        }

        tokens.push(Token::Segment(&self.input[segment_start..]));
        tokens
    }
}
