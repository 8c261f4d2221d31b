// Condition Abstract Syntax Tree
//
// A parsed condition is a flat token sequence. There is no nesting and no
// precedence: connectives combine comparison results strictly left to right.

use std::fmt;

use crate::query::executor::result::DataValue;

/// Comparison operators understood by the condition language
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ComparisonOp {
    Equals,
    NotEquals,
    LessThan,
    LessEqual,
    GreaterThan,
    GreaterEqual,
}

impl ComparisonOp {
    /// Look up an operator by its symbol
    pub fn from_symbol(symbol: &str) -> Option<Self> {
        match symbol {
            "=" => Some(ComparisonOp::Equals),
            "!=" => Some(ComparisonOp::NotEquals),
            "<" => Some(ComparisonOp::LessThan),
            "<=" => Some(ComparisonOp::LessEqual),
            ">" => Some(ComparisonOp::GreaterThan),
            ">=" => Some(ComparisonOp::GreaterEqual),
            _ => None,
        }
    }

    pub fn symbol(&self) -> &'static str {
        match self {
            ComparisonOp::Equals => "=",
            ComparisonOp::NotEquals => "!=",
            ComparisonOp::LessThan => "<",
            ComparisonOp::LessEqual => "<=",
            ComparisonOp::GreaterThan => ">",
            ComparisonOp::GreaterEqual => ">=",
        }
    }
}

impl fmt::Display for ComparisonOp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.symbol())
    }
}

/// Logical connective between two comparisons
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Connective {
    And,
    Or,
}

impl Connective {
    /// Case-insensitive keyword lookup
    pub fn from_keyword(word: &str) -> Option<Self> {
        if word.eq_ignore_ascii_case("AND") {
            Some(Connective::And)
        } else if word.eq_ignore_ascii_case("OR") {
            Some(Connective::Or)
        } else {
            None
        }
    }
}

impl fmt::Display for Connective {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Connective::And => f.write_str("AND"),
            Connective::Or => f.write_str("OR"),
        }
    }
}

/// `column operator literal`
#[derive(Debug, Clone, PartialEq)]
pub struct Comparison {
    pub column: String,
    pub op: ComparisonOp,
    pub value: DataValue,
}

impl Comparison {
    pub fn new(column: impl Into<String>, op: ComparisonOp, value: impl Into<DataValue>) -> Self {
        Comparison {
            column: column.into(),
            op,
            value: value.into(),
        }
    }
}

/// One element of a parsed condition
#[derive(Debug, Clone, PartialEq)]
pub enum ConditionToken {
    Comparison(Comparison),
    Connective(Connective),
    /// A segment that is neither a keyword nor a comparison. It contributes
    /// no term when the condition is evaluated.
    Invalid(String),
}

/// Parsed condition, ready for evaluation
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Condition {
    pub tokens: Vec<ConditionToken>,
}

impl Condition {
    pub fn new(tokens: Vec<ConditionToken>) -> Self {
        Condition { tokens }
    }

    /// Comparisons in source order
    pub fn comparisons(&self) -> impl Iterator<Item = &Comparison> {
        self.tokens.iter().filter_map(|token| match token {
            ConditionToken::Comparison(c) => Some(c),
            _ => None,
        })
    }

    /// Connectives in source order, independent of any dropped segments
    pub fn connectives(&self) -> impl Iterator<Item = Connective> + '_ {
        self.tokens.iter().filter_map(|token| match token {
            ConditionToken::Connective(c) => Some(*c),
            _ => None,
        })
    }

    /// Segments the parser could not make sense of
    pub fn invalid_segments(&self) -> impl Iterator<Item = &str> {
        self.tokens.iter().filter_map(|token| match token {
            ConditionToken::Invalid(s) => Some(s.as_str()),
            _ => None,
        })
    }
}
