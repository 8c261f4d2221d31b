// Condition Parser Module
//
// This module parses parameterized WHERE-style condition strings into a flat
// token sequence.

pub mod ast;
pub mod lexer;
pub mod parser;

pub use self::ast::{Comparison, ComparisonOp, Condition, ConditionToken, Connective};
pub use self::lexer::{Lexer, Token, bind_parameters};
pub use self::parser::{ConditionParser, parse_comparison, parse_condition};
