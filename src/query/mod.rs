// MemQuery Query Processing Module
//
// This module contains the condition parser and the execution pipeline.

pub mod executor;
pub mod parser;

// Export key public interfaces
pub use executor::engine::QueryEngine;
pub use parser::parse_condition;
