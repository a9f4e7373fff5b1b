// exprcheck Line Validator Library
//
// Checks single-line arithmetic expressions and assignments, and explains
// each rejected line with exactly one human-readable reason.

// Public modules
pub mod ast;
pub mod config;
pub mod diagnostics;
pub mod error;
pub mod lexer;
pub mod parser;
pub mod repl;
pub mod runner;
pub mod validator;

// Re-export commonly used items
pub use ast::{BinaryOp, Expr, Statement};
pub use config::{Config, InputSource};
pub use diagnostics::DiagnosticState;
pub use error::{ExprCheckError, Reason, Span};
pub use lexer::{Lexer, Token, TokenType};
pub use parser::{ParseFailure, Parser};
pub use validator::{validate, validate_statement, ValidationResult};

// Re-export main functions
pub use repl::start as start_repl;
pub use runner::{run, run_file, RunSummary};
