use crate::ast::Statement;
use crate::diagnostics::DiagnosticState;
use crate::error::{Reason, Span};
use crate::parser::Parser;
use std::io;

/// Verdict for one line. Never changes after [`validate`] returns it.
#[derive(Debug, Clone, PartialEq)]
pub struct ValidationResult {
    pub is_valid: bool,
    pub reason: Option<Reason>,
    pub span: Option<Span>,
}

impl ValidationResult {
    fn valid() -> Self {
        Self {
            is_valid: true,
            reason: None,
            span: None,
        }
    }

    fn invalid(reason: Reason, span: Option<Span>) -> Self {
        Self {
            is_valid: false,
            reason: Some(reason),
            span,
        }
    }

    pub fn reason_text(&self) -> Option<String> {
        self.reason.as_ref().map(|reason| reason.to_string())
    }

    /// `<line> -- valid` or `<line> -- invalid: <reason>`.
    pub fn render(&self, line: &str) -> String {
        match &self.reason {
            Some(reason) if !self.is_valid => format!("{} -- invalid: {}", line, reason),
            _ => format!("{} -- valid", line),
        }
    }

    /// Print an ariadne report for an invalid verdict. Valid verdicts print nothing.
    pub fn report(&self, line: &str, filename: Option<&str>) -> io::Result<()> {
        match &self.reason {
            Some(reason) => {
                let span = self.span.unwrap_or_else(|| Span::single(0));
                reason.report(span, line, filename)
            }
            None => Ok(()),
        }
    }
}

/// Validate one line of text.
pub fn validate(line: &str) -> ValidationResult {
    validate_statement(line).0
}

/// Validate one line and hand back the parse tree when it was accepted.
pub fn validate_statement(line: &str) -> (ValidationResult, Option<Statement>) {
    let mut diag = DiagnosticState::new();
    let parsed = Parser::new(line, &mut diag).parse().ok();

    let result = match diag.finish() {
        None => ValidationResult::valid(),
        Some(reason) => ValidationResult::invalid(reason, diag.failure_span),
    };
    log::debug!("{:?} -> {:?}", line, result.reason);

    let statement = if result.is_valid { parsed } else { None };
    (result, statement)
}
