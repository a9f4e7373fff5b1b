use ariadne::{Color, Fmt, Label, Report, ReportKind, Source};
use std::io;
use std::path::PathBuf;
use thiserror::Error;

/// Character-indexed range into a single line of input.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Span {
    pub start: usize,
    pub end: usize,
}

impl Span {
    pub fn new(start: usize, end: usize) -> Self {
        Self { start, end }
    }

    pub fn single(pos: usize) -> Self {
        Self {
            start: pos,
            end: pos + 1,
        }
    }
}

/// Why a line was rejected. Exactly one reason is reported per line.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum Reason {
    #[error("unrecognized token '{0}'")]
    UnrecognizedToken(String),
    #[error("expression nested too deeply")]
    NestingTooDeep,
    #[error("invalid assignment target")]
    InvalidAssignmentTarget,
    #[error("incomplete expression")]
    IncompleteExpression,
    #[error("unbalanced parentheses")]
    UnbalancedParentheses,
    #[error("unexpected trailing input")]
    UnexpectedTrailingInput,
    #[error("invalid expression")]
    GenericInvalid,
}

impl Reason {
    fn help(&self) -> &'static str {
        match self {
            Reason::UnrecognizedToken(_) => {
                "Only identifiers, numbers, '+', '-', '*', '/', '=', '(' and ')' are allowed."
            }
            Reason::NestingTooDeep => "Parentheses may be nested at most 256 levels deep.",
            Reason::InvalidAssignmentTarget => {
                "The left-hand side of '=' must be a single identifier. Example: x = a + b"
            }
            Reason::IncompleteExpression => "An operator must be followed by an operand.",
            Reason::UnbalancedParentheses => {
                "Every opening parenthesis '(' must have a matching closing parenthesis ')'."
            }
            Reason::UnexpectedTrailingInput => {
                "A line holds exactly one expression or assignment; remove the extra tokens."
            }
            Reason::GenericInvalid => "Expected an identifier, a number or a parenthesized expression.",
        }
    }

    fn color(&self) -> Color {
        match self {
            Reason::UnrecognizedToken(_) => Color::Red,
            Reason::InvalidAssignmentTarget => Color::Magenta,
            _ => Color::Yellow,
        }
    }

    /// Render this reason against `source` with an ariadne report on stderr.
    pub fn report(&self, span: Span, source: &str, filename: Option<&str>) -> io::Result<()> {
        let filename = filename.unwrap_or("<line>");
        let color = self.color();
        let message = self.to_string();

        // Clamp so end-of-input failures still point at the last column.
        let len = source.chars().count();
        let start = span.start.min(len.saturating_sub(1));
        let end = span.end.min(len).max((start + 1).min(len));

        Report::build(ReportKind::Error, filename, start)
            .with_message(format!("{}: {}", "Syntax Error".fg(color), message))
            .with_label(
                Label::new((filename, start..end))
                    .with_message(&message)
                    .with_color(color),
            )
            .with_note(format!("{}: {}", "help".fg(Color::Cyan), self.help()))
            .finish()
            .eprint((filename, Source::from(source)))
    }
}

/// Failures of the line-reading shell around the validator.
#[derive(Debug, Error)]
pub enum ExprCheckError {
    #[error("Could not open file '{}'", path.display())]
    Open {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
    #[error("failed to read input")]
    Read {
        #[source]
        source: io::Error,
    },
    #[error("failed to write output")]
    Write {
        #[source]
        source: io::Error,
    },
}
