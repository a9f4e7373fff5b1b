use crate::error::{Reason, Span};

/// Failure signals collected while scanning and parsing one line.
///
/// A fresh value is built for every validation call and handed by `&mut` to
/// the scanner and the parser, so nothing can leak from one line into the next.
/// The scanner and parser only raise flags; the single reason string is chosen
/// afterwards by [`DiagnosticState::finish`].
#[derive(Debug, Clone, Default, PartialEq)]
pub struct DiagnosticState {
    pub saw_assignment: bool,
    pub invalid_token_text: Option<String>,
    pub assign_lhs_was_complex: bool,
    pub last_token_was_operator: bool,
    pub saw_invalid_token: bool,
    pub nesting_too_deep: bool,
    pub unbalanced_parens: bool,
    pub trailing_input: bool,
    pub parse_failed: bool,
    pub failure_span: Option<Span>,
    pub reason: Option<Reason>,
}

/// Causes in reporting priority order. The first raised cause wins.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Cause {
    UnrecognizedToken,
    NestingTooDeep,
    InvalidAssignmentTarget,
    IncompleteExpression,
    UnbalancedParentheses,
    UnexpectedTrailingInput,
}

impl DiagnosticState {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record an unrecognized lexeme. Only the first one on a line is kept.
    pub fn record_invalid_token(&mut self, text: &str, span: Span) {
        if self.saw_invalid_token {
            return;
        }
        log::trace!("invalid token {:?} at {}..{}", text, span.start, span.end);
        self.saw_invalid_token = true;
        self.invalid_token_text = Some(text.to_string());
        self.failure_span = Some(span);
    }

    /// Mark the parse as failed at `span`. Earlier failure points are kept.
    pub fn fail_at(&mut self, span: Span) {
        self.parse_failed = true;
        if self.failure_span.is_none() {
            self.failure_span = Some(span);
        }
    }

    fn raised(&self) -> [(bool, Cause); 6] {
        [
            (self.saw_invalid_token, Cause::UnrecognizedToken),
            (self.nesting_too_deep, Cause::NestingTooDeep),
            (self.assign_lhs_was_complex, Cause::InvalidAssignmentTarget),
            (self.last_token_was_operator, Cause::IncompleteExpression),
            (self.unbalanced_parens, Cause::UnbalancedParentheses),
            (self.trailing_input, Cause::UnexpectedTrailingInput),
        ]
    }

    /// Pick the reason for a failed parse, in priority order.
    pub fn select_reason(&self) -> Reason {
        let cause = self
            .raised()
            .into_iter()
            .find_map(|(raised, cause)| raised.then_some(cause));

        match cause {
            Some(Cause::UnrecognizedToken) => {
                Reason::UnrecognizedToken(self.invalid_token_text.clone().unwrap_or_default())
            }
            Some(Cause::NestingTooDeep) => Reason::NestingTooDeep,
            Some(Cause::InvalidAssignmentTarget) => Reason::InvalidAssignmentTarget,
            Some(Cause::IncompleteExpression) => Reason::IncompleteExpression,
            Some(Cause::UnbalancedParentheses) => Reason::UnbalancedParentheses,
            Some(Cause::UnexpectedTrailingInput) => Reason::UnexpectedTrailingInput,
            None => Reason::GenericInvalid,
        }
    }

    /// Settle the final reason. Returns `None` when the line was accepted.
    pub fn finish(&mut self) -> Option<Reason> {
        if self.saw_invalid_token {
            self.parse_failed = true;
        }
        if self.parse_failed {
            let reason = self.select_reason();
            self.reason = Some(reason.clone());
            Some(reason)
        } else {
            None
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn untouched_state_accepts() {
        let mut state = DiagnosticState::new();
        assert_eq!(state.finish(), None);
        assert!(state.reason.is_none());
    }

    #[test]
    fn failure_without_cause_falls_back_to_generic() {
        let mut state = DiagnosticState::new();
        state.fail_at(Span::single(0));
        assert_eq!(state.finish(), Some(Reason::GenericInvalid));
    }

    #[test]
    fn invalid_token_outranks_everything() {
        let mut state = DiagnosticState::new();
        state.fail_at(Span::single(4));
        state.assign_lhs_was_complex = true;
        state.last_token_was_operator = true;
        state.unbalanced_parens = true;
        state.trailing_input = true;
        state.record_invalid_token("#", Span::single(4));
        assert_eq!(
            state.finish(),
            Some(Reason::UnrecognizedToken("#".to_string()))
        );
    }

    #[test]
    fn causes_follow_priority_order() {
        let mut state = DiagnosticState::new();
        state.parse_failed = true;
        state.trailing_input = true;
        assert_eq!(state.select_reason(), Reason::UnexpectedTrailingInput);
        state.unbalanced_parens = true;
        assert_eq!(state.select_reason(), Reason::UnbalancedParentheses);
        state.last_token_was_operator = true;
        assert_eq!(state.select_reason(), Reason::IncompleteExpression);
        state.assign_lhs_was_complex = true;
        assert_eq!(state.select_reason(), Reason::InvalidAssignmentTarget);
    }

    #[test]
    fn nesting_limit_ranks_below_invalid_token() {
        let mut state = DiagnosticState::new();
        state.fail_at(Span::single(256));
        state.nesting_too_deep = true;
        state.last_token_was_operator = true;
        assert_eq!(state.select_reason(), Reason::NestingTooDeep);
        state.record_invalid_token("#", Span::single(300));
        assert_eq!(state.select_reason(), Reason::UnrecognizedToken("#".to_string()));
    }

    #[test]
    fn only_first_invalid_token_is_kept() {
        let mut state = DiagnosticState::new();
        state.record_invalid_token("@", Span::single(1));
        state.record_invalid_token("#", Span::single(3));
        assert_eq!(state.invalid_token_text.as_deref(), Some("@"));
        assert_eq!(state.failure_span, Some(Span::single(1)));
    }

    #[test]
    fn invalid_token_alone_marks_failure() {
        let mut state = DiagnosticState::new();
        state.record_invalid_token("$", Span::single(0));
        assert!(state.finish().is_some());
        assert!(state.parse_failed);
    }
}
