use crate::ast::{BinaryOp, Expr, Statement};
use crate::diagnostics::DiagnosticState;
use crate::error::Span;
use crate::lexer::{Lexer, Token, TokenType};

/// Deepest parenthesis nesting accepted. Keeps the recursive descent well
/// inside a default thread stack.
pub const MAX_NESTING_DEPTH: usize = 256;

/// Marks where the descent stopped. The reason itself is picked later from
/// the [`DiagnosticState`] flags.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ParseFailure {
    pub span: Span,
}

/// The two shapes a line can take, decided by two-token lookahead.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum StatementForm {
    Assignment,
    Expression,
}

/// Recursive-descent driver over an on-demand token stream.
///
/// Grammar, lowest precedence first:
///
/// ```text
/// statement  := assignment | expression
/// assignment := IDENTIFIER '=' expression
/// expression := term (('+' | '-') term)*
/// term       := factor (('*' | '/') factor)*
/// factor     := NUMBER | IDENTIFIER | '(' expression ')'
/// ```
pub struct Parser<'d> {
    lexer: Lexer,
    diag: &'d mut DiagnosticState,
    current: Token,
    lookahead: Option<Token>,
    depth: usize,
}

impl<'d> Parser<'d> {
    pub fn new(source: &str, diag: &'d mut DiagnosticState) -> Self {
        let mut lexer = Lexer::new(source);
        let current = lexer.next_token(diag);
        Self {
            lexer,
            diag,
            current,
            lookahead: None,
            depth: 0,
        }
    }

    /// Parse one complete line. On failure the rest of the line is still
    /// scanned so an unrecognized character anywhere gets recorded.
    pub fn parse(&mut self) -> Result<Statement, ParseFailure> {
        let result = self.statement().and_then(|statement| {
            self.finish_line()?;
            Ok(statement)
        });

        if let Err(failure) = &result {
            self.diag.fail_at(failure.span);
            self.lexer.drain(self.diag);
        }
        result
    }

    fn statement_form(&mut self) -> StatementForm {
        if self.check(TokenType::Identifier) && self.peek_next() == TokenType::Equal {
            StatementForm::Assignment
        } else {
            StatementForm::Expression
        }
    }

    fn statement(&mut self) -> Result<Statement, ParseFailure> {
        match self.statement_form() {
            StatementForm::Assignment => self.assignment(),
            StatementForm::Expression => {
                let expr = self.expression()?;
                Ok(Statement::Expression {
                    span: *expr.span(),
                    expr,
                })
            }
        }
    }

    fn assignment(&mut self) -> Result<Statement, ParseFailure> {
        self.diag.saw_assignment = true;
        let target = self.advance();
        self.advance(); // '='

        let value = self.expression()?;
        let span = Span::new(target.span.start, value.span().end);
        Ok(Statement::Assignment {
            target: target.lexeme,
            value,
            span,
        })
    }

    /// Anything left over after a complete statement is an error.
    fn finish_line(&mut self) -> Result<(), ParseFailure> {
        match self.current.token_type {
            TokenType::Eof => return Ok(()),
            TokenType::Equal => {
                log::trace!("'=' follows a non-identifier target");
                self.diag.assign_lhs_was_complex = true;
            }
            TokenType::RightParen => {
                log::trace!("')' without matching '('");
                self.diag.unbalanced_parens = true;
            }
            TokenType::Invalid => {}
            _ => {
                log::trace!("trailing token {:?}", self.current.lexeme);
                self.diag.trailing_input = true;
            }
        }
        Err(self.fail())
    }

    fn expression(&mut self) -> Result<Expr, ParseFailure> {
        let mut expr = self.term()?;

        while let Some(operator) = self.match_operator(&[TokenType::Plus, TokenType::Minus]) {
            let right = self.term()?;
            expr = binary(expr, operator, right);
        }

        Ok(expr)
    }

    fn term(&mut self) -> Result<Expr, ParseFailure> {
        let mut expr = self.factor()?;

        while let Some(operator) = self.match_operator(&[TokenType::Star, TokenType::Slash]) {
            let right = self.factor()?;
            expr = binary(expr, operator, right);
        }

        Ok(expr)
    }

    fn factor(&mut self) -> Result<Expr, ParseFailure> {
        match self.current.token_type {
            TokenType::Number => {
                let token = self.advance();
                Ok(Expr::Number {
                    text: token.lexeme,
                    span: token.span,
                })
            }
            TokenType::Identifier => {
                let token = self.advance();
                Ok(Expr::Variable {
                    name: token.lexeme,
                    span: token.span,
                })
            }
            TokenType::LeftParen => self.grouping(),
            TokenType::RightParen if self.depth == 0 => {
                log::trace!("')' without matching '('");
                self.diag.unbalanced_parens = true;
                Err(self.fail())
            }
            TokenType::Eof if self.depth > 0 => {
                log::trace!("end of input inside parentheses");
                self.diag.unbalanced_parens = true;
                Err(self.fail())
            }
            _ => Err(self.fail()),
        }
    }

    fn grouping(&mut self) -> Result<Expr, ParseFailure> {
        if self.depth >= MAX_NESTING_DEPTH {
            log::trace!("parentheses nested deeper than {}", MAX_NESTING_DEPTH);
            self.diag.nesting_too_deep = true;
            return Err(self.fail());
        }
        let open = self.advance();
        self.depth += 1;

        let expr = self.expression()?;

        match self.current.token_type {
            TokenType::RightParen => {
                let close = self.advance();
                self.depth -= 1;
                Ok(Expr::Grouping {
                    expr: Box::new(expr),
                    span: Span::new(open.span.start, close.span.end),
                })
            }
            TokenType::Eof => {
                log::trace!("'(' never closed");
                self.diag.unbalanced_parens = true;
                Err(self.fail())
            }
            _ => Err(self.fail()),
        }
    }

    fn match_operator(&mut self, types: &[TokenType]) -> Option<BinaryOp> {
        if !types.contains(&self.current.token_type) {
            return None;
        }

        let operator = match self.advance().token_type {
            TokenType::Plus => BinaryOp::Add,
            TokenType::Minus => BinaryOp::Subtract,
            TokenType::Star => BinaryOp::Multiply,
            TokenType::Slash => BinaryOp::Divide,
            _ => unreachable!(),
        };
        Some(operator)
    }

    fn check(&self, token_type: TokenType) -> bool {
        self.current.token_type == token_type
    }

    fn peek_next(&mut self) -> TokenType {
        if self.lookahead.is_none() {
            let token = self.lexer.next_token(self.diag);
            self.lookahead = Some(token);
        }
        match &self.lookahead {
            Some(token) => token.token_type,
            None => TokenType::Eof,
        }
    }

    /// Consume the current token and keep the dangling-operator flag in step.
    fn advance(&mut self) -> Token {
        let next = match self.lookahead.take() {
            Some(token) => token,
            None => self.lexer.next_token(self.diag),
        };
        let consumed = std::mem::replace(&mut self.current, next);

        self.diag.last_token_was_operator =
            consumed.token_type.is_operator() || consumed.token_type == TokenType::Equal;
        consumed
    }

    fn fail(&self) -> ParseFailure {
        log::trace!(
            "parse failed at {:?} ({}..{})",
            self.current.lexeme,
            self.current.span.start,
            self.current.span.end
        );
        ParseFailure {
            span: self.current.span,
        }
    }
}

fn binary(left: Expr, operator: BinaryOp, right: Expr) -> Expr {
    let span = Span::new(left.span().start, right.span().end);
    Expr::Binary {
        left: Box::new(left),
        operator,
        right: Box::new(right),
        span,
    }
}
