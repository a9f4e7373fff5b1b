use crate::diagnostics::DiagnosticState;
use crate::error::Span;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TokenType {
    // Single-character tokens
    LeftParen,
    RightParen,
    Minus,
    Plus,
    Slash,
    Star,
    Equal,

    // Literals
    Identifier,
    Number,

    // Special
    Invalid,
    Eof,
}

impl TokenType {
    pub fn is_operator(&self) -> bool {
        matches!(
            self,
            TokenType::Plus | TokenType::Minus | TokenType::Star | TokenType::Slash
        )
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Token {
    pub token_type: TokenType,
    pub lexeme: String,
    pub span: Span,
}

impl Token {
    pub fn new(token_type: TokenType, lexeme: String, span: Span) -> Self {
        Self {
            token_type,
            lexeme,
            span,
        }
    }
}

/// On-demand scanner over a single line.
///
/// Each call to [`Lexer::next_token`] yields one token; once the line is
/// exhausted every further call yields `Eof`.
pub struct Lexer {
    source: Vec<char>,
    start: usize,
    current: usize,
}

impl Lexer {
    pub fn new(source: &str) -> Self {
        Self {
            source: source.chars().collect(),
            start: 0,
            current: 0,
        }
    }

    pub fn next_token(&mut self, diag: &mut DiagnosticState) -> Token {
        self.skip_whitespace();
        self.start = self.current;

        if self.is_at_end() {
            return Token::new(TokenType::Eof, String::new(), Span::single(self.current));
        }

        let c = self.advance();
        let token = match c {
            '(' => self.make_token(TokenType::LeftParen),
            ')' => self.make_token(TokenType::RightParen),
            '-' => self.make_token(TokenType::Minus),
            '+' => self.make_token(TokenType::Plus),
            '*' => self.make_token(TokenType::Star),
            '/' => self.make_token(TokenType::Slash),
            '=' => self.make_token(TokenType::Equal),
            c if c.is_ascii_digit() || c == '.' => self.number(),
            c if c.is_ascii_alphabetic() || c == '_' => self.identifier(),
            _ => self.make_token(TokenType::Invalid),
        };

        if token.token_type == TokenType::Invalid {
            diag.record_invalid_token(&token.lexeme, token.span);
        }
        log::trace!("scanned {:?} {:?}", token.token_type, token.lexeme);
        token
    }

    /// Scan the rest of the line so any unrecognized character is recorded.
    pub fn drain(&mut self, diag: &mut DiagnosticState) {
        while self.next_token(diag).token_type != TokenType::Eof {}
    }

    fn is_at_end(&self) -> bool {
        self.current >= self.source.len()
    }

    fn advance(&mut self) -> char {
        let c = self.peek();
        if !self.is_at_end() {
            self.current += 1;
        }
        c
    }

    fn peek(&self) -> char {
        self.source.get(self.current).copied().unwrap_or('\0')
    }

    fn skip_whitespace(&mut self) {
        while !self.is_at_end() && is_line_space(self.peek()) {
            self.current += 1;
        }
    }

    fn number(&mut self) -> Token {
        while self.peek().is_ascii_digit() || self.peek() == '.' {
            self.advance();
        }

        let text: String = self.source[self.start..self.current].iter().collect();
        if is_well_formed_number(&text) {
            self.make_token(TokenType::Number)
        } else {
            self.make_token(TokenType::Invalid)
        }
    }

    fn identifier(&mut self) -> Token {
        while self.peek().is_ascii_alphanumeric() || self.peek() == '_' {
            self.advance();
        }
        self.make_token(TokenType::Identifier)
    }

    fn make_token(&self, token_type: TokenType) -> Token {
        let text: String = self.source[self.start..self.current].iter().collect();
        Token::new(token_type, text, Span::new(self.start, self.current))
    }
}

/// Whitespace between tokens: the ASCII set only. Other spacing characters
/// such as U+00A0 are unrecognized tokens.
pub fn is_line_space(c: char) -> bool {
    matches!(c, ' ' | '\t' | '\n' | '\r' | '\x0b' | '\x0c')
}

/// `digits` or `digits.digits`; anything else built from digits and dots is rejected.
fn is_well_formed_number(text: &str) -> bool {
    let mut parts = text.splitn(2, '.');
    let whole = parts.next().unwrap_or("");
    let digits = |s: &str| !s.is_empty() && s.chars().all(|c| c.is_ascii_digit());

    match parts.next() {
        None => digits(whole),
        Some(fraction) => digits(whole) && digits(fraction),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn scan(source: &str) -> (Vec<Token>, DiagnosticState) {
        let mut diag = DiagnosticState::new();
        let mut lexer = Lexer::new(source);
        let mut tokens = Vec::new();
        loop {
            let token = lexer.next_token(&mut diag);
            let done = token.token_type == TokenType::Eof;
            tokens.push(token);
            if done {
                break;
            }
        }
        (tokens, diag)
    }

    fn types(source: &str) -> Vec<TokenType> {
        scan(source).0.into_iter().map(|t| t.token_type).collect()
    }

    #[test]
    fn scans_assignment() {
        assert_eq!(
            types("total = (a1 + 2.5) * _b / 3 - x"),
            vec![
                TokenType::Identifier,
                TokenType::Equal,
                TokenType::LeftParen,
                TokenType::Identifier,
                TokenType::Plus,
                TokenType::Number,
                TokenType::RightParen,
                TokenType::Star,
                TokenType::Identifier,
                TokenType::Slash,
                TokenType::Number,
                TokenType::Minus,
                TokenType::Identifier,
                TokenType::Eof,
            ]
        );
    }

    #[test]
    fn keeps_exact_lexemes() {
        let (tokens, _) = scan("foo_1 42 3.14");
        assert_eq!(tokens[0].lexeme, "foo_1");
        assert_eq!(tokens[1].lexeme, "42");
        assert_eq!(tokens[2].lexeme, "3.14");
        assert_eq!(tokens[2].span, Span::new(9, 13));
    }

    #[test]
    fn eof_is_sticky() {
        let mut diag = DiagnosticState::new();
        let mut lexer = Lexer::new("a");
        assert_eq!(lexer.next_token(&mut diag).token_type, TokenType::Identifier);
        for _ in 0..3 {
            assert_eq!(lexer.next_token(&mut diag).token_type, TokenType::Eof);
        }
    }

    #[test]
    fn unknown_character_is_flagged() {
        let (tokens, diag) = scan("a # b");
        assert_eq!(tokens[1].token_type, TokenType::Invalid);
        assert_eq!(tokens[1].lexeme, "#");
        assert!(diag.saw_invalid_token);
        assert_eq!(diag.invalid_token_text.as_deref(), Some("#"));
        assert!(diag.reason.is_none());
    }

    #[test]
    fn malformed_numbers_are_single_invalid_tokens() {
        for source in ["1.2.3", "1.", ".5", "."] {
            let (tokens, diag) = scan(source);
            assert_eq!(tokens[0].token_type, TokenType::Invalid, "{}", source);
            assert_eq!(tokens[0].lexeme, source);
            assert_eq!(diag.invalid_token_text.as_deref(), Some(source));
        }
    }

    #[test]
    fn digits_then_letters_split() {
        assert_eq!(
            types("12abc"),
            vec![TokenType::Number, TokenType::Identifier, TokenType::Eof]
        );
    }

    #[test]
    fn non_ascii_letter_is_invalid() {
        let (tokens, diag) = scan("é");
        assert_eq!(tokens[0].token_type, TokenType::Invalid);
        assert_eq!(diag.invalid_token_text.as_deref(), Some("é"));
        assert_eq!(tokens[0].span, Span::new(0, 1));
    }

    #[test]
    fn unicode_spacing_is_not_whitespace() {
        let (tokens, diag) = scan("a\u{a0}+ b");
        assert_eq!(tokens[1].token_type, TokenType::Invalid);
        assert_eq!(tokens[1].lexeme, "\u{a0}");
        assert_eq!(diag.invalid_token_text.as_deref(), Some("\u{a0}"));

        let (tokens, _) = scan("a\u{2003}b");
        assert_eq!(tokens[1].token_type, TokenType::Invalid);
    }

    #[test]
    fn ascii_spacing_is_skipped() {
        assert_eq!(
            types("a \t\x0b\x0c\r+ b"),
            vec![
                TokenType::Identifier,
                TokenType::Plus,
                TokenType::Identifier,
                TokenType::Eof
            ]
        );
    }

    #[test]
    fn drain_records_late_invalid_token() {
        let mut diag = DiagnosticState::new();
        let mut lexer = Lexer::new("a b @");
        lexer.next_token(&mut diag);
        assert!(!diag.saw_invalid_token);
        lexer.drain(&mut diag);
        assert_eq!(diag.invalid_token_text.as_deref(), Some("@"));
    }
}
