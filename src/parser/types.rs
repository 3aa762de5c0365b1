use thiserror::Error;

/// A source line that carries a statement, after comments and blanks are dropped.
#[derive(Debug, Clone, PartialEq)]
pub struct SourceLine {
    pub text: String,
    /// 1-based physical line number.
    pub line: u32,
}

/// Lexical token inside a single statement line.
#[derive(Debug, Clone, PartialEq)]
pub enum Token {
    Int(i64),
    Real(f64),
    Str(String),
    Ident(String),
    Op(String),
    Assign,
    Amp,
    LParen,
    RParen,
    Comma,
}

#[derive(Debug, Clone, PartialEq, Error)]
pub enum ParseError {
    #[error("line {line}: unterminated string literal")]
    UnterminatedString { line: u32 },

    #[error("line {line}: unexpected character '{ch}'")]
    UnexpectedChar { line: u32, ch: char },

    #[error("line {line}: invalid number '{text}'")]
    InvalidNumber { line: u32, text: String },

    #[error("line {line}: {message}")]
    Syntax { line: u32, message: String },
}

impl ParseError {
    pub fn line(&self) -> u32 {
        match self {
            ParseError::UnterminatedString { line }
            | ParseError::UnexpectedChar { line, .. }
            | ParseError::InvalidNumber { line, .. }
            | ParseError::Syntax { line, .. } => *line,
        }
    }

    pub(super) fn syntax(line: u32, message: impl Into<String>) -> Self {
        ParseError::Syntax {
            line,
            message: message.into(),
        }
    }
}
