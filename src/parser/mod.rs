mod lexer;
mod preprocessor;
mod statements;
mod types;

pub use lexer::tokenize;
pub use preprocessor::{is_comment, preprocess_lines, strip_comment, END_OF_PROGRAM};
pub use statements::parse_statement;
pub use types::{ParseError, SourceLine, Token};

use crate::program::Chain;

/// Parse program text into a statement chain, one statement per source line.
pub fn parse_program(source: &str) -> Result<Chain, ParseError> {
    let physical: Vec<&str> = source.lines().collect();
    let mut chain = Chain::new();

    for line in preprocess_lines(&physical) {
        let kind = parse_statement(&line)?;
        chain.push(line.line, kind);
    }

    tracing::debug!(statements = chain.len(), "parsed program");
    Ok(chain)
}
