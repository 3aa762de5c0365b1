use std::iter::Peekable;
use std::str::Chars;

use super::types::{ParseError, Token};

/// Split one statement line into tokens.
pub fn tokenize(text: &str, line: u32) -> Result<Vec<Token>, ParseError> {
    let mut tokens = Vec::new();
    let mut chars = text.chars().peekable();

    while let Some(&ch) = chars.peek() {
        if ch.is_whitespace() {
            chars.next();
            continue;
        }

        if ch.is_ascii_digit() || starts_signed_or_bare_number(ch, &chars, &tokens) {
            let mut buf = String::new();
            if ch == '-' {
                buf.push(ch);
                chars.next();
            }
            while let Some(&c) = chars.peek() {
                if c.is_ascii_digit() || c == '.' {
                    buf.push(c);
                    chars.next();
                } else {
                    break;
                }
            }
            tokens.push(number_token(&buf, line)?);
            continue;
        }

        if ch.is_alphabetic() || ch == '_' {
            let mut buf = String::new();
            while let Some(&c) = chars.peek() {
                if c.is_alphanumeric() || c == '_' {
                    buf.push(c);
                    chars.next();
                } else {
                    break;
                }
            }
            tokens.push(Token::Ident(buf));
            continue;
        }

        chars.next();
        match ch {
            '"' | '\'' => {
                let mut buf = String::new();
                let mut closed = false;
                for c in chars.by_ref() {
                    if c == ch {
                        closed = true;
                        break;
                    }
                    buf.push(c);
                }
                if !closed {
                    return Err(ParseError::UnterminatedString { line });
                }
                tokens.push(Token::Str(buf));
            }
            '(' => tokens.push(Token::LParen),
            ')' => tokens.push(Token::RParen),
            ',' => tokens.push(Token::Comma),
            '&' => tokens.push(Token::Amp),
            '=' => {
                if chars.peek() == Some(&'=') {
                    chars.next();
                    tokens.push(Token::Op("==".into()));
                } else {
                    tokens.push(Token::Assign);
                }
            }
            '!' => {
                if chars.peek() == Some(&'=') {
                    chars.next();
                    tokens.push(Token::Op("!=".into()));
                } else {
                    return Err(ParseError::UnexpectedChar { line, ch });
                }
            }
            '<' | '>' => {
                if chars.peek() == Some(&'=') {
                    chars.next();
                    tokens.push(Token::Op(format!("{ch}=")));
                } else {
                    tokens.push(Token::Op(ch.to_string()));
                }
            }
            '*' => {
                if chars.peek() == Some(&'*') {
                    chars.next();
                    tokens.push(Token::Op("**".into()));
                } else {
                    tokens.push(Token::Op("*".into()));
                }
            }
            '+' | '-' | '/' | '%' => tokens.push(Token::Op(ch.to_string())),
            _ => return Err(ParseError::UnexpectedChar { line, ch }),
        }
    }

    Ok(tokens)
}

// `.5` is a number only where an operand is expected.
fn tokens_allow_number(tokens: &[Token]) -> bool {
    !matches!(
        tokens.last(),
        Some(Token::Ident(_)) | Some(Token::RParen) | Some(Token::Int(_)) | Some(Token::Real(_))
    )
}

// `-5` folds into the literal so that i64::MIN is representable.
fn starts_signed_or_bare_number(
    ch: char,
    chars: &Peekable<Chars<'_>>,
    tokens: &[Token],
) -> bool {
    if !tokens_allow_number(tokens) {
        return false;
    }
    match ch {
        '.' => true,
        '-' => {
            let mut ahead = chars.clone();
            ahead.next();
            matches!(ahead.peek(), Some(c) if c.is_ascii_digit() || *c == '.')
        }
        _ => false,
    }
}

fn number_token(text: &str, line: u32) -> Result<Token, ParseError> {
    let invalid = || ParseError::InvalidNumber {
        line,
        text: text.to_string(),
    };
    if text.contains('.') {
        text.parse::<f64>().map(Token::Real).map_err(|_| invalid())
    } else {
        text.parse::<i64>().map(Token::Int).map_err(|_| invalid())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn assignment_with_operator() {
        let tokens = tokenize("x = y ** 2.5", 1).unwrap();
        assert_eq!(
            tokens,
            vec![
                Token::Ident("x".into()),
                Token::Assign,
                Token::Ident("y".into()),
                Token::Op("**".into()),
                Token::Real(2.5),
            ]
        );
    }

    #[test]
    fn comparison_operators_are_single_tokens() {
        let tokens = tokenize("a <= b != c", 1).unwrap();
        assert_eq!(tokens[1], Token::Op("<=".into()));
        assert_eq!(tokens[3], Token::Op("!=".into()));
    }

    #[test]
    fn unterminated_string_reports_line() {
        let err = tokenize("print('oops)", 7).unwrap_err();
        assert_eq!(err, ParseError::UnterminatedString { line: 7 });
    }

    #[test]
    fn leading_minus_folds_into_literal() {
        let tokens = tokenize("x = -9223372036854775808", 1).unwrap();
        assert_eq!(tokens[2], Token::Int(i64::MIN));
        let tokens = tokenize("y = (-.5)", 1).unwrap();
        assert_eq!(tokens[3], Token::Real(-0.5));
    }

    #[test]
    fn minus_after_operand_stays_an_operator() {
        let tokens = tokenize("z = x -4", 1).unwrap();
        assert_eq!(
            tokens,
            vec![
                Token::Ident("z".into()),
                Token::Assign,
                Token::Ident("x".into()),
                Token::Op("-".into()),
                Token::Int(4),
            ]
        );
        let tokens = tokenize("z = 3-4", 1).unwrap();
        assert_eq!(tokens[3], Token::Op("-".into()));
    }
}
