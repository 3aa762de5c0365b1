use super::lexer::tokenize;
use super::types::{ParseError, SourceLine, Token};
use crate::program::{BinaryOp, Builtin, Expr, StmtKind};

/// Parse one preprocessed line into a statement.
pub fn parse_statement(source: &SourceLine) -> Result<StmtKind, ParseError> {
    let tokens = tokenize(&source.text, source.line)?;
    let mut parser = LineParser {
        tokens: &tokens,
        pos: 0,
        line: source.line,
    };
    let stmt = parser.statement()?;
    if let Some(tok) = parser.peek() {
        return Err(ParseError::syntax(
            source.line,
            format!("unexpected {tok:?} after statement"),
        ));
    }
    Ok(stmt)
}

struct LineParser<'a> {
    tokens: &'a [Token],
    pos: usize,
    line: u32,
}

impl<'a> LineParser<'a> {
    fn peek(&self) -> Option<&'a Token> {
        self.tokens.get(self.pos)
    }

    fn bump(&mut self) -> Option<&'a Token> {
        let tok = self.tokens.get(self.pos);
        if tok.is_some() {
            self.pos += 1;
        }
        tok
    }

    fn expect(&mut self, want: Token) -> Result<(), ParseError> {
        match self.bump() {
            Some(tok) if *tok == want => Ok(()),
            Some(tok) => Err(ParseError::syntax(
                self.line,
                format!("expected {want:?}, found {tok:?}"),
            )),
            None => Err(ParseError::syntax(
                self.line,
                format!("expected {want:?} at end of line"),
            )),
        }
    }

    fn statement(&mut self) -> Result<StmtKind, ParseError> {
        let name = match self.bump() {
            Some(Token::Ident(name)) => name.clone(),
            Some(tok) => {
                return Err(ParseError::syntax(
                    self.line,
                    format!("statement cannot start with {tok:?}"),
                ))
            }
            None => return Err(ParseError::syntax(self.line, "empty statement")),
        };

        if name == "pass" && self.peek().is_none() {
            return Ok(StmtKind::Pass);
        }

        match self.bump() {
            Some(Token::Assign) => {
                let value = self.expr()?;
                Ok(StmtKind::Assignment {
                    target: name,
                    value,
                })
            }
            Some(Token::LParen) => {
                let args = self.arguments()?;
                Ok(StmtKind::FunctionCall { name, args })
            }
            _ => Err(ParseError::syntax(
                self.line,
                format!("expected assignment or call after '{name}'"),
            )),
        }
    }

    // Comma-separated expressions up to and including the closing paren.
    fn arguments(&mut self) -> Result<Vec<Expr>, ParseError> {
        let mut args = Vec::new();
        if self.peek() == Some(&Token::RParen) {
            self.bump();
            return Ok(args);
        }
        loop {
            args.push(self.expr()?);
            match self.bump() {
                Some(Token::Comma) => continue,
                Some(Token::RParen) => return Ok(args),
                _ => return Err(ParseError::syntax(self.line, "expected ',' or ')'")),
            }
        }
    }

    /// `element [op element]`; operators do not chain.
    fn expr(&mut self) -> Result<Expr, ParseError> {
        let lhs = self.element()?;
        let op = match self.peek() {
            Some(Token::Op(sym)) => binary_op(sym)
                .ok_or_else(|| ParseError::syntax(self.line, format!("unknown operator '{sym}'")))?,
            _ => return Ok(lhs),
        };
        self.bump();
        let rhs = self.element()?;
        Ok(Expr::Binary {
            op,
            lhs: Box::new(lhs),
            rhs: Box::new(rhs),
        })
    }

    fn element(&mut self) -> Result<Expr, ParseError> {
        match self.bump() {
            Some(Token::Int(n)) => Ok(Expr::Int(*n)),
            Some(Token::Real(r)) => Ok(Expr::Real(*r)),
            Some(Token::Str(s)) => Ok(Expr::Str(s.clone())),
            Some(Token::Op(sym)) if sym == "-" => match self.bump() {
                Some(Token::Int(n)) => n.checked_neg().map(Expr::Int).ok_or_else(|| {
                    ParseError::InvalidNumber {
                        line: self.line,
                        text: format!("-{n}"),
                    }
                }),
                Some(Token::Real(r)) => Ok(Expr::Real(-r)),
                _ => Err(ParseError::syntax(self.line, "expected number after '-'")),
            },
            Some(Token::Amp) => match self.bump() {
                Some(Token::Ident(name)) => Ok(Expr::AddressOf(name.clone())),
                _ => Err(ParseError::syntax(self.line, "expected name after '&'")),
            },
            Some(Token::LParen) => {
                let inner = self.expr()?;
                self.expect(Token::RParen)?;
                Ok(inner)
            }
            Some(Token::Ident(name)) => match name.as_str() {
                "True" => Ok(Expr::Bool(true)),
                "False" => Ok(Expr::Bool(false)),
                "None" => Ok(Expr::None),
                _ if self.peek() == Some(&Token::LParen) => {
                    let builtin = Builtin::from_name(name).ok_or_else(|| {
                        ParseError::syntax(
                            self.line,
                            format!("'{name}' cannot be used inside an expression"),
                        )
                    })?;
                    self.bump();
                    let arg = self.expr()?;
                    self.expect(Token::RParen)?;
                    Ok(Expr::Call(builtin, Box::new(arg)))
                }
                _ => Ok(Expr::Ident(name.clone())),
            },
            Some(tok) => Err(ParseError::syntax(
                self.line,
                format!("expected an operand, found {tok:?}"),
            )),
            None => Err(ParseError::syntax(self.line, "expected an operand")),
        }
    }
}

fn binary_op(sym: &str) -> Option<BinaryOp> {
    let op = match sym {
        "+" => BinaryOp::Add,
        "-" => BinaryOp::Sub,
        "*" => BinaryOp::Mul,
        "/" => BinaryOp::Div,
        "%" => BinaryOp::Mod,
        "**" => BinaryOp::Pow,
        "==" => BinaryOp::Eq,
        "!=" => BinaryOp::Ne,
        "<" => BinaryOp::Lt,
        "<=" => BinaryOp::Le,
        ">" => BinaryOp::Gt,
        ">=" => BinaryOp::Ge,
        _ => return None,
    };
    Some(op)
}
