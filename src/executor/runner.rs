use std::cmp::Ordering;
use std::io::Write;

use tracing::{debug, trace};

use super::{ExecError, ExecFailure, Execution, Executor};
use crate::memory::{Memory, Value};
use crate::program::{BinaryOp, Builtin, Chain, Expr, StmtId, StmtKind};

/// Reference executor. `print` output goes to `out`.
pub struct Interpreter<W: Write> {
    out: W,
}

impl<W: Write> Interpreter<W> {
    pub fn new(out: W) -> Self {
        Self { out }
    }

    pub fn output(&self) -> &W {
        &self.out
    }

    pub fn into_output(self) -> W {
        self.out
    }

    fn run_statement(&mut self, kind: &StmtKind, memory: &mut Memory) -> Result<(), ExecError> {
        match kind {
            StmtKind::Assignment { target, value } => {
                let value = eval(value, memory)?;
                memory.write(target, value);
                Ok(())
            }
            StmtKind::FunctionCall { name, args } => self.call(name, args, memory),
            StmtKind::Pass => Ok(()),
        }
    }

    fn call(&mut self, name: &str, args: &[Expr], memory: &Memory) -> Result<(), ExecError> {
        match name {
            "print" => {
                let values = args
                    .iter()
                    .map(|arg| eval(arg, memory))
                    .collect::<Result<Vec<_>, _>>()?;
                let text = values
                    .iter()
                    .map(ToString::to_string)
                    .collect::<Vec<_>>()
                    .join(" ");
                writeln!(self.out, "{text}").map_err(|e| ExecError::Output(e.to_string()))?;
                self.out
                    .flush()
                    .map_err(|e| ExecError::Output(e.to_string()))
            }
            _ => Err(ExecError::UnknownFunction(name.to_string())),
        }
    }
}

impl<W: Write> Executor for Interpreter<W> {
    fn execute(&mut self, chain: &Chain, start: StmtId, memory: &mut Memory) -> Execution {
        let mut at = start;
        loop {
            let stmt = chain.stmt(at);
            trace!(line = stmt.line, kind = stmt.kind.name(), "execute statement");

            if let Err(error) = self.run_statement(&stmt.kind, memory) {
                debug!(line = stmt.line, %error, "semantic error");
                return Err(ExecFailure { at, error });
            }

            match chain.next(at) {
                Some(next) => at = next,
                None => return Ok(at),
            }
        }
    }
}

/// Evaluate an expression against the current memory contents.
pub fn eval(expr: &Expr, memory: &Memory) -> Result<Value, ExecError> {
    match expr {
        Expr::Int(n) => Ok(Value::Int(*n)),
        Expr::Real(r) => Ok(Value::Real(*r)),
        Expr::Str(s) => Ok(Value::Str(s.clone())),
        Expr::Bool(b) => Ok(Value::Bool(*b)),
        Expr::None => Ok(Value::None),
        Expr::Ident(name) => memory
            .lookup(name)
            .ok_or_else(|| ExecError::UndefinedVariable(name.clone())),
        Expr::AddressOf(name) => memory
            .address_of(name)
            .map(Value::Ref)
            .ok_or_else(|| ExecError::UndefinedVariable(name.clone())),
        Expr::Call(builtin, arg) => convert(*builtin, eval(arg, memory)?),
        Expr::Binary { op, lhs, rhs } => binary(*op, eval(lhs, memory)?, eval(rhs, memory)?),
    }
}

fn convert(builtin: Builtin, value: Value) -> Result<Value, ExecError> {
    match (builtin, value) {
        (Builtin::Int, Value::Int(n)) => Ok(Value::Int(n)),
        (Builtin::Int, Value::Real(r)) if r.is_finite() => {
            // i64::MAX as f64 rounds up to 2^63, which is already out of range.
            let t = r.trunc();
            if t >= i64::MIN as f64 && t < i64::MAX as f64 {
                Ok(Value::Int(t as i64))
            } else {
                Err(ExecError::Overflow("int"))
            }
        }
        (Builtin::Int, Value::Bool(b)) => Ok(Value::Int(b as i64)),
        (Builtin::Int, Value::Str(s)) => s
            .trim()
            .parse::<i64>()
            .map(Value::Int)
            .map_err(|_| ExecError::InvalidConversion(format!("int('{s}')"))),
        (Builtin::Float, Value::Int(n)) => Ok(Value::Real(n as f64)),
        (Builtin::Float, Value::Real(r)) => Ok(Value::Real(r)),
        (Builtin::Float, Value::Str(s)) => s
            .trim()
            .parse::<f64>()
            .map(Value::Real)
            .map_err(|_| ExecError::InvalidConversion(format!("float('{s}')"))),
        (Builtin::Str, value) => Ok(Value::Str(value.to_string())),
        (builtin, value) => Err(ExecError::InvalidConversion(format!(
            "{builtin:?} from {}",
            value.kind_name()
        ))),
    }
}

fn binary(op: BinaryOp, lhs: Value, rhs: Value) -> Result<Value, ExecError> {
    let mismatch = |lhs: &Value, rhs: &Value| ExecError::TypeMismatch {
        op: op.symbol(),
        lhs: lhs.kind_name(),
        rhs: rhs.kind_name(),
    };

    match (&lhs, &rhs) {
        (Value::Int(a), Value::Int(b)) => int_op(op, *a, *b),
        (Value::Int(_), Value::Real(_))
        | (Value::Real(_), Value::Int(_))
        | (Value::Real(_), Value::Real(_)) => real_op(op, as_real(&lhs), as_real(&rhs)),
        (Value::Str(a), Value::Str(b)) => match op {
            BinaryOp::Add => Ok(Value::Str(format!("{a}{b}"))),
            _ => compare(op, a.cmp(b)).ok_or_else(|| mismatch(&lhs, &rhs)),
        },
        _ => match op {
            BinaryOp::Eq => Ok(Value::Bool(lhs == rhs)),
            BinaryOp::Ne => Ok(Value::Bool(lhs != rhs)),
            _ => Err(mismatch(&lhs, &rhs)),
        },
    }
}

fn as_real(value: &Value) -> f64 {
    match value {
        Value::Int(n) => *n as f64,
        Value::Real(r) => *r,
        _ => f64::NAN,
    }
}

// Integer division truncates toward zero.
fn int_op(op: BinaryOp, a: i64, b: i64) -> Result<Value, ExecError> {
    let overflow = || ExecError::Overflow(op.symbol());
    let n = match op {
        BinaryOp::Add => a.checked_add(b).ok_or_else(overflow)?,
        BinaryOp::Sub => a.checked_sub(b).ok_or_else(overflow)?,
        BinaryOp::Mul => a.checked_mul(b).ok_or_else(overflow)?,
        BinaryOp::Div | BinaryOp::Mod if b == 0 => return Err(ExecError::DivisionByZero),
        BinaryOp::Div => a.checked_div(b).ok_or_else(overflow)?,
        BinaryOp::Mod => a.checked_rem(b).ok_or_else(overflow)?,
        BinaryOp::Pow if b < 0 => return Ok(Value::Real((a as f64).powf(b as f64))),
        BinaryOp::Pow => {
            let exp = u32::try_from(b).map_err(|_| overflow())?;
            a.checked_pow(exp).ok_or_else(overflow)?
        }
        _ => {
            return compare(op, a.cmp(&b)).ok_or(ExecError::TypeMismatch {
                op: op.symbol(),
                lhs: "int",
                rhs: "int",
            })
        }
    };
    Ok(Value::Int(n))
}

fn real_op(op: BinaryOp, a: f64, b: f64) -> Result<Value, ExecError> {
    let r = match op {
        BinaryOp::Add => a + b,
        BinaryOp::Sub => a - b,
        BinaryOp::Mul => a * b,
        BinaryOp::Div | BinaryOp::Mod if b == 0.0 => return Err(ExecError::DivisionByZero),
        BinaryOp::Div => a / b,
        BinaryOp::Mod => a % b,
        BinaryOp::Pow => a.powf(b),
        _ => {
            // NaN is unordered: only `!=` holds.
            let result = match a.partial_cmp(&b) {
                Some(ordering) => compare(op, ordering),
                None => match op {
                    BinaryOp::Ne => Some(Value::Bool(true)),
                    BinaryOp::Eq | BinaryOp::Lt | BinaryOp::Le | BinaryOp::Gt | BinaryOp::Ge => {
                        Some(Value::Bool(false))
                    }
                    _ => None,
                },
            };
            return result.ok_or(ExecError::TypeMismatch {
                op: op.symbol(),
                lhs: "real",
                rhs: "real",
            });
        }
    };
    Ok(Value::Real(r))
}

fn compare(op: BinaryOp, ordering: Ordering) -> Option<Value> {
    let result = match op {
        BinaryOp::Eq => ordering == Ordering::Equal,
        BinaryOp::Ne => ordering != Ordering::Equal,
        BinaryOp::Lt => ordering == Ordering::Less,
        BinaryOp::Le => ordering != Ordering::Greater,
        BinaryOp::Gt => ordering == Ordering::Greater,
        BinaryOp::Ge => ordering != Ordering::Less,
        _ => return None,
    };
    Some(Value::Bool(result))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::parser::parse_program;

    fn run(source: &str) -> (Execution, Memory, String) {
        let chain = parse_program(source).unwrap();
        let mut memory = Memory::new();
        let mut interp = Interpreter::new(Vec::new());
        let result = interp.execute(&chain, chain.head().unwrap(), &mut memory);
        let out = String::from_utf8(interp.into_output()).unwrap();
        (result, memory, out)
    }

    #[test]
    fn runs_whole_chain_and_prints() {
        let (result, memory, out) = run("x = 1\ny = x + 2\nprint(x, y)\n");
        assert!(result.is_ok());
        assert_eq!(memory.lookup("y"), Some(Value::Int(3)));
        assert_eq!(out, "1 3\n");
    }

    #[test]
    fn mixed_arithmetic_promotes_to_real() {
        let (_, memory, _) = run("a = 3 * 1.5\nb = 7 / 2\nc = 2 ** 10\nd = 'ab' + 'cd'");
        assert_eq!(memory.lookup("a"), Some(Value::Real(4.5)));
        assert_eq!(memory.lookup("b"), Some(Value::Int(3)));
        assert_eq!(memory.lookup("c"), Some(Value::Int(1024)));
        assert_eq!(memory.lookup("d"), Some(Value::Str("abcd".into())));
    }

    #[test]
    fn failure_reports_failing_statement() {
        let chain = parse_program("x = 1\ny = x / 0\nz = 3").unwrap();
        let mut memory = Memory::new();
        let mut interp = Interpreter::new(Vec::new());
        let failure = interp
            .execute(&chain, chain.head().unwrap(), &mut memory)
            .unwrap_err();
        assert_eq!(chain.line(failure.at), 2);
        assert_eq!(failure.error, ExecError::DivisionByZero);
        assert_eq!(memory.lookup("z"), None);
    }

    #[test]
    fn undefined_name_and_unknown_function() {
        let (result, _, _) = run("x = y");
        assert_eq!(
            result.unwrap_err().error,
            ExecError::UndefinedVariable("y".into())
        );
        let (result, _, _) = run("foo(1)");
        assert_eq!(
            result.unwrap_err().error,
            ExecError::UnknownFunction("foo".into())
        );
    }

    #[test]
    fn conversions_and_references() {
        let (_, memory, _) = run("s = '42'\nn = int(s)\nf = float(n)\np = &n\nb = n == 42");
        assert_eq!(memory.lookup("n"), Some(Value::Int(42)));
        assert_eq!(memory.lookup("f"), Some(Value::Real(42.0)));
        assert_eq!(memory.lookup("p"), Some(Value::Ref(1)));
        assert_eq!(memory.lookup("b"), Some(Value::Bool(true)));
    }

    #[test]
    fn integer_overflow_is_an_error() {
        let (result, memory, _) = run("x = 9223372036854775807\ny = x + 1");
        assert_eq!(result.unwrap_err().error, ExecError::Overflow("+"));
        assert_eq!(memory.lookup("y"), None);

        let (result, _, _) = run("p = 2 ** 64");
        assert_eq!(result.unwrap_err().error, ExecError::Overflow("**"));
    }

    #[test]
    fn mismatched_operands_and_bad_conversions() {
        let (result, _, _) = run("x = 'a' - 1");
        assert_eq!(
            result.unwrap_err().error,
            ExecError::TypeMismatch {
                op: "-",
                lhs: "str",
                rhs: "int",
            }
        );

        let (result, _, _) = run("n = int('abc')");
        assert!(matches!(
            result.unwrap_err().error,
            ExecError::InvalidConversion(_)
        ));
    }

    #[test]
    fn int_of_out_of_range_real_overflows() {
        let (result, memory, _) = run("x = 100000000000000000000.0\ni = int(x)");
        assert_eq!(result.unwrap_err().error, ExecError::Overflow("int"));
        assert_eq!(memory.lookup("i"), None);

        let (result, memory, _) = run("x = -9223372036854775808.0\ni = int(x)");
        assert!(result.is_ok());
        assert_eq!(memory.lookup("i"), Some(Value::Int(i64::MIN)));
    }

    #[test]
    fn nan_compares_unequal_to_everything() {
        let source = "n = float('nan')\nlt = n < 1.0\nge = n >= 1.0\neq = n == n\nne = n != n";
        let (result, memory, _) = run(source);
        assert!(result.is_ok());
        assert_eq!(memory.lookup("lt"), Some(Value::Bool(false)));
        assert_eq!(memory.lookup("ge"), Some(Value::Bool(false)));
        assert_eq!(memory.lookup("eq"), Some(Value::Bool(false)));
        assert_eq!(memory.lookup("ne"), Some(Value::Bool(true)));
    }
}
