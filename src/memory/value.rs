use std::fmt;

use serde::Serialize;

/// Snapshot of a memory cell's contents.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "kind", content = "value", rename_all = "snake_case")]
pub enum Value {
    Int(i64),
    Real(f64),
    Str(String),
    Bool(bool),
    /// Address of another cell.
    Ref(usize),
    None,
}

impl Value {
    /// Short kind tag shown by the `p` and `sm` commands.
    pub fn kind_name(&self) -> &'static str {
        match self {
            Value::Int(_) => "int",
            Value::Real(_) => "real",
            Value::Str(_) => "str",
            Value::Bool(_) => "bool",
            Value::Ref(_) => "ptr",
            Value::None => "none",
        }
    }
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::Int(n) => write!(f, "{n}"),
            Value::Real(r) => write!(f, "{r}"),
            Value::Str(s) => write!(f, "{s}"),
            Value::Bool(true) => write!(f, "True"),
            Value::Bool(false) => write!(f, "False"),
            Value::Ref(addr) => write!(f, "{addr}"),
            Value::None => write!(f, "None"),
        }
    }
}
