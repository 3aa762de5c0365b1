use super::StmtId;

/// One node of the statement chain.
#[derive(Debug, Clone)]
pub struct Stmt {
    pub line: u32,
    pub kind: StmtKind,
    pub(super) next: Option<StmtId>,
}

#[derive(Debug, Clone, PartialEq)]
pub enum StmtKind {
    /// `target = value`
    Assignment { target: String, value: Expr },
    /// `name(args...)`
    FunctionCall { name: String, args: Vec<Expr> },
    Pass,
}

impl StmtKind {
    pub fn name(&self) -> &'static str {
        match self {
            StmtKind::Assignment { .. } => "assignment",
            StmtKind::FunctionCall { .. } => "function call",
            StmtKind::Pass => "pass",
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum Expr {
    Int(i64),
    Real(f64),
    Str(String),
    Bool(bool),
    None,
    Ident(String),
    /// `&name`, the address of a memory cell.
    AddressOf(String),
    Call(Builtin, Box<Expr>),
    Binary {
        op: BinaryOp,
        lhs: Box<Expr>,
        rhs: Box<Expr>,
    },
}

/// Conversion functions usable inside expressions.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Builtin {
    Int,
    Float,
    Str,
}

impl Builtin {
    pub fn from_name(name: &str) -> Option<Self> {
        match name {
            "int" => Some(Builtin::Int),
            "float" => Some(Builtin::Float),
            "str" => Some(Builtin::Str),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BinaryOp {
    Add,
    Sub,
    Mul,
    Div,
    Mod,
    Pow,
    Eq,
    Ne,
    Lt,
    Le,
    Gt,
    Ge,
}

impl BinaryOp {
    pub fn symbol(self) -> &'static str {
        match self {
            BinaryOp::Add => "+",
            BinaryOp::Sub => "-",
            BinaryOp::Mul => "*",
            BinaryOp::Div => "/",
            BinaryOp::Mod => "%",
            BinaryOp::Pow => "**",
            BinaryOp::Eq => "==",
            BinaryOp::Ne => "!=",
            BinaryOp::Lt => "<",
            BinaryOp::Le => "<=",
            BinaryOp::Gt => ">",
            BinaryOp::Ge => ">=",
        }
    }
}
