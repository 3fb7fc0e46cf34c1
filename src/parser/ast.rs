use crate::ir::{ParamExpr, Parameter};

/// A register reference: name and optional index (`q` or `q[3]`).
pub type Arg = (String, Option<usize>);

/// Gate parameter expression as written in the source.
#[derive(Debug, PartialEq, Clone)]
pub enum Expr {
    Float(f64),
    Var(String),
    Neg(Box<Expr>),
    Add(Box<Expr>, Box<Expr>),
    Sub(Box<Expr>, Box<Expr>),
    Mul(Box<Expr>, Box<Expr>),
    Div(Box<Expr>, Box<Expr>),
}

impl Expr {
    /// Lowers to a circuit parameter. `pi` is the only named constant; every
    /// other name becomes a free symbol.
    pub fn to_param(&self) -> ParamExpr {
        match self {
            Expr::Float(val) => ParamExpr::Const(*val),
            Expr::Var(name) if name == "pi" => ParamExpr::Const(std::f64::consts::PI),
            Expr::Var(name) => ParamExpr::Symbol(Parameter::new(name.as_str())),
            Expr::Neg(inner) => -inner.to_param(),
            Expr::Add(lhs, rhs) => lhs.to_param() + rhs.to_param(),
            Expr::Sub(lhs, rhs) => lhs.to_param() - rhs.to_param(),
            Expr::Mul(lhs, rhs) => lhs.to_param() * rhs.to_param(),
            Expr::Div(lhs, rhs) => lhs.to_param() / rhs.to_param(),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum ParsedStatement {
    QReg(String, usize),
    CReg(String, usize),
    Gate(String, Vec<Arg>, Vec<Expr>), // Name, Qubits, Params
    Measure(Arg, Arg),                 // Qubit -> Cbit
    Include(String),                   // Filename
}
