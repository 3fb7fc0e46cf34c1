use crate::error::{QaoaError, Result};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fmt;
use std::ops::{Add, Div, Index, Mul, Neg, Sub};

/// A named symbolic placeholder for a gate angle.
///
/// Two parameters are the same symbol exactly when their names match.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct Parameter {
    name: String,
}

impl Parameter {
    pub fn new(name: impl Into<String>) -> Self {
        Self { name: name.into() }
    }

    pub fn name(&self) -> &str {
        &self.name
    }
}

impl fmt::Display for Parameter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.name)
    }
}

/// An ordered collection of distinct parameters sharing a base name.
///
/// Element `i` of a vector named `γ` is the parameter `γ[i]`.
///
/// # Examples
///
/// ```
/// use qaoa_swap::ir::ParameterVector;
/// let gammas = ParameterVector::new("γ", 2);
/// assert_eq!(gammas[1].name(), "γ[1]");
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ParameterVector {
    name: String,
    params: Vec<Parameter>,
}

impl ParameterVector {
    pub fn new(name: impl Into<String>, len: usize) -> Self {
        let name = name.into();
        let params = (0..len)
            .map(|i| Parameter::new(format!("{}[{}]", name, i)))
            .collect();
        Self { name, params }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn len(&self) -> usize {
        self.params.len()
    }

    pub fn is_empty(&self) -> bool {
        self.params.is_empty()
    }

    pub fn get(&self, index: usize) -> Option<&Parameter> {
        self.params.get(index)
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Parameter> {
        self.params.iter()
    }

    /// Pairs every element with a value, for numeric binding.
    pub fn zip_values(&self, values: &[f64]) -> Result<HashMap<Parameter, f64>> {
        if values.len() != self.params.len() {
            return Err(QaoaError::ParameterLength {
                name: self.name.clone(),
                expected: self.params.len(),
                actual: values.len(),
            });
        }
        Ok(self.params.iter().cloned().zip(values.iter().copied()).collect())
    }
}

impl Index<usize> for ParameterVector {
    type Output = Parameter;

    fn index(&self, index: usize) -> &Parameter {
        &self.params[index]
    }
}

/// A gate angle: a constant, a symbol, or arithmetic over both.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum ParamExpr {
    Const(f64),
    Symbol(Parameter),
    Neg(Box<ParamExpr>),
    Add(Box<ParamExpr>, Box<ParamExpr>),
    Sub(Box<ParamExpr>, Box<ParamExpr>),
    Mul(Box<ParamExpr>, Box<ParamExpr>),
    Div(Box<ParamExpr>, Box<ParamExpr>),
}

impl ParamExpr {
    /// Free symbols in order of first appearance.
    pub fn parameters(&self) -> Vec<Parameter> {
        let mut out = Vec::new();
        self.collect_parameters(&mut out);
        out
    }

    pub(crate) fn collect_parameters(&self, out: &mut Vec<Parameter>) {
        match self {
            ParamExpr::Const(_) => {}
            ParamExpr::Symbol(p) => {
                if !out.contains(p) {
                    out.push(p.clone());
                }
            }
            ParamExpr::Neg(inner) => inner.collect_parameters(out),
            ParamExpr::Add(lhs, rhs)
            | ParamExpr::Sub(lhs, rhs)
            | ParamExpr::Mul(lhs, rhs)
            | ParamExpr::Div(lhs, rhs) => {
                lhs.collect_parameters(out);
                rhs.collect_parameters(out);
            }
        }
    }

    pub fn is_parameterized(&self) -> bool {
        match self {
            ParamExpr::Const(_) => false,
            ParamExpr::Symbol(_) => true,
            ParamExpr::Neg(inner) => inner.is_parameterized(),
            ParamExpr::Add(lhs, rhs)
            | ParamExpr::Sub(lhs, rhs)
            | ParamExpr::Mul(lhs, rhs)
            | ParamExpr::Div(lhs, rhs) => lhs.is_parameterized() || rhs.is_parameterized(),
        }
    }

    /// Replaces every mapped symbol, leaving `self` untouched.
    pub fn substitute(&self, bindings: &HashMap<Parameter, ParamExpr>) -> ParamExpr {
        match self {
            ParamExpr::Const(v) => ParamExpr::Const(*v),
            ParamExpr::Symbol(p) => bindings
                .get(p)
                .cloned()
                .unwrap_or_else(|| ParamExpr::Symbol(p.clone())),
            ParamExpr::Neg(inner) => ParamExpr::Neg(Box::new(inner.substitute(bindings))),
            ParamExpr::Add(lhs, rhs) => ParamExpr::Add(
                Box::new(lhs.substitute(bindings)),
                Box::new(rhs.substitute(bindings)),
            ),
            ParamExpr::Sub(lhs, rhs) => ParamExpr::Sub(
                Box::new(lhs.substitute(bindings)),
                Box::new(rhs.substitute(bindings)),
            ),
            ParamExpr::Mul(lhs, rhs) => ParamExpr::Mul(
                Box::new(lhs.substitute(bindings)),
                Box::new(rhs.substitute(bindings)),
            ),
            ParamExpr::Div(lhs, rhs) => ParamExpr::Div(
                Box::new(lhs.substitute(bindings)),
                Box::new(rhs.substitute(bindings)),
            ),
        }
    }

    pub fn evaluate(&self, values: &HashMap<Parameter, f64>) -> Result<f64> {
        match self {
            ParamExpr::Const(v) => Ok(*v),
            ParamExpr::Symbol(p) => values
                .get(p)
                .copied()
                .ok_or_else(|| QaoaError::UnboundSymbol(p.name().to_string())),
            ParamExpr::Neg(inner) => Ok(-inner.evaluate(values)?),
            ParamExpr::Add(lhs, rhs) => Ok(lhs.evaluate(values)? + rhs.evaluate(values)?),
            ParamExpr::Sub(lhs, rhs) => Ok(lhs.evaluate(values)? - rhs.evaluate(values)?),
            ParamExpr::Mul(lhs, rhs) => Ok(lhs.evaluate(values)? * rhs.evaluate(values)?),
            ParamExpr::Div(lhs, rhs) => Ok(lhs.evaluate(values)? / rhs.evaluate(values)?),
        }
    }

    /// Numeric value if the expression holds no symbols.
    pub fn as_f64(&self) -> Option<f64> {
        self.evaluate(&HashMap::new()).ok()
    }
}

impl From<f64> for ParamExpr {
    fn from(value: f64) -> Self {
        ParamExpr::Const(value)
    }
}

impl From<Parameter> for ParamExpr {
    fn from(param: Parameter) -> Self {
        ParamExpr::Symbol(param)
    }
}

impl From<&Parameter> for ParamExpr {
    fn from(param: &Parameter) -> Self {
        ParamExpr::Symbol(param.clone())
    }
}

impl Neg for ParamExpr {
    type Output = ParamExpr;

    fn neg(self) -> ParamExpr {
        ParamExpr::Neg(Box::new(self))
    }
}

macro_rules! binary_op {
    ($trait:ident, $method:ident, $variant:ident) => {
        impl $trait for ParamExpr {
            type Output = ParamExpr;

            fn $method(self, rhs: ParamExpr) -> ParamExpr {
                ParamExpr::$variant(Box::new(self), Box::new(rhs))
            }
        }
    };
}

binary_op!(Add, add, Add);
binary_op!(Sub, sub, Sub);
binary_op!(Mul, mul, Mul);
binary_op!(Div, div, Div);

impl fmt::Display for ParamExpr {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ParamExpr::Const(v) => write!(f, "{}", v),
            ParamExpr::Symbol(p) => write!(f, "{}", p),
            ParamExpr::Neg(inner) => write!(f, "-({})", inner),
            ParamExpr::Add(lhs, rhs) => write!(f, "({} + {})", lhs, rhs),
            ParamExpr::Sub(lhs, rhs) => write!(f, "({} - {})", lhs, rhs),
            ParamExpr::Mul(lhs, rhs) => write!(f, "{}*{}", lhs, rhs),
            ParamExpr::Div(lhs, rhs) => write!(f, "{}/{}", lhs, rhs),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_vector_elements_are_distinct() {
        let gammas = ParameterVector::new("γ", 3);
        assert_eq!(gammas.len(), 3);
        assert_ne!(gammas[0], gammas[1]);
        assert_ne!(gammas[1], gammas[2]);
        assert_eq!(gammas[2].name(), "γ[2]");
    }

    #[test]
    fn test_substitute_is_non_destructive() {
        let p = Parameter::new("p");
        let expr = ParamExpr::from(-2.0) * ParamExpr::from(&p);
        let beta = Parameter::new("β[0]");

        let mut bindings = HashMap::new();
        bindings.insert(p.clone(), ParamExpr::from(&beta));
        let bound = expr.substitute(&bindings);

        assert_eq!(expr.parameters(), vec![p]);
        assert_eq!(bound.parameters(), vec![beta]);
    }

    #[test]
    fn test_evaluate() {
        let g = Parameter::new("g");
        let expr = ParamExpr::from(2.0) * ParamExpr::from(&g) + ParamExpr::from(1.0);
        let mut values = HashMap::new();
        values.insert(g, 0.25);
        assert_eq!(expr.evaluate(&values), Ok(1.5));
    }

    #[test]
    fn test_evaluate_unbound_symbol() {
        let expr = ParamExpr::from(Parameter::new("theta"));
        assert_eq!(
            expr.evaluate(&HashMap::new()),
            Err(QaoaError::UnboundSymbol("theta".to_string()))
        );
        assert!(expr.as_f64().is_none());
    }

    #[test]
    fn test_parameters_are_deduplicated() {
        let g = Parameter::new("g");
        let expr = ParamExpr::from(&g) * ParamExpr::from(&g);
        assert_eq!(expr.parameters().len(), 1);
        assert!(expr.is_parameterized());
        assert!(!ParamExpr::from(1.0).is_parameterized());
    }

    #[test]
    fn test_zip_values_length_mismatch() {
        let betas = ParameterVector::new("β", 2);
        let err = betas.zip_values(&[0.1]).unwrap_err();
        assert!(matches!(err, QaoaError::ParameterLength { expected: 2, actual: 1, .. }));
    }
}
