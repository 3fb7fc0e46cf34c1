//! Translation of circuits into a backend's native gate set.

use super::pass::{Pass, PassContext};
use crate::backend::Backend;
use crate::error::{QaoaError, Result};
use crate::ir::{Circuit, GateType, Operation, ParamExpr};
use std::collections::HashSet;
use std::f64::consts::{FRAC_PI_2, FRAC_PI_4, PI};

const MAX_DEPTH: usize = 8;

/// Rewrites every gate outside the basis in terms of simpler gates, until
/// only basis gates remain.
///
/// The rules are exact up to global phase and bottom out in
/// `{rz, sx, x, cx}`.
#[derive(Debug, Clone)]
pub struct BasisTranslator {
    basis: HashSet<String>,
}

impl BasisTranslator {
    pub fn new<'a>(basis: impl IntoIterator<Item = &'a str>) -> Self {
        Self {
            basis: basis.into_iter().map(str::to_string).collect(),
        }
    }

    pub fn from_backend(backend: &Backend) -> Self {
        Self {
            basis: backend.basis_gates.clone(),
        }
    }

    fn translate(&self, op: &Operation, depth: usize, out: &mut Vec<Operation>) -> Result<()> {
        let Operation::Gate {
            name,
            qubits,
            params,
        } = op
        else {
            out.push(op.clone());
            return Ok(());
        };
        if self.basis.contains(name.name()) {
            out.push(op.clone());
            return Ok(());
        }
        if depth >= MAX_DEPTH {
            return Err(QaoaError::UnsupportedGate(name.name().to_string()));
        }
        for step in expand(name, qubits, params)? {
            self.translate(&step, depth + 1, out)?;
        }
        Ok(())
    }
}

fn gate(name: GateType, qubits: &[usize], params: Vec<ParamExpr>) -> Operation {
    Operation::gate(name, qubits.to_vec(), params)
}

fn rz(theta: f64, qubit: usize) -> Operation {
    gate(GateType::RZ, &[qubit], vec![ParamExpr::Const(theta)])
}

/// One rewriting step for `name`.
fn expand(name: &GateType, qubits: &[usize], params: &[ParamExpr]) -> Result<Vec<Operation>> {
    let unsupported = || QaoaError::UnsupportedGate(name.name().to_string());
    let angle = |i: usize| params.get(i).cloned().ok_or_else(unsupported);
    let arity = |expected: usize| QaoaError::GateArity {
        gate: name.name().to_string(),
        expected,
        actual: qubits.len(),
    };
    let one = || match qubits {
        &[q] => Ok(q),
        _ => Err(arity(1)),
    };
    let two = || match qubits {
        &[a, b] => Ok((a, b)),
        _ => Err(arity(2)),
    };

    let steps = match name {
        GateType::ID => vec![],
        GateType::H => {
            let q = one()?;
            vec![rz(FRAC_PI_2, q), gate(GateType::SX, &[q], vec![]), rz(FRAC_PI_2, q)]
        }
        GateType::Z => vec![rz(PI, one()?)],
        GateType::S => vec![rz(FRAC_PI_2, one()?)],
        GateType::Sdg => vec![rz(-FRAC_PI_2, one()?)],
        GateType::T => vec![rz(FRAC_PI_4, one()?)],
        GateType::Tdg => vec![rz(-FRAC_PI_4, one()?)],
        GateType::X => {
            let q = one()?;
            vec![gate(GateType::H, &[q], vec![]), rz(PI, q), gate(GateType::H, &[q], vec![])]
        }
        GateType::Y => {
            let q = one()?;
            vec![rz(PI, q), gate(GateType::X, &[q], vec![])]
        }
        GateType::SX => {
            let q = one()?;
            vec![
                gate(GateType::H, &[q], vec![]),
                rz(FRAC_PI_2, q),
                gate(GateType::H, &[q], vec![]),
            ]
        }
        GateType::RX => {
            let q = one()?;
            vec![
                gate(GateType::H, &[q], vec![]),
                gate(GateType::RZ, &[q], vec![angle(0)?]),
                gate(GateType::H, &[q], vec![]),
            ]
        }
        GateType::RY => {
            let q = one()?;
            vec![
                rz(-FRAC_PI_2, q),
                gate(GateType::RX, &[q], vec![angle(0)?]),
                rz(FRAC_PI_2, q),
            ]
        }
        GateType::U => {
            let q = one()?;
            vec![
                gate(GateType::RZ, &[q], vec![angle(2)?]),
                gate(GateType::RY, &[q], vec![angle(0)?]),
                gate(GateType::RZ, &[q], vec![angle(1)?]),
            ]
        }
        GateType::RZZ => {
            let (a, b) = two()?;
            vec![
                gate(GateType::CX, &[a, b], vec![]),
                gate(GateType::RZ, &[b], vec![angle(0)?]),
                gate(GateType::CX, &[a, b], vec![]),
            ]
        }
        GateType::SWAP => {
            let (a, b) = two()?;
            vec![
                gate(GateType::CX, &[a, b], vec![]),
                gate(GateType::CX, &[b, a], vec![]),
                gate(GateType::CX, &[a, b], vec![]),
            ]
        }
        GateType::CZ => {
            let (a, b) = two()?;
            vec![
                gate(GateType::H, &[b], vec![]),
                gate(GateType::CX, &[a, b], vec![]),
                gate(GateType::H, &[b], vec![]),
            ]
        }
        GateType::CX => {
            let (a, b) = two()?;
            vec![
                gate(GateType::H, &[b], vec![]),
                gate(GateType::CZ, &[a, b], vec![]),
                gate(GateType::H, &[b], vec![]),
            ]
        }
        GateType::RZ | GateType::CCX | GateType::Custom(_) => return Err(unsupported()),
    };
    Ok(steps)
}

impl Pass for BasisTranslator {
    fn name(&self) -> &str {
        "BasisTranslator"
    }

    fn run(&self, circuit: &Circuit, _context: &PassContext) -> Result<Circuit> {
        let mut operations = Vec::with_capacity(circuit.operations.len());
        for op in &circuit.operations {
            self.translate(op, 0, &mut operations)?;
        }
        Ok(Circuit {
            operations,
            ..circuit.clone()
        })
    }
}
