//! OpenQASM 2.0 reader for routed cost layers.
//!
//! Gate parameters may be arithmetic over numbers, `pi` and free names; each
//! free name becomes a circuit [`Parameter`](crate::ir::Parameter).

pub mod ast;
pub mod rules;

use self::ast::{Arg, ParsedStatement};
use self::rules::{comment, creg, gate_call, include, measure, openqasm_version, qreg};
use crate::error::{QaoaError, Result};
use crate::ir::{Circuit, GateType, Operation, ParamExpr};
use nom::{branch::alt, character::complete::multispace0};
use std::collections::HashMap;
use std::f64::consts::FRAC_PI_2;

fn parse_error(msg: impl Into<String>) -> QaoaError {
    QaoaError::Parse(msg.into())
}

// --- Resolution & Mapping ---

/// Maps a gate name and its parameters, folding the `u2` alias into `u`.
fn map_gate(name: &str, mut params: Vec<ParamExpr>) -> (GateType, Vec<ParamExpr>) {
    if name == "u2" {
        params.insert(0, ParamExpr::Const(FRAC_PI_2));
        return (GateType::U, params);
    }
    (GateType::from_name(name), params)
}

fn resolve_argument(arg: &Arg, regs: &HashMap<String, (usize, usize)>) -> Result<Vec<usize>> {
    let (name, idx) = arg;
    let &(start, size) = regs
        .get(name)
        .ok_or_else(|| parse_error(format!("Undefined register: {}", name)))?;
    match idx {
        Some(i) if *i < size => Ok(vec![start + i]),
        Some(i) => Err(parse_error(format!(
            "Index out of bounds: {}[{}]",
            name, i
        ))),
        // Broadcasting: return all bits in register
        None => Ok((0..size).map(|i| start + i).collect()),
    }
}

#[derive(Default)]
struct ParseContext {
    qregs: HashMap<String, (usize, usize)>,
    cregs: HashMap<String, (usize, usize)>,
    total_qubits: usize,
    total_cbits: usize,
}

fn skip_trivia(mut input: &str) -> Result<&str> {
    loop {
        let (rem, _) = multispace0::<&str, nom::error::Error<&str>>(input)
            .map_err(|e| parse_error(e.to_string()))?;
        input = rem;
        match comment(input) {
            Ok((rem, _)) => input = rem,
            Err(_) => return Ok(input),
        }
    }
}

/// Parses an OpenQASM 2.0 program into a [`Circuit`].
///
/// `include "qelib1.inc";` is accepted and ignored; other includes, gate
/// definitions and conditionals are rejected.
pub fn parse_qasm(input: &str) -> Result<Circuit> {
    let mut circuit = Circuit::new(0, 0);
    let mut ctx = ParseContext::default();

    // 1. Skip initial comments/whitespace and parse Header
    let mut current_input = skip_trivia(input)?;
    if current_input.is_empty() {
        return Err(parse_error("Empty file or missing OPENQASM header"));
    }

    let (rem, version) = openqasm_version(current_input).map_err(|_| {
        parse_error("Missing or invalid OPENQASM header. File must start with 'OPENQASM 2.0;'")
    })?;

    if version != "2.0" {
        return Err(parse_error(format!(
            "Unsupported OpenQASM version: '{}'. Only '2.0' is supported.",
            version
        )));
    }
    current_input = rem;

    // 2. Parse remaining statements
    loop {
        current_input = skip_trivia(current_input)?;
        if current_input.is_empty() {
            break;
        }

        let (rem, stmt) = alt((include, qreg, creg, measure, gate_call))(
            current_input,
        )
        .map_err(|_| {
            let line = current_input.lines().next().unwrap_or_default();
            parse_error(format!("Parse error at: {}", line))
        })?;
        current_input = rem;

        apply_statement(&mut circuit, &mut ctx, stmt)?;
    }

    circuit.num_qubits = ctx.total_qubits;
    circuit.num_cbits = ctx.total_cbits;
    Ok(circuit)
}

fn apply_statement(circuit: &mut Circuit, ctx: &mut ParseContext, stmt: ParsedStatement) -> Result<()> {
    match stmt {
        ParsedStatement::Include(filename) => {
            if filename != "qelib1.inc" {
                return Err(parse_error(format!(
                    "Includes are not supported. Please resolve all imports before parsing. Found: 'include \"{}\"'",
                    filename
                )));
            }
        }
        ParsedStatement::QReg(name, size) => {
            ctx.qregs.insert(name, (ctx.total_qubits, size));
            ctx.total_qubits += size;
        }
        ParsedStatement::CReg(name, size) => {
            ctx.cregs.insert(name, (ctx.total_cbits, size));
            ctx.total_cbits += size;
        }
        ParsedStatement::Gate(name, args, exprs) => {
            let params: Vec<ParamExpr> = exprs.iter().map(|e| e.to_param()).collect();
            let (gate, params) = map_gate(&name, params);
            if let GateType::Custom(n) = &gate {
                return Err(parse_error(format!("Unknown gate: {}", n)));
            }
            if gate.num_params() != Some(params.len()) {
                return Err(parse_error(format!(
                    "Gate {} expects {} params, got {}",
                    name,
                    gate.num_params().unwrap_or_default(),
                    params.len()
                )));
            }
            if gate.num_qubits() != Some(args.len()) {
                return Err(parse_error(format!(
                    "Gate {} expects {} qubits, got {}",
                    name,
                    gate.num_qubits().unwrap_or_default(),
                    args.len()
                )));
            }

            let mut args_indices = Vec::with_capacity(args.len());
            let mut max_len = 1;
            for arg in &args {
                let indices = resolve_argument(arg, &ctx.qregs)?;
                max_len = max_len.max(indices.len());
                args_indices.push(indices);
            }

            // Validate broadcasting
            if args_indices
                .iter()
                .any(|indices| indices.len() != 1 && indices.len() != max_len)
            {
                return Err(parse_error("Register size mismatch in gate call"));
            }

            for i in 0..max_len {
                let qubits = args_indices
                    .iter()
                    .map(|indices| if indices.len() == 1 { indices[0] } else { indices[i] })
                    .collect();
                circuit.add_op(Operation::gate(gate.clone(), qubits, params.clone()));
            }
        }
        ParsedStatement::Measure(q_arg, c_arg) => {
            let q_indices = resolve_argument(&q_arg, &ctx.qregs)?;
            let c_indices = resolve_argument(&c_arg, &ctx.cregs)?;
            if q_indices.len() != c_indices.len() {
                return Err(parse_error("Measure register size mismatch"));
            }
            for (&qubit, &cbit) in q_indices.iter().zip(c_indices.iter()) {
                circuit.add_op(Operation::Measure { qubit, cbit });
            }
        }
    }
    Ok(())
}
