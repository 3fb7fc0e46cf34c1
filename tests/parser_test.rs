use qaoa_swap::ir::{GateType, Operation, Parameter};
use qaoa_swap::parser::parse_qasm;

#[test]
fn test_routed_cost_layer() {
    let qasm = r#"
        OPENQASM 2.0;
        include "qelib1.inc";
        qreg q[3];

        // first swap layer
        rzz(2.0*γ) q[0], q[1];
        swap q[0], q[1];
        rzz(2.0*γ) q[1], q[2];
    "#;

    let circuit = parse_qasm(qasm).expect("Failed to parse routed cost layer");
    assert_eq!(circuit.num_qubits, 3);
    assert_eq!(circuit.num_cbits, 0);
    assert_eq!(circuit.operations.len(), 3);
    assert_eq!(circuit.parameters(), vec![Parameter::new("γ")]);

    match &circuit.operations[1] {
        Operation::Gate { name, qubits, .. } => {
            assert_eq!(*name, GateType::SWAP);
            assert_eq!(*qubits, vec![0, 1]);
        }
        _ => panic!("Expected SWAP gate"),
    }
}

#[test]
fn test_whitespace_tolerance() {
    let qasm = r#"
        OPENQASM 2.0;

        qreg    q[2]   ;
          creg  c[2];

        h   q[0]  ; // Comment
        
        cx q[0] ,  q[1];
    "#;
    let circuit = parse_qasm(qasm).expect("Failed to parse whitespace");
    assert_eq!(circuit.num_qubits, 2);
    assert_eq!(circuit.operations.len(), 2);
}

#[test]
fn test_undeclared_qubit() {
    let qasm = r#"
        OPENQASM 2.0;
        qreg q[1];
        x q[10]; // Index out of bounds
    "#;
    let err = parse_qasm(qasm).unwrap_err();
    assert!(err.to_string().contains("Index out of bounds"));
}

#[test]
fn test_unknown_register() {
    let qasm = r#"
        OPENQASM 2.0;
        qreg q[1];
        x r[0]; // Unknown register
    "#;
    let err = parse_qasm(qasm).unwrap_err();
    assert!(err.to_string().contains("Undefined register"));
}

#[test]
fn test_missing_semicolon() {
    let qasm = r#"
        OPENQASM 2.0;
        qreg q[1]
        x q[0];
    "#;
    let err = parse_qasm(qasm).unwrap_err();
    assert!(err.to_string().contains("Parse error"));
}

#[test]
fn test_parameter_expressions() {
    let qasm = "OPENQASM 2.0; qreg q[1]; rx(-(pi/2) + 0.5*theta) q[0];";
    let circuit = parse_qasm(qasm).expect("Failed to parse parameter expression");
    assert_eq!(circuit.operations.len(), 1);
    assert_eq!(circuit.parameters(), vec![Parameter::new("theta")]);
}

#[test]
fn test_custom_include_error() {
    let qasm = r#"
        OPENQASM 2.0;
        include "custom.inc";
    "#;
    let err = parse_qasm(qasm).unwrap_err();
    assert!(err.to_string().contains("Includes are not supported"));
}

#[test]
fn test_gate_definitions_rejected() {
    let qasm = r#"
        OPENQASM 2.0;
        gate u1(lambda) q { U(0,0,lambda) q; }
    "#;
    assert!(parse_qasm(qasm).is_err());
}

#[test]
fn test_broadcast_and_measure() {
    let qasm = r#"
        OPENQASM 2.0;
        qreg q[4];
        creg c[4];

        h q;
        measure q -> c;
    "#;

    let circuit = parse_qasm(qasm).expect("Failed to parse broadcast program");
    assert_eq!(circuit.num_qubits, 4);
    assert_eq!(circuit.num_cbits, 4);
    assert_eq!(circuit.operations.len(), 8);
    assert_eq!(
        circuit.operations[5],
        Operation::Measure { qubit: 1, cbit: 1 }
    );
}

#[test]
fn test_barrier_is_not_a_cost_layer_statement() {
    let qasm = "OPENQASM 2.0; qreg q[2]; barrier q;";
    let err = parse_qasm(qasm).unwrap_err();
    assert!(err.to_string().contains("Unknown gate: barrier"));
}

#[test]
fn test_measure_size_mismatch() {
    let qasm = "OPENQASM 2.0; qreg q[2]; creg c[1]; measure q -> c;";
    let err = parse_qasm(qasm).unwrap_err();
    assert!(err.to_string().contains("Measure register size mismatch"));
}
