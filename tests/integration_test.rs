use qaoa_swap::backend::Backend;
use qaoa_swap::ir::Operation;
use qaoa_swap::parser::parse_qasm;
use qaoa_swap::qaoa::{assemble, Diagnostic, Layout};
use qaoa_swap::transpiler::{
    ApplyLayout, BasisTranslator, InverseCancellation, Pass, PassContext, PassManager, QaoaPass,
    Stage, StagedPassManager,
};

const ROUTED_LINE: &str = r#"
    OPENQASM 2.0;
    qreg q[4];
    rzz(2*γ) q[0], q[1];
    rzz(2*γ) q[2], q[3];
    swap q[0], q[1];
    swap q[2], q[3];
    rzz(2*γ) q[1], q[2];
"#;

fn staged(num_layers: usize, backend: &Backend, path: Vec<usize>) -> StagedPassManager {
    StagedPassManager::new()
        .stage(
            Stage::Layered,
            PassManager::new().with_pass(QaoaPass::new(num_layers, 4)),
        )
        .and_then(|pm| {
            pm.stage(
                Stage::BasisTranslated,
                PassManager::new().with_pass(BasisTranslator::from_backend(backend)),
            )
        })
        .and_then(|pm| {
            pm.stage(
                Stage::LaidOut,
                PassManager::new().with_pass(ApplyLayout::new(backend.clone(), path)),
            )
        })
        .and_then(|pm| {
            pm.stage(
                Stage::Optimized,
                PassManager::new().with_pass(InverseCancellation),
            )
        })
        .expect("stages registered in order")
}

#[test]
fn test_standalone_assembly_from_qasm() {
    let mut cost = parse_qasm(ROUTED_LINE).expect("Failed to parse cost layer");
    cost.routed_order = Some(vec![1, 0, 3, 2]);

    let ansatz = assemble(4, 3, &cost).unwrap();
    let map = ansatz.measurement_map();
    assert_eq!(map.cbit(0), 1);
    assert_eq!(map.cbit(1), 0);
    assert_eq!(map.cbit(2), 3);
    assert_eq!(map.cbit(3), 2);
}

#[test]
fn test_staged_pipeline_runs_every_stage() {
    let backend = Backend::linear("line7", 7);
    let cost = parse_qasm(ROUTED_LINE).unwrap();
    let context = PassContext::with_layout(Layout::new(vec![1, 0, 3, 2]));

    let out = staged(3, &backend, vec![2, 3, 4, 5])
        .run(&cost, &context)
        .unwrap();
    assert_eq!(out.stage, Stage::Optimized);
    assert_eq!(out.circuit.num_qubits, 7);
    assert_eq!(out.circuit.num_cbits, 4);

    for op in &out.circuit.operations {
        if let Operation::Gate { name, .. } = op {
            assert!(backend.basis_gates.contains(name.name()), "{:?}", name);
        }
    }

    let measures: Vec<(usize, usize)> = out
        .circuit
        .operations
        .iter()
        .filter_map(|op| match op {
            Operation::Measure { qubit, cbit } => Some((*qubit, *cbit)),
            _ => None,
        })
        .collect();
    assert_eq!(measures, vec![(2, 1), (3, 0), (4, 3), (5, 2)]);
}

#[test]
fn test_staged_pipeline_rejects_bad_path() {
    let backend = Backend::linear("line7", 7);
    let cost = parse_qasm(ROUTED_LINE).unwrap();
    let err = staged(2, &backend, vec![0, 2, 4, 6])
        .run(&cost, &PassContext::new())
        .unwrap_err();
    assert!(matches!(
        err,
        qaoa_swap::QaoaError::CouplingViolation { .. }
    ));
}

#[test]
fn test_layered_stage_without_layout_uses_trivial_measurement() {
    let cost = parse_qasm(ROUTED_LINE).unwrap();
    let pass = QaoaPass::new(1, 4);

    let ansatz = pass.build_ansatz(&cost, &PassContext::new()).unwrap();
    assert_eq!(ansatz.diagnostics(), &[Diagnostic::LayoutMissing]);
    assert!(ansatz.measurement_map().is_identity());

    let circuit = pass.run(&cost, &PassContext::new()).unwrap();
    assert_eq!(&circuit, ansatz.circuit());
    assert!(matches!(
        circuit.operations.last(),
        Some(Operation::Measure { qubit: 3, cbit: 3 })
    ));
}
