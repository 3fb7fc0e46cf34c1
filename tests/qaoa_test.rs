use qaoa_swap::ir::{Circuit, GateType, Operation, Parameter};
use qaoa_swap::qaoa::{
    assemble, build_layers, cost_layer_from_edges, default_mixer, derive_permutation,
    AnsatzBuilder, Diagnostic, ParametricLayer, PermutationMode, PermutationSource, QaoaConfig,
};
use qaoa_swap::QaoaError;

/// Cost layer on a line of four qubits with one swap layer, as a line swap
/// strategy would emit it.
fn swapped_line_layer() -> Circuit {
    let gamma = Parameter::new("γ");
    let mut layer = Circuit::new(4, 0);
    layer.rzz(&gamma, 0, 1);
    layer.rzz(&gamma, 2, 3);
    layer.swap(1, 2);
    layer.rzz(&gamma, 0, 1);
    layer.rzz(&gamma, 2, 3);
    layer
}

fn measurements(circuit: &Circuit) -> Vec<(usize, usize)> {
    circuit
        .operations
        .iter()
        .filter_map(|op| match op {
            Operation::Measure { qubit, cbit } => Some((*qubit, *cbit)),
            _ => None,
        })
        .collect()
}

#[test]
fn test_sequence_length() {
    let cost = swapped_line_layer();
    for num_layers in 0..5 {
        let ansatz = assemble(4, num_layers, &cost).unwrap();
        let expected = 4 + num_layers * (cost.operations.len() + 4) + 4;
        assert_eq!(ansatz.circuit().operations.len(), expected);
    }
}

#[test]
fn test_cost_parity_and_mixer_order() {
    let cost = ParametricLayer::new(swapped_line_layer()).unwrap();
    let mixer = default_mixer(4).unwrap();
    let layers = build_layers(&cost, &mixer, 4, 4).unwrap();
    let ops = &layers.circuit.operations;
    let (c, m) = (cost.len(), mixer.len());

    for layer in 0..4 {
        let start = layer * (c + m);
        let bound = cost.bind(&layers.gammas[layer]);
        let expected = if layer % 2 == 0 {
            bound
        } else {
            bound.reverse_ops()
        };
        assert_eq!(&ops[start..start + c], expected.operations.as_slice());

        let mixer_ops = mixer.bind(&layers.betas[layer]);
        assert_eq!(
            &ops[start + c..start + c + m],
            mixer_ops.operations.as_slice()
        );
    }
}

#[test]
fn test_layer_parameters_are_distinct() {
    let ansatz = assemble(4, 5, &swapped_line_layer()).unwrap();
    let (gammas, betas) = (ansatz.gammas(), ansatz.betas());
    for i in 0..5 {
        for j in 0..5 {
            if i != j {
                assert_ne!(gammas[i], gammas[j]);
                assert_ne!(betas[i], betas[j]);
            }
        }
    }
    assert_eq!(ansatz.circuit().parameters().len(), 10);
}

#[test]
fn test_even_layers_measure_identity() {
    let mut cost = swapped_line_layer();
    cost.routed_order = Some(vec![3, 2, 1, 0]);
    for num_qubits in [4, 5, 7] {
        for num_layers in [0, 2, 4] {
            let ansatz = assemble(num_qubits, num_layers, &cost).unwrap();
            assert!(ansatz.measurement_map().is_identity());
            let expected: Vec<(usize, usize)> = (0..num_qubits).map(|i| (i, i)).collect();
            assert_eq!(measurements(ansatz.circuit()), expected);
        }
    }
}

#[test]
fn test_odd_layers_recover_logical_order() {
    let cost = swapped_line_layer();
    let (permutation, _) = derive_permutation(&cost, 4, PermutationSource::Routing).unwrap();
    assert!(!permutation.is_identity());

    for num_layers in [1, 3, 5] {
        let ansatz = assemble(4, num_layers, &cost).unwrap();
        let map = ansatz.measurement_map();
        for wire in 0..4 {
            assert_eq!(map.cbit(wire), permutation.logical(wire));
        }
        for logical in 0..4 {
            assert_eq!(map.cbit(permutation.wire(logical)), logical);
        }
    }
}

#[test]
fn test_swaps_undo_across_reversed_layers() {
    let cost = swapped_line_layer();
    let ansatz = assemble(4, 2, &cost).unwrap();
    let (net, _) =
        derive_permutation(ansatz.circuit(), 4, PermutationSource::Routing).unwrap();
    assert!(net.is_identity());
}

#[test]
fn test_four_qubits_one_layer_identity_routing() {
    let cost = cost_layer_from_edges(4, &[(0, 1, 1.0), (1, 2, 1.0), (2, 3, 1.0)]).unwrap();
    let ansatz = assemble(4, 1, &cost).unwrap();
    assert!(ansatz.measurement_map().is_identity());
}

#[test]
fn test_four_qubits_two_layers_ignores_routing() {
    let mut cost = swapped_line_layer();
    cost.routed_order = Some(vec![1, 0, 3, 2]);
    let ansatz = assemble(4, 2, &cost).unwrap();
    assert!(ansatz.measurement_map().is_identity());
}

#[test]
fn test_missing_layout_three_qubits() {
    let cost = cost_layer_from_edges(3, &[(0, 1, 1.0), (1, 2, 1.0)]).unwrap();
    let config = QaoaConfig::new(3, 1).with_permutation_mode(PermutationMode::Layout);
    let ansatz = AnsatzBuilder::new(config).build(&cost, None).unwrap();

    assert_eq!(ansatz.diagnostics(), &[Diagnostic::LayoutMissing]);
    assert!(ansatz.measurement_map().is_identity());
    assert_eq!(measurements(ansatz.circuit()), vec![(0, 0), (1, 1), (2, 2)]);
}

#[test]
fn test_two_parameter_cost_layer_rejected() {
    let mut cost = Circuit::new(2, 0);
    cost.rzz(Parameter::new("a"), 0, 1);
    cost.rx(Parameter::new("b"), 0);

    let err = assemble(2, 1, &cost).unwrap_err();
    assert_eq!(err, QaoaError::UnboundParameterCount { found: 2 });
}

#[test]
fn test_empty_register_rejected() {
    let cost = cost_layer_from_edges(2, &[(0, 1, 1.0)]).unwrap();
    assert_eq!(assemble(0, 1, &cost).unwrap_err(), QaoaError::EmptyRegister);
}

#[test]
fn test_zero_layers() {
    let cost = cost_layer_from_edges(3, &[(0, 1, 1.0)]).unwrap();
    let ansatz = assemble(3, 0, &cost).unwrap();
    // initial state and measurements only
    assert_eq!(ansatz.circuit().operations.len(), 6);
    assert!(ansatz.gammas().is_empty());
}

#[test]
fn test_malformed_swap_in_cost_layer() {
    let mut cost = Circuit::new(2, 0);
    cost.rzz(Parameter::new("γ"), 0, 1);
    cost.gate(GateType::SWAP, &[0], vec![]);

    let expected = QaoaError::GateArity {
        gate: "swap".to_string(),
        expected: 2,
        actual: 1,
    };
    assert_eq!(cost.validate().unwrap_err(), expected);
    assert_eq!(assemble(2, 1, &cost).unwrap_err(), expected);
    assert_eq!(ParametricLayer::new(cost).unwrap_err(), expected);
}
