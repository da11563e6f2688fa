//! End-to-end repair lifecycles: validate each step, then commit it.

use repair_workflow::core::RepairState;
use repair_workflow::enforcement::{PreflightBuilder, TransitionRequest};
use repair_workflow::executor::{
    InMemoryRepairStore, RepairRecord, RepairStore, ShopEnv, TransitionCommand,
    TransitionExecutor,
};
use repair_workflow::milestones::Milestone;
use repair_workflow::validator::{
    allowed_next_states, describe_transition, is_terminal_state, is_transition_valid,
};
use repair_workflow::WriteMode;
use std::sync::Arc;
use stillwater::effect::Effect;
use stillwater::prelude::*;

fn assert_path_valid(path: &[&str]) {
    for pair in path.windows(2) {
        assert!(
            is_transition_valid(pair[0], pair[1]),
            "{} -> {} should be valid",
            pair[0],
            pair[1]
        );
    }
}

#[test]
fn repair_with_parts_wait_is_valid() {
    assert_path_valid(&[
        "Recibido",
        "Revisado",
        "Presupuestado",
        "Aceptado",
        "Repuestos",
        "Aceptado",
        "Reparado",
        "Cobrado",
    ]);
}

#[test]
fn cancel_while_waiting_for_parts() {
    assert_path_valid(&["Aceptado", "Repuestos", "Cancelado"]);
    assert!(is_terminal_state("Cancelado"));
    assert!(allowed_next_states("Cancelado").is_empty());
}

#[test]
fn rejected_shortcut_leaves_graph_untouched() {
    let before: Vec<RepairState> = allowed_next_states("Repuestos").to_vec();

    for _ in 0..3 {
        assert!(!is_transition_valid("Repuestos", "Reparado"));
    }

    assert_eq!(allowed_next_states("Repuestos"), before.as_slice());
    assert!(is_transition_valid("Repuestos", "Aceptado"));
}

#[test]
fn parts_cycle_messages() {
    assert!(describe_transition("Aceptado", "Repuestos").contains("pausada esperando repuestos"));
    assert!(describe_transition("Repuestos", "Aceptado").contains("se retoma la reparación"));
}

#[test]
fn every_non_terminal_current_state_can_move() {
    for state in RepairState::CURRENT {
        if RepairState::TERMINAL.contains(&state) {
            continue;
        }
        assert!(
            !allowed_next_states(state.as_str()).is_empty(),
            "{state} is a dead end"
        );
    }
}

#[tokio::test]
async fn full_lifecycle_commits_and_stamps_milestones() {
    let store = InMemoryRepairStore::new();
    let record = RepairRecord::new();
    store.save(&record).unwrap();
    let env = ShopEnv::new(Arc::new(store.clone()));
    let executor = TransitionExecutor::new(WriteMode::CompareAndSwap);
    let preflight = PreflightBuilder::standard().build();

    let steps = [
        (RepairState::Respondido, None),
        (RepairState::Transito, None),
        (RepairState::Recibido, None),
        (RepairState::Revisado, None),
        (RepairState::Presupuestado, None),
        (RepairState::Aceptado, None),
        (RepairState::Repuestos, Some("Esperando placa controladora")),
        (RepairState::Aceptado, None),
        (RepairState::Reparado, None),
        (RepairState::Cobrado, None),
        (RepairState::Enviado, None),
        (RepairState::Finalizado, None),
    ];

    for (target, observations) in steps {
        let current = store.load(&record.id).unwrap();

        let mut request = TransitionRequest::new(current.estado_rep.clone(), target.as_str());
        if let Some(text) = observations {
            request = request.with_observations(text);
        }
        assert!(preflight.check(&request).is_success(), "{target}");

        let mut command = TransitionCommand::to(target);
        if let Some(text) = observations {
            command = command.observations(text);
        }
        executor.commit(&current, command).run(&env).await.unwrap();
    }

    let finished = store.load(&record.id).unwrap();
    assert_eq!(finished.state(), Some(RepairState::Finalizado));
    assert!(is_terminal_state(&finished.estado_rep));
    assert_eq!(finished.historial.transitions().len(), 12);
    for milestone in [
        Milestone::Consulta,
        Milestone::Recibido,
        Milestone::Presupuestado,
        Milestone::Aceptado,
        Milestone::Reparado,
        Milestone::Cobrado,
        Milestone::Entregado,
        Milestone::Cerrado,
    ] {
        assert!(finished.milestones.get(milestone).is_some(), "{milestone:?}");
    }

    let accepted = finished.historial.transitions()[5].timestamp;
    assert_eq!(finished.milestones.fecha_aceptado, Some(accepted));
}

#[tokio::test]
async fn legacy_record_migrates_to_default_target() {
    let store = InMemoryRepairStore::new();
    let record = RepairRecord::with_state("old-17", "Venta");
    store.save(&record).unwrap();
    let env = ShopEnv::new(Arc::new(store.clone()));

    let target = repair_workflow::REPAIR_GRAPH
        .migration_target(RepairState::Venta)
        .unwrap();
    assert!(is_transition_valid("Venta", target.as_str()));

    let committed = TransitionExecutor::default()
        .commit(&record, TransitionCommand::to(target))
        .run(&env)
        .await
        .unwrap();

    assert_eq!(committed.to, RepairState::Cobrado);
    assert_eq!(
        committed.record.historial.get_path(),
        vec![&RepairState::Venta, &RepairState::Cobrado]
    );
}
