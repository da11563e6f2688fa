//! Repair Lifecycle
//!
//! Walks one drone repair from consultation to a closed ticket, including a
//! pause waiting for parts, and shows a legacy record being migrated.
//!
//! Key concepts:
//! - Validate with the pure validator, then commit with the executor
//! - Observations required for Repuestos
//! - Milestone dates stamped once
//! - Unknown states degrade to empty answers with a warning
//!
//! Run with: RUST_LOG=debug cargo run --example repair_lifecycle

use repair_workflow::core::RepairState;
use repair_workflow::enforcement::{PreflightBuilder, TransitionRequest};
use repair_workflow::executor::{
    ExecutorError, InMemoryRepairStore, RepairRecord, RepairStore, ShopEnv, TransitionCommand,
    TransitionExecutor,
};
use repair_workflow::milestones::Milestones;
use repair_workflow::progress::StatusControls;
use repair_workflow::validator::{describe_transition, is_transition_valid};
use repair_workflow::{WorkflowConfig, REPAIR_GRAPH};
use std::sync::Arc;
use stillwater::effect::Effect;
use stillwater::prelude::*;
use tracing_subscriber::{fmt, EnvFilter};

#[tokio::main]
async fn main() -> Result<(), ExecutorError> {
    fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    println!("=== Repair Lifecycle ===\n");

    let config = WorkflowConfig::from_toml_str(r#"write_mode = "compare_and_swap""#)
        .unwrap_or_default();
    let executor = TransitionExecutor::from_config(&config);
    let preflight = PreflightBuilder::standard().build();

    let store = InMemoryRepairStore::new();
    let env = ShopEnv::new(Arc::new(store.clone()));

    let record = RepairRecord::new();
    store.save(&record)?;
    println!("New repair {} in {}", record.id, record.estado_rep);

    let plan = [
        (RepairState::Respondido, None),
        (RepairState::Transito, None),
        (RepairState::Recibido, None),
        (RepairState::Revisado, None),
        (RepairState::Presupuestado, None),
        (RepairState::Aceptado, None),
        (RepairState::Repuestos, Some("Esperando motor M3 del proveedor")),
        (RepairState::Aceptado, None),
        (RepairState::Reparado, None),
        (RepairState::Cobrado, None),
        (RepairState::Finalizado, None),
    ];

    for (target, observations) in plan {
        let current = store.load(&record.id)?;

        let mut request = TransitionRequest::new(current.estado_rep.clone(), target.as_str());
        if let Some(text) = observations {
            request = request.with_observations(text);
        }
        if preflight.check(&request).is_failure() {
            println!("  blocked: {} -> {}", current.estado_rep, target);
            continue;
        }

        println!("  {}", describe_transition(&current.estado_rep, target.as_str()));

        let mut command = TransitionCommand::to(target);
        if let Some(text) = observations {
            command = command.observations(text);
        }
        let committed = executor.commit(&current, command).run(&env).await?;
        let controls = StatusControls::for_state(
            committed.to.as_str(),
            &committed.record.milestones,
            false,
        );
        println!(
            "    now {} ({}%), stamped {:?}",
            committed.to,
            controls.progress.unwrap_or(0),
            committed.stamped
        );
    }

    println!("\n=== Invalid shortcut ===");
    println!(
        "Repuestos -> Reparado allowed? {}",
        is_transition_valid("Repuestos", "Reparado")
    );

    println!("\n=== Legacy migration ===");
    let legacy = RepairRecord::with_state("old-2019-044", "Liquidación");
    store.save(&legacy)?;
    if let Some(target) = REPAIR_GRAPH.migration_target(RepairState::Liquidacion) {
        let committed = executor
            .commit(&legacy, TransitionCommand::to(target).observations("Migración"))
            .run(&env)
            .await?;
        println!("{} -> {}", committed.from, committed.to);
    }

    println!("\n=== Unknown state ===");
    let controls = StatusControls::for_state("Perdido", &Milestones::default(), true);
    println!("Options for 'Perdido': {:?}", controls.options);

    Ok(())
}
