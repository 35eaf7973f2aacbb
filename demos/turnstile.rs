//! Coin-operated turnstile
//!
//! This example walks a two-state machine through coins and pushes, then
//! rewinds it with undo/redo.
//!
//! Key concepts:
//! - Typed identifiers with `state_enum!` / `event_enum!`
//! - Events that are only valid from some states
//! - Undo/redo, and how a new transition invalidates redo
//!
//! Run with: RUST_LOG=debug cargo run --example turnstile

use tracing_subscriber::EnvFilter;
use turnstile::{event_enum, state_enum, StateMachine, StateMachineBuilder};

state_enum! {
    enum Gate {
        Locked,
        Unlocked,
    }
}

event_enum! {
    enum Input {
        Coin,
        Push,
    }
}

fn print_state(machine: &StateMachine<Gate, Input>) {
    println!(
        "  state: {:<9} history: {:?}",
        machine.current_state().to_string(),
        machine.history()
    );
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    println!("=== Turnstile State Machine ===\n");

    let mut gate: StateMachine<Gate, Input> = StateMachineBuilder::new()
        .initial(Gate::Locked)
        .transition(Gate::Locked, Input::Coin, Gate::Unlocked)
        .transition(Gate::Locked, Input::Push, Gate::Locked)
        .transition(Gate::Unlocked, Input::Push, Gate::Locked)
        .transition(Gate::Unlocked, Input::Coin, Gate::Unlocked)
        .build()?;
    print_state(&gate);

    println!("\nNothing to undo at the initial state:");
    println!("  undo -> {}", gate.undo());

    println!("\nPay, walk through, then pay again:");
    gate.trigger(&Input::Coin)?
        .trigger(&Input::Push)?
        .trigger(&Input::Coin)?;
    print_state(&gate);

    println!("\nStates that accept a coin: {:?}", gate.states_with_event(&Input::Coin));

    println!("\nUndo the second coin:");
    println!("  undo -> {}", gate.undo());
    print_state(&gate);

    println!("\nRedo it:");
    println!("  redo -> {}", gate.redo());
    print_state(&gate);

    println!("\nUndo, then push the locked gate instead:");
    println!("  undo -> {}", gate.undo());
    gate.trigger(&Input::Push)?;
    println!("  redo -> {} (a new transition discards redo)", gate.redo());
    print_state(&gate);

    println!("\nReset keeps history until it is cleared:");
    gate.reset();
    print_state(&gate);
    gate.clear_history();
    print_state(&gate);

    println!("\n=== Example Complete ===");
    Ok(())
}
