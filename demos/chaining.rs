//! Expression chaining walkthrough
//!
//! Demonstrates the engine's chaining rule: pressing a new operator
//! while a complete expression is pending evaluates it immediately and
//! reuses the result as the next left operand.
//!
//! Run with: cargo run --example chaining

use tally::core::InputToken;
use tally::engine::Engine;

fn main() {
    env_logger::init();

    println!("=== Expression Chaining ===\n");

    let mut engine = Engine::new();

    let script = "5+6-7=";
    println!("script: {script}\n");

    for token in InputToken::script(script) {
        let snapshot = engine.apply(token);
        println!(
            "  {:<12} state={:<8} display=\"{}\"",
            token.kind(),
            snapshot.state.name(),
            snapshot.render()
        );
    }

    println!("\nAt the '-' press the pending 5 + 6 was evaluated to 11,");
    println!("which became the left operand of 11 - 7.\n");

    println!("States traversed:");
    for state in engine.log().path() {
        println!("  {}", state.name());
    }
}
