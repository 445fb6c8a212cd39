//! Interactive calculator shell
//!
//! A minimal "imperative shell" around the engine: stdin is the input
//! source, stdout is the display sink. Expression characters map to
//! tokens one-to-one; two commands cover the clears.
//!
//! Run with: cargo run --example repl
//!
//! Commands:
//!   c   clear memory
//!   d   clear digit (backspace)
//!   q   quit

use std::io::{self, BufRead, Write};
use tally::core::InputToken;
use tally::engine::Engine;

fn main() {
    env_logger::init();

    let mut engine = Engine::new();
    engine.set_signal_sink(|error| eprintln!("  ! {error}"));

    println!("tally - type expression characters (12+3=), c/d/q for clear/backspace/quit");
    render(&engine);

    let stdin = io::stdin();
    loop {
        print!("> ");
        io::stdout().flush().expect("stdout flush");

        let mut line = String::new();
        if stdin.lock().read_line(&mut line).expect("stdin read") == 0 {
            break;
        }

        for c in line.trim().chars() {
            let token = match c {
                'q' => return,
                'c' => InputToken::ClearMemory,
                'd' => InputToken::ClearDigit,
                _ => match InputToken::from_char(c) {
                    Some(token) => token,
                    None => {
                        eprintln!("  ? unrecognized input '{c}'");
                        continue;
                    }
                },
            };

            if !engine.accepts(&token) {
                eprintln!("  ? {} is not available right now", token.kind());
                continue;
            }
            engine.apply(token);
        }

        render(&engine);
    }
}

fn render(engine: &Engine) {
    let rendered = engine.snapshot().render();
    // The placeholder zero is the sink's concern, not the engine's
    if rendered.is_empty() {
        println!("[ 0 ]");
    } else {
        println!("[ {rendered} ]");
    }
}
