// SPDX-License-Identifier: (MIT OR Apache-2.0)
//! The interactive session.

use std::io::{self, BufRead, Write};
use std::process;

use onda_diagnostics::formatter::render_traceback;
use onda_interp::{Interpreter, RuntimeError};

/// Read-eval-print loop over one persistent interpreter; definitions and
/// variables survive between lines.
pub fn run() {
    println!("Onda 0.1.0 interactive session. Ctrl-D exits.");

    let mut interp = Interpreter::new();
    let stdin = io::stdin();
    let mut line = String::new();

    loop {
        print!("> ");
        io::stdout().flush().ok();

        line.clear();
        match stdin.lock().read_line(&mut line) {
            Ok(0) | Err(_) => break,
            Ok(_) => {}
        }
        let source = line.trim();
        if source.is_empty() {
            continue;
        }

        match interp.run_line(source) {
            Ok(Some(value)) => println!("{}", value.represent()),
            Ok(None) => {}
            Err(diag) => {
                if let RuntimeError::Exit(code) = diag.error {
                    process::exit(code as i32);
                }
                eprint!("{}", render_traceback(&diag, &interp));
            }
        }
    }
}
