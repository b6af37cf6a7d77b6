// SPDX-License-Identifier: (MIT OR Apache-2.0)
//! Onda CLI - script runner and REPL.

use std::env;
use std::fs;
use std::process;

use colored::Colorize;
use onda_diagnostics::formatter::{render_traceback, DiagnosticFormatter};
use onda_diagnostics::ToDiagnostic;
use onda_interp::{Interpreter, RuntimeDiagnostic, RuntimeError, Value};

mod repl;

fn main() {
    let args: Vec<String> = env::args().collect();

    if args.len() < 2 {
        print_usage();
        process::exit(1);
    }

    match args[1].as_str() {
        "-s" => {
            if args.len() < 3 {
                eprintln!("Usage: onda -s <code>");
                process::exit(1);
            }
            cmd_run_source(&args[2]);
        }
        "-i" => {
            repl::run();
        }
        "lex" => {
            if args.len() < 3 {
                eprintln!("Usage: onda lex <file.onda>");
                process::exit(1);
            }
            cmd_lex(&args[2], args.iter().any(|a| a == "--json"));
        }
        "parse" => {
            if args.len() < 3 {
                eprintln!("Usage: onda parse <file.onda>");
                process::exit(1);
            }
            cmd_parse(&args[2], args.iter().any(|a| a == "--json"));
        }
        "help" | "--help" | "-h" => {
            print_usage();
        }
        "version" | "--version" | "-V" => {
            println!("onda 0.1.0");
        }
        path => {
            cmd_run_file(path);
        }
    }
}

fn print_usage() {
    println!("Onda 0.1.0 - A small dynamic scripting language");
    println!();
    println!("Usage: onda <file.onda>");
    println!("       onda <command> [args]");
    println!();
    println!("Commands:");
    println!("  -s <code>        Run a program given as a string");
    println!("  -i               Start an interactive session");
    println!("  lex <file>       Tokenize a file and print tokens");
    println!("  parse <file>     Parse a file and print the AST");
    println!("  help             Show this help");
    println!("  version          Show version");
    println!();
    println!("The process exit code mirrors the script's integer result.");
}

/// Run a script file; the exit code mirrors its integer result.
fn cmd_run_file(path: &str) {
    let mut interp = Interpreter::new();
    let result = interp.run_file(path);
    finish(result, &interp);
}

fn cmd_run_source(code: &str) {
    let mut interp = Interpreter::new();
    let result = interp.run_source(code);
    finish(result, &interp);
}

fn finish(result: Result<Value, RuntimeDiagnostic>, interp: &Interpreter) -> ! {
    match result {
        Ok(Value::Int(code)) => process::exit(code as i32),
        Ok(_) => process::exit(0),
        Err(diag) => {
            if let RuntimeError::Exit(code) = diag.error {
                process::exit(code as i32);
            }
            eprint!("{}", render_traceback(&diag, interp));
            process::exit(1);
        }
    }
}

fn read_source(path: &str) -> String {
    match fs::read_to_string(path) {
        Ok(source) => source,
        Err(e) => {
            eprintln!("{}: cannot read {}: {}", "error".red().bold(), path, e);
            process::exit(1);
        }
    }
}

fn cmd_lex(path: &str, json: bool) {
    let source = read_source(path);
    let result = onda_lexer::Lexer::new(&source).tokenize();

    if !result.is_ok() {
        let diagnostics: Vec<_> = result.errors.iter().map(|e| e.to_diagnostic()).collect();
        if json {
            println!("{}", onda_diagnostics::json::to_json(&diagnostics));
        } else {
            let formatter = DiagnosticFormatter::new(&source).with_file_name(path);
            for diag in &diagnostics {
                eprint!("{}", formatter.format(diag));
            }
            eprintln!("\n=== Lex FAILED: {} error(s) ===", diagnostics.len());
        }
        process::exit(1);
    }

    println!("=== Tokens ({}) ===\n", result.tokens.len());
    for token in &result.tokens {
        println!("{:4}:{:<4} {:?}", token.span.start, token.span.end, token.kind);
    }
    println!("\n=== Lex OK ===");
}

fn cmd_parse(path: &str, json: bool) {
    let source = read_source(path);
    match onda_parser::parse_source(&source) {
        Ok(block) => {
            println!("=== AST ({} statements) ===\n", block.len());
            for (i, stmt) in block.iter().enumerate() {
                println!("--- Statement {} ---", i + 1);
                println!("{:#?}", stmt);
                println!();
            }
            println!("=== Parse OK ===");
        }
        Err(e) => {
            let diag = e.to_diagnostic();
            if json {
                println!("{}", onda_diagnostics::json::to_json(&[diag]));
            } else {
                let formatter = DiagnosticFormatter::new(&source).with_file_name(path);
                eprint!("{}", formatter.format(&diag));
                eprintln!("\n=== Parse FAILED ===");
            }
            process::exit(1);
        }
    }
}
