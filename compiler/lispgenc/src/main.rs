//! LispGen CLI

use lispgenc::commands::{parse_file, run_file, run_repl, EvalOptions};

fn main() {
    lispgenc::init_tracing();

    let args: Vec<String> = std::env::args().collect();

    if args.len() < 2 {
        print_usage();
        return;
    }

    let command = &args[1];

    match command.as_str() {
        "run" => {
            let (options, rest) = parse_options(&args[2..]);
            let Some(path) = rest.first() else {
                eprintln!("error: missing file path");
                eprintln!("Usage: lispgen run <file.lisp> [--max-depth=N]");
                std::process::exit(1);
            };
            run_file(path, &options);
        }
        "repl" => {
            let (options, _) = parse_options(&args[2..]);
            run_repl(&options);
        }
        "parse" => {
            if args.len() < 3 {
                eprintln!("Usage: lispgen parse <file.lisp>");
                std::process::exit(1);
            }
            parse_file(&args[2]);
        }
        "help" | "--help" | "-h" => {
            print_usage();
        }
        "version" | "--version" | "-V" => {
            println!("LispGen {}", env!("CARGO_PKG_VERSION"));
        }
        _ => {
            // A bare `.lisp` path runs it
            if std::path::Path::new(command)
                .extension()
                .is_some_and(|ext| ext.eq_ignore_ascii_case("lisp"))
            {
                run_file(command, &EvalOptions::default());
            } else {
                eprintln!("Unknown command: {command}");
                eprintln!();
                print_usage();
                std::process::exit(1);
            }
        }
    }
}

fn parse_options(args: &[String]) -> (EvalOptions, Vec<String>) {
    match EvalOptions::parse(args) {
        Ok(parsed) => parsed,
        Err(msg) => {
            eprintln!("error: {msg}");
            std::process::exit(1);
        }
    }
}

fn print_usage() {
    println!("LispGen interpreter");
    println!();
    println!("Usage: lispgen <command> [options]");
    println!();
    println!("Commands:");
    println!("  run <file.lisp>      Evaluate a program and print its last value");
    println!("  repl                 Start an interactive session (^exit to quit)");
    println!("  parse <file.lisp>    Parse and display the expression tree");
    println!("  help                 Show this help message");
    println!("  version              Show version information");
    println!();
    println!("Options (run, repl):");
    println!("  --max-depth=<N>      Nesting limit before evaluation fails (default: 10000)");
    println!();
    println!("Environment:");
    println!("  RUST_LOG             Enable tracing output (e.g. RUST_LOG=lispgen_eval=debug)");
    println!();
    println!("Examples:");
    println!("  lispgen run program.lisp");
    println!("  lispgen run program.lisp --max-depth=500");
    println!("  lispgen repl");
    println!("  lispgen parse program.lisp");
}
