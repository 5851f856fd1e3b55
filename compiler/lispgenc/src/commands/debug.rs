//! The `parse` command: show what the parser produced.

use super::{read_file, render_parse_error, stderr_is_terminal};

/// Parse `path` and print each top-level expression with its kind.
pub fn parse_file(path: &str) {
    let source = read_file(path);
    match lispgen_parse::parse_program(&source) {
        Ok(exprs) => {
            for (i, expr) in exprs.iter().enumerate() {
                println!("[{i}] {}: {expr}", expr.kind_name());
            }
            println!();
            println!("{} expression(s)", exprs.len());
        }
        Err(err) => {
            let mut stderr = std::io::stderr().lock();
            if render_parse_error(&source, &err, stderr_is_terminal(), &mut stderr).is_err() {
                eprintln!("parse error in '{path}': {err}");
            }
            std::process::exit(1);
        }
    }
}
