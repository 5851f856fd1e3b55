//! The `run` command: evaluate a source file as one program.

use super::{read_file, report_error, stderr_is_terminal, EvalOptions};

/// Evaluate every top-level expression of `path` in order.
///
/// Prints the value of the last expression. Exits non-zero on the first
/// parse or evaluation error.
pub fn run_file(path: &str, options: &EvalOptions) {
    let source = read_file(path);
    let mut session = options.session();

    match session.eval_source(&source) {
        Ok(value) => println!("{value}"),
        Err(err) => {
            let mut stderr = std::io::stderr().lock();
            if report_error(&source, &err, stderr_is_terminal(), &mut stderr).is_err() {
                eprintln!("error in '{path}': {err}");
            }
            std::process::exit(1);
        }
    }
}
