//! `%`-directive string interpolation.

use lispgen_ir::{Context, EvalError, EvalResult, ExpandAtoms, Execute, Expr};

/// Expand the `%` directives of `template` against `args`.
///
/// Each directive consumes and evaluates the next argument. Only `%d`
/// (a number) is defined. Once the arguments run out, `%` and the character
/// after it are copied through untouched, as is a `%` ending the template.
pub fn interpolate(
    exec: &dyn Execute,
    ctx: &Context,
    template: &str,
    args: &[Expr],
) -> EvalResult<String> {
    let mut out = String::with_capacity(template.len());
    let mut args = args.iter();
    let mut chars = template.chars();

    while let Some(c) = chars.next() {
        if c != '%' {
            out.push(c);
            continue;
        }
        let Some(directive) = chars.next() else {
            out.push('%');
            break;
        };
        let Some(arg) = args.next() else {
            out.push('%');
            out.push(directive);
            continue;
        };
        if directive != 'd' {
            return Err(EvalError::UnknownDirective { directive });
        }
        match exec.value_of(ctx, arg, ExpandAtoms::No)? {
            Expr::Num(n) => out.push_str(&n.to_string()),
            other => {
                return Err(EvalError::FormatTypeMismatch {
                    directive,
                    got: other.kind_name(),
                })
            }
        }
    }

    Ok(out)
}

#[cfg(test)]
mod tests;
