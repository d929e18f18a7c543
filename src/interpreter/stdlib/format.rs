use std::{iter::Peekable, str::Chars};

use crate::interpreter::value::core::{Value, format_number};

/// Precision used by `%f` when none is given.
const DEFAULT_PRECISION: usize = 6;

/// Largest precision `%.Nf` accepts.
const MAX_PRECISION: usize = u16::MAX as usize;

/// Renders `template` with `args`.
///
/// Supported directives:
/// - `%v`, `%s`: the value as it prints.
/// - `%d`: a number truncated to an integer.
/// - `%g`: a number in its shortest form.
/// - `%f`, `%.Nf`: a number with six or `N` decimals.
/// - `%t`: a bool.
/// - `%q`: a double-quoted, escaped string.
/// - `%%`: a literal percent sign.
///
/// A directive without an argument renders as `%!v(MISSING)`; a directive
/// whose argument has the wrong type renders as `%!d(string=abc)`. A
/// precision above 65535 renders as `%!f(BADPREC)`. Surplus
/// arguments are appended as `%!(EXTRA number=1, string=a)`.
///
/// # Example
/// ```
/// use dlite::interpreter::{stdlib::format::format, value::core::Value};
///
/// let text = format("%s has %d items (%.2f%%)",
///                   &[Value::from("cart"), Value::Number(3.9), Value::Number(12.5)]);
/// assert_eq!(text, "cart has 3 items (12.50%)");
///
/// assert_eq!(format("%v and %v", &[Value::Bool(true)]),
///            "true and %!v(MISSING)");
/// ```
#[must_use]
pub fn format(template: &str, args: &[Value]) -> String {
    let mut output = String::with_capacity(template.len());
    let mut args = args.iter();
    let mut chars = template.chars().peekable();

    while let Some(c) = chars.next() {
        if c != '%' {
            output.push(c);
            continue;
        }

        let precision = parse_precision(&mut chars);

        let Some(verb) = chars.next() else {
            output.push_str("%!(NOVERB)");
            break;
        };

        if verb == '%' && precision.is_none() {
            output.push('%');
            continue;
        }

        match args.next() {
            Some(arg) => output.push_str(&render(verb, precision, arg)),
            None => output.push_str(&format!("%!{verb}(MISSING)")),
        }
    }

    let extra = args.map(|arg| format!("{}={arg}", arg.data_type()))
                    .collect::<Vec<_>>();
    if !extra.is_empty() {
        output.push_str(&format!("%!(EXTRA {})", extra.join(", ")));
    }

    output
}

/// Reads an optional `.N` precision.
fn parse_precision(chars: &mut Peekable<Chars<'_>>) -> Option<usize> {
    if chars.peek() != Some(&'.') {
        return None;
    }
    chars.next();

    let mut digits = String::new();
    while let Some(digit) = chars.next_if(char::is_ascii_digit) {
        digits.push(digit);
    }

    if digits.is_empty() {
        return Some(0);
    }
    // Out-of-range digits saturate and are rejected when rendering.
    Some(digits.parse().unwrap_or(usize::MAX))
}

fn render(verb: char, precision: Option<usize>, arg: &Value) -> String {
    match (verb, arg) {
        ('v' | 's', _) => arg.to_string(),
        ('d', Value::Number(n)) => format_number(n.trunc()),
        ('g', Value::Number(n)) => format_number(*n),
        ('f', Value::Number(_)) if precision.is_some_and(|p| p > MAX_PRECISION) => {
            format!("%!{verb}(BADPREC)")
        },
        ('f', Value::Number(n)) => {
            format!("{n:.precision$}", precision = precision.unwrap_or(DEFAULT_PRECISION))
        },
        ('t', Value::Bool(b)) => b.to_string(),
        ('q', Value::String(s)) => format!("{s:?}"),
        _ => format!("%!{verb}({}={arg})", arg.data_type()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn numbers_follow_their_directive() {
        let n = [Value::Number(2.5)];

        assert_eq!(format("%g", &n), "2.5");
        assert_eq!(format("%d", &n), "2");
        assert_eq!(format("%f", &n), "2.500000");
        assert_eq!(format("%.1f", &n), "2.5");
        assert_eq!(format("%.0f", &[Value::Number(3.0)]), "3");
    }

    #[test]
    fn adding_two_numbers_prints_plainly() {
        assert_eq!(format("%g + %g", &[Value::Number(1.0), Value::Number(2.0)]), "1 + 2");
    }

    #[test]
    fn strings_and_bools_render_by_value() {
        assert_eq!(format("[%s] %t %q",
                          &[Value::from("x"), Value::Bool(false), Value::from("a\"b")]),
                   "[x] false \"a\\\"b\"");
        assert_eq!(format("%v", &[Value::Null]), "null");
    }

    #[test]
    fn mismatched_missing_and_extra_arguments_are_reported_inline() {
        assert_eq!(format("%d", &[Value::from("abc")]), "%!d(string=abc)");
        assert_eq!(format("%s", &[]), "%!s(MISSING)");
        assert_eq!(format("done", &[Value::Number(1.0), Value::from("a")]),
                   "done%!(EXTRA number=1, string=a)");
        assert_eq!(format("100%", &[]), "100%!(NOVERB)");
    }

    #[test]
    fn oversized_precision_is_reported_inline() {
        let one = [Value::Number(1.0)];

        assert_eq!(format("%.70000f", &one), "%!f(BADPREC)");
        assert_eq!(format("%.9999999999999999999999f|", &one), "%!f(BADPREC)|");
        assert_eq!(format("%.3f", &one), "1.000");
    }
}
