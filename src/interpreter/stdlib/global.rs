use crate::{
    interpreter::{
        evaluator::{
            core::EvalResult,
            function::registry::{ANY, Host, NUMBER, STRING, stdlib_functions},
        },
        stdlib::format::format,
        value::core::Value,
    },
    util::num::exit_status,
};

stdlib_functions! {
    package: "";
    "printf" => {
        doc: "Formats according to a format specifier and writes to the output.",
        arity: MixedVariadic,
        params: ["format": STRING, "...args": ANY],
        returns: [],
        func: printf,
    },
    "sprintf" => {
        doc: "Formats according to a format specifier and returns the resulting string.",
        arity: MixedVariadic,
        params: ["format": STRING, "...args": ANY],
        returns: [STRING],
        func: sprintf,
    },
    "dump" => {
        doc: "Writes a structural description of each value to the output.",
        arity: Variadic,
        params: ["...values": ANY],
        returns: [],
        func: dump,
    },
    "exit" => {
        doc: "Stops the program with an optional exit code.",
        arity: Variadic,
        params: ["...code": NUMBER],
        returns: [],
        func: exit,
    },
}

fn printf(host: &mut dyn Host, args: &[Value], line: usize) -> EvalResult<Value> {
    let template = args[0].as_str(line)?;
    host.add_to_buffer(&format(template, &args[1..]));
    Ok(Value::Null)
}

/// `%d` is printed as `%f` so whole and fractional numbers both keep their
/// digits.
fn sprintf(_: &mut dyn Host, args: &[Value], line: usize) -> EvalResult<Value> {
    let template = args[0].as_str(line)?.replace("%d", "%f");
    Ok(Value::String(format(&template, &args[1..])))
}

fn dump(host: &mut dyn Host, args: &[Value], _: usize) -> EvalResult<Value> {
    let mut output = String::new();
    for value in args {
        describe(value, 0, &mut output);
    }
    host.add_to_buffer(&output);
    Ok(Value::Null)
}

fn exit(host: &mut dyn Host, args: &[Value], line: usize) -> EvalResult<Value> {
    let code = match args.first() {
        Some(value) => exit_status(value.as_number(line)?),
        None => 0,
    };
    host.terminate(code);
    Ok(Value::Null)
}

/// Appends one line per scalar and one header line plus nested entries per
/// aggregate.
fn describe(value: &Value, depth: usize, output: &mut String) {
    let indent = "  ".repeat(depth);

    match value {
        Value::String(s) => output.push_str(&format!("{indent}{s:?}\n")),
        Value::Array(items) => describe_items("array", '[', ']', items, depth, output),
        Value::Tuple(items) => describe_items("tuple", '(', ')', items, depth, output),
        Value::Function(_) => output.push_str(&format!("{indent}function\n")),
        other => output.push_str(&format!("{indent}{other}\n")),
    }
}

fn describe_items(kind: &str,
                  open: char,
                  close: char,
                  items: &[Value],
                  depth: usize,
                  output: &mut String) {
    let indent = "  ".repeat(depth);
    output.push_str(&format!("{indent}{kind}[{}]:\n", items.len()));

    for (index, item) in items.iter().enumerate() {
        output.push_str(&format!("{indent}  {open}{index}{close}: "));
        let mut nested = String::new();
        describe(item, depth + 1, &mut nested);
        output.push_str(nested.trim_start());
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Default)]
    struct Recorder {
        output: String,
        code:   Option<u8>,
    }

    impl Host for Recorder {
        fn add_to_buffer(&mut self, text: &str) {
            self.output.push_str(text);
        }

        fn terminate(&mut self, code: u8) {
            self.code = Some(code);
        }
    }

    #[test]
    fn printf_writes_and_sprintf_returns() {
        let mut host = Recorder::default();

        printf(&mut host, &[Value::from("%s=%g\n"), Value::from("x"), Value::Number(2.0)], 1).unwrap();
        assert_eq!(host.output, "x=2\n");

        let text = sprintf(&mut host, &[Value::from("%d"), Value::Number(2.0)], 1).unwrap();
        assert_eq!(text.to_string(), "2.000000");
    }

    #[test]
    fn dump_nests_aggregates() {
        let mut host = Recorder::default();
        let nested = Value::from(vec![Value::Number(1.0),
                                      Value::from(vec![Value::from("a")]),
                                      Value::Null]);

        dump(&mut host, &[nested, Value::Bool(true)], 1).unwrap();

        assert_eq!(host.output,
                   "array[3]:\n  [0]: 1\n  [1]: array[1]:\n    [0]: \"a\"\n  [2]: null\ntrue\n");
    }

    #[test]
    fn exit_defaults_to_zero() {
        let mut host = Recorder::default();
        exit(&mut host, &[], 1).unwrap();
        assert_eq!(host.code, Some(0));

        exit(&mut host, &[Value::Number(3.0)], 1).unwrap();
        assert_eq!(host.code, Some(3));
    }
}
