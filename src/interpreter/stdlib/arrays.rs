use ordered_float::OrderedFloat;

use crate::{
    interpreter::{
        evaluator::{
            core::EvalResult,
            function::registry::{ANY, ARRAY, BOOL, ERROR, Host, NUMBER, STRING, stdlib_functions},
        },
        stdlib::{failure, success},
        value::core::Value,
    },
    util::num::{clamp_offset, f64_to_offset, usize_to_f64},
};

stdlib_functions! {
    package: "arrays";
    "add" => {
        doc: "Appends values to a copy of an array, flattening array values one level.",
        arity: MixedVariadic,
        params: ["arr": ARRAY, "...values": ANY],
        returns: [ARRAY],
        func: push,
    },
    "push" => {
        doc: "Appends values to a copy of an array, flattening array values one level.",
        arity: MixedVariadic,
        params: ["arr": ARRAY, "...values": ANY],
        returns: [ARRAY],
        func: push,
    },
    "pop" => {
        doc: "Returns the last element and the array without it.",
        arity: Fixed,
        params: ["arr": ARRAY],
        returns: [ANY, ARRAY],
        func: pop,
    },
    "filter" => {
        doc: "Splits an array into its falsy elements and its remaining elements.",
        arity: Fixed,
        params: ["arr": ARRAY],
        returns: [ARRAY, ARRAY],
        func: filter,
    },
    "slice" => {
        doc: "Returns the elements from start up to, but excluding, end.",
        arity: Fixed,
        params: ["arr": ARRAY, "start": NUMBER, "end": NUMBER],
        returns: [ARRAY],
        func: slice,
    },
    "splice" => {
        doc: "Removes deleteCount elements at start and inserts items in their place.",
        arity: MixedVariadic,
        params: ["arr": ARRAY, "start": NUMBER, "deleteCount": NUMBER, "...items": ANY],
        returns: [ARRAY, ARRAY],
        func: splice,
    },
    "reverse" => {
        doc: "Returns the elements in reverse order.",
        arity: Fixed,
        params: ["arr": ARRAY],
        returns: [ARRAY],
        func: |_, args, line| {
            let mut items = args[0].as_array(line)?.to_vec();
            items.reverse();
            Ok(Value::from(items))
        },
    },
    "contains" => {
        doc: "Checks if an array holds a value.",
        arity: Fixed,
        params: ["arr": ARRAY, "value": ANY],
        returns: [BOOL],
        func: |_, args, line| {
            let found = args[0].as_array(line)?.iter().any(|item| item.equals(&args[1]));
            Ok(Value::Bool(found))
        },
    },
    "join" => {
        doc: "Joins the elements into a string with a delimiter.",
        arity: Fixed,
        params: ["arr": ARRAY, "delimiter": STRING],
        returns: [STRING],
        func: join,
    },
    "len" => {
        doc: "Returns the number of elements.",
        arity: Fixed,
        params: ["arr": ARRAY],
        returns: [NUMBER],
        func: length,
    },
    "length" => {
        doc: "Returns the number of elements.",
        arity: Fixed,
        params: ["arr": ARRAY],
        returns: [NUMBER],
        func: length,
    },
    "sortNumbers" => {
        doc: "Returns the numbers sorted in ascending order.",
        arity: Fixed,
        params: ["arr": ARRAY],
        returns: [ARRAY, ERROR],
        func: sort_numbers,
    },
    "sortStrings" => {
        doc: "Returns the strings sorted in ascending byte order.",
        arity: Fixed,
        params: ["arr": ARRAY],
        returns: [ARRAY, ERROR],
        func: sort_strings,
    },
}

fn push(_: &mut dyn Host, args: &[Value], line: usize) -> EvalResult<Value> {
    let mut items = args[0].as_array(line)?.to_vec();

    for arg in &args[1..] {
        match arg {
            Value::Array(nested) => items.extend(nested.iter().cloned()),
            other => items.push(other.clone()),
        }
    }

    Ok(Value::from(items))
}

fn pop(_: &mut dyn Host, args: &[Value], line: usize) -> EvalResult<Value> {
    let items = args[0].as_array(line)?;

    Ok(match items.split_last() {
        Some((last, rest)) => Value::tuple(vec![last.clone(), Value::from(rest.to_vec())]),
        None => Value::tuple(vec![Value::Null, Value::from(Vec::new())]),
    })
}

fn filter(_: &mut dyn Host, args: &[Value], line: usize) -> EvalResult<Value> {
    let (remaining, falsy): (Vec<_>, Vec<_>) =
        args[0].as_array(line)?.iter().cloned().partition(Value::is_truthy);

    Ok(Value::tuple(vec![Value::from(falsy), Value::from(remaining)]))
}

fn slice(_: &mut dyn Host, args: &[Value], line: usize) -> EvalResult<Value> {
    let items = args[0].as_array(line)?;
    let end = clamp_offset(f64_to_offset(args[2].as_number(line)?), items.len());
    let start = clamp_offset(f64_to_offset(args[1].as_number(line)?), items.len()).min(end);

    Ok(Value::from(items[start..end].to_vec()))
}

/// Returns `(removed, result)`. The start is resolved like `slice`; the
/// delete count is clamped to what follows the start.
fn splice(_: &mut dyn Host, args: &[Value], line: usize) -> EvalResult<Value> {
    let items = args[0].as_array(line)?;
    let start = clamp_offset(f64_to_offset(args[1].as_number(line)?), items.len());
    let delete_count = usize::try_from(f64_to_offset(args[2].as_number(line)?)).unwrap_or(0)
                                                                             .min(items.len() - start);

    let mut result = items.to_vec();
    let removed = result.splice(start..start + delete_count, args[3..].iter().cloned())
                        .collect::<Vec<_>>();

    Ok(Value::tuple(vec![Value::from(removed), Value::from(result)]))
}

/// Non-string elements are joined by their printed form.
fn join(_: &mut dyn Host, args: &[Value], line: usize) -> EvalResult<Value> {
    let delimiter = args[1].as_str(line)?;
    let joined = args[0].as_array(line)?
                        .iter()
                        .map(ToString::to_string)
                        .collect::<Vec<_>>()
                        .join(delimiter);

    Ok(Value::String(joined))
}

fn length(_: &mut dyn Host, args: &[Value], line: usize) -> EvalResult<Value> {
    Ok(Value::Number(usize_to_f64(args[0].as_array(line)?.len())))
}

fn sort_numbers(_: &mut dyn Host, args: &[Value], line: usize) -> EvalResult<Value> {
    let items = args[0].as_array(line)?;

    let Some(mut numbers) = items.iter()
                                 .map(|item| match item {
                                     Value::Number(n) => Some(OrderedFloat(*n)),
                                     _ => None,
                                 })
                                 .collect::<Option<Vec<_>>>()
    else {
        return Ok(failure(Value::Null, "array contains non-numbers"));
    };

    numbers.sort();
    Ok(success(numbers.into_iter().map(|n| Value::Number(n.0)).collect::<Vec<_>>().into()))
}

fn sort_strings(_: &mut dyn Host, args: &[Value], line: usize) -> EvalResult<Value> {
    let items = args[0].as_array(line)?;

    let Some(mut strings) = items.iter()
                                 .map(|item| match item {
                                     Value::String(s) => Some(s.clone()),
                                     _ => None,
                                 })
                                 .collect::<Option<Vec<_>>>()
    else {
        return Ok(failure(Value::Null, "array contains non-strings"));
    };

    strings.sort();
    Ok(success(strings.into_iter().map(Value::String).collect::<Vec<_>>().into()))
}

#[cfg(test)]
mod tests {
    use super::*;

    struct NoHost;

    impl Host for NoHost {
        fn add_to_buffer(&mut self, _: &str) {}

        fn terminate(&mut self, _: u8) {}
    }

    fn numbers(values: &[f64]) -> Value {
        Value::from(values.iter().copied().map(Value::Number).collect::<Vec<_>>())
    }

    #[test]
    fn push_flattens_one_level() {
        let nested = Value::from(vec![numbers(&[9.0])]);
        let result = push(&mut NoHost, &[numbers(&[1.0]), Value::Number(2.0), nested], 1).unwrap();

        assert_eq!(result.to_string(), "[1, 2, [9]]");
    }

    #[test]
    fn slice_counts_negatives_from_the_end() {
        let items = numbers(&[1.0, 2.0, 3.0, 4.0]);
        let run = |start: f64, end: f64| {
            slice(&mut NoHost, &[items.clone(), Value::Number(start), Value::Number(end)], 1).unwrap()
                                                                                           .to_string()
        };

        assert_eq!(run(1.0, 3.0), "[2, 3]");
        assert_eq!(run(-2.0, 10.0), "[3, 4]");
        assert_eq!(run(3.0, 1.0), "[]");
    }

    #[test]
    fn splice_returns_removed_and_result() {
        let args = [numbers(&[1.0, 2.0, 3.0, 4.0]),
                    Value::Number(1.0),
                    Value::Number(2.0),
                    Value::from("x")];
        let result = splice(&mut NoHost, &args, 1).unwrap();

        assert_eq!(result.to_string(), "([2, 3], [1, x, 4])");
    }

    #[test]
    fn filter_and_pop_return_pairs() {
        let items = Value::from(vec![Value::Number(0.0), Value::from("a"), Value::Null, Value::Bool(true)]);
        assert_eq!(filter(&mut NoHost, &[items], 1).unwrap().to_string(), "([0, null], [a, true])");

        assert_eq!(pop(&mut NoHost, &[numbers(&[1.0, 2.0])], 1).unwrap().to_string(), "(2, [1])");
        assert_eq!(pop(&mut NoHost, &[numbers(&[])], 1).unwrap().to_string(), "(null, [])");
    }

    #[test]
    fn sorting_rejects_mixed_arrays() {
        let sorted = sort_numbers(&mut NoHost, &[numbers(&[3.0, -1.0, 2.0])], 1).unwrap();
        assert_eq!(sorted.to_string(), "([-1, 2, 3], null)");

        let mixed = Value::from(vec![Value::Number(1.0), Value::from("a")]);
        let sorted = sort_strings(&mut NoHost, &[mixed], 1).unwrap();
        assert_eq!(sorted.to_string(), "(null, array contains non-strings)");
    }
}
