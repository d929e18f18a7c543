use crate::{
    interpreter::{
        evaluator::{
            core::EvalResult,
            function::registry::{ARRAY, BOOL, ERROR, Host, NUMBER, STRING, stdlib_functions},
        },
        stdlib::{failure, success},
        value::core::Value,
    },
    util::num::{f64_to_offset, usize_to_f64},
};

stdlib_functions! {
    package: "strings";
    "len" => {
        doc: "Returns the length of a string in bytes.",
        arity: Fixed,
        params: ["str": STRING],
        returns: [NUMBER],
        func: length,
    },
    "length" => {
        doc: "Returns the length of a string in bytes.",
        arity: Fixed,
        params: ["str": STRING],
        returns: [NUMBER],
        func: length,
    },
    "has" => {
        doc: "Checks if a substring is present in a string.",
        arity: Fixed,
        params: ["str": STRING, "substr": STRING],
        returns: [BOOL],
        func: |_, args, line| {
            let [haystack, needle] = two_strings(args, line)?;
            Ok(Value::Bool(haystack.contains(needle)))
        },
    },
    "find" => {
        doc: "Returns the index of the first occurrence of a substring, or -1.",
        arity: Fixed,
        params: ["str": STRING, "substr": STRING],
        returns: [NUMBER],
        func: index_of,
    },
    "indexOf" => {
        doc: "Returns the index of the first occurrence of a substring, or -1.",
        arity: Fixed,
        params: ["str": STRING, "substr": STRING],
        returns: [NUMBER],
        func: index_of,
    },
    "lastIndexOf" => {
        doc: "Returns the index of the last occurrence of a substring, or -1.",
        arity: Fixed,
        params: ["str": STRING, "substr": STRING],
        returns: [NUMBER],
        func: |_, args, line| {
            let [haystack, needle] = two_strings(args, line)?;
            Ok(position(haystack.rfind(needle)))
        },
    },
    "startsWith" => {
        doc: "Checks if a string starts with a prefix.",
        arity: Fixed,
        params: ["str": STRING, "prefix": STRING],
        returns: [BOOL],
        func: |_, args, line| {
            let [text, prefix] = two_strings(args, line)?;
            Ok(Value::Bool(text.starts_with(prefix)))
        },
    },
    "endsWith" => {
        doc: "Checks if a string ends with a suffix.",
        arity: Fixed,
        params: ["str": STRING, "suffix": STRING],
        returns: [BOOL],
        func: |_, args, line| {
            let [text, suffix] = two_strings(args, line)?;
            Ok(Value::Bool(text.ends_with(suffix)))
        },
    },
    "replace" => {
        doc: "Replaces the first occurrence of a substring.",
        arity: Fixed,
        params: ["str": STRING, "substr": STRING, "newSubstr": STRING],
        returns: [STRING],
        func: |_, args, line| {
            let [text, from, to] = three_strings(args, line)?;
            Ok(Value::String(text.replacen(from, to, 1)))
        },
    },
    "replaceAll" => {
        doc: "Replaces every occurrence of a substring.",
        arity: Fixed,
        params: ["str": STRING, "substr": STRING, "newSubstr": STRING],
        returns: [STRING],
        func: |_, args, line| {
            let [text, from, to] = three_strings(args, line)?;
            Ok(Value::String(text.replace(from, to)))
        },
    },
    "split" => {
        doc: "Splits a string into an array of strings using a delimiter.",
        arity: Fixed,
        params: ["str": STRING, "delimiter": STRING],
        returns: [ARRAY],
        func: split,
    },
    "substring" => {
        doc: "Returns length bytes of a string from byte start; split characters become U+FFFD.",
        arity: Fixed,
        params: ["str": STRING, "start": NUMBER, "length": NUMBER],
        returns: [STRING, ERROR],
        func: substring,
    },
    "toLower" => {
        doc: "Converts a string to lowercase.",
        arity: Fixed,
        params: ["str": STRING],
        returns: [STRING],
        func: |_, args, line| Ok(Value::String(args[0].as_str(line)?.to_lowercase())),
    },
    "toUpper" => {
        doc: "Converts a string to uppercase.",
        arity: Fixed,
        params: ["str": STRING],
        returns: [STRING],
        func: |_, args, line| Ok(Value::String(args[0].as_str(line)?.to_uppercase())),
    },
    "trim" => {
        doc: "Removes leading and trailing whitespace.",
        arity: Fixed,
        params: ["str": STRING],
        returns: [STRING],
        func: |_, args, line| Ok(Value::from(args[0].as_str(line)?.trim())),
    },
    "trimLeft" => {
        doc: "Removes spaces from the beginning of a string.",
        arity: Fixed,
        params: ["str": STRING],
        returns: [STRING],
        func: |_, args, line| Ok(Value::from(args[0].as_str(line)?.trim_start_matches(' '))),
    },
    "trimRight" => {
        doc: "Removes spaces from the end of a string.",
        arity: Fixed,
        params: ["str": STRING],
        returns: [STRING],
        func: |_, args, line| Ok(Value::from(args[0].as_str(line)?.trim_end_matches(' '))),
    },
}

fn two_strings(args: &[Value], line: usize) -> EvalResult<[&str; 2]> {
    Ok([args[0].as_str(line)?, args[1].as_str(line)?])
}

fn three_strings(args: &[Value], line: usize) -> EvalResult<[&str; 3]> {
    Ok([args[0].as_str(line)?, args[1].as_str(line)?, args[2].as_str(line)?])
}

fn position(found: Option<usize>) -> Value {
    Value::Number(found.map_or(-1.0, usize_to_f64))
}

fn length(_: &mut dyn Host, args: &[Value], line: usize) -> EvalResult<Value> {
    Ok(Value::Number(usize_to_f64(args[0].as_str(line)?.len())))
}

fn index_of(_: &mut dyn Host, args: &[Value], line: usize) -> EvalResult<Value> {
    let [haystack, needle] = two_strings(args, line)?;
    Ok(position(haystack.find(needle)))
}

/// An empty delimiter splits between characters.
fn split(_: &mut dyn Host, args: &[Value], line: usize) -> EvalResult<Value> {
    let [text, delimiter] = two_strings(args, line)?;

    let parts: Vec<Value> = if delimiter.is_empty() {
        text.chars().map(|c| Value::String(c.to_string())).collect()
    } else {
        text.split(delimiter).map(Value::from).collect()
    };

    Ok(Value::from(parts))
}

/// Byte-based substring.
///
/// A negative `start` counts from the end. A negative `length` ends that many
/// bytes before the end of the string. A `length` running past the end is
/// clamped, and the clamped text is returned alongside an error.
fn substring(_: &mut dyn Host, args: &[Value], line: usize) -> EvalResult<Value> {
    let text = args[0].as_str(line)?;
    let mut start = f64_to_offset(args[1].as_number(line)?);
    let length = f64_to_offset(args[2].as_number(line)?);
    let len = i64::try_from(text.len()).unwrap_or(i64::MAX);

    if start < 0 {
        start = (len + start).max(0);
    }

    if start >= len {
        return Ok(failure(Value::from(""),
                          format!("start index out of bounds: {start} >= {len}")));
    }

    if length < 0 {
        let end = len + length;
        if end <= start {
            return Ok(failure(Value::from(""),
                              format!("negative length results in empty string: length {length}")));
        }
        return Ok(success(byte_slice(text, start, end)));
    }

    let end = start.saturating_add(length);
    if end > len {
        return Ok(failure(byte_slice(text, start, len),
                          format!("length exceeds string bounds: requested {length}, available {}",
                                  len - start)));
    }

    Ok(success(byte_slice(text, start, end)))
}

/// Slices by byte offsets. The result is lossy: a multi-byte character cut
/// by either offset becomes U+FFFD.
fn byte_slice(text: &str, start: i64, end: i64) -> Value {
    let start = usize::try_from(start).unwrap_or(0);
    let end = usize::try_from(end).unwrap_or(0);

    match text.get(start..end) {
        Some(slice) => Value::from(slice),
        None => Value::String(String::from_utf8_lossy(&text.as_bytes()[start..end]).into_owned()),
    }
}
