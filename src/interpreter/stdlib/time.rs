use std::{
    thread,
    time::{Duration, SystemTime, UNIX_EPOCH},
};

use crate::{
    interpreter::{
        evaluator::{
            core::EvalResult,
            function::registry::{Host, NUMBER, stdlib_functions},
        },
        value::core::Value,
    },
    util::num::f64_to_index,
};

stdlib_functions! {
    package: "time";
    "now" => {
        doc: "Returns the current Unix time in seconds.",
        arity: Fixed,
        params: [],
        returns: [NUMBER],
        func: now,
    },
    "sleep" => {
        doc: "Pauses the program for a number of milliseconds.",
        arity: Fixed,
        params: ["ms": NUMBER],
        returns: [],
        func: sleep,
    },
}

fn now(_: &mut dyn Host, _: &[Value], _: usize) -> EvalResult<Value> {
    let seconds = SystemTime::now().duration_since(UNIX_EPOCH)
                                   .map_or(0.0, |elapsed| elapsed.as_secs_f64().trunc());
    Ok(Value::Number(seconds))
}

/// Negative durations do not sleep.
fn sleep(_: &mut dyn Host, args: &[Value], line: usize) -> EvalResult<Value> {
    let millis = f64_to_index(args[0].as_number(line)?).unwrap_or(0);

    tracing::trace!(millis, "sleeping");
    thread::sleep(Duration::from_millis(u64::try_from(millis).unwrap_or(u64::MAX)));

    Ok(Value::Null)
}
