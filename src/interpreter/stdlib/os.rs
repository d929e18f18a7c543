use std::env;

use crate::interpreter::{
    evaluator::{
        core::EvalResult,
        function::registry::{ERROR, Host, STRING, stdlib_functions},
    },
    value::core::Value,
};

stdlib_functions! {
    package: "os";
    "getEnvVariable" => {
        doc: "Returns the value of an environment variable, or an empty string if unset.",
        arity: Fixed,
        params: ["name": STRING],
        returns: [STRING],
        func: |_, args, line| {
            Ok(Value::String(env::var(args[0].as_str(line)?).unwrap_or_default()))
        },
    },
    "setEnvVariable" => {
        doc: "Sets an environment variable for the running process.",
        arity: Fixed,
        params: ["name": STRING, "value": STRING],
        returns: [ERROR],
        func: set_env_variable,
    },
}

/// Names that the platform cannot store are reported as error values.
fn set_env_variable(_: &mut dyn Host, args: &[Value], line: usize) -> EvalResult<Value> {
    let name = args[0].as_str(line)?;
    let value = args[1].as_str(line)?;

    if name.is_empty() || name.contains(['=', '\0']) || value.contains('\0') {
        return Ok(Value::error(format!("setenv: invalid argument: {name:?}")));
    }

    // SAFETY: the interpreter runs on a single thread and never reads the
    // environment concurrently.
    unsafe {
        env::set_var(name, value);
    }

    Ok(Value::no_error())
}

#[cfg(test)]
mod tests {
    use super::*;

    struct NoHost;

    impl Host for NoHost {
        fn add_to_buffer(&mut self, _: &str) {}

        fn terminate(&mut self, _: u8) {}
    }

    #[test]
    fn invalid_names_become_error_values() {
        let result = set_env_variable(&mut NoHost, &[Value::from("A=B"), Value::from("x")], 1).unwrap();

        assert!(matches!(result, Value::Error(Some(_))));
    }

    #[test]
    fn variables_round_trip_through_the_environment() {
        let name = Value::from("DLITE_OS_TEST_VARIABLE");
        let set = set_env_variable(&mut NoHost, &[name.clone(), Value::from("on")], 1).unwrap();
        assert!(matches!(set, Value::Error(None)));

        let get = FUNCTIONS.iter().find(|f| f.name == "getEnvVariable").unwrap();
        assert_eq!((get.handler)(&mut NoHost, &[name], 1).unwrap().to_string(), "on");
    }
}
