use crate::interpreter::{
    evaluator::function::registry::{ERROR, STRING, stdlib_functions},
    value::core::Value,
};

stdlib_functions! {
    package: "errors";
    "new" => {
        doc: "Creates an error value carrying a message.",
        arity: Fixed,
        params: ["message": STRING],
        returns: [ERROR],
        func: |_, args, line| Ok(Value::error(args[0].as_str(line)?)),
    },
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::interpreter::evaluator::function::registry::Host;

    struct NoHost;

    impl Host for NoHost {
        fn add_to_buffer(&mut self, _: &str) {}

        fn terminate(&mut self, _: u8) {}
    }

    #[test]
    fn new_wraps_the_message() {
        let error = (FUNCTIONS[0].handler)(&mut NoHost, &[Value::from("boom")], 1).unwrap();

        assert!(matches!(&error, Value::Error(Some(message)) if message == "boom"));
        assert_eq!(error.to_string(), "boom");
    }
}
