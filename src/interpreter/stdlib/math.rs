use ordered_float::OrderedFloat;

use crate::interpreter::{
    evaluator::{
        core::EvalResult,
        function::registry::{ERROR, Host, NUMBER, stdlib_functions},
    },
    stdlib::{failure, success},
    value::core::Value,
};

stdlib_functions! {
    package: "math";
    "abs" => {
        doc: "Returns the absolute value of a number.",
        arity: Fixed,
        params: ["x": NUMBER],
        returns: [NUMBER],
        func: |_, args, line| unary(args, line, f64::abs),
    },
    "sin" => {
        doc: "Returns the sine of an angle in radians.",
        arity: Fixed,
        params: ["x": NUMBER],
        returns: [NUMBER],
        func: |_, args, line| unary(args, line, f64::sin),
    },
    "cos" => {
        doc: "Returns the cosine of an angle in radians.",
        arity: Fixed,
        params: ["x": NUMBER],
        returns: [NUMBER],
        func: |_, args, line| unary(args, line, f64::cos),
    },
    "tan" => {
        doc: "Returns the tangent of an angle in radians.",
        arity: Fixed,
        params: ["x": NUMBER],
        returns: [NUMBER],
        func: |_, args, line| unary(args, line, f64::tan),
    },
    "sqrt" => {
        doc: "Returns the square root of a number.",
        arity: Fixed,
        params: ["x": NUMBER],
        returns: [NUMBER],
        func: |_, args, line| unary(args, line, f64::sqrt),
    },
    "round" => {
        doc: "Rounds a number to the nearest integer, halves away from zero.",
        arity: Fixed,
        params: ["x": NUMBER],
        returns: [NUMBER],
        func: |_, args, line| unary(args, line, f64::round),
    },
    "floor" => {
        doc: "Returns the greatest integer less than or equal to a number.",
        arity: Fixed,
        params: ["x": NUMBER],
        returns: [NUMBER],
        func: |_, args, line| unary(args, line, f64::floor),
    },
    "ceil" => {
        doc: "Returns the least integer greater than or equal to a number.",
        arity: Fixed,
        params: ["x": NUMBER],
        returns: [NUMBER],
        func: |_, args, line| unary(args, line, f64::ceil),
    },
    "log" => {
        doc: "Returns the natural logarithm of a number.",
        arity: Fixed,
        params: ["x": NUMBER],
        returns: [NUMBER],
        func: |_, args, line| unary(args, line, f64::ln),
    },
    "log10" => {
        doc: "Returns the base 10 logarithm of a number.",
        arity: Fixed,
        params: ["x": NUMBER],
        returns: [NUMBER],
        func: |_, args, line| unary(args, line, f64::log10),
    },
    "sign" => {
        doc: "Returns 1 for positive numbers, -1 for negative numbers and 0 for zero.",
        arity: Fixed,
        params: ["x": NUMBER],
        returns: [NUMBER],
        func: |_, args, line| unary(args, line, sign),
    },
    "min" => {
        doc: "Returns the smallest of two or more numbers.",
        arity: Variadic,
        params: ["...nums": NUMBER],
        returns: [NUMBER, ERROR],
        func: |_, args, line| extremum("min", args, line, Iterator::min),
    },
    "max" => {
        doc: "Returns the largest of two or more numbers.",
        arity: Variadic,
        params: ["...nums": NUMBER],
        returns: [NUMBER, ERROR],
        func: |_, args, line| extremum("max", args, line, Iterator::max),
    },
    "pow" => {
        doc: "Returns base raised to the power of exponent.",
        arity: Fixed,
        params: ["base": NUMBER, "exponent": NUMBER],
        returns: [NUMBER],
        func: pow,
    },
    "mod" => {
        doc: "Returns the remainder of base divided by divisor.",
        arity: Fixed,
        params: ["base": NUMBER, "divisor": NUMBER],
        returns: [NUMBER, ERROR],
        func: modulo,
    },
}

fn unary(args: &[Value], line: usize, op: fn(f64) -> f64) -> EvalResult<Value> {
    Ok(Value::Number(op(args[0].as_number(line)?)))
}

fn sign(x: f64) -> f64 {
    if x > 0.0 {
        1.0
    } else if x < 0.0 {
        -1.0
    } else {
        0.0
    }
}

type Pick = fn(std::vec::IntoIter<OrderedFloat<f64>>) -> Option<OrderedFloat<f64>>;

/// Shared body of `min` and `max`.
fn extremum(name: &str, args: &[Value], line: usize, pick: Pick) -> EvalResult<Value> {
    if args.len() < 2 {
        return Ok(failure(Value::Null,
                          format!("{name} requires at least 2 arguments, got {}", args.len())));
    }

    let numbers = args.iter()
                      .map(|arg| arg.as_number(line).map(OrderedFloat))
                      .collect::<EvalResult<Vec<_>>>()?;

    Ok(pick(numbers.into_iter()).map_or(Value::Null, |n| success(Value::Number(n.0))))
}

fn pow(_: &mut dyn Host, args: &[Value], line: usize) -> EvalResult<Value> {
    let base = args[0].as_number(line)?;
    let exponent = args[1].as_number(line)?;
    Ok(Value::Number(base.powf(exponent)))
}

fn modulo(_: &mut dyn Host, args: &[Value], line: usize) -> EvalResult<Value> {
    let base = args[0].as_number(line)?;
    let divisor = args[1].as_number(line)?;

    let remainder = base % divisor;
    if remainder.is_nan() {
        return Ok(failure(Value::Null, "cannot mod by zero"));
    }

    Ok(success(Value::Number(remainder)))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn call(name: &str, args: &[Value]) -> Value {
        let function = FUNCTIONS.iter().find(|f| f.name == name).unwrap();
        let mut host = NoHost;
        (function.handler)(&mut host, args, 1).unwrap()
    }

    struct NoHost;

    impl Host for NoHost {
        fn add_to_buffer(&mut self, _: &str) {}

        fn terminate(&mut self, _: u8) {}
    }

    fn numbers(values: &[f64]) -> Vec<Value> {
        values.iter().copied().map(Value::Number).collect()
    }

    #[test]
    fn min_and_max_need_two_numbers() {
        assert_eq!(call("min", &numbers(&[3.0, -1.0, 2.0])).to_string(), "(-1, null)");
        assert_eq!(call("max", &numbers(&[3.0, -1.0, 2.0])).to_string(), "(3, null)");
        assert_eq!(call("min", &numbers(&[3.0])).to_string(),
                   "(null, min requires at least 2 arguments, got 1)");
    }

    #[test]
    fn rounding_goes_away_from_zero() {
        assert_eq!(call("round", &numbers(&[2.5])).to_string(), "3");
        assert_eq!(call("round", &numbers(&[-2.5])).to_string(), "-3");
        assert_eq!(call("sign", &numbers(&[-0.2])).to_string(), "-1");
        assert_eq!(call("sign", &numbers(&[0.0])).to_string(), "0");
    }

    #[test]
    fn mod_reports_a_zero_divisor() {
        assert_eq!(call("mod", &numbers(&[7.0, 3.0])).to_string(), "(1, null)");
        assert_eq!(call("mod", &numbers(&[7.0, 0.0])).to_string(), "(null, cannot mod by zero)");
        assert_eq!(call("pow", &numbers(&[2.0, 10.0])).to_string(), "1024");
    }
}
