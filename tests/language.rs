use std::fs::{self};

use dlite::{
    Outcome, Script,
    error::{ParseError, RuntimeError, ScriptError, Stage},
    get_result,
    interpreter::value::core::Value,
};
use pretty_assertions::assert_eq;
use walkdir::WalkDir;

#[test]
fn script_fixtures_run() {
    let mut count = 0;

    for entry in
        WalkDir::new("tests/scripts").max_depth(1)
                                     .into_iter()
                                     .filter_map(Result::ok)
                                     .filter(|e| e.path().extension().is_some_and(|ext| ext == "dl"))
    {
        let path = entry.path();
        let source =
            fs::read_to_string(path).unwrap_or_else(|e| panic!("Failed to read {path:?}: {e}"));

        count += 1;
        if let Err(e) = Script::new(&source).path(path).run() {
            panic!("Script {path:?} failed:\n{source}\nError: {e}");
        }
    }

    assert!(count > 0, "No scripts found in tests/scripts");
}

fn run(src: &str) -> Outcome {
    get_result(src).unwrap_or_else(|e| panic!("Script failed: {e}\n{src}"))
}

fn assert_success(src: &str) {
    run(src);
}

fn assert_failure(src: &str) -> ScriptError {
    match get_result(src) {
        Ok(_) => panic!("Script succeeded but was expected to fail:\n{src}"),
        Err(e) => e,
    }
}

fn assert_output(src: &str, expected: &str) {
    assert_eq!(run(src).output, expected);
}

fn runtime_error(src: &str) -> RuntimeError {
    match assert_failure(src) {
        ScriptError::Evaluate(e) => e,
        other => panic!("expected a runtime error, got: {other}"),
    }
}

#[test]
fn compound_assignments() {
    assert_output("var x number = 0\nx += 5\nx *= 2\nprintf(\"%g\", x)", "10");
    assert_output("var x number = 9\nx -= 1\nx /= 4\nx **= 3\nx %= 5\nprintf(\"%g\", x)", "3");
    assert_output("var s string = \"a\"\ns += \"b\"\nprintf(\"%s\", s)", "ab");
}

#[test]
fn arithmetic_and_precedence() {
    assert_output("printf(\"%g\", 1 + 2 * 3 - 4 / 2)", "5");
    assert_output("printf(\"%g\", 2 ** 3 ** 2)", "512");
    assert_output("printf(\"%g\", 7 % 3)", "1");
    assert_output("printf(\"%g\", (1 + 2) * 3)", "9");
}

#[test]
fn division_and_modulo_by_zero_fail() {
    assert!(matches!(runtime_error("var x number = 1 / 0"), RuntimeError::DivByZero { line: 1 }));
    assert!(matches!(runtime_error("\nvar x number = 1 % 0"), RuntimeError::ModByZero { line: 2 }));
}

#[test]
fn constants_cannot_be_reassigned_at_any_depth() {
    assert!(matches!(runtime_error("const c number = 1\n{\n  {\n    c = 2\n  }\n}"),
                     RuntimeError::ReassignmentToConstant { .. }));
    assert!(matches!(runtime_error("const c number = 1\nc += 1"),
                     RuntimeError::ReassignmentToConstant { .. }));
}

#[test]
fn declarations_are_type_checked() {
    assert!(matches!(runtime_error("var a number = \"x\""), RuntimeError::TypeMismatch { .. }));
    assert!(matches!(runtime_error("var a []number = [1, \"x\"]"),
                     RuntimeError::TypeMismatch { .. }));
    assert_success("var a any = 1\na = \"text\"");
    assert_success("var a []string = [\"x\", \"y\"]");
}

#[test]
fn inner_blocks_shadow_outer_bindings() {
    assert_output("var x number = 1\n{\n  var x string = \"inner\"\n  printf(\"%v \", x)\n  x = \"changed\"\n}\nprintf(\"%v\", x)",
                  "inner 1");
}

#[test]
fn indexing_reads_and_writes() {
    assert_output("var grid [][]number = [[1, 2], [3, 4]]\ngrid[1][0] = 9\nprintf(\"%v\", grid)",
                  "[[1, 2], [9, 4]]");
    assert!(matches!(runtime_error("var a []number = [1, 2]\na[2]"),
                     RuntimeError::ArrayIndexOutOfBounds { .. }));
    assert!(matches!(runtime_error("var a []number = [1, 2]\na[-1] = 3"),
                     RuntimeError::ArrayIndexOutOfBounds { .. }));
}

#[test]
fn arrays_concatenate_with_plus() {
    assert_output("printf(\"%v\", [1, 2] + [3])", "[1, 2, 3]");
    assert!(matches!(runtime_error("var a []any = [1] + [\"x\"]"), RuntimeError::TypeMismatch { .. }));
}

#[test]
fn range_loops_are_inclusive() {
    assert_output("var n number = 0\nfor var i from 0 to 2 { n += 1 }\nprintf(\"%g\", n)", "3");
    assert_output("var n number = 0\nfor var i to 3 {\n  n += i\n}\nprintf(\"%g\", n)", "6");
}

#[test]
fn conditional_and_infinite_loops() {
    assert_output("var n number = 0\nfor n < 5 { n += 2 }\nprintf(\"%g\", n)", "6");
    assert_output("var n number = 0\nfor var i < 4 { n += i }\nprintf(\"%g\", n)", "6");
    assert_output("var n number = 0\nfor {\n  n += 1\n  if n == 3 { break }\n}\nprintf(\"%g\", n)",
                  "3");
}

#[test]
fn break_and_continue_address_outer_loops() {
    let src = r#"var log string = ""
for var i from 0 to 2 {
  for var j from 0 to 2 {
    if j == 1 { continue 2 }
    log += sprintf("%g%g ", i, j)
  }
}
printf("%s", log)"#;
    assert_output(src, "00 10 20 ");

    let src = r#"var count number = 0
for var i from 0 to 2 {
  for {
    count += 1
    break 2
  }
}
printf("%g", count)"#;
    assert_output(src, "1");
}

#[test]
fn else_if_chains() {
    let src = r#"func grade(score number) string {
  if score >= 90 {
    return "A"
  } else if score >= 80 {
    return "B"
  }
  else {
    return "C"
  }
}
printf("%s%s%s", grade(95), grade(85), grade(10))"#;
    assert_output(src, "ABC");
}

#[test]
fn functions_return_multiple_values_as_tuples() {
    assert_output("func f() number, string { return 1, \"a\" }\nprintf(\"%v\", f())", "(1, a)");
    assert!(matches!(runtime_error("func f() number, string { return 1 }\nf()"),
                     RuntimeError::FunctionReturnCount { expected: 2, found: 1, .. }));
    assert!(matches!(runtime_error("func f() (number) { return 1, 2 }\nf()"),
                     RuntimeError::FunctionReturnCount { expected: 1, found: 2, .. }));
    assert_output("func f() (number, error) { return 1, null }\nprintf(\"%v\", f())", "(1, null)");
}

#[test]
fn recursion_works() {
    let src = r#"func fib(n number) number {
  if n < 2 {
    return n
  }
  return fib(n - 1) + fib(n - 2)
}
printf("%g", fib(15))"#;
    assert_output(src, "610");
}

#[test]
fn calls_check_arguments() {
    assert!(matches!(runtime_error("func f(a number) { }\nf()"),
                     RuntimeError::FunctionNumArgs { expected: 1, found: 0, .. }));
    assert!(matches!(runtime_error("func f(a number) { }\nf(\"x\")"),
                     RuntimeError::FunctionArgType { position: 1, .. }));
    assert!(matches!(runtime_error("strings.toUpper(1)"), RuntimeError::FunctionArgType { .. }));
    assert_eq!(runtime_error("printf()").to_string(),
               "Error on line 1: 'printf()' expects 1 argument(s), but got 0");
}

#[test]
fn spread_arguments_expand_arrays_and_tuples() {
    let src = "func add(a number, b number) number { return a + b }\n\
               func pair() number, number { return 3, 4 }\n\
               var xs []number = [1, 2]\n\
               printf(\"%g %g\", add(...xs), add(...pair()))";
    assert_output(src, "3 7");
    assert!(matches!(runtime_error("func f(a number) { }\nf(...1)"), RuntimeError::TypeExpected { .. }));
}

#[test]
fn equality_rules() {
    let src = "func p() number, number { return 1, 2 }\n\
               printf(\"%t %t %t %t\", p() == p(), p == p, 1 == \"1\", null == null)";
    assert_output(src, "true false false true");
}

#[test]
fn namespaces_resolve_or_fail() {
    assert!(matches!(runtime_error("nope.f()"), RuntimeError::UndefinedNamespace { .. }));
    assert!(matches!(runtime_error("math.nope()"), RuntimeError::UndefinedFunction { .. }));
    assert!(matches!(runtime_error("missing()"), RuntimeError::UndefinedFunction { .. }));
    assert!(matches!(runtime_error("printf(\"%v\", y)"), RuntimeError::UndefinedIdentifier { .. }));
}

#[test]
fn printf_writes_output_and_returns_null() {
    let outcome = run("printf(\"%g + %g\", 1, 2)");

    assert_eq!(outcome.output, "1 + 2");
    assert!(matches!(outcome.value, Value::Null));
}

#[test]
fn standard_library_packages() {
    assert_output("printf(\"%s\", strings.toUpper(\"abc\"))", "ABC");
    assert_output("printf(\"%v\", arrays.join([1, 2, 3], \"-\"))", "1-2-3");
    assert_output("printf(\"%v\", math.max(1, 5, 3))", "(5, null)");
    assert_output("printf(\"%.2f\", math.PI)", "3.14");
    assert_output("printf(\"%v\", errors.new(\"boom\"))", "boom");
    assert_output("dump([1, \"a\"])", "array[2]:\n  [0]: 1\n  [1]: \"a\"\n");
}

#[test]
fn exit_stops_the_program_with_a_code() {
    let outcome = run("printf(\"a\")\nexit(4)\nprintf(\"b\")");

    assert_eq!(outcome.output, "a");
    assert_eq!(outcome.exit_code, Some(4));

    let outcome = run("for var i from 0 to 10 {\n  printf(\"%g\", i)\n  if i == 2 { exit() }\n}");
    assert_eq!(outcome.output, "012");
    assert_eq!(outcome.exit_code, Some(0));
}

#[test]
fn stray_break_ends_the_program_quietly() {
    let outcome = run("printf(\"a\")\nbreak\nprintf(\"b\")");

    assert_eq!(outcome.output, "a");
    assert_eq!(outcome.exit_code, None);
}

#[test]
fn errors_carry_their_stage() {
    let err = assert_failure("var a number = 1 var b number = 2");
    assert_eq!(err.stage(), Stage::Parse);
    assert!(matches!(err, ScriptError::Parse(ParseError::UnexpectedToken { .. })));

    let err = assert_failure("var a number = 1\nvar s string = \"open");
    assert_eq!(err.stage(), Stage::Tokenize);

    let err = assert_failure("1 / 0");
    assert_eq!(err.to_string(), "evaluate: Error on line 1: division by zero");
}

#[test]
fn invalid_assignment_targets_fail_to_parse() {
    assert!(matches!(assert_failure("f() = 1"),
                     ScriptError::Parse(ParseError::InvalidAssignmentTarget { .. })));
    assert!(matches!(assert_failure("const c number"),
                     ScriptError::Parse(ParseError::ConstantWithoutValue { .. })));
    assert!(matches!(assert_failure("for { break 0 }"),
                     ScriptError::Parse(ParseError::BreakCountLessThanOne { .. })));
}

#[test]
fn index_writes_without_an_owner_keep_the_source() {
    assert_output("var a []number = [1, 2]\n\
                   func f() []number { return a }\n\
                   f()[0] = 5\n\
                   printf(\"%v\", a)",
                  "[1, 2]");
}

#[test]
fn range_bounds_must_be_numbers() {
    assert!(matches!(runtime_error("var n number = 0\nfor from \"a\" to 2 { n += 1 }"),
                     RuntimeError::TypeExpected { .. }));
    assert!(matches!(runtime_error("for var i from \"a\" to 2 {}"),
                     RuntimeError::TypeExpected { .. }));
}

#[test]
fn imports_share_functions_and_variables() {
    let dir = tempfile::tempdir().unwrap();
    fs::create_dir(dir.path().join("lib")).unwrap();
    fs::write(dir.path().join("lib/util.dl"),
              "func double(x number) number { return x * 2 }\nvar greeting string = \"hi\"\n").unwrap();

    let main = dir.path().join("main.dl");
    let outcome = Script::new("import \"lib/util.dl\"\nprintf(\"%g %s\", util.double(4), util.greeting)")
        .path(&main)
        .run()
        .unwrap();
    assert_eq!(outcome.output, "8 hi");

    let outcome = Script::new("import \"lib/util.dl\" as _\nprintf(\"%g %s\", double(2), greeting)")
        .path(&main)
        .run()
        .unwrap();
    assert_eq!(outcome.output, "4 hi");

    let outcome = Script::new("import \"lib/util.dl\" as u\nprintf(\"%g\", u.double(5))")
        .path(&main)
        .run()
        .unwrap();
    assert_eq!(outcome.output, "10");
}

#[test]
fn failed_imports_name_the_file_and_stage() {
    let dir = tempfile::tempdir().unwrap();
    fs::write(dir.path().join("broken.dl"), "var x number = \n").unwrap();
    let main = dir.path().join("main.dl");

    let err = Script::new("import \"broken.dl\"").path(&main).run().unwrap_err();
    match err {
        ScriptError::Evaluate(RuntimeError::Import { path, source, .. }) => {
            assert_eq!(path, "broken.dl");
            assert_eq!(source.stage(), Stage::Parse);
        },
        other => panic!("expected an import error, got {other}"),
    }

    let err = Script::new("import \"missing.dl\"").path(&main).run().unwrap_err();
    assert!(matches!(err, ScriptError::Evaluate(RuntimeError::Import { ref source, .. })
                          if source.stage() == Stage::Read));
}

#[test]
fn io_functions_report_errors_as_values() {
    let dir = tempfile::tempdir().unwrap();
    let file = dir.path().join("notes.txt");
    let file = file.display().to_string().replace('\\', "/");

    let src = format!(
        "var path string = \"{file}\"\n\
         printf(\"%v|\", io.exists(path))\n\
         printf(\"%v|\", io.writeFile(path, \"x\"))\n\
         printf(\"%v|\", io.createFile(path))\n\
         printf(\"%v|\", io.writeFile(path, \"hello\"))\n\
         printf(\"%v|\", io.appendFile(path, \" world\"))\n\
         printf(\"%v|\", io.readFileString(path))\n\
         printf(\"%v\", io.deleteFile(path))"
    );

    assert_output(&src,
                  &format!("false|file {file} does not exist|null|null|null|(hello world, null)|null"));
}
