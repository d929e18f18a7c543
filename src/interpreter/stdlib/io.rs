use std::{fs, io::Write, path::Path};

use crate::interpreter::{
    evaluator::{
        core::EvalResult,
        function::registry::{BOOL, ERROR, Host, STRING, stdlib_functions},
    },
    stdlib::{failure, success},
    value::core::Value,
};

stdlib_functions! {
    package: "io";
    "readFileString" => {
        doc: "Reads the content of a file as a string.",
        arity: Fixed,
        params: ["path": STRING],
        returns: [STRING, ERROR],
        func: read_file_string,
    },
    "writeFile" => {
        doc: "Replaces the content of an existing file.",
        arity: Fixed,
        params: ["path": STRING, "string": STRING],
        returns: [ERROR],
        func: write_file,
    },
    "appendFile" => {
        doc: "Appends data to an existing file.",
        arity: Fixed,
        params: ["path": STRING, "string": STRING],
        returns: [ERROR],
        func: append_file,
    },
    "createFile" => {
        doc: "Creates an empty file. Fails if the file already exists.",
        arity: Fixed,
        params: ["path": STRING],
        returns: [ERROR],
        func: create_file,
    },
    "deleteFile" => {
        doc: "Deletes a file. Fails if the file does not exist.",
        arity: Fixed,
        params: ["path": STRING],
        returns: [ERROR],
        func: delete_file,
    },
    "exists" => {
        doc: "Returns whether a file or directory exists.",
        arity: Fixed,
        params: ["path": STRING],
        returns: [BOOL],
        func: |_, args, line| Ok(Value::Bool(Path::new(args[0].as_str(line)?).exists())),
    },
    "createDir" => {
        doc: "Creates a directory and any missing parents. Fails if it already exists.",
        arity: Fixed,
        params: ["path": STRING],
        returns: [ERROR],
        func: create_dir,
    },
    "deleteDir" => {
        doc: "Deletes a directory and everything in it. Fails if it does not exist.",
        arity: Fixed,
        params: ["path": STRING],
        returns: [ERROR],
        func: delete_dir,
    },
}

/// Maps an I/O result to an error value.
fn outcome(result: std::io::Result<()>) -> Value {
    match result {
        Ok(()) => Value::no_error(),
        Err(err) => Value::error(err.to_string()),
    }
}

fn read_file_string(_: &mut dyn Host, args: &[Value], line: usize) -> EvalResult<Value> {
    let path = args[0].as_str(line)?;

    Ok(match fs::read_to_string(path) {
        Ok(content) => success(Value::String(content)),
        Err(err) => failure(Value::from(""), err.to_string()),
    })
}

fn write_file(_: &mut dyn Host, args: &[Value], line: usize) -> EvalResult<Value> {
    let path = args[0].as_str(line)?;
    let content = args[1].as_str(line)?;

    if !Path::new(path).exists() {
        return Ok(Value::error(format!("file {path} does not exist")));
    }

    Ok(outcome(fs::write(path, content)))
}

fn append_file(_: &mut dyn Host, args: &[Value], line: usize) -> EvalResult<Value> {
    let path = args[0].as_str(line)?;
    let content = args[1].as_str(line)?;

    if !Path::new(path).exists() {
        return Ok(Value::error(format!("file {path} does not exist")));
    }

    Ok(outcome(fs::OpenOptions::new().append(true)
                                     .open(path)
                                     .and_then(|mut file| file.write_all(content.as_bytes()))))
}

fn create_file(_: &mut dyn Host, args: &[Value], line: usize) -> EvalResult<Value> {
    let path = args[0].as_str(line)?;

    if Path::new(path).exists() {
        return Ok(Value::error(format!("file {path} already exists")));
    }

    Ok(outcome(fs::write(path, "")))
}

fn delete_file(_: &mut dyn Host, args: &[Value], line: usize) -> EvalResult<Value> {
    let path = args[0].as_str(line)?;

    if !Path::new(path).exists() {
        return Ok(Value::error(format!("file {path} does not exist")));
    }

    Ok(outcome(fs::remove_file(path)))
}

fn create_dir(_: &mut dyn Host, args: &[Value], line: usize) -> EvalResult<Value> {
    let path = args[0].as_str(line)?;

    if Path::new(path).exists() {
        return Ok(Value::error(format!("folder {path} already exists")));
    }

    Ok(outcome(fs::create_dir_all(path)))
}

fn delete_dir(_: &mut dyn Host, args: &[Value], line: usize) -> EvalResult<Value> {
    let path = args[0].as_str(line)?;

    if !Path::new(path).exists() {
        return Ok(Value::error(format!("folder {path} does not exist")));
    }

    Ok(outcome(fs::remove_dir_all(path)))
}

#[cfg(test)]
mod tests {
    use super::*;

    struct NoHost;

    impl Host for NoHost {
        fn add_to_buffer(&mut self, _: &str) {}

        fn terminate(&mut self, _: u8) {}
    }

    fn path_value(path: &Path) -> Value {
        Value::String(path.to_string_lossy().into_owned())
    }

    #[test]
    fn files_are_created_written_appended_and_deleted() {
        let dir = tempfile::tempdir().unwrap();
        let file = path_value(&dir.path().join("notes.txt"));

        let written = write_file(&mut NoHost, &[file.clone(), Value::from("a")], 1).unwrap();
        assert!(written.to_string().ends_with("does not exist"));

        assert!(matches!(create_file(&mut NoHost, &[file.clone()], 1).unwrap(), Value::Error(None)));
        assert!(matches!(create_file(&mut NoHost, &[file.clone()], 1).unwrap(), Value::Error(Some(_))));

        write_file(&mut NoHost, &[file.clone(), Value::from("a")], 1).unwrap();
        append_file(&mut NoHost, &[file.clone(), Value::from("b")], 1).unwrap();
        assert_eq!(read_file_string(&mut NoHost, &[file.clone()], 1).unwrap().to_string(),
                   "(ab, null)");

        assert!(matches!(delete_file(&mut NoHost, &[file.clone()], 1).unwrap(), Value::Error(None)));
        assert!(matches!(delete_file(&mut NoHost, &[file], 1).unwrap(), Value::Error(Some(_))));
    }

    #[test]
    fn missing_files_read_as_empty_with_an_error() {
        let dir = tempfile::tempdir().unwrap();
        let missing = path_value(&dir.path().join("missing.txt"));

        let Value::Tuple(items) = read_file_string(&mut NoHost, &[missing], 1).unwrap() else {
            panic!("expected a tuple");
        };
        assert_eq!(items[0].to_string(), "");
        assert!(matches!(items[1], Value::Error(Some(_))));
    }

    #[test]
    fn directories_are_created_with_parents_and_removed_recursively() {
        let dir = tempfile::tempdir().unwrap();
        let nested = dir.path().join("a/b");
        let top = path_value(&dir.path().join("a"));

        assert!(matches!(create_dir(&mut NoHost, &[path_value(&nested)], 1).unwrap(), Value::Error(None)));
        assert!(nested.is_dir());

        let again = create_dir(&mut NoHost, &[path_value(&nested)], 1).unwrap();
        assert!(again.to_string().ends_with("already exists"));

        assert!(matches!(delete_dir(&mut NoHost, &[top.clone()], 1).unwrap(), Value::Error(None)));
        assert!(matches!(delete_dir(&mut NoHost, &[top], 1).unwrap(), Value::Error(Some(_))));
    }
}
