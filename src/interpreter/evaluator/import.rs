use std::{
    fs,
    path::{Path, PathBuf},
    rc::Rc,
};

use crate::{
    error::{RuntimeError, ScriptError},
    interpreter::{
        evaluator::{
            control::EvaluationResult,
            core::{EvalResult, Evaluator},
            function::registry::Host,
        },
        value::core::Value,
    },
    parse,
};

/// Alias that merges an import into the importing namespace.
const MERGE_ALIAS: &str = "_";

impl Evaluator {
    /// Evaluates `import "path" [as alias]`.
    ///
    /// Relative paths resolve against the directory of the file being
    /// evaluated; absolute paths are used as they are. The file is read,
    /// tokenized, parsed and run by a child evaluator that shares this
    /// evaluator's registry and writes into its output buffer.
    ///
    /// The namespace is the alias, or the file name without its extension.
    /// The child's top-level functions land in that namespace and its
    /// top-level variables become `namespace.name`. The alias `_` merges both
    /// into the importing program unqualified.
    ///
    /// Any failure is reported as `RuntimeError::Import`, carrying the import
    /// path and the failing stage.
    pub(crate) fn eval_import(&mut self,
                              path: &str,
                              alias: Option<&str>,
                              line: usize)
                              -> EvalResult<EvaluationResult> {
        let resolved = self.resolve_import(path);
        let namespace = alias.map_or_else(|| namespace_of(path), str::to_string);

        tracing::debug!(path = %resolved.display(), namespace = %namespace, "importing file");

        let wrap = |source: ScriptError| RuntimeError::Import { path: path.to_string(),
                                                                source: Box::new(source),
                                                                line };

        let source = fs::read_to_string(&resolved).map_err(|source| {
                                                      wrap(ScriptError::Read { path: path.to_string(),
                                                                               source })
                                                  })?;
        let program = parse(&source).map_err(wrap)?;

        let mut child = Self::with_registry(Rc::clone(&self.registry));
        child.set_current_file(&resolved);

        let evaluated = child.evaluate(&program);
        self.absorb_output(&mut child);
        evaluated.map_err(|err| wrap(ScriptError::Evaluate(err)))?;

        if let Some(code) = child.exit_code() {
            self.terminate(code);
        }

        self.merge_import(child, &namespace);

        Ok(EvaluationResult::regular(Value::Null))
    }

    fn resolve_import(&self, path: &str) -> PathBuf {
        let path = Path::new(path);
        if path.is_absolute() {
            return path.to_path_buf();
        }

        match self.current_file.as_deref().and_then(Path::parent) {
            Some(directory) => directory.join(path),
            None => path.to_path_buf(),
        }
    }

    fn merge_import(&mut self, child: Self, namespace: &str) {
        let Self { scopes, functions, .. } = child;

        if namespace == MERGE_ALIAS {
            self.functions.extend(functions);
            for (name, binding) in scopes.outer() {
                self.scopes.insert_outer(name.clone(), binding.clone());
            }
            return;
        }

        self.namespace_functions
            .entry(namespace.to_string())
            .or_default()
            .extend(functions);

        for (name, binding) in scopes.outer() {
            self.scopes
                .insert_outer(format!("{namespace}.{name}"), binding.clone());
        }
    }
}

/// The file name without directories or extension.
fn namespace_of(path: &str) -> String {
    Path::new(path).file_stem()
                   .map(|stem| stem.to_string_lossy().into_owned())
                   .unwrap_or_default()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn namespaces_come_from_the_file_stem() {
        assert_eq!(namespace_of("lib/math_utils.dl"), "math_utils");
        assert_eq!(namespace_of("/abs/path/helpers"), "helpers");
    }

    #[test]
    fn relative_imports_follow_the_current_file() {
        let mut evaluator = Evaluator::new();
        assert_eq!(evaluator.resolve_import("a.dl"), PathBuf::from("a.dl"));

        evaluator.set_current_file("/scripts/main.dl");
        assert_eq!(evaluator.resolve_import("lib/a.dl"), PathBuf::from("/scripts/lib/a.dl"));
        assert_eq!(evaluator.resolve_import("/other/a.dl"), PathBuf::from("/other/a.dl"));
    }
}
