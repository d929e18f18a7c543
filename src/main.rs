use std::{io, path::Path, process::ExitCode};

use clap::Parser;
use dlite::{
    Script, init_tracing, interpreter::evaluator::function::registry::Registry, run_file,
};

/// dlite runs DLite scripts, a small scripting language with typed variables,
/// multi-value functions and file imports.
#[derive(Parser, Debug)]
#[command(version, about, long_about = None)]
struct Args {
    /// Treats CONTENTS as source code instead of a script path.
    #[arg(short, long)]
    eval: bool,

    /// Logs interpreter activity to stderr. `RUST_LOG` overrides the level.
    #[arg(short, long)]
    verbose: bool,

    /// Prints the value of the last statement after the script finishes.
    #[arg(short, long)]
    print_result: bool,

    /// Lists the standard library's functions and exits.
    #[arg(short, long)]
    list_functions: bool,

    /// A script path, or source code with `--eval`.
    #[arg(required_unless_present = "list_functions")]
    contents: Option<String>,
}

fn main() -> ExitCode {
    let args = Args::parse();
    init_tracing(args.verbose);

    let contents = match args.contents {
        Some(contents) if !args.list_functions => contents,
        _ => {
            print!("{}", Registry::standard());
            return ExitCode::SUCCESS;
        },
    };

    let outcome = if args.eval {
        Script::new(&contents).sink(Box::new(io::stdout()))
                              .run()
    } else {
        run_file(Path::new(&contents))
    };

    match outcome {
        Ok(outcome) => {
            if args.print_result {
                println!("{}", outcome.value);
            }
            ExitCode::from(outcome.exit_code.unwrap_or(0))
        },
        Err(e) => {
            eprintln!("{e}");
            ExitCode::FAILURE
        },
    }
}
