//! Print the execution plan of a class declaration.
//!
//! Usage:
//!   matrix-plan <FILE> [--json]
//!
//! `FILE` is a JSON class declaration (name, producers, consumers, methods).
//! Every expanded cell is listed with the methods that run or are skipped in
//! it. Log output is controlled by `RUST_LOG`.

use std::path::PathBuf;
use std::process;

use tracing::{error, info};
use tracing_subscriber::EnvFilter;

use idmatrix_runner::{ClassDeclaration, Plan, RunnerResult};

struct Args {
    path: PathBuf,
    json: bool,
}

fn main() {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("idmatrix=info,warn"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();

    let args = match parse_args(std::env::args().skip(1)) {
        Some(args) => args,
        None => {
            eprintln!("Usage: matrix-plan <FILE> [--json]");
            process::exit(2);
        }
    };

    match run(&args) {
        Ok(output) => println!("{}", output),
        Err(e) => {
            error!(path = %args.path.display(), error = %e, "Planning failed");
            process::exit(1);
        }
    }
}

fn parse_args(args: impl Iterator<Item = String>) -> Option<Args> {
    let mut path = None;
    let mut json = false;

    for arg in args {
        match arg.as_str() {
            "--json" => json = true,
            "-h" | "--help" => return None,
            _ if path.is_none() => path = Some(PathBuf::from(arg)),
            _ => return None,
        }
    }

    path.map(|path| Args { path, json })
}

fn run(args: &Args) -> RunnerResult<String> {
    let declaration = ClassDeclaration::load(&args.path)?;
    let plan = Plan::build(&declaration)?;
    info!(
        class = %plan.class,
        cells = plan.cells.len(),
        methods = declaration.methods.len(),
        "Plan built"
    );

    Ok(if args.json {
        plan.to_json()
    } else {
        plan.render()
    })
}
