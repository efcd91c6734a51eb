//! Bibtable CLI entry point.

use std::env;
use std::path::PathBuf;
use std::process::ExitCode;

use bibtable_runtime::{Pipeline, RunConfig, snapshot};
use bibtable_storage::{NamePart, Person, WILDCARD};
use tracing_subscriber::EnvFilter;
use tracing_subscriber::prelude::*;

/// A subcommand and its operands.
#[derive(Debug, PartialEq, Eq)]
enum Command {
    /// Parse a database and report skipped records.
    Check { file: PathBuf },
    /// Print the resolved citation list.
    Cite {
        file: PathBuf,
        keys: Vec<String>,
        min_crossrefs: Option<usize>,
    },
    /// Print the five parts of a name.
    Name { name: String },
    /// Parse a database and save a table snapshot.
    Snapshot { file: PathBuf, out: PathBuf },
}

/// CLI configuration parsed from arguments.
#[derive(Debug, Default)]
struct CliConfig {
    command: Option<Command>,
    verbose: bool,
    show_help: bool,
    show_version: bool,
}

fn main() -> ExitCode {
    let args: Vec<String> = env::args().collect();

    let config = match parse_args(&args) {
        Ok(config) => config,
        Err(e) => {
            eprintln!("\x1b[31mError: {e}\x1b[0m");
            eprintln!("Try 'bibtable --help' for usage.");
            return ExitCode::FAILURE;
        }
    };
    init_logging(config.verbose);

    match run(config) {
        Ok(code) => code,
        Err(e) => {
            eprintln!("\x1b[31mError: {e}\x1b[0m");
            ExitCode::FAILURE
        }
    }
}

/// Logs to stderr, filtered by `RUST_LOG` (default `warn`).
fn init_logging(verbose: bool) {
    let filter = if verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"))
    };
    tracing_subscriber::registry()
        .with(filter)
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();
}

fn parse_args(args: &[String]) -> Result<CliConfig, String> {
    let mut config = CliConfig::default();
    let mut operands = Vec::new();
    let mut min_crossrefs = None;

    let mut i = 1;
    while i < args.len() {
        match args[i].as_str() {
            "-h" | "--help" => config.show_help = true,
            "-V" | "--version" => config.show_version = true,
            "-v" | "--verbose" => config.verbose = true,
            "--min-crossrefs" => {
                i += 1;
                let value = args.get(i).ok_or("--min-crossrefs requires a value")?;
                min_crossrefs = Some(
                    value
                        .parse()
                        .map_err(|_| format!("invalid --min-crossrefs value: {value}"))?,
                );
            }
            "-" => operands.push(args[i].clone()),
            arg if arg.starts_with('-') => return Err(format!("unknown option: {arg}")),
            _ => operands.push(args[i].clone()),
        }
        i += 1;
    }

    if config.show_help || config.show_version {
        return Ok(config);
    }

    let mut operands = operands.into_iter();
    let Some(name) = operands.next() else {
        config.show_help = true;
        return Ok(config);
    };
    let rest: Vec<String> = operands.collect();
    if min_crossrefs.is_some() && name != "cite" {
        return Err("--min-crossrefs only applies to cite".into());
    }

    config.command = Some(match (name.as_str(), rest.as_slice()) {
        ("check", [file]) => Command::Check { file: file.into() },
        ("cite", [file, keys @ ..]) => Command::Cite {
            file: file.into(),
            keys: keys.to_vec(),
            min_crossrefs,
        },
        ("name", [name]) => Command::Name { name: name.clone() },
        ("snapshot", [file, out]) => Command::Snapshot {
            file: file.into(),
            out: out.into(),
        },
        ("check" | "cite" | "name" | "snapshot", _) => {
            return Err(format!("wrong number of arguments for {name}"));
        }
        _ => return Err(format!("unknown command: {name}")),
    });
    Ok(config)
}

fn run(config: CliConfig) -> Result<ExitCode, Box<dyn std::error::Error>> {
    if config.show_help {
        print_help();
        return Ok(ExitCode::SUCCESS);
    }
    if config.show_version {
        println!("bibtable {}", env!("CARGO_PKG_VERSION"));
        return Ok(ExitCode::SUCCESS);
    }

    match config.command {
        Some(Command::Check { file }) => {
            let (table, diagnostics) = Pipeline::default().parse_file(&file)?;
            for diagnostic in &diagnostics {
                println!("{}", diagnostic.render());
            }
            println!(
                "{}: {} entries, {} skipped records",
                file.display(),
                table.len(),
                diagnostics.len()
            );
            Ok(if diagnostics.is_empty() {
                ExitCode::SUCCESS
            } else {
                ExitCode::FAILURE
            })
        }
        Some(Command::Cite {
            file,
            keys,
            min_crossrefs,
        }) => {
            let mut run_config = RunConfig::default();
            if let Some(min) = min_crossrefs {
                run_config = run_config.with_min_crossrefs(min);
            }
            let pipeline = Pipeline::new(run_config);
            let (table, _) = pipeline.parse_file(&file)?;
            let keys = if keys.is_empty() {
                vec![WILDCARD.to_string()]
            } else {
                keys
            };
            for key in pipeline.resolve(&table, &keys) {
                println!("{key}");
            }
            Ok(ExitCode::SUCCESS)
        }
        Some(Command::Name { name }) => {
            let person = Person::parse(&name)?;
            for (label, part) in [
                ("first", NamePart::First),
                ("middle", NamePart::Middle),
                ("prelast", NamePart::Prelast),
                ("last", NamePart::Last),
                ("lineage", NamePart::Lineage),
            ] {
                println!("{label:8} {}", person.part(part).join(" "));
            }
            Ok(ExitCode::SUCCESS)
        }
        Some(Command::Snapshot { file, out }) => {
            let (table, diagnostics) = Pipeline::default().parse_file(&file)?;
            snapshot::save_to_file(&table, &out)?;
            println!(
                "wrote {} entries to {} ({} skipped records)",
                table.len(),
                out.display(),
                diagnostics.len()
            );
            Ok(ExitCode::SUCCESS)
        }
        None => {
            print_help();
            Ok(ExitCode::SUCCESS)
        }
    }
}

fn print_help() {
    println!(
        r"bibtable - bibliography database tools

USAGE:
    bibtable [OPTIONS] <COMMAND>

COMMANDS:
    check FILE                            Parse FILE and report skipped records
    cite FILE [KEY...] [--min-crossrefs N]
                                          Print resolved citations (default: *)
    name STRING                           Print the parts of a personal name
    snapshot FILE OUT                     Save the parsed table of FILE to OUT

OPTIONS:
    -h, --help       Print this help message
    -V, --version    Print version information
    -v, --verbose    Log at debug level (otherwise RUST_LOG, default warn)
"
    );
}
