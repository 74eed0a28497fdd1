use std::fs;

use clap::{Parser, ValueEnum};
use olang::{interpreter::compiler::compile, parse, run, tokenize};
use tracing_subscriber::EnvFilter;

/// olang runs small scripts through a bytecode compiler and a stack-based
/// virtual machine.
#[derive(Parser, Debug)]
#[command(version, about, long_about = None)]
struct Args {
    /// Tells olang to look at a file instead of a script.
    #[arg(short, long)]
    file: bool,

    /// Prints an intermediate stage instead of running the script.
    #[arg(short, long, value_enum)]
    emit: Option<Emit>,

    contents: String,
}

#[derive(ValueEnum, Clone, Copy, Debug)]
enum Emit {
    /// One token per line, with its position.
    Tokens,
    /// One S-expression per statement.
    Ast,
    /// The disassembled program.
    Bytecode,
}

fn main() {
    tracing_subscriber::fmt().with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")))
                             .with_writer(std::io::stderr)
                             .init();

    let args = Args::parse();

    let script = if args.file {
        fs::read_to_string(&args.contents).unwrap_or_else(|_| {
            eprintln!("Failed to read the input file '{}'. Perhaps this file does not exist?",
                      &args.contents);
            std::process::exit(1);
        })
    } else {
        args.contents
    };

    if let Err(e) = execute(&script, args.emit) {
        eprintln!("{e}");
        std::process::exit(1);
    }
}

fn execute(script: &str, emit: Option<Emit>) -> Result<(), Box<dyn std::error::Error>> {
    match emit {
        Some(Emit::Tokens) => {
            for token in tokenize(script)? {
                println!("{} {:?} {token}", token.position(), token.kind);
            }
        },
        Some(Emit::Ast) => {
            for node in parse(script)? {
                println!("{node}");
            }
        },
        Some(Emit::Bytecode) => print!("{}", compile(&parse(script)?)?),
        None => {
            if let Some(value) = run(script)? {
                println!("{value}");
            }
        },
    }
    Ok(())
}
