use std::{fs, path::PathBuf, process};

use clap::Parser;
use myrpal::{ast::AstNode, evaluate, interpreter::value::Value, parse_source, standardize_source};

/// myrpal compiles RPAL programs and evaluates them on a CSE machine.
#[derive(Parser, Debug)]
#[command(version, about, long_about = None)]
struct Args {
    /// The RPAL program input file.
    path: PathBuf,

    /// Optional output mode: -ast prints the abstract syntax tree, -sast
    /// the standardized tree, and -pretty renders a tuple result as a
    /// sorted list.
    #[arg(allow_hyphen_values = true)]
    mode: Option<String>,
}

fn main() {
    let args = Args::parse();

    let source = fs::read_to_string(&args.path).unwrap_or_else(|_| {
                     eprintln!("Failed to read the input file '{}'. Perhaps this file does not exist?",
                               args.path.display());
                     process::exit(1);
                 });

    let outcome = match args.mode.as_deref() {
        None => run(&source, false),
        Some("-ast") => print_tree(parse_source(&source)),
        Some("-sast") => print_tree(standardize_source(&source)),
        Some("-pretty") => run(&source, true),
        Some(other) => {
            eprintln!("Unknown mode '{other}'. Expected -ast, -sast or -pretty.");
            process::exit(1);
        },
    };

    if let Err(e) = outcome {
        eprintln!("{e}");
        process::exit(1);
    }
}

/// Evaluates the program and writes its output: first everything `Print`
/// emitted, then the final value unless it is `dummy`.
fn run(source: &str, pretty: bool) -> Result<(), Box<dyn std::error::Error>> {
    let evaluation = evaluate(source)?;

    print!("{}", evaluation.printed);

    if evaluation.value != Value::Dummy {
        if pretty {
            println!("{}", evaluation.value.pretty());
        } else {
            println!("{}", evaluation.value);
        }
    }

    Ok(())
}

/// Prints a tree in its dot-indented form, one node per line.
fn print_tree(tree: Result<AstNode, Box<dyn std::error::Error>>)
              -> Result<(), Box<dyn std::error::Error>> {
    for line in tree?.dot_lines() {
        println!("{line}");
    }

    Ok(())
}
