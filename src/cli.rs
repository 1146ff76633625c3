use clap::{Parser, Subcommand};
use std::fs;
use std::io;
use std::process;

use crate::{lexer, parser, repl};

const ABOUT: &str = "monke - lexer and parser for the Monkey language";

#[derive(Parser)]
#[command(
    name = "monke",
    version,
    about = ABOUT,
    long_about = None,
)]
pub struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Start the interactive read-parse-print loop.
    Repl,
    /// Parse a source file and print its canonical form.
    Run {
        #[arg(value_name = "FILE")]
        file: String,
        /// Write a parse trace to stderr.
        #[arg(long)]
        trace: bool,
    },
    /// Print the token stream of a source file.
    Tokens {
        #[arg(value_name = "FILE")]
        file: String,
    },
}

fn read_source(file: &str) -> String {
    fs::read_to_string(file).unwrap_or_else(|e| {
        eprintln!("Error reading file '{}': {}", file, e);
        process::exit(1);
    })
}

fn username() -> String {
    std::env::var("USER")
        .or_else(|_| std::env::var("USERNAME"))
        .unwrap_or_else(|_| "there".to_string())
}

fn start_repl() {
    println!("Hello {}! This is the Monkey programming language.", username());
    println!("Type in commands, or `exit` to leave.");
    let stdin = io::stdin();
    if let Err(e) = repl::start(stdin.lock(), &mut io::stdout()) {
        eprintln!("Error: {}", e);
        process::exit(1);
    }
}

pub fn run() {
    let cli = Cli::parse();

    match cli.command {
        None | Some(Commands::Repl) => start_repl(),
        Some(Commands::Run { file, trace }) => {
            let input = read_source(&file);
            let mut parser = parser::Parser::new(lexer::Lexer::new(&input));
            if trace {
                parser.set_trace(Box::new(io::stderr()));
            }
            let program = parser.parse_program();

            let errors = parser.errors();
            if !errors.is_empty() {
                let _ = repl::print_parser_errors(&mut io::stderr(), &errors);
                process::exit(1);
            }
            for statement in &program.statements {
                println!("{}", statement);
            }
        }
        Some(Commands::Tokens { file }) => {
            let input = read_source(&file);
            for token in lexer::Lexer::new(&input) {
                println!("{}", token);
            }
        }
    }
}
