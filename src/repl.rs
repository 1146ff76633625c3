// repl.rs

use crate::lexer::Lexer;
use crate::parser::Parser;
use std::io::{self, BufRead, Write};

const PROMPT: &str = ">> ";

/// Reads lines from `input` until `exit` or end-of-input, printing the
/// parsed program (or its errors) to `output`.
pub fn start<R: BufRead, W: Write>(mut input: R, output: &mut W) -> io::Result<()> {
    loop {
        write!(output, "{}", PROMPT)?;
        output.flush()?;

        let mut line = String::new();
        if input.read_line(&mut line)? == 0 {
            writeln!(output)?;
            return Ok(());
        }

        let line = line.trim();
        if line.is_empty() {
            continue;
        }
        if line.eq_ignore_ascii_case("exit") {
            return Ok(());
        }

        let mut parser = Parser::new(Lexer::new(line));
        let program = parser.parse_program();

        let errors = parser.errors();
        if !errors.is_empty() {
            print_parser_errors(output, &errors)?;
            continue;
        }
        writeln!(output, "{}", program)?;
    }
}

pub fn print_parser_errors<W: Write>(output: &mut W, errors: &[String]) -> io::Result<()> {
    writeln!(output, "parser errors:")?;
    for error in errors {
        writeln!(output, "\t{}", error)?;
    }
    Ok(())
}
