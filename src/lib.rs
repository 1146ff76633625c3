pub mod ast;
pub mod cli;
pub mod lexer;
pub mod parser;
pub mod repl;
pub mod token;
