use crate::ast::*;
use crate::lexer::Lexer;
use crate::token::{Token, TokenType};
use std::io::Write;
use thiserror::Error;

/// Deepest expression nesting accepted before the statement is abandoned.
pub const MAX_NESTING: usize = 64;

#[derive(Debug, PartialEq, Clone, Copy, PartialOrd)]
pub enum Precedence {
    Lowest,
    Equals,     // == !=
    Comparison, // < >
    Sum,        // + -
    Product,    // * /
    Prefix,     // -x !x
    Call,       // f(x)
}

fn token_to_precedence(kind: TokenType) -> Precedence {
    match kind {
        TokenType::Equal | TokenType::DoesNotEqual => Precedence::Equals,
        TokenType::LessThan | TokenType::GreaterThan => Precedence::Comparison,
        TokenType::Plus | TokenType::Minus => Precedence::Sum,
        TokenType::Product | TokenType::ForwardSlash => Precedence::Product,
        TokenType::LeftParen => Precedence::Call,
        _ => Precedence::Lowest,
    }
}

#[derive(Debug, PartialEq, Clone, Error)]
pub enum ParseError {
    #[error("expected next token to be {want}, got {got} instead")]
    UnexpectedToken { want: TokenType, got: TokenType },
    #[error("no prefix parse function for {0} found")]
    NoPrefixParseFn(TokenType),
    #[error("could not parse {0} as integer")]
    InvalidInteger(String),
    #[error("expression nested deeper than {0} levels")]
    NestingTooDeep(usize),
}

type ParseErrors = Vec<ParseError>;

type PrefixParseFn = fn(&mut Parser) -> Option<Expression>;
type InfixParseFn = fn(&mut Parser, Expression) -> Option<Expression>;

// Each entry carries the name it is traced under.
fn prefix_parse_fn(kind: TokenType) -> Option<(&'static str, PrefixParseFn)> {
    let entry: (&'static str, PrefixParseFn) = match kind {
        TokenType::Identifier => ("parse_identifier", Parser::parse_identifier_expression),
        TokenType::IntegerLiteral => ("parse_integer_literal", Parser::parse_integer_literal),
        TokenType::True | TokenType::False => ("parse_boolean", Parser::parse_boolean),
        TokenType::Bang | TokenType::Minus => {
            ("parse_prefix_expression", Parser::parse_prefix_expression)
        }
        TokenType::LeftParen => ("parse_grouped_expression", Parser::parse_grouped_expression),
        TokenType::If => ("parse_if_expression", Parser::parse_if_expression),
        TokenType::Fn => ("parse_function_literal", Parser::parse_function_literal),
        _ => return None,
    };
    Some(entry)
}

fn infix_parse_fn(kind: TokenType) -> Option<(&'static str, InfixParseFn)> {
    let entry: (&'static str, InfixParseFn) = match kind {
        TokenType::Plus
        | TokenType::Minus
        | TokenType::Product
        | TokenType::ForwardSlash
        | TokenType::Equal
        | TokenType::DoesNotEqual
        | TokenType::LessThan
        | TokenType::GreaterThan => ("parse_infix_expression", Parser::parse_infix_expression),
        TokenType::LeftParen => ("parse_call_expression", Parser::parse_call_expression),
        _ => return None,
    };
    Some(entry)
}

pub struct Parser {
    lexer: Lexer,
    curr: Token,
    peek: Token,
    errors: ParseErrors,
    nesting: usize,
    trace: Option<Box<dyn Write>>,
    depth: usize,
}

impl Parser {
    pub fn new(lexer: Lexer) -> Self {
        let mut parser = Parser {
            lexer,
            curr: Token::end(),
            peek: Token::end(),
            errors: Vec::new(),
            nesting: 0,
            trace: None,
            depth: 0,
        };
        parser.next_token();
        parser.next_token();
        parser
    }

    /// Sends a `BEGIN`/`END` line for every statement and expression parse
    /// function to `sink`.
    pub fn set_trace(&mut self, sink: Box<dyn Write>) {
        self.trace = Some(sink);
    }

    fn log(&mut self, message: &str) {
        if let Some(ref mut sink) = self.trace {
            let _ = writeln!(sink, "{}{}", "\t".repeat(self.depth), message);
        }
    }

    fn begin(&mut self, name: &str) {
        self.log(&format!("BEGIN {}", name));
        self.depth += 1;
    }

    fn end(&mut self, name: &str) {
        self.depth = self.depth.saturating_sub(1);
        self.log(&format!("END {}", name));
    }

    fn traced<T>(&mut self, name: &str, parse: impl FnOnce(&mut Self) -> T) -> T {
        self.begin(name);
        let result = parse(self);
        self.end(name);
        result
    }

    /// Rendered diagnostics, in the order they were encountered.
    pub fn errors(&self) -> Vec<String> {
        self.errors.iter().map(|e| e.to_string()).collect()
    }

    pub fn diagnostics(&self) -> &[ParseError] {
        &self.errors
    }

    fn next_token(&mut self) {
        self.curr = std::mem::replace(&mut self.peek, self.lexer.next_token());
    }

    pub fn parse_program(&mut self) -> Program {
        let mut program = Program::default();
        while !self.curr_token_is(TokenType::End) {
            if let Some(statement) = self.parse_statement() {
                program.statements.push(statement);
            }
            self.next_token();
        }
        program
    }

    fn parse_statement(&mut self) -> Option<Statement> {
        self.traced("parse_statement", |p| match p.curr.kind {
            TokenType::Let => p.traced("parse_let_statement", Self::parse_let_statement),
            TokenType::Return => p.traced("parse_return_statement", Self::parse_return_statement),
            _ => p.traced("parse_expression_statement", Self::parse_expression_statement),
        })
    }

    fn parse_let_statement(&mut self) -> Option<Statement> {
        let token = self.curr.clone();

        if !self.expect_peek(TokenType::Identifier) {
            return None;
        }
        let name = Identifier::new(self.curr.clone());

        if !self.expect_peek(TokenType::Assign) {
            return None;
        }
        self.next_token();

        let value = self.parse_expression(Precedence::Lowest)?;

        if self.peek_token_is(TokenType::SemiColon) {
            self.next_token();
        }

        Some(Statement::Let { token, name, value })
    }

    fn parse_return_statement(&mut self) -> Option<Statement> {
        let token = self.curr.clone();
        self.next_token();

        let value = self.parse_expression(Precedence::Lowest)?;

        if self.peek_token_is(TokenType::SemiColon) {
            self.next_token();
        }

        Some(Statement::Return { token, value })
    }

    fn parse_expression_statement(&mut self) -> Option<Statement> {
        let token = self.curr.clone();
        let expression = self.parse_expression(Precedence::Lowest)?;

        if self.peek_token_is(TokenType::SemiColon) {
            self.next_token();
        }

        Some(Statement::Expression { token, expression })
    }

    fn curr_token_is(&self, kind: TokenType) -> bool {
        self.curr.is(kind)
    }

    fn peek_token_is(&self, kind: TokenType) -> bool {
        self.peek.is(kind)
    }

    fn peek_error(&mut self, kind: TokenType) {
        self.errors.push(ParseError::UnexpectedToken {
            want: kind,
            got: self.peek.kind,
        });
    }

    fn expect_peek(&mut self, kind: TokenType) -> bool {
        if self.peek_token_is(kind) {
            self.next_token();
            true
        } else {
            self.peek_error(kind);
            false
        }
    }

    fn peek_precedence(&self) -> Precedence {
        token_to_precedence(self.peek.kind)
    }

    fn curr_precedence(&self) -> Precedence {
        token_to_precedence(self.curr.kind)
    }

    fn parse_expression(&mut self, precedence: Precedence) -> Option<Expression> {
        if self.nesting >= MAX_NESTING {
            self.errors.push(ParseError::NestingTooDeep(MAX_NESTING));
            return None;
        }
        self.nesting += 1;
        let expression = self.traced("parse_expression", |p| p.parse_expression_inner(precedence));
        self.nesting -= 1;
        expression
    }

    fn parse_expression_inner(&mut self, precedence: Precedence) -> Option<Expression> {
        let (name, prefix) = match prefix_parse_fn(self.curr.kind) {
            Some(entry) => entry,
            None => {
                self.errors.push(ParseError::NoPrefixParseFn(self.curr.kind));
                return None;
            }
        };
        let mut left = self.traced(name, prefix)?;

        while !self.peek_token_is(TokenType::SemiColon) && precedence < self.peek_precedence() {
            let (name, infix) = match infix_parse_fn(self.peek.kind) {
                Some(entry) => entry,
                None => return Some(left),
            };
            self.next_token();
            left = self.traced(name, |p| infix(p, left))?;
        }

        Some(left)
    }

    fn parse_identifier_expression(&mut self) -> Option<Expression> {
        Some(Expression::Identifier(Identifier::new(self.curr.clone())))
    }

    fn parse_integer_literal(&mut self) -> Option<Expression> {
        match self.curr.literal.parse::<i64>() {
            Ok(value) => Some(Expression::Integer {
                token: self.curr.clone(),
                value,
            }),
            Err(_) => {
                self.errors
                    .push(ParseError::InvalidInteger(self.curr.literal.clone()));
                None
            }
        }
    }

    fn parse_boolean(&mut self) -> Option<Expression> {
        Some(Expression::Boolean {
            token: self.curr.clone(),
            value: self.curr_token_is(TokenType::True),
        })
    }

    fn parse_prefix_expression(&mut self) -> Option<Expression> {
        let token = self.curr.clone();
        let operator = match token.kind {
            TokenType::Bang => Prefix::Bang,
            _ => Prefix::Minus,
        };

        self.next_token();
        self.parse_expression(Precedence::Prefix)
            .map(|right| Expression::Prefix {
                token,
                operator,
                right: Box::new(right),
            })
    }

    fn parse_infix_expression(&mut self, left: Expression) -> Option<Expression> {
        let token = self.curr.clone();
        let operator = match token.kind {
            TokenType::Plus => Infix::Plus,
            TokenType::Minus => Infix::Minus,
            TokenType::Product => Infix::Product,
            TokenType::ForwardSlash => Infix::ForwardSlash,
            TokenType::Equal => Infix::Equal,
            TokenType::DoesNotEqual => Infix::DoesNotEqual,
            TokenType::LessThan => Infix::LessThan,
            _ => Infix::GreaterThan,
        };

        let precedence = self.curr_precedence();
        self.next_token();
        self.parse_expression(precedence).map(|right| Expression::Infix {
            token,
            operator,
            left: Box::new(left),
            right: Box::new(right),
        })
    }

    fn parse_grouped_expression(&mut self) -> Option<Expression> {
        self.next_token();
        let expression = self.parse_expression(Precedence::Lowest)?;
        if !self.expect_peek(TokenType::RightParen) {
            return None;
        }
        Some(expression)
    }

    fn parse_if_expression(&mut self) -> Option<Expression> {
        let token = self.curr.clone();

        if !self.expect_peek(TokenType::LeftParen) {
            return None;
        }
        self.next_token();
        let condition = self.parse_expression(Precedence::Lowest)?;

        if !self.expect_peek(TokenType::RightParen) || !self.expect_peek(TokenType::LeftBrace) {
            return None;
        }
        let consequence = self.traced("parse_block_statement", Self::parse_block_statement);

        let mut alternative = None;
        if self.peek_token_is(TokenType::Else) {
            self.next_token();
            if !self.expect_peek(TokenType::LeftBrace) {
                return None;
            }
            alternative = Some(self.traced("parse_block_statement", Self::parse_block_statement));
        }

        Some(Expression::If {
            token,
            condition: Box::new(condition),
            consequence,
            alternative,
        })
    }

    /// Expects `curr` on `{`; returns with `curr` on the matching `}` (or on
    /// end-of-input when the block is never closed).
    fn parse_block_statement(&mut self) -> BlockStatement {
        let token = self.curr.clone();
        let mut statements = vec![];
        self.next_token();

        while !self.curr_token_is(TokenType::RightBrace) && !self.curr_token_is(TokenType::End) {
            if let Some(statement) = self.parse_statement() {
                statements.push(statement);
            }
            self.next_token();
        }

        BlockStatement { token, statements }
    }

    fn parse_function_literal(&mut self) -> Option<Expression> {
        let token = self.curr.clone();

        if !self.expect_peek(TokenType::LeftParen) {
            return None;
        }
        let parameters = self.parse_function_parameters()?;

        if !self.expect_peek(TokenType::LeftBrace) {
            return None;
        }
        let body = self.traced("parse_block_statement", Self::parse_block_statement);

        Some(Expression::Function {
            token,
            parameters,
            body,
        })
    }

    fn parse_function_parameters(&mut self) -> Option<Vec<Identifier>> {
        let mut params = vec![];

        if self.peek_token_is(TokenType::RightParen) {
            self.next_token();
            return Some(params);
        }

        if !self.expect_peek(TokenType::Identifier) {
            return None;
        }
        params.push(Identifier::new(self.curr.clone()));

        while self.peek_token_is(TokenType::Comma) {
            self.next_token();
            if !self.expect_peek(TokenType::Identifier) {
                return None;
            }
            params.push(Identifier::new(self.curr.clone()));
        }

        if !self.expect_peek(TokenType::RightParen) {
            return None;
        }

        Some(params)
    }

    fn parse_call_expression(&mut self, function: Expression) -> Option<Expression> {
        let token = self.curr.clone();
        let arguments = self.parse_call_arguments()?;
        Some(Expression::Call {
            token,
            function: Box::new(function),
            arguments,
        })
    }

    fn parse_call_arguments(&mut self) -> Option<Vec<Expression>> {
        let mut arguments = vec![];

        if self.peek_token_is(TokenType::RightParen) {
            self.next_token();
            return Some(arguments);
        }

        self.next_token();
        arguments.push(self.parse_expression(Precedence::Lowest)?);

        while self.peek_token_is(TokenType::Comma) {
            self.next_token();
            self.next_token();
            arguments.push(self.parse_expression(Precedence::Lowest)?);
        }

        if !self.expect_peek(TokenType::RightParen) {
            return None;
        }

        Some(arguments)
    }
}
