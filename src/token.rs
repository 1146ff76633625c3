use std::fmt;

#[derive(PartialEq, Eq, Debug, Clone, Copy, Hash)]
pub enum TokenType {
    // Parsing
    Illegal,
    End,

    // Literals
    Identifier,
    IntegerLiteral,

    // Operators
    Assign,       // =
    Plus,         // +
    Minus,        // -
    Bang,         // !
    Product,      // *
    ForwardSlash, // /
    LessThan,     // <
    GreaterThan,  // >
    Equal,        // ==
    DoesNotEqual, // !=

    // Delimiters
    Comma,      // ,
    SemiColon,  // ;
    LeftParen,  // (
    RightParen, // )
    LeftBrace,  // {
    RightBrace, // }

    // Keywords
    Fn,
    Let,
    If,
    Else,
    Return,
    True,
    False,
}

impl TokenType {
    pub fn as_str(&self) -> &'static str {
        match self {
            TokenType::Illegal => "ILLEGAL",
            TokenType::End => "EOF",
            TokenType::Identifier => "IDENTIFIER",
            TokenType::IntegerLiteral => "INT",
            TokenType::Assign => "=",
            TokenType::Plus => "+",
            TokenType::Minus => "-",
            TokenType::Bang => "!",
            TokenType::Product => "*",
            TokenType::ForwardSlash => "/",
            TokenType::LessThan => "<",
            TokenType::GreaterThan => ">",
            TokenType::Equal => "==",
            TokenType::DoesNotEqual => "!=",
            TokenType::Comma => ",",
            TokenType::SemiColon => ";",
            TokenType::LeftParen => "(",
            TokenType::RightParen => ")",
            TokenType::LeftBrace => "{",
            TokenType::RightBrace => "}",
            TokenType::Fn => "FUNCTION",
            TokenType::Let => "LET",
            TokenType::If => "if",
            TokenType::Else => "else",
            TokenType::Return => "return",
            TokenType::True => "true",
            TokenType::False => "false",
        }
    }
}

impl fmt::Display for TokenType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// A lexical unit: its category plus the exact source text it was read from.
#[derive(PartialEq, Debug, Clone)]
pub struct Token {
    pub kind: TokenType,
    pub literal: String,
}

impl Token {
    pub fn new(kind: TokenType, literal: impl Into<String>) -> Self {
        Token {
            kind,
            literal: literal.into(),
        }
    }

    pub fn end() -> Self {
        Token::new(TokenType::End, "")
    }

    pub fn is(&self, kind: TokenType) -> bool {
        self.kind == kind
    }
}

impl fmt::Display for Token {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}", self.kind, self.literal)
    }
}

/// Classifies an identifier-shaped literal as a keyword or a plain identifier.
pub fn lookup_keyword(literal: &str) -> TokenType {
    match literal {
        "fn" => TokenType::Fn,
        "let" => TokenType::Let,
        "if" => TokenType::If,
        "else" => TokenType::Else,
        "return" => TokenType::Return,
        "true" => TokenType::True,
        "false" => TokenType::False,
        _ => TokenType::Identifier,
    }
}
