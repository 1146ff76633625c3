use crate::token::{lookup_keyword, Token, TokenType};

#[derive(Debug)]
pub struct Lexer {
    input: Vec<char>,
    cur: usize,
    next_cur: usize,
    ch: char,
}

fn is_whitespace(c: char) -> bool {
    c == ' ' || c == '\t' || c == '\n' || c == '\r'
}

fn is_numeric(c: char) -> bool {
    c.is_ascii_digit()
}

fn is_letter(c: char) -> bool {
    c.is_ascii_alphabetic() || c == '_'
}

impl Lexer {
    pub fn new(input: &str) -> Lexer {
        let mut lexer = Lexer {
            input: input.chars().collect(),
            cur: 0,
            next_cur: 0,
            ch: '\0',
        };
        lexer.read();
        lexer
    }

    fn read(&mut self) {
        if self.next_cur >= self.input.len() {
            self.ch = '\0';
            // Stay put once the input is exhausted.
            self.cur = self.input.len();
            self.next_cur = self.input.len();
            return;
        }
        self.ch = self.input[self.next_cur];
        self.cur = self.next_cur;
        self.next_cur += 1;
    }

    fn peek(&self) -> char {
        self.input.get(self.next_cur).copied().unwrap_or('\0')
    }

    fn skip_whitespace(&mut self) {
        while is_whitespace(self.ch) {
            self.read();
        }
    }

    fn read_while(&mut self, accept: fn(char) -> bool) -> String {
        let start = self.cur;
        while accept(self.ch) {
            self.read();
        }
        self.input[start..self.cur].iter().collect()
    }

    fn read_number(&mut self) -> Token {
        Token::new(TokenType::IntegerLiteral, self.read_while(is_numeric))
    }

    fn read_identifier(&mut self) -> Token {
        let literal = self.read_while(is_letter);
        Token::new(lookup_keyword(&literal), literal)
    }

    fn single(&self, kind: TokenType) -> Token {
        Token::new(kind, self.ch)
    }

    /// Scans and returns the next token. Once the input is exhausted every
    /// call yields an end-of-input token.
    pub fn next_token(&mut self) -> Token {
        self.skip_whitespace();

        let token = match self.ch {
            '=' => {
                if self.peek() == '=' {
                    self.read();
                    Token::new(TokenType::Equal, "==")
                } else {
                    self.single(TokenType::Assign)
                }
            }
            '!' => {
                if self.peek() == '=' {
                    self.read();
                    Token::new(TokenType::DoesNotEqual, "!=")
                } else {
                    self.single(TokenType::Bang)
                }
            }
            '+' => self.single(TokenType::Plus),
            '-' => self.single(TokenType::Minus),
            '*' => self.single(TokenType::Product),
            '/' => self.single(TokenType::ForwardSlash),
            '<' => self.single(TokenType::LessThan),
            '>' => self.single(TokenType::GreaterThan),
            ',' => self.single(TokenType::Comma),
            ';' => self.single(TokenType::SemiColon),
            '(' => self.single(TokenType::LeftParen),
            ')' => self.single(TokenType::RightParen),
            '{' => self.single(TokenType::LeftBrace),
            '}' => self.single(TokenType::RightBrace),
            '\0' => Token::end(),
            c if is_letter(c) => return self.read_identifier(),
            c if is_numeric(c) => return self.read_number(),
            _ => self.single(TokenType::Illegal),
        };

        self.read();
        token
    }
}

impl Iterator for Lexer {
    type Item = Token;

    fn next(&mut self) -> Option<Token> {
        let token = self.next_token();
        if token.is(TokenType::End) {
            None
        } else {
            Some(token)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn assert_tokens(input: &str, expected: &[(TokenType, &str)]) {
        let mut lexer = Lexer::new(input);
        for (i, (kind, literal)) in expected.iter().enumerate() {
            let token = lexer.next_token();
            assert_eq!(token.kind, *kind, "tokens[{}] - wrong type, literal {:?}", i, token.literal);
            assert_eq!(token.literal, *literal, "tokens[{}] - wrong literal", i);
        }
    }

    #[test]
    fn test_single_character_tokens() {
        assert_tokens(
            "=+(){},;",
            &[
                (TokenType::Assign, "="),
                (TokenType::Plus, "+"),
                (TokenType::LeftParen, "("),
                (TokenType::RightParen, ")"),
                (TokenType::LeftBrace, "{"),
                (TokenType::RightBrace, "}"),
                (TokenType::Comma, ","),
                (TokenType::SemiColon, ";"),
                (TokenType::End, ""),
            ],
        );
    }

    #[test]
    fn test_let_and_function() {
        let input = "let five = 5;
  let add = fn(x, y) {
    x + y;
  };
  let result = add(five, 10);
";
        assert_tokens(
            input,
            &[
                (TokenType::Let, "let"),
                (TokenType::Identifier, "five"),
                (TokenType::Assign, "="),
                (TokenType::IntegerLiteral, "5"),
                (TokenType::SemiColon, ";"),
                (TokenType::Let, "let"),
                (TokenType::Identifier, "add"),
                (TokenType::Assign, "="),
                (TokenType::Fn, "fn"),
                (TokenType::LeftParen, "("),
                (TokenType::Identifier, "x"),
                (TokenType::Comma, ","),
                (TokenType::Identifier, "y"),
                (TokenType::RightParen, ")"),
                (TokenType::LeftBrace, "{"),
                (TokenType::Identifier, "x"),
                (TokenType::Plus, "+"),
                (TokenType::Identifier, "y"),
                (TokenType::SemiColon, ";"),
                (TokenType::RightBrace, "}"),
                (TokenType::SemiColon, ";"),
                (TokenType::Let, "let"),
                (TokenType::Identifier, "result"),
                (TokenType::Assign, "="),
                (TokenType::Identifier, "add"),
                (TokenType::LeftParen, "("),
                (TokenType::Identifier, "five"),
                (TokenType::Comma, ","),
                (TokenType::IntegerLiteral, "10"),
                (TokenType::RightParen, ")"),
                (TokenType::SemiColon, ";"),
                (TokenType::End, ""),
            ],
        );
    }

    #[test]
    fn test_operators_and_keywords() {
        assert_tokens(
            "!-/*5; 5 < 10 > 5; if (true) { return false; } else { return 1; }",
            &[
                (TokenType::Bang, "!"),
                (TokenType::Minus, "-"),
                (TokenType::ForwardSlash, "/"),
                (TokenType::Product, "*"),
                (TokenType::IntegerLiteral, "5"),
                (TokenType::SemiColon, ";"),
                (TokenType::IntegerLiteral, "5"),
                (TokenType::LessThan, "<"),
                (TokenType::IntegerLiteral, "10"),
                (TokenType::GreaterThan, ">"),
                (TokenType::IntegerLiteral, "5"),
                (TokenType::SemiColon, ";"),
                (TokenType::If, "if"),
                (TokenType::LeftParen, "("),
                (TokenType::True, "true"),
                (TokenType::RightParen, ")"),
                (TokenType::LeftBrace, "{"),
                (TokenType::Return, "return"),
                (TokenType::False, "false"),
                (TokenType::SemiColon, ";"),
                (TokenType::RightBrace, "}"),
                (TokenType::Else, "else"),
                (TokenType::LeftBrace, "{"),
                (TokenType::Return, "return"),
                (TokenType::IntegerLiteral, "1"),
                (TokenType::SemiColon, ";"),
                (TokenType::RightBrace, "}"),
                (TokenType::End, ""),
            ],
        );
    }

    #[test]
    fn test_two_character_operators() {
        assert_tokens(
            "10 == 10; 10 != 9; = ! =!",
            &[
                (TokenType::IntegerLiteral, "10"),
                (TokenType::Equal, "=="),
                (TokenType::IntegerLiteral, "10"),
                (TokenType::SemiColon, ";"),
                (TokenType::IntegerLiteral, "10"),
                (TokenType::DoesNotEqual, "!="),
                (TokenType::IntegerLiteral, "9"),
                (TokenType::SemiColon, ";"),
                (TokenType::Assign, "="),
                (TokenType::Bang, "!"),
                (TokenType::Assign, "="),
                (TokenType::Bang, "!"),
                (TokenType::End, ""),
            ],
        );
    }

    #[test]
    fn test_trailing_operator_at_end_of_input() {
        assert_tokens("x =", &[(TokenType::Identifier, "x"), (TokenType::Assign, "="), (TokenType::End, "")]);
        assert_tokens("!", &[(TokenType::Bang, "!"), (TokenType::End, "")]);
    }

    #[test]
    fn test_identifiers_with_underscores_and_case() {
        assert_tokens(
            "_foo Bar_baz ZED",
            &[
                (TokenType::Identifier, "_foo"),
                (TokenType::Identifier, "Bar_baz"),
                (TokenType::Identifier, "ZED"),
                (TokenType::End, ""),
            ],
        );
    }

    #[test]
    fn test_digits_end_identifier() {
        assert_tokens(
            "abc123",
            &[(TokenType::Identifier, "abc"), (TokenType::IntegerLiteral, "123"), (TokenType::End, "")],
        );
    }

    #[test]
    fn test_illegal_characters() {
        assert_tokens(
            "@ 1 # é",
            &[
                (TokenType::Illegal, "@"),
                (TokenType::IntegerLiteral, "1"),
                (TokenType::Illegal, "#"),
                (TokenType::Illegal, "é"),
                (TokenType::End, ""),
            ],
        );
    }

    #[test]
    fn test_end_is_sticky() {
        let mut lexer = Lexer::new(" \t\r\n");
        for _ in 0..3 {
            assert_eq!(lexer.next_token(), Token::end());
        }
    }

    #[test]
    fn test_iterator_stops_before_end() {
        let kinds: Vec<TokenType> = Lexer::new("let x = 1;").map(|t| t.kind).collect();
        assert_eq!(
            kinds,
            vec![
                TokenType::Let,
                TokenType::Identifier,
                TokenType::Assign,
                TokenType::IntegerLiteral,
                TokenType::SemiColon,
            ]
        );
    }
}
