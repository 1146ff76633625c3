// Integration tests for the lexer and parser

use monke::ast::{Expression, Infix, Statement};
use monke::lexer::Lexer;
use monke::parser::Parser;
use monke::token::TokenType;

fn parse(input: &str) -> (monke::ast::Program, Vec<String>) {
    let mut parser = Parser::new(Lexer::new(input));
    let program = parser.parse_program();
    (program, parser.errors())
}

#[test]
fn test_single_character_tokens_in_order() {
    let source = "=+(){},;";
    let mut lexer = Lexer::new(source);

    for c in source.chars() {
        let token = lexer.next_token();
        assert_eq!(token.literal, c.to_string());
        assert_ne!(token.kind, TokenType::Illegal);
    }
    assert_eq!(lexer.next_token().kind, TokenType::End);
}

#[test]
fn test_let_five() {
    let (program, errors) = parse("let five = 5;");
    assert!(errors.is_empty(), "{:?}", errors);
    assert_eq!(program.statements.len(), 1);

    match &program.statements[0] {
        Statement::Let { name, value, .. } => {
            assert_eq!(name.value, "five");
            assert!(matches!(value, Expression::Integer { value: 5, .. }));
        }
        other => panic!("expected let statement, got {:?}", other),
    }
}

#[test]
fn test_return_literal() {
    let (program, errors) = parse("return 5;");
    assert!(errors.is_empty());
    assert!(matches!(program.statements[0], Statement::Return { .. }));
    assert_eq!(program.statements[0].token_literal(), "return");
}

#[test]
fn test_product_binds_tighter_than_sum() {
    let (program, _) = parse("a + b * c");
    let Statement::Expression { expression, .. } = &program.statements[0] else {
        panic!("expected expression statement");
    };
    match expression {
        Expression::Infix {
            operator: Infix::Plus,
            left,
            right,
            ..
        } => {
            assert_eq!(left.to_string(), "a");
            assert!(matches!(**right, Expression::Infix { operator: Infix::Product, .. }));
        }
        other => panic!("expected a + (b * c), got {}", other),
    }
}

#[test]
fn test_equality_is_left_associative() {
    let (program, _) = parse("a == b != c");
    assert_eq!(program.to_string(), "((a == b) != c)");
}

#[test]
fn test_missing_paren_terminates_with_errors() {
    let (program, errors) = parse("(1 + 2");
    assert!(!errors.is_empty());
    assert!(program.statements.is_empty());

    let (_, errors) = parse("add(1, 2; let x = ((3");
    assert!(!errors.is_empty());
}

#[test]
fn test_errors_do_not_stop_later_statements() {
    let source = r#"
        let x 5;
        let y = 10;
        let = 1;
        let add = fn(a, b) { return a + b; };
        add(x, y);
    "#;
    let (program, errors) = parse(source);

    assert_eq!(errors.len(), 3, "{:?}", errors);
    assert_eq!(errors[0], "expected next token to be =, got INT instead");

    let lets: Vec<&str> = program
        .statements
        .iter()
        .filter_map(|s| match s {
            Statement::Let { name, .. } => Some(name.value.as_str()),
            _ => None,
        })
        .collect();
    assert_eq!(lets, vec!["y", "add"]);
    assert_eq!(
        program.statements.last().map(|s| s.to_string()),
        Some("add(x, y)".to_string())
    );
}

#[test]
fn test_full_program_round_trips_to_canonical_form() {
    let source = r#"
        let max = fn(a, b) {
            if (a > b) { return a; } else { return b; }
        };
        max(1 * 2, -3)
    "#;
    let (program, errors) = parse(source);
    assert!(errors.is_empty(), "{:?}", errors);
    assert_eq!(
        program.to_string(),
        "let max = fn(a, b) if(a > b) return a;else return b;;max((1 * 2), (-3))"
    );
}
