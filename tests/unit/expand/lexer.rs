use super::*;

fn kinds(src: &str) -> Vec<TokenKind> {
    lex(src).unwrap().into_iter().map(|t| t.kind).collect()
}

#[test]
fn text_and_fields() {
    assert_eq!(
        kinds("Hi {{ .Name.First }}!"),
        vec![
            TokenKind::Text("Hi ".to_owned()),
            TokenKind::Open,
            TokenKind::Field(vec!["Name".to_owned(), "First".to_owned()]),
            TokenKind::Close,
            TokenKind::Text("!".to_owned()),
            TokenKind::Eof,
        ]
    );
}

#[test]
fn dot_variables_and_literals() {
    assert_eq!(
        kinds(r#"{{ $i, $e := . | printf "a\"b" -3 2.5 `raw` }}"#),
        vec![
            TokenKind::Open,
            TokenKind::Var("i".to_owned(), vec![]),
            TokenKind::Comma,
            TokenKind::Var("e".to_owned(), vec![]),
            TokenKind::Declare,
            TokenKind::Field(vec![]),
            TokenKind::Pipe,
            TokenKind::Ident("printf".to_owned()),
            TokenKind::Str("a\"b".to_owned()),
            TokenKind::Int(-3),
            TokenKind::Float(2.5),
            TokenKind::Str("raw".to_owned()),
            TokenKind::Close,
            TokenKind::Eof,
        ]
    );
}

#[test]
fn trim_markers_eat_adjacent_whitespace() {
    assert_eq!(
        kinds("a  \n {{- .X -}} \n b"),
        vec![
            TokenKind::Text("a".to_owned()),
            TokenKind::Open,
            TokenKind::Field(vec!["X".to_owned()]),
            TokenKind::Close,
            TokenKind::Text("b".to_owned()),
            TokenKind::Eof,
        ]
    );
}

#[test]
fn negative_number_is_not_a_trim_marker() {
    assert_eq!(kinds("{{-3}}")[1], TokenKind::Int(-3));
}

#[test]
fn comments_vanish() {
    assert_eq!(
        kinds("a {{- /* note */ -}} b{{/* x */}}"),
        vec![
            TokenKind::Text("a".to_owned()),
            TokenKind::Text("b".to_owned()),
            TokenKind::Eof,
        ]
    );
}

#[test]
fn errors_carry_offsets() {
    let e = lex("ab {{ .X").unwrap_err();
    assert_eq!(e.offset, 5);
    let e = lex(r#"{{ "open }}"#).unwrap_err();
    assert_eq!(e.offset, 3);
    let e = lex("{{ # }}").unwrap_err();
    assert_eq!(e.offset, 3);
}
