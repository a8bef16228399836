use crate::expand::error::ExpandError;

#[derive(Debug, Clone, PartialEq)]
pub(crate) struct Token {
    pub(crate) kind: TokenKind,
    pub(crate) offset: usize,
}

#[derive(Debug, Clone, PartialEq)]
pub(crate) enum TokenKind {
    /// Literal text between actions, already trimmed by `{{-` / `-}}`.
    Text(String),
    Open,
    Close,

    Ident(String),
    /// `.`, `.A`, `.A.B`; an empty path is the cursor itself.
    Field(Vec<String>),
    /// `$`, `$x`, `$x.A`.
    Var(String, Vec<String>),
    Str(String),
    Int(i64),
    Float(f64),

    Pipe,
    LParen,
    RParen,
    Comma,
    Declare,

    Eof,
}

const OPEN: &str = "{{";
const CLOSE: &str = "}}";

/// Split `input` into text and action tokens.
pub(crate) fn lex(input: &str) -> Result<Vec<Token>, ExpandError> {
    let mut out = Vec::new();
    let mut i = 0usize;
    let mut trim_next_text = false;

    while i < input.len() {
        let Some(rel) = input[i..].find(OPEN) else {
            push_text(&mut out, &input[i..], i, trim_next_text, false);
            break;
        };
        let open_at = i + rel;
        let mut j = open_at + OPEN.len();
        let trim_before = has_trim_marker(input, j);
        if trim_before {
            j += 1;
        }
        push_text(&mut out, &input[i..open_at], i, trim_next_text, trim_before);

        // Comments: {{/* ... */}} with optional trim markers.
        let after_ws = skip_ws(input, j);
        if input[after_ws..].starts_with("/*") {
            let Some(end_rel) = input[after_ws..].find("*/") else {
                return Err(ExpandError::new(open_at, "unclosed comment"));
            };
            let mut k = skip_ws(input, after_ws + end_rel + 2);
            trim_next_text = false;
            if input[k..].starts_with("-}}") {
                trim_next_text = true;
                k += 1;
            }
            if !input[k..].starts_with(CLOSE) {
                return Err(ExpandError::new(k, "comment must end with */}}"));
            }
            i = k + CLOSE.len();
            continue;
        }

        out.push(Token {
            kind: TokenKind::Open,
            offset: open_at,
        });
        let (next, trim_after) = lex_action(input, j, &mut out)?;
        trim_next_text = trim_after;
        i = next;
    }

    out.push(Token {
        kind: TokenKind::Eof,
        offset: input.len(),
    });
    Ok(out)
}

fn push_text(out: &mut Vec<Token>, s: &str, offset: usize, trim_start: bool, trim_end: bool) {
    let mut s = s;
    if trim_start {
        s = s.trim_start();
    }
    if trim_end {
        s = s.trim_end();
    }
    if !s.is_empty() {
        out.push(Token {
            kind: TokenKind::Text(s.to_owned()),
            offset,
        });
    }
}

/// `{{- ` requires whitespace after the dash so `{{-3}}` stays a number.
fn has_trim_marker(input: &str, at: usize) -> bool {
    let b = input.as_bytes();
    at + 1 < b.len() && b[at] == b'-' && (b[at + 1] as char).is_ascii_whitespace()
}

fn skip_ws(input: &str, mut i: usize) -> usize {
    let b = input.as_bytes();
    while i < b.len() && (b[i] as char).is_ascii_whitespace() {
        i += 1;
    }
    i
}

fn is_ident_byte(c: u8) -> bool {
    c.is_ascii_alphanumeric() || c == b'_'
}

fn read_ident(input: &str, start: usize) -> usize {
    let b = input.as_bytes();
    let mut i = start;
    while i < b.len() && is_ident_byte(b[i]) {
        i += 1;
    }
    i
}

/// Read `.A.B` segments starting at a `.`; returns the segments and the end offset.
fn read_fields(input: &str, mut i: usize) -> (Vec<String>, usize) {
    let b = input.as_bytes();
    let mut path = Vec::new();
    while i < b.len() && b[i] == b'.' {
        let end = read_ident(input, i + 1);
        if end == i + 1 {
            break;
        }
        path.push(input[i + 1..end].to_owned());
        i = end;
    }
    (path, i)
}

/// Tokenize one action body; returns the offset after `}}` and whether `-}}` was used.
fn lex_action(
    input: &str,
    mut i: usize,
    out: &mut Vec<Token>,
) -> Result<(usize, bool), ExpandError> {
    let b = input.as_bytes();
    let start_of_action = i;
    loop {
        i = skip_ws(input, i);
        if i >= b.len() {
            return Err(ExpandError::new(start_of_action, "unclosed action"));
        }
        let start = i;
        let c = b[i];

        if c == b'-'
            && input[i + 1..].starts_with(CLOSE)
            && i > start_of_action
            && (b[i - 1] as char).is_ascii_whitespace()
        {
            out.push(Token {
                kind: TokenKind::Close,
                offset: i,
            });
            return Ok((i + 1 + CLOSE.len(), true));
        }
        if input[i..].starts_with(CLOSE) {
            out.push(Token {
                kind: TokenKind::Close,
                offset: i,
            });
            return Ok((i + CLOSE.len(), false));
        }

        let kind = match c {
            b'|' => {
                i += 1;
                TokenKind::Pipe
            }
            b'(' => {
                i += 1;
                TokenKind::LParen
            }
            b')' => {
                i += 1;
                TokenKind::RParen
            }
            b',' => {
                i += 1;
                TokenKind::Comma
            }
            b':' if input[i..].starts_with(":=") => {
                i += 2;
                TokenKind::Declare
            }
            b'"' => {
                let (s, end) = read_string(input, i)?;
                i = end;
                TokenKind::Str(s)
            }
            b'`' => {
                let Some(rel) = input[i + 1..].find('`') else {
                    return Err(ExpandError::new(i, "unterminated raw string"));
                };
                let s = input[i + 1..i + 1 + rel].to_owned();
                i += rel + 2;
                TokenKind::Str(s)
            }
            b'.' => {
                let (path, end) = read_fields(input, i);
                i = if path.is_empty() { i + 1 } else { end };
                TokenKind::Field(path)
            }
            b'$' => {
                let end = read_ident(input, i + 1);
                let name = input[i + 1..end].to_owned();
                let (path, end) = read_fields(input, end);
                i = end;
                TokenKind::Var(name, path)
            }
            c if c.is_ascii_digit() || ((c == b'-' || c == b'+') && next_is_digit(b, i)) => {
                let (kind, end) = read_number(input, i)?;
                i = end;
                kind
            }
            c if c.is_ascii_alphabetic() || c == b'_' => {
                let end = read_ident(input, i);
                let s = input[i..end].to_owned();
                i = end;
                TokenKind::Ident(s)
            }
            _ => {
                let ch = input[i..].chars().next().unwrap_or('?');
                return Err(ExpandError::new(start, format!("unexpected character '{ch}'")));
            }
        };
        out.push(Token {
            kind,
            offset: start,
        });
    }
}

fn next_is_digit(b: &[u8], i: usize) -> bool {
    i + 1 < b.len() && b[i + 1].is_ascii_digit()
}

fn read_string(input: &str, start: usize) -> Result<(String, usize), ExpandError> {
    let mut s = String::new();
    let mut chars = input[start + 1..].char_indices();
    while let Some((k, ch)) = chars.next() {
        match ch {
            '"' => return Ok((s, start + 1 + k + 1)),
            '\\' => {
                let Some((_, esc)) = chars.next() else {
                    break;
                };
                s.push(match esc {
                    'n' => '\n',
                    't' => '\t',
                    '\\' => '\\',
                    '"' => '"',
                    other => {
                        return Err(ExpandError::new(
                            start + 1 + k,
                            format!("unknown escape '\\{other}'"),
                        ));
                    }
                });
            }
            _ => s.push(ch),
        }
    }
    Err(ExpandError::new(start, "unterminated string"))
}

fn read_number(input: &str, start: usize) -> Result<(TokenKind, usize), ExpandError> {
    let b = input.as_bytes();
    let mut i = start;
    if b[i] == b'-' || b[i] == b'+' {
        i += 1;
    }
    while i < b.len() && b[i].is_ascii_digit() {
        i += 1;
    }
    let mut float = false;
    if i + 1 < b.len() && b[i] == b'.' && b[i + 1].is_ascii_digit() {
        float = true;
        i += 1;
        while i < b.len() && b[i].is_ascii_digit() {
            i += 1;
        }
    }
    let s = &input[start..i];
    let kind = if float {
        TokenKind::Float(
            s.parse()
                .map_err(|_| ExpandError::new(start, "invalid number"))?,
        )
    } else {
        TokenKind::Int(
            s.parse()
                .map_err(|_| ExpandError::new(start, "integer out of range"))?,
        )
    };
    Ok((kind, i))
}

#[cfg(test)]
#[path = "../../tests/unit/expand/lexer.rs"]
mod tests;
