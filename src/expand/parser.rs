use crate::expand::ast::{Arg, Command, Node, Pipeline};
use crate::expand::error::ExpandError;
use crate::expand::lexer::{Token, TokenKind, lex};

pub(crate) fn parse_template(src: &str) -> Result<Vec<Node>, ExpandError> {
    let tokens = lex(src)?;
    let mut p = Parser { tokens, pos: 0 };
    let (nodes, end) = p.parse_list()?;
    match end {
        End::Eof => Ok(nodes),
        End::Else { offset } | End::ElseIf { offset, .. } => {
            Err(ExpandError::new(offset, "unexpected {{else}}"))
        }
        End::End { offset } => Err(ExpandError::new(offset, "unexpected {{end}}")),
    }
}

/// What terminated a node list.
enum End {
    Eof,
    End { offset: usize },
    Else { offset: usize },
    ElseIf { offset: usize, pipe: Pipeline },
}

struct Parser {
    tokens: Vec<Token>,
    pos: usize,
}

impl Parser {
    fn peek(&self) -> &Token {
        &self.tokens[self.pos]
    }

    fn peek_kind_at(&self, k: usize) -> Option<&TokenKind> {
        self.tokens.get(self.pos + k).map(|t| &t.kind)
    }

    fn peek_ident(&self, name: &str) -> bool {
        matches!(self.peek_kind_at(0), Some(TokenKind::Ident(s)) if s == name)
    }

    fn bump(&mut self) -> Token {
        let t = self.tokens[self.pos].clone();
        if self.pos + 1 < self.tokens.len() {
            self.pos += 1;
        }
        t
    }

    fn expect_close(&mut self) -> Result<(), ExpandError> {
        let t = self.bump();
        if t.kind == TokenKind::Close {
            Ok(())
        } else {
            Err(ExpandError::new(
                t.offset,
                format!("expected }}}}, found {:?}", t.kind),
            ))
        }
    }

    fn parse_list(&mut self) -> Result<(Vec<Node>, End), ExpandError> {
        let mut nodes = Vec::new();
        loop {
            let t = self.bump();
            match t.kind {
                TokenKind::Eof => return Ok((nodes, End::Eof)),
                TokenKind::Text(s) => nodes.push(Node::Text(s)),
                TokenKind::Open => {
                    let kw = match &self.peek().kind {
                        TokenKind::Ident(s) => s.clone(),
                        _ => String::new(),
                    };
                    match kw.as_str() {
                        "end" => {
                            self.bump();
                            self.expect_close()?;
                            return Ok((nodes, End::End { offset: t.offset }));
                        }
                        "else" => {
                            self.bump();
                            if self.peek_ident("if") {
                                self.bump();
                                let pipe = self.parse_pipeline()?;
                                self.expect_close()?;
                                return Ok((nodes, End::ElseIf {
                                    offset: t.offset,
                                    pipe,
                                }));
                            }
                            self.expect_close()?;
                            return Ok((nodes, End::Else { offset: t.offset }));
                        }
                        "if" => {
                            self.bump();
                            nodes.push(self.parse_if(t.offset)?);
                        }
                        "range" => {
                            self.bump();
                            nodes.push(self.parse_range(t.offset)?);
                        }
                        "with" => {
                            self.bump();
                            nodes.push(self.parse_with(t.offset)?);
                        }
                        _ => {
                            let pipe = self.parse_pipeline()?;
                            self.expect_close()?;
                            nodes.push(Node::Action(pipe));
                        }
                    }
                }
                other => {
                    return Err(ExpandError::new(
                        t.offset,
                        format!("unexpected token {other:?}"),
                    ));
                }
            }
        }
    }

    fn parse_if(&mut self, offset: usize) -> Result<Node, ExpandError> {
        let mut branches = Vec::new();
        let mut cond = self.parse_pipeline()?;
        self.expect_close()?;
        loop {
            let (body, end) = self.parse_list()?;
            branches.push((cond, body));
            match end {
                End::End { .. } => {
                    return Ok(Node::If {
                        branches,
                        otherwise: Vec::new(),
                    });
                }
                End::ElseIf { pipe, .. } => cond = pipe,
                End::Else { .. } => {
                    let otherwise = self.parse_tail(offset, "if")?;
                    return Ok(Node::If {
                        branches,
                        otherwise,
                    });
                }
                End::Eof => return Err(ExpandError::new(offset, "unclosed {{if}}")),
            }
        }
    }

    fn parse_range(&mut self, offset: usize) -> Result<Node, ExpandError> {
        let mut pipe = self.parse_pipeline()?;
        self.expect_close()?;
        let (key, value) = match pipe.decl.len() {
            0 => (None, None),
            1 => (None, pipe.decl.pop()),
            2 => {
                let v = pipe.decl.pop();
                (pipe.decl.pop(), v)
            }
            _ => return Err(ExpandError::new(pipe.offset, "range declares too many variables")),
        };
        let (body, otherwise) = self.parse_body(offset, "range")?;
        Ok(Node::Range {
            pipe,
            key,
            value,
            body,
            otherwise,
        })
    }

    fn parse_with(&mut self, offset: usize) -> Result<Node, ExpandError> {
        let pipe = self.parse_pipeline()?;
        self.expect_close()?;
        let (body, otherwise) = self.parse_body(offset, "with")?;
        Ok(Node::With {
            pipe,
            body,
            otherwise,
        })
    }

    /// Body plus optional `{{else}}` branch, through `{{end}}`.
    fn parse_body(
        &mut self,
        offset: usize,
        what: &str,
    ) -> Result<(Vec<Node>, Vec<Node>), ExpandError> {
        let (body, end) = self.parse_list()?;
        match end {
            End::End { .. } => Ok((body, Vec::new())),
            End::Else { .. } => Ok((body, self.parse_tail(offset, what)?)),
            End::ElseIf { offset, .. } => Err(ExpandError::new(
                offset,
                format!("{{{{else if}}}} is not allowed in {{{{{what}}}}}"),
            )),
            End::Eof => Err(ExpandError::new(offset, format!("unclosed {{{{{what}}}}}"))),
        }
    }

    /// The `{{else}}` branch, which must end with `{{end}}`.
    fn parse_tail(&mut self, offset: usize, what: &str) -> Result<Vec<Node>, ExpandError> {
        let (nodes, end) = self.parse_list()?;
        match end {
            End::End { .. } => Ok(nodes),
            End::Eof => Err(ExpandError::new(offset, format!("unclosed {{{{{what}}}}}"))),
            End::Else { offset } | End::ElseIf { offset, .. } => {
                Err(ExpandError::new(offset, "{{else}} after {{else}}"))
            }
        }
    }

    fn parse_pipeline(&mut self) -> Result<Pipeline, ExpandError> {
        let offset = self.peek().offset;
        let decl = self.parse_decl();
        let mut cmds = Vec::new();
        loop {
            let cmd = self.parse_command()?;
            if cmd.args.is_empty() {
                let msg = if cmds.is_empty() && decl.is_empty() {
                    "empty action"
                } else {
                    "missing command in pipeline"
                };
                return Err(ExpandError::new(cmd.offset, msg));
            }
            cmds.push(cmd);
            if matches!(self.peek().kind, TokenKind::Pipe) {
                self.bump();
                continue;
            }
            break;
        }
        Ok(Pipeline { offset, decl, cmds })
    }

    /// `$a :=` or `$a, $b :=`; leaves the cursor untouched when absent.
    fn parse_decl(&mut self) -> Vec<String> {
        let var = |k: Option<&TokenKind>| match k {
            Some(TokenKind::Var(name, path)) if path.is_empty() => Some(name.clone()),
            _ => None,
        };
        let first = var(self.peek_kind_at(0));
        if let (Some(a), Some(TokenKind::Declare)) = (first, self.peek_kind_at(1)) {
            self.pos += 2;
            return vec![a];
        }
        if let (Some(a), Some(TokenKind::Comma), Some(b), Some(TokenKind::Declare)) = (
            var(self.peek_kind_at(0)),
            self.peek_kind_at(1),
            var(self.peek_kind_at(2)),
            self.peek_kind_at(3),
        ) {
            self.pos += 4;
            return vec![a, b];
        }
        Vec::new()
    }

    fn parse_command(&mut self) -> Result<Command, ExpandError> {
        let offset = self.peek().offset;
        let mut args = Vec::new();
        loop {
            let kind = self.peek().kind.clone();
            let arg = match kind {
                TokenKind::Close | TokenKind::Pipe | TokenKind::RParen | TokenKind::Eof => break,
                TokenKind::Field(p) => Arg::Field(p),
                TokenKind::Var(n, p) => Arg::Var(n, p),
                TokenKind::Str(s) => Arg::Str(s),
                TokenKind::Int(v) => Arg::Int(v),
                TokenKind::Float(v) => Arg::Float(v),
                TokenKind::Ident(s) => match s.as_str() {
                    "true" => Arg::Bool(true),
                    "false" => Arg::Bool(false),
                    "nil" => Arg::Nil,
                    _ => Arg::Func(s),
                },
                TokenKind::LParen => {
                    self.bump();
                    let inner = self.parse_pipeline()?;
                    let t = self.peek().clone();
                    if t.kind != TokenKind::RParen {
                        return Err(ExpandError::new(t.offset, "unclosed parenthesis"));
                    }
                    Arg::Pipe(Box::new(inner))
                }
                other => {
                    return Err(ExpandError::new(
                        self.peek().offset,
                        format!("unexpected {other:?} in command"),
                    ));
                }
            };
            self.bump();
            args.push(arg);
        }
        Ok(Command { offset, args })
    }
}

#[cfg(test)]
#[path = "../../tests/unit/expand/parser.rs"]
mod tests;
