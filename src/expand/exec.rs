use serde_json::Value;

use crate::expand::ast::{Arg, Command, Node, Pipeline};
use crate::expand::error::ExpandError;
use crate::expand::funcs;

/// Nested control flow beyond this depth is treated as a runaway template.
const MAX_DEPTH: usize = 64;

pub(crate) fn execute(nodes: &[Node], data: &Value) -> Result<String, ExpandError> {
    let mut st = State {
        out: String::new(),
        vars: vec![("".to_owned(), data.clone())],
        depth: 0,
    };
    st.walk(nodes, data)?;
    Ok(st.out)
}

/// Truthiness: empty values (null, false, 0, "", [], {}) are false.
pub(crate) fn truthy(v: &Value) -> bool {
    match v {
        Value::Null => false,
        Value::Bool(b) => *b,
        Value::Number(n) => n.as_f64().is_some_and(|f| f != 0.0),
        Value::String(s) => !s.is_empty(),
        Value::Array(a) => !a.is_empty(),
        Value::Object(o) => !o.is_empty(),
    }
}

/// Text form used for interpolation; null prints as nothing.
pub(crate) fn print(v: &Value) -> String {
    match v {
        Value::Null => String::new(),
        Value::String(s) => s.clone(),
        other => other.to_string(),
    }
}

struct State {
    out: String,
    vars: Vec<(String, Value)>,
    depth: usize,
}

impl State {
    fn walk(&mut self, nodes: &[Node], dot: &Value) -> Result<(), ExpandError> {
        for node in nodes {
            self.node(node, dot)?;
        }
        Ok(())
    }

    /// Run `nodes` in a variable scope that is discarded afterwards.
    fn scoped(&mut self, nodes: &[Node], dot: &Value) -> Result<(), ExpandError> {
        let mark = self.vars.len();
        self.depth += 1;
        if self.depth > MAX_DEPTH {
            return Err(ExpandError::new(0, "template nesting too deep"));
        }
        let r = self.walk(nodes, dot);
        self.depth -= 1;
        self.vars.truncate(mark);
        r
    }

    fn node(&mut self, node: &Node, dot: &Value) -> Result<(), ExpandError> {
        match node {
            Node::Text(s) => self.out.push_str(s),
            Node::Action(pipe) => {
                let v = self.pipeline(pipe, dot)?;
                if pipe.decl.is_empty() {
                    self.out.push_str(&print(&v));
                }
            }
            Node::If {
                branches,
                otherwise,
            } => {
                let mark = self.vars.len();
                let mut taken = None;
                for (cond, body) in branches {
                    if truthy(&self.pipeline(cond, dot)?) {
                        taken = Some(body);
                        break;
                    }
                }
                let r = self.scoped(taken.unwrap_or(otherwise), dot);
                self.vars.truncate(mark);
                r?;
            }
            Node::With {
                pipe,
                body,
                otherwise,
            } => {
                let mark = self.vars.len();
                let v = self.pipeline(pipe, dot)?;
                let r = if truthy(&v) {
                    self.scoped(body, &v)
                } else {
                    self.scoped(otherwise, dot)
                };
                self.vars.truncate(mark);
                r?;
            }
            Node::Range {
                pipe,
                key,
                value,
                body,
                otherwise,
            } => {
                let mark = self.vars.len();
                let v = self.pipeline(pipe, dot)?;
                let items: Vec<(Value, Value)> = match v {
                    Value::Array(a) => a
                        .into_iter()
                        .enumerate()
                        .map(|(i, e)| (Value::from(i), e))
                        .collect(),
                    Value::Object(o) => o.into_iter().map(|(k, e)| (Value::String(k), e)).collect(),
                    Value::Number(n) if n.as_u64().is_some() => (0..n.as_u64().unwrap_or(0))
                        .map(|i| (Value::from(i), Value::from(i)))
                        .collect(),
                    Value::Null => Vec::new(),
                    other => {
                        return Err(ExpandError::new(
                            pipe.offset,
                            format!("range can't iterate over {other}"),
                        ));
                    }
                };
                let r = if items.is_empty() {
                    self.scoped(otherwise, dot)
                } else {
                    let mut r = Ok(());
                    for (k, e) in items {
                        let inner = self.vars.len();
                        if let Some(name) = key {
                            self.vars.push((name.clone(), k));
                        }
                        if let Some(name) = value {
                            self.vars.push((name.clone(), e.clone()));
                        }
                        r = self.scoped(body, &e);
                        self.vars.truncate(inner);
                        if r.is_err() {
                            break;
                        }
                    }
                    r
                };
                self.vars.truncate(mark);
                r?;
            }
        }
        Ok(())
    }

    fn pipeline(&mut self, pipe: &Pipeline, dot: &Value) -> Result<Value, ExpandError> {
        let mut piped: Option<Value> = None;
        for cmd in &pipe.cmds {
            piped = Some(self.command(cmd, dot, piped)?);
        }
        let v = piped.unwrap_or(Value::Null);
        // `range` binds its own variables from the declaration.
        if pipe.decl.len() == 1 {
            self.vars.push((pipe.decl[0].clone(), v.clone()));
        }
        Ok(v)
    }

    fn command(
        &mut self,
        cmd: &Command,
        dot: &Value,
        piped: Option<Value>,
    ) -> Result<Value, ExpandError> {
        let Some(first) = cmd.args.first() else {
            return Err(ExpandError::new(cmd.offset, "empty command"));
        };
        if let Arg::Func(name) = first {
            let mut args = Vec::with_capacity(cmd.args.len());
            for a in &cmd.args[1..] {
                args.push(self.arg(a, dot, cmd.offset)?);
            }
            if let Some(p) = piped {
                args.push(p);
            }
            return funcs::call(name, &args).map_err(|m| ExpandError::new(cmd.offset, m));
        }
        if cmd.args.len() > 1 || piped.is_some() {
            return Err(ExpandError::new(
                cmd.offset,
                "can't give arguments to a non-function",
            ));
        }
        self.arg(first, dot, cmd.offset)
    }

    fn arg(&mut self, arg: &Arg, dot: &Value, offset: usize) -> Result<Value, ExpandError> {
        Ok(match arg {
            Arg::Field(path) => lookup(dot, path),
            Arg::Var(name, path) => {
                let Some((_, v)) = self.vars.iter().rev().find(|(n, _)| n == name) else {
                    return Err(ExpandError::new(offset, format!("undefined variable ${name}")));
                };
                lookup(v, path)
            }
            Arg::Func(name) => {
                funcs::call(name, &[]).map_err(|m| ExpandError::new(offset, m))?
            }
            Arg::Str(s) => Value::String(s.clone()),
            Arg::Int(v) => Value::from(*v),
            Arg::Float(v) => Value::from(*v),
            Arg::Bool(b) => Value::Bool(*b),
            Arg::Nil => Value::Null,
            Arg::Pipe(p) => self.pipeline(p, dot)?,
        })
    }
}

/// Walk `path` through nested objects; anything missing is null.
fn lookup(v: &Value, path: &[String]) -> Value {
    let mut cur = v;
    for seg in path {
        match cur.get(seg.as_str()) {
            Some(next) => cur = next,
            None => return Value::Null,
        }
    }
    cur.clone()
}

#[cfg(test)]
#[path = "../../tests/unit/expand/exec.rs"]
mod tests;
