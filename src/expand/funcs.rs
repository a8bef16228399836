use std::cmp::Ordering;

use chrono::{DateTime, Local, TimeZone as _};
use serde_json::Value;

use crate::expand::exec::{print, truthy};

type FnResult = Result<Value, String>;

pub(crate) fn call(name: &str, args: &[Value]) -> FnResult {
    match name {
        "ordinal" => ordinal(one(name, args)?),
        "date" => date(args),
        "upper" => Ok(Value::String(print(one(name, args)?).to_uppercase())),
        "lower" => Ok(Value::String(print(one(name, args)?).to_lowercase())),
        "xml" => Ok(Value::String(escape_xml(&print(one(name, args)?)))),
        "eq" => {
            let (first, rest) = args
                .split_first()
                .filter(|(_, rest)| !rest.is_empty())
                .ok_or("eq: wrong number of args: want at least 2")?;
            Ok(Value::Bool(rest.iter().any(|v| loose_eq(first, v))))
        }
        "ne" => {
            let (a, b) = two(name, args)?;
            Ok(Value::Bool(!loose_eq(a, b)))
        }
        "lt" => compare(name, args, |o| o == Ordering::Less),
        "le" => compare(name, args, |o| o != Ordering::Greater),
        "gt" => compare(name, args, |o| o == Ordering::Greater),
        "ge" => compare(name, args, |o| o != Ordering::Less),
        "and" => {
            let last = args.last().ok_or("and: wrong number of args: want at least 1")?;
            Ok(args.iter().find(|v| !truthy(v)).unwrap_or(last).clone())
        }
        "or" => {
            let last = args.last().ok_or("or: wrong number of args: want at least 1")?;
            Ok(args.iter().find(|v| truthy(v)).unwrap_or(last).clone())
        }
        "not" => Ok(Value::Bool(!truthy(one(name, args)?))),
        "len" => len(one(name, args)?),
        "index" => index(args),
        "add" => arith(name, args, i64::checked_add, |a, b| a + b),
        "sub" => arith(name, args, i64::checked_sub, |a, b| a - b),
        "mul" => arith(name, args, i64::checked_mul, |a, b| a * b),
        "div" => {
            let (_, b) = two(name, args)?;
            if number(b).is_some_and(|v| v == 0.0) {
                return Err("div: division by zero".to_owned());
            }
            arith(name, args, i64::checked_div, |a, b| a / b)
        }
        "mod" => {
            let (_, b) = two(name, args)?;
            if number(b).is_some_and(|v| v == 0.0) {
                return Err("mod: division by zero".to_owned());
            }
            arith(name, args, i64::checked_rem, |a, b| a % b)
        }
        "default" => {
            let (fallback, v) = two(name, args)?;
            Ok(if truthy(v) { v } else { fallback }.clone())
        }
        _ => Err(format!("function \"{name}\" not defined")),
    }
}

fn one<'a>(name: &str, args: &'a [Value]) -> Result<&'a Value, String> {
    match args {
        [a] => Ok(a),
        _ => Err(format!("{name}: wrong number of args: want 1, got {}", args.len())),
    }
}

fn two<'a>(name: &str, args: &'a [Value]) -> Result<(&'a Value, &'a Value), String> {
    match args {
        [a, b] => Ok((a, b)),
        _ => Err(format!("{name}: wrong number of args: want 2, got {}", args.len())),
    }
}

/// Numbers and numeric strings as `f64`.
fn number(v: &Value) -> Option<f64> {
    match v {
        Value::Number(n) => n.as_f64(),
        Value::String(s) => s.trim().parse().ok(),
        _ => None,
    }
}

fn integer(v: &Value) -> Option<i64> {
    match v {
        Value::Number(n) => n.as_i64(),
        Value::String(s) => s.trim().parse().ok(),
        _ => None,
    }
}

/// Numbers compare by value regardless of integer/float representation.
fn loose_eq(a: &Value, b: &Value) -> bool {
    match (a, b) {
        (Value::Number(x), Value::Number(y)) => x.as_f64() == y.as_f64(),
        _ => a == b,
    }
}

fn compare(name: &str, args: &[Value], pick: impl Fn(Ordering) -> bool) -> FnResult {
    let (a, b) = two(name, args)?;
    let ord = match (a, b) {
        (Value::String(x), Value::String(y)) => x.cmp(y),
        _ => {
            let (Some(x), Some(y)) = (number(a), number(b)) else {
                return Err(format!("{name}: incompatible types for comparison"));
            };
            x.partial_cmp(&y)
                .ok_or_else(|| format!("{name}: values are not comparable"))?
        }
    };
    Ok(Value::Bool(pick(ord)))
}

fn arith(
    name: &str,
    args: &[Value],
    int_op: fn(i64, i64) -> Option<i64>,
    float_op: fn(f64, f64) -> f64,
) -> FnResult {
    let (a, b) = two(name, args)?;
    if let (Some(x), Some(y)) = (integer(a), integer(b))
        && let Some(v) = int_op(x, y)
    {
        return Ok(Value::from(v));
    }
    let (Some(x), Some(y)) = (number(a), number(b)) else {
        return Err(format!("{name}: arguments must be numbers"));
    };
    Ok(serde_json::Number::from_f64(float_op(x, y)).map_or(Value::Null, Value::Number))
}

fn ordinal(v: &Value) -> FnResult {
    let n = integer(v).ok_or_else(|| format!("ordinal: {v} is not an integer"))?;
    let suffix = match (n.rem_euclid(100), n.rem_euclid(10)) {
        (11..=13, _) => "th",
        (_, 1) => "st",
        (_, 2) => "nd",
        (_, 3) => "rd",
        _ => "th",
    };
    Ok(Value::String(format!("{n}{suffix}")))
}

/// `date FORMAT [TIME]`: strftime-style formatting of now, an RFC 3339 string, or Unix seconds.
fn date(args: &[Value]) -> FnResult {
    let (fmt, when) = match args {
        [fmt] => (fmt, None),
        [fmt, when] => (fmt, Some(when)),
        _ => return Err(format!("date: wrong number of args: want 1 or 2, got {}", args.len())),
    };
    let Value::String(fmt) = fmt else {
        return Err("date: format must be a string".to_owned());
    };
    let t: DateTime<Local> = match when {
        None | Some(Value::Null) => Local::now(),
        Some(Value::String(s)) => DateTime::parse_from_rfc3339(s)
            .map_err(|e| format!("date: invalid timestamp \"{s}\": {e}"))?
            .with_timezone(&Local),
        Some(v) => {
            let secs = integer(v).ok_or_else(|| format!("date: invalid timestamp {v}"))?;
            Local
                .timestamp_opt(secs, 0)
                .single()
                .ok_or_else(|| format!("date: timestamp {secs} out of range"))?
        }
    };
    let mut out = String::new();
    use std::fmt::Write as _;
    write!(out, "{}", t.format(fmt)).map_err(|_| format!("date: invalid format \"{fmt}\""))?;
    Ok(Value::String(out))
}

fn len(v: &Value) -> FnResult {
    let n = match v {
        Value::String(s) => s.chars().count(),
        Value::Array(a) => a.len(),
        Value::Object(o) => o.len(),
        Value::Null => 0,
        other => return Err(format!("len of {other}")),
    };
    Ok(Value::from(n))
}

fn index(args: &[Value]) -> FnResult {
    let (coll, keys) = args
        .split_first()
        .ok_or("index: wrong number of args: want at least 1")?;
    let mut cur = coll;
    for k in keys {
        cur = match (cur, k) {
            (Value::Array(a), k) => {
                let i = integer(k).ok_or_else(|| format!("index: cannot index array with {k}"))?;
                usize::try_from(i)
                    .ok()
                    .and_then(|i| a.get(i))
                    .ok_or_else(|| format!("index: index out of range: {i}"))?
            }
            (Value::Object(o), Value::String(s)) => match o.get(s) {
                Some(v) => v,
                None => return Ok(Value::Null),
            },
            (Value::Null, _) => return Ok(Value::Null),
            (c, k) => return Err(format!("index: cannot index {c} with {k}")),
        };
    }
    Ok(cur.clone())
}

pub(crate) fn escape_xml(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    for ch in s.chars() {
        match ch {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&apos;"),
            _ => out.push(ch),
        }
    }
    out
}

#[cfg(test)]
#[path = "../../tests/unit/expand/funcs.rs"]
mod tests;
