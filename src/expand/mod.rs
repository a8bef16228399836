//! Text-template expansion of view markup.
//!
//! Views emit markup containing `{{ ... }}` actions that are expanded against a JSON context
//! before compilation. Supported: field and variable references, literals, `|` pipelines,
//! parenthesized sub-pipelines, `if`/`else if`/`else`, `range` (optionally binding
//! `$i, $e :=`), `with`, `{{/* comments */}}`, and `{{-`/`-}}` whitespace trimming.
//!
//! Missing fields evaluate to null and print as empty text. Output is not escaped; use the
//! `xml` helper for untrusted strings.

mod ast;
mod error;
mod exec;
mod funcs;
mod lexer;
mod parser;

pub use error::ExpandError;

/// A parsed template that can be executed repeatedly.
#[derive(Debug, Clone)]
pub struct TextTemplate {
    nodes: Vec<ast::Node>,
}

impl TextTemplate {
    /// Parse `src`.
    pub fn parse(src: &str) -> Result<Self, ExpandError> {
        Ok(Self {
            nodes: parser::parse_template(src)?,
        })
    }

    /// Execute against `data`, which is both `.` and `$`.
    pub fn execute(&self, data: &serde_json::Value) -> Result<String, ExpandError> {
        exec::execute(&self.nodes, data)
    }
}

/// Parse and execute in one step.
pub fn expand(src: &str, data: &serde_json::Value) -> Result<String, ExpandError> {
    TextTemplate::parse(src)?.execute(data)
}

/// Escape `&`, `<`, `>`, `"` and `'` for embedding in markup.
pub fn escape_xml(s: &str) -> String {
    funcs::escape_xml(s)
}
