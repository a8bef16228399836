use crate::assets::color::Color;
use crate::component::NodeBase;
use crate::foundation::core::Dim;

/// Typed attribute access for one element.
///
/// Malformed values degrade to the caller's default and log a warning; absent values are
/// silent.
#[derive(Clone, Copy)]
pub(crate) struct Attrs<'a, 'input> {
    node: roxmltree::Node<'a, 'input>,
}

impl<'a, 'input> Attrs<'a, 'input> {
    pub(crate) fn of(node: roxmltree::Node<'a, 'input>) -> Self {
        Self { node }
    }

    pub(crate) fn raw(&self, name: &str) -> Option<&'a str> {
        self.node.attribute(name)
    }

    fn degrade(&self, name: &str, value: &str, expected: &str) {
        tracing::warn!(
            element = self.node.tag_name().name(),
            attribute = name,
            value,
            expected,
            "malformed attribute; using default"
        );
    }

    /// Parse with `parse`, warning when the value is present but rejected.
    pub(crate) fn parsed<T>(
        &self,
        name: &str,
        expected: &str,
        parse: impl FnOnce(&str) -> Option<T>,
    ) -> Option<T> {
        let raw = self.raw(name)?;
        let out = parse(raw);
        if out.is_none() {
            self.degrade(name, raw, expected);
        }
        out
    }

    pub(crate) fn dim(&self, name: &str) -> Option<Dim> {
        self.parsed(name, "pixels or percentage", Dim::parse)
    }

    pub(crate) fn int(&self, name: &str) -> Option<i64> {
        self.parsed(name, "integer", |s| s.trim().parse().ok())
    }

    /// Non-negative integer; values above `u32::MAX` saturate.
    pub(crate) fn uint_or(&self, name: &str, default: u32) -> u32 {
        self.parsed(name, "non-negative integer", |s| {
            let s = s.trim();
            if !s.is_empty() && s.bytes().all(|b| b.is_ascii_digit()) {
                Some(s.parse::<u32>().unwrap_or(u32::MAX))
            } else {
                None
            }
        })
        .unwrap_or(default)
    }

    pub(crate) fn float_or(&self, name: &str, default: f64) -> f64 {
        self.parsed(name, "number", |s| {
            s.trim().parse::<f64>().ok().filter(|v| v.is_finite())
        })
        .unwrap_or(default)
    }

    pub(crate) fn color(&self, name: &str) -> Option<Color> {
        self.parsed(name, "#RRGGBB or #RRGGBBAA", |s| Color::parse(s).ok())
    }

    pub(crate) fn color_or(&self, name: &str, default: Color) -> Color {
        self.color(name).unwrap_or(default)
    }

    /// `"true"` is true, any other present value is false.
    pub(crate) fn bool_or(&self, name: &str, default: bool) -> bool {
        self.raw(name)
            .map_or(default, |s| s.trim().eq_ignore_ascii_case("true"))
    }

    pub(crate) fn str_or(&self, name: &str, default: &str) -> String {
        self.raw(name).unwrap_or(default).to_owned()
    }

    /// `width`, `height` and `render-interval`, shared by every variant.
    pub(crate) fn node_base(&self) -> NodeBase {
        NodeBase::new(
            self.dim("width"),
            self.dim("height"),
            self.int("render-interval"),
        )
    }

    /// Concatenated, trimmed text content of the element.
    pub(crate) fn text(&self) -> String {
        let s: String = self
            .node
            .children()
            .filter(|c| c.is_text())
            .filter_map(|c| c.text())
            .collect();
        s.trim().to_owned()
    }
}

#[cfg(test)]
#[path = "../../tests/unit/compile/attrs.rs"]
mod tests;
