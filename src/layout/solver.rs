use crate::foundation::core::{Pos, Size};

/// Primary axis of a template.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum Direction {
    /// Children flow left to right.
    #[default]
    Row,
    /// Children flow top to bottom.
    Column,
}

impl Direction {
    /// Parse `row` / `column`.
    pub fn parse(s: &str) -> Option<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "row" => Some(Self::Row),
            "column" | "col" => Some(Self::Column),
            _ => None,
        }
    }
}

/// Distribution mode used for both `justify` (primary axis) and `align` (secondary axis).
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum Distribute {
    /// Pack at the leading edge.
    #[default]
    Start,
    /// Center the content.
    Center,
    /// Pack at the trailing edge.
    End,
    /// Equal gaps between items, none at the edges.
    SpaceBetween,
    /// Equal gaps around every item, half-gaps at the edges.
    SpaceAround,
}

impl Distribute {
    /// Parse `start`, `center`, `end`, `space-between`, `space-around`.
    pub fn parse(s: &str) -> Option<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "start" | "flex-start" => Some(Self::Start),
            "center" => Some(Self::Center),
            "end" | "flex-end" => Some(Self::End),
            "space-between" => Some(Self::SpaceBetween),
            "space-around" => Some(Self::SpaceAround),
            _ => None,
        }
    }
}

/// Leading offset and inter-item spacing for `n` items whose lengths sum to `content`.
///
/// Integer division truncates toward zero; `remaining` may be negative when content overflows.
pub fn distribute(container: u32, content: u32, n: usize, mode: Distribute) -> (i32, i32) {
    let remaining = container as i32 - content as i32;
    let n = n as i32;
    match mode {
        Distribute::Start => (0, 0),
        Distribute::Center => (remaining / 2, 0),
        Distribute::End => (remaining, 0),
        Distribute::SpaceBetween => {
            if n <= 1 {
                (0, 0)
            } else {
                (0, remaining / (n - 1))
            }
        }
        Distribute::SpaceAround => {
            if n == 0 {
                (0, 0)
            } else {
                let spacing = remaining / n;
                (spacing / 2, spacing)
            }
        }
    }
}

/// Place `children` inside `container`.
///
/// Returns one top-left position per child, in order.
pub fn place_children(
    container: Size,
    children: &[Size],
    direction: Direction,
    justify: Distribute,
    align: Distribute,
) -> Vec<Pos> {
    let (primary_len, secondary_len) = match direction {
        Direction::Row => (container.width, container.height),
        Direction::Column => (container.height, container.width),
    };
    let split = |s: &Size| match direction {
        Direction::Row => (s.width, s.height),
        Direction::Column => (s.height, s.width),
    };

    let total: u32 = children.iter().map(|s| split(s).0).sum();
    let (offset, spacing) = distribute(primary_len, total, children.len(), justify);

    let mut cursor = offset;
    let mut out = Vec::with_capacity(children.len());
    for child in children {
        let (p, s) = split(child);
        let (cross, _) = distribute(secondary_len, s, 1, align);
        out.push(match direction {
            Direction::Row => Pos::new(cursor, cross),
            Direction::Column => Pos::new(cross, cursor),
        });
        cursor += p as i32 + spacing;
    }
    out
}

#[cfg(test)]
#[path = "../../tests/unit/layout/solver.rs"]
mod tests;
