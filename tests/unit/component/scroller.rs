use super::*;
use crate::assets::color::Color;

fn lit_columns(img: &Bitmap) -> Vec<i32> {
    (0..img.width() as i32)
        .filter(|&x| (0..img.height() as i32).any(|y| img.pixel(x, y).a > 0))
        .collect()
}

fn bar(width: u32) -> Template {
    Template::new()
        .with_base(NodeBase::new(Some(Dim::Px(width)), Some(Dim::Px(2)), None))
        .with_background(Color::WHITE)
}

#[test]
fn scrolls_left_and_wraps_with_gap() {
    let mut inner = Template::new();
    inner.push_child(Box::new(bar(2)));
    let mut s = Scroller::new(inner)
        .with_base(NodeBase::new(Some(Dim::Px(10)), Some(Dim::Px(2)), None))
        .with_motion(ScrollDir::Left, 1, 3)
        .with_content_size(Dim::Px(2), Dim::Px(2));
    s.init(Size::new(64, 32)).unwrap();

    assert_eq!(lit_columns(&s.render().unwrap()), vec![0, 1, 5, 6]);
    assert_eq!(lit_columns(&s.render().unwrap()), vec![0, 4, 5, 9]);
    assert_eq!(s.offset(), 2);
    for _ in 0..3 {
        s.render().unwrap();
    }
    // Period is content + gap = 5, so the offset wraps.
    assert_eq!(s.offset(), 0);
}

#[test]
fn scrolls_right() {
    let mut inner = Template::new();
    inner.push_child(Box::new(bar(2)));
    let mut s = Scroller::new(inner)
        .with_base(NodeBase::new(Some(Dim::Px(10)), Some(Dim::Px(2)), None))
        .with_motion(ScrollDir::Right, 2, 8)
        .with_content_size(Dim::Px(2), Dim::Px(2));
    s.init(Size::new(64, 32)).unwrap();
    assert_eq!(lit_columns(&s.render().unwrap()), vec![0, 1]);
    assert_eq!(lit_columns(&s.render().unwrap()), vec![2, 3]);
}

#[test]
fn parse_directions() {
    assert_eq!(ScrollDir::parse("UP"), Some(ScrollDir::Up));
    assert_eq!(ScrollDir::parse("diagonal"), None);
}

#[test]
fn huge_speed_wraps_without_overflow() {
    let mut inner = Template::new();
    inner.push_child(Box::new(bar(4)));
    let mut s = Scroller::new(inner)
        .with_base(NodeBase::new(Some(Dim::Px(10)), Some(Dim::Px(2)), None))
        .with_motion(ScrollDir::Left, u32::MAX, 0)
        .with_content_size(Dim::Px(4), Dim::Px(2));
    s.init(Size::new(64, 32)).unwrap();

    // Period 4: each step advances by u32::MAX % 4 == 3.
    s.render().unwrap();
    assert_eq!(s.offset(), 3);
    s.render().unwrap();
    assert_eq!(s.offset(), 2);
    s.render().unwrap();
    assert_eq!(s.offset(), 1);
}

#[test]
fn huge_gap_draws_content_once() {
    let mut inner = Template::new();
    inner.push_child(Box::new(bar(2)));
    let mut s = Scroller::new(inner)
        .with_base(NodeBase::new(Some(Dim::Px(10)), Some(Dim::Px(2)), None))
        .with_motion(ScrollDir::Left, 1, u32::MAX)
        .with_content_size(Dim::Px(2), Dim::Px(2));
    s.init(Size::new(64, 32)).unwrap();
    assert_eq!(lit_columns(&s.render().unwrap()), vec![0, 1]);
    assert_eq!(lit_columns(&s.render().unwrap()), vec![0]);
}
