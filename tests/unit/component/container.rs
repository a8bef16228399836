use super::*;
use crate::foundation::core::Dim;

#[test]
fn border_padding_and_inner_box() {
    let mut inner = Template::new().with_background(Color::rgba(0, 255, 0, 255));
    inner.push_child(Box::new(crate::component::text::Text::new("A")));
    let mut c = Container::new(inner)
        .with_base(NodeBase::new(Some(Dim::Px(20)), Some(Dim::Px(16)), None))
        .with_padding(1)
        .with_border(2, Color::rgba(255, 0, 0, 255));
    c.init(Size::new(64, 32)).unwrap();

    assert_eq!(c.size(), Size::new(20, 16));
    assert_eq!(c.inner().size(), Size::new(14, 10));

    let img = c.render().unwrap();
    assert_eq!(img.size(), Size::new(20, 16));
    assert_eq!(img.pixel(0, 0).to_array(), [255, 0, 0, 255]);
    assert_eq!(img.pixel(19, 15).to_array(), [255, 0, 0, 255]);
    // Padding stays transparent without a background.
    assert_eq!(img.pixel(2, 2).a, 0);
    // Inner template background starts at border + padding.
    assert_eq!(img.pixel(16, 12).to_array(), [0, 255, 0, 255]);
}

#[test]
fn oversized_inset_collapses_the_inner_box() {
    let mut c = Container::new(Template::new())
        .with_base(NodeBase::new(Some(Dim::Px(4)), Some(Dim::Px(4)), None))
        .with_padding(5);
    c.init(Size::new(64, 32)).unwrap();
    assert!(c.inner().size().is_empty());
    assert_eq!(c.render().unwrap().size(), Size::new(4, 4));
}
