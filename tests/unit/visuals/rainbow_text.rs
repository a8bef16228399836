use super::*;
use crate::visuals::tests::{frames, lit};

#[test]
fn glyphs_are_centered_and_colored() {
    let f = frames(&mut RainbowText::new(1, "I", 30.0), Size::new(16, 16), 2);
    let img = &f[0];
    assert_eq!(img.size(), Size::new(16, 16));
    assert!(lit(img) > 0);
    // 6x10 glyph centered in 16x16 occupies columns 5..11 and rows 3..13.
    for y in 0..16 {
        for x in 0..16 {
            if img.pixel(x, y).a > 0 {
                assert!((5..11).contains(&x) && (3..13).contains(&y));
            }
        }
    }
    assert_ne!(f[0], f[1]);
}

#[test]
fn deterministic_given_seed() {
    let a = frames(&mut RainbowText::new(4, "Hi", 5.0), Size::new(20, 12), 3);
    let b = frames(&mut RainbowText::new(4, "Hi", 5.0), Size::new(20, 12), 3);
    assert_eq!(a, b);
}
