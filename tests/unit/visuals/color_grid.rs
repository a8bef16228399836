use super::*;
use crate::visuals::tests::{frames, lit};

#[test]
fn fills_the_box_and_is_deterministic() {
    let a = frames(&mut ColorGrid::new(7, 4, 10), Size::new(10, 8), 5);
    let b = frames(&mut ColorGrid::new(7, 4, 10), Size::new(10, 8), 5);
    assert_eq!(a, b);
    assert_eq!(a[0].size(), Size::new(10, 8));
    assert_eq!(lit(&a[0]), 80);
}

#[test]
fn frames_change_over_time() {
    let f = frames(&mut ColorGrid::new(1, 2, 50), Size::new(8, 8), 3);
    assert_ne!(f[0], f[2]);
}

#[test]
fn zero_change_keeps_the_grid() {
    let f = frames(&mut ColorGrid::new(3, 2, 0), Size::new(6, 6), 3);
    assert_eq!(f[0], f[2]);
}
