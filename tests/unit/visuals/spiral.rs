use super::*;
use crate::visuals::tests::{frames, lit};

#[test]
fn deterministic_and_rotating() {
    let a = frames(&mut Spiral::new(1, 3, 12.0), Size::new(16, 16), 3);
    let b = frames(&mut Spiral::new(1, 3, 12.0), Size::new(16, 16), 3);
    assert_eq!(a, b);
    assert_eq!(lit(&a[0]), 256);
    assert_ne!(a[0], a[1]);
}

#[test]
fn arm_count_is_at_least_one() {
    assert_eq!(Spiral::new(0, 0, 1.0).arms, 1);
}
