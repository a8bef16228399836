use super::*;
use crate::visuals::tests::{frames, lit};

#[test]
fn deterministic_given_seed() {
    let a = frames(&mut Gravity::new(5, 10, 0.2, None), Size::new(32, 16), 30);
    let b = frames(&mut Gravity::new(5, 10, 0.2, None), Size::new(32, 16), 30);
    assert_eq!(a, b);
}

#[test]
fn particles_stay_inside_the_box() {
    let mut g = Gravity::new(11, 8, 0.5, Some(Color::WHITE));
    for f in frames(&mut g, Size::new(16, 8), 200) {
        assert!(lit(&f) <= 8);
    }
    for p in &g.particles {
        assert!((0.0..=15.0).contains(&p.pos.x));
        assert!(p.pos.y <= 7.0);
    }
}
