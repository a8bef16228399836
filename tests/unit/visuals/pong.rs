use super::*;
use crate::visuals::tests::frames;

#[test]
fn deterministic_given_seed() {
    let a = frames(&mut Pong::new(3, Color::WHITE, Color::WHITE), Size::new(32, 16), 60);
    let b = frames(&mut Pong::new(3, Color::WHITE, Color::WHITE), Size::new(32, 16), 60);
    assert_eq!(a, b);
}

#[test]
fn paddles_sit_on_both_edges() {
    let red = Color::rgba(255, 0, 0, 255);
    let f = frames(&mut Pong::new(1, Color::WHITE, red), Size::new(32, 16), 1);
    let img = &f[0];
    let on_edge = |x: i32| (0..16).any(|y| img.pixel(x, y).to_array() == [255, 0, 0, 255]);
    assert!(on_edge(0));
    assert!(on_edge(31));
}

#[test]
fn ball_stays_in_bounds() {
    let mut p = Pong::new(8, Color::WHITE, Color::WHITE);
    frames(&mut p, Size::new(20, 10), 500);
    assert!((0.0..=19.0).contains(&p.ball.x));
    assert!((0.0..=9.0).contains(&p.ball.y));
}
