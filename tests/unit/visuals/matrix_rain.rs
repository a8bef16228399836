use super::*;
use crate::visuals::tests::{frames, lit};

#[test]
fn deterministic_given_seed() {
    let green = Color::rgba(0, 255, 0, 255);
    let a = frames(&mut MatrixRain::new(4, green, 30), Size::new(16, 16), 40);
    let b = frames(&mut MatrixRain::new(4, green, 30), Size::new(16, 16), 40);
    assert_eq!(a, b);
}

#[test]
fn zero_density_stays_dark() {
    let f = frames(&mut MatrixRain::new(1, Color::WHITE, 0), Size::new(8, 8), 10);
    assert!(f.iter().all(|img| lit(img) == 0));
}

#[test]
fn full_density_starts_every_column() {
    let f = frames(&mut MatrixRain::new(1, Color::WHITE, 100), Size::new(8, 8), 1);
    assert_eq!(lit(&f[0]), 8);
    assert!((0..8).all(|x| f[0].pixel(x, 0).to_array() == [255, 255, 255, 255]));
}
