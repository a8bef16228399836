use super::*;

#[test]
fn parses_hex_rgb_and_rgba() {
    assert_eq!(Color::parse("#ff0000").unwrap(), Color::rgba(255, 0, 0, 255));
    assert_eq!(Color::parse("#0000FF80").unwrap(), Color::rgba(0, 0, 255, 128));
    assert_eq!(Color::parse("00ff00").unwrap(), Color::rgba(0, 255, 0, 255));
}

#[test]
fn rejects_bad_lengths_and_digits() {
    assert!(Color::parse("#fff").is_err());
    assert!(Color::parse("#gg0000").is_err());
    assert!(Color::parse("#ff00é0").is_err());
}

#[test]
fn premul_scales_channels_by_alpha() {
    let c = Color::rgba(255, 255, 255, 0).premul();
    assert_eq!(c, Rgba8Premul::transparent());
}

#[test]
fn hsv_primary_hues() {
    assert_eq!(hsv(0.0, 1.0, 1.0), Rgba8Premul::opaque(255, 0, 0));
    assert_eq!(hsv(120.0, 1.0, 1.0), Rgba8Premul::opaque(0, 255, 0));
    assert_eq!(hsv(240.0, 1.0, 1.0), Rgba8Premul::opaque(0, 0, 255));
    assert_eq!(hsv(360.0, 1.0, 1.0), hsv(0.0, 1.0, 1.0));
}
