use super::*;

fn red() -> Rgba8Premul {
    Rgba8Premul::opaque(255, 0, 0)
}

#[test]
fn new_bitmap_is_transparent_and_sized() {
    let b = Bitmap::new(Size::new(3, 2));
    assert_eq!(b.data().len(), 3 * 2 * 4);
    assert!(b.data().iter().all(|&v| v == 0));
}

#[test]
fn from_premul_bytes_rejects_wrong_len() {
    assert!(Bitmap::from_premul_bytes(2, 2, vec![0; 15]).is_err());
    assert!(Bitmap::from_premul_bytes(2, 2, vec![0; 16]).is_ok());
}

#[test]
fn draw_over_clips_negative_and_overflowing_offsets() {
    let mut dst = Bitmap::new(Size::new(4, 4));
    let src = Bitmap::filled(Size::new(3, 3), red());
    dst.draw_over(&src, Pos::new(-2, 2));
    assert_eq!(dst.pixel(0, 2), red());
    assert_eq!(dst.pixel(0, 3), red());
    assert_eq!(dst.pixel(1, 2), Rgba8Premul::transparent());
    assert_eq!(dst.pixel(0, 1), Rgba8Premul::transparent());
}

#[test]
fn draw_over_blends_half_alpha() {
    let mut dst = Bitmap::filled(Size::new(1, 1), Rgba8Premul::opaque(0, 0, 255));
    let src = Bitmap::filled(Size::new(1, 1), Rgba8Premul::from_straight_rgba(255, 0, 0, 128));
    dst.draw_over(&src, Pos::new(0, 0));
    let px = dst.pixel(0, 0);
    assert_eq!(px.a, 255);
    assert_eq!(px.r, 128);
    assert_eq!(px.b, 127);
}

#[test]
fn fit_to_pads_and_crops_from_top_left() {
    let src = Bitmap::filled(Size::new(2, 2), red());
    let padded = src.fit_to(Size::new(3, 1));
    assert_eq!(padded.size(), Size::new(3, 1));
    assert_eq!(padded.pixel(1, 0), red());
    assert_eq!(padded.pixel(2, 0), Rgba8Premul::transparent());
}

#[test]
fn rgba_image_roundtrip_keeps_opaque_pixels() {
    let mut img = image::RgbaImage::new(2, 1);
    img.put_pixel(0, 0, image::Rgba([10, 20, 30, 255]));
    let b = Bitmap::from_rgba_image(&img);
    assert_eq!(b.pixel(0, 0), Rgba8Premul::opaque(10, 20, 30));
    assert_eq!(b.to_rgba_image().get_pixel(0, 0).0, [10, 20, 30, 255]);
}
