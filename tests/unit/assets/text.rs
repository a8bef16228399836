use super::*;

#[test]
fn builtin_names_resolve_case_insensitively() {
    assert!(builtin_mono("6x10").is_some());
    assert!(builtin_mono(" 5X8 ").is_some());
    assert!(builtin_mono("Roboto.ttf").is_none());
}

#[test]
fn mono_extent_counts_spacing_and_lines() {
    let font = builtin_mono("6x10").unwrap();
    let s = mono_extent("ab", font);
    assert_eq!(s.width, 2 * font.character_size.width + font.character_spacing);
    assert_eq!(s.height, font.character_size.height);
    assert_eq!(mono_extent("a\nbcd", font).height, 2 * font.character_size.height);
    assert!(mono_extent("", font).is_empty());
}

#[test]
fn mono_raster_draws_lit_pixels_in_color() {
    let face = FontFace::Mono(builtin_mono("6x10").unwrap());
    let bmp = rasterize_text("H", &face, Color::rgba(0, 255, 0, 255)).unwrap();
    assert_eq!(bmp.size(), Size::new(6, 10));
    let lit = bmp.data().chunks_exact(4).filter(|p| p[3] == 255).count();
    assert!(lit > 0);
    assert!(bmp.data().chunks_exact(4).all(|p| p[0] == 0 && p[2] == 0));
}

#[test]
fn missing_font_file_fails_fast() {
    let err = load_font("nope.ttf", 8.0, Path::new("/nonexistent")).unwrap_err();
    assert!(matches!(err, BoardError::Asset(_)));
}

#[test]
fn outline_font_rasterizes_when_a_system_font_exists() {
    let candidates = [
        "/usr/share/fonts/truetype/dejavu/DejaVuSans.ttf",
        "/usr/share/fonts/TTF/DejaVuSans.ttf",
        "/usr/share/fonts/dejavu/DejaVuSans.ttf",
    ];
    let Some(path) = candidates.iter().map(Path::new).find(|p| p.exists()) else {
        return;
    };
    let dir = path.parent().unwrap();
    let name = path.file_name().unwrap().to_str().unwrap();
    let face = load_font(name, 12.0, dir).unwrap();
    let bmp = rasterize_text("Hi", &face, Color::WHITE).unwrap();
    assert!(bmp.width() > 0 && bmp.height() > 0);
    assert!(bmp.data().chunks_exact(4).any(|p| p[3] > 0));
}
