use super::*;

#[test]
fn display_prefixes_are_stable() {
    assert!(BoardError::config("x").to_string().contains("config error:"));
    assert!(BoardError::compile("x").to_string().contains("compile error:"));
    assert!(BoardError::asset("x").to_string().contains("asset error:"));
    assert!(BoardError::render("x").to_string().contains("render error:"));
    assert!(
        BoardError::serde("x")
            .to_string()
            .contains("serialization error:")
    );
}

#[test]
fn other_preserves_source() {
    let base = std::io::Error::other("boom");
    let err = BoardError::Other(anyhow::Error::new(base));
    assert!(err.to_string().contains("boom"));
}
