use super::*;

#[test]
fn display_prefixes_are_stable() {
    assert!(
        FilmstripError::validation("x")
            .to_string()
            .contains("validation error:")
    );
    assert!(FilmstripError::asset("x").to_string().contains("asset error:"));
}

#[test]
fn other_preserves_source() {
    let base = std::io::Error::other("boom");
    let err = FilmstripError::Other(anyhow::Error::new(base));
    assert!(err.to_string().contains("boom"));
}
