use super::*;

#[test]
fn display_prefixes_are_stable() {
    assert!(
        AutographError::validation("x")
            .to_string()
            .contains("validation error:")
    );
    assert!(AutographError::font("x").to_string().contains("font error:"));
    assert!(
        AutographError::render("x")
            .to_string()
            .contains("render error:")
    );
    assert!(
        AutographError::encode("x")
            .to_string()
            .contains("encode error:")
    );
    assert!(
        AutographError::config("x")
            .to_string()
            .contains("config error:")
    );
}

#[test]
fn other_preserves_source() {
    let base = std::io::Error::other("boom");
    let err = AutographError::Other(anyhow::Error::new(base));
    assert!(err.to_string().contains("boom"));
}
