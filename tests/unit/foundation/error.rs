use super::*;

#[test]
fn display_prefixes_are_stable() {
    assert!(
        OpweaveError::usage("x")
            .to_string()
            .contains("usage error:")
    );
    assert!(
        OpweaveError::closed("x")
            .to_string()
            .contains("recording closed:")
    );
    assert!(
        OpweaveError::surface("x")
            .to_string()
            .contains("surface error:")
    );
}

#[test]
fn other_preserves_source() {
    let base = std::io::Error::other("boom");
    let err = OpweaveError::Other(anyhow::Error::new(base));
    assert!(err.to_string().contains("boom"));
}
