use super::*;

#[test]
fn display_prefixes_are_stable() {
    assert!(
        ReticleError::invalid_config("x")
            .to_string()
            .contains("invalid configuration:")
    );
    assert!(
        ReticleError::undisplayed("x")
            .to_string()
            .contains("undisplayed dependency:")
    );
    assert!(
        ReticleError::validation("x")
            .to_string()
            .contains("validation error:")
    );
    assert!(
        ReticleError::serde("x")
            .to_string()
            .contains("serialization error:")
    );
}

#[test]
fn index_out_of_range_names_collection_and_bounds() {
    let msg = ReticleError::index_out_of_range("aspect ratio", 3, 2).to_string();
    assert_eq!(msg, "aspect ratio index 3 is out of range (len 2)");
}

#[test]
fn other_preserves_source() {
    let base = std::io::Error::other("boom");
    let err = ReticleError::Other(anyhow::Error::new(base));
    assert!(err.to_string().contains("boom"));
}
