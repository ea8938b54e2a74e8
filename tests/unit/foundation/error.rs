use super::*;

#[test]
fn display_prefixes_are_stable() {
    assert!(
        StereoError::validation("x")
            .to_string()
            .contains("validation error:")
    );
    assert!(
        StereoError::allocation("x")
            .to_string()
            .contains("allocation error:")
    );
    assert!(StereoError::decode("x").to_string().contains("decode error:"));
    assert!(StereoError::encode("x").to_string().contains("encode error:"));
    assert!(
        StereoError::serde("x")
            .to_string()
            .contains("serialization error:")
    );
}

#[test]
fn other_preserves_source() {
    let base = std::io::Error::other("boom");
    let err = StereoError::Other(anyhow::Error::new(base));
    assert!(err.to_string().contains("boom"));
}

#[test]
fn only_allocation_is_flagged_as_allocation() {
    assert!(StereoError::allocation("oom").is_allocation());
    assert!(!StereoError::validation("bad").is_allocation());
}
