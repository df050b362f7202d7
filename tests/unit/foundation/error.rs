use super::*;

#[test]
fn display_prefixes_are_stable() {
    assert!(
        LayerfxError::duplicate(LayerKind::Crop)
            .to_string()
            .contains("duplicate layer kind: a crop layer")
    );
    assert!(
        LayerfxError::IndexOutOfRange { index: 3, len: 1 }
            .to_string()
            .contains("index out of range:")
    );
    assert!(
        LayerfxError::asset("x")
            .to_string()
            .contains("asset resolution error:")
    );
    assert!(
        LayerfxError::engine("x")
            .to_string()
            .contains("engine execution error:")
    );
    assert!(
        LayerfxError::not_ready("x")
            .to_string()
            .contains("output not ready:")
    );
    assert!(
        LayerfxError::validation("x")
            .to_string()
            .contains("validation error:")
    );
    assert!(
        LayerfxError::serde("x")
            .to_string()
            .contains("serialization error:")
    );
}

#[test]
fn other_preserves_source() {
    let base = std::io::Error::other("boom");
    let err = LayerfxError::Other(anyhow::Error::new(base));
    assert!(err.to_string().contains("boom"));
}
