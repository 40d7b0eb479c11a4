//! Tests for `Registry` construction and lookup.

use registry::{Error, ModelDescriptor, Registry};

fn sample() -> Vec<ModelDescriptor> {
    vec![
        ModelDescriptor::new("alpha-q4f16_1-MLC", 1000.0, false)
            .with_family("alpha")
            .with_feature("shader-f16"),
        ModelDescriptor::new("alpha-q4f32_1-MLC-1k", 800.0, true).with_family("alpha"),
        ModelDescriptor::new("beta-q4f32_1-MLC", 500.0, true)
            .with_family("beta")
            .with_buffer_size(1024),
    ]
}

#[test]
fn list_all_keeps_declaration_order() {
    let registry = Registry::new(sample()).unwrap();
    let ids: Vec<&str> = registry.list_all().iter().map(|m| m.id.as_str()).collect();
    assert_eq!(
        ids,
        ["alpha-q4f16_1-MLC", "alpha-q4f32_1-MLC-1k", "beta-q4f32_1-MLC"]
    );
}

#[test]
fn get_by_id_exact_match() {
    let registry = Registry::new(sample()).unwrap();
    let model = registry.get_by_id("alpha-q4f32_1-MLC-1k").unwrap();
    assert_eq!(model.id, "alpha-q4f32_1-MLC-1k");
    assert_eq!(model.vram_required_mb, 800.0);
    assert!(model.low_resources_required);
}

#[test]
fn get_by_id_unknown() {
    let registry = Registry::new(sample()).unwrap();
    let err = registry.get_by_id("nonexistent-model").unwrap_err();
    assert!(matches!(err, Error::NotFound(ref id) if id == "nonexistent-model"));
    assert!(err.to_string().contains("not found"));
}

#[test]
fn get_by_id_is_case_sensitive() {
    let registry = Registry::new(sample()).unwrap();
    assert!(registry.get_by_id("ALPHA-q4f16_1-MLC").is_err());
    assert!(registry.contains("alpha-q4f16_1-MLC"));
}

#[test]
fn duplicate_id_fails() {
    let mut models = sample();
    models.push(ModelDescriptor::new("alpha-q4f16_1-MLC", 42.0, true));
    let err = Registry::new(models).unwrap_err();
    assert!(matches!(err, Error::DuplicateId(ref id) if id == "alpha-q4f16_1-MLC"));
}

#[test]
fn zero_vram_fails() {
    let err = Registry::new(vec![ModelDescriptor::new("x-q4f32_1-MLC", 0.0, false)]).unwrap_err();
    assert!(matches!(err, Error::InvalidVram { .. }));
}

#[test]
fn nan_vram_fails() {
    let err =
        Registry::new(vec![ModelDescriptor::new("x-q4f32_1-MLC", f64::NAN, false)]).unwrap_err();
    assert!(matches!(err, Error::InvalidVram { .. }));
}

#[test]
fn empty_feature_set_fails() {
    let mut model = ModelDescriptor::new("x-q4f32_1-MLC", 10.0, false);
    model.required_features = Some(Default::default());
    let err = Registry::new(vec![model]).unwrap_err();
    assert!(matches!(err, Error::EmptyFeatures { .. }));
}

#[test]
fn zero_buffer_fails() {
    let model = ModelDescriptor::new("x-q4f32_1-MLC", 10.0, false).with_buffer_size(0);
    let err = Registry::new(vec![model]).unwrap_err();
    assert!(matches!(err, Error::InvalidBufferSize { .. }));
}

#[test]
fn empty_id_fails() {
    let err = Registry::new(vec![ModelDescriptor::new("  ", 10.0, false)]).unwrap_err();
    assert!(matches!(err, Error::InvalidId(_)));
}

#[test]
fn empty_registry_is_valid() {
    let registry = Registry::new(Vec::new()).unwrap();
    assert!(registry.is_empty());
    assert!(registry.families().is_empty());
}

#[test]
fn families_in_first_appearance_order() {
    let registry = Registry::new(sample()).unwrap();
    assert_eq!(registry.families(), ["alpha", "beta"]);
    let alpha: Vec<&str> = registry
        .by_family("alpha")
        .iter()
        .map(|m| m.id.as_str())
        .collect();
    assert_eq!(alpha, ["alpha-q4f16_1-MLC", "alpha-q4f32_1-MLC-1k"]);
    assert!(registry.by_family("gamma").is_empty());
}

#[test]
fn registry_is_shareable_across_threads() {
    let registry = Registry::builtin();
    let handles: Vec<_> = (0..4)
        .map(|_| std::thread::spawn(move || registry.get_by_id("phi-2-q4f16_1-MLC").is_ok()))
        .collect();
    for handle in handles {
        assert!(handle.join().unwrap());
    }
}
