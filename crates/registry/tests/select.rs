//! Tests for the compatibility selector against the built-in catalog.

use compact_str::CompactString;
use registry::{
    DeviceProfile, Error, ModelDescriptor, Registry, Rejection, Selector, TieBreak,
    features::SHADER_F16,
};
use std::collections::BTreeSet;

fn ids<'a>(models: &[&'a ModelDescriptor]) -> Vec<&'a str> {
    models.iter().map(|m| m.id.as_str()).collect()
}

#[test]
fn small_device_without_features() {
    let selector = Selector::new(Registry::builtin());
    let eligible = selector.eligible(&DeviceProfile::new(1000.0));
    assert_eq!(
        ids(&eligible),
        [
            "TinyLlama-1.1B-Chat-v0.4-q4f32_1-MLC",
            "TinyLlama-1.1B-Chat-v0.4-q4f32_1-MLC-1k",
        ]
    );
    for model in &eligible {
        assert!(!model.requires_feature(SHADER_F16));
        assert!(model.vram_required_mb <= 1000.0);
    }
    assert!(!ids(&eligible).contains(&"Llama-3-8B-Instruct-q4f16_1-MLC"));
}

#[test]
fn small_device_falls_back_to_first_eligible() {
    let selector = Selector::new(Registry::builtin());
    let selection = selector.select(&DeviceProfile::new(1000.0)).unwrap();
    // Nothing non-low fits, so the first eligible wins.
    assert_eq!(selection.default.id, "TinyLlama-1.1B-Chat-v0.4-q4f32_1-MLC");
}

#[test]
fn large_device_prefers_full_resource() {
    let selector = Selector::new(Registry::builtin());
    let profile = DeviceProfile::new(50000.0).with_feature(SHADER_F16);
    let selection = selector.select(&profile).unwrap();
    assert_eq!(selection.eligible.len(), Registry::builtin().len());
    assert_eq!(selection.default.id, "Llama-3-8B-Instruct-q4f32_1-MLC");
    assert!(!selection.default.low_resources_required);
}

#[test]
fn large_device_prefers_low_resource() {
    let selector = Selector::new(Registry::builtin());
    let profile = DeviceProfile::new(50000.0)
        .with_feature(SHADER_F16)
        .prefer_low_resource(true);
    let selection = selector.select(&profile).unwrap();
    assert_eq!(selection.default.id, "Llama-3-8B-Instruct-q4f32_1-MLC-1k");
}

#[test]
fn zero_vram_has_no_compatible_model() {
    let selector = Selector::new(Registry::builtin());
    assert!(selector.eligible(&DeviceProfile::new(0.0)).is_empty());
    let err = selector.select(&DeviceProfile::new(0.0)).unwrap_err();
    assert!(matches!(err, Error::NoCompatibleModel));
}

#[test]
fn nan_vram_has_no_compatible_model() {
    let selector = Selector::new(Registry::builtin());
    assert!(selector.select(&DeviceProfile::new(f64::NAN)).is_err());
}

#[test]
fn missing_f16_excludes_f16_builds() {
    let selector = Selector::new(Registry::builtin());
    for model in selector.eligible(&DeviceProfile::new(50000.0)) {
        assert!(model.required_features.is_none(), "{}", model.id);
    }
}

#[test]
fn buffer_limit_applies_only_when_known() {
    let registry = Registry::builtin();
    let gemma = registry.get_by_id("gemma-2b-it-q4f32_1-MLC").unwrap();

    let unknown = DeviceProfile::new(2000.0);
    assert!(Selector::is_eligible(gemma, &unknown));

    let small = DeviceProfile::new(2000.0).with_max_buffer_size(128 * 1024 * 1024);
    assert_eq!(
        Selector::check(gemma, &small),
        Err(Rejection::BufferTooSmall {
            required: 262_144_000,
            max: 128 * 1024 * 1024,
        })
    );

    let exact = DeviceProfile::new(2000.0).with_max_buffer_size(262_144_000);
    assert!(Selector::is_eligible(gemma, &exact));
}

#[test]
fn check_reports_first_failing_rule() {
    let model = ModelDescriptor::new("x-q4f16_1-MLC", 100.0, false)
        .with_feature(SHADER_F16)
        .with_buffer_size(1000);

    let profile = DeviceProfile::new(50.0).with_max_buffer_size(10);
    assert!(matches!(
        Selector::check(&model, &profile),
        Err(Rejection::InsufficientVram { .. })
    ));

    let profile = DeviceProfile::new(100.0).with_max_buffer_size(10);
    match Selector::check(&model, &profile) {
        Err(Rejection::MissingFeatures(missing)) => {
            assert_eq!(missing.len(), 1);
            assert!(missing.contains(SHADER_F16));
        }
        other => panic!("expected MissingFeatures, got {other:?}"),
    }

    let profile = profile.with_feature(SHADER_F16);
    assert!(matches!(
        Selector::check(&model, &profile),
        Err(Rejection::BufferTooSmall { .. })
    ));
}

#[test]
fn vram_boundary_is_inclusive() {
    let model = ModelDescriptor::new("x-q4f32_1-MLC", 839.98, true);
    assert!(Selector::is_eligible(&model, &DeviceProfile::new(839.98)));
    assert!(!Selector::is_eligible(&model, &DeviceProfile::new(839.97)));
}

#[test]
fn extra_features_are_harmless() {
    let model = ModelDescriptor::new("x-q4f16_1-MLC", 10.0, true).with_feature(SHADER_F16);
    let profile = DeviceProfile::new(10.0).with_features([SHADER_F16, "timestamp-query"]);
    assert!(Selector::is_eligible(&model, &profile));
}

#[test]
fn eligible_preserves_registry_order() {
    let registry = Registry::builtin();
    let eligible = Selector::new(registry).eligible(&DeviceProfile::new(3000.0));
    let positions: Vec<usize> = eligible
        .iter()
        .map(|m| registry.iter().position(|r| r.id == m.id).unwrap())
        .collect();
    assert!(positions.windows(2).all(|w| w[0] < w[1]));
}

#[test]
fn default_is_member_of_eligible() {
    let selector = Selector::new(Registry::builtin());
    for vram in [700.0, 1500.0, 2500.0, 5000.0, 8000.0] {
        let selection = selector.select(&DeviceProfile::new(vram)).unwrap();
        assert!(selection.eligible.contains(&selection.default));
    }
}

#[test]
fn selection_is_idempotent() {
    let selector = Selector::new(Registry::builtin());
    let profile = DeviceProfile::new(4000.0).with_feature(SHADER_F16);
    assert_eq!(selector.select(&profile).unwrap(), selector.select(&profile).unwrap());
}

#[test]
fn minimize_vram_tie_break() {
    let selector = Selector::new(Registry::builtin()).with_tie_break(TieBreak::MinimizeVram);
    assert_eq!(selector.tie_break(), TieBreak::MinimizeVram);

    let low = DeviceProfile::new(50000.0)
        .with_feature(SHADER_F16)
        .prefer_low_resource(true);
    let selection = selector.select(&low).unwrap();
    assert_eq!(selection.default.id, "TinyLlama-1.1B-Chat-v0.4-q4f16_1-MLC-1k");

    let full = DeviceProfile::new(50000.0).with_feature(SHADER_F16);
    let selection = selector.select(&full).unwrap();
    assert_eq!(selection.default.id, "gemma-2b-it-q4f16_1-MLC");
}

#[test]
fn minimize_vram_keeps_catalog_order_on_ties() {
    let registry = Registry::new(vec![
        ModelDescriptor::new("a-q4f32_1-MLC", 100.0, false),
        ModelDescriptor::new("b-q4f32_1-MLC", 50.0, false),
        ModelDescriptor::new("c-q4f32_1-MLC", 50.0, false),
    ])
    .unwrap();
    let selector = Selector::new(&registry).with_tie_break(TieBreak::MinimizeVram);
    let selection = selector.select(&DeviceProfile::new(100.0)).unwrap();
    assert_eq!(selection.default.id, "b-q4f32_1-MLC");
    assert_eq!(ids(&selection.eligible), ["a-q4f32_1-MLC", "b-q4f32_1-MLC", "c-q4f32_1-MLC"]);
}

#[test]
fn rejection_messages() {
    let rejection = Rejection::InsufficientVram {
        required: 5001.0,
        available: 1000.0,
    };
    assert_eq!(rejection.to_string(), "needs 5001 MB of vram, 1000 MB available");

    let missing = Rejection::MissingFeatures(BTreeSet::from([CompactString::from(SHADER_F16)]));
    assert_eq!(missing.to_string(), "missing features: shader-f16");
}
