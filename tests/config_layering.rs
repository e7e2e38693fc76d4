use prism_backdrop::BackdropConfig;
use std::fs;

#[test]
fn later_layers_override_nested_keys_only() {
    let dir = tempfile::tempdir().expect("tempdir");
    let base = dir.path().join("backdrop.ron");
    let local = dir.path().join("backdrop.local.ron");
    fs::write(
        &base,
        "(window: (width: 640.0, height: 480.0), particles: (count: 12, spread: 30.0))",
    )
    .expect("write base");
    fs::write(&local, "(particles: (count: 3, seed: Some(9)), field: (enabled: true))")
        .expect("write local");

    let (cfg, used, errors) = BackdropConfig::load_layered([&base, &local]);
    assert!(errors.is_empty(), "{errors:?}");
    assert_eq!(used.len(), 2);
    assert_eq!(cfg.window.width, 640.0);
    assert_eq!(cfg.particles.count, 3);
    assert_eq!(cfg.particles.spread, 30.0);
    assert_eq!(cfg.particles.seed, Some(9));
    assert!(cfg.field.enabled);
    assert_eq!(cfg.camera.distance, 30.0);
}

#[test]
fn missing_and_broken_layers_are_reported_not_fatal() {
    let dir = tempfile::tempdir().expect("tempdir");
    let broken = dir.path().join("broken.ron");
    fs::write(&broken, "(particles: (count: ").expect("write");
    let (cfg, used, errors) =
        BackdropConfig::load_layered([dir.path().join("missing.ron"), broken]);
    assert!(used.is_empty());
    assert_eq!(errors.len(), 2);
    assert_eq!(cfg, BackdropConfig::default());
}

#[test]
fn shipped_config_is_valid() {
    let (cfg, used, errors) =
        BackdropConfig::load_layered([concat!(env!("CARGO_MANIFEST_DIR"), "/assets/config/backdrop.ron")]);
    assert!(errors.is_empty(), "{errors:?}");
    assert_eq!(used.len(), 1);
    assert!(cfg.validate().is_empty(), "{:?}", cfg.validate());
    assert_eq!(cfg, BackdropConfig::default());
}
