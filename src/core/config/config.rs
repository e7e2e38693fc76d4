use bevy::prelude::*;
use serde::Deserialize;
use std::{fs, path::Path};

/// Layered config files, lowest priority first.
pub const DEFAULT_CONFIG_PATHS: [&str; 2] = [
    "assets/config/backdrop.ron",
    "assets/config/backdrop.local.ron",
];

#[derive(Debug, Deserialize, Resource, Clone, PartialEq)]
#[serde(default)]
pub struct WindowConfig {
    pub width: f32,
    pub height: f32,
    pub title: String,
    #[serde(rename = "autoClose")]
    pub auto_close: f32,
    /// Upper bound for the device pixel ratio used by the render surface.
    pub max_pixel_ratio: f32,
    pub transparent: bool,
}
impl Default for WindowConfig {
    fn default() -> Self {
        Self {
            width: 1280.0,
            height: 720.0,
            title: "Prism Backdrop".into(),
            auto_close: 0.0,
            max_pixel_ratio: 2.0,
            transparent: true,
        }
    }
}
#[derive(Debug, Deserialize, Clone, PartialEq)]
#[serde(default)]
pub struct SpawnRange<T> {
    pub min: T,
    pub max: T,
}
impl<T: Default> Default for SpawnRange<T> {
    fn default() -> Self {
        Self {
            min: Default::default(),
            max: Default::default(),
        }
    }
}
#[derive(Debug, Deserialize, Clone, PartialEq)]
#[serde(default)]
pub struct ParticleConfig {
    pub count: usize,
    /// Edge length of the cube (centred on the origin) solids are scattered in.
    pub spread: f32,
    pub opacity: SpawnRange<f32>,
    /// Fixed RNG seed; `None` rolls a fresh layout on every mount.
    pub seed: Option<u64>,
}
impl Default for ParticleConfig {
    fn default() -> Self {
        Self {
            count: 60,
            spread: 40.0,
            opacity: SpawnRange { min: 0.1, max: 0.4 },
            seed: None,
        }
    }
}
#[derive(Debug, Deserialize, Clone, PartialEq)]
#[serde(default)]
pub struct CameraConfig {
    pub fov_degrees: f32,
    pub near: f32,
    pub far: f32,
    /// Initial distance back along +Z.
    pub distance: f32,
}
impl Default for CameraConfig {
    fn default() -> Self {
        Self {
            fov_degrees: 75.0,
            near: 0.1,
            far: 1000.0,
            distance: 30.0,
        }
    }
}
#[derive(Debug, Deserialize, Clone, PartialEq)]
#[serde(default)]
pub struct ParallaxConfig {
    /// World units of camera offset per unit of normalized pointer.
    pub scale: f32,
    /// Fraction of the remaining distance covered each frame.
    pub damping: f32,
}
impl Default for ParallaxConfig {
    fn default() -> Self {
        Self {
            scale: 2.0,
            damping: 0.05,
        }
    }
}
#[derive(Debug, Deserialize, Clone, PartialEq)]
#[serde(default)]
pub struct MotionConfig {
    pub spin_x: f32,
    pub spin_y: f32,
    pub bob_amplitude: f32,
    pub drift_amplitude: f32,
    pub drift_phase_scale: f32,
}
impl Default for MotionConfig {
    fn default() -> Self {
        Self {
            spin_x: 0.002,
            spin_y: 0.003,
            bob_amplitude: 0.003,
            drift_amplitude: 0.002,
            drift_phase_scale: 0.5,
        }
    }
}
#[derive(Debug, Deserialize, Clone, PartialEq)]
#[serde(default)]
pub struct FieldConfig {
    pub enabled: bool,
    pub count: usize,
    pub repel_radius: f32,
    pub link_distance: f32,
}
impl Default for FieldConfig {
    fn default() -> Self {
        Self {
            enabled: false,
            count: 80,
            repel_radius: 120.0,
            link_distance: 160.0,
        }
    }
}
#[derive(Debug, Deserialize, Resource, Clone, PartialEq, Default)]
#[serde(default)]
pub struct BackdropConfig {
    pub window: WindowConfig,
    pub particles: ParticleConfig,
    pub camera: CameraConfig,
    pub parallax: ParallaxConfig,
    pub motion: MotionConfig,
    pub field: FieldConfig,
}

/// Command-line values that win over every file layer, including layers
/// picked up later by hot reload.
#[derive(Debug, Resource, Clone, Copy, PartialEq, Eq, Default)]
pub struct ConfigOverrides {
    pub count: Option<usize>,
    pub seed: Option<u64>,
}
impl ConfigOverrides {
    pub fn apply(&self, cfg: &mut BackdropConfig) {
        if let Some(count) = self.count {
            cfg.particles.count = count;
        }
        if let Some(seed) = self.seed {
            cfg.particles.seed = Some(seed);
        }
    }
}

impl BackdropConfig {
    pub fn load_from_file(path: impl AsRef<Path>) -> Result<Self, String> {
        let data = fs::read_to_string(&path).map_err(|e| format!("read config: {e}"))?;
        ron::from_str(&data).map_err(|e| format!("parse RON: {e}"))
    }
    pub fn load_or_default(path: impl AsRef<Path>) -> (Self, Option<String>) {
        match Self::load_from_file(&path) {
            Ok(cfg) => (cfg, None),
            Err(e) => (Self::default(), Some(e)),
        }
    }
    /// Merge every readable file key by key (later files win) and deserialize the result.
    /// Returns the config, the paths actually used, and any read/parse errors.
    pub fn load_layered<P, I>(paths: I) -> (Self, Vec<String>, Vec<String>)
    where
        P: AsRef<Path>,
        I: IntoIterator<Item = P>,
    {
        use ron::value::Value;
        let mut merged: Option<Value> = None;
        let mut used = Vec::new();
        let mut errors = Vec::new();
        fn merge_value(base: &mut Value, overlay: Value) {
            match (base, overlay) {
                (Value::Map(bm), Value::Map(om)) => {
                    for (k, v) in om.into_iter() {
                        let mut incoming = Some(v);
                        for (ek, ev) in bm.iter_mut() {
                            if *ek == k {
                                if let Some(val) = incoming.take() {
                                    merge_value(ev, val);
                                }
                                break;
                            }
                        }
                        if let Some(val) = incoming {
                            bm.insert(k, val);
                        }
                    }
                }
                (b, o) => *b = o,
            }
        }
        for p in paths {
            let path_ref = p.as_ref();
            match fs::read_to_string(path_ref) {
                Ok(txt) => match ron::from_str::<Value>(&txt) {
                    Ok(val) => {
                        if let Some(cur) = &mut merged {
                            merge_value(cur, val);
                        } else {
                            merged = Some(val);
                        }
                        used.push(path_ref.as_os_str().to_string_lossy().to_string());
                    }
                    Err(e) => errors.push(format!("{}: parse error: {e}", path_ref.display())),
                },
                Err(e) => errors.push(format!("{}: read error: {e}", path_ref.display())),
            }
        }
        match merged {
            Some(val) => match val.into_rust::<BackdropConfig>() {
                Ok(cfg) => (cfg, used, errors),
                Err(e) => {
                    errors.push(format!(
                        "failed to deserialize merged config; using defaults: {e}"
                    ));
                    (BackdropConfig::default(), used, errors)
                }
            },
            None => (BackdropConfig::default(), used, errors),
        }
    }
    pub fn validate(&self) -> Vec<String> {
        let mut w = Vec::new();
        if self.window.width <= 0.0 || self.window.height <= 0.0 {
            w.push("window dimensions must be > 0".into());
        }
        if self.window.auto_close < 0.0 {
            w.push(format!(
                "window.autoClose {} negative -> treated as disabled (should be >= 0)",
                self.window.auto_close
            ));
        }
        if self.window.max_pixel_ratio < 1.0 {
            w.push(format!(
                "window.max_pixel_ratio {} below 1.0; output will be blurry",
                self.window.max_pixel_ratio
            ));
        }
        if self.particles.count == 0 {
            w.push("particles.count is 0; backdrop will be empty".into());
        }
        if self.particles.count > 5_000 {
            w.push(format!(
                "particles.count {} very high; each solid carries its own material",
                self.particles.count
            ));
        }
        if self.particles.spread <= 0.0 {
            w.push("particles.spread must be > 0".into());
        }
        let op = &self.particles.opacity;
        if op.min > op.max {
            w.push(format!(
                "particles.opacity min ({}) greater than max ({})",
                op.min, op.max
            ));
        } else if (op.max - op.min).abs() < f32::EPSILON {
            w.push(format!(
                "particles.opacity min == max ({}) -> zero variation",
                op.min
            ));
        }
        if op.min < 0.0 || op.max > 1.0 {
            w.push("particles.opacity outside 0..1".into());
        }
        let cam = &self.camera;
        if !(1.0..=179.0).contains(&cam.fov_degrees) {
            w.push(format!("camera.fov_degrees {} outside 1..179", cam.fov_degrees));
        }
        if cam.near <= 0.0 || cam.far <= cam.near {
            w.push(format!(
                "camera clip planes invalid (near {}, far {})",
                cam.near, cam.far
            ));
        }
        if cam.distance <= 0.0 {
            w.push("camera.distance must be > 0".into());
        }
        if !(0.0..=1.0).contains(&self.parallax.damping) {
            w.push(format!(
                "parallax.damping {} outside 0..1 -> camera overshoots or never moves",
                self.parallax.damping
            ));
        }
        if self.field.enabled {
            if self.field.repel_radius <= 0.0 {
                w.push("field.repel_radius must be > 0".into());
            }
            if self.field.link_distance <= 0.0 {
                w.push("field.link_distance must be > 0".into());
            }
        }
        w
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_match_backdrop_constants() {
        let cfg = BackdropConfig::default();
        assert_eq!(cfg.particles.count, 60);
        assert_eq!(cfg.particles.spread, 40.0);
        assert_eq!(cfg.camera.distance, 30.0);
        assert_eq!(cfg.parallax.damping, 0.05);
        assert_eq!(cfg.motion.spin_y, 0.003);
        assert!(!cfg.field.enabled);
        assert!(cfg.validate().is_empty(), "{:?}", cfg.validate());
    }

    #[test]
    fn partial_ron_keeps_other_defaults() {
        let cfg: BackdropConfig = ron::from_str("(particles: (count: 12))").expect("parse");
        assert_eq!(cfg.particles.count, 12);
        assert_eq!(cfg.particles.opacity, SpawnRange { min: 0.1, max: 0.4 });
        assert_eq!(cfg.camera, CameraConfig::default());
    }

    #[test]
    fn validate_flags_bad_values() {
        let mut cfg = BackdropConfig::default();
        cfg.particles.count = 0;
        cfg.parallax.damping = 1.5;
        cfg.camera.far = 0.01;
        let warns = cfg.validate().join("\n");
        assert!(warns.contains("particles.count is 0"));
        assert!(warns.contains("parallax.damping"));
        assert!(warns.contains("clip planes"));
    }

    #[test]
    fn overrides_replace_only_the_given_fields() {
        let mut cfg = BackdropConfig::default();
        cfg.particles.seed = Some(1);
        ConfigOverrides {
            count: Some(7),
            seed: None,
        }
        .apply(&mut cfg);
        assert_eq!(cfg.particles.count, 7);
        assert_eq!(cfg.particles.seed, Some(1));
        ConfigOverrides::default().apply(&mut cfg);
        assert_eq!(cfg.particles.count, 7);
    }

    #[test]
    fn missing_file_falls_back_to_defaults() {
        let (cfg, err) = BackdropConfig::load_or_default("does/not/exist.ron");
        assert_eq!(cfg, BackdropConfig::default());
        assert!(err.is_some());
    }
}
