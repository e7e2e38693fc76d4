pub mod config;

pub use config::{
    BackdropConfig, CameraConfig, ConfigOverrides, FieldConfig, MotionConfig, ParallaxConfig,
    ParticleConfig, SpawnRange, WindowConfig, DEFAULT_CONFIG_PATHS,
};
