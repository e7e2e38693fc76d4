pub mod animation;
pub mod app;
pub mod core;
pub mod debug;
pub mod interaction;
pub mod rendering;

// Curated re-exports
pub use animation::animation_loop::{AnimationLoop, LoopState};
pub use animation::AnimationLoopPlugin;
pub use app::backdrop::{BackdropPlugin, ConfigDiagnostics};
pub use core::components::{DecorativeSolid, ParallaxCamera, SolidSpin};
pub use core::config::BackdropConfig;
pub use core::error::BackdropError;
pub use interaction::pointer::{PointerSample, PointerTrackerPlugin};
pub use rendering::geometry::{palette, templates, ShapeKind, ShapeTemplate};
pub use rendering::scene::{
    mount_backdrop, unmount_backdrop, SceneLifecycle, SceneLifecyclePlugin, SceneResources,
};
