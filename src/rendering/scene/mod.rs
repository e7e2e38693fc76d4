use bevy::prelude::*;
use bevy::window::WindowResized;

pub mod builder;
pub mod lifecycle;
pub mod surface;

pub use lifecycle::{mount_backdrop, unmount_backdrop, SceneLifecycle, SceneResources};

use crate::core::config::BackdropConfig;
use crate::core::system::system_order::LifecycleSet;
use lifecycle::{mount_on_startup, remount_on_config_change, resize_on_window_event, unmount_on_exit};

/// Mounts the backdrop at startup, follows window resizes and config changes,
/// and tears everything down when the app exits.
pub struct SceneLifecyclePlugin;

impl Plugin for SceneLifecyclePlugin {
    fn build(&self, app: &mut App) {
        if !app.world().contains_resource::<BackdropConfig>() {
            app.insert_resource(BackdropConfig::default());
        }
        app.init_resource::<SceneLifecycle>()
            .add_event::<WindowResized>()
            .add_event::<AppExit>()
            .add_systems(Startup, mount_on_startup)
            .add_systems(
                Update,
                (remount_on_config_change, resize_on_window_event)
                    .chain()
                    .in_set(LifecycleSet),
            )
            .add_systems(Last, unmount_on_exit);
    }
}
