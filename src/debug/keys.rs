#[cfg(feature = "debug")]
use crate::animation::animation_loop::AnimationLoop;
#[cfg(feature = "debug")]
use crate::rendering::scene::lifecycle::{mount_backdrop, SceneLifecycle};
#[cfg(feature = "debug")]
use bevy::prelude::*;

/// R remounts the backdrop from the current config, Space pauses or resumes the loop.
#[cfg(feature = "debug")]
pub fn debug_key_input_system(world: &mut World) {
    let Some(keys) = world.get_resource::<ButtonInput<KeyCode>>() else {
        return;
    };
    let remount = keys.just_pressed(KeyCode::KeyR);
    let toggle = keys.just_pressed(KeyCode::Space);

    if remount {
        match mount_backdrop(world) {
            Ok(()) => info!(target: "backdrop", "DEBUG remount"),
            Err(e) => warn!(target: "backdrop", "DEBUG remount failed: {e}"),
        }
    }
    if toggle {
        toggle_loop(world);
    }
}

#[cfg(feature = "debug")]
pub fn toggle_loop(world: &mut World) {
    if !world.contains_resource::<AnimationLoop>() || !world.contains_resource::<SceneLifecycle>() {
        return;
    }
    world.resource_scope(|world, lifecycle: Mut<SceneLifecycle>| {
        let mut anim = world.resource_mut::<AnimationLoop>();
        if anim.stop() {
            info!(target: "backdrop", frames = anim.frames(), "DEBUG loop paused");
        } else if let Some(resources) = lifecycle.resources() {
            anim.start(resources);
            info!(target: "backdrop", "DEBUG loop resumed");
        }
    });
}
