use bevy::prelude::*;

pub mod animation_loop;
pub mod motion;

use crate::core::config::BackdropConfig;
use crate::core::system::system_order::{AnimateSet, LifecycleSet, PointerSet};
use crate::interaction::pointer::PointerSample;
use animation_loop::{animate_backdrop, loop_running, AnimationLoop};

pub struct AnimationLoopPlugin;

impl Plugin for AnimationLoopPlugin {
    fn build(&self, app: &mut App) {
        if !app.world().contains_resource::<BackdropConfig>() {
            app.insert_resource(BackdropConfig::default());
        }
        app.init_resource::<AnimationLoop>()
            .init_resource::<PointerSample>()
            .configure_sets(Update, (LifecycleSet, PointerSet, AnimateSet).chain())
            .add_systems(
                Update,
                animate_backdrop.in_set(AnimateSet).run_if(loop_running),
            );
    }
}
