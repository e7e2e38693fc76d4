#[cfg(feature = "debug")]
use super::state::{DebugState, DebugStats};
#[cfg(feature = "debug")]
use crate::animation::animation_loop::AnimationLoop;
#[cfg(feature = "debug")]
use crate::core::components::{DecorativeSolid, ParallaxCamera};
#[cfg(feature = "debug")]
use bevy::prelude::*;

#[cfg(feature = "debug")]
pub fn debug_stats_collect_system(
    time: Res<Time>,
    mut state: ResMut<DebugState>,
    mut stats: ResMut<DebugStats>,
    anim: Option<Res<AnimationLoop>>,
    q_solids: Query<(), With<DecorativeSolid>>,
    q_camera: Query<&Transform, With<ParallaxCamera>>,
) {
    state.frame_counter += 1;
    let dt = time.delta_secs().max(1e-6);
    let inst_fps = 1.0 / dt;
    if stats.fps == 0.0 {
        stats.fps = inst_fps;
    } else {
        stats.fps = stats.fps * 0.9 + inst_fps * 0.1;
    }
    let inst_ms = dt * 1000.0;
    if stats.frame_time_ms == 0.0 {
        stats.frame_time_ms = inst_ms;
    } else {
        stats.frame_time_ms = stats.frame_time_ms * 0.9 + inst_ms * 0.1;
    }
    stats.solid_count = q_solids.iter().count();
    if let Some(anim) = anim {
        stats.loop_frames = anim.frames();
        stats.loop_running = anim.is_running();
    }
    if let Ok(tf) = q_camera.single() {
        stats.camera = tf.translation;
    }
}
