#[cfg(feature = "debug")]
use super::state::{DebugState, DebugStats};
#[cfg(feature = "debug")]
use bevy::prelude::*;

#[cfg(feature = "debug")]
pub fn debug_logging_system(time: Res<Time>, mut state: ResMut<DebugState>, stats: Res<DebugStats>) {
    state.time_accum += time.delta_secs();
    if state.time_accum >= state.log_interval {
        state.time_accum = 0.0;
        info!("BACKDROP frame={} t={:.3}s fps={:.1} ft_ms={:.1} solids={} loop_frames={} running={} cam=({:.3},{:.3},{:.3})",
            state.frame_counter,
            time.elapsed_secs(),
            stats.fps,
            stats.frame_time_ms,
            stats.solid_count,
            stats.loop_frames,
            stats.loop_running,
            stats.camera.x,
            stats.camera.y,
            stats.camera.z);
    }
}
