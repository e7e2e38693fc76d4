use bevy::prelude::*;

use super::motion::{step_camera, step_solid};
use crate::core::components::{DecorativeSolid, ParallaxCamera, SolidSpin};
use crate::core::config::BackdropConfig;
use crate::interaction::pointer::PointerSample;
use crate::rendering::scene::lifecycle::SceneResources;

/// What a running loop is bound to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LoopBinding {
    pub camera: Entity,
    pub root: Entity,
    pub solids: usize,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LoopState {
    /// No resources bound; the frame system does not run.
    #[default]
    Idle,
    Running(LoopBinding),
}

/// Idle/Running gate for the per-frame backdrop update. There is no paused
/// state: stopping drops the binding.
#[derive(Resource, Debug, Default)]
pub struct AnimationLoop {
    state: LoopState,
    frames: u64,
}

impl AnimationLoop {
    /// Bind to a live resource set. Callers stop any previous binding first.
    pub fn start(&mut self, resources: &SceneResources) {
        if resources.is_released() {
            warn!(target: "backdrop", "Refusing to animate finalized resources");
            return;
        }
        self.state = LoopState::Running(LoopBinding {
            camera: resources.camera,
            root: resources.root,
            solids: resources.solids.len(),
        });
        self.frames = 0;
        debug!(target: "backdrop", solids = resources.solids.len(), "Animation loop started");
    }

    /// Returns whether the loop was running. Safe from Idle.
    pub fn stop(&mut self) -> bool {
        match std::mem::take(&mut self.state) {
            LoopState::Running(_) => {
                debug!(target: "backdrop", frames = self.frames, "Animation loop stopped");
                true
            }
            LoopState::Idle => false,
        }
    }

    pub fn state(&self) -> LoopState {
        self.state
    }
    pub fn is_running(&self) -> bool {
        matches!(self.state, LoopState::Running(_))
    }
    /// Frames processed since the last `start`.
    pub fn frames(&self) -> u64 {
        self.frames
    }
}

/// Run condition: evaluated right before the frame system, so `stop` takes
/// effect on the very next invocation.
pub fn loop_running(anim: Option<Res<AnimationLoop>>) -> bool {
    anim.is_some_and(|a| a.is_running())
}

/// One frame: read the pointer sample once, ease the camera, move every solid.
/// Rendering follows in the render sub-app.
pub fn animate_backdrop(
    time: Res<Time>,
    pointer: Res<PointerSample>,
    cfg: Res<BackdropConfig>,
    mut anim: ResMut<AnimationLoop>,
    mut cameras: Query<&mut Transform, (With<ParallaxCamera>, Without<DecorativeSolid>)>,
    mut solids: Query<(&DecorativeSolid, &mut SolidSpin, &mut Transform), Without<ParallaxCamera>>,
) {
    let LoopState::Running(binding) = anim.state else {
        return;
    };
    let sample = **pointer;
    if let Ok(mut camera) = cameras.get_mut(binding.camera) {
        step_camera(&mut camera, sample, &cfg.parallax);
    }
    let elapsed = time.elapsed_secs();
    for (solid, mut spin, mut transform) in &mut solids {
        step_solid(solid.index, &mut spin, &mut transform, elapsed, &cfg.motion);
    }
    anim.frames += 1;
}
