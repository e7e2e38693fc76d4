//! Per-frame motion rules. Increments are per processed frame, not per second,
//! so apparent speed follows the display refresh rate.

use bevy::prelude::*;

use crate::core::components::SolidSpin;
use crate::core::config::{MotionConfig, ParallaxConfig};

#[inline]
pub fn parallax_target(pointer: Vec2, scale: f32) -> Vec2 {
    pointer * scale
}

/// One damping step: cover `rate` of the remaining distance.
#[inline]
pub fn damp_toward(current: f32, target: f32, rate: f32) -> f32 {
    current + (target - current) * rate
}

/// Ease the camera's x/y toward the pointer target and keep it aimed at the origin.
/// z is left alone.
pub fn step_camera(transform: &mut Transform, pointer: Vec2, parallax: &ParallaxConfig) {
    let target = parallax_target(pointer, parallax.scale);
    transform.translation.x = damp_toward(transform.translation.x, target.x, parallax.damping);
    transform.translation.y = damp_toward(transform.translation.y, target.y, parallax.damping);
    transform.look_at(Vec3::ZERO, Vec3::Y);
}

/// Position delta for one frame: (cos drift on x, sin bob on y).
#[inline]
pub fn solid_offset(elapsed_secs: f32, index: usize, motion: &MotionConfig) -> Vec2 {
    let i = index as f32;
    Vec2::new(
        (elapsed_secs + i * motion.drift_phase_scale).cos() * motion.drift_amplitude,
        (elapsed_secs + i).sin() * motion.bob_amplitude,
    )
}

/// Spin and nudge one solid. Offsets accumulate, so positions drift slowly over
/// long sessions.
pub fn step_solid(
    index: usize,
    spin: &mut SolidSpin,
    transform: &mut Transform,
    elapsed_secs: f32,
    motion: &MotionConfig,
) {
    spin.x += motion.spin_x;
    spin.y += motion.spin_y;
    transform.rotation = spin.quat();
    let offset = solid_offset(elapsed_secs, index, motion);
    transform.translation.x += offset.x;
    transform.translation.y += offset.y;
}
