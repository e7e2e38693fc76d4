use bevy::prelude::*;

use crate::rendering::geometry::catalog::{color_for_index, ShapeKind};

/// One floating solid of the backdrop. `index` is assigned once at spawn (0..N-1)
/// and doubles as the phase offset of its bob/drift motion.
#[derive(Component, Debug, Clone, Copy, PartialEq, Reflect)]
#[reflect(Component)]
pub struct DecorativeSolid {
    pub shape: ShapeKind,
    pub color_index: usize,
    pub opacity: f32,
    pub index: usize,
}
impl DecorativeSolid {
    pub fn color(&self) -> Color {
        color_for_index(self.color_index).with_alpha(self.opacity)
    }
}

/// Accumulated Euler angles (XYZ). Grows without wraparound; `Transform::rotation`
/// is derived from it every frame.
#[derive(Component, Debug, Deref, DerefMut, Copy, Clone, PartialEq, Reflect)]
#[reflect(Component)]
pub struct SolidSpin(pub Vec3);
impl SolidSpin {
    #[inline]
    pub fn quat(&self) -> Quat {
        Quat::from_euler(EulerRot::XYZ, self.0.x, self.0.y, self.0.z)
    }
}

/// Marker for the scene container every light and solid is parented to.
#[derive(Component, Debug, Default)]
pub struct BackdropRoot;

/// Marker for lights spawned by the scene builder.
#[derive(Component, Debug, Default)]
pub struct BackdropLight;

/// The perspective camera driven by pointer parallax.
#[derive(Component, Debug, Default)]
pub struct ParallaxCamera;
