use bevy::prelude::*;
use bevy::window::PrimaryWindow;

use crate::core::error::BackdropError;

/// Clamp the host's device pixel ratio to `max` (never below 1.0).
#[inline]
pub fn capped_pixel_ratio(native: f32, max: f32) -> f32 {
    native.min(max.max(1.0))
}

/// Aspect ratio for a viewport; degenerate sizes fall back to square.
#[inline]
pub fn aspect_for(width: f32, height: f32) -> f32 {
    if width > 0.0 && height > 0.0 {
        width / height
    } else {
        1.0
    }
}

/// The window (or web canvas) the backdrop draws onto.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RenderSurface {
    pub window: Entity,
    /// Logical viewport size.
    pub size: Vec2,
    pub pixel_ratio: f32,
    /// Whether acquiring installed a scale factor override that must be undone.
    pub overrides_scale: bool,
}

impl RenderSurface {
    pub fn acquire(world: &mut World, max_pixel_ratio: f32) -> Result<Self, BackdropError> {
        let mut q = world.query_filtered::<(Entity, &mut Window), With<PrimaryWindow>>();
        let Some((entity, mut window)) = q.iter_mut(world).next() else {
            return Err(BackdropError::ContextUnavailable(
                "no primary window to render onto".into(),
            ));
        };
        let native = window.resolution.base_scale_factor();
        let pixel_ratio = capped_pixel_ratio(native, max_pixel_ratio);
        // Canvas backing store follows the scale factor on the web; natively the OS owns it.
        let overrides_scale = cfg!(target_arch = "wasm32") && pixel_ratio < native;
        if overrides_scale {
            window.resolution.set_scale_factor_override(Some(pixel_ratio));
        }
        Ok(Self {
            window: entity,
            size: Vec2::new(window.width(), window.height()),
            pixel_ratio,
            overrides_scale,
        })
    }

    pub fn physical_size(&self) -> UVec2 {
        (self.size * self.pixel_ratio).round().as_uvec2()
    }

    pub fn aspect_ratio(&self) -> f32 {
        aspect_for(self.size.x, self.size.y)
    }

    pub fn release(&mut self, world: &mut World) {
        if !self.overrides_scale {
            return;
        }
        if let Some(mut window) = world.get_mut::<Window>(self.window) {
            window.resolution.set_scale_factor_override(None);
        }
        self.overrides_scale = false;
    }
}
