use bevy::prelude::*;
use bevy::window::CursorMoved;

use crate::core::system::system_order::PointerSet;

/// Latest pointer position normalized to [-1, 1] on both axes, +y up.
#[derive(Resource, Debug, Default, Clone, Copy, PartialEq, Deref, DerefMut)]
pub struct PointerSample(pub Vec2);

/// Map a top-left-origin cursor position to normalized device coordinates.
pub fn normalize_pointer(client: Vec2, viewport: Vec2) -> Vec2 {
    if viewport.x <= 0.0 || viewport.y <= 0.0 {
        return Vec2::ZERO;
    }
    let x = (client.x / viewport.x) * 2.0 - 1.0;
    let y = -((client.y / viewport.y) * 2.0 - 1.0);
    Vec2::new(x, y).clamp(Vec2::NEG_ONE, Vec2::ONE)
}

pub fn track_pointer(
    mut moves: EventReader<CursorMoved>,
    windows: Query<&Window>,
    mut sample: ResMut<PointerSample>,
) {
    for ev in moves.read() {
        let Ok(window) = windows.get(ev.window) else {
            continue;
        };
        let viewport = Vec2::new(window.width(), window.height());
        sample.set_if_neq(PointerSample(normalize_pointer(ev.position, viewport)));
    }
}

pub struct PointerTrackerPlugin;

impl Plugin for PointerTrackerPlugin {
    fn build(&self, app: &mut App) {
        app.add_event::<CursorMoved>()
            .init_resource::<PointerSample>()
            .add_systems(Update, track_pointer.in_set(PointerSet));
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn corners_and_centre() {
        let vp = Vec2::new(1920.0, 1080.0);
        assert_eq!(normalize_pointer(Vec2::new(960.0, 540.0), vp), Vec2::ZERO);
        assert_eq!(normalize_pointer(Vec2::ZERO, vp), Vec2::new(-1.0, 1.0));
        assert_eq!(normalize_pointer(vp, vp), Vec2::new(1.0, -1.0));
    }

    #[test]
    fn outside_viewport_is_clamped() {
        let vp = Vec2::new(100.0, 100.0);
        assert_eq!(normalize_pointer(Vec2::new(-50.0, 250.0), vp), Vec2::new(-1.0, -1.0));
        assert_eq!(normalize_pointer(Vec2::new(10.0, 10.0), Vec2::ZERO), Vec2::ZERO);
    }
}
