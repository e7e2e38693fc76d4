//! Fixed shape templates & decorative palette shared by every backdrop build.
//! Single source of truth for the solids' silhouettes and hues.

use bevy::prelude::*;
use serde::Serialize;

/// Template identifier. Ordering matches [`templates`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Reflect)]
pub enum ShapeKind {
    Cube,
    FlatBoxX,
    FlatBoxY,
    FlatBoxZ,
    ShortCylinder,
}

impl ShapeKind {
    pub const ALL: [ShapeKind; 5] = [
        ShapeKind::Cube,
        ShapeKind::FlatBoxX,
        ShapeKind::FlatBoxY,
        ShapeKind::FlatBoxZ,
        ShapeKind::ShortCylinder,
    ];

    /// Position of this kind inside the catalog (and the per-build mesh list).
    #[inline]
    pub fn catalog_index(self) -> usize {
        match self {
            Self::Cube => 0,
            Self::FlatBoxX => 1,
            Self::FlatBoxY => 2,
            Self::FlatBoxZ => 3,
            Self::ShortCylinder => 4,
        }
    }
}

/// Dimensions of one reusable solid.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum ShapeTemplate {
    Cuboid { size: Vec3 },
    Prism { radius: f32, height: f32, sides: u32 },
}

impl ShapeTemplate {
    pub fn mesh(&self) -> Mesh {
        match *self {
            Self::Cuboid { size } => Mesh::from(Cuboid::from_size(size)),
            Self::Prism {
                radius,
                height,
                sides,
            } => Cylinder::new(radius, height)
                .mesh()
                .resolution(sides)
                .build(),
        }
    }
}

const TEMPLATES: [(ShapeKind, ShapeTemplate); 5] = [
    (
        ShapeKind::Cube,
        ShapeTemplate::Cuboid {
            size: Vec3::new(1.0, 1.0, 1.0),
        },
    ),
    (
        ShapeKind::FlatBoxX,
        ShapeTemplate::Cuboid {
            size: Vec3::new(1.5, 0.5, 0.5),
        },
    ),
    (
        ShapeKind::FlatBoxY,
        ShapeTemplate::Cuboid {
            size: Vec3::new(0.5, 1.5, 0.5),
        },
    ),
    (
        ShapeKind::FlatBoxZ,
        ShapeTemplate::Cuboid {
            size: Vec3::new(0.5, 0.5, 1.5),
        },
    ),
    // hexagonal cross-section
    (
        ShapeKind::ShortCylinder,
        ShapeTemplate::Prism {
            radius: 0.3,
            height: 1.5,
            sides: 6,
        },
    ),
];

/// Decorative SRGB palette (purple, medium purple, pink, light blue, blue).
pub const PALETTE: [Color; 5] = [
    Color::srgb(0x9b as f32 / 255.0, 0x87 as f32 / 255.0, 0xf5 as f32 / 255.0),
    Color::srgb(0x7e as f32 / 255.0, 0x69 as f32 / 255.0, 0xab as f32 / 255.0),
    Color::srgb(0xd9 as f32 / 255.0, 0x46 as f32 / 255.0, 0xef as f32 / 255.0),
    Color::srgb(0x33 as f32 / 255.0, 0xc3 as f32 / 255.0, 0xf0 as f32 / 255.0),
    Color::srgb(0x0e as f32 / 255.0, 0xa5 as f32 / 255.0, 0xe9 as f32 / 255.0),
];

pub fn templates() -> &'static [(ShapeKind, ShapeTemplate); 5] {
    &TEMPLATES
}

pub fn palette() -> &'static [Color; 5] {
    &PALETTE
}

/// Hue used for the first accent point light.
#[inline]
pub fn primary_hue() -> Color {
    PALETTE[0]
}

/// Hue used for the second accent point light.
#[inline]
pub fn secondary_hue() -> Color {
    PALETTE[2]
}

#[inline]
pub fn color_for_index(i: usize) -> Color {
    PALETTE[i % PALETTE.len()]
}

#[cfg(test)]
mod tests {
    use super::*;
    use bevy::color::ColorToPacked;
    use bevy::render::mesh::VertexAttributeValues;

    #[test]
    fn template_order_matches_kind_index() {
        for (i, (kind, _)) in templates().iter().enumerate() {
            assert_eq!(kind.catalog_index(), i);
            assert_eq!(ShapeKind::ALL[i], *kind);
        }
    }

    #[test]
    fn flat_boxes_are_elongated_along_distinct_axes() {
        let longest_axis = |t: &ShapeTemplate| match t {
            ShapeTemplate::Cuboid { size } => size
                .to_array()
                .iter()
                .enumerate()
                .fold((0, f32::MIN), |best, (i, v)| if *v > best.1 { (i, *v) } else { best })
                .0,
            _ => panic!("expected cuboid"),
        };
        assert_eq!(longest_axis(&templates()[1].1), 0);
        assert_eq!(longest_axis(&templates()[2].1), 1);
        assert_eq!(longest_axis(&templates()[3].1), 2);
    }

    #[test]
    fn every_template_builds_a_mesh() {
        for (kind, t) in templates() {
            let mesh = t.mesh();
            let positions = mesh
                .attribute(Mesh::ATTRIBUTE_POSITION)
                .unwrap_or_else(|| panic!("{kind:?} mesh has no positions"));
            match positions {
                VertexAttributeValues::Float32x3(v) => assert!(!v.is_empty()),
                other => panic!("unexpected position format {other:?}"),
            }
        }
    }

    #[test]
    fn palette_matches_hex_values() {
        let hex: Vec<[u8; 4]> = palette().iter().map(|c| c.to_srgba().to_u8_array()).collect();
        assert_eq!(hex[0], [0x9b, 0x87, 0xf5, 0xff]);
        assert_eq!(hex[2], [0xd9, 0x46, 0xef, 0xff]);
        assert_eq!(hex[4], [0x0e, 0xa5, 0xe9, 0xff]);
        assert_eq!(primary_hue(), palette()[0]);
        assert_eq!(secondary_hue(), palette()[2]);
    }

    #[test]
    fn all_colors_distinct() {
        for (i, c1) in PALETTE.iter().enumerate() {
            for (j, c2) in PALETTE.iter().enumerate() {
                if i != j {
                    assert!(c1 != c2, "Palette contains duplicate colors at {i} and {j}");
                }
            }
        }
        assert_eq!(color_for_index(5), PALETTE[0]);
    }
}
