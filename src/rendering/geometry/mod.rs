pub mod catalog;

pub use catalog::{palette, templates, ShapeKind, ShapeTemplate, PALETTE};
