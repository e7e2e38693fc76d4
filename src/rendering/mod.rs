pub mod field;
pub mod geometry;
pub mod scene;
