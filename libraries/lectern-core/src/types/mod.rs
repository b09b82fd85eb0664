//! Domain types for course materials

mod ids;
mod material;

pub use ids::MaterialId;
pub use material::{parse_materials, MediaItem, MediaKind};
