pub mod aabb;
pub mod polygon;
pub mod rectangle;
pub mod segment;
pub mod triangle;

pub use aabb::Aabb;
pub use polygon::Polygon;
pub use rectangle::Rectangle;
pub use triangle::{SlopeClass, Triangle};
