use glam::Vec2;

use crate::error::PhysicsError;
use crate::geom::Aabb;

/// Size and offset of an entity's AABB relative to its transform.
#[derive(Debug, Default, Clone, Copy, PartialEq)]
pub struct BoundsComponent {
    width: f32,
    height: f32,
    offset: Vec2,
}

impl BoundsComponent {
    pub fn new(width: f32, height: f32, offset: Vec2) -> Result<Self, PhysicsError> {
        if !(width >= 0.0 && height >= 0.0) {
            return Err(PhysicsError::InvalidBounds { width, height });
        }
        Ok(Self {
            width,
            height,
            offset,
        })
    }

    pub fn from_local_aabb(aabb: Aabb) -> Result<Self, PhysicsError> {
        Self::new(aabb.width(), aabb.height(), aabb.min)
    }

    pub fn width(&self) -> f32 {
        self.width
    }

    pub fn height(&self) -> f32 {
        self.height
    }

    pub fn size(&self) -> Vec2 {
        Vec2::new(self.width, self.height)
    }

    pub fn offset(&self) -> Vec2 {
        self.offset
    }

    pub fn world_aabb(&self, position: Vec2) -> Aabb {
        Aabb::from_position_size(position + self.offset, self.size())
    }
}
