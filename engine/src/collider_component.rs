use std::ops::BitOr;

use glam::Vec2;

use crate::geom::{Aabb, Polygon, Rectangle, Triangle};
use crate::physics::collision_layers::Layer;

#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CollisionType {
    /// Never produces contacts.
    Ignore,
    #[default]
    Static,
    Dynamic,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ShapeKind {
    Box,
    Triangle,
    Polygon,
}

/// Surface roles a static collider plays for the bodies touching it.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Hash)]
pub struct CollisionRole(u8);

impl CollisionRole {
    pub const NONE: CollisionRole = CollisionRole(0);
    pub const WALL: CollisionRole = CollisionRole(1 << 0);
    pub const FLOOR: CollisionRole = CollisionRole(1 << 1);
    pub const PLATFORM: CollisionRole = CollisionRole(Self::WALL.0 | Self::FLOOR.0);

    pub fn bits(self) -> u8 {
        self.0
    }

    pub fn contains(self, other: CollisionRole) -> bool {
        self.0 & other.0 == other.0
    }

    pub fn is_wall(self) -> bool {
        self.contains(Self::WALL)
    }

    pub fn is_floor(self) -> bool {
        self.contains(Self::FLOOR)
    }
}

impl BitOr for CollisionRole {
    type Output = CollisionRole;

    fn bitor(self, rhs: CollisionRole) -> CollisionRole {
        CollisionRole(self.0 | rhs.0)
    }
}

/// Collision geometry in the entity's local space.
#[derive(Debug, Clone, PartialEq)]
pub enum Body {
    Box(Rectangle),
    Triangle(Triangle),
    Polygon(Polygon),
}

impl Body {
    pub fn kind(&self) -> ShapeKind {
        match self {
            Body::Box(_) => ShapeKind::Box,
            Body::Triangle(_) => ShapeKind::Triangle,
            Body::Polygon(_) => ShapeKind::Polygon,
        }
    }

    pub fn local_aabb(&self) -> Aabb {
        match self {
            Body::Box(rect) => rect.aabb(),
            Body::Triangle(tri) => tri.aabb(),
            Body::Polygon(poly) => poly.aabb(),
        }
    }

    /// Whether the shape placed at `position` touches `cell`. Used to prune grid cells
    /// that only the bounding box reaches.
    pub fn touches_cell(&self, position: Vec2, cell: &Aabb) -> bool {
        match self {
            Body::Box(rect) => rect.aabb().translated(position).touches(cell),
            Body::Triangle(tri) => tri.translated(position).intersects_aabb(cell),
            Body::Polygon(poly) => poly.intersects_aabb(&cell.translated(-position)),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct ColliderComponent {
    pub layer: Layer,
    pub collision_type: CollisionType,
    pub role: CollisionRole,
    pub body: Body,
}

impl ColliderComponent {
    pub fn new(collision_type: CollisionType, role: CollisionRole, body: Body) -> Self {
        Self {
            layer: Layer::DEFAULT,
            collision_type,
            role,
            body,
        }
    }

    pub fn with_layer(mut self, layer: Layer) -> Self {
        self.layer = layer;
        self
    }

    pub fn shape(&self) -> ShapeKind {
        self.body.kind()
    }
}
