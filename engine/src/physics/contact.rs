use glam::Vec2;

use crate::collider_component::ShapeKind;
use crate::entity::Entity;

/// Penetrations shallower than this are treated as touching, not overlapping.
pub const MIN_PENETRATION: f32 = 0.01;
/// Velocity components smaller than this are snapped to zero.
pub const MIN_VELOCITY: f32 = 0.01;

/// Separation the dynamic body needs from one other collider.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Contact {
    pub other: Entity,
    /// Unit direction the dynamic body moves to separate.
    pub normal: Vec2,
    pub depth: f32,
    pub shape: ShapeKind,
    pub is_wall: bool,
    pub is_floor: bool,
}

impl Contact {
    pub fn is_vertical(&self) -> bool {
        self.normal.y.abs() > self.normal.x.abs()
    }

    /// Floor-like support from below (y grows downward).
    pub fn supports_from_below(&self) -> bool {
        self.normal.y < 0.0
    }
}

/// Outcome of a narrow-phase test against one candidate.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Overlap {
    Contact(Contact),
    /// The shapes overlap but no resolution exists for this pair.
    Unresolved { other: Entity, shape: ShapeKind },
}

impl Overlap {
    pub fn other(&self) -> Entity {
        match self {
            Overlap::Contact(contact) => contact.other,
            Overlap::Unresolved { other, .. } => *other,
        }
    }
}
