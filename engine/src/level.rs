//! Level-building helpers on top of [`PhysicsWorld`]'s two spawn entry points.

use glam::Vec2;

use crate::collider_component::CollisionRole;
use crate::entity::Entity;
use crate::error::PhysicsError;
use crate::physics::physics_world::{ColliderShape, PhysicsWorld};

pub const PLAYER_WIDTH: f32 = 8.0;
pub const PLAYER_HEIGHT: f32 = 8.0;

pub fn spawn_player(world: &mut PhysicsWorld, position: Vec2) -> Result<Entity, PhysicsError> {
    world.spawn_dynamic_body(position.x, position.y, PLAYER_WIDTH, PLAYER_HEIGHT)
}

fn spawn_box(
    world: &mut PhysicsWorld,
    position: Vec2,
    size: Vec2,
    role: CollisionRole,
) -> Result<Entity, PhysicsError> {
    world.add_static_collider(
        position.x,
        position.y,
        ColliderShape::Box {
            width: size.x,
            height: size.y,
        },
        role,
    )
}

/// Blocks horizontal movement only.
pub fn spawn_wall(
    world: &mut PhysicsWorld,
    position: Vec2,
    size: Vec2,
) -> Result<Entity, PhysicsError> {
    spawn_box(world, position, size, CollisionRole::WALL)
}

/// Supports bodies from below.
pub fn spawn_floor(
    world: &mut PhysicsWorld,
    position: Vec2,
    size: Vec2,
) -> Result<Entity, PhysicsError> {
    spawn_box(world, position, size, CollisionRole::FLOOR)
}

/// Solid block: both wall and floor.
pub fn spawn_platform(
    world: &mut PhysicsWorld,
    position: Vec2,
    size: Vec2,
) -> Result<Entity, PhysicsError> {
    spawn_box(world, position, size, CollisionRole::PLATFORM)
}

/// Right triangle with local vertices `points`, placed at `position`.
pub fn spawn_slope(
    world: &mut PhysicsWorld,
    position: Vec2,
    points: [Vec2; 3],
) -> Result<Entity, PhysicsError> {
    let [a, b, c] = points;
    world.add_static_collider(
        position.x,
        position.y,
        ColliderShape::Triangle([a.x, a.y, b.x, b.y, c.x, c.y]),
        CollisionRole::FLOOR,
    )
}

pub fn spawn_polygon(
    world: &mut PhysicsWorld,
    position: Vec2,
    points: &[Vec2],
    role: CollisionRole,
) -> Result<Entity, PhysicsError> {
    let coords = points.iter().flat_map(|p| [p.x, p.y]).collect();
    world.add_static_collider(position.x, position.y, ColliderShape::Polygon(coords), role)
}
