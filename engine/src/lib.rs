// Distributed under the GNU Affero General Public License v3.0 or later.
// See accompanying file LICENSE or https://www.gnu.org/licenses/agpl-3.0.html for details.

pub mod collider_component;
pub mod component_store;
pub mod components;
pub mod entity;
pub mod error;
pub mod geom;
pub mod level;
pub mod physics;
pub mod physics_component;
pub mod time_resource;
pub mod transform_component;
pub mod utils;

pub use collider_component::{CollisionRole, CollisionType, ShapeKind};
pub use entity::Entity;
pub use error::PhysicsError;
pub use geom::Aabb;
pub use physics::collision_event::{CollisionEvent, CollisionEventType};
pub use physics::collision_layers::Layer;
pub use physics::movement_system::{MovementSettings, PlayerIntent};
pub use physics::physics_config::PhysicsConfig;
pub use physics::physics_world::{BodySnapshot, ColliderShape, PhysicsWorld};
pub use time_resource::FixedTimestep;
