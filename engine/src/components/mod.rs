pub mod bounds_component;
pub mod sleep_component;

use crate::collider_component::ColliderComponent;
use crate::component_store::SparseSet;
use crate::entity::Entity;
use crate::geom::Aabb;
use crate::physics_component::PhysicsComponent;
use crate::transform_component::TransformComponent;
use bounds_component::BoundsComponent;
use sleep_component::SleepComponent;

/// Every component store, keyed by entity.
#[derive(Debug, Default)]
pub struct Components {
    pub transforms: SparseSet<TransformComponent>,
    pub bounds: SparseSet<BoundsComponent>,
    pub colliders: SparseSet<ColliderComponent>,
    pub physics: SparseSet<PhysicsComponent>,
    pub sleep: SparseSet<SleepComponent>,
}

impl Components {
    /// Drops every component the entity owns.
    pub fn remove_all(&mut self, entity: Entity) {
        self.transforms.remove(entity);
        self.bounds.remove(entity);
        self.colliders.remove(entity);
        self.physics.remove(entity);
        self.sleep.remove(entity);
    }

    pub fn position(&self, entity: Entity) -> Option<glam::Vec2> {
        self.transforms.get(entity).map(|t| t.position)
    }

    pub fn world_aabb(&self, entity: Entity) -> Option<Aabb> {
        let position = self.position(entity)?;
        let bounds = self.bounds.get(entity)?;
        Some(bounds.world_aabb(position))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use glam::Vec2;

    #[test]
    fn remove_all_clears_every_store() {
        let mut components = Components::default();
        let entity = Entity::from_raw(4);
        components
            .transforms
            .insert(entity, TransformComponent::new(1.0, 2.0));
        components
            .bounds
            .insert(entity, BoundsComponent::new(2.0, 2.0, Vec2::ZERO).unwrap());
        components.physics.insert(entity, PhysicsComponent::default());
        components.sleep.insert(entity, SleepComponent::default());

        assert_eq!(
            components.world_aabb(entity),
            Some(Aabb::from_min_max(1.0, 2.0, 3.0, 4.0))
        );

        components.remove_all(entity);
        assert!(components.transforms.is_empty());
        assert!(components.bounds.is_empty());
        assert!(components.physics.is_empty());
        assert!(components.sleep.is_empty());
        assert!(components.world_aabb(entity).is_none());
    }
}
