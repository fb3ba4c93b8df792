use crate::collider_component::CollisionType;
use crate::components::Components;
use crate::entity::Entity;
use crate::geom::Aabb;

use super::collision_layers::{CollisionLayers, Layer};
use super::spatial_hash_grid::SpatialHashGrid;

/// Colliders near one body that passed filtering, statics first.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct Candidates {
    pub statics: Vec<Entity>,
    pub dynamics: Vec<Entity>,
}

impl Candidates {
    pub fn len(&self) -> usize {
        self.statics.len() + self.dynamics.len()
    }

    pub fn is_empty(&self) -> bool {
        self.statics.is_empty() && self.dynamics.is_empty()
    }
}

/// Whether `entity` on `layer` may collide with `other`. Symmetric in the layer check.
pub fn is_eligible(
    components: &Components,
    layers: &CollisionLayers,
    entity: Entity,
    layer: Layer,
    other: Entity,
) -> bool {
    if other == entity {
        return false;
    }
    let Some(collider) = components.colliders.get(other) else {
        return false;
    };
    collider.collision_type != CollisionType::Ignore && layers.should_collide(layer, collider.layer)
}

/// Queries the static grid then the dynamic grid over `region` and filters the results.
pub fn gather(
    components: &Components,
    layers: &CollisionLayers,
    static_grid: &SpatialHashGrid,
    dynamic_grid: &SpatialHashGrid,
    entity: Entity,
    layer: Layer,
    region: &Aabb,
) -> Candidates {
    let keep = |other: &Entity| is_eligible(components, layers, entity, layer, *other);
    let statics: Vec<_> = static_grid.query(region).into_iter().filter(keep).collect();
    let dynamics: Vec<_> = dynamic_grid.query(region).into_iter().filter(keep).collect();
    Candidates { statics, dynamics }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::collider_component::{Body, ColliderComponent, CollisionRole};
    use crate::geom::Rectangle;
    use glam::Vec2;

    fn e(id: u32) -> Entity {
        Entity::from_raw(id)
    }

    fn collider(collision_type: CollisionType, layer: Layer) -> ColliderComponent {
        ColliderComponent::new(
            collision_type,
            CollisionRole::FLOOR,
            Body::Box(Rectangle::new(0.0, 0.0, 4.0, 4.0)),
        )
        .with_layer(layer)
    }

    #[test]
    fn filters_self_ignored_and_disabled_layers() {
        let mut layers = CollisionLayers::new();
        let player = layers.register("Player").unwrap();
        let ghosts = layers.register("Ghosts").unwrap();
        layers.disable(player, ghosts);

        let mut components = Components::default();
        components.colliders.insert(e(1), collider(CollisionType::Dynamic, player));
        components.colliders.insert(e(2), collider(CollisionType::Static, Layer::DEFAULT));
        components.colliders.insert(e(3), collider(CollisionType::Ignore, Layer::DEFAULT));
        components.colliders.insert(e(4), collider(CollisionType::Static, ghosts));
        components.colliders.insert(e(5), collider(CollisionType::Dynamic, player));

        let mut statics = SpatialHashGrid::new(8.0);
        let mut dynamics = SpatialHashGrid::new(8.0);
        let here = Aabb::from_position_size(Vec2::ZERO, Vec2::splat(4.0));
        for id in [2, 3, 4] {
            statics.insert(e(id), &here, 0);
        }
        for id in [1, 5] {
            dynamics.insert(e(id), &here, 0);
        }

        let found = gather(&components, &layers, &statics, &dynamics, e(1), player, &here);
        assert_eq!(found.statics, vec![e(2)]);
        assert_eq!(found.dynamics, vec![e(5)]);
        assert_eq!(found.len(), 2);

        // The filter gives the same answer from the other side.
        assert_eq!(
            is_eligible(&components, &layers, e(4), ghosts, e(1)),
            is_eligible(&components, &layers, e(1), player, e(4))
        );
    }
}
