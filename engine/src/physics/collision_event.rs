use std::collections::HashMap;

use glam::Vec2;

use crate::entity::Entity;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CollisionEventType {
    Enter,
    Stay,
    Exit,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CollisionInfo {
    /// Separation direction for `entity`.
    pub normal: Vec2,
    pub depth: f32,
    /// False for overlaps that were detected but have no resolution (polygons, body pairs).
    pub resolved: bool,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CollisionEvent {
    pub entity: Entity,
    pub other_entity: Entity,
    pub event_type: CollisionEventType,
    pub collision_info: CollisionInfo,
}

/// Diffs each body's touching set against the previous tick to produce enter, stay and exit
/// events.
#[derive(Debug, Default)]
pub struct CollisionEventTracker {
    previous: HashMap<Entity, Vec<(Entity, CollisionInfo)>>,
    pending: Vec<CollisionEvent>,
}

impl CollisionEventTracker {
    /// Records what `entity` touched this tick. `touching` must hold each other entity once.
    pub fn record(&mut self, entity: Entity, touching: Vec<(Entity, CollisionInfo)>) {
        let previous = self.previous.remove(&entity).unwrap_or_default();

        for (other_entity, collision_info) in &touching {
            let event_type = if previous.iter().any(|(e, _)| e == other_entity) {
                CollisionEventType::Stay
            } else {
                CollisionEventType::Enter
            };
            self.pending.push(CollisionEvent {
                entity,
                other_entity: *other_entity,
                event_type,
                collision_info: *collision_info,
            });
        }

        for (other_entity, collision_info) in previous {
            if !touching.iter().any(|(e, _)| *e == other_entity) {
                self.pending.push(CollisionEvent {
                    entity,
                    other_entity,
                    event_type: CollisionEventType::Exit,
                    collision_info,
                });
            }
        }

        if !touching.is_empty() {
            self.previous.insert(entity, touching);
        }
    }

    /// Drops all history involving `entity` without emitting events.
    pub fn forget(&mut self, entity: Entity) {
        self.previous.remove(&entity);
        for touching in self.previous.values_mut() {
            touching.retain(|(other, _)| *other != entity);
        }
        self.previous.retain(|_, touching| !touching.is_empty());
    }

    pub fn drain(&mut self) -> Vec<CollisionEvent> {
        std::mem::take(&mut self.pending)
    }

    pub fn pending(&self) -> &[CollisionEvent] {
        &self.pending
    }
}
