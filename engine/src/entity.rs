use std::fmt;

use serde::{Deserialize, Serialize};

/// Opaque entity handle. Id `0` is reserved as the null handle.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct Entity(u32);

impl Entity {
    pub const NULL: Entity = Entity(0);

    pub fn from_raw(id: u32) -> Self {
        Entity(id)
    }

    pub fn id(self) -> u32 {
        self.0
    }

    pub fn index(self) -> usize {
        self.0 as usize
    }

    pub fn is_null(self) -> bool {
        self.0 == 0
    }
}

impl fmt::Display for Entity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// Hands out entity ids, recycling destroyed ones most-recent-first.
#[derive(Debug)]
pub struct EntityAllocator {
    next: u32,
    free_list: Vec<Entity>,
    alive: Vec<bool>,
    live_count: usize,
}

impl Default for EntityAllocator {
    fn default() -> Self {
        Self::new()
    }
}

impl EntityAllocator {
    pub fn new() -> Self {
        Self {
            next: 1,
            free_list: Vec::new(),
            alive: vec![false],
            live_count: 0,
        }
    }

    pub fn create(&mut self) -> Entity {
        let entity = match self.free_list.pop() {
            Some(recycled) => recycled,
            None => {
                let fresh = Entity(self.next);
                self.next += 1;
                self.alive.push(false);
                fresh
            }
        };
        self.alive[entity.index()] = true;
        self.live_count += 1;
        entity
    }

    /// Releases `entity` for reuse. Returns `false` if it was not alive.
    pub fn destroy(&mut self, entity: Entity) -> bool {
        if !self.is_alive(entity) {
            return false;
        }
        self.alive[entity.index()] = false;
        self.free_list.push(entity);
        self.live_count -= 1;
        true
    }

    pub fn is_alive(&self, entity: Entity) -> bool {
        !entity.is_null() && self.alive.get(entity.index()).copied().unwrap_or(false)
    }

    pub fn len(&self) -> usize {
        self.live_count
    }

    pub fn is_empty(&self) -> bool {
        self.live_count == 0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ids_start_after_null() {
        let mut allocator = EntityAllocator::new();
        let a = allocator.create();
        let b = allocator.create();
        assert_eq!(a.id(), 1);
        assert_eq!(b.id(), 2);
        assert!(!allocator.is_alive(Entity::NULL));
    }

    #[test]
    fn destroyed_ids_are_recycled_lifo() {
        let mut allocator = EntityAllocator::new();
        let a = allocator.create();
        let b = allocator.create();
        let _c = allocator.create();

        assert!(allocator.destroy(a));
        assert!(allocator.destroy(b));
        assert_eq!(allocator.len(), 1);

        assert_eq!(allocator.create(), b);
        assert_eq!(allocator.create(), a);
        assert_eq!(allocator.create().id(), 4);
    }

    #[test]
    fn double_destroy_is_reported() {
        let mut allocator = EntityAllocator::new();
        let a = allocator.create();
        assert!(allocator.destroy(a));
        assert!(!allocator.destroy(a));
        assert!(!allocator.destroy(Entity::NULL));
        assert!(!allocator.destroy(Entity::from_raw(99)));
        assert!(allocator.is_empty());
    }
}
