use crate::entity::Entity;

const ABSENT: usize = usize::MAX;

/// Sparse-set storage: components live densely in insertion order, with an
/// entity-indexed lookup table for O(1) access.
#[derive(Debug, Clone)]
pub struct SparseSet<T> {
    dense: Vec<T>,
    entities: Vec<Entity>,
    sparse: Vec<usize>,
}

impl<T> Default for SparseSet<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T> SparseSet<T> {
    pub fn new() -> Self {
        Self {
            dense: Vec::new(),
            entities: Vec::new(),
            sparse: Vec::new(),
        }
    }

    fn slot(&self, entity: Entity) -> Option<usize> {
        match self.sparse.get(entity.index()) {
            Some(&slot) if slot != ABSENT => Some(slot),
            _ => None,
        }
    }

    pub fn contains(&self, entity: Entity) -> bool {
        self.slot(entity).is_some()
    }

    pub fn get(&self, entity: Entity) -> Option<&T> {
        self.slot(entity).map(|slot| &self.dense[slot])
    }

    pub fn get_mut(&mut self, entity: Entity) -> Option<&mut T> {
        let slot = self.slot(entity)?;
        Some(&mut self.dense[slot])
    }

    /// Inserts or replaces. Returns the previous value. The null entity is never stored.
    pub fn insert(&mut self, entity: Entity, value: T) -> Option<T> {
        if entity.is_null() {
            log::warn!("Ignoring component insert for the null entity");
            return None;
        }
        if let Some(slot) = self.slot(entity) {
            return Some(std::mem::replace(&mut self.dense[slot], value));
        }

        let index = entity.index();
        if index >= self.sparse.len() {
            self.sparse.resize(index + 1, ABSENT);
        }
        self.sparse[index] = self.dense.len();
        self.dense.push(value);
        self.entities.push(entity);
        None
    }

    /// Returns the existing component, inserting `default` first if there was none.
    pub fn get_or_insert(&mut self, entity: Entity, default: T) -> Option<&mut T> {
        if !self.contains(entity) {
            self.insert(entity, default);
        }
        self.get_mut(entity)
    }

    /// Removes the component, shifting later entries down so iteration order stays
    /// the insertion order.
    pub fn remove(&mut self, entity: Entity) -> Option<T> {
        let slot = self.slot(entity)?;
        self.sparse[entity.index()] = ABSENT;
        self.entities.remove(slot);
        let value = self.dense.remove(slot);
        for moved in &self.entities[slot..] {
            self.sparse[moved.index()] -= 1;
        }
        Some(value)
    }

    pub fn len(&self) -> usize {
        self.dense.len()
    }

    pub fn is_empty(&self) -> bool {
        self.dense.is_empty()
    }

    pub fn entities(&self) -> &[Entity] {
        &self.entities
    }

    pub fn values(&self) -> &[T] {
        &self.dense
    }

    pub fn iter(&self) -> impl Iterator<Item = (Entity, &T)> {
        self.entities.iter().copied().zip(self.dense.iter())
    }

    pub fn iter_mut(&mut self) -> impl Iterator<Item = (Entity, &mut T)> {
        self.entities.iter().copied().zip(self.dense.iter_mut())
    }

    pub fn clear(&mut self) {
        self.dense.clear();
        self.entities.clear();
        self.sparse.clear();
    }
}
