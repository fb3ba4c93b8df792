use std::collections::HashMap;

use glam::Vec2;

use crate::entity::Entity;
use crate::geom::Aabb;

/// Packed `(cx, cy)` cell coordinate: `cx` in the high 32 bits, `cy` in the low 32 bits.
pub type CellKey = u64;

pub const DEFAULT_CELL_SIZE: f32 = 8.0;

/// Largest cell range a single insert may cover.
pub const MAX_INSERT_CELLS: u64 = 1 << 20;

pub fn encode_cell(cx: i32, cy: i32) -> CellKey {
    ((cx as u32 as u64) << 32) | (cy as u32 as u64)
}

pub fn decode_cell(key: CellKey) -> (i32, i32) {
    ((key >> 32) as u32 as i32, key as u32 as i32)
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct CellRange {
    min_x: i32,
    min_y: i32,
    max_x: i32,
    max_y: i32,
}

impl CellRange {
    fn cell_count(&self) -> u64 {
        let w = (self.max_x as i64 - self.min_x as i64 + 1).max(0) as u64;
        let h = (self.max_y as i64 - self.min_y as i64 + 1).max(0) as u64;
        w.saturating_mul(h)
    }

    fn contains(&self, cx: i32, cy: i32) -> bool {
        cx >= self.min_x && cx <= self.max_x && cy >= self.min_y && cy <= self.max_y
    }

    fn keys(self) -> impl Iterator<Item = (i32, i32)> {
        (self.min_x..=self.max_x)
            .flat_map(move |cx| (self.min_y..=self.max_y).map(move |cy| (cx, cy)))
    }
}

/// Uniform grid bucketing entities by every cell their AABB touches.
#[derive(Debug, Clone)]
pub struct SpatialHashGrid {
    cell_size: f32,
    cells: HashMap<CellKey, Vec<Entity>>,
    membership: HashMap<Entity, Vec<CellKey>>,
}

impl Default for SpatialHashGrid {
    fn default() -> Self {
        Self::new(DEFAULT_CELL_SIZE)
    }
}

impl SpatialHashGrid {
    pub fn new(cell_size: f32) -> Self {
        let cell_size = if cell_size.is_finite() && cell_size > 0.0 {
            cell_size
        } else {
            log::warn!(
                "Invalid grid cell size {}, falling back to {}",
                cell_size,
                DEFAULT_CELL_SIZE
            );
            DEFAULT_CELL_SIZE
        };
        Self {
            cell_size,
            cells: HashMap::new(),
            membership: HashMap::new(),
        }
    }

    pub fn cell_size(&self) -> f32 {
        self.cell_size
    }

    pub fn cell_coord(&self, value: f32) -> i32 {
        (value / self.cell_size).floor() as i32
    }

    pub fn key_at(&self, point: Vec2) -> CellKey {
        encode_cell(self.cell_coord(point.x), self.cell_coord(point.y))
    }

    /// World-space rectangle covered by a cell.
    pub fn cell_bounds(&self, key: CellKey) -> Aabb {
        let (cx, cy) = decode_cell(key);
        let min = Vec2::new(cx as f32, cy as f32) * self.cell_size;
        Aabb::new(min, min + Vec2::splat(self.cell_size))
    }

    fn range(&self, aabb: &Aabb, padding: u32) -> Option<CellRange> {
        if !aabb.min.is_finite()
            || !aabb.max.is_finite()
            || aabb.min.x > aabb.max.x
            || aabb.min.y > aabb.max.y
        {
            return None;
        }
        let pad = padding.min(i32::MAX as u32) as i32;
        Some(CellRange {
            min_x: self.cell_coord(aabb.min.x).saturating_sub(pad),
            min_y: self.cell_coord(aabb.min.y).saturating_sub(pad),
            max_x: self.cell_coord(aabb.max.x).saturating_add(pad),
            max_y: self.cell_coord(aabb.max.y).saturating_add(pad),
        })
    }

    /// Inserts into every cell the AABB (grown by `padding` cells) overlaps. An entity
    /// already present is re-inserted from scratch.
    pub fn insert(&mut self, entity: Entity, aabb: &Aabb, padding: u32) {
        self.insert_where(entity, aabb, padding, |_| true);
    }

    /// Like [`insert`](Self::insert), but only keeps cells whose bounds satisfy `keep`.
    pub fn insert_where<F>(&mut self, entity: Entity, aabb: &Aabb, padding: u32, mut keep: F)
    where
        F: FnMut(&Aabb) -> bool,
    {
        self.remove(entity);
        let Some(range) = self.range(aabb, padding) else {
            log::warn!("Skipping grid insert of {} with invalid bounds {:?}", entity, aabb);
            return;
        };
        if range.cell_count() > MAX_INSERT_CELLS {
            log::warn!(
                "Skipping grid insert of {}: {:?} spans {} cells, limit is {}",
                entity,
                aabb,
                range.cell_count(),
                MAX_INSERT_CELLS
            );
            return;
        }

        let mut keys = Vec::new();
        for (cx, cy) in range.keys() {
            let key = encode_cell(cx, cy);
            if !keep(&self.cell_bounds(key)) {
                continue;
            }
            self.cells.entry(key).or_default().push(entity);
            keys.push(key);
        }
        self.membership.insert(entity, keys);
    }

    /// Removes the entity from every cell. Returns `false` if it was not in the grid.
    pub fn remove(&mut self, entity: Entity) -> bool {
        let Some(keys) = self.membership.remove(&entity) else {
            return false;
        };
        for key in keys {
            if let Some(bucket) = self.cells.get_mut(&key) {
                bucket.retain(|e| *e != entity);
                if bucket.is_empty() {
                    self.cells.remove(&key);
                }
            }
        }
        true
    }

    pub fn update(&mut self, entity: Entity, aabb: &Aabb, padding: u32) {
        self.insert(entity, aabb, padding);
    }

    pub fn contains(&self, entity: Entity) -> bool {
        self.membership.contains_key(&entity)
    }

    pub fn cells_of(&self, entity: Entity) -> &[CellKey] {
        self.membership.get(&entity).map(Vec::as_slice).unwrap_or(&[])
    }

    /// Visits each occupied cell overlapping `aabb`. Walks whichever is smaller: the
    /// cell range or the occupied cell set.
    fn for_each_cell<'a, F>(&'a self, aabb: &Aabb, mut visit: F)
    where
        F: FnMut(CellKey, &'a [Entity]),
    {
        let Some(range) = self.range(aabb, 0) else {
            return;
        };
        if range.cell_count() > self.cells.len() as u64 {
            for (key, bucket) in &self.cells {
                let (cx, cy) = decode_cell(*key);
                if range.contains(cx, cy) {
                    visit(*key, bucket.as_slice());
                }
            }
        } else {
            for (cx, cy) in range.keys() {
                let key = encode_cell(cx, cy);
                if let Some(bucket) = self.cells.get(&key) {
                    visit(key, bucket.as_slice());
                }
            }
        }
    }

    /// De-duplicated entities from every cell overlapping `aabb`, sorted by id.
    pub fn query(&self, aabb: &Aabb) -> Vec<Entity> {
        let mut found = Vec::new();
        self.for_each_cell(aabb, |_, bucket| found.extend_from_slice(bucket));
        found.sort_unstable();
        found.dedup();
        found
    }

    /// Occupied cell keys overlapping `aabb`, sorted.
    pub fn query_cells(&self, aabb: &Aabb) -> Vec<CellKey> {
        let mut keys = Vec::new();
        self.for_each_cell(aabb, |key, _| keys.push(key));
        keys.sort_unstable();
        keys
    }

    /// Number of entities in the grid.
    pub fn len(&self) -> usize {
        self.membership.len()
    }

    pub fn is_empty(&self) -> bool {
        self.membership.is_empty()
    }

    pub fn occupied_cells(&self) -> usize {
        self.cells.len()
    }

    pub fn clear(&mut self) {
        self.cells.clear();
        self.membership.clear();
    }
}
