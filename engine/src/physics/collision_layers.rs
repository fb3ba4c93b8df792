use std::fmt;

use serde::{Deserialize, Serialize};

use crate::error::LayerError;

pub const MAX_LAYERS: usize = 32;

/// Index into the collision matrix. Layer 0 is "Default" and collides with everything.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct Layer(u8);

impl Layer {
    pub const DEFAULT: Layer = Layer(0);

    pub fn new(index: usize) -> Result<Self, LayerError> {
        if index >= MAX_LAYERS {
            return Err(LayerError::OutOfRange(index));
        }
        Ok(Layer(index as u8))
    }

    pub fn index(self) -> usize {
        self.0 as usize
    }
}

impl fmt::Display for Layer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "layer {}", self.0)
    }
}

/// Symmetric 32x32 layer compatibility matrix plus the layer name registry.
#[derive(Debug, Clone)]
pub struct CollisionLayers {
    matrix: [u32; MAX_LAYERS],
    names: Vec<String>,
}

impl Default for CollisionLayers {
    fn default() -> Self {
        Self::new()
    }
}

impl CollisionLayers {
    /// Every layer pair starts enabled; only "Default" is registered.
    pub fn new() -> Self {
        Self {
            matrix: [u32::MAX; MAX_LAYERS],
            names: vec!["Default".to_string()],
        }
    }

    pub fn register(&mut self, name: &str) -> Result<Layer, LayerError> {
        if let Some(existing) = self.find(name) {
            return Ok(existing);
        }
        if self.names.len() >= MAX_LAYERS {
            return Err(LayerError::LimitExceeded { max: MAX_LAYERS });
        }
        let layer = Layer(self.names.len() as u8);
        self.names.push(name.to_string());
        log::debug!("Registered collision {} as {:?}", layer, name);
        Ok(layer)
    }

    pub fn find(&self, name: &str) -> Option<Layer> {
        self.names
            .iter()
            .position(|n| n == name)
            .map(|index| Layer(index as u8))
    }

    pub fn name(&self, layer: Layer) -> Option<&str> {
        self.names.get(layer.index()).map(String::as_str)
    }

    pub fn registered(&self) -> usize {
        self.names.len()
    }

    pub fn set(&mut self, a: Layer, b: Layer, enabled: bool) {
        if !enabled && (a == Layer::DEFAULT || b == Layer::DEFAULT) {
            log::warn!("Ignoring request to disable collisions with the Default layer");
            return;
        }
        let (ia, ib) = (a.index(), b.index());
        if enabled {
            self.matrix[ia] |= 1 << ib;
            self.matrix[ib] |= 1 << ia;
        } else {
            self.matrix[ia] &= !(1 << ib);
            self.matrix[ib] &= !(1 << ia);
        }
    }

    pub fn enable(&mut self, a: Layer, b: Layer) {
        self.set(a, b, true);
    }

    pub fn disable(&mut self, a: Layer, b: Layer) {
        self.set(a, b, false);
    }

    pub fn should_collide(&self, a: Layer, b: Layer) -> bool {
        self.matrix[a.index()] & (1 << b.index()) != 0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn toggling_is_symmetric() {
        let mut layers = CollisionLayers::new();
        let player = layers.register("Player").unwrap();
        let pickups = layers.register("Pickups").unwrap();

        assert!(layers.should_collide(player, pickups));
        layers.disable(player, pickups);
        assert!(!layers.should_collide(player, pickups));
        assert!(!layers.should_collide(pickups, player));

        layers.enable(pickups, player);
        assert!(layers.should_collide(player, pickups));
        assert!(layers.should_collide(pickups, player));
    }

    #[test]
    fn default_layer_always_collides() {
        let mut layers = CollisionLayers::new();
        let ghost = layers.register("Ghost").unwrap();
        layers.disable(ghost, Layer::DEFAULT);
        layers.disable(Layer::DEFAULT, Layer::DEFAULT);
        for index in 0..MAX_LAYERS {
            let other = Layer::new(index).unwrap();
            assert!(layers.should_collide(Layer::DEFAULT, other));
            assert!(layers.should_collide(other, Layer::DEFAULT));
        }
    }

    #[test]
    fn exhaustive_symmetry_after_random_toggles() {
        let mut layers = CollisionLayers::new();
        for step in 0..200usize {
            let a = Layer::new((step * 7) % MAX_LAYERS).unwrap();
            let b = Layer::new((step * 13 + 5) % MAX_LAYERS).unwrap();
            layers.set(a, b, step % 3 == 0);
        }
        for i in 0..MAX_LAYERS {
            for j in 0..MAX_LAYERS {
                let (a, b) = (Layer::new(i).unwrap(), Layer::new(j).unwrap());
                assert_eq!(layers.should_collide(a, b), layers.should_collide(b, a));
            }
        }
    }

    #[test]
    fn registry_is_bounded() {
        let mut layers = CollisionLayers::new();
        assert_eq!(layers.name(Layer::DEFAULT), Some("Default"));
        for i in 1..MAX_LAYERS {
            let layer = layers.register(&format!("layer-{i}")).unwrap();
            assert_eq!(layer.index(), i);
        }
        assert_eq!(
            layers.register("one-too-many"),
            Err(LayerError::LimitExceeded { max: MAX_LAYERS })
        );
        assert_eq!(layers.register("layer-3").unwrap().index(), 3);
        assert_eq!(Layer::new(MAX_LAYERS), Err(LayerError::OutOfRange(MAX_LAYERS)));
    }
}
