// Copyright 2025 John Brosnihan
//
// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License at
//
//     http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing, software
// distributed under the License is distributed on an "AS IS" BASIS,
// WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
// See the License for the specific language governing permissions and
// limitations under the License.
//! Component storage and management
//!
//! Components are plain data attached to entities. Each component type
//! lives in its own [`DenseStorage`], and the full set of stores is owned
//! by [`ComponentStores`] inside the world. The set of component types is
//! closed: every [`Component`] implementation names the store it lives in,
//! so asking the world for an unknown component type does not compile.

use crate::ecs::components::{Background, Position, Raindrop, Velocity};
use crate::ecs::Entity;
use std::collections::HashMap;

/// Trait that all components must implement
///
/// Components should be plain data structures without behavior.
pub trait Component: 'static + Copy + Send + Sync {
    /// Whether at most one entity may hold this component at a time
    const SINGLETON: bool = false;

    /// The store holding every instance of this component
    fn storage(stores: &ComponentStores) -> &DenseStorage<Self>;

    /// Mutable access to the store holding every instance of this component
    fn storage_mut(stores: &mut ComponentStores) -> &mut DenseStorage<Self>;
}

/// Densely packed component storage
///
/// Components sit in one contiguous array with a parallel array of owning
/// entities, plus a sparse map from entity to array index. Removal uses
/// swap-remove so the arrays never have gaps; iteration order is therefore
/// not insertion order once anything has been removed.
///
/// # Example
///
/// ```
/// use purple_rain::ecs::{DenseStorage, Entity};
/// use purple_rain::ecs::components::Position;
///
/// let mut storage = DenseStorage::<Position>::new();
/// let entity = Entity::new(1, 0);
///
/// storage.insert(entity, Position::new(15.0, 0.0));
/// assert!(storage.contains(entity));
/// assert_eq!(storage.get(entity).unwrap().x, 15.0);
/// ```
#[derive(Debug, Clone)]
pub struct DenseStorage<T: Component> {
    /// Mapping from Entity to dense array index
    entity_to_index: HashMap<Entity, usize>,
    /// Mapping from dense array index back to Entity (for swap_remove)
    index_to_entity: Vec<Entity>,
    components: Vec<T>,
}

impl<T: Component> DenseStorage<T> {
    /// Create a new empty storage
    pub fn new() -> Self {
        Self::with_capacity(0)
    }

    /// Create a new storage with the given capacity
    pub fn with_capacity(capacity: usize) -> Self {
        DenseStorage {
            entity_to_index: HashMap::with_capacity(capacity),
            index_to_entity: Vec::with_capacity(capacity),
            components: Vec::with_capacity(capacity),
        }
    }

    /// Get the number of components stored
    pub fn len(&self) -> usize {
        self.components.len()
    }

    /// Check if the storage is empty
    pub fn is_empty(&self) -> bool {
        self.components.is_empty()
    }

    /// Insert a component, replacing and returning any previous value
    pub fn insert(&mut self, entity: Entity, component: T) -> Option<T> {
        if let Some(&index) = self.entity_to_index.get(&entity) {
            return Some(std::mem::replace(&mut self.components[index], component));
        }

        let new_index = self.components.len();
        self.components.push(component);
        self.entity_to_index.insert(entity, new_index);
        self.index_to_entity.push(entity);

        debug_assert_eq!(self.entity_to_index.len(), self.index_to_entity.len());
        debug_assert_eq!(self.entity_to_index.len(), self.components.len());
        None
    }

    /// Remove the component for the given entity
    pub fn remove(&mut self, entity: Entity) -> Option<T> {
        let index = self.entity_to_index.remove(&entity)?;

        let component = self.components.swap_remove(index);
        self.index_to_entity.swap_remove(index);
        if let Some(&moved) = self.index_to_entity.get(index) {
            self.entity_to_index.insert(moved, index);
        }

        debug_assert_eq!(self.entity_to_index.len(), self.index_to_entity.len());
        debug_assert_eq!(self.entity_to_index.len(), self.components.len());
        Some(component)
    }

    /// Get a reference to the component for the given entity
    pub fn get(&self, entity: Entity) -> Option<&T> {
        let index = self.entity_to_index.get(&entity)?;
        Some(&self.components[*index])
    }

    /// Get a mutable reference to the component for the given entity
    pub fn get_mut(&mut self, entity: Entity) -> Option<&mut T> {
        let index = self.entity_to_index.get(&entity)?;
        Some(&mut self.components[*index])
    }

    /// Check if an entity has this component
    pub fn contains(&self, entity: Entity) -> bool {
        self.entity_to_index.contains_key(&entity)
    }

    /// Entities owning a component, in dense order
    pub fn entities(&self) -> &[Entity] {
        &self.index_to_entity
    }

    /// The dense component array
    pub fn components(&self) -> &[T] {
        &self.components
    }

    /// Owners and mutable components as two parallel slices
    ///
    /// Index `i` of the component slice belongs to index `i` of the entity
    /// slice. Used by bulk updates that walk the whole array.
    pub fn split_mut(&mut self) -> (&[Entity], &mut [T]) {
        (&self.index_to_entity, &mut self.components)
    }

    /// Iterate over `(entity, component)` pairs in dense order
    pub fn iter(&self) -> impl Iterator<Item = (Entity, &T)> + '_ {
        self.index_to_entity.iter().copied().zip(self.components.iter())
    }

    /// Clear all components
    pub fn clear(&mut self) {
        self.entity_to_index.clear();
        self.index_to_entity.clear();
        self.components.clear();
    }
}

impl<T: Component> Default for DenseStorage<T> {
    fn default() -> Self {
        Self::new()
    }
}

/// Every component store in the world
///
/// Fields are public so a processor can borrow two stores at once, one
/// mutably and one shared, without going through the world's accessors.
#[derive(Debug, Default)]
pub struct ComponentStores {
    /// Position of every moving or drawable entity
    pub positions: DenseStorage<Position>,
    /// Velocity of every moving entity
    pub velocities: DenseStorage<Velocity>,
    /// Raindrop tags
    pub raindrops: DenseStorage<Raindrop>,
    /// Background color holder (at most one entry)
    pub backgrounds: DenseStorage<Background>,
}

impl ComponentStores {
    /// Create an empty set of stores
    pub fn new() -> Self {
        Self::default()
    }

    /// Drop every component belonging to `entity`
    pub fn remove_all(&mut self, entity: Entity) {
        self.positions.remove(entity);
        self.velocities.remove(entity);
        self.raindrops.remove(entity);
        self.backgrounds.remove(entity);
    }

    /// Clear all stores
    pub fn clear(&mut self) {
        self.positions.clear();
        self.velocities.clear();
        self.raindrops.clear();
        self.backgrounds.clear();
    }
}
