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
//! World management
//!
//! The World is the central container for all ECS data,
//! managing entities, components, and providing query interfaces.

use crate::ecs::entity::EntityAllocator;
use crate::ecs::{Component, ComponentStores, DenseStorage, Entity, Query};
use log::{debug, trace, warn};

/// The main ECS world container
///
/// World owns every entity handle and every component store. Processors
/// receive it by `&mut` once per frame; there is no other way to reach
/// simulation state.
#[derive(Debug, Default)]
pub struct World {
    entities: EntityAllocator,
    stores: ComponentStores,
}

impl World {
    /// Create a new empty world
    pub fn new() -> Self {
        World {
            entities: EntityAllocator::new(),
            stores: ComponentStores::new(),
        }
    }

    /// Create a new entity with no components
    pub fn create_entity(&mut self) -> Entity {
        self.entities.allocate()
    }

    /// Destroy an entity together with all of its components
    ///
    /// Returns `false` if the entity was already destroyed or never existed.
    pub fn destroy_entity(&mut self, entity: Entity) -> bool {
        if !self.entities.free(entity) {
            return false;
        }
        self.stores.remove_all(entity);
        trace!("destroyed {}", entity);
        true
    }

    /// Check if an entity is alive
    pub fn is_entity_alive(&self, entity: Entity) -> bool {
        self.entities.is_alive(entity)
    }

    /// Get the number of alive entities
    pub fn entity_count(&self) -> usize {
        self.entities.len()
    }

    /// Entities created over the world's lifetime
    pub fn created_total(&self) -> u64 {
        self.entities.created_total()
    }

    /// Entities destroyed over the world's lifetime
    pub fn destroyed_total(&self) -> u64 {
        self.entities.destroyed_total()
    }

    /// Attach a component, replacing any existing one of the same type
    ///
    /// For singleton components the previous holder, if it is a different
    /// entity, loses the component. Returns `false` if `entity` is dead.
    pub fn add<C: Component>(&mut self, entity: Entity, component: C) -> bool {
        if !self.entities.is_alive(entity) {
            debug!("ignoring component for dead {}", entity);
            return false;
        }

        let storage = C::storage_mut(&mut self.stores);
        if C::SINGLETON {
            let others: Vec<Entity> = storage
                .entities()
                .iter()
                .copied()
                .filter(|&holder| holder != entity)
                .collect();
            for holder in others {
                warn!(
                    "moving singleton {} from {} to {}",
                    std::any::type_name::<C>(),
                    holder,
                    entity
                );
                storage.remove(holder);
            }
        }

        storage.insert(entity, component);
        true
    }

    /// Detach a component, returning it if it was present
    pub fn remove<C: Component>(&mut self, entity: Entity) -> Option<C> {
        C::storage_mut(&mut self.stores).remove(entity)
    }

    /// Get a component of an entity
    pub fn get<C: Component>(&self, entity: Entity) -> Option<&C> {
        C::storage(&self.stores).get(entity)
    }

    /// Get a mutable component of an entity
    pub fn get_mut<C: Component>(&mut self, entity: Entity) -> Option<&mut C> {
        C::storage_mut(&mut self.stores).get_mut(entity)
    }

    /// Check whether an entity has a component
    pub fn has<C: Component>(&self, entity: Entity) -> bool {
        C::storage(&self.stores).contains(entity)
    }

    /// The first entity holding `C`, if any
    ///
    /// Meant for singleton components such as the background.
    pub fn single<C: Component>(&self) -> Option<(Entity, &C)> {
        C::storage(&self.stores).iter().next()
    }

    /// The store for one component type
    pub fn storage<C: Component>(&self) -> &DenseStorage<C> {
        C::storage(&self.stores)
    }

    /// All stores at once, for processors that need disjoint borrows
    pub fn stores_mut(&mut self) -> &mut ComponentStores {
        &mut self.stores
    }

    /// Iterate over every entity matching the signature `Q`
    ///
    /// The iterator is lazy and borrows the world, so the world cannot be
    /// mutated until it is dropped. Use [`World::query_entities`] to
    /// collect matches first when the loop body needs to destroy entities.
    ///
    /// ```
    /// use purple_rain::ecs::World;
    /// use purple_rain::ecs::components::{Position, Raindrop, Rgb};
    ///
    /// let mut world = World::new();
    /// let drop = world.create_entity();
    /// world.add(drop, Position::new(15.0, 0.0));
    /// world.add(drop, Raindrop::new(Rgb::PURPLE));
    ///
    /// for (entity, (raindrop, position)) in world.query::<(Raindrop, Position)>() {
    ///     assert_eq!(entity, drop);
    ///     assert_eq!(raindrop.color, Rgb::PURPLE);
    ///     assert_eq!(position.x, 15.0);
    /// }
    /// ```
    pub fn query<Q: Query>(&self) -> impl Iterator<Item = (Entity, Q::Item<'_>)> + '_ {
        Q::candidates(self)
            .iter()
            .filter_map(move |&entity| Q::fetch(self, entity).map(|item| (entity, item)))
    }

    /// Snapshot of the entities matching `Q`
    pub fn query_entities<Q: Query>(&self) -> Vec<Entity> {
        self.query::<Q>().map(|(entity, _)| entity).collect()
    }

    /// Clear all entities and components
    pub fn clear(&mut self) {
        self.entities.clear();
        self.stores.clear();
    }

    /// Get an iterator over all alive entities
    pub fn entities(&self) -> impl Iterator<Item = Entity> + '_ {
        self.entities.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ecs::components::{Background, Position, Raindrop, Rgb, Velocity};

    #[test]
    fn test_world_entity_lifecycle() {
        let mut world = World::new();

        let e1 = world.create_entity();
        let e2 = world.create_entity();

        assert_eq!(world.entity_count(), 2);
        assert!(world.is_entity_alive(e1));
        assert!(world.is_entity_alive(e2));

        world.destroy_entity(e1);
        assert_eq!(world.entity_count(), 1);
        assert!(!world.is_entity_alive(e1));
        assert!(world.is_entity_alive(e2));
    }

    #[test]
    fn test_destroy_removes_all_components() {
        let mut world = World::new();
        let e = world.create_entity();
        world.add(e, Position::new(0.0, 0.0));
        world.add(e, Velocity::falling(700.0));
        world.add(e, Raindrop::new(Rgb::PURPLE));

        assert!(world.destroy_entity(e));
        assert!(!world.has::<Position>(e));
        assert!(!world.has::<Velocity>(e));
        assert!(!world.has::<Raindrop>(e));
        assert!(world.storage::<Position>().is_empty());
    }

    #[test]
    fn test_destroy_twice_is_noop() {
        let mut world = World::new();
        let e = world.create_entity();
        assert!(world.destroy_entity(e));
        assert!(!world.destroy_entity(e));
        assert!(!world.destroy_entity(Entity::new(99, 0)));
        assert_eq!(world.entity_count(), 0);
    }

    #[test]
    fn test_recycled_slot_does_not_inherit_components() {
        let mut world = World::new();
        let old = world.create_entity();
        world.add(old, Position::new(1.0, 1.0));
        world.destroy_entity(old);

        let new = world.create_entity();
        assert_eq!(new.id(), old.id());
        assert!(!world.has::<Position>(new));
        assert!(world.get::<Position>(old).is_none());
    }

    #[test]
    fn test_add_replaces_existing() {
        let mut world = World::new();
        let e = world.create_entity();
        world.add(e, Position::new(1.0, 1.0));
        world.add(e, Position::new(2.0, 3.0));

        assert_eq!(world.storage::<Position>().len(), 1);
        assert_eq!(world.get::<Position>(e), Some(&Position::new(2.0, 3.0)));
    }

    #[test]
    fn test_add_to_dead_entity_is_ignored() {
        let mut world = World::new();
        let e = world.create_entity();
        world.destroy_entity(e);

        assert!(!world.add(e, Position::new(0.0, 0.0)));
        assert!(world.storage::<Position>().is_empty());
    }

    #[test]
    fn test_remove_component() {
        let mut world = World::new();
        let e = world.create_entity();
        world.add(e, Velocity::falling(10.0));

        assert_eq!(world.remove::<Velocity>(e), Some(Velocity::falling(10.0)));
        assert_eq!(world.remove::<Velocity>(e), None);
        assert!(world.is_entity_alive(e));
    }

    #[test]
    fn test_background_stays_singleton() {
        let mut world = World::new();
        let first = world.create_entity();
        let second = world.create_entity();
        world.add(first, Background::new(Rgb::BLACK));
        world.add(second, Background::new(Rgb::PURPLE));

        assert_eq!(world.storage::<Background>().len(), 1);
        assert!(!world.has::<Background>(first));
        let (holder, background) = world.single::<Background>().unwrap();
        assert_eq!(holder, second);
        assert_eq!(background.color, Rgb::PURPLE);
    }

    #[test]
    fn test_query_entities_snapshot_allows_destroy() {
        let mut world = World::new();
        for i in 0..4 {
            let e = world.create_entity();
            world.add(e, Position::new(i as f64, 0.0));
            world.add(e, Raindrop::new(Rgb::PURPLE));
        }

        for entity in world.query_entities::<(Raindrop, Position)>() {
            world.destroy_entity(entity);
        }

        assert_eq!(world.query::<(Raindrop, Position)>().count(), 0);
        assert_eq!(world.entity_count(), 0);
    }

    #[test]
    fn test_get_mut() {
        let mut world = World::new();
        let e = world.create_entity();
        world.add(e, Position::new(0.0, 0.0));
        world.get_mut::<Position>(e).unwrap().y = 42.0;
        assert_eq!(world.get::<Position>(e).unwrap().y, 42.0);
    }

    #[test]
    fn test_world_clear() {
        let mut world = World::new();
        let e = world.create_entity();
        world.add(e, Position::new(0.0, 0.0));
        world.create_entity();

        assert_eq!(world.entity_count(), 2);
        world.clear();
        assert_eq!(world.entity_count(), 0);
        assert!(world.storage::<Position>().is_empty());
    }

    #[test]
    fn test_handle_from_before_clear_stays_dead() {
        let mut world = World::new();
        let stale = world.create_entity();
        world.clear();

        let fresh = world.create_entity();
        world.add(fresh, Position::new(15.0, 0.0));

        assert_ne!(stale, fresh);
        assert!(!world.is_entity_alive(stale));
        assert!(world.is_entity_alive(fresh));
        assert_eq!(world.get::<Position>(stale), None);
        assert!(!world.destroy_entity(stale));
        assert!(world.is_entity_alive(fresh));
    }
}
