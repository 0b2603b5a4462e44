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
//! Entity handles and identifier allocation
//!
//! Entities carry no data of their own. A handle is a slot index plus a
//! generation; the generation changes every time a slot is recycled, so a
//! handle to a destroyed raindrop never matches the drop that later reuses
//! its slot.

use std::fmt;

/// Slot index of an entity
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct EntityId(u64);

impl EntityId {
    /// Create a new EntityId from a raw u64 value
    pub fn new(id: u64) -> Self {
        EntityId(id)
    }

    /// Get the raw u64 value
    pub fn raw(&self) -> u64 {
        self.0
    }
}

impl fmt::Display for EntityId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Entity({})", self.0)
    }
}

/// Generational entity handle
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Entity {
    id: EntityId,
    generation: u32,
}

impl Entity {
    /// Create a new entity with the given ID and generation
    pub fn new(id: u64, generation: u32) -> Self {
        Entity {
            id: EntityId::new(id),
            generation,
        }
    }

    /// Get the entity ID
    pub fn id(&self) -> EntityId {
        self.id
    }

    /// Get the generation number
    pub fn generation(&self) -> u32 {
        self.generation
    }
}

impl fmt::Display for Entity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Entity({}, gen: {})", self.id.0, self.generation)
    }
}

/// Hands out entity handles and tracks which ones are alive
///
/// Freed slots go on a free list and are handed out again with their
/// generation bumped. A live handle is never issued twice.
#[derive(Debug, Default)]
pub struct EntityAllocator {
    generations: Vec<u32>,
    alive: Vec<bool>,
    free: Vec<u64>,
    live_count: usize,
    created_total: u64,
    destroyed_total: u64,
}

impl EntityAllocator {
    /// Create an allocator with no entities
    pub fn new() -> Self {
        Self::default()
    }

    /// Allocate a fresh handle
    pub fn allocate(&mut self) -> Entity {
        let id = match self.free.pop() {
            Some(id) => id,
            None => {
                self.generations.push(0);
                self.alive.push(false);
                (self.generations.len() - 1) as u64
            }
        };

        let slot = id as usize;
        self.alive[slot] = true;
        self.live_count += 1;
        self.created_total += 1;
        Entity::new(id, self.generations[slot])
    }

    /// Release a handle, returning `false` if it was not alive
    pub fn free(&mut self, entity: Entity) -> bool {
        if !self.is_alive(entity) {
            return false;
        }

        let slot = entity.id().raw() as usize;
        self.alive[slot] = false;
        self.generations[slot] = self.generations[slot].wrapping_add(1);
        self.free.push(entity.id().raw());
        self.live_count -= 1;
        self.destroyed_total += 1;
        true
    }

    /// Check whether a handle refers to a live entity
    pub fn is_alive(&self, entity: Entity) -> bool {
        let slot = entity.id().raw() as usize;
        slot < self.alive.len()
            && self.alive[slot]
            && self.generations[slot] == entity.generation()
    }

    /// Number of live entities
    pub fn len(&self) -> usize {
        self.live_count
    }

    /// Whether no entity is alive
    pub fn is_empty(&self) -> bool {
        self.live_count == 0
    }

    /// Handles issued since creation or the last clear
    pub fn created_total(&self) -> u64 {
        self.created_total
    }

    /// Handles released since creation or the last clear
    pub fn destroyed_total(&self) -> u64 {
        self.destroyed_total
    }

    /// Iterate over live handles in slot order
    pub fn iter(&self) -> impl Iterator<Item = Entity> + '_ {
        self.alive
            .iter()
            .enumerate()
            .filter(|(_, alive)| **alive)
            .map(|(slot, _)| Entity::new(slot as u64, self.generations[slot]))
    }

    /// Release every live handle
    ///
    /// Slots keep their generations, so handles issued before the clear
    /// stay dead after their slots are reused.
    pub fn clear(&mut self) {
        for slot in 0..self.alive.len() {
            if self.alive[slot] {
                self.alive[slot] = false;
                self.generations[slot] = self.generations[slot].wrapping_add(1);
                self.free.push(slot as u64);
                self.destroyed_total += 1;
            }
        }
        self.live_count = 0;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_entity_creation() {
        let entity = Entity::new(42, 1);
        assert_eq!(entity.id().raw(), 42);
        assert_eq!(entity.generation(), 1);
    }

    #[test]
    fn test_entity_equality() {
        let e1 = Entity::new(1, 0);
        let e2 = Entity::new(1, 0);
        let e3 = Entity::new(1, 1);
        assert_eq!(e1, e2);
        assert_ne!(e1, e3);
    }

    #[test]
    fn test_allocator_recycles_with_new_generation() {
        let mut allocator = EntityAllocator::new();
        let first = allocator.allocate();
        assert!(allocator.free(first));

        let second = allocator.allocate();
        assert_eq!(second.id(), first.id());
        assert_ne!(second.generation(), first.generation());
        assert!(!allocator.is_alive(first));
        assert!(allocator.is_alive(second));
    }

    #[test]
    fn test_allocator_double_free_is_noop() {
        let mut allocator = EntityAllocator::new();
        let entity = allocator.allocate();
        assert!(allocator.free(entity));
        assert!(!allocator.free(entity));
        assert_eq!(allocator.len(), 0);
        assert_eq!(allocator.created_total(), 1);
        assert_eq!(allocator.destroyed_total(), 1);
    }

    #[test]
    fn test_allocator_unknown_handle() {
        let allocator = EntityAllocator::new();
        assert!(!allocator.is_alive(Entity::new(7, 0)));
    }

    #[test]
    fn test_allocator_iter_skips_dead() {
        let mut allocator = EntityAllocator::new();
        let a = allocator.allocate();
        let b = allocator.allocate();
        let c = allocator.allocate();
        allocator.free(b);

        let live: Vec<Entity> = allocator.iter().collect();
        assert_eq!(live, vec![a, c]);
    }

    #[test]
    fn test_allocator_clear_retires_handles() {
        let mut allocator = EntityAllocator::new();
        let a = allocator.allocate();
        let b = allocator.allocate();
        allocator.free(b);
        allocator.clear();

        assert!(allocator.is_empty());
        assert_eq!(allocator.destroyed_total(), 2);

        let reused = allocator.allocate();
        assert!(!allocator.is_alive(a));
        assert!(!allocator.is_alive(b));
        assert_ne!(reused, a);
        assert_ne!(reused, b);
    }
}
