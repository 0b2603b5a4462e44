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
//! Typed component queries
//!
//! A query is a tuple of component types, e.g. `(Raindrop, Position)`.
//! Matching walks the smallest store named by the tuple and keeps every
//! entity that has all the other components too.

use crate::ecs::{Component, Entity, World};

/// A component signature that can be matched against the world
pub trait Query: 'static {
    /// References handed out for one matching entity
    type Item<'w>;

    /// Entities to test, taken from the smallest store in the signature
    fn candidates(world: &World) -> &[Entity];

    /// Fetch the components of `entity`, or `None` if one is missing
    fn fetch(world: &World, entity: Entity) -> Option<Self::Item<'_>>;
}

macro_rules! impl_query {
    ($($component:ident),+) => {
        impl<$($component: Component),+> Query for ($($component,)+) {
            type Item<'w> = ($(&'w $component,)+);

            fn candidates(world: &World) -> &[Entity] {
                let stores = [$(world.storage::<$component>().entities()),+];
                stores
                    .into_iter()
                    .min_by_key(|entities| entities.len())
                    .unwrap_or(&[])
            }

            fn fetch(world: &World, entity: Entity) -> Option<Self::Item<'_>> {
                Some(($(world.get::<$component>(entity)?,)+))
            }
        }
    };
}

impl_query!(A);
impl_query!(A, B);
impl_query!(A, B, C);
