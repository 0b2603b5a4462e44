//! Entity Component System (ECS) core implementation
//!
//! This module provides the foundational ECS architecture including:
//! - Generational entity handles
//! - Dense per-type component storage owned by the [`World`]
//! - Typed queries over a closed set of component types
//! - Processors and a staged scheduler that runs them every frame

mod component;
mod entity;
mod processor;
mod query;
mod world;

pub mod components;
pub mod scheduler;

pub use component::{Component, ComponentStores, DenseStorage};
pub use entity::{Entity, EntityAllocator, EntityId};
pub use processor::{Frame, Processor};
pub use query::Query;
pub use world::World;
