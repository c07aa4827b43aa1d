//! # mud_world
//!
//! The concurrent entity store of the MUD engine core: a sharded table
//! mapping [`mud_component::EntityId`] to whole [`mud_component::Entity`]
//! values, with atomic insert-if-absent and blind last-writer-wins upsert.
//!
//! The store never looks inside components; it moves entities by value and
//! leaves composition matching to `mud_component`'s views.

pub mod world;

pub use world::{World, WorldError};
