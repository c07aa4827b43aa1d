//! # mud_component
//!
//! The data model of the entity–component storage core: typed data
//! ("components") attached to opaque identities ("entities"), and
//! precomputed composition descriptors ("views") for testing entities
//! against a requested shape.
//!
//! This crate provides:
//!
//! - [`Component`] trait — the contract all attached data must satisfy.
//! - [`ComponentTag`] — stable identifiers for component types.
//! - [`Entity`] — immutable-identity values holding at most one component
//!   per type, with functional add/remove/update operations.
//! - [`ComponentView`] — reusable, order-independent composition
//!   descriptors.
//!
//! Storage of entities lives in the `mud_world` crate; nothing here knows
//! about any store.

pub mod component;
pub mod entity;
pub mod view;

pub use component::{Component, ComponentSeed, ComponentTag};
pub use entity::{ComponentUpdate, Entity, EntityId, UpdateError};
pub use view::{ComponentView, ViewId};
