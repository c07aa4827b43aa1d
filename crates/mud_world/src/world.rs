//! The concurrent entity store.
//!
//! A [`World`] maps entity ids to whole entity values. Entities cross the
//! store boundary by value: readers clone snapshots out, writers replace
//! whole entities. The table is sharded, so operations on different ids
//! proceed in parallel while operations on the same id serialize.

use std::fmt;

use dashmap::DashMap;
use dashmap::mapref::entry::Entry;
use thiserror::Error;
use tracing::{debug, trace};

use mud_component::{Entity, EntityId};

/// Errors that can occur on store operations.
#[derive(Debug, Error, PartialEq)]
pub enum WorldError {
    /// `add_entity` targeted an id that is already present.
    #[error("entity {0} already exists")]
    EntityAlreadyExists(EntityId),

    /// The requested id is not present in the store.
    #[error("entity {0} not found")]
    EntityNotFound(EntityId),
}

/// A concurrent entity store keyed by [`EntityId`].
///
/// All methods take `&self`; the `World` can be shared across threads
/// behind an `Arc` without external locking. At most one entity is stored
/// per id at any point in time.
#[derive(Debug, Default)]
pub struct World {
    entities: DashMap<EntityId, Entity>,
}

impl World {
    /// Create an empty store.
    #[must_use]
    pub fn new() -> Self {
        Self {
            entities: DashMap::new(),
        }
    }

    /// Atomically insert an entity if its id is not yet present.
    ///
    /// The check and the insert are a single atomic step: of any number of
    /// concurrent callers for the same id, exactly one succeeds and the
    /// rest observe [`WorldError::EntityAlreadyExists`]. On failure the
    /// store is unchanged.
    ///
    /// # Errors
    ///
    /// [`WorldError::EntityAlreadyExists`] if an entity with this id is
    /// already stored.
    pub fn add_entity(&self, entity: Entity) -> Result<(), WorldError> {
        let id = entity.id();
        match self.entities.entry(id) {
            Entry::Occupied(_) => Err(WorldError::EntityAlreadyExists(id)),
            Entry::Vacant(slot) => {
                slot.insert(entity);
                debug!(entity = %id, "entity added");
                Ok(())
            }
        }
    }

    /// Look up an entity by id, returning a snapshot of the stored value.
    ///
    /// The snapshot may be superseded by a concurrent writer the moment it
    /// is returned.
    ///
    /// # Errors
    ///
    /// [`WorldError::EntityNotFound`] if no entity with this id is stored.
    pub fn get_entity(&self, id: EntityId) -> Result<Entity, WorldError> {
        self.entities
            .get(&id)
            .map(|entry| entry.value().clone())
            .ok_or(WorldError::EntityNotFound(id))
    }

    /// Unconditionally upsert an entity: replace any stored entity with
    /// the same id, or insert it if absent. Never fails.
    ///
    /// This is a blind overwrite with last-writer-wins semantics — no
    /// staleness check is performed against the previously stored value.
    /// Callers needing read-modify-write must do `get_entity` →
    /// `Entity::update` → `update_entity` themselves and accept that the
    /// sequence is not atomic against concurrent upserts to the same id.
    pub fn update_entity(&self, entity: Entity) {
        let id = entity.id();
        self.entities.insert(id, entity);
        trace!(entity = %id, "entity upserted");
    }

    /// Remove an entity from the store, returning the stored value.
    ///
    /// # Errors
    ///
    /// [`WorldError::EntityNotFound`] if no entity with this id is stored.
    pub fn remove_entity(&self, id: EntityId) -> Result<Entity, WorldError> {
        match self.entities.remove(&id) {
            Some((_, entity)) => {
                debug!(entity = %id, "entity removed");
                Ok(entity)
            }
            None => Err(WorldError::EntityNotFound(id)),
        }
    }

    /// Returns `true` if an entity with this id is currently stored.
    #[must_use]
    pub fn contains(&self, id: EntityId) -> bool {
        self.entities.contains_key(&id)
    }

    /// Returns the number of stored entities.
    ///
    /// This is a live count: while other operations are in flight it may
    /// be stale by the time it is read.
    #[must_use]
    pub fn count(&self) -> usize {
        self.entities.len()
    }
}

/// Renders the current entity count.
impl fmt::Display for World {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "World({} entities)", self.entities.len())
    }
}
