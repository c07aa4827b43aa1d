//! Entity values: an unforgeable identity plus at most one component per
//! type.
//!
//! An [`Entity`] is a value, not a handle into shared storage: operations
//! that change its component set produce a new `Entity` carrying the same
//! [`EntityId`]. The id is assigned once at construction and is never
//! derived from the entity's contents.

use std::collections::HashMap;
use std::fmt;
use std::hash::{Hash, Hasher};

use serde::Serialize;
use thiserror::Error;
use uuid::Uuid;

use crate::component::{AnyComponent, Component, ComponentSeed, ComponentTag};

/// An opaque, process-unique entity identifier.
///
/// Ids are minted only by [`Entity::new`]; callers can copy and compare
/// them but never construct or predict one. Equality of entities is
/// equality of ids, not of contents.
///
/// `EntityId` deliberately implements `Serialize` but not `Deserialize` —
/// accepting ids from arbitrary bytes would make them forgeable.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
pub struct EntityId(Uuid);

impl EntityId {
    /// Mint a fresh, never-reused id.
    pub(crate) fn fresh() -> Self {
        Self(Uuid::new_v4())
    }
}

impl fmt::Display for EntityId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// The outcome an update callback reports back to [`Entity::update`].
#[derive(Debug)]
pub enum ComponentUpdate<C, E = std::convert::Infallible> {
    /// Store this value under the component's tag.
    Replace(C),
    /// Leave the entity unchanged.
    Ignore,
    /// Drop the component from the entity.
    Remove,
    /// Abort with a caller-defined failure value.
    Fail(E),
}

/// Errors produced by [`Entity::update`] and [`Entity::update_with`].
#[derive(Debug, Error, PartialEq)]
pub enum UpdateError<E = std::convert::Infallible> {
    /// The targeted component tag is absent from the entity. The update
    /// callback was never invoked.
    #[error("component '{0}' not found")]
    NotFound(ComponentTag),

    /// The update callback reported its own failure value, passed through
    /// uninterpreted. The entity is unchanged.
    #[error("component update failed: {0}")]
    Failed(E),
}

/// A unique identity paired with a set of at most one component per type.
///
/// Entities are plain values: cloning one yields an independent copy that
/// owns its own components, and the "mutating" operations ([`add`],
/// [`remove`], [`update`]) produce derived values carrying the same id.
///
/// [`add`]: Entity::add
/// [`remove`]: Entity::remove
/// [`update`]: Entity::update
#[derive(Clone)]
pub struct Entity {
    id: EntityId,
    components: HashMap<ComponentTag, Box<dyn AnyComponent>>,
}

impl Entity {
    /// Create an entity with a fresh id, seeded from the given components.
    ///
    /// Seeds apply left to right with map semantics: duplicate tags
    /// collapse to the last value for that tag. Never fails.
    #[must_use]
    pub fn new<I>(seeds: I) -> Self
    where
        I: IntoIterator<Item = ComponentSeed>,
    {
        let mut components = HashMap::new();
        for seed in seeds {
            let (tag, value) = seed.into_parts();
            components.insert(tag, value);
        }
        Self {
            id: EntityId::fresh(),
            components,
        }
    }

    /// Returns this entity's id.
    #[must_use]
    pub fn id(&self) -> EntityId {
        self.id
    }

    /// Look up the component of type `C`, if present. Pure; no side
    /// effects.
    #[must_use]
    pub fn get<C: Component>(&self) -> Option<&C> {
        self.components
            .get(&C::tag())
            .and_then(|component| component.as_any().downcast_ref::<C>())
    }

    /// Attach a component, unconditionally overwriting any existing
    /// component of the same type. Returns the derived entity; the id is
    /// unchanged.
    #[must_use]
    pub fn add<C: Component>(mut self, component: C) -> Self {
        self.components.insert(C::tag(), Box::new(component));
        self
    }

    /// Attach a sequence of components, left to right, each overwriting as
    /// it goes — later seeds with the same tag win.
    #[must_use]
    pub fn add_all<I>(mut self, seeds: I) -> Self
    where
        I: IntoIterator<Item = ComponentSeed>,
    {
        for seed in seeds {
            let (tag, value) = seed.into_parts();
            self.components.insert(tag, value);
        }
        self
    }

    /// Detach the component of type `C`. Removing an absent component is a
    /// no-op, not an error.
    #[must_use]
    pub fn remove<C: Component>(self) -> Self {
        self.remove_tag(C::tag())
    }

    /// Detach the component stored under `tag`, if any.
    #[must_use]
    pub fn remove_tag(mut self, tag: ComponentTag) -> Self {
        self.components.remove(&tag);
        self
    }

    /// Detach every named tag that is present.
    #[must_use]
    pub fn remove_all<I>(mut self, tags: I) -> Self
    where
        I: IntoIterator<Item = ComponentTag>,
    {
        for tag in tags {
            self.components.remove(&tag);
        }
        self
    }

    /// Update the component of type `C` through a callback.
    ///
    /// If `C` is absent the callback is never invoked and
    /// [`UpdateError::NotFound`] is returned. Otherwise the callback
    /// receives the current value and its [`ComponentUpdate`] decides the
    /// outcome. Borrows `self` so that on any error the caller's entity is
    /// provably untouched.
    ///
    /// # Errors
    ///
    /// [`UpdateError::NotFound`] if the component is absent;
    /// [`UpdateError::Failed`] carrying the callback's own failure value.
    pub fn update<C, E, F>(&self, f: F) -> Result<Self, UpdateError<E>>
    where
        C: Component,
        F: FnOnce(&C) -> ComponentUpdate<C, E>,
    {
        self.update_with(|component, _entity| f(component))
    }

    /// Like [`Entity::update`], but the callback also receives the
    /// pre-update entity as read-only context, e.g. to inspect sibling
    /// components while deciding the new value. Changes flow back only
    /// through the callback's return value.
    ///
    /// # Errors
    ///
    /// Same as [`Entity::update`].
    pub fn update_with<C, E, F>(&self, f: F) -> Result<Self, UpdateError<E>>
    where
        C: Component,
        F: FnOnce(&C, &Entity) -> ComponentUpdate<C, E>,
    {
        let Some(current) = self.get::<C>() else {
            return Err(UpdateError::NotFound(C::tag()));
        };
        match f(current, self) {
            ComponentUpdate::Replace(next) => Ok(self.clone().add(next)),
            ComponentUpdate::Ignore => Ok(self.clone()),
            ComponentUpdate::Remove => Ok(self.clone().remove::<C>()),
            ComponentUpdate::Fail(error) => Err(UpdateError::Failed(error)),
        }
    }

    /// Returns `true` iff every requested tag is present on this entity.
    ///
    /// An empty request is vacuously true for any entity. The walk
    /// short-circuits twice: a request larger than the component set can
    /// never match, and the membership scan stops at the first missing
    /// tag. No intermediate collection is built.
    pub fn has_components<'a, I>(&self, tags: I) -> bool
    where
        I: IntoIterator<Item = &'a ComponentTag>,
        I::IntoIter: ExactSizeIterator,
    {
        let mut tags = tags.into_iter();
        if tags.len() > self.components.len() {
            return false;
        }
        tags.all(|tag| self.components.contains_key(tag))
    }

    /// Returns `true` if a component of type `C` is attached.
    #[must_use]
    pub fn has<C: Component>(&self) -> bool {
        self.contains(C::tag())
    }

    /// Returns `true` if a component is stored under `tag`.
    #[must_use]
    pub fn contains(&self, tag: ComponentTag) -> bool {
        self.components.contains_key(&tag)
    }

    /// Returns the number of attached components.
    #[must_use]
    pub fn len(&self) -> usize {
        self.components.len()
    }

    /// Returns `true` if no components are attached.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.components.is_empty()
    }

    /// Returns the attached component tags in sorted order.
    #[must_use]
    pub fn tags(&self) -> Vec<ComponentTag> {
        let mut tags: Vec<ComponentTag> = self.components.keys().copied().collect();
        tags.sort_unstable();
        tags
    }
}

impl Default for Entity {
    /// The empty entity: a fresh id and no components.
    fn default() -> Self {
        Self {
            id: EntityId::fresh(),
            components: HashMap::new(),
        }
    }
}

/// Identity equality: two entities are equal iff their ids are equal,
/// regardless of components.
impl PartialEq for Entity {
    fn eq(&self, other: &Self) -> bool {
        self.id == other.id
    }
}

impl Eq for Entity {}

impl Hash for Entity {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.id.hash(state);
    }
}

impl fmt::Debug for Entity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Entity")
            .field("id", &self.id)
            .field("components", &self.tags())
            .finish()
    }
}

/// Renders the sorted component tag list, never component contents.
impl fmt::Display for Entity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Entity[")?;
        for (i, tag) in self.tags().iter().enumerate() {
            if i > 0 {
                write!(f, ", ")?;
            }
            write!(f, "{tag}")?;
        }
        write!(f, "]")
    }
}
