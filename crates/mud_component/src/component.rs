//! Core [`Component`] trait and the component-tag identity scheme.
//!
//! Every piece of data attached to an entity must implement [`Component`].
//! Component types are identified by a [`ComponentTag`] derived from their
//! string name, and an entity holds at most one component per tag.

use std::any::Any;

use serde::Serialize;

/// A stable identifier for a component type.
///
/// The tag is the component's string name. Tags are cheap to copy, compare
/// and hash, and their total order gives views and diagnostics a canonical
/// rendering order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
pub struct ComponentTag(&'static str);

impl ComponentTag {
    /// Create a tag from a component type name.
    #[must_use]
    pub const fn new(name: &'static str) -> Self {
        Self(name)
    }

    /// Returns the component type name this tag identifies.
    #[must_use]
    pub const fn name(self) -> &'static str {
        self.0
    }

    /// Returns the tag for a Rust component type `C`.
    #[must_use]
    pub fn of<C: Component>() -> Self {
        C::tag()
    }
}

impl std::fmt::Display for ComponentTag {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.0)
    }
}

/// The core component trait.
///
/// Components must be `Clone` because every entity owns its components
/// outright — entity values are copied whole through the store, never
/// shared by reference. `Send + Sync` lets entity values cross threads.
///
/// # Examples
///
/// ```rust
/// use mud_component::Component;
///
/// #[derive(Debug, Clone, Default)]
/// struct Health {
///     current: u32,
///     max: u32,
/// }
///
/// impl Component for Health {
///     fn type_name() -> &'static str { "Health" }
/// }
/// ```
pub trait Component: Clone + Send + Sync + 'static {
    /// A human-readable name for this component type.
    fn type_name() -> &'static str;

    /// Returns the [`ComponentTag`] for this component type.
    fn tag() -> ComponentTag {
        ComponentTag::new(Self::type_name())
    }
}

/// Object-safe layer over [`Component`] for type-erased storage.
///
/// Entities store components as `Box<dyn AnyComponent>` keyed by tag;
/// `clone_boxed` lets the whole map be cloned without knowing concrete
/// types, and `as_any` supports downcasting on lookup.
pub(crate) trait AnyComponent: Any + Send + Sync {
    fn clone_boxed(&self) -> Box<dyn AnyComponent>;
    fn as_any(&self) -> &dyn Any;
}

impl<C: Component> AnyComponent for C {
    fn clone_boxed(&self) -> Box<dyn AnyComponent> {
        Box::new(self.clone())
    }

    fn as_any(&self) -> &dyn Any {
        self
    }
}

impl Clone for Box<dyn AnyComponent> {
    fn clone(&self) -> Self {
        self.clone_boxed()
    }
}

/// A single element of an entity construction list: either a concrete
/// component value, or a bare component type standing in for its default
/// value.
///
/// The original contract accepts "a value or just the type" — in Rust the
/// default-from-type capability is the standard [`Default`] trait, required
/// only by [`ComponentSeed::of`].
pub struct ComponentSeed {
    tag: ComponentTag,
    value: Box<dyn AnyComponent>,
}

impl ComponentSeed {
    /// Seed from a fully-populated component value.
    #[must_use]
    pub fn value<C: Component>(component: C) -> Self {
        Self {
            tag: C::tag(),
            value: Box::new(component),
        }
    }

    /// Seed from a bare component type: the type's default value is
    /// substituted.
    #[must_use]
    pub fn of<C: Component + Default>() -> Self {
        Self::value(C::default())
    }

    /// Returns the tag this seed will occupy on the entity.
    #[must_use]
    pub fn tag(&self) -> ComponentTag {
        self.tag
    }

    pub(crate) fn into_parts(self) -> (ComponentTag, Box<dyn AnyComponent>) {
        (self.tag, self.value)
    }
}

impl<C: Component> From<C> for ComponentSeed {
    fn from(component: C) -> Self {
        Self::value(component)
    }
}

impl std::fmt::Debug for ComponentSeed {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_tuple("ComponentSeed").field(&self.tag).finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Debug, Clone, Default, PartialEq)]
    struct Health {
        current: u32,
        max: u32,
    }

    impl Component for Health {
        fn type_name() -> &'static str {
            "Health"
        }
    }

    #[derive(Debug, Clone, Default, PartialEq)]
    struct Name(String);

    impl Component for Name {
        fn type_name() -> &'static str {
            "Name"
        }
    }

    #[test]
    fn test_tag_is_stable() {
        assert_eq!(Health::tag(), Health::tag());
        assert_eq!(Health::tag(), ComponentTag::of::<Health>());
        assert_eq!(Health::tag().name(), "Health");
    }

    #[test]
    fn test_tags_differ_between_types() {
        assert_ne!(Health::tag(), Name::tag());
    }

    #[test]
    fn test_tag_ordering_follows_names() {
        assert!(Health::tag() < Name::tag());
    }

    #[test]
    fn test_seed_from_value_keeps_tag() {
        let seed = ComponentSeed::value(Name("fred".to_string()));
        assert_eq!(seed.tag(), Name::tag());
    }

    #[test]
    fn test_seed_of_bare_type_uses_default() {
        let seed = ComponentSeed::of::<Health>();
        assert_eq!(seed.tag(), Health::tag());
        let (_, value) = seed.into_parts();
        let health = value.as_any().downcast_ref::<Health>().unwrap();
        assert_eq!(*health, Health::default());
    }

    #[test]
    fn test_seed_from_impl() {
        let seed: ComponentSeed = Name("fred".to_string()).into();
        assert_eq!(seed.tag(), Name::tag());
    }
}
