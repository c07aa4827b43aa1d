//! Composition views: precomputed, order-independent component-set
//! descriptors.
//!
//! A [`ComponentView`] is built once per composition of interest and reused
//! across many match tests — it carries the deduplicated tag set so that
//! [`Entity::has_components`] never has to rebuild it, plus a canonical
//! [`ViewId`] so views over the same tag set identify equal regardless of
//! construction order.

use std::collections::HashSet;
use std::fmt;
use std::hash::{Hash, Hasher};

use serde::Serialize;

use crate::component::ComponentTag;
use crate::entity::Entity;

/// A canonical identifier for a composition of component types, computed
/// with the FNV-1a 64-bit hash over the sorted tag names.
///
/// The id is deterministic: the same tag set always produces the same
/// `ViewId` regardless of the order the tags were supplied in, which makes
/// views usable as cache keys downstream.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub struct ViewId(u64);

impl ViewId {
    /// FNV-1a 64-bit offset basis.
    const FNV_OFFSET_BASIS: u64 = 0xcbf2_9ce4_8422_2325;

    /// FNV-1a 64-bit prime.
    const FNV_PRIME: u64 = 0x0100_0000_01b3;

    /// Compute the id from tag names already sorted into canonical order.
    fn from_sorted_names(names: &[&'static str]) -> Self {
        let mut hash = Self::FNV_OFFSET_BASIS;
        for name in names {
            for &byte in name.as_bytes() {
                hash ^= u64::from(byte);
                hash = hash.wrapping_mul(Self::FNV_PRIME);
            }
            // Separator byte keeps ["ab", "c"] and ["a", "bc"] distinct.
            hash ^= u64::from(b'+');
            hash = hash.wrapping_mul(Self::FNV_PRIME);
        }
        Self(hash)
    }
}

/// A reusable descriptor of a component composition, used to test entities
/// for a specific shape. Immutable after construction.
#[derive(Debug, Clone)]
pub struct ComponentView {
    id: ViewId,
    tags: HashSet<ComponentTag>,
}

impl ComponentView {
    /// Build a view over the given tags. Duplicates collapse into the set;
    /// the id is computed from the sorted, deduplicated tag names.
    ///
    /// The empty view matches every entity.
    #[must_use]
    pub fn new<I>(tags: I) -> Self
    where
        I: IntoIterator<Item = ComponentTag>,
    {
        let tags: HashSet<ComponentTag> = tags.into_iter().collect();
        let mut names: Vec<&'static str> = tags.iter().map(|tag| tag.name()).collect();
        names.sort_unstable();
        Self {
            id: ViewId::from_sorted_names(&names),
            tags,
        }
    }

    /// Returns the canonical id of this composition.
    #[must_use]
    pub fn id(&self) -> ViewId {
        self.id
    }

    /// Returns the deduplicated tag set.
    #[must_use]
    pub fn tags(&self) -> &HashSet<ComponentTag> {
        &self.tags
    }

    /// Returns the number of distinct tags in the view.
    #[must_use]
    pub fn len(&self) -> usize {
        self.tags.len()
    }

    /// Returns `true` if the view has no tags.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.tags.is_empty()
    }

    /// Returns `true` iff the entity carries every component in this view.
    ///
    /// Delegates to [`Entity::has_components`] with the precomputed tag
    /// set — amortizing the set construction is the view's entire purpose.
    #[must_use]
    pub fn matches(&self, entity: &Entity) -> bool {
        entity.has_components(&self.tags)
    }
}

/// Views over the same tag set are equal, however they were built.
impl PartialEq for ComponentView {
    fn eq(&self, other: &Self) -> bool {
        self.id == other.id
    }
}

impl Eq for ComponentView {}

impl Hash for ComponentView {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.id.hash(state);
    }
}

/// Renders the sorted component tag list, same shape as [`Entity`].
impl fmt::Display for ComponentView {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut names: Vec<&'static str> = self.tags.iter().map(|tag| tag.name()).collect();
        names.sort_unstable();
        write!(f, "View[{}]", names.join(", "))
    }
}

#[cfg(test)]
mod tests {
    use crate::component::{Component, ComponentSeed};

    use super::*;

    #[derive(Debug, Clone, Copy, Default, PartialEq)]
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

    #[derive(Debug, Clone, Copy, Default, PartialEq)]
    struct Position {
        x: i32,
        y: i32,
    }

    impl Component for Position {
        fn type_name() -> &'static str {
            "Position"
        }
    }

    #[test]
    fn test_id_is_order_independent() {
        let a = ComponentView::new([Name::tag(), Health::tag(), Position::tag()]);
        let b = ComponentView::new([Position::tag(), Name::tag(), Health::tag()]);
        assert_eq!(a.id(), b.id());
        assert_eq!(a, b);
    }

    #[test]
    fn test_id_differs_between_tag_sets() {
        let a = ComponentView::new([Name::tag(), Health::tag()]);
        let b = ComponentView::new([Name::tag(), Position::tag()]);
        let c = ComponentView::new([Name::tag()]);
        assert_ne!(a.id(), b.id());
        assert_ne!(a.id(), c.id());
        assert_ne!(b.id(), c.id());
    }

    #[test]
    fn test_duplicate_tags_collapse() {
        let view = ComponentView::new([Name::tag(), Name::tag(), Health::tag()]);
        assert_eq!(view.len(), 2);
        assert_eq!(view, ComponentView::new([Health::tag(), Name::tag()]));
    }

    #[test]
    fn test_empty_view_matches_every_entity() {
        let view = ComponentView::new([]);
        assert!(view.is_empty());
        assert!(view.matches(&Entity::default()));
        assert!(view.matches(&Entity::new([ComponentSeed::of::<Health>()])));
    }

    #[test]
    fn test_matches_delegates_to_entity_membership() {
        let view = ComponentView::new([Name::tag(), Health::tag()]);

        let entity = Entity::new([ComponentSeed::value(Name("fred".to_string()))]);
        assert!(!view.matches(&entity));

        let entity = entity.add(Health::default());
        assert!(view.matches(&entity));

        // Extra components on the entity do not disturb the match.
        let entity = entity.add(Position::default());
        assert!(view.matches(&entity));
    }

    #[test]
    fn test_display_renders_sorted_tags() {
        let view = ComponentView::new([Position::tag(), Health::tag()]);
        assert_eq!(view.to_string(), "View[Health, Position]");
    }
}
