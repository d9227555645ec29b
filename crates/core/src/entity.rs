//! Entity trait: identity + continuity across state changes.

/// Entity marker + minimal interface.
///
/// Catalog entities are keyed by name: two products with the same name inside
/// one collection are the same entity and get merged.
pub trait Entity {
    /// Identity key.
    type Id: ?Sized + Eq + core::hash::Hash + core::fmt::Debug;

    /// Returns the entity identifier.
    fn id(&self) -> &Self::Id;

    /// Whether `other` carries the same identity.
    fn same_identity(&self, other: &Self) -> bool {
        self.id() == other.id()
    }
}
