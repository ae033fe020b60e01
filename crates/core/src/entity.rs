//! Entity trait: identity + continuity across state changes.

/// Entity marker + minimal interface.
///
/// A storage cell is the canonical entity here: its contents change with every
/// stock movement, but its address never does.
pub trait Entity {
    /// Strongly-typed entity identifier.
    type Id: Clone + Eq + Ord + core::fmt::Debug;

    /// Returns the entity identifier.
    fn id(&self) -> &Self::Id;
}
