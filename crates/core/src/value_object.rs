//! Value object trait: equality by value, not identity.

/// Marker trait for value objects.
///
/// Value objects are **immutable** and **compared by value** — they represent
/// concepts where identity does not matter, only the attribute values do.
/// A set of filter criteria with the same constraints is the same criteria;
/// there is no "this particular criteria instance".
///
/// To "modify" a value object, build a new one. Requiring `Clone`,
/// `PartialEq` and `Debug` keeps them cheap to copy, comparable and easy to
/// assert on in tests.
///
/// ```ignore
/// #[derive(Debug, Clone, PartialEq, Eq)]
/// struct PriceRange {
///     min: u64,
///     max: u64,
/// }
///
/// impl ValueObject for PriceRange {}
/// ```
pub trait ValueObject: Clone + PartialEq + core::fmt::Debug {}
