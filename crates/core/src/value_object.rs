//! Value object trait: equality by value, not identity.

/// Marker trait for value objects.
///
/// Value objects have no identity and are compared by their attribute values.
/// Product variant specifications (model, memory, country of origin, ...) are
/// value objects: two smartphones with identical specs are still distinct
/// products, but their specs compare equal.
///
/// ```ignore
/// #[derive(Debug, Clone, PartialEq, Eq)]
/// struct Color(String);
///
/// impl ValueObject for Color {}
/// ```
pub trait ValueObject: Clone + PartialEq + core::fmt::Debug {}
