/// Context values and leaf types.
///
/// Defines the `Value` enum stored by contexts, the `ValueType` tags, and the
/// `Primitive` trait linking each Rust leaf type to its tag, its literal
/// form and the operation node its expressions may hold.
pub mod core;
/// Numeric and orderable leaf types.
///
/// Defines checked arithmetic for ints and longs, real arithmetic for doubles,
/// and which types may appear on either side of a relational operator.
pub mod numeric;
