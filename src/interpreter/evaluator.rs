/// Core evaluation logic.
///
/// Defines the `Resolve` trait every operation node implements, expression
/// resolution against a context, and dotted variable lookup.
pub mod core;

/// Operation node evaluation.
///
/// Implements `Resolve` for arithmetic, relational and logical nodes.
pub mod binary;
