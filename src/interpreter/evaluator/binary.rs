/// Arithmetic evaluation for ints, longs and doubles.
pub mod arithmetic;

/// Relational evaluation for every orderable type.
pub mod comparison;

/// Short-circuiting `&&` and `||`.
pub mod logic;
