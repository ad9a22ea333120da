//! Exit codes returned by [`crate::run`].

/// Command finished normally.
pub const SUCCESS: i32 = 0;

/// Bad arguments, bad input files or an engine failure.
pub const ERROR: i32 = 2;

/// A simulation stopped before all hands were played.
pub const INTERRUPTED: i32 = 130;
