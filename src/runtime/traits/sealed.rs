// ABOUTME: Sealed trait pattern for runtime traits.
// ABOUTME: Prevents external implementations, allowing non-breaking evolution.

/// Sealed trait to prevent external implementations.
///
/// Only runtime clients defined in this crate can implement the runtime
/// traits, so methods can be added to them without breaking callers.
pub trait Sealed {}
