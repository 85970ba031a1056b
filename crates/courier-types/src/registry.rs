//! Registry trait for self-registering implementations.

/// Trait implemented by each pluggable implementation so it can be looked
/// up by name from configuration.
///
/// Each implementation crate exposes a `get_all_implementations()` helper
/// returning `(name, factory)` pairs built from its registries.
pub trait ImplementationRegistry {
	/// Name the implementation is selected by in configuration.
	const NAME: &'static str;
	/// Factory function type producing the implementation.
	type Factory;

	/// Returns the factory for this implementation.
	fn factory() -> Self::Factory;
}
