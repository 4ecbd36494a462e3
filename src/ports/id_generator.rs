//! IdGenerator port - mints entity identifiers.

/// Source of unique entity ids.
///
/// Aggregate constructors take the generator as a parameter so tests can
/// supply predictable ids.
pub trait IdGenerator: Send + Sync {
    /// Returns a new, non-empty, unique id.
    fn generate_id(&self) -> String;
}
