//! Mapping between in-memory entities and their stored documents.

/// Converts an entity `E` to its stored document `D` and back.
///
/// Both directions must be pure. `decode` is where legacy documents get
/// upgraded: fields missing from older documents are filled with defaults
/// so the returned entity always satisfies the current type.
pub trait Codec<E, D>: Send + Sync {
    fn encode(&self, entity: &E) -> D;
    fn decode(&self, document: D) -> E;
}

/// Codec for entities stored exactly as they are.
#[derive(Clone, Copy, Debug, Default)]
pub struct IdentityCodec;

impl<E: Clone> Codec<E, E> for IdentityCodec {
    fn encode(&self, entity: &E) -> E { entity.clone() }
    fn decode(&self, document: E) -> E { document }
}
