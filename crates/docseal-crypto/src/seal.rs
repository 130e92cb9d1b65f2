use docseal_types::Commitment;

/// Domain tag prepended to every entry encoding.
///
/// Domain separation prevents cross-type collisions: bytes hashed here can
/// never collide with hashes computed for another purpose under a different
/// tag.
pub const ENTRY_DOMAIN: &str = "docseal-entry-v1";

/// Compute the commitment for a ledger entry.
///
/// Canonical encoding, in fixed field order:
///
/// ```text
/// [domain tag][":"]
/// [index: u64 BE]
/// [created_at: f64 bit pattern, u64 BE]
/// [payload length: u64 BE][payload bytes]
/// [previous commitment: 32 raw bytes]
/// ```
///
/// The payload is length-prefixed, and every other field is fixed-width, so
/// the encoding is unambiguous without any serializer in the loop. Pure
/// function of its inputs.
pub fn entry_commitment(
    index: u64,
    created_at: f64,
    payload: &str,
    previous_commitment: &Commitment,
) -> Commitment {
    let mut hasher = blake3::Hasher::new();
    hasher.update(ENTRY_DOMAIN.as_bytes());
    hasher.update(b":");
    hasher.update(&index.to_be_bytes());
    hasher.update(&created_at.to_bits().to_be_bytes());
    hasher.update(&(payload.len() as u64).to_be_bytes());
    hasher.update(payload.as_bytes());
    hasher.update(previous_commitment.as_bytes());
    Commitment::from_hash(*hasher.finalize().as_bytes())
}
