//! Day-key hashing: one calendar day string maps to one stable 32-bit seed.

/// FNV-1a over the day key's bytes.
///
/// Order-sensitive, one byte at a time, XOR-then-multiply. Not a security
/// property; distinct keys just need to land on distinct seeds with high
/// probability.
#[must_use]
pub fn derive_day_seed(day_key: &str) -> u32 {
    const FNV_OFFSET: u32 = 2_166_136_261;
    const FNV_PRIME: u32 = 16_777_619;
    let mut hash = FNV_OFFSET;
    for b in day_key.as_bytes() {
        hash ^= u32::from(*b);
        hash = hash.wrapping_mul(FNV_PRIME);
    }
    hash
}
