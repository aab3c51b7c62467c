//! Stable hashing for section names and keys.
//!
//! Goals:
//! - One explicit hash (not std::DefaultHasher) so the name -> hash
//!   mapping is invariant across toolchains/platforms and runs.
//! - 32-bit output: the hash is stored next to every pair/section and is
//!   the primary lookup key; the name string is kept alongside so that a
//!   collision can always be resolved by a final string compare.

/// 32-bit hash value attached to every section and key.
pub type Hash32 = u32;

/// Compute the one-at-a-time hash of a string.
///
/// Accumulates each byte with shift/xor mixing, then runs three final mix
/// steps. The empty string hashes to 0. Distribution is good enough that
/// collisions are rare, but callers must still compare the name itself on
/// a hash match.
pub fn hash32(s: &str) -> Hash32 {
    let mut h: u32 = 0;
    for &b in s.as_bytes() {
        h = h.wrapping_add(b as u32);
        h = h.wrapping_add(h << 10);
        h ^= h >> 6;
    }
    h = h.wrapping_add(h << 3);
    h ^= h >> 11;
    h = h.wrapping_add(h << 15);
    h
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_hashes_to_zero() {
        assert_eq!(hash32(""), 0);
    }

    #[test]
    fn deterministic_across_calls() {
        for k in ["pizza", "ham", "pizza:ham", "a", "Z", "wine"] {
            assert_eq!(hash32(k), hash32(k));
        }
    }

    #[test]
    fn distinct_for_small_sample() {
        // Not a collision-freedom guarantee, just a sanity check that the
        // mixing steps are actually wired in.
        let hs: Vec<Hash32> = ["a", "b", "ab", "ba", "section", "noitces"]
            .iter()
            .map(|s| hash32(s))
            .collect();
        for i in 0..hs.len() {
            for j in (i + 1)..hs.len() {
                assert_ne!(hs[i], hs[j], "sample keys should not collide");
            }
        }
    }
}
