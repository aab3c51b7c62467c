//! Pair storage for one section: append-only array of key/value slots
//! with per-pair hash, soft deletion and two sort orders.
//!
//! What's inside:
//! - KeyVal / PairSlot - a live pair or the tombstone left by deletion.
//!   Tombstones keep their slot forever (no compaction), so indices of
//!   other live pairs never shift.
//! - SortOrder - Unordered / ByHash / ByName. Only ByHash enables binary
//!   search; name order is not hash order, so ByName lookups stay linear.
//! - Section - find / set / iterate / sort, with fixed-increment growth.
//! - lookup_slot - the hash-then-compare search shared with the section
//!   array in dict/core (binary search with collision-cluster scan).

use anyhow::{Context, Result};
use log::debug;

use crate::hash::{hash32, Hash32};
use crate::metrics::{
    record_key_lookup_bsearch, record_key_lookup_linear, record_pair_grow, record_tombstone,
};

/// Number of pair slots added per growth step.
pub const PAIR_GROW: usize = 10;

/// Sort state of a pair (or section) array.
///
/// Three states instead of a boolean: a name-sorted array must not be
/// binary-searched by hash, so lookup code branches on `ByHash` only.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SortOrder {
    Unordered,
    ByHash,
    ByName,
}

/// One live key/value pair. `hash == hash32(key)`, cached at insert time.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct KeyVal {
    pub key: String,
    pub val: String,
    pub hash: Hash32,
}

/// A slot in the pair array: live, or the tombstone of a deleted pair.
#[derive(Debug, Clone)]
pub enum PairSlot {
    Live(KeyVal),
    Tombstone,
}

impl PairSlot {
    /// Hash used for ordering/searching. Tombstones sort as 0 and can
    /// never satisfy a key match.
    #[inline]
    pub fn hash(&self) -> Hash32 {
        match self {
            PairSlot::Live(kv) => kv.hash,
            PairSlot::Tombstone => 0,
        }
    }

    #[inline]
    pub fn key(&self) -> Option<&str> {
        match self {
            PairSlot::Live(kv) => Some(kv.key.as_str()),
            PairSlot::Tombstone => None,
        }
    }

    #[inline]
    pub fn live(&self) -> Option<&KeyVal> {
        match self {
            PairSlot::Live(kv) => Some(kv),
            PairSlot::Tombstone => None,
        }
    }
}

/// A named group of key/value pairs (the unnamed/global section uses an
/// empty name; that name never takes part in lookups).
#[derive(Debug, Clone)]
pub struct Section {
    pub name: String,
    pub hash: Hash32,
    pairs: Vec<PairSlot>,
    order: SortOrder,
}

impl Section {
    /// New empty section with room for at least `capacity` pairs.
    pub fn with_capacity(name: &str, capacity: usize) -> Self {
        Section {
            name: name.to_string(),
            hash: hash32(name),
            pairs: Vec::with_capacity(capacity.max(PAIR_GROW)),
            order: SortOrder::Unordered,
        }
    }

    /// Logical high-water mark of the pair array, tombstones included.
    /// Never decremented by deletion.
    #[inline]
    pub fn count(&self) -> usize {
        self.pairs.len()
    }

    /// Number of live (non-tombstoned) pairs.
    pub fn live_count(&self) -> usize {
        self.pairs.iter().filter(|s| s.live().is_some()).count()
    }

    #[inline]
    pub fn order(&self) -> SortOrder {
        self.order
    }

    /// Live pairs in array order; tombstones are skipped.
    pub fn live_pairs(&self) -> impl Iterator<Item = &KeyVal> {
        self.pairs.iter().filter_map(PairSlot::live)
    }

    // ----- lookup -----

    /// Find the live pair for `key`: hash first, exact key compare to
    /// settle collisions. Binary search when the array is hash-sorted,
    /// linear scan otherwise.
    pub fn find(&self, key: &str) -> Option<&KeyVal> {
        self.find_idx(key)
            .and_then(|i| self.pairs[i].live())
    }

    fn find_idx(&self, key: &str) -> Option<usize> {
        let hash = hash32(key);
        let by_hash = self.order == SortOrder::ByHash;
        if by_hash {
            record_key_lookup_bsearch();
        } else {
            record_key_lookup_linear();
        }
        lookup_slot(&self.pairs, by_hash, hash, PairSlot::hash, |s| {
            s.key() == Some(key)
        })
    }

    // ----- mutation -----

    /// Replace, delete or append one key.
    ///
    /// - live pair exists: replace its value (`Some`) or tombstone it
    ///   (`None`); either way the section becomes Unordered.
    /// - no live pair and `None`: nothing to delete, Ok.
    /// - otherwise append a fresh pair, growing the array first if full.
    ///   Reinsertion after a delete appends; tombstones are not reused.
    pub fn set(&mut self, key: &str, val: Option<&str>) -> Result<()> {
        if let Some(i) = self.find_idx(key) {
            match val {
                Some(v) => {
                    if let PairSlot::Live(kv) = &mut self.pairs[i] {
                        kv.val.clear();
                        kv.val.push_str(v);
                    }
                }
                None => {
                    debug!("section [{}]: tombstone key {:?}", self.name, key);
                    self.pairs[i] = PairSlot::Tombstone;
                    record_tombstone();
                }
            }
            self.order = SortOrder::Unordered;
            return Ok(());
        }
        let Some(v) = val else {
            return Ok(());
        };
        self.append(key, v)
    }

    /// Append a pair known to be absent. Grows by PAIR_GROW when full;
    /// on allocation failure the section is left untouched.
    pub(crate) fn append(&mut self, key: &str, val: &str) -> Result<()> {
        if self.pairs.len() == self.pairs.capacity() {
            self.pairs
                .try_reserve_exact(PAIR_GROW)
                .with_context(|| format!("grow pair array of section [{}]", self.name))?;
            record_pair_grow();
        }
        let hash = hash32(key);
        debug!(
            "section [{}]: new key {:?} hash {} value {:?}",
            self.name, key, hash, val
        );
        self.pairs.push(PairSlot::Live(KeyVal {
            key: key.to_string(),
            val: val.to_string(),
            hash,
        }));
        // append breaks any prior order
        self.order = SortOrder::Unordered;
        Ok(())
    }

    // ----- sorting -----

    /// Stable sort by hash; enables binary search. Tombstones (hash 0)
    /// gather at the front and are skip-filtered on every read.
    pub fn sort_by_hash(&mut self) {
        if self.order == SortOrder::ByHash || self.pairs.is_empty() {
            self.order = SortOrder::ByHash;
            return;
        }
        self.pairs.sort_by_key(PairSlot::hash);
        self.order = SortOrder::ByHash;
    }

    /// Stable sort by key name, for deterministic textual dumps. Does NOT
    /// enable binary search: subsequent lookups scan linearly.
    pub fn sort_by_name(&mut self) {
        self.pairs.sort_by(|a, b| a.key().cmp(&b.key()));
        self.order = SortOrder::ByName;
    }
}

// ----- shared hash-then-compare search -----

/// Locate the slot matching `hash` + `is_match` in a slot array.
///
/// `hash_sorted` selects binary search; on a hash hit with a failed
/// match the collision cluster (the contiguous run of equal hashes) is
/// walked to its start and scanned to its end. `is_match` is only called
/// on slots whose hash already equals `hash`.
pub(crate) fn lookup_slot<T>(
    slots: &[T],
    hash_sorted: bool,
    hash: Hash32,
    hash_of: impl Fn(&T) -> Hash32,
    is_match: impl Fn(&T) -> bool,
) -> Option<usize> {
    if !hash_sorted {
        return slots
            .iter()
            .position(|s| hash_of(s) == hash && is_match(s));
    }
    let mut down: isize = 0;
    let mut up: isize = slots.len() as isize - 1;
    while down <= up {
        let i = ((down + up) / 2) as usize;
        let h = hash_of(&slots[i]);
        if h == hash {
            if is_match(&slots[i]) {
                return Some(i);
            }
            // maybe several slots share this hash: rewind to the first
            // of the cluster, then scan it to the end
            let mut j = i;
            while j > 0 && hash_of(&slots[j - 1]) == hash {
                j -= 1;
            }
            while j < slots.len() && hash_of(&slots[j]) == hash {
                if is_match(&slots[j]) {
                    return Some(j);
                }
                j += 1;
            }
            return None;
        } else if h < hash {
            down = i as isize + 1;
        } else {
            up = i as isize - 1;
        }
    }
    None
}

#[cfg(test)]
mod tests {
    use super::*;

    fn live(key: &str, hash: Hash32) -> PairSlot {
        PairSlot::Live(KeyVal {
            key: key.to_string(),
            val: String::new(),
            hash,
        })
    }

    #[test]
    fn cluster_scan_resolves_forced_collisions() {
        // Hand-built hash-sorted array with a three-way collision on 42.
        let slots = vec![
            PairSlot::Tombstone, // hash 0
            live("a", 7),
            live("x", 42),
            live("y", 42),
            live("z", 42),
            live("b", 90),
        ];
        for key in ["x", "y", "z"] {
            let i = lookup_slot(&slots, true, 42, PairSlot::hash, |s| s.key() == Some(key));
            assert_eq!(slots[i.expect("must be found")].key(), Some(key));
        }
        // same hash, unknown key: cluster exhausted -> miss
        let miss = lookup_slot(&slots, true, 42, PairSlot::hash, |s| s.key() == Some("q"));
        assert!(miss.is_none());
        // plain hits on both sides of the cluster
        for (key, h) in [("a", 7u32), ("b", 90u32)] {
            let i = lookup_slot(&slots, true, h, PairSlot::hash, |s| s.key() == Some(key));
            assert!(i.is_some());
        }
    }

    #[test]
    fn tombstone_never_matches() {
        let mut sect = Section::with_capacity("s", 0);
        sect.set("k", Some("v")).unwrap();
        sect.set("k", None).unwrap();
        assert!(sect.find("k").is_none());
        assert_eq!(sect.count(), 1);
        assert_eq!(sect.live_count(), 0);
    }

    #[test]
    fn reinsert_after_delete_appends_fresh_slot() {
        let mut sect = Section::with_capacity("s", 0);
        sect.set("k", Some("1")).unwrap();
        sect.set("k", None).unwrap();
        sect.set("k", Some("2")).unwrap();
        assert_eq!(sect.count(), 2, "tombstone slot is not reused");
        assert_eq!(sect.find("k").map(|kv| kv.val.as_str()), Some("2"));
    }
}
