//! dict/sort - whole-dictionary sort orchestration.
//!
//! Two orders with different guarantees:
//! - by hash: every section's pairs, then the section array itself, sort
//!   by hash; enables binary search at both levels.
//! - by name: same recursion by names, for a deterministic textual dump;
//!   binary search stays disabled (name order is not hash order) and
//!   lookups keep scanning linearly until the next sort_by_hash.
//!
//! Both sorts reorder slots, so the section lookup cache is invalidated.

use log::debug;

use super::core::{Dictionary, SectionSlot};
use crate::section::SortOrder;

impl Dictionary {
    /// Sort everything by hash and enable binary search on both section
    /// and key lookup. Tombstones (hash 0) gather at the front of each
    /// array; readers skip them.
    pub fn sort_by_hash(&mut self) {
        self.unnamed.sort_by_hash();
        for slot in &mut self.sections {
            if let SectionSlot::Live(s) = slot {
                s.sort_by_hash();
            }
        }
        self.sections.sort_by_key(SectionSlot::hash);
        self.order = SortOrder::ByHash;
        self.invalidate_cache();
        debug!(
            "sorted by hash: {} section slots, unnamed count {}",
            self.sections.len(),
            self.unnamed.count()
        );
    }

    /// Sort everything by name, for stable dumps. Leaves the dictionary
    /// in ByName order: retrievable as before, but via linear scans.
    pub fn sort_by_name(&mut self) {
        self.unnamed.sort_by_name();
        for slot in &mut self.sections {
            if let SectionSlot::Live(s) = slot {
                s.sort_by_name();
            }
        }
        self.sections.sort_by(|a, b| a.name().cmp(&b.name()));
        self.order = SortOrder::ByName;
        self.invalidate_cache();
        debug!(
            "sorted by name: {} section slots, unnamed count {}",
            self.sections.len(),
            self.unnamed.count()
        );
    }
}
