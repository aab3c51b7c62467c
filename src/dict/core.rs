//! dict/core - the Dictionary struct and section-level bookkeeping.
//!
//! What's inside:
//! - SectionSlot - a live named section or the tombstone left by a
//!   whole-section delete. Slots are never compacted, so indices of other
//!   live sections stay valid until a sort reorders the array.
//! - The single-slot lookup cache. One cache per dictionary (not shared
//!   process state): a hit is re-validated against the live slot before
//!   use, and the slot is invalidated on section create/delete and on
//!   sorts. Cell keeps the dictionary !Sync: callers wanting to share
//!   one dictionary need an external lock.
//! - Section creation and deletion, with fixed-increment growth of the
//!   section array (allocation failure leaves everything untouched).

use std::cell::Cell;

use anyhow::{Context, Result};
use log::debug;

use crate::config::{DictBuilder, DictConfig};
use crate::hash::{hash32, Hash32};
use crate::metrics::{
    record_sect_cache_hit, record_sect_cache_miss, record_section_grow, record_tombstone,
};
use crate::section::{lookup_slot, Section, SortOrder};

/// Number of section slots added per growth step.
pub const SECTION_GROW: usize = 5;

/// A slot in the named-section array.
#[derive(Debug, Clone)]
pub(crate) enum SectionSlot {
    Live(Section),
    Tombstone,
}

impl SectionSlot {
    /// Hash used for ordering/searching; tombstones sort as 0.
    #[inline]
    pub(crate) fn hash(&self) -> Hash32 {
        match self {
            SectionSlot::Live(s) => s.hash,
            SectionSlot::Tombstone => 0,
        }
    }

    #[inline]
    pub(crate) fn name(&self) -> Option<&str> {
        match self {
            SectionSlot::Live(s) => Some(s.name.as_str()),
            SectionSlot::Tombstone => None,
        }
    }

    #[inline]
    pub(crate) fn live(&self) -> Option<&Section> {
        match self {
            SectionSlot::Live(s) => Some(s),
            SectionSlot::Tombstone => None,
        }
    }

    #[inline]
    pub(crate) fn live_mut(&mut self) -> Option<&mut Section> {
        match self {
            SectionSlot::Live(s) => Some(s),
            SectionSlot::Tombstone => None,
        }
    }
}

/// Remembered (hash, slot index) of the last section resolved.
#[derive(Debug, Clone, Copy)]
struct SectCache {
    hash: Hash32,
    index: usize,
}

/// In-memory store of named sections plus one always-present unnamed
/// (global) section. Single-threaded by construction.
#[derive(Debug)]
pub struct Dictionary {
    pub(crate) unnamed: Section,
    pub(crate) sections: Vec<SectionSlot>,
    pub(crate) order: SortOrder,
    cache: Cell<Option<SectCache>>,
    pub(crate) cfg: DictConfig,
}

impl Default for Dictionary {
    fn default() -> Self {
        Self::new()
    }
}

impl Dictionary {
    /// Empty dictionary with default capacities.
    pub fn new() -> Self {
        Self::with_config(DictConfig::default())
    }

    /// Empty dictionary sized for roughly `sections` named sections.
    /// Pass 0 if the count is unknown.
    pub fn with_capacity(sections: usize) -> Self {
        let cfg = DictConfig::default();
        let cap = sections.max(cfg.section_capacity);
        Self::with_config(cfg.with_section_capacity(cap))
    }

    /// Empty dictionary with explicit tunables.
    pub fn with_config(cfg: DictConfig) -> Self {
        Dictionary {
            unnamed: Section::with_capacity("", cfg.pair_capacity),
            sections: Vec::with_capacity(cfg.section_capacity.max(SECTION_GROW)),
            order: SortOrder::Unordered,
            cache: Cell::new(None),
            cfg,
        }
    }

    /// Builder over DictConfig (env defaults + overrides).
    pub fn builder() -> DictBuilder {
        DictBuilder::new()
    }

    // ----- inspection -----

    /// The unnamed (global) section. Always present, never deletable.
    #[inline]
    pub fn unnamed(&self) -> &Section {
        &self.unnamed
    }

    /// Slot count of the named-section array, tombstones included.
    #[inline]
    pub fn section_count(&self) -> usize {
        self.sections.len()
    }

    /// Number of live named sections.
    pub fn live_section_count(&self) -> usize {
        self.sections.iter().filter(|s| s.live().is_some()).count()
    }

    /// True when there is nothing live to look up or dump.
    pub fn is_empty(&self) -> bool {
        self.live_section_count() == 0 && self.unnamed.live_count() == 0
    }

    #[inline]
    pub fn order(&self) -> SortOrder {
        self.order
    }

    /// Live named sections in slot order.
    pub fn sections(&self) -> impl Iterator<Item = &Section> {
        self.sections.iter().filter_map(SectionSlot::live)
    }

    /// Look up a live named section.
    pub fn section(&self, name: &str) -> Option<&Section> {
        self.find_section_idx(name)
            .and_then(|i| self.sections[i].live())
    }

    // ----- section resolution (cache + search) -----

    /// Resolve a section name to its live slot index. Consults the cache
    /// first; a cache hit is only trusted after the slot re-validates
    /// (live, same hash, same name), so a stale slot costs a re-search
    /// and can never return the wrong section.
    pub(crate) fn find_section_idx(&self, name: &str) -> Option<usize> {
        let hash = hash32(name);
        if self.cfg.cache_enabled {
            if let Some(c) = self.cache.get() {
                if c.hash == hash {
                    if let Some(s) = self.sections.get(c.index).and_then(SectionSlot::live) {
                        if s.hash == hash && s.name == name {
                            record_sect_cache_hit();
                            return Some(c.index);
                        }
                    }
                }
            }
            record_sect_cache_miss();
        }

        let found = lookup_slot(
            &self.sections,
            self.order == SortOrder::ByHash,
            hash,
            SectionSlot::hash,
            |s| s.name() == Some(name),
        );
        if let Some(index) = found {
            debug!("section {:?} resolved at slot {}", name, index);
            self.remember(hash, index);
        }
        found
    }

    #[inline]
    pub(crate) fn section_at_mut(&mut self, index: usize) -> Option<&mut Section> {
        self.sections.get_mut(index).and_then(SectionSlot::live_mut)
    }

    #[inline]
    fn remember(&self, hash: Hash32, index: usize) {
        if self.cfg.cache_enabled {
            self.cache.set(Some(SectCache { hash, index }));
        }
    }

    #[inline]
    pub(crate) fn invalidate_cache(&self) {
        self.cache.set(None);
    }

    // ----- structural mutation -----

    /// Append a new named section, growing the slot array first if full.
    /// On allocation failure nothing has been modified. Returns the new
    /// slot index; the fresh section always has room for its first pair.
    pub(crate) fn create_section(&mut self, name: &str) -> Result<usize> {
        if self.sections.len() == self.sections.capacity() {
            self.sections
                .try_reserve_exact(SECTION_GROW)
                .context("grow section array")?;
            record_section_grow();
        }
        let sect = Section::with_capacity(name, self.cfg.pair_capacity);
        debug!("new section [{}] hash {}", name, sect.hash);
        let index = self.sections.len();
        let hash = sect.hash;
        self.sections.push(SectionSlot::Live(sect));
        // a fresh slot breaks any prior order of the array
        self.order = SortOrder::Unordered;
        self.remember(hash, index);
        Ok(index)
    }

    /// Tombstone a whole section in place. Its pairs are dropped, the
    /// slot stays counted, and the cache slot is invalidated.
    pub(crate) fn delete_section(&mut self, index: usize) {
        if let Some(slot) = self.sections.get_mut(index) {
            if let SectionSlot::Live(s) = slot {
                debug!(
                    "tombstone whole section [{}] ({} pair slots dropped)",
                    s.name,
                    s.count()
                );
                *slot = SectionSlot::Tombstone;
                record_tombstone();
                self.order = SortOrder::Unordered;
                self.invalidate_cache();
            }
        }
    }
}
