//! Lightweight global metrics for inidict.
//!
//! Atomic counters for the subsystems worth watching in production:
//! - section lookup cache (hits/misses)
//! - key lookups (binary-search vs linear path)
//! - growth events (section array / pair arrays)
//! - tombstones written by deletions

use std::sync::atomic::{AtomicU64, Ordering};

// ----- Section lookup cache -----
static SECT_CACHE_HITS: AtomicU64 = AtomicU64::new(0);
static SECT_CACHE_MISSES: AtomicU64 = AtomicU64::new(0);

// ----- Key lookups -----
static KEY_LOOKUPS_BSEARCH: AtomicU64 = AtomicU64::new(0);
static KEY_LOOKUPS_LINEAR: AtomicU64 = AtomicU64::new(0);

// ----- Growth -----
static SECTION_GROWS: AtomicU64 = AtomicU64::new(0);
static PAIR_GROWS: AtomicU64 = AtomicU64::new(0);

// ----- Deletions -----
static TOMBSTONES_WRITTEN: AtomicU64 = AtomicU64::new(0);

#[derive(Debug, Clone, Default)]
pub struct MetricsSnapshot {
    pub sect_cache_hits: u64,
    pub sect_cache_misses: u64,

    pub key_lookups_bsearch: u64,
    pub key_lookups_linear: u64,

    pub section_grows: u64,
    pub pair_grows: u64,

    pub tombstones_written: u64,
}

impl MetricsSnapshot {
    pub fn cache_hit_ratio(&self) -> f64 {
        let total = self.sect_cache_hits + self.sect_cache_misses;
        if total == 0 {
            0.0
        } else {
            self.sect_cache_hits as f64 / total as f64
        }
    }
}

// ----- Recorders (cache) -----
pub fn record_sect_cache_hit() {
    SECT_CACHE_HITS.fetch_add(1, Ordering::Relaxed);
}
pub fn record_sect_cache_miss() {
    SECT_CACHE_MISSES.fetch_add(1, Ordering::Relaxed);
}

// ----- Recorders (lookups) -----
pub fn record_key_lookup_bsearch() {
    KEY_LOOKUPS_BSEARCH.fetch_add(1, Ordering::Relaxed);
}
pub fn record_key_lookup_linear() {
    KEY_LOOKUPS_LINEAR.fetch_add(1, Ordering::Relaxed);
}

// ----- Recorders (growth) -----
pub fn record_section_grow() {
    SECTION_GROWS.fetch_add(1, Ordering::Relaxed);
}
pub fn record_pair_grow() {
    PAIR_GROWS.fetch_add(1, Ordering::Relaxed);
}

// ----- Recorders (deletions) -----
pub fn record_tombstone() {
    TOMBSTONES_WRITTEN.fetch_add(1, Ordering::Relaxed);
}

// ----- Snapshot / Reset -----
pub fn snapshot() -> MetricsSnapshot {
    MetricsSnapshot {
        sect_cache_hits: SECT_CACHE_HITS.load(Ordering::Relaxed),
        sect_cache_misses: SECT_CACHE_MISSES.load(Ordering::Relaxed),

        key_lookups_bsearch: KEY_LOOKUPS_BSEARCH.load(Ordering::Relaxed),
        key_lookups_linear: KEY_LOOKUPS_LINEAR.load(Ordering::Relaxed),

        section_grows: SECTION_GROWS.load(Ordering::Relaxed),
        pair_grows: PAIR_GROWS.load(Ordering::Relaxed),

        tombstones_written: TOMBSTONES_WRITTEN.load(Ordering::Relaxed),
    }
}

pub fn reset() {
    SECT_CACHE_HITS.store(0, Ordering::Relaxed);
    SECT_CACHE_MISSES.store(0, Ordering::Relaxed);

    KEY_LOOKUPS_BSEARCH.store(0, Ordering::Relaxed);
    KEY_LOOKUPS_LINEAR.store(0, Ordering::Relaxed);

    SECTION_GROWS.store(0, Ordering::Relaxed);
    PAIR_GROWS.store(0, Ordering::Relaxed);

    TOMBSTONES_WRITTEN.store(0, Ordering::Relaxed);
}
