//! Centralized configuration and builder for inidict.
//!
//! Goals:
//! - Single place to collect tunables instead of scattering env lookups.
//! - DictConfig::from_env() reads the same env vars every deployment has
//!   used so far; the builder overrides individual fields on top.
//!
//! Defaults match the capacities the store has always allocated:
//! - section_capacity = 5 (initial named-section slots)
//! - pair_capacity = 10 (initial pair slots per section)
//! - cache_enabled = true (single-slot section lookup cache)

use std::fmt;

/// Tunables for one dictionary instance.
#[derive(Clone, Debug)]
pub struct DictConfig {
    /// Initial capacity of the named-section array (slots).
    /// Env: INIDICT_SECTION_CAPACITY (default 5)
    pub section_capacity: usize,

    /// Initial capacity of each section's pair array (slots).
    /// Env: INIDICT_PAIR_CAPACITY (default 10)
    pub pair_capacity: usize,

    /// Whether the per-dictionary section lookup cache is consulted.
    /// Env: INIDICT_SECTION_CACHE (default true; "0|false|off|no" => false)
    pub cache_enabled: bool,
}

impl Default for DictConfig {
    fn default() -> Self {
        Self {
            section_capacity: 5,
            pair_capacity: 10,
            cache_enabled: true,
        }
    }
}

impl DictConfig {
    /// Load configuration from environment variables.
    pub fn from_env() -> Self {
        let mut cfg = Self::default();

        if let Ok(v) = std::env::var("INIDICT_SECTION_CAPACITY") {
            if let Ok(n) = v.trim().parse::<usize>() {
                cfg.section_capacity = n;
            }
        }

        if let Ok(v) = std::env::var("INIDICT_PAIR_CAPACITY") {
            if let Ok(n) = v.trim().parse::<usize>() {
                cfg.pair_capacity = n;
            }
        }

        if let Ok(v) = std::env::var("INIDICT_SECTION_CACHE") {
            let s = v.trim().to_ascii_lowercase();
            cfg.cache_enabled = !(s == "0" || s == "false" || s == "off" || s == "no");
        }

        cfg
    }

    /// Fluent setters (builder-style) to override specific fields.

    pub fn with_section_capacity(mut self, slots: usize) -> Self {
        self.section_capacity = slots;
        self
    }

    pub fn with_pair_capacity(mut self, slots: usize) -> Self {
        self.pair_capacity = slots;
        self
    }

    pub fn with_cache_enabled(mut self, on: bool) -> Self {
        self.cache_enabled = on;
        self
    }
}

impl fmt::Display for DictConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "DictConfig {{ section_capacity: {}, pair_capacity: {}, cache_enabled: {} }}",
            self.section_capacity, self.pair_capacity, self.cache_enabled,
        )
    }
}

/// Lightweight builder that produces a DictConfig.
/// The dictionary exposes `Dictionary::builder()` returning this.
#[derive(Clone, Debug)]
pub struct DictBuilder {
    cfg: DictConfig,
}

impl Default for DictBuilder {
    fn default() -> Self {
        // Start from env to preserve deployed behavior, then allow overrides.
        Self {
            cfg: DictConfig::from_env(),
        }
    }
}

impl DictBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Start from a clean default (without reading env).
    pub fn from_default() -> Self {
        Self {
            cfg: DictConfig::default(),
        }
    }

    pub fn section_capacity(mut self, slots: usize) -> Self {
        self.cfg.section_capacity = slots;
        self
    }

    pub fn pair_capacity(mut self, slots: usize) -> Self {
        self.cfg.pair_capacity = slots;
        self
    }

    pub fn cache_enabled(mut self, on: bool) -> Self {
        self.cfg.cache_enabled = on;
        self
    }

    /// Finish the builder and obtain the configuration.
    pub fn build(self) -> DictConfig {
        self.cfg
    }
}
