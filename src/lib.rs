//! inidict - in-memory section/key dictionary for configuration data.
//!
//! Named sections of unique key/value string pairs plus one unnamed
//! (global) section, addressed externally as `"section:key"` or bare
//! `"key"`. Deletion is soft (tombstoned slots, never compacted), growth
//! is fixed-increment, and two sort orders are supported: by hash (fast
//! binary-search lookup) and by name (stable textual dump).

// Base modules
pub mod addr;
pub mod config;
pub mod hash;
pub mod metrics;
pub mod section;

// Dictionary layer (folder with mod.rs)
pub mod dict; // src/dict/{mod,core,kv,dump,sort}.rs

// Convenience re-exports
pub use addr::Address;
pub use config::{DictBuilder, DictConfig};
pub use dict::Dictionary;
pub use hash::{hash32, Hash32};
pub use section::{KeyVal, Section, SortOrder};
