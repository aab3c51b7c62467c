//! dict - the dictionary layer on top of section storage.
//!
//! Split by submodule:
//! - core.rs - Dictionary struct, construction, named-section resolution
//!   (with the per-dictionary lookup cache), section create/delete, growth
//! - kv.rs   - address-level get/get_or/set/remove
//! - dump.rs - textual `[section]` / `key = value` rendering
//! - sort.rs - whole-dictionary sort orchestration (by hash / by name)

pub mod core;
pub mod dump;
pub mod kv;
pub mod sort;

pub use self::core::Dictionary;
