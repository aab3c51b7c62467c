//! dict/kv - address-level operations: get/get_or/set/remove.
//!
//! The address format is the external `"section:key"` / `"key"` contract.
//! Lookups resolve the section (cache-assisted) and delegate to the
//! section's pair search; mutation resolves or creates the section, with
//! one special case: a bare address deleted with `remove` drops the whole
//! named section of that name when one exists.

use anyhow::{anyhow, Result};

use super::core::Dictionary;
use crate::addr::Address;

// ----------------- public ops -----------------

impl Dictionary {
    /// Look up one address. Returns the live value, borrowed from the
    /// dictionary, or None when the section or key does not exist.
    /// Malformed addresses simply miss.
    pub fn get(&self, addr: &str) -> Option<&str> {
        let a = Address::parse(addr);
        let sect = match a.section {
            Some(name) => {
                let index = self.find_section_idx(name)?;
                self.sections[index].live()?
            }
            None => &self.unnamed,
        };
        sect.find(a.key).map(|kv| kv.val.as_str())
    }

    /// Look up one address, falling back to `def` on any miss. Misses are
    /// expected and never escalate to errors.
    pub fn get_or<'a>(&'a self, addr: &str, def: &'a str) -> &'a str {
        self.get(addr).unwrap_or(def)
    }

    /// Insert, replace or delete one address.
    ///
    /// `Some(val)`: store `val` under the address, creating the named
    /// section first when needed (global addresses never create one).
    ///
    /// `None`: delete. A bare address deletes the whole named section of
    /// that name when one exists, otherwise the global key. Deleting
    /// something that does not exist is an Ok no-op.
    ///
    /// Empty keys/section names are caller contract violations; growth
    /// allocation failure aborts with all prior state intact.
    pub fn set(&mut self, addr: &str, val: Option<&str>) -> Result<()> {
        let a = Address::parse_strict(addr)?;
        match a.section {
            None => {
                if val.is_none() {
                    // bare name + absent value: whole-section delete wins
                    // when a live section carries this name
                    if let Some(index) = self.find_section_idx(a.key) {
                        self.delete_section(index);
                        return Ok(());
                    }
                }
                self.unnamed.set(a.key, val)
            }
            Some(name) => {
                let index = match self.find_section_idx(name) {
                    Some(i) => i,
                    None => {
                        if val.is_none() {
                            // deleting inside a section that never existed
                            return Ok(());
                        }
                        self.create_section(name)?
                    }
                };
                self.section_at_mut(index)
                    .ok_or_else(|| anyhow!("section slot {} is tombstoned", index))?
                    .set(a.key, val)
            }
        }
    }

    /// Delete one address (key, or whole section for a bare name).
    /// Shorthand for `set(addr, None)`.
    pub fn remove(&mut self, addr: &str) -> Result<()> {
        self.set(addr, None)
    }
}
