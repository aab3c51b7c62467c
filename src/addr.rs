//! Address parsing for the external `"section:key"` / `"key"` format.
//!
//! The split on the first `:` happens exactly once, at the API boundary;
//! storage code below this layer only ever sees a resolved section plus a
//! bare key.

use anyhow::{anyhow, Result};

/// A decoded dictionary address.
///
/// `section == None` targets the unnamed (global) section. A bare address
/// is ambiguous on delete (whole section vs global key); that special case
/// is resolved by the dictionary layer, not here.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Address<'a> {
    pub section: Option<&'a str>,
    pub key: &'a str,
}

impl<'a> Address<'a> {
    /// Split an address on the first `:`. No validation beyond the split;
    /// lookups are allowed to probe malformed addresses (they just miss).
    pub fn parse(addr: &'a str) -> Self {
        match addr.split_once(':') {
            Some((section, key)) => Address {
                section: Some(section),
                key,
            },
            None => Address {
                section: None,
                key: addr,
            },
        }
    }

    /// Parse for a mutation. Empty keys and empty section names cannot be
    /// stored (an empty key is indistinguishable from a tombstone), so
    /// they are caller contract violations here.
    pub fn parse_strict(addr: &'a str) -> Result<Self> {
        let a = Self::parse(addr);
        if a.key.is_empty() {
            return Err(anyhow!("invalid address {:?}: empty key", addr));
        }
        if let Some(s) = a.section {
            if s.is_empty() {
                return Err(anyhow!("invalid address {:?}: empty section name", addr));
            }
        }
        Ok(a)
    }
}
