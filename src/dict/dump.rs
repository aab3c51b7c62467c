//! dict/dump - render the dictionary back to INI-shaped text.
//!
//! Unnamed-section pairs come first (no header), then every live named
//! section as a blank line, `[name]`, and its pairs. Tombstoned pairs and
//! tombstoned sections are skipped. The 30-column key padding is cosmetic
//! and not load-bearing for the round-trip format.

use std::io::Write;

use anyhow::{anyhow, Context, Result};

use super::core::Dictionary;
use crate::section::Section;

impl Dictionary {
    /// Write all live entries to `out`. Fails when the dictionary is
    /// logically empty (no live sections and no live unnamed pairs) or
    /// when the sink reports a write error.
    pub fn dump(&self, out: &mut dyn Write) -> Result<()> {
        if self.is_empty() {
            return Err(anyhow!("dump: dictionary is empty"));
        }
        dump_pairs(&self.unnamed, out)?;
        for sect in self.sections() {
            writeln!(out, "\n[{}]", sect.name)
                .with_context(|| format!("dump: write header of [{}]", sect.name))?;
            dump_pairs(sect, out)?;
        }
        Ok(())
    }

    /// Convenience: dump into an owned String.
    pub fn dump_to_string(&self) -> Result<String> {
        let mut buf: Vec<u8> = Vec::new();
        self.dump(&mut buf)?;
        // keys/values are String data, so the buffer is valid UTF-8
        String::from_utf8(buf).context("dump: non-utf8 output")
    }
}

fn dump_pairs(sect: &Section, out: &mut dyn Write) -> Result<()> {
    for kv in sect.live_pairs() {
        writeln!(out, "{:<30} = {}", kv.key, kv.val)
            .with_context(|| format!("dump: write key {:?}", kv.key))?;
    }
    Ok(())
}
