use anyhow::Result;

use inidict::Dictionary;

#[test]
fn delete_then_readd_key() -> Result<()> {
    let mut d = Dictionary::new();
    d.set("s:k", Some("1"))?;
    d.remove("s:k")?;
    assert_eq!(d.get_or("s:k", "def"), "def");

    // re-adding appends a fresh slot (tombstones are never reused)
    d.set("s:k", Some("2"))?;
    assert_eq!(d.get("s:k"), Some("2"));
    let sect = d.section("s").expect("section s must exist");
    assert_eq!(sect.count(), 2, "count includes the tombstone");
    assert_eq!(sect.live_count(), 1);
    Ok(())
}

#[test]
fn delete_absent_is_noop_ok() -> Result<()> {
    let mut d = Dictionary::new();
    d.remove("never")?;
    d.remove("no:such")?;
    d.set("s:k", Some("v"))?;
    d.remove("s:other")?;
    assert_eq!(d.get("s:k"), Some("v"));
    Ok(())
}

#[test]
fn section_delete_cascades() -> Result<()> {
    let mut d = Dictionary::new();
    for (k, v) in [("sect:a", "1"), ("sect:b", "2"), ("sect:c", "3")] {
        d.set(k, Some(v))?;
    }
    d.set("keep:x", Some("y"))?;

    d.remove("sect")?;
    for k in ["sect:a", "sect:b", "sect:c"] {
        assert_eq!(d.get_or(k, "def"), "def", "key {k} must be gone");
    }
    // the slot stays counted, the neighbour section is untouched
    assert_eq!(d.section_count(), 2);
    assert_eq!(d.live_section_count(), 1);
    assert_eq!(d.get("keep:x"), Some("y"));
    Ok(())
}

#[test]
fn section_recreated_after_delete() -> Result<()> {
    let mut d = Dictionary::new();
    d.set("sect:a", Some("1"))?;
    d.remove("sect")?;
    d.set("sect:b", Some("2"))?;

    // the old content did not come back with the new section
    assert_eq!(d.get_or("sect:a", "def"), "def");
    assert_eq!(d.get("sect:b"), Some("2"));
    assert_eq!(d.section_count(), 2, "fresh slot, tombstone still counted");
    Ok(())
}

#[test]
fn bare_delete_prefers_section_over_global_key() -> Result<()> {
    let mut d = Dictionary::new();
    d.set("name", Some("global"))?;
    d.set("name:k", Some("sectioned"))?;

    // a live section called "name" exists -> the section dies, the
    // global key survives
    d.remove("name")?;
    assert_eq!(d.get_or("name:k", "def"), "def");
    assert_eq!(d.get("name"), Some("global"));

    // no such section anymore -> now the global key dies
    d.remove("name")?;
    assert_eq!(d.get_or("name", "def"), "def");
    Ok(())
}

#[test]
fn unnamed_section_survives_global_deletes() -> Result<()> {
    let mut d = Dictionary::new();
    d.set("g1", Some("1"))?;
    d.set("g2", Some("2"))?;
    d.remove("g1")?;
    d.remove("g2")?;
    assert_eq!(d.unnamed().live_count(), 0);
    assert_eq!(d.unnamed().count(), 2, "tombstones keep their slots");
    // still usable afterwards
    d.set("g3", Some("3"))?;
    assert_eq!(d.get("g3"), Some("3"));
    Ok(())
}
