use std::collections::HashMap;

use anyhow::Result;
use oorandom::Rand64;

use inidict::Dictionary;

const SECTIONS: usize = 8;
const KEYS: usize = 12;
const GLOBALS: usize = 16;

fn universe() -> Vec<String> {
    let mut addrs = Vec::new();
    for s in 0..SECTIONS {
        for k in 0..KEYS {
            addrs.push(format!("s{s}:k{k}"));
        }
    }
    for g in 0..GLOBALS {
        addrs.push(format!("g{g}"));
    }
    addrs
}

fn verify(d: &Dictionary, model: &HashMap<String, String>, addrs: &[String], step: usize) {
    for addr in addrs {
        let got = d.get_or(addr, "<miss>");
        let want = model.get(addr).map(String::as_str).unwrap_or("<miss>");
        assert_eq!(got, want, "divergence at step {step}, address {addr}");
    }
}

#[test]
fn churn_against_model() -> Result<()> {
    let _ = env_logger::builder().is_test(true).try_init();

    let mut d = Dictionary::new();
    // model of the true state: live address -> value
    let mut model: HashMap<String, String> = HashMap::new();
    let addrs = universe();

    let mut rng = Rand64::new(0xA1B2_C3D4_E5F6_7788);
    let total_ops = 20_000usize;

    for step in 0..total_ops {
        let r = rng.rand_u64() % 100;
        if r < 55 {
            // insert/overwrite a random address
            let addr = &addrs[(rng.rand_u64() as usize) % addrs.len()];
            let val = format!("v{}", rng.rand_u64() % 100_000);
            d.set(addr, Some(&val))?;
            model.insert(addr.clone(), val);
        } else if r < 78 {
            // delete a random single key
            let addr = &addrs[(rng.rand_u64() as usize) % addrs.len()];
            d.remove(addr)?;
            model.remove(addr);
        } else if r < 84 {
            // delete a whole section
            let s = (rng.rand_u64() as usize) % SECTIONS;
            d.remove(&format!("s{s}"))?;
            let prefix = format!("s{s}:");
            model.retain(|k, _| !k.starts_with(&prefix));
        } else if r < 94 {
            d.sort_by_hash();
        } else {
            d.sort_by_name();
        }

        if step % 2_000 == 0 {
            verify(&d, &model, &addrs, step);
        }
    }

    verify(&d, &model, &addrs, total_ops);

    // a non-empty survivor must still dump cleanly
    if !model.is_empty() {
        let text = d.dump_to_string()?;
        assert!(!text.is_empty());
    }
    Ok(())
}
