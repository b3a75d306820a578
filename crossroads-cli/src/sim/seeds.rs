use anyhow::{Result, bail};

/// Resolve CLI seed tokens into numeric seeds. Negative integers map to
/// their absolute value; duplicates are dropped. `all` expands to
/// `1..=iterations`.
pub fn resolve_seed_inputs(tokens: &[String], iterations: usize) -> Result<Vec<u64>> {
    let mut seeds: Vec<u64> = Vec::new();
    let mut request_all = false;
    for token in tokens {
        if token.eq_ignore_ascii_case("all") {
            request_all = true;
            continue;
        }
        let seed = if let Ok(value) = token.parse::<u64>() {
            value
        } else if let Ok(value) = token.parse::<i64>() {
            value.unsigned_abs()
        } else {
            bail!("Unrecognized seed token: {token}");
        };
        if !seeds.contains(&seed) {
            seeds.push(seed);
        }
    }
    if request_all {
        let upper = u64::try_from(iterations).unwrap_or(u64::MAX);
        for seed in 1..=upper {
            if !seeds.contains(&seed) {
                seeds.push(seed);
            }
        }
    }
    if seeds.is_empty() {
        bail!("No seeds provided");
    }
    Ok(seeds)
}
