/// Fast 3-value hash with xorshift
#[inline(always)]
pub fn hash3(a: u64, b: u64, c: u64) -> u64 {
    let mut seed = a
        .wrapping_mul(2654435761)
        .wrapping_add(b.wrapping_mul(2246822519))
        .wrapping_add(c);
    seed ^= seed << 13;
    seed ^= seed >> 7;
    seed ^= seed << 17;
    seed
}

/// Deterministic uniform value in [0, 1) using splitmix64
#[inline(always)]
pub fn unit(seed: u64) -> f64 {
    let mut x = seed.wrapping_mul(0x9e3779b97f4a7c15);
    x ^= x >> 30;
    x = x.wrapping_mul(0xbf58476d1ce4e5b9);
    x ^= x >> 27;
    x = x.wrapping_mul(0x94d049bb133111eb);
    x ^= x >> 31;
    (x >> 11) as f64 / 9007199254740992.0
}

/// Tiny nonzero-ish offset used to separate coincident nodes
#[inline(always)]
pub fn jiggle(seed: u64) -> f64 {
    (unit(seed) - 0.5) * 1e-6
}
