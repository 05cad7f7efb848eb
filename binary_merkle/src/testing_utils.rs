use rand::{rngs::StdRng, Rng, RngCore, SeedableRng};

pub(crate) fn common_setup() {
    // Try init since multiple tests calling `init` will cause an error.
    let _ = pretty_env_logger::try_init();
}

/// Generates `n` random leaf payloads of varying (non-empty) lengths,
/// deterministically from `seed`.
pub(crate) fn generate_n_random_leaves(n: usize, seed: u64) -> Vec<Vec<u8>> {
    let mut rng = StdRng::seed_from_u64(seed);

    (0..n)
        .map(|_| {
            let len = rng.gen_range(1..64);
            let mut buf = vec![0u8; len];
            rng.fill_bytes(&mut buf);
            buf
        })
        .collect()
}
