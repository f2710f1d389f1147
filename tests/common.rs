//! Common test utilities for the statematrix test suite.

use rand::{Rng, SeedableRng, rngs::StdRng};
use statematrix::{Descriptor, TableStore};

/// Fill every cell of a table with seeded random values in `[-10, 10)`.
///
/// Returns the values written, row-major.
pub fn fill_random(store: &mut TableStore, descriptor: Descriptor, seed: u64) -> Vec<f32> {
    let mut rng = StdRng::seed_from_u64(seed);
    let num_states = store.num_states(descriptor).unwrap();
    let num_actions = store.num_actions(descriptor).unwrap();

    let mut written = Vec::new();
    for state in 0..num_states {
        for action in 0..num_actions {
            let value: f32 = rng.random_range(-10.0..10.0);
            store.set_q(descriptor, state, action, value).unwrap();
            written.push(value);
        }
    }
    written
}
