/*!
# closest_con
This library provides solvers for the Closest String Problem: given k equal-length strings over a finite alphabet, find a string that minimizes the maximum Hamming distance to all of them.

Key benefits:
* A greedy weighted-frequency consensus heuristic that is fast and usually hits the bound, with caller-controlled retries
* An exact fixed-parameter branching search whose cost depends on the bound, not the string length
* All randomness is injected, so any run (including a failing one) can be replayed from its seed

Performance notes:
* The greedy solver runs L iterations; incremental distance tracking keeps each one O(k)
* The branching search explores at most (d+1)^d nodes per starting candidate, so it is practical for small d

# Example usage
```rust
use closest_con::branching_search::solve_exact;
use closest_con::greedy_consensus::GreedyConsensus;
use closest_con::input_set::{Alphabet, InputSet};
use rand::SeedableRng;

let sequences = [
    b"ACGTACGT".to_vec(),
    b"ACGTTCGT".to_vec(),
    b"ACCTACGT".to_vec()
];
let input_set = InputSet::from_sequences(Alphabet::new(b"ACGT").unwrap(), &sequences).unwrap();
let mut rng = rand::rngs::StdRng::seed_from_u64(0);

// heuristic answer, which the caller should verify
let solver: GreedyConsensus = Default::default();
let closest = solver.solve(&input_set, 1, &mut rng).unwrap().unwrap();
assert!(closest.satisfies(1));

// certified answer reachable from the second input
let search = solve_exact(&input_set, 1, input_set.sequence(1), 1, &mut rng).unwrap();
assert!(search.closest().unwrap().satisfies(1));
```
*/

/// Exact fixed-parameter branching search
pub mod branching_search;
/// Configuration for the solvers and the retry harness
pub mod csp_config;
/// Ranked distances from inputs to a partial answer
pub mod distance_list;
/// Utility for generating planted examples
pub mod example_gen;
/// Per-position symbol counts and the candidate scoreboard
pub mod frequency_model;
/// Main functionality for the greedy consensus heuristic
pub mod greedy_consensus;
/// Alphabet and validated input sets
pub mod input_set;
/// Caller-side retry policy with reshuffled input order
pub mod retry;
/// Hamming distance utilities
pub mod string_metrics;
