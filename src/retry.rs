/*!
Caller-side retry policy for the greedy solver.
The solver never retries on its own; this module re-runs it on reshuffled input orders until the answer satisfies the bound or the attempt or time budget from `CspConfig` runs out.

# Example usage
```rust
use closest_con::example_gen::generate_planted;
use closest_con::greedy_consensus::GreedyConsensus;
use closest_con::input_set::{Alphabet, InputSet};
use closest_con::retry::solve_with_retries;
use rand::SeedableRng;

let (_answer, dataset) = generate_planted(b"acgt", 10, 10, 4, 0);
let input_set = InputSet::from_sequences(Alphabet::new(b"acgt").unwrap(), &dataset).unwrap();
let solver: GreedyConsensus = Default::default();
let mut rng = rand::rngs::StdRng::seed_from_u64(0);

let outcome = solve_with_retries(&solver, &input_set, 4, &mut rng).unwrap();
assert!(outcome.attempts() >= 1);
if outcome.is_success() {
    assert!(outcome.closest().unwrap().satisfies(4));
}
```
*/

use std::time::Instant;

use log::debug;
use rand::Rng;

use crate::greedy_consensus::{ClosestString, GreedyConsensus};
use crate::input_set::InputSet;

/// Result of a retried greedy run
#[derive(Clone, Debug, PartialEq)]
pub struct RetryOutcome {
    /// The satisfying answer, or the best failing answer seen if none satisfied the bound
    closest: Option<ClosestString>,
    /// True if `closest` satisfies the bound
    success: bool,
    /// Number of solver calls made, including the first
    attempts: usize
}

impl RetryOutcome {
    /// Returns true if the very first attempt already satisfied the bound
    pub fn is_direct_success(&self) -> bool {
        self.success && self.attempts == 1
    }

    // Getters
    pub fn closest(&self) -> Option<&ClosestString> {
        self.closest.as_ref()
    }

    pub fn is_success(&self) -> bool {
        self.success
    }

    pub fn attempts(&self) -> usize {
        self.attempts
    }
}

/// Runs the greedy solver, reshuffling the input order between attempts until the answer satisfies `bound`.
/// The first attempt always uses the provided order.
/// # Arguments
/// * `solver` - the configured greedy solver; its config provides `max_attempts` and `time_budget`
/// * `input_set` - the inputs
/// * `bound` - the target maximum Hamming distance
/// * `rng` - the random source for both the solver and the reshuffles
/// # Errors
/// * if the solver rejects the inputs
pub fn solve_with_retries<R: Rng + ?Sized>(solver: &GreedyConsensus, input_set: &InputSet, bound: usize, rng: &mut R) -> Result<RetryOutcome, Box<dyn std::error::Error>> {
    let config = solver.config();
    let start_time = Instant::now();

    let mut current_order = input_set.clone();
    let mut best: Option<ClosestString> = None;
    let mut attempts = 0;
    while attempts < config.max_attempts {
        if attempts > 0 {
            if let Some(time_budget) = config.time_budget {
                if start_time.elapsed() > time_budget {
                    debug!("Time budget exhausted after {attempts} attempts");
                    break;
                }
            }
            // reshuffles accumulate, each attempt starts from the previous order
            current_order = current_order.shuffled(rng);
        }
        attempts += 1;

        // answers are compared by value, so the input order does not matter for the distances we keep
        let opt_closest = solver.solve(&current_order, bound, rng)?
            .map(|c| rescore(c, input_set));
        if let Some(closest) = opt_closest {
            if closest.satisfies(bound) {
                debug!("Bound {bound} satisfied after {attempts} attempt(s)");
                return Ok(RetryOutcome {
                    closest: Some(closest),
                    success: true,
                    attempts
                });
            }

            let is_better = best.as_ref()
                .map_or(true, |b| closest.max_distance() < b.max_distance());
            if is_better {
                best = Some(closest);
            }
        }
    }

    debug!("Bound {bound} not satisfied after {attempts} attempt(s)");
    Ok(RetryOutcome {
        closest: best,
        success: false,
        attempts
    })
}

/// Recomputes per-input distances in the original input order.
fn rescore(closest: ClosestString, input_set: &InputSet) -> ClosestString {
    let distances = input_set.sequences().iter()
        .map(|s| crate::string_metrics::mismatches(closest.sequence(), s))
        .collect();
    ClosestString::new(closest.sequence().to_vec(), distances)
}

/// Aggregate pass/fail counts over many retried cases; no partial credit is given.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct RetryTally {
    /// Number of cases added
    pub cases: usize,
    /// Cases solved on the first attempt
    pub direct_successes: usize,
    /// Cases that failed the first attempt but were solved by a retry
    pub saved: usize,
    /// Cases that were never solved
    pub failures: usize
}

impl RetryTally {
    /// Adds a single case outcome to the tally
    pub fn add(&mut self, outcome: &RetryOutcome) {
        self.cases += 1;
        if outcome.is_direct_success() {
            self.direct_successes += 1;
        } else if outcome.is_success() {
            self.saved += 1;
        } else {
            self.failures += 1;
        }
    }

    /// Total cases solved, directly or after retries
    pub fn successes(&self) -> usize {
        self.direct_successes + self.saved
    }
}
