/*!
This module provides access to the GreedyConsensus solver (WFC-CSP), which builds a closest string candidate by repeatedly fixing the position/symbol pair that most helps the input that currently fits worst.
The result is a heuristic: it may fail the bound even when a solution exists, so callers must check `satisfies(...)` and retry with a reshuffled input order if needed.

# Example usage
```rust
use closest_con::greedy_consensus::GreedyConsensus;
use closest_con::input_set::{Alphabet, InputSet};
use rand::SeedableRng;

let sequences = [
    b"ACGTACGT".to_vec(),
    b"ACGTTCGT".to_vec(),
    b"ACCTACGT".to_vec()
];
let input_set = InputSet::from_sequences(Alphabet::new(b"ACGT").unwrap(), &sequences).unwrap();

let solver: GreedyConsensus = Default::default();
let mut rng = rand::rngs::StdRng::seed_from_u64(0);
let closest = solver.solve(&input_set, 1, &mut rng).unwrap().unwrap();
assert_eq!(closest.sequence(), b"ACGTACGT");
assert_eq!(closest.distances(), &[0, 1, 1]);
assert!(closest.satisfies(1));
```
*/

use log::{debug, trace};
use rand::seq::SliceRandom;
use rand::Rng;
use rustc_hash::FxHashSet as HashSet;
use simple_error::bail;

use crate::csp_config::{CspConfig, DistanceTracking, TieBreak};
use crate::distance_list::DistanceList;
use crate::frequency_model::{FrequencyTable, ScoreEntry, Scoreboard};
use crate::input_set::InputSet;
use crate::string_metrics::rank_by_partial_distance;

/// Contains a final closest string result
#[derive(Clone, Debug, Default, PartialEq)]
pub struct ClosestString {
    /// The generated closest string
    sequence: Vec<u8>,
    /// Hamming distance from the closest string to each input, in input order
    distances: Vec<usize>
}

impl ClosestString {
    /// Constructor
    pub fn new(sequence: Vec<u8>, distances: Vec<usize>) -> ClosestString {
        ClosestString {
            sequence,
            distances
        }
    }

    /// Returns the largest distance to any input
    pub fn max_distance(&self) -> usize {
        self.distances.iter().cloned().max().unwrap_or(0)
    }

    /// Returns true if every input is within `bound` of this string
    pub fn satisfies(&self, bound: usize) -> bool {
        self.max_distance() <= bound
    }

    // Getters
    pub fn sequence(&self) -> &[u8] {
        &self.sequence
    }

    pub fn distances(&self) -> &[usize] {
        &self.distances
    }
}

/// Core utility that generates a closest string candidate with the weighted-frequency consensus heuristic.
/// The naive and incremental variants are both handled here, selected by `CspConfig::distance_tracking`.
#[derive(Debug, Default)]
pub struct GreedyConsensus {
    /// The config for this solver
    config: CspConfig
}

impl GreedyConsensus {
    /// Creates a new instance of GreedyConsensus.
    /// # Arguments
    /// * `config` - the solver configuration
    /// # Errors
    /// * if `max_attempts` is 0
    pub fn with_config(config: CspConfig) -> Result<GreedyConsensus, Box<dyn std::error::Error>> {
        if config.max_attempts == 0 {
            bail!("max_attempts must be at least 1");
        }
        Ok(GreedyConsensus {
            config
        })
    }

    /// Builds a closest string candidate for the inputs.
    /// Returns `None` only when pruning is enabled and the worst input can no longer reach `bound`.
    /// A returned candidate is not guaranteed to satisfy `bound`.
    /// # Arguments
    /// * `input_set` - the inputs, must be non-empty
    /// * `bound` - the target maximum Hamming distance
    /// * `rng` - the random source for all tie-breaking
    /// # Errors
    /// * if the input set is empty or `bound` exceeds the sequence length
    pub fn solve<R: Rng + ?Sized>(&self, input_set: &InputSet, bound: usize, rng: &mut R) -> Result<Option<ClosestString>, Box<dyn std::error::Error>> {
        input_set.validate_bound(bound)?;

        let seq_len = input_set.sequence_len();
        let table = FrequencyTable::build(input_set);
        let mut scoreboard = Scoreboard::new(&table, 0..seq_len);

        // None is the unassigned marker, it counts as a mismatch against every input
        let mut answer: Vec<Option<u8>> = vec![None; seq_len];
        let mut undecided: HashSet<usize> = (0..seq_len).collect();
        let mut distance_list = rank_by_partial_distance(&answer, input_set);

        while !undecided.is_empty() {
            // uniform choice among the inputs that fit worst
            let max_distance = distance_list.max_distance();
            let chosen_index = match distance_list.max_ties().choose(rng) {
                Some(&i) => i,
                None => bail!("No inputs available to rank")
            };

            // each remaining position can reduce the distance by at most one
            if self.config.prune && max_distance.saturating_sub(undecided.len()) > bound {
                debug!(
                    "Pruned: input {chosen_index} at distance {max_distance} with {} undecided positions cannot reach bound {bound}",
                    undecided.len()
                );
                return Ok(None);
            }

            let chosen_sequence = input_set.sequence(chosen_index);
            let candidates = scoreboard.best_matches(chosen_sequence);
            let selected = match self.select_candidate(&candidates, &table, &distance_list, rng) {
                Some(entry) => entry,
                None => bail!("No scoreboard candidates match input {chosen_index}")
            };
            trace!(
                "chosen input {chosen_index} (distance {max_distance}), assigning {:?} at {} from {} candidate(s)",
                selected.symbol() as char, selected.position(), candidates.len()
            );

            // assign and retire the position
            let position = selected.position();
            assert!(answer[position].is_none());
            answer[position] = Some(selected.symbol());
            scoreboard.remove_position(position);
            undecided.remove(&position);

            match self.config.distance_tracking {
                DistanceTracking::Recompute => {
                    distance_list = rank_by_partial_distance(&answer, input_set);
                },
                DistanceTracking::Incremental => {
                    distance_list.decrement(table.carriers(position, selected.symbol()));
                }
            };
        }

        let sequence: Vec<u8> = match answer.into_iter().collect::<Option<Vec<u8>>>() {
            Some(s) => s,
            None => bail!("Answer has unassigned positions after all positions were decided")
        };
        let closest = ClosestString::new(sequence, distance_list.distances().to_vec());
        debug!("Greedy result max distance: {} (bound {bound})", closest.max_distance());
        Ok(Some(closest))
    }

    /// Picks one of the tied best scoreboard entries according to the tie-break mode.
    /// # Arguments
    /// * `candidates` - entries with equal (maximum) count, in scoreboard order
    /// * `table` - frequency table, used for the carriers of each entry
    /// * `distance_list` - the current distances
    /// * `rng` - random source for uniform tie-breaking
    fn select_candidate<R: Rng + ?Sized>(&self, candidates: &[ScoreEntry], table: &FrequencyTable, distance_list: &DistanceList, rng: &mut R) -> Option<ScoreEntry> {
        match self.config.tie_break {
            TieBreak::Uniform => candidates.choose(rng).cloned(),
            TieBreak::DistanceWeighted => {
                // first strictly larger total wins, so ties keep scoreboard order
                let mut best: Option<(ScoreEntry, usize)> = None;
                for &entry in candidates.iter() {
                    let total: usize = table.carriers(entry.position(), entry.symbol()).iter()
                        .map(|&i| distance_list.distance(i))
                        .sum();
                    if best.map_or(true, |(_, best_total)| total > best_total) {
                        best = Some((entry, total));
                    }
                }
                best.map(|(entry, _)| entry)
            }
        }
    }

    // getters
    pub fn config(&self) -> &CspConfig {
        &self.config
    }
}
