/*!
This module provides the exact fixed-parameter branching search (CSd) for the closest string problem.
Given a starting candidate `s` and an edit budget, it either certifies a string within the bound of every input or reports that none is reachable from `s` within the budget.
The search tree has at most (bound+1)^budget nodes, independent of the sequence length and alphabet size.

# Example usage
```rust
use closest_con::branching_search::{decide, solve_exact};
use closest_con::input_set::{Alphabet, InputSet};
use rand::SeedableRng;

let sequences = [b"AAAA".to_vec(), b"AACC".to_vec(), b"CCAA".to_vec()];
let input_set = InputSet::from_sequences(Alphabet::new(b"AC").unwrap(), &sequences).unwrap();
let mut rng = rand::rngs::StdRng::seed_from_u64(0);

// starting from the first input, the first input itself is already within 2 of everything
let search = solve_exact(&input_set, 2, input_set.sequence(0), 2, &mut rng).unwrap();
assert_eq!(search.closest().unwrap().sequence(), b"AAAA");
assert_eq!(search.nodes_explored(), 1);

// "AACC" and "CCAA" differ everywhere, so nothing is within 1 of both
let search = decide(&input_set, 1, &mut rng).unwrap();
assert!(search.closest().is_none());
```
*/

use itertools::Itertools;
use log::{debug, trace};
use rand::seq::SliceRandom;
use rand::Rng;
use simple_error::bail;

use crate::greedy_consensus::ClosestString;
use crate::input_set::InputSet;
use crate::string_metrics::mismatches;

/// Result of a branching search, with the statistics of the explored tree
#[derive(Clone, Debug, Default, PartialEq)]
pub struct BranchSearch {
    /// The certified closest string, None if nothing was reachable within the budget
    closest: Option<ClosestString>,
    /// Number of recursive calls, including the root
    nodes_explored: u64,
    /// Deepest recursion level reached, the root is level 0
    max_depth: usize
}

impl BranchSearch {
    // Getters
    pub fn closest(&self) -> Option<&ClosestString> {
        self.closest.as_ref()
    }

    pub fn into_closest(self) -> Option<ClosestString> {
        self.closest
    }

    pub fn nodes_explored(&self) -> u64 {
        self.nodes_explored
    }

    pub fn max_depth(&self) -> usize {
        self.max_depth
    }
}

/// Searches for a string within `budget` edits of `candidate` that is within `bound` of every input.
/// A None result only means no such string is reachable from `candidate`; see `decide(...)` for the complete procedure.
/// # Arguments
/// * `input_set` - the inputs, must be non-empty
/// * `bound` - the maximum allowed Hamming distance to each input
/// * `candidate` - the starting candidate, typically one of the inputs
/// * `budget` - the number of single-position edits still allowed; negative budgets find nothing
/// * `rng` - random source for choosing the branching input and positions
/// # Errors
/// * if the input set is empty or `bound` exceeds the sequence length
/// * if `candidate` is not the same length as the inputs
pub fn solve_exact<R: Rng + ?Sized>(input_set: &InputSet, bound: usize, candidate: &[u8], budget: isize, rng: &mut R) -> Result<BranchSearch, Box<dyn std::error::Error>> {
    input_set.validate_bound(bound)?;
    if candidate.len() != input_set.sequence_len() {
        bail!("Expected candidate of length {}, but got one of length {}", input_set.sequence_len(), candidate.len());
    }

    let mut search = BranchSearch::default();
    let mut working = candidate.to_vec();
    let found = branch(input_set, bound, &mut working, budget, 0, rng, &mut search);
    search.closest = found.map(|sequence| {
        let distances = input_set.sequences().iter()
            .map(|s| mismatches(&sequence, s))
            .collect();
        ClosestString::new(sequence, distances)
    });

    debug!("nodes_explored: {}", search.nodes_explored);
    debug!("max_depth: {}", search.max_depth);
    Ok(search)
}

/// Complete decision procedure: runs `solve_exact(...)` from every distinct input with a budget of `bound`.
/// A None result here proves no string is within `bound` of every input.
/// # Arguments
/// * `input_set` - the inputs, must be non-empty
/// * `bound` - the maximum allowed Hamming distance to each input
/// * `rng` - random source passed to each search
/// # Errors
/// * if the input set is empty or `bound` exceeds the sequence length
pub fn decide<R: Rng + ?Sized>(input_set: &InputSet, bound: usize, rng: &mut R) -> Result<BranchSearch, Box<dyn std::error::Error>> {
    input_set.validate_bound(bound)?;

    let mut combined = BranchSearch::default();
    for (start_index, &start) in input_set.sequences().iter().enumerate().unique_by(|&(_, s)| *s) {
        let search = solve_exact(input_set, bound, start, bound as isize, rng)?;
        combined.nodes_explored += search.nodes_explored;
        combined.max_depth = combined.max_depth.max(search.max_depth);
        if search.closest.is_some() {
            debug!("Found solution starting from input {start_index}");
            combined.closest = search.closest;
            break;
        }
    }
    Ok(combined)
}

/// Recursive core of the search; `candidate` is restored to its entry state before returning.
fn branch<R: Rng + ?Sized>(input_set: &InputSet, bound: usize, candidate: &mut [u8], budget: isize, depth: usize, rng: &mut R, search: &mut BranchSearch) -> Option<Vec<u8>> {
    search.nodes_explored += 1;
    search.max_depth = search.max_depth.max(depth);

    if budget < 0 {
        return None;
    }

    // `budget` more edits can bring any one input at most `budget` closer
    let reach = bound + budget as usize;
    let distances: Vec<usize> = input_set.sequences().iter()
        .map(|s| mismatches(candidate, s))
        .collect();
    if distances.iter().any(|&d| d > reach) {
        trace!("depth {depth}: pruned, an input is beyond {reach}");
        return None;
    }

    let far_inputs: Vec<usize> = distances.iter().enumerate()
        .filter(|&(_, &d)| d > bound)
        .map(|(i, _)| i)
        .collect();
    let far_index = match far_inputs.choose(rng) {
        Some(&i) => i,
        // everything is within the bound
        None => return Some(candidate.to_vec())
    };

    // any solution must agree with the far input on at least one of any bound+1 disagreeing positions
    let far_sequence = input_set.sequence(far_index);
    let disagreements: Vec<usize> = (0..candidate.len())
        .filter(|&p| candidate[p] != far_sequence[p])
        .collect();
    assert!(disagreements.len() > bound);
    let picks = rand::seq::index::sample(rng, disagreements.len(), bound + 1);
    trace!("depth {depth}: branching on input {far_index} at distance {}", distances[far_index]);

    for pick in picks.iter() {
        let position = disagreements[pick];
        let previous = candidate[position];
        candidate[position] = far_sequence[position];
        let result = branch(input_set, bound, candidate, budget - 1, depth + 1, rng, search);
        candidate[position] = previous;
        if result.is_some() {
            return result;
        }
    }
    None
}

#[cfg(test)]
mod tests {
    use super::*;

    use std::path::PathBuf;

    use rand::SeedableRng;

    use crate::example_gen::generate_planted;
    use crate::input_set::Alphabet;
    use crate::string_metrics::{hamming_distance, verify};

    #[test]
    fn test_negative_budget() {
        let sequences = [b"acgt", b"tgca"];
        let input_set = InputSet::from_sequences(Alphabet::new(b"acgt").unwrap(), &sequences).unwrap();
        let mut rng = rand::rngs::StdRng::seed_from_u64(0);

        // even a candidate that already satisfies the bound is rejected, with no recursion
        let search = solve_exact(&input_set, 4, b"acgt", -1, &mut rng).unwrap();
        assert_eq!(search, BranchSearch {
            closest: None,
            nodes_explored: 1,
            max_depth: 0
        });
    }

    #[test]
    fn test_candidate_already_satisfies() {
        let sequences = [b"acgt", b"acga", b"tcgt"];
        let input_set = InputSet::from_sequences(Alphabet::new(b"acgt").unwrap(), &sequences).unwrap();
        let mut rng = rand::rngs::StdRng::seed_from_u64(0);

        let search = solve_exact(&input_set, 1, b"acgt", 1, &mut rng).unwrap();
        assert_eq!(search.nodes_explored(), 1);
        assert_eq!(search.max_depth(), 0);
        assert_eq!(search.into_closest(), Some(ClosestString::new(b"acgt".to_vec(), vec![0, 1, 1])));
    }

    #[test]
    fn test_prune_out_of_reach() {
        let sequences = [b"aaaa", b"cccc"];
        let input_set = InputSet::from_sequences(Alphabet::new(b"ac").unwrap(), &sequences).unwrap();
        let mut rng = rand::rngs::StdRng::seed_from_u64(0);

        // "cccc" is 4 away, and 1 + 2 edits cannot close that gap
        let search = solve_exact(&input_set, 1, b"aaaa", 2, &mut rng).unwrap();
        assert!(search.closest().is_none());
        assert_eq!(search.nodes_explored(), 1);
    }

    #[test]
    fn test_single_branch_level() {
        let sequences = [b"aaaa", b"aacc"];
        let input_set = InputSet::from_sequences(Alphabet::new(b"ac").unwrap(), &sequences).unwrap();
        let mut rng = rand::rngs::StdRng::seed_from_u64(0);

        // one edit toward "aacc" finds a string within 1 of both
        let search = solve_exact(&input_set, 1, b"aaaa", 1, &mut rng).unwrap();
        let closest = search.closest().unwrap();
        assert!(closest.satisfies(1));
        assert_eq!(hamming_distance(closest.sequence(), b"aaaa").unwrap(), 1);
        assert_eq!(search.max_depth(), 1);
        assert!(search.nodes_explored() <= 3);
    }

    #[test]
    fn test_invalid_inputs() {
        let sequences = [b"aaaa", b"aacc"];
        let input_set = InputSet::from_sequences(Alphabet::new(b"ac").unwrap(), &sequences).unwrap();
        let mut rng = rand::rngs::StdRng::seed_from_u64(0);
        let error = solve_exact(&input_set, 1, b"aaa", 1, &mut rng).err().unwrap();
        assert_eq!(error.to_string(), "Expected candidate of length 4, but got one of length 3");
        assert!(solve_exact(&input_set, 5, b"aaaa", 1, &mut rng).is_err());
        assert!(decide(&input_set, 5, &mut rng).is_err());
    }

    #[test]
    fn test_planted_round_trip() {
        let alphabet = b"acgt";
        for seed in 0..30 {
            let (_answer, dataset) = generate_planted(alphabet, 20, 8, 3, seed);
            let input_set = InputSet::from_sequences(Alphabet::new(alphabet).unwrap(), &dataset).unwrap();
            let mut rng = rand::rngs::StdRng::seed_from_u64(seed);

            let search = solve_exact(&input_set, 3, input_set.sequence(0), 3, &mut rng).unwrap();
            let closest = search.closest().unwrap();
            assert!(closest.satisfies(3));
            assert_eq!(closest.max_distance(), verify(closest.sequence(), &input_set).unwrap());

            // with d = 3 the tree has at most 1 + 4 + 16 + 64 nodes
            let node_limit: u64 = (0..=3).map(|level| 4u64.pow(level)).sum();
            assert!(search.nodes_explored() <= node_limit);
        }
    }

    #[test]
    fn test_branch_completeness() {
        // never NOT_FOUND when a planted solution exists, across seeds and parameters
        let alphabet = b"acgt";
        for (seq_len, num_samples, distance) in [(10, 10, 4), (30, 5, 2), (15, 12, 1), (8, 6, 0)] {
            for seed in 0..10 {
                let (_answer, dataset) = generate_planted(alphabet, seq_len, num_samples, distance, seed);
                let input_set = InputSet::from_sequences(Alphabet::new(alphabet).unwrap(), &dataset).unwrap();
                let mut rng = rand::rngs::StdRng::seed_from_u64(seed + 100);
                let search = solve_exact(&input_set, distance, input_set.sequence(0), distance as isize, &mut rng).unwrap();
                assert!(search.closest().unwrap().satisfies(distance));
            }
        }
    }

    #[test]
    fn test_decide_infeasible() {
        // two inputs at distance 4 cannot share a string within 1 of both
        let sequences = [b"aaaa", b"cccc", b"aacc"];
        let input_set = InputSet::from_sequences(Alphabet::new(b"ac").unwrap(), &sequences).unwrap();
        let mut rng = rand::rngs::StdRng::seed_from_u64(0);
        let search = decide(&input_set, 1, &mut rng).unwrap();
        assert!(search.closest().is_none());
        assert!(search.nodes_explored() >= 3);

        let search = decide(&input_set, 2, &mut rng).unwrap();
        assert!(search.closest().unwrap().satisfies(2));
    }

    #[test]
    fn test_decide_skips_duplicates() {
        let sequences = [b"aaaa", b"aaaa", b"aaaa"];
        let input_set = InputSet::from_sequences(Alphabet::new(b"ac").unwrap(), &sequences).unwrap();
        let mut rng = rand::rngs::StdRng::seed_from_u64(0);
        let search = decide(&input_set, 0, &mut rng).unwrap();
        assert_eq!(search.nodes_explored(), 1);
        assert_eq!(search.closest().unwrap().sequence(), b"aaaa");
    }

    #[derive(Debug, serde::Deserialize)]
    struct PlantedRecord {
        kind: String,
        distance: usize,
        sequence: String
    }

    /// Wrapper test function that loads a planted test from a csv file.
    /// Expected columns are "kind" (answer or input), "distance" (to the planted answer), and "sequence".
    /// Returns a tuple of (answer, inputs).
    /// # Arguments
    /// * `filename` - the file path to load
    fn load_planted_csv_test(filename: &std::path::Path) -> (Vec<u8>, Vec<Vec<u8>>) {
        let mut answer = None;
        let mut inputs = vec![];
        let mut distances = vec![];

        let mut csv_reader = csv::ReaderBuilder::new()
            .has_headers(true)
            .from_path(filename)
            .unwrap();
        for row in csv_reader.deserialize() {
            let record: PlantedRecord = row.unwrap();
            let sequence = record.sequence.as_bytes().to_vec();
            match record.kind.as_str() {
                "answer" => answer = Some(sequence),
                "input" => {
                    inputs.push(sequence);
                    distances.push(record.distance);
                },
                other => panic!("Unexpected kind: {other}")
            }
        }

        // sanity check the fixture itself
        let answer = answer.unwrap();
        for (input, &distance) in inputs.iter().zip(distances.iter()) {
            assert_eq!(hamming_distance(&answer, input).unwrap(), distance);
        }
        (answer, inputs)
    }

    #[test]
    fn test_csv_planted_001() {
        let (answer, inputs) = load_planted_csv_test(&PathBuf::from("./tests/planted_001.csv"));
        let input_set = InputSet::from_sequences(Alphabet::new(b"acgt").unwrap(), &inputs).unwrap();
        assert_eq!(verify(&answer, &input_set).unwrap(), 2);

        for seed in 0..10 {
            let mut rng = rand::rngs::StdRng::seed_from_u64(seed);
            let search = solve_exact(&input_set, 2, input_set.sequence(0), 2, &mut rng).unwrap();
            assert!(search.closest().unwrap().satisfies(2));
        }

        // inputs 0 and 1 are 4 apart, so a bound of 1 is infeasible
        let mut rng = rand::rngs::StdRng::seed_from_u64(0);
        assert!(decide(&input_set, 1, &mut rng).unwrap().closest().is_none());
    }
}
