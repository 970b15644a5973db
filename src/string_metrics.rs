use simple_error::bail;

use crate::distance_list::DistanceList;
use crate::input_set::InputSet;

/// Returns the Hamming distance between two equal-length u8 slices.
/// # Arguments
/// * `v1` - the first slice
/// * `v2` - the second slice
/// # Errors
/// * if the slices have different lengths
/// # Examples
/// ```rust
/// use closest_con::string_metrics::hamming_distance;
/// let v1 = b"ACGTA";
/// let v2 = b"ACCTT";
/// assert_eq!(hamming_distance(v1, v1).unwrap(), 0);
/// assert_eq!(hamming_distance(v1, v2).unwrap(), 2);
/// assert!(hamming_distance(v1, b"ACG").is_err());
/// ```
pub fn hamming_distance(v1: &[u8], v2: &[u8]) -> Result<usize, Box<dyn std::error::Error>> {
    if v1.len() != v2.len() {
        bail!("Hamming distance requires equal lengths, but got {} and {}", v1.len(), v2.len());
    }
    Ok(mismatches(v1, v2))
}

/// Counts mismatched positions without checking lengths; callers guarantee equal length.
pub(crate) fn mismatches(v1: &[u8], v2: &[u8]) -> usize {
    v1.iter().zip(v2.iter())
        .filter(|(a, b)| a != b)
        .count()
}

/// Returns the distance from a partial answer to a sequence.
/// Unassigned positions (`None`) always count as a mismatch.
/// # Arguments
/// * `answer` - the partial answer
/// * `sequence` - the full sequence, same length as `answer`
/// # Examples
/// ```rust
/// use closest_con::string_metrics::partial_distance;
/// let answer = [Some(b'A'), None, Some(b'G')];
/// assert_eq!(partial_distance(&answer, b"ACG"), 1);
/// assert_eq!(partial_distance(&answer, b"TCG"), 2);
/// ```
pub fn partial_distance(answer: &[Option<u8>], sequence: &[u8]) -> usize {
    assert_eq!(answer.len(), sequence.len());
    answer.iter().zip(sequence.iter())
        .filter(|&(a, b)| *a != Some(*b))
        .count()
}

/// Ranks every input in the set by its distance to `target`.
/// # Arguments
/// * `target` - the sequence to compare against
/// * `input_set` - the inputs to rank
/// # Errors
/// * if `target` is not the same length as the inputs
pub fn rank_by_distance(target: &[u8], input_set: &InputSet) -> Result<DistanceList, Box<dyn std::error::Error>> {
    let distances = input_set.sequences().iter()
        .map(|s| hamming_distance(target, s))
        .collect::<Result<Vec<usize>, _>>()?;
    Ok(DistanceList::from_distances(distances))
}

/// Ranks every input in the set by its distance to a partial answer.
/// # Arguments
/// * `answer` - the partial answer, same length as the inputs
/// * `input_set` - the inputs to rank
pub fn rank_by_partial_distance(answer: &[Option<u8>], input_set: &InputSet) -> DistanceList {
    let distances = input_set.sequences().iter()
        .map(|s| partial_distance(answer, s))
        .collect();
    DistanceList::from_distances(distances)
}

/// Returns the maximum distance from `answer` to any input; this is what a caller checks against the bound.
/// # Arguments
/// * `answer` - the candidate closest string
/// * `input_set` - the inputs
/// # Errors
/// * if the input set is empty
/// * if `answer` is not the same length as the inputs
/// # Examples
/// ```rust
/// use closest_con::input_set::{Alphabet, InputSet};
/// use closest_con::string_metrics::verify;
/// let sequences = [b"AAAA", b"AACC", b"CCAA"];
/// let input_set = InputSet::from_sequences(Alphabet::new(b"AC").unwrap(), &sequences).unwrap();
/// assert_eq!(verify(b"AAAA", &input_set).unwrap(), 2);
/// assert_eq!(verify(b"CCCC", &input_set).unwrap(), 4);
/// ```
pub fn verify(answer: &[u8], input_set: &InputSet) -> Result<usize, Box<dyn std::error::Error>> {
    input_set.validate()?;
    Ok(rank_by_distance(answer, input_set)?.max_distance())
}
