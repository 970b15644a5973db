use rand::distributions::Uniform;
use rand::{Rng, SeedableRng};

/// Creates a planted test set we can verify is working.
/// Every sample is the planted answer with exactly `distance` positions replaced by a different symbol, so the answer is within `distance` of all samples.
/// # Arguments
/// * `alphabet` - the symbols to draw from, e.g. for DNA it's b"ACGT"
/// * `seq_len` - the length of the sequences
/// * `num_samples` - the number of samples to generate from the planted answer
/// * `distance` - the exact Hamming distance from the planted answer to each sample
/// * `seed` - seed for the random source, the same seed always gives the same test
pub fn generate_planted(alphabet: &[u8], seq_len: usize, num_samples: usize, distance: usize, seed: u64) -> (Vec<u8>, Vec<Vec<u8>>) {
    assert!(alphabet.len() > 1);
    assert!(distance <= seq_len);

    let mut rng = rand::rngs::StdRng::seed_from_u64(seed);
    let base_distribution = Uniform::new(0, alphabet.len());
    let offset_distribution = Uniform::new(1, alphabet.len());

    let answer_indices: Vec<usize> = (0..seq_len)
        .map(|_i| rng.sample(base_distribution))
        .collect();

    let samples: Vec<Vec<u8>> = (0..num_samples)
        .map(|_i| {
            let mut seq_indices = answer_indices.clone();
            for position in rand::seq::index::sample(&mut rng, seq_len, distance).iter() {
                // substitution, the non-zero offset guarantees a different symbol
                let sub_offset = rng.sample(offset_distribution);
                seq_indices[position] = (seq_indices[position] + sub_offset) % alphabet.len();
            }
            seq_indices.into_iter().map(|i| alphabet[i]).collect()
        })
        .collect();

    let answer: Vec<u8> = answer_indices.into_iter().map(|i| alphabet[i]).collect();
    (answer, samples)
}
