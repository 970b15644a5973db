/*!
Validated inputs for the closest string solvers.
An `InputSet` borrows its sequences and guarantees that they are non-empty, all the same length, and only use symbols from the `Alphabet`.

# Example usage
```rust
use closest_con::input_set::{Alphabet, InputSet};

let alphabet = Alphabet::new(b"ACGT").unwrap();
let sequences = [b"ACGT".to_vec(), b"ACCT".to_vec()];
let input_set = InputSet::from_sequences(alphabet, &sequences).unwrap();
assert_eq!(input_set.len(), 2);
assert_eq!(input_set.sequence_len(), 4);

// unequal lengths are rejected before any solver runs
let alphabet = Alphabet::new(b"ACGT").unwrap();
let mut input_set = InputSet::new(alphabet);
input_set.add_sequence(b"ACGT").unwrap();
assert!(input_set.add_sequence(b"ACG").is_err());
```
*/

use itertools::Itertools;
use rand::seq::SliceRandom;
use rand::Rng;
use rustc_hash::FxHashSet as HashSet;
use simple_error::bail;

/// A finite set of at least two distinct symbols, stored in sorted order.
#[derive(Clone, Debug, PartialEq)]
pub struct Alphabet {
    /// Sorted, de-duplicated symbols
    symbols: Vec<u8>
}

impl Alphabet {
    /// Creates an alphabet from a list of symbols; duplicates are collapsed.
    /// # Arguments
    /// * `symbols` - the symbols in the alphabet
    /// # Errors
    /// * if fewer than two distinct symbols are provided
    pub fn new(symbols: &[u8]) -> Result<Alphabet, Box<dyn std::error::Error>> {
        let symbols: Vec<u8> = symbols.iter().cloned().sorted().dedup().collect();
        if symbols.len() < 2 {
            bail!("Alphabet must contain at least 2 distinct symbols, but found {}", symbols.len());
        }
        Ok(Alphabet { symbols })
    }

    /// Builds the alphabet from every symbol observed in the provided sequences.
    /// # Arguments
    /// * `sequences` - the sequences to scan
    /// # Errors
    /// * if the sequences contain fewer than two distinct symbols
    pub fn from_sequences<S: AsRef<[u8]>>(sequences: &[S]) -> Result<Alphabet, Box<dyn std::error::Error>> {
        let mut observed: HashSet<u8> = Default::default();
        for sequence in sequences.iter() {
            observed.extend(sequence.as_ref().iter().cloned());
        }
        let symbols: Vec<u8> = observed.into_iter().collect();
        Alphabet::new(&symbols)
    }

    /// Returns the index of a symbol in the sorted alphabet, if present.
    pub fn index_of(&self, symbol: u8) -> Option<usize> {
        self.symbols.binary_search(&symbol).ok()
    }

    pub fn contains(&self, symbol: u8) -> bool {
        self.index_of(symbol).is_some()
    }

    // Getters
    pub fn symbols(&self) -> &[u8] {
        &self.symbols
    }

    pub fn len(&self) -> usize {
        self.symbols.len()
    }

    pub fn is_empty(&self) -> bool {
        self.symbols.is_empty()
    }
}

/// Ordered collection of equal-length sequences over an alphabet.
/// The index of a sequence is its identity for the duration of one solver call.
#[derive(Clone, Debug)]
pub struct InputSet<'a> {
    /// The alphabet all sequences are drawn from
    alphabet: Alphabet,
    /// The borrowed sequences, all the same length
    sequences: Vec<&'a [u8]>
}

impl<'a> InputSet<'a> {
    /// Creates an empty input set over the given alphabet.
    /// # Arguments
    /// * `alphabet` - the symbols the sequences may use
    pub fn new(alphabet: Alphabet) -> InputSet<'a> {
        InputSet {
            alphabet,
            sequences: vec![]
        }
    }

    /// Creates an input set and adds every provided sequence.
    /// # Arguments
    /// * `alphabet` - the symbols the sequences may use
    /// * `sequences` - the sequences to add, in order
    /// # Errors
    /// * if no sequences are provided
    /// * same as `add_sequence(...)`
    pub fn from_sequences<S: AsRef<[u8]>>(alphabet: Alphabet, sequences: &'a [S]) -> Result<InputSet<'a>, Box<dyn std::error::Error>> {
        let mut input_set = InputSet::new(alphabet);
        for sequence in sequences.iter() {
            input_set.add_sequence(sequence.as_ref())?;
        }
        input_set.validate()?;
        Ok(input_set)
    }

    /// Adds a new sequence to the end of the set.
    /// # Arguments
    /// * `sequence` - the new sequence to add
    /// # Errors
    /// * if the sequence is empty
    /// * if the sequence length differs from previously added sequences
    /// * if the sequence contains a symbol outside the alphabet
    pub fn add_sequence(&mut self, sequence: &'a [u8]) -> Result<(), Box<dyn std::error::Error>> {
        if sequence.is_empty() {
            bail!("Sequences must have length >= 1");
        }

        if let Some(first) = self.sequences.first() {
            if first.len() != sequence.len() {
                bail!("Expected sequence of length {}, but got one of length {}", first.len(), sequence.len());
            }
        }

        if let Some(&bad_symbol) = sequence.iter().find(|&&c| !self.alphabet.contains(c)) {
            bail!("Symbol {:?} is not in the alphabet", bad_symbol as char);
        }

        self.sequences.push(sequence);
        Ok(())
    }

    /// Checks that the set is ready for a solver call.
    /// # Errors
    /// * if no sequences have been added
    pub fn validate(&self) -> Result<(), Box<dyn std::error::Error>> {
        if self.sequences.is_empty() {
            bail!("InputSet must contain at least one sequence");
        }
        Ok(())
    }

    /// Checks that a distance bound is usable for this set.
    /// # Arguments
    /// * `bound` - the maximum allowed Hamming distance
    /// # Errors
    /// * if the set is empty
    /// * if the bound exceeds the sequence length
    pub fn validate_bound(&self, bound: usize) -> Result<(), Box<dyn std::error::Error>> {
        self.validate()?;
        if bound > self.sequence_len() {
            bail!("Bound {} exceeds sequence length {}", bound, self.sequence_len());
        }
        Ok(())
    }

    /// Returns a copy of this set with the sequence order shuffled.
    /// The retry harness uses this to change which ties get broken and in what order.
    /// # Arguments
    /// * `rng` - the random source for the shuffle
    pub fn shuffled<R: Rng + ?Sized>(&self, rng: &mut R) -> InputSet<'a> {
        let mut sequences = self.sequences.clone();
        sequences.shuffle(rng);
        InputSet {
            alphabet: self.alphabet.clone(),
            sequences
        }
    }

    /// Returns the common length of the sequences, 0 if the set is empty.
    pub fn sequence_len(&self) -> usize {
        self.sequences.first().map(|s| s.len()).unwrap_or(0)
    }

    // Getters
    pub fn alphabet(&self) -> &Alphabet {
        &self.alphabet
    }

    pub fn sequences(&self) -> &[&'a [u8]] {
        &self.sequences
    }

    pub fn sequence(&self, index: usize) -> &'a [u8] {
        self.sequences[index]
    }

    pub fn len(&self) -> usize {
        self.sequences.len()
    }

    pub fn is_empty(&self) -> bool {
        self.sequences.is_empty()
    }
}
