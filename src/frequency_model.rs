/*!
Per-position symbol counts for an input set, and the ranked "scoreboard" of (position, symbol, count) candidates built from them.

# Example usage
```rust
use closest_con::input_set::{Alphabet, InputSet};
use closest_con::frequency_model::{FrequencyTable, Scoreboard};

let sequences = [b"AAC", b"ACC", b"AGT"];
let input_set = InputSet::from_sequences(Alphabet::new(b"ACGT").unwrap(), &sequences).unwrap();
let table = FrequencyTable::build(&input_set);
assert_eq!(table.count(0, b'A'), 3);
assert_eq!(table.count(2, b'C'), 2);
assert_eq!(table.carriers(1, b'C'), &[1]);

// position 0 with count 3 ranks first
let scoreboard = Scoreboard::new(&table, 0..3);
assert_eq!(scoreboard.entries()[0].position(), 0);
assert_eq!(scoreboard.entries()[0].count(), 3);
```
*/

use crate::input_set::{Alphabet, InputSet};

/// Raw counts (not normalized frequencies) of each symbol at each position, plus which inputs carry it.
#[derive(Clone, Debug)]
pub struct FrequencyTable {
    /// The alphabet, used to map symbols to table columns
    alphabet: Alphabet,
    /// counts[position][symbol_index]
    counts: Vec<Vec<usize>>,
    /// carriers[position][symbol_index] is the ascending list of input indices with that symbol at that position
    carriers: Vec<Vec<Vec<usize>>>
}

impl FrequencyTable {
    /// Builds the table in a single pass over the inputs.
    /// # Arguments
    /// * `input_set` - the inputs to count
    pub fn build(input_set: &InputSet) -> FrequencyTable {
        let alphabet = input_set.alphabet().clone();
        let seq_len = input_set.sequence_len();
        let mut counts = vec![vec![0; alphabet.len()]; seq_len];
        let mut carriers = vec![vec![vec![]; alphabet.len()]; seq_len];

        for (input_index, sequence) in input_set.sequences().iter().enumerate() {
            for (position, &symbol) in sequence.iter().enumerate() {
                // InputSet guarantees every symbol is in the alphabet
                let symbol_index = alphabet.index_of(symbol).unwrap();
                counts[position][symbol_index] += 1;
                carriers[position][symbol_index].push(input_index);
            }
        }

        FrequencyTable {
            alphabet,
            counts,
            carriers
        }
    }

    /// Returns how many inputs have `symbol` at `position`; 0 for symbols outside the alphabet.
    pub fn count(&self, position: usize, symbol: u8) -> usize {
        self.alphabet.index_of(symbol)
            .map(|si| self.counts[position][si])
            .unwrap_or(0)
    }

    /// Returns the input indices that have `symbol` at `position`.
    pub fn carriers(&self, position: usize, symbol: u8) -> &[usize] {
        match self.alphabet.index_of(symbol) {
            Some(si) => &self.carriers[position][si],
            None => &[]
        }
    }

    // Getters
    pub fn alphabet(&self) -> &Alphabet {
        &self.alphabet
    }

    pub fn sequence_len(&self) -> usize {
        self.counts.len()
    }
}

/// A single scoreboard candidate.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub struct ScoreEntry {
    position: usize,
    symbol: u8,
    count: usize
}

impl ScoreEntry {
    pub fn new(position: usize, symbol: u8, count: usize) -> ScoreEntry {
        ScoreEntry { position, symbol, count }
    }

    // Getters
    pub fn position(&self) -> usize {
        self.position
    }

    pub fn symbol(&self) -> u8 {
        self.symbol
    }

    pub fn count(&self) -> usize {
        self.count
    }
}

/// Ranked list of candidates for a subset of positions.
/// Entries are sorted by count descending, then position and symbol ascending.
/// Zero-count entries are never stored because no input can match them.
#[derive(Clone, Debug, PartialEq)]
pub struct Scoreboard {
    entries: Vec<ScoreEntry>
}

impl Scoreboard {
    /// Builds the scoreboard restricted to the provided positions.
    /// # Arguments
    /// * `table` - the frequency table to rank
    /// * `positions` - the positions to include
    pub fn new(table: &FrequencyTable, positions: impl IntoIterator<Item = usize>) -> Scoreboard {
        let mut entries: Vec<ScoreEntry> = vec![];
        for position in positions {
            for (&symbol, &count) in table.alphabet.symbols().iter().zip(table.counts[position].iter()) {
                if count > 0 {
                    entries.push(ScoreEntry::new(position, symbol, count));
                }
            }
        }

        entries.sort_by(|a, b| {
            b.count.cmp(&a.count)
                .then(a.position.cmp(&b.position))
                .then(a.symbol.cmp(&b.symbol))
        });
        Scoreboard { entries }
    }

    /// Drops every entry at a position, used once the position is decided.
    pub fn remove_position(&mut self, position: usize) {
        self.entries.retain(|e| e.position != position);
    }

    /// Returns the entries that match `sequence` at their position and have the highest count among all matching entries.
    /// The result keeps scoreboard order.
    /// # Arguments
    /// * `sequence` - the sequence the entries must agree with
    pub fn best_matches(&self, sequence: &[u8]) -> Vec<ScoreEntry> {
        let mut matching = self.entries.iter()
            .filter(|e| sequence[e.position] == e.symbol)
            .peekable();

        // entries are sorted by count, so the first match carries the max count
        let max_count = match matching.peek() {
            Some(e) => e.count,
            None => return vec![]
        };

        matching
            .take_while(|e| e.count == max_count)
            .cloned()
            .collect()
    }

    // Getters
    pub fn entries(&self) -> &[ScoreEntry] {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
