/// Ranking of every input by its current Hamming distance to a (partial) answer.
/// The order is by distance descending and then by input index ascending, so ties always appear in a fixed order.
/// When a symbol is assigned, only the inputs that carry it get closer, and each of them by exactly one.
#[derive(Clone, Debug, PartialEq)]
pub struct DistanceList {
    /// Current distance, indexed by input index
    distances: Vec<usize>,
    /// Input indices in ranked order
    order: Vec<usize>
}

impl DistanceList {
    /// Creates a ranked list from raw distances.
    /// # Arguments
    /// * `distances` - the distance for each input, indexed by input index
    pub fn from_distances(distances: Vec<usize>) -> DistanceList {
        let mut distance_list = DistanceList {
            order: (0..distances.len()).collect(),
            distances
        };
        distance_list.sort();
        distance_list
    }

    /// Applies the assignment of a symbol that the given inputs carry at the assigned position.
    /// # Arguments
    /// * `carriers` - the input indices that agree with the newly assigned symbol
    pub fn decrement(&mut self, carriers: &[usize]) {
        for &input_index in carriers.iter() {
            assert!(self.distances[input_index] > 0);
            self.distances[input_index] -= 1;
        }
        self.sort();
    }

    /// Returns the largest distance in the list, 0 if the list is empty.
    pub fn max_distance(&self) -> usize {
        self.order.first()
            .map(|&i| self.distances[i])
            .unwrap_or(0)
    }

    /// Returns the input indices that share the maximum distance, in ascending index order.
    pub fn max_ties(&self) -> &[usize] {
        let max_distance = self.max_distance();
        let tie_count = self.order.iter()
            .take_while(|&&i| self.distances[i] == max_distance)
            .count();
        &self.order[..tie_count]
    }

    /// Iterates over (input index, distance) pairs in ranked order.
    pub fn ranked(&self) -> impl Iterator<Item = (usize, usize)> + '_ {
        self.order.iter().map(|&i| (i, self.distances[i]))
    }

    fn sort(&mut self) {
        let distances = &self.distances;
        self.order.sort_by(|&a, &b| {
            distances[b].cmp(&distances[a])
                .then(a.cmp(&b))
        });
    }

    // Getters
    pub fn distance(&self, input_index: usize) -> usize {
        self.distances[input_index]
    }

    pub fn distances(&self) -> &[usize] {
        &self.distances
    }

    pub fn len(&self) -> usize {
        self.distances.len()
    }

    pub fn is_empty(&self) -> bool {
        self.distances.is_empty()
    }
}
